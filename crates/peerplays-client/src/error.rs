use peerplays_chain::{ChainError, KeyStoreError, RpcError};
use peerplays_operations::{AuthorityLevel, OperationError};
use peerplays_primitives::PrimitivesError;
use peerplays_transaction::TransactionError;
use peerplays_types::TypesError;

/// Error types for client sessions.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The node serves a different chain than the configuration expects.
    #[error("connected to chain {actual}, expected {expected}")]
    ChainMismatch { expected: String, actual: String },

    #[error("no account given and no default account configured")]
    NoDefaultAccount,

    /// The key store has no private key for the sender's memo key.
    #[error("no private key for the memo key of {0}")]
    MissingMemoKey(String),

    #[error("{foreign} is not part of the {level} authority of {account}")]
    NotInAuthority {
        foreign: String,
        account: String,
        level: AuthorityLevel,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("operation error: {0}")]
    Operation(#[from] OperationError),

    #[error("codec error: {0}")]
    Types(#[from] TypesError),

    #[error("primitives error: {0}")]
    Primitives(#[from] PrimitivesError),
}

impl From<RpcError> for ClientError {
    fn from(e: RpcError) -> Self {
        ClientError::Chain(ChainError::Rpc(e))
    }
}

impl From<KeyStoreError> for ClientError {
    fn from(e: KeyStoreError) -> Self {
        ClientError::Chain(ChainError::KeyStore(e))
    }
}
