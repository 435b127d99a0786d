use peerplays_chain::{ChainError, KeyStoreError, RpcError};
use peerplays_operations::{AuthorityLevel, OperationError};
use peerplays_primitives::PrimitivesError;
use peerplays_types::TypesError;

/// Error types for transaction assembly and signing.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The transaction structure is invalid (e.g. no operations).
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    /// The transaction has been broadcast and can no longer change.
    #[error("transaction has already been broadcast")]
    AlreadyBroadcast,

    /// Reference block and expiration are not set yet.
    #[error("transaction is not finalized")]
    NotFinalized,

    #[error("no proposal with handle {0}")]
    UnknownProposal(usize),

    /// A relative id does not point at an earlier operation creating an object
    /// of the expected type.
    #[error("{operation}.{field}: {id} does not refer to a matching earlier operation in the bundle")]
    ObjectNotInProposalBuffer {
        operation: &'static str,
        field: &'static str,
        id: String,
    },

    /// No private key is available for any entry of a required authority.
    #[error("missing private key for {level} authority of {account}")]
    MissingKey { account: String, level: AuthorityLevel },

    /// Available keys carry some weight, but not enough.
    #[error("insufficient authority for {level} of {account}: weight {weight} < threshold {threshold}")]
    InsufficientAuthority {
        account: String,
        level: AuthorityLevel,
        weight: u64,
        threshold: u32,
    },

    #[error("fee resolution error: {0}")]
    FeeError(String),

    #[error("operation error: {0}")]
    Operation(#[from] OperationError),

    #[error("codec error: {0}")]
    Types(#[from] TypesError),

    #[error("chain error: {0}")]
    Chain(#[from] ChainError),

    #[error("primitives error: {0}")]
    Primitives(#[from] PrimitivesError),
}

impl From<KeyStoreError> for TransactionError {
    fn from(e: KeyStoreError) -> Self {
        TransactionError::Chain(ChainError::KeyStore(e))
    }
}

impl From<RpcError> for TransactionError {
    fn from(e: RpcError) -> Self {
        TransactionError::Chain(ChainError::Rpc(e))
    }
}
