use peerplays_primitives::PrimitivesError;
use peerplays_types::TypesError;

/// Errors reported by the node, categorized from its error message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    #[error("missing required active authority: {0}")]
    MissingRequiredActiveAuthority(String),

    #[error("missing required owner authority: {0}")]
    MissingRequiredOwnerAuthority(String),

    #[error("no method with name: {0}")]
    NoMethodWithName(String),

    /// The same operation is already waiting in a pending proposal.
    #[error("operation already pending in a proposal: {0}")]
    OperationInProposalExists(String),

    /// The transport itself failed (connection, timeout, malformed reply).
    #[error("transport error: {0}")]
    Transport(String),

    /// A node error with no dedicated category; carries the original message.
    #[error("unhandled RPC error: {0}")]
    Unhandled(String),
}

/// Errors raised by key stores.
#[derive(Debug, thiserror::Error)]
pub enum KeyStoreError {
    #[error("key store is locked")]
    Locked,

    #[error("wrong passphrase")]
    WrongPassphrase,

    #[error("invalid key: {0}")]
    InvalidKey(#[from] PrimitivesError),
}

/// Errors raised while resolving chain objects.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("account {0} does not exist")]
    AccountDoesNotExist(String),

    #[error("asset {0} does not exist")]
    AssetDoesNotExist(String),

    #[error("proposal {0} does not exist")]
    ProposalDoesNotExist(String),

    #[error("witness {0} does not exist")]
    WitnessDoesNotExist(String),

    #[error("sport {0} does not exist")]
    SportDoesNotExist(String),

    #[error("event group {0} does not exist")]
    EventGroupDoesNotExist(String),

    #[error("event {0} does not exist")]
    EventDoesNotExist(String),

    #[error("betting market rule {0} does not exist")]
    RuleDoesNotExist(String),

    #[error("betting market group {0} does not exist")]
    BettingMarketGroupDoesNotExist(String),

    #[error("betting market {0} does not exist")]
    BettingMarketDoesNotExist(String),

    #[error("bet {0} does not exist")]
    BetDoesNotExist(String),

    #[error("tournament {0} does not exist")]
    TournamentDoesNotExist(String),

    #[error("object {0} does not exist")]
    ObjectDoesNotExist(String),

    /// The id names an object of a different type than requested.
    #[error("{id} is not a {expected} id")]
    WrongObjectType { id: String, expected: &'static str },

    /// The node is on a chain missing from the network table and did not
    /// report its own prefix.
    #[error("unknown chain id {0}")]
    UnknownChain(String),

    /// A reply lacked a field or had the wrong shape.
    #[error("malformed reply: {0}")]
    MalformedReply(String),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("key store error: {0}")]
    KeyStore(#[from] KeyStoreError),

    #[error("codec error: {0}")]
    Types(#[from] TypesError),
}

impl From<PrimitivesError> for ChainError {
    fn from(e: PrimitivesError) -> Self {
        ChainError::Types(TypesError::Primitives(e))
    }
}
