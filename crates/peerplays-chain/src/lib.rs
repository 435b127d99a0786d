/// PeerPlays SDK - Chain collaborators and the chain-object cache.
///
/// The node and the wallet are external: this crate defines the
/// [`ChainApi`] and [`KeyStore`] interfaces they implement, the table of
/// known networks, the categorization of node error messages, and the
/// expiring [`ObjectCache`] behind typed [`BlockchainObject`] handles.

pub mod api;
pub mod cache;
pub mod keystore;
pub mod network;
pub mod object;
pub mod rpc_error;
pub mod store;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

mod error;
pub use error::{ChainError, KeyStoreError, RpcError};

pub use api::{ChainApi, ChainProperties, DynamicGlobalProperties};
pub use cache::ObjectCache;
pub use keystore::{InMemoryKeyStore, KeyStore};
pub use network::{known_chain, ChainParams, KnownChain, ALICE, BEATRICE, KNOWN_CHAINS};
pub use object::{BlockchainObject, ObjectKind, Rule};
pub use rpc_error::classify_rpc_error;
pub use store::ObjectStore;
