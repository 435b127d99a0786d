//! Client session configuration.

use peerplays_chain::cache::DEFAULT_EXPIRATION_SECS;
use peerplays_transaction::BuilderConfig;
use serde::Deserialize;

/// Settings for a [`Client`](crate::Client).
///
/// Every field has a default, so a host application can deserialize a
/// partial document from any serde format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Expiration and proposal defaults for new transactions.
    pub builder: BuilderConfig,
    /// Seconds a fetched chain object stays fresh in the cache.
    pub cache_expiration_secs: u64,
    /// Fee asset symbol or id; the core asset when unset.
    pub fee_asset: Option<String>,
    /// Account used when a helper is not given one.
    pub default_account: Option<String>,
    /// Build and sign but never hand the transaction to the node.
    pub nobroadcast: bool,
    /// Skip signing.
    pub unsigned: bool,
    /// Refuse to connect to any other chain.
    pub chain_id: Option<String>,
    /// Public-key prefix override.
    pub prefix: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            builder: BuilderConfig::default(),
            cache_expiration_secs: DEFAULT_EXPIRATION_SECS,
            fee_asset: None,
            default_account: None,
            nobroadcast: false,
            unsigned: false,
            chain_id: None,
            prefix: None,
        }
    }
}
