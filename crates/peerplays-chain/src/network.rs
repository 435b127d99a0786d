//! Known PeerPlays networks and the parameters derived from a chain id.

use peerplays_primitives::PublicKey;
use tracing::debug;

use crate::api::ChainProperties;
use crate::error::ChainError;

/// A network whose prefix and core symbol are fixed by its chain id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownChain {
    pub name: &'static str,
    pub chain_id: &'static str,
    pub core_symbol: &'static str,
    pub prefix: &'static str,
}

/// PeerPlays mainnet.
pub const ALICE: KnownChain = KnownChain {
    name: "ALICE",
    chain_id: "6b6b5f0ce7a36d323768e534f3edb41c6d6332a541a95725b98e28d140850134",
    core_symbol: "PPY",
    prefix: "PPY",
};

/// Public testnet.
pub const BEATRICE: KnownChain = KnownChain {
    name: "BEATRICE",
    chain_id: "b3f7fe1e5ad0d2deca40a626a4404524f78e65c3a48137551c33ea4e7c365672",
    core_symbol: "BTF",
    prefix: "TEST",
};

pub const KNOWN_CHAINS: &[KnownChain] = &[ALICE, BEATRICE];

pub fn known_chain(chain_id: &str) -> Option<&'static KnownChain> {
    KNOWN_CHAINS.iter().find(|c| c.chain_id == chain_id)
}

/// Parameters of the chain a session talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainParams {
    pub chain_id: String,
    pub core_symbol: String,
    pub prefix: String,
}

impl ChainParams {
    /// Select parameters for the chain the node reports.
    ///
    /// The network table wins; otherwise the node must report both prefix and
    /// core symbol itself.
    pub fn resolve(props: &ChainProperties) -> Result<Self, ChainError> {
        if let Some(known) = known_chain(&props.chain_id) {
            debug!(network = known.name, "recognized chain id");
            return Ok(ChainParams::from(known));
        }
        match (&props.prefix, &props.core_symbol) {
            (Some(prefix), Some(core_symbol)) => Ok(ChainParams {
                chain_id: props.chain_id.clone(),
                core_symbol: core_symbol.clone(),
                prefix: prefix.clone(),
            }),
            _ => Err(ChainError::UnknownChain(props.chain_id.clone())),
        }
    }

    /// Raw chain id bytes, the prefix of every signing digest.
    pub fn chain_id_bytes(&self) -> Result<[u8; 32], ChainError> {
        let bytes = hex::decode(&self.chain_id)
            .map_err(|e| ChainError::MalformedReply(format!("chain id {}: {}", self.chain_id, e)))?;
        <[u8; 32]>::try_from(bytes.as_slice())
            .map_err(|_| ChainError::MalformedReply(format!("chain id {} is not 32 bytes", self.chain_id)))
    }

    /// Re-render `key` with this chain's prefix.
    pub fn format_key(&self, key: &PublicKey) -> String {
        key.clone().with_prefix(&self.prefix).to_string()
    }
}

impl From<&KnownChain> for ChainParams {
    fn from(known: &KnownChain) -> Self {
        ChainParams {
            chain_id: known.chain_id.to_string(),
            core_symbol: known.core_symbol.to_string(),
            prefix: known.prefix.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_chain_wins_over_reported_prefix() {
        let props = ChainProperties {
            chain_id: BEATRICE.chain_id.to_string(),
            prefix: Some("XYZ".to_string()),
            core_symbol: None,
        };
        let params = ChainParams::resolve(&props).unwrap();
        assert_eq!(params.prefix, "TEST");
        assert_eq!(params.core_symbol, "BTF");
        assert_eq!(params.chain_id_bytes().unwrap()[0], 0xb3);
    }

    #[test]
    fn test_unknown_chain() {
        let mut props = ChainProperties {
            chain_id: "00".repeat(32),
            prefix: None,
            core_symbol: None,
        };
        assert!(matches!(
            ChainParams::resolve(&props),
            Err(ChainError::UnknownChain(_))
        ));
        props.prefix = Some("LOCAL".to_string());
        props.core_symbol = Some("LCL".to_string());
        assert_eq!(ChainParams::resolve(&props).unwrap().prefix, "LOCAL");
    }

    #[test]
    fn test_bad_chain_id_bytes() {
        let params = ChainParams {
            chain_id: "abcd".to_string(),
            core_symbol: "PPY".to_string(),
            prefix: "PPY".to_string(),
        };
        assert!(params.chain_id_bytes().is_err());
    }
}
