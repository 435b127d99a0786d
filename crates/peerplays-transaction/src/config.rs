//! Builder configuration.

use serde::Deserialize;

/// Default transaction lifetime in seconds.
pub const DEFAULT_EXPIRATION_SECS: u32 = 30;

/// Default proposal lifetime: two days.
pub const DEFAULT_PROPOSAL_EXPIRATION_SECS: u32 = 2 * 24 * 60 * 60;

/// Settings applied by [`TransactionBuilder`](crate::TransactionBuilder) and
/// new proposals.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Seconds between the head block time and transaction expiration.
    pub expiration_secs: u32,
    /// Lifetime of new proposals, counted from the transaction's expiration.
    pub proposal_expiration_secs: u32,
    /// Review period for new proposals, if any.
    pub proposal_review_secs: Option<u32>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            expiration_secs: DEFAULT_EXPIRATION_SECS,
            proposal_expiration_secs: DEFAULT_PROPOSAL_EXPIRATION_SECS,
            proposal_review_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: BuilderConfig =
            serde_json::from_str(r#"{"proposal_review_secs": 3600}"#).unwrap();
        assert_eq!(config.expiration_secs, DEFAULT_EXPIRATION_SECS);
        assert_eq!(config.proposal_expiration_secs, 172_800);
        assert_eq!(config.proposal_review_secs, Some(3600));
    }
}
