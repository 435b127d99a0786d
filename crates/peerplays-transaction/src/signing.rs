//! Resolving required authorities to private keys.

use std::sync::Arc;

use peerplays_chain::{KeyStore, ObjectStore};
use peerplays_operations::{AuthorityLevel, RequiredAuthority};
use peerplays_primitives::{PrivateKey, PublicKey};
use peerplays_types::Permission;
use tracing::debug;

use crate::TransactionError;

/// How many levels of account authorities are followed.
pub const MAX_AUTHORITY_DEPTH: usize = 2;

/// Finds keys satisfying account authorities.
///
/// Authorities are read live from the chain through the object store; keys
/// come from the key store.
#[derive(Clone)]
pub struct SigningEngine {
    store: ObjectStore,
    keystore: Arc<dyn KeyStore>,
}

#[derive(Default)]
struct Collected {
    weight: u64,
    keys: Vec<PrivateKey>,
}

impl Collected {
    fn add_key(&mut self, key: PrivateKey) {
        if !self.keys.iter().any(|k| k.pub_key() == key.pub_key()) {
            self.keys.push(key);
        }
    }
}

impl SigningEngine {
    pub fn new(store: ObjectStore, keystore: Arc<dyn KeyStore>) -> Self {
        Self { store, keystore }
    }

    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    pub fn keystore(&self) -> &Arc<dyn KeyStore> {
        &self.keystore
    }

    /// Keys that together satisfy every required authority.
    ///
    /// # Arguments
    /// * `required` - Deduplicated `(account, level)` requirements.
    /// * `extra` - Keys supplied directly by the caller. They are consulted
    ///   before the key store and are always part of the result.
    ///
    /// # Returns
    /// Distinct keys in discovery order, `MissingKey` when an authority has
    /// no available key at all, or `InsufficientAuthority` when the available
    /// weight stays below its threshold.
    pub fn resolve_keys(
        &self,
        required: &[RequiredAuthority],
        extra: &[PrivateKey],
    ) -> Result<Vec<PrivateKey>, TransactionError> {
        let mut all = Collected::default();
        for key in extra {
            all.add_key(key.clone());
        }
        for requirement in required {
            let authority = self.store.authority(requirement.account, requirement.level)?;
            let collected = self.satisfy(&authority, extra, 0)?;
            let threshold = authority.weight_threshold();
            if collected.weight == 0 {
                return Err(TransactionError::MissingKey {
                    account: requirement.account.to_string(),
                    level: requirement.level,
                });
            }
            if collected.weight < u64::from(threshold) {
                return Err(TransactionError::InsufficientAuthority {
                    account: requirement.account.to_string(),
                    level: requirement.level,
                    weight: collected.weight,
                    threshold,
                });
            }
            debug!(
                authority = %requirement,
                keys = collected.keys.len(),
                weight = collected.weight,
                "authority satisfied"
            );
            for key in collected.keys {
                all.add_key(key);
            }
        }
        Ok(all.keys)
    }

    fn find_key(&self, public: &PublicKey, extra: &[PrivateKey]) -> Result<Option<PrivateKey>, TransactionError> {
        if let Some(key) = extra.iter().find(|k| k.pub_key() == *public) {
            return Ok(Some(key.clone()));
        }
        Ok(self.keystore.get_private_key_for_public_key(public)?)
    }

    /// Collect weight from direct keys, then from nested accounts' active
    /// authorities, stopping as soon as the threshold is met.
    fn satisfy(
        &self,
        authority: &Permission,
        extra: &[PrivateKey],
        depth: usize,
    ) -> Result<Collected, TransactionError> {
        let threshold = u64::from(authority.weight_threshold());
        let mut collected = Collected::default();
        for (public, weight) in authority.key_auths() {
            if collected.weight >= threshold {
                return Ok(collected);
            }
            if let Some(key) = self.find_key(public, extra)? {
                collected.weight += u64::from(*weight);
                collected.add_key(key);
            }
        }
        if depth >= MAX_AUTHORITY_DEPTH {
            return Ok(collected);
        }
        for (account, weight) in authority.account_auths() {
            if collected.weight >= threshold {
                break;
            }
            let nested = self.store.authority(*account, AuthorityLevel::Active)?;
            let sub = self.satisfy(&nested, extra, depth + 1)?;
            if sub.weight >= u64::from(nested.weight_threshold()) {
                collected.weight += u64::from(*weight);
                for key in sub.keys {
                    collected.add_key(key);
                }
            }
        }
        Ok(collected)
    }
}
