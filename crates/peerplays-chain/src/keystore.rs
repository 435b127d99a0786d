//! Private-key lookup for signing.
//!
//! Wallet files and their encryption are out of scope; [`InMemoryKeyStore`]
//! is enough for scripts, tests and as a reference for real stores.

use std::collections::HashMap;

use parking_lot::RwLock;
use peerplays_primitives::hash::sha256;
use peerplays_primitives::{PrivateKey, PublicKey};
use tracing::debug;

use crate::error::KeyStoreError;

/// A source of private keys, looked up by public key.
pub trait KeyStore: Send + Sync {
    /// The private key for `public_key`, `None` when the store lacks it.
    fn get_private_key_for_public_key(
        &self,
        public_key: &PublicKey,
    ) -> Result<Option<PrivateKey>, KeyStoreError>;

    fn unlock(&self, passphrase: &str) -> Result<(), KeyStoreError>;

    fn lock(&self);

    fn is_locked(&self) -> bool;

    /// Import a WIF key, returning its public key.
    fn add_private_key(&self, wif: &str) -> Result<PublicKey, KeyStoreError>;
}

/// Keys held in process memory, optionally behind a passphrase.
#[derive(Default)]
pub struct InMemoryKeyStore {
    keys: RwLock<HashMap<[u8; 33], PrivateKey>>,
    passphrase_hash: Option<[u8; 32]>,
    locked: RwLock<bool>,
}

impl InMemoryKeyStore {
    /// An always-unlocked store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts locked and opens with `passphrase`.
    pub fn with_passphrase(passphrase: &str) -> Self {
        Self {
            keys: RwLock::new(HashMap::new()),
            passphrase_hash: Some(sha256(passphrase.as_bytes())),
            locked: RwLock::new(true),
        }
    }

    /// Build an unlocked store from WIF strings.
    pub fn from_wifs<'a>(wifs: impl IntoIterator<Item = &'a str>) -> Result<Self, KeyStoreError> {
        let store = Self::new();
        for wif in wifs {
            store.add_private_key(wif)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.keys.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.read().is_empty()
    }

    pub fn public_keys(&self) -> Vec<PublicKey> {
        self.keys.read().values().map(PrivateKey::pub_key).collect()
    }
}

impl KeyStore for InMemoryKeyStore {
    fn get_private_key_for_public_key(
        &self,
        public_key: &PublicKey,
    ) -> Result<Option<PrivateKey>, KeyStoreError> {
        if self.is_locked() {
            return Err(KeyStoreError::Locked);
        }
        Ok(self.keys.read().get(&public_key.to_compressed()).cloned())
    }

    fn unlock(&self, passphrase: &str) -> Result<(), KeyStoreError> {
        if let Some(expected) = self.passphrase_hash {
            if sha256(passphrase.as_bytes()) != expected {
                return Err(KeyStoreError::WrongPassphrase);
            }
        }
        *self.locked.write() = false;
        Ok(())
    }

    fn lock(&self) {
        if self.passphrase_hash.is_some() {
            *self.locked.write() = true;
        }
    }

    fn is_locked(&self) -> bool {
        *self.locked.read()
    }

    fn add_private_key(&self, wif: &str) -> Result<PublicKey, KeyStoreError> {
        if self.is_locked() {
            return Err(KeyStoreError::Locked);
        }
        let key = PrivateKey::from_wif(wif)?;
        let public = key.pub_key();
        debug!(public_key = %public, "imported private key");
        self.keys.write().insert(public.to_compressed(), key);
        Ok(public)
    }
}
