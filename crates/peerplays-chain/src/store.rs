//! Read-through access to chain objects.

use std::sync::Arc;
use std::time::Duration;

use peerplays_operations::AuthorityLevel;
use peerplays_primitives::PublicKey;
use peerplays_types::object_id::{tag, Id, ObjectId};
use peerplays_types::{JsonField, Permission};
use serde_json::Value;
use tracing::debug;

use crate::api::ChainApi;
use crate::cache::ObjectCache;
use crate::error::ChainError;

// Secondary keys for name and symbol lookups share the id keyspace.
fn name_key(name: &str) -> String {
    format!("account:{}", name)
}

fn symbol_key(symbol: &str) -> String {
    format!("asset:{}", symbol)
}

/// A chain API handle paired with the session's object cache.
///
/// Cloning is cheap and clones share the cache.
#[derive(Clone)]
pub struct ObjectStore {
    api: Arc<dyn ChainApi>,
    cache: Arc<ObjectCache>,
}

impl ObjectStore {
    pub fn new(api: Arc<dyn ChainApi>) -> Self {
        Self {
            api,
            cache: Arc::new(ObjectCache::default()),
        }
    }

    pub fn with_expiration(api: Arc<dyn ChainApi>, expiration: Duration) -> Self {
        Self {
            api,
            cache: Arc::new(ObjectCache::new(expiration)),
        }
    }

    pub fn api(&self) -> &Arc<dyn ChainApi> {
        &self.api
    }

    pub fn cache(&self) -> &ObjectCache {
        &self.cache
    }

    /// Insert into the cache, first dropping entries that have expired.
    fn cache_insert(&self, key: impl Into<String>, object: Value) {
        let purged = self.cache.purge_expired();
        if purged > 0 {
            debug!(purged, "dropped expired cache entries");
        }
        self.cache.insert(key, object);
    }

    fn remember(&self, object: &Value) {
        if let Some(id) = object.get("id").and_then(Value::as_str) {
            self.cache_insert(id, object.clone());
        }
    }

    /// Fetch an object, serving it from cache while fresh.
    pub fn get_object(&self, id: &ObjectId) -> Result<Option<Value>, ChainError> {
        let key = id.to_string();
        if let Some(hit) = self.cache.get(&key) {
            return Ok(Some(hit));
        }
        debug!(id = %key, "cache miss, fetching object");
        let fetched = self.api.get_object(id)?;
        if let Some(object) = &fetched {
            self.cache_insert(key, object.clone());
        }
        Ok(fetched)
    }

    /// Fetch several objects in one round trip for the cache misses.
    pub fn get_objects(&self, ids: &[ObjectId]) -> Result<Vec<Option<Value>>, ChainError> {
        let mut out: Vec<Option<Value>> = ids.iter().map(|id| self.cache.get(&id.to_string())).collect();
        let missing: Vec<(usize, ObjectId)> = out
            .iter()
            .zip(ids)
            .enumerate()
            .filter(|(_, (hit, _))| hit.is_none())
            .map(|(i, (_, id))| (i, *id))
            .collect();
        if missing.is_empty() {
            return Ok(out);
        }
        debug!(count = missing.len(), "fetching uncached objects");
        let wanted: Vec<ObjectId> = missing.iter().map(|(_, id)| *id).collect();
        let fetched = self.api.get_objects(&wanted)?;
        if fetched.len() != wanted.len() {
            return Err(ChainError::MalformedReply(format!(
                "asked for {} objects, got {}",
                wanted.len(),
                fetched.len()
            )));
        }
        for ((slot, id), object) in missing.into_iter().zip(fetched) {
            if let Some(object) = &object {
                self.cache_insert(id.to_string(), object.clone());
            }
            out[slot] = object;
        }
        Ok(out)
    }

    /// Drop the cached copy and fetch again.
    pub fn refresh(&self, id: &ObjectId) -> Result<Option<Value>, ChainError> {
        self.cache.remove(&id.to_string());
        self.get_object(id)
    }

    pub fn get_account_by_name(&self, name: &str) -> Result<Option<Value>, ChainError> {
        let key = name_key(name);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(Some(hit));
        }
        debug!(name, "cache miss, fetching account by name");
        let fetched = self.api.get_account_by_name(name)?;
        if let Some(account) = &fetched {
            self.cache_insert(key, account.clone());
            self.remember(account);
        }
        Ok(fetched)
    }

    pub fn lookup_asset_symbol(&self, symbol: &str) -> Result<Option<Value>, ChainError> {
        let key = symbol_key(symbol);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(Some(hit));
        }
        debug!(symbol, "cache miss, looking up asset symbol");
        let fetched = self.api.lookup_asset_symbol(symbol)?;
        if let Some(asset) = &fetched {
            self.cache_insert(key, asset.clone());
            self.remember(asset);
        }
        Ok(fetched)
    }

    /// Resolve an account by `1.2.x` id or by name.
    pub fn account(&self, name_or_id: &str) -> Result<Value, ChainError> {
        let found = match name_or_id.parse::<Id<tag::Account>>() {
            Ok(id) => self.get_object(&id.object_id())?,
            Err(_) if name_or_id.parse::<ObjectId>().is_ok() => {
                return Err(ChainError::WrongObjectType {
                    id: name_or_id.to_string(),
                    expected: "account",
                })
            }
            Err(_) => self.get_account_by_name(name_or_id)?,
        };
        found.ok_or_else(|| ChainError::AccountDoesNotExist(name_or_id.to_string()))
    }

    /// Resolve an asset by `1.3.x` id or by symbol.
    pub fn asset(&self, symbol_or_id: &str) -> Result<Value, ChainError> {
        let found = match symbol_or_id.parse::<Id<tag::Asset>>() {
            Ok(id) => self.get_object(&id.object_id())?,
            Err(_) if symbol_or_id.parse::<ObjectId>().is_ok() => {
                return Err(ChainError::WrongObjectType {
                    id: symbol_or_id.to_string(),
                    expected: "asset",
                })
            }
            Err(_) => self.lookup_asset_symbol(symbol_or_id)?,
        };
        found.ok_or_else(|| ChainError::AssetDoesNotExist(symbol_or_id.to_string()))
    }

    pub fn account_id(&self, name_or_id: &str) -> Result<Id<tag::Account>, ChainError> {
        object_id_of(&self.account(name_or_id)?)
    }

    pub fn asset_id(&self, symbol_or_id: &str) -> Result<Id<tag::Asset>, ChainError> {
        object_id_of(&self.asset(symbol_or_id)?)
    }

    /// The live authority of `account` at `level`.
    pub fn authority(
        &self,
        account: Id<tag::Account>,
        level: AuthorityLevel,
    ) -> Result<Permission, ChainError> {
        let object = self
            .get_object(&account.object_id())?
            .ok_or_else(|| ChainError::AccountDoesNotExist(account.to_string()))?;
        let raw = object.get(level.as_str()).ok_or_else(|| {
            ChainError::MalformedReply(format!("account {} has no {} authority", account, level))
        })?;
        Ok(Permission::from_json(raw)?)
    }

    pub fn memo_key(&self, account: Id<tag::Account>) -> Result<PublicKey, ChainError> {
        let object = self
            .get_object(&account.object_id())?
            .ok_or_else(|| ChainError::AccountDoesNotExist(account.to_string()))?;
        let raw = object
            .get("options")
            .and_then(|o| o.get("memo_key"))
            .ok_or_else(|| ChainError::MalformedReply(format!("account {} has no memo key", account)))?;
        Ok(PublicKey::from_json(raw)?)
    }
}

/// Typed id of a fetched object, from its `id` field.
pub fn object_id_of<T: peerplays_types::ObjectTypeTag>(object: &Value) -> Result<Id<T>, ChainError> {
    let raw = object
        .get("id")
        .ok_or_else(|| ChainError::MalformedReply(format!("object without id: {}", object)))?;
    Ok(Id::from_json(raw)?)
}
