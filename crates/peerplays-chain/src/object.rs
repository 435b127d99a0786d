//! Typed handles on chain objects with eager or lazy loading.

use std::fmt;
use std::sync::OnceLock;

use peerplays_types::object_id::{tag, Id, ObjectId, ObjectTypeTag};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ChainError;
use crate::store::ObjectStore;

/// An object type that can be fetched and existence-checked.
pub trait ObjectKind: ObjectTypeTag {
    /// Human-readable type name used in errors.
    const NAME: &'static str;

    /// The "does not exist" error for this type.
    fn does_not_exist(identifier: String) -> ChainError;

    /// Resolve a non-id identifier (name, symbol). Most types have none.
    fn lookup_by_name(_store: &ObjectStore, _name: &str) -> Result<Option<Value>, ChainError> {
        Ok(None)
    }
}

macro_rules! object_kinds {
    ($($tag:ident => $name:literal, $err:ident;)*) => {$(
        impl ObjectKind for tag::$tag {
            const NAME: &'static str = $name;

            fn does_not_exist(identifier: String) -> ChainError {
                ChainError::$err(identifier)
            }
        }
    )*};
}

object_kinds! {
    Proposal => "proposal", ProposalDoesNotExist;
    Witness => "witness", WitnessDoesNotExist;
    Tournament => "tournament", TournamentDoesNotExist;
    Sport => "sport", SportDoesNotExist;
    EventGroup => "event group", EventGroupDoesNotExist;
    Event => "event", EventDoesNotExist;
    BettingMarketRules => "betting market rule", RuleDoesNotExist;
    BettingMarketGroup => "betting market group", BettingMarketGroupDoesNotExist;
    BettingMarket => "betting market", BettingMarketDoesNotExist;
    Bet => "bet", BetDoesNotExist;
}

impl ObjectKind for tag::Account {
    const NAME: &'static str = "account";

    fn does_not_exist(identifier: String) -> ChainError {
        ChainError::AccountDoesNotExist(identifier)
    }

    fn lookup_by_name(store: &ObjectStore, name: &str) -> Result<Option<Value>, ChainError> {
        store.get_account_by_name(name)
    }
}

impl ObjectKind for tag::Asset {
    const NAME: &'static str = "asset";

    fn does_not_exist(identifier: String) -> ChainError {
        ChainError::AssetDoesNotExist(identifier)
    }

    fn lookup_by_name(store: &ObjectStore, symbol: &str) -> Result<Option<Value>, ChainError> {
        store.lookup_asset_symbol(symbol)
    }
}

/// Betting market rules (`1.23.x`).
pub type Rule = tag::BettingMarketRules;

/// Parse `identifier` as an id of kind `K`, `None` if it is not an id at all.
fn parse_id<K: ObjectKind>(identifier: &str) -> Result<Option<Id<K>>, ChainError> {
    match identifier.parse::<ObjectId>() {
        Ok(raw) => Id::<K>::try_from(raw)
            .map(Some)
            .map_err(|_| ChainError::WrongObjectType {
                id: identifier.to_string(),
                expected: K::NAME,
            }),
        Err(_) => Ok(None),
    }
}

fn into_fields(object: Value, identifier: &str) -> Result<Map<String, Value>, ChainError> {
    match object {
        Value::Object(map) => Ok(map),
        other => Err(ChainError::MalformedReply(format!(
            "{} is not an object: {}",
            identifier, other
        ))),
    }
}

/// A chain object of kind `K`.
///
/// Eager handles ([`fetch`](Self::fetch)) load and existence-check at
/// construction. Lazy handles ([`lazy`](Self::lazy)) only validate the id and
/// hit the network on first field access.
pub struct BlockchainObject<K: ObjectKind> {
    id: Id<K>,
    store: ObjectStore,
    fields: OnceLock<Map<String, Value>>,
}

impl<K: ObjectKind> BlockchainObject<K> {
    /// Load the object now.
    ///
    /// # Arguments
    /// * `store` - The session's object store.
    /// * `identifier` - An object id, or a name/symbol for accounts and assets.
    ///
    /// # Returns
    /// The loaded object, `WrongObjectType` for an id of another type, or the
    /// type's "does not exist" error.
    pub fn fetch(store: &ObjectStore, identifier: &str) -> Result<Self, ChainError> {
        let object = match parse_id::<K>(identifier)? {
            Some(id) => store.get_object(&id.object_id())?,
            None => K::lookup_by_name(store, identifier)?,
        }
        .ok_or_else(|| K::does_not_exist(identifier.to_string()))?;
        let id = crate::store::object_id_of::<K>(&object)?;
        let fields = OnceLock::new();
        let _ = fields.set(into_fields(object, identifier)?);
        Ok(Self {
            id,
            store: store.clone(),
            fields,
        })
    }

    /// A handle that defers the fetch until first access.
    ///
    /// Names cannot be resolved without a fetch, so only ids are accepted.
    pub fn lazy(store: &ObjectStore, identifier: &str) -> Result<Self, ChainError> {
        let id = parse_id::<K>(identifier)?.ok_or_else(|| ChainError::WrongObjectType {
            id: identifier.to_string(),
            expected: K::NAME,
        })?;
        Ok(Self {
            id,
            store: store.clone(),
            fields: OnceLock::new(),
        })
    }

    /// Whether an object of kind `K` exists under `identifier`.
    pub fn exists(store: &ObjectStore, identifier: &str) -> Result<bool, ChainError> {
        let found = match parse_id::<K>(identifier)? {
            Some(id) => store.get_object(&id.object_id())?,
            None => K::lookup_by_name(store, identifier)?,
        };
        Ok(found.is_some())
    }

    pub fn id(&self) -> Id<K> {
        self.id
    }

    pub fn is_loaded(&self) -> bool {
        self.fields.get().is_some()
    }

    /// All fields, fetching them on first call.
    pub fn fields(&self) -> Result<&Map<String, Value>, ChainError> {
        if let Some(fields) = self.fields.get() {
            return Ok(fields);
        }
        debug!(id = %self.id, kind = K::NAME, "loading lazy object");
        let object = self
            .store
            .get_object(&self.id.object_id())?
            .ok_or_else(|| K::does_not_exist(self.id.to_string()))?;
        let _ = self.fields.set(into_fields(object, &self.id.to_string())?);
        self.fields
            .get()
            .ok_or_else(|| ChainError::MalformedReply(format!("{} failed to load", self.id)))
    }

    pub fn get(&self, field: &str) -> Result<Option<&Value>, ChainError> {
        Ok(self.fields()?.get(field))
    }

    /// Discard loaded fields and fetch a fresh copy.
    pub fn refresh(&mut self) -> Result<(), ChainError> {
        let object = self
            .store
            .refresh(&self.id.object_id())?
            .ok_or_else(|| K::does_not_exist(self.id.to_string()))?;
        self.fields = OnceLock::new();
        let _ = self.fields.set(into_fields(object, &self.id.to_string())?);
        Ok(())
    }
}

impl<K: ObjectKind> fmt::Debug for BlockchainObject<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockchainObject")
            .field("kind", &K::NAME)
            .field("id", &self.id.to_string())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
