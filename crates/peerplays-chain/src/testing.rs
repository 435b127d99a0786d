//! An in-memory [`ChainApi`] for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::{Mutex, RwLock};
use peerplays_primitives::PublicKey;
use peerplays_types::ObjectId;
use serde_json::{json, Value};

use crate::api::{ChainApi, ChainProperties, DynamicGlobalProperties};
use crate::error::RpcError;
use crate::network::{KnownChain, ALICE};
use crate::rpc_error::classify_rpc_error;

const PROPOSAL_CREATE: u64 = 22;

/// A fake node holding objects in maps.
///
/// Fees are flat per operation. Broadcasts are recorded; the next one can be
/// made to fail with a node error message.
pub struct MockChain {
    chain: KnownChain,
    objects: RwLock<HashMap<String, Value>>,
    accounts_by_name: RwLock<HashMap<String, String>>,
    assets_by_symbol: RwLock<HashMap<String, String>>,
    head: RwLock<(u32, String, String)>,
    fee: RwLock<i64>,
    broadcasts: Mutex<Vec<Value>>,
    next_failure: Mutex<Option<String>>,
    object_fetches: AtomicUsize,
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChain {
    /// A mainnet-flavoured mock.
    pub fn new() -> Self {
        Self::for_chain(ALICE)
    }

    pub fn for_chain(chain: KnownChain) -> Self {
        Self {
            chain,
            objects: RwLock::new(HashMap::new()),
            accounts_by_name: RwLock::new(HashMap::new()),
            assets_by_symbol: RwLock::new(HashMap::new()),
            head: RwLock::new((
                34294,
                "000085f685abf4dc000000000000000000000000".to_string(),
                "2016-04-06T08:29:00".to_string(),
            )),
            fee: RwLock::new(0),
            broadcasts: Mutex::new(Vec::new()),
            next_failure: Mutex::new(None),
            object_fetches: AtomicUsize::new(0),
        }
    }

    /// Store an object under its `id` field, replacing any previous copy.
    pub fn insert_object(&self, object: Value) {
        if let Some(id) = object.get("id").and_then(Value::as_str) {
            self.objects.write().insert(id.to_string(), object);
        }
    }

    /// An account whose owner, active and memo keys are all `key`.
    pub fn add_account(&self, instance: u64, name: &str, key: &PublicKey) {
        let key = key.clone().with_prefix(self.chain.prefix).to_string();
        let authority = json!({
            "weight_threshold": 1,
            "account_auths": [],
            "key_auths": [[key, 1]],
            "address_auths": []
        });
        self.add_account_with(instance, name, authority.clone(), authority, &key);
    }

    /// An account with explicit authorities.
    pub fn add_account_with(&self, instance: u64, name: &str, owner: Value, active: Value, memo_key: &str) {
        let id = format!("1.2.{}", instance);
        self.insert_object(json!({
            "id": id,
            "name": name,
            "owner": owner,
            "active": active,
            "options": {
                "memo_key": memo_key,
                "voting_account": "1.2.5",
                "num_witness": 0,
                "num_committee": 0,
                "votes": [],
                "extensions": []
            }
        }));
        self.accounts_by_name.write().insert(name.to_string(), id);
    }

    pub fn add_asset(&self, instance: u64, symbol: &str, precision: u8) {
        let id = format!("1.3.{}", instance);
        self.insert_object(json!({"id": id, "symbol": symbol, "precision": precision}));
        self.assets_by_symbol.write().insert(symbol.to_string(), id);
    }

    pub fn set_head_block(&self, number: u32, id: &str, time: &str) {
        *self.head.write() = (number, id.to_string(), time.to_string());
    }

    /// Flat fee charged for every operation.
    pub fn set_fee(&self, amount: i64) {
        *self.fee.write() = amount;
    }

    /// Make the next broadcast fail with the given node message.
    pub fn fail_next_broadcast(&self, message: &str) {
        *self.next_failure.lock() = Some(message.to_string());
    }

    pub fn broadcasts(&self) -> Vec<Value> {
        self.broadcasts.lock().clone()
    }

    /// Number of `get_object` round trips served so far.
    pub fn object_fetches(&self) -> usize {
        self.object_fetches.load(Ordering::SeqCst)
    }

    fn fee_for(&self, op: &Value, asset_id: &str) -> Value {
        let fee = json!({"amount": *self.fee.read(), "asset_id": asset_id});
        if op.get(0).and_then(Value::as_u64) != Some(PROPOSAL_CREATE) {
            return fee;
        }
        let inner: Vec<Value> = op[1]["proposed_ops"]
            .as_array()
            .map(|ops| ops.iter().map(|w| self.fee_for(&w["op"], asset_id)).collect())
            .unwrap_or_default();
        json!([fee, inner])
    }
}

impl ChainApi for MockChain {
    fn get_object(&self, id: &ObjectId) -> Result<Option<Value>, RpcError> {
        self.object_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.objects.read().get(&id.to_string()).cloned())
    }

    fn get_account_by_name(&self, name: &str) -> Result<Option<Value>, RpcError> {
        let id = self.accounts_by_name.read().get(name).cloned();
        Ok(id.and_then(|id| self.objects.read().get(&id).cloned()))
    }

    fn lookup_asset_symbol(&self, symbol: &str) -> Result<Option<Value>, RpcError> {
        let id = self.assets_by_symbol.read().get(symbol).cloned();
        Ok(id.and_then(|id| self.objects.read().get(&id).cloned()))
    }

    fn get_chain_properties(&self) -> Result<ChainProperties, RpcError> {
        Ok(ChainProperties {
            chain_id: self.chain.chain_id.to_string(),
            prefix: Some(self.chain.prefix.to_string()),
            core_symbol: Some(self.chain.core_symbol.to_string()),
        })
    }

    fn get_dynamic_global_properties(&self) -> Result<DynamicGlobalProperties, RpcError> {
        let head = self.head.read();
        Ok(DynamicGlobalProperties {
            head_block_number: head.0,
            head_block_id: head.1.clone(),
            time: head.2.clone(),
        })
    }

    fn get_required_fees(&self, operations: &[Value], asset_id: &ObjectId) -> Result<Vec<Value>, RpcError> {
        let asset = asset_id.to_string();
        Ok(operations.iter().map(|op| self.fee_for(op, &asset)).collect())
    }

    fn broadcast_transaction(&self, transaction: &Value) -> Result<Value, RpcError> {
        if let Some(message) = self.next_failure.lock().take() {
            return Err(classify_rpc_error(&message));
        }
        self.broadcasts.lock().push(transaction.clone());
        Ok(json!({"accepted": true}))
    }

    fn get_transaction_hex(&self, _transaction: &Value) -> Result<String, RpcError> {
        Err(RpcError::NoMethodWithName("get_transaction_hex".to_string()))
    }
}
