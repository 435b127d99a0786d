//! The node RPC surface this SDK consumes.
//!
//! Transports (HTTP, WebSocket) live outside this workspace and implement
//! [`ChainApi`]. Objects travel as raw JSON; typing happens at the call site.

use peerplays_types::{ObjectId, PointInTime};
use serde::Deserialize;
use serde_json::Value;

use crate::error::RpcError;

/// Reply of `get_chain_properties`, reduced to what the SDK needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChainProperties {
    pub chain_id: String,
    /// Public-key prefix, when the node reports one.
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub core_symbol: Option<String>,
}

/// Reply of `get_dynamic_global_properties`, reduced to the head-block fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DynamicGlobalProperties {
    #[serde(alias = "head_block_num")]
    pub head_block_number: u32,
    pub head_block_id: String,
    /// Head block time, `YYYY-MM-DDTHH:MM:SS`.
    pub time: String,
}

impl DynamicGlobalProperties {
    pub fn head_block_time(&self) -> Result<PointInTime, peerplays_types::TypesError> {
        self.time.parse()
    }
}

/// Blocking access to a node.
///
/// Every method is a single round trip; retries and timeouts belong to the
/// implementor. Node-side failures should be mapped through
/// [`classify_rpc_error`](crate::rpc_error::classify_rpc_error).
pub trait ChainApi: Send + Sync {
    /// Fetch one object, `None` when it does not exist.
    fn get_object(&self, id: &ObjectId) -> Result<Option<Value>, RpcError>;

    /// Fetch several objects; the reply is positionally aligned with `ids`.
    fn get_objects(&self, ids: &[ObjectId]) -> Result<Vec<Option<Value>>, RpcError> {
        ids.iter().map(|id| self.get_object(id)).collect()
    }

    fn get_account_by_name(&self, name: &str) -> Result<Option<Value>, RpcError>;

    fn lookup_asset_symbol(&self, symbol: &str) -> Result<Option<Value>, RpcError>;

    fn get_chain_properties(&self) -> Result<ChainProperties, RpcError>;

    fn get_dynamic_global_properties(&self) -> Result<DynamicGlobalProperties, RpcError>;

    /// Fees for each operation (`[id, {..}]` JSON) paid in `asset_id`.
    ///
    /// # Returns
    /// One entry per operation: an asset amount object, or for
    /// `proposal_create` a pair `[fee, [inner fees..]]`.
    fn get_required_fees(&self, operations: &[Value], asset_id: &ObjectId)
        -> Result<Vec<Value>, RpcError>;

    /// Submit a signed transaction in wire JSON form.
    fn broadcast_transaction(&self, transaction: &Value) -> Result<Value, RpcError>;

    /// The node's own serialization of `transaction`, as hex.
    fn get_transaction_hex(&self, transaction: &Value) -> Result<String, RpcError>;
}
