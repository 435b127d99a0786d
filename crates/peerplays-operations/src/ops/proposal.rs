//! Proposals: nested operation bundles awaiting multi-party approval.

use peerplays_primitives::util::{WireReader, WireWriter};
use peerplays_primitives::PublicKey;
use peerplays_types::json::{as_object, nested};
use peerplays_types::object_id::{tag, Id};
use peerplays_types::{Decode, Encode, FlatSet, JsonField, PointInTime, TypesError};
use serde_json::{Map, Value};

use crate::operation::Operation;

/// One proposed operation, as held in `proposal_create.proposed_ops`.
///
/// On the wire the wrapper is transparent; in JSON it is `{"op": [id, {..}]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpWrapper {
    pub op: Operation,
}

impl OpWrapper {
    pub fn new(op: impl Into<Operation>) -> Self {
        Self { op: op.into() }
    }
}

impl From<Operation> for OpWrapper {
    fn from(op: Operation) -> Self {
        Self { op }
    }
}

impl Encode for OpWrapper {
    fn encode(&self, writer: &mut WireWriter) {
        self.op.encode(writer);
    }
}

impl Decode for OpWrapper {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        Ok(Self {
            op: Operation::decode(reader)?,
        })
    }
}

impl JsonField for OpWrapper {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("op".to_string(), self.op.to_json());
        Value::Object(map)
    }

    /// Accepts `{"op": [..]}` or a bare `[id, {..}]` pair.
    fn from_json(value: &Value) -> Result<Self, TypesError> {
        if value.is_array() {
            return Ok(Self {
                op: <Operation as JsonField>::from_json(value)?,
            });
        }
        let map = as_object(value, "op_wrapper")?;
        Ok(Self {
            op: nested(map, "op")?,
        })
    }
}

define_operation! {
    /// Propose `proposed_ops` for approval until `expiration_time`.
    ProposalCreate {
        fee_paying_account: Id<tag::Account>,
        expiration_time: PointInTime,
        proposed_ops: Vec<OpWrapper>,
        review_period_seconds: Option<u32>,
    }
}

define_operation! {
    /// Add or withdraw approvals on a pending proposal.
    ProposalUpdate {
        fee_paying_account: Id<tag::Account>,
        proposal: Id<tag::Proposal>,
        active_approvals_to_add: FlatSet<Id<tag::Account>>,
        active_approvals_to_remove: FlatSet<Id<tag::Account>>,
        owner_approvals_to_add: FlatSet<Id<tag::Account>>,
        owner_approvals_to_remove: FlatSet<Id<tag::Account>>,
        key_approvals_to_add: FlatSet<PublicKey>,
        key_approvals_to_remove: FlatSet<PublicKey>,
    }
}

define_operation! {
    ProposalDelete {
        fee_paying_account: Id<tag::Account>,
        using_owner_authority: bool,
        proposal: Id<tag::Proposal>,
    }
}

impl ProposalUpdate {
    /// An update that only adds `approver`'s active approval.
    pub fn approve(
        fee_paying_account: Id<tag::Account>,
        proposal: Id<tag::Proposal>,
        approver: Id<tag::Account>,
    ) -> Self {
        Self {
            fee: Default::default(),
            fee_paying_account,
            proposal,
            active_approvals_to_add: FlatSet::new([approver]),
            active_approvals_to_remove: FlatSet::default(),
            owner_approvals_to_add: FlatSet::default(),
            owner_approvals_to_remove: FlatSet::default(),
            key_approvals_to_add: FlatSet::default(),
            key_approvals_to_remove: FlatSet::default(),
            extensions: Default::default(),
        }
    }
}
