//! Proposal bundles under construction.

use peerplays_operations::{
    OpWrapper, Operation, OperationKind, ProposalCreate, RelativeReference, RequiredAuthority,
};
use peerplays_types::object_id::{tag, Id};
use peerplays_types::{AssetAmount, Extensions, PointInTime};
use tracing::debug;

use crate::config::BuilderConfig;
use crate::TransactionError;

/// When a proposal stops accepting approvals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalExpiration {
    /// Seconds after the enclosing transaction's expiration.
    In(u32),
    At(PointInTime),
}

/// Operations collected for one `proposal_create`.
///
/// The proposer is the proposal's only signer requirement; the proposed
/// operations' own authorities are satisfied later through approvals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalBuilder {
    proposer: Option<Id<tag::Account>>,
    expiration: ProposalExpiration,
    review_period: Option<u32>,
    fee: AssetAmount,
    ops: Vec<Operation>,
}

impl ProposalBuilder {
    pub fn new(proposer: Option<Id<tag::Account>>, config: &BuilderConfig) -> Self {
        Self {
            proposer,
            expiration: ProposalExpiration::In(config.proposal_expiration_secs),
            review_period: config.proposal_review_secs,
            fee: AssetAmount::default(),
            ops: Vec::new(),
        }
    }

    /// Append operations verbatim, without checking cross-references.
    pub fn append_ops<I, O>(&mut self, ops: I)
    where
        I: IntoIterator<Item = O>,
        O: Into<Operation>,
    {
        let before = self.ops.len();
        self.ops.extend(ops.into_iter().map(Into::into));
        debug!(added = self.ops.len() - before, total = self.ops.len(), "appended proposed operations");
    }

    pub fn append(&mut self, op: impl Into<Operation>) {
        self.append_ops([op.into()]);
    }

    pub fn set_proposer(&mut self, proposer: Id<tag::Account>) {
        self.proposer = Some(proposer);
    }

    pub fn proposer(&self) -> Option<Id<tag::Account>> {
        self.proposer
    }

    pub fn set_expiration(&mut self, expiration: ProposalExpiration) {
        self.expiration = expiration;
    }

    pub fn expiration(&self) -> ProposalExpiration {
        self.expiration
    }

    pub fn set_review(&mut self, seconds: Option<u32>) {
        self.review_period = seconds;
    }

    pub fn review_period(&self) -> Option<u32> {
        self.review_period
    }

    pub fn list_operations(&self) -> &[Operation] {
        &self.ops
    }

    pub(crate) fn operations_mut(&mut self) -> &mut [Operation] {
        &mut self.ops
    }

    pub fn fee(&self) -> &AssetAmount {
        &self.fee
    }

    pub(crate) fn fee_mut(&mut self) -> &mut AssetAmount {
        &mut self.fee
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The operation a relative reference points at.
    ///
    /// # Arguments
    /// * `referrer` - Kind of the operation holding the reference, for errors.
    /// * `reference` - The relative id and the object type its field expects.
    ///
    /// # Returns
    /// The proposed operation at the referenced index when it creates an
    /// object of the expected type, otherwise `ObjectNotInProposalBuffer`.
    pub fn resolve_relative(
        &self,
        referrer: OperationKind,
        reference: &RelativeReference,
    ) -> Result<&Operation, TransactionError> {
        resolve_in(&self.ops, referrer, reference)
    }

    /// Check that every relative reference points at an earlier operation
    /// of the right kind.
    pub fn check_references(&self) -> Result<(), TransactionError> {
        check_bundle(&self.ops)
    }

    /// Authorities the enclosing transaction must carry for this proposal.
    pub fn required_signers(&self) -> Vec<RequiredAuthority> {
        self.proposer.map(RequiredAuthority::active).into_iter().collect()
    }

    /// The `proposal_create` operation for this bundle.
    ///
    /// `base` anchors a relative expiration, normally the transaction's own
    /// expiration.
    pub fn to_operation(&self, base: PointInTime) -> Result<ProposalCreate, TransactionError> {
        let fee_paying_account = self.proposer.ok_or_else(|| {
            TransactionError::InvalidTransaction("proposal has no proposer".to_string())
        })?;
        let expiration_time = match self.expiration {
            ProposalExpiration::In(secs) => base.plus_secs(secs),
            ProposalExpiration::At(at) => at,
        };
        Ok(ProposalCreate {
            fee: self.fee,
            fee_paying_account,
            expiration_time,
            proposed_ops: self.ops.iter().cloned().map(OpWrapper::from).collect(),
            review_period_seconds: self.review_period,
            extensions: Extensions,
        })
    }
}

pub(crate) fn resolve_in<'a>(
    ops: &'a [Operation],
    referrer: OperationKind,
    reference: &RelativeReference,
) -> Result<&'a Operation, TransactionError> {
    let not_found = || TransactionError::ObjectNotInProposalBuffer {
        operation: referrer.name(),
        field: reference.field,
        id: reference.id.to_string(),
    };
    let index = usize::try_from(reference.index()).map_err(|_| not_found())?;
    let target = ops.get(index).ok_or_else(not_found)?;
    if target.kind().creates() != Some(reference.expected) {
        return Err(not_found());
    }
    Ok(target)
}

/// Every relative reference in `ops` must point strictly backwards.
pub(crate) fn check_bundle(ops: &[Operation]) -> Result<(), TransactionError> {
    for (position, op) in ops.iter().enumerate() {
        for reference in op.relative_references() {
            resolve_in(&ops[..position], op.kind(), &reference)?;
        }
    }
    Ok(())
}
