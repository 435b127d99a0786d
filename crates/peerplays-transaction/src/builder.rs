//! Accumulating operations and proposals into one signed transaction.

use peerplays_chain::{ChainApi, ChainParams};
use peerplays_operations::{
    AuthorityLevel, Operation, OperationKind, RelativeReference, RequiredAuthority,
};
use peerplays_primitives::PrivateKey;
use peerplays_types::asset::CORE_ASSET;
use peerplays_types::object_id::{tag, Id};
use peerplays_types::{AssetAmount, JsonField, PointInTime};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::BuilderConfig;
use crate::proposal::{check_bundle, ProposalBuilder};
use crate::signing::SigningEngine;
use crate::transaction::SignedTransaction;
use crate::TransactionError;

/// Handle to a proposal owned by a [`TransactionBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProposalHandle(usize);

/// Where an appended operation goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    #[default]
    Transaction,
    Proposal(ProposalHandle),
}

#[derive(Debug, Clone)]
enum Entry {
    Operation(Operation),
    Proposal(ProposalBuilder),
}

/// Reference block fields derived from the chain head.
///
/// `ref_block_num` is the low 16 bits of the head block number and
/// `ref_block_prefix` the little-endian u32 at bytes 4..8 of the head block id.
pub fn reference_block(head_block_number: u32, head_block_id: &str) -> Result<(u16, u32), TransactionError> {
    let bytes = hex::decode(head_block_id).map_err(|e| {
        TransactionError::InvalidTransaction(format!("head block id {}: {}", head_block_id, e))
    })?;
    if bytes.len() < 8 {
        return Err(TransactionError::InvalidTransaction(format!(
            "head block id {} is too short",
            head_block_id
        )));
    }
    let prefix = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    Ok(((head_block_number & 0xFFFF) as u16, prefix))
}

/// Builds, signs and tracks one transaction.
///
/// Operations go either directly into the transaction or into one of its
/// proposals; each non-empty proposal becomes a single `proposal_create` at
/// its position when the transaction is finalized. Any change after
/// finalization discards the finalized form, so the caller has to finalize
/// again before signing. Once broadcast, the builder is frozen.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    config: BuilderConfig,
    entries: Vec<Entry>,
    fee_asset: Option<Id<tag::Asset>>,
    signers: Vec<RequiredAuthority>,
    wifs: Vec<PrivateKey>,
    reference: Option<(u16, u32)>,
    finalized: Option<SignedTransaction>,
    broadcast: bool,
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new(BuilderConfig::default())
    }
}

impl TransactionBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            fee_asset: None,
            signers: Vec::new(),
            wifs: Vec::new(),
            reference: None,
            finalized: None,
            broadcast: false,
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    fn ensure_mutable(&mut self) -> Result<(), TransactionError> {
        if self.broadcast {
            return Err(TransactionError::AlreadyBroadcast);
        }
        self.finalized = None;
        Ok(())
    }

    /// Append an operation to the end of the transaction.
    pub fn append(&mut self, op: impl Into<Operation>) -> Result<(), TransactionError> {
        self.append_to(Target::Transaction, op)
    }

    /// Append an operation to the transaction or to one of its proposals.
    pub fn append_to(&mut self, target: Target, op: impl Into<Operation>) -> Result<(), TransactionError> {
        self.ensure_mutable()?;
        let op = op.into();
        match target {
            Target::Transaction => {
                debug!(operation = op.name(), position = self.entries.len(), "appended operation");
                self.entries.push(Entry::Operation(op));
            }
            Target::Proposal(handle) => self.proposal_mut(handle)?.append(op),
        }
        Ok(())
    }

    /// Open a new, empty proposal at the current tail of the transaction.
    pub fn new_proposal(&mut self, proposer: Option<Id<tag::Account>>) -> Result<ProposalHandle, TransactionError> {
        self.ensure_mutable()?;
        let handle = ProposalHandle(self.entries.len());
        self.entries.push(Entry::Proposal(ProposalBuilder::new(proposer, &self.config)));
        debug!(position = handle.0, "opened proposal");
        Ok(handle)
    }

    pub fn proposal(&self, handle: ProposalHandle) -> Result<&ProposalBuilder, TransactionError> {
        match self.entries.get(handle.0) {
            Some(Entry::Proposal(proposal)) => Ok(proposal),
            _ => Err(TransactionError::UnknownProposal(handle.0)),
        }
    }

    pub fn proposal_mut(&mut self, handle: ProposalHandle) -> Result<&mut ProposalBuilder, TransactionError> {
        self.ensure_mutable()?;
        match self.entries.get_mut(handle.0) {
            Some(Entry::Proposal(proposal)) => Ok(proposal),
            _ => Err(TransactionError::UnknownProposal(handle.0)),
        }
    }

    /// Number of entries: direct operations plus proposals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Operations appended directly to the transaction, in order.
    pub fn list_operations(&self) -> Vec<&Operation> {
        self.entries
            .iter()
            .filter_map(|entry| match entry {
                Entry::Operation(op) => Some(op),
                Entry::Proposal(_) => None,
            })
            .collect()
    }

    /// Check a relative reference held by an operation about to be appended
    /// to `target`.
    ///
    /// # Returns
    /// The kind of the referenced operation. In a proposal the index counts
    /// the proposal's own operations; in the transaction it counts the
    /// operations as finalized, one per non-empty proposal.
    pub fn resolve_relative(
        &self,
        target: Target,
        referrer: OperationKind,
        reference: &RelativeReference,
    ) -> Result<OperationKind, TransactionError> {
        let kinds: Vec<OperationKind> = match target {
            Target::Proposal(handle) => {
                return Ok(self.proposal(handle)?.resolve_relative(referrer, reference)?.kind());
            }
            Target::Transaction => self
                .entries
                .iter()
                .filter_map(|entry| match entry {
                    Entry::Operation(op) => Some(op.kind()),
                    Entry::Proposal(proposal) if proposal.is_empty() => None,
                    Entry::Proposal(_) => Some(OperationKind::ProposalCreate),
                })
                .collect(),
        };
        let found = usize::try_from(reference.index())
            .ok()
            .and_then(|index| kinds.get(index))
            .copied();
        match found {
            Some(kind) if kind.creates() == Some(reference.expected) => Ok(kind),
            _ => Err(TransactionError::ObjectNotInProposalBuffer {
                operation: referrer.name(),
                field: reference.field,
                id: reference.id.to_string(),
            }),
        }
    }

    fn for_each_fee(&mut self, mut apply: impl FnMut(&mut AssetAmount)) {
        for entry in &mut self.entries {
            match entry {
                Entry::Operation(op) => apply(op.fee_mut()),
                Entry::Proposal(proposal) => {
                    apply(proposal.fee_mut());
                    for op in proposal.operations_mut() {
                        apply(op.fee_mut());
                    }
                }
            }
        }
    }

    /// Rewrite the fee asset of every operation currently held, including
    /// proposed operations and the proposals themselves.
    ///
    /// Only one fee asset is supported per transaction.
    pub fn set_fee_asset(&mut self, asset: Id<tag::Asset>) -> Result<(), TransactionError> {
        self.ensure_mutable()?;
        self.fee_asset = Some(asset);
        self.for_each_fee(|fee| fee.asset_id = asset);
        debug!(asset = %asset, "fee asset set");
        Ok(())
    }

    pub fn fee_asset(&self) -> Id<tag::Asset> {
        self.fee_asset.unwrap_or(CORE_ASSET)
    }

    /// Ask the node for the fee of every operation and store it.
    ///
    /// Proposals are priced as `proposal_create`; the node answers
    /// `[fee, [inner fees...]]` for them and the inner fees are written into
    /// the proposed operations. Empty proposals are left untouched.
    pub fn add_required_fees(&mut self, api: &dyn ChainApi) -> Result<(), TransactionError> {
        self.ensure_mutable()?;
        let mut positions = Vec::new();
        let mut payload = Vec::new();
        for (position, entry) in self.entries.iter().enumerate() {
            match entry {
                Entry::Operation(op) => payload.push(op.to_json()),
                Entry::Proposal(proposal) if proposal.is_empty() => continue,
                Entry::Proposal(proposal) => {
                    let op: Operation = proposal.to_operation(PointInTime::default())?.into();
                    payload.push(op.to_json());
                }
            }
            positions.push(position);
        }
        if payload.is_empty() {
            return Ok(());
        }

        let asset = self.fee_asset();
        let fees = api.get_required_fees(&payload, &asset.object_id())?;
        if fees.len() != payload.len() {
            return Err(TransactionError::FeeError(format!(
                "asked for {} fees, got {}",
                payload.len(),
                fees.len()
            )));
        }
        for (position, reply) in positions.into_iter().zip(fees) {
            match &mut self.entries[position] {
                Entry::Operation(op) => *op.fee_mut() = parse_fee(&reply)?,
                Entry::Proposal(proposal) => apply_proposal_fees(proposal, &reply)?,
            }
        }
        debug!(count = payload.len(), asset = %asset, "required fees applied");
        Ok(())
    }

    /// Require `account` to sign at `level`, in addition to what the
    /// operations require.
    pub fn append_signer(&mut self, account: Id<tag::Account>, level: AuthorityLevel) -> Result<(), TransactionError> {
        self.ensure_mutable()?;
        let signer = RequiredAuthority { account, level };
        if !self.signers.contains(&signer) {
            self.signers.push(signer);
        }
        Ok(())
    }

    /// Add a key that will always sign, whether or not an authority asks for it.
    pub fn append_wif(&mut self, wif: &str) -> Result<(), TransactionError> {
        self.ensure_mutable()?;
        let key = PrivateKey::from_wif(wif)?;
        if !self.wifs.iter().any(|k| k.pub_key() == key.pub_key()) {
            self.wifs.push(key);
        }
        Ok(())
    }

    /// Authorities required by the held operations and explicit signers,
    /// deduplicated, in first-seen order.
    ///
    /// A proposal contributes only its proposer.
    pub fn required_authorities(&self) -> Vec<RequiredAuthority> {
        let mut required: Vec<RequiredAuthority> = Vec::new();
        let from_entries = self.entries.iter().flat_map(|entry| match entry {
            Entry::Operation(op) => op.required_authorities(),
            Entry::Proposal(proposal) if proposal.is_empty() => Vec::new(),
            Entry::Proposal(proposal) => proposal.required_signers(),
        });
        for authority in from_entries.chain(self.signers.iter().copied()) {
            if !required.contains(&authority) {
                required.push(authority);
            }
        }
        required
    }

    pub fn set_reference_block(&mut self, ref_block_num: u16, ref_block_prefix: u32) -> Result<(), TransactionError> {
        self.ensure_mutable()?;
        self.reference = Some((ref_block_num, ref_block_prefix));
        Ok(())
    }

    /// Set the reference block from the chain head.
    pub fn set_reference_block_from(&mut self, head_block_number: u32, head_block_id: &str) -> Result<(), TransactionError> {
        let (num, prefix) = reference_block(head_block_number, head_block_id)?;
        self.set_reference_block(num, prefix)
    }

    /// Finalize with the reference block set earlier.
    pub fn finalize_at(&mut self, expiration: PointInTime) -> Result<&SignedTransaction, TransactionError> {
        let (num, prefix) = self.reference.ok_or_else(|| {
            TransactionError::InvalidTransaction("reference block is not set".to_string())
        })?;
        self.finalize(num, prefix, expiration)
    }

    /// Fix reference block and expiration and assemble the transaction.
    ///
    /// # Arguments
    /// * `ref_block_num` - Low 16 bits of a recent block number.
    /// * `ref_block_prefix` - Bytes 4..8 of that block's id.
    /// * `expiration` - When the chain stops accepting the transaction; also
    ///   the base of relative proposal expirations.
    ///
    /// # Returns
    /// The assembled, unsigned transaction. Fails when nothing would be
    /// broadcast or when a relative id does not resolve to an earlier
    /// operation creating the expected object type.
    pub fn finalize(
        &mut self,
        ref_block_num: u16,
        ref_block_prefix: u32,
        expiration: PointInTime,
    ) -> Result<&SignedTransaction, TransactionError> {
        self.ensure_mutable()?;
        self.reference = Some((ref_block_num, ref_block_prefix));

        let mut tx = SignedTransaction::new(ref_block_num, ref_block_prefix, expiration);
        for entry in &self.entries {
            match entry {
                Entry::Operation(op) => tx.operations.push(op.clone()),
                Entry::Proposal(proposal) if proposal.is_empty() => {
                    debug!("skipping empty proposal");
                }
                Entry::Proposal(proposal) => {
                    proposal.check_references()?;
                    tx.operations.push(proposal.to_operation(expiration)?.into());
                }
            }
        }
        if tx.operations.is_empty() {
            return Err(TransactionError::InvalidTransaction(
                "transaction has no operations".to_string(),
            ));
        }
        check_bundle(&tx.operations)?;

        debug!(
            operations = tx.operations.len(),
            ref_block_num,
            ref_block_prefix,
            expiration = %expiration,
            "transaction finalized"
        );
        Ok(&*self.finalized.insert(tx))
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized.is_some()
    }

    /// The finalized transaction, with any signatures added so far.
    pub fn transaction(&self) -> Result<&SignedTransaction, TransactionError> {
        self.finalized.as_ref().ok_or(TransactionError::NotFinalized)
    }

    /// Sign the finalized transaction.
    ///
    /// Keys are resolved from the live authorities of every required signer;
    /// keys added with [`append_wif`](Self::append_wif) are consulted first
    /// and always sign.
    pub fn sign(&mut self, engine: &SigningEngine, chain: &ChainParams) -> Result<&SignedTransaction, TransactionError> {
        if self.broadcast {
            return Err(TransactionError::AlreadyBroadcast);
        }
        if self.finalized.is_none() {
            return Err(TransactionError::NotFinalized);
        }
        let required = self.required_authorities();
        let keys = engine.resolve_keys(&required, &self.wifs)?;
        let chain_id = chain.chain_id_bytes()?;
        let tx = self.finalized.as_mut().ok_or(TransactionError::NotFinalized)?;
        tx.sign(&keys, &chain_id)?;
        debug!(signatures = tx.signatures.len(), id = %tx.id(), "transaction signed");
        Ok(&*tx)
    }

    /// Sign only with keys added through [`append_wif`](Self::append_wif).
    pub fn sign_with_wifs(&mut self, chain_id: &[u8; 32]) -> Result<&SignedTransaction, TransactionError> {
        if self.broadcast {
            return Err(TransactionError::AlreadyBroadcast);
        }
        if self.wifs.is_empty() {
            return Err(TransactionError::InvalidTransaction("no signing keys".to_string()));
        }
        let tx = self.finalized.as_mut().ok_or(TransactionError::NotFinalized)?;
        tx.sign(&self.wifs, chain_id)?;
        Ok(&*tx)
    }

    /// Wire JSON of the finalized transaction.
    pub fn json(&self) -> Result<serde_json::Value, TransactionError> {
        Ok(self.transaction()?.to_json())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        Ok(self.transaction()?.to_bytes())
    }

    /// Freeze the builder after a successful broadcast.
    pub fn mark_broadcast(&mut self) -> Result<(), TransactionError> {
        if self.finalized.is_none() {
            return Err(TransactionError::NotFinalized);
        }
        if self.broadcast {
            warn!("transaction marked as broadcast twice");
        }
        self.broadcast = true;
        Ok(())
    }

    pub fn is_broadcast(&self) -> bool {
        self.broadcast
    }
}

fn parse_fee(reply: &Value) -> Result<AssetAmount, TransactionError> {
    AssetAmount::from_json(reply).map_err(|e| TransactionError::FeeError(format!("{}: {}", reply, e)))
}

fn apply_proposal_fees(proposal: &mut ProposalBuilder, reply: &Value) -> Result<(), TransactionError> {
    let (fee, inner) = match reply.as_array() {
        Some(pair) if pair.len() == 2 => (&pair[0], pair[1].as_array()),
        _ => (reply, None),
    };
    *proposal.fee_mut() = parse_fee(fee)?;
    let Some(inner) = inner else {
        return Ok(());
    };
    if inner.len() != proposal.len() {
        return Err(TransactionError::FeeError(format!(
            "proposal has {} operations, got {} fees",
            proposal.len(),
            inner.len()
        )));
    }
    for (op, fee) in proposal.operations_mut().iter_mut().zip(inner) {
        *op.fee_mut() = parse_fee(fee)?;
    }
    Ok(())
}
