//! The client session: chain identity, object store and transaction flow.

use std::sync::Arc;
use std::time::Duration;

use peerplays_chain::{BlockchainObject, ChainApi, ChainParams, KeyStore, ObjectKind, ObjectStore};
use peerplays_operations::Operation;
use peerplays_transaction::{ProposalHandle, SigningEngine, Target, TransactionBuilder};
use peerplays_types::object_id::{tag, FullId, Id};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::ClientError;

/// A session against one chain.
///
/// The session owns the object cache; every helper that needs chain data
/// goes through it, and nothing is shared between sessions.
pub struct Client {
    config: ClientConfig,
    chain: ChainParams,
    store: ObjectStore,
    keystore: Arc<dyn KeyStore>,
}

impl Client {
    /// Connect a session.
    ///
    /// # Arguments
    /// * `api` - The node transport.
    /// * `keystore` - Source of private keys for signing and memos.
    /// * `config` - Session settings.
    ///
    /// # Returns
    /// The session, or `ChainMismatch` when the node serves another chain
    /// than `config.chain_id`.
    pub fn new(
        api: Arc<dyn ChainApi>,
        keystore: Arc<dyn KeyStore>,
        config: ClientConfig,
    ) -> Result<Self, ClientError> {
        let props = api.get_chain_properties()?;
        if let Some(expected) = &config.chain_id {
            if expected != &props.chain_id {
                return Err(ClientError::ChainMismatch {
                    expected: expected.clone(),
                    actual: props.chain_id,
                });
            }
        }
        let mut chain = ChainParams::resolve(&props)?;
        if let Some(prefix) = &config.prefix {
            chain.prefix = prefix.clone();
        }
        let store = ObjectStore::with_expiration(api, Duration::from_secs(config.cache_expiration_secs));
        info!(chain_id = %chain.chain_id, core = %chain.core_symbol, prefix = %chain.prefix, "client connected");
        Ok(Self {
            config,
            chain,
            store,
            keystore,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn chain(&self) -> &ChainParams {
        &self.chain
    }

    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    pub fn keystore(&self) -> &Arc<dyn KeyStore> {
        &self.keystore
    }

    pub fn signing_engine(&self) -> SigningEngine {
        SigningEngine::new(self.store.clone(), self.keystore.clone())
    }

    /// An empty transaction carrying the configured fee asset.
    pub fn new_transaction(&self) -> Result<TransactionBuilder, ClientError> {
        let mut builder = TransactionBuilder::new(self.config.builder.clone());
        if let Some(asset) = &self.config.fee_asset {
            builder.set_fee_asset(self.store.asset_id(asset)?)?;
        }
        Ok(builder)
    }

    /// Open a proposal paid for by `proposer`, or the default account.
    pub fn new_proposal(
        &self,
        builder: &mut TransactionBuilder,
        proposer: Option<&str>,
    ) -> Result<ProposalHandle, ClientError> {
        let proposer = self.account_or_default(proposer)?;
        Ok(builder.new_proposal(Some(proposer))?)
    }

    pub(crate) fn account_or_default(&self, account: Option<&str>) -> Result<Id<tag::Account>, ClientError> {
        let name = account
            .or(self.config.default_account.as_deref())
            .ok_or(ClientError::NoDefaultAccount)?;
        Ok(self.store.account_id(name)?)
    }

    /// Parse a full id; absolute ids must exist on chain, relative ones are
    /// checked against the bundle when the operation is appended.
    pub(crate) fn full_id<K: ObjectKind>(&self, identifier: &str) -> Result<FullId<K>, ClientError> {
        let id: FullId<K> = identifier.parse()?;
        if !id.is_relative() {
            BlockchainObject::<K>::fetch(&self.store, identifier)?;
        }
        Ok(id)
    }

    /// Check an existing object id of kind `K` and return it typed.
    pub(crate) fn existing_id<K: ObjectKind>(&self, identifier: &str) -> Result<Id<K>, ClientError> {
        Ok(BlockchainObject::<K>::fetch(&self.store, identifier)?.id())
    }

    /// Append `op` to `target` after checking its relative references
    /// against that target.
    pub fn append(
        &self,
        builder: &mut TransactionBuilder,
        target: Target,
        op: impl Into<Operation>,
    ) -> Result<(), ClientError> {
        let op = op.into();
        for reference in op.relative_references() {
            builder.resolve_relative(target, op.kind(), &reference)?;
        }
        debug!(operation = op.name(), ?target, "helper appended operation");
        builder.append_to(target, op)?;
        Ok(())
    }

    /// Resolve fees, set the reference block from the chain head and fix
    /// the expiration.
    pub fn finalize(&self, builder: &mut TransactionBuilder) -> Result<(), ClientError> {
        let api = self.store.api();
        builder.add_required_fees(api.as_ref())?;
        let props = api.get_dynamic_global_properties()?;
        builder.set_reference_block_from(props.head_block_number, &props.head_block_id)?;
        let expiration = props
            .head_block_time()?
            .plus_secs(builder.config().expiration_secs);
        builder.finalize_at(expiration)?;
        Ok(())
    }

    /// Sign a finalized transaction unless the session is `unsigned`.
    pub fn sign(&self, builder: &mut TransactionBuilder) -> Result<(), ClientError> {
        if self.config.unsigned {
            debug!("unsigned session, not signing");
            return Ok(());
        }
        builder.sign(&self.signing_engine(), &self.chain)?;
        Ok(())
    }

    /// Finalize and sign if needed, then hand the transaction to the node.
    ///
    /// # Returns
    /// The node's receipt, or the transaction JSON itself when the session
    /// is `nobroadcast`. A rejected broadcast leaves the builder unchanged.
    pub fn broadcast(&self, builder: &mut TransactionBuilder) -> Result<Value, ClientError> {
        if !builder.is_finalized() {
            self.finalize(builder)?;
        }
        if builder.transaction()?.signatures.is_empty() {
            self.sign(builder)?;
        }
        let json = builder.json()?;
        if self.config.nobroadcast {
            debug!(id = %builder.transaction()?.id(), "nobroadcast session, not broadcasting");
            return Ok(json);
        }
        match self.store.api().broadcast_transaction(&json) {
            Ok(receipt) => {
                builder.mark_broadcast()?;
                info!(id = %builder.transaction()?.id(), "transaction broadcast");
                Ok(receipt)
            }
            Err(e) => {
                warn!(error = %e, "broadcast rejected");
                Err(e.into())
            }
        }
    }
}
