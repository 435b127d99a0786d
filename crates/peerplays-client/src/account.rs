//! Account-level helpers: transfers, authority edits, memo key and
//! membership upgrades, proposal approval.

use peerplays_operations::{AccountUpdate, AccountUpgrade, AuthorityLevel, ProposalUpdate, Transfer};
use peerplays_primitives::PublicKey;
use peerplays_types::object_id::{tag, Id};
use peerplays_types::{AccountOptions, AssetAmount, Extensions, JsonField, Memo, Permission, TypesError};
use peerplays_transaction::{Target, TransactionBuilder};
use tracing::warn;

use crate::{Client, ClientError};

/// A key or an account inside an authority.
enum Grantee {
    Key(PublicKey),
    Account(Id<tag::Account>),
}

impl Client {
    fn grantee(&self, foreign: &str) -> Result<Grantee, ClientError> {
        match foreign.parse::<PublicKey>() {
            Ok(key) => Ok(Grantee::Key(key)),
            Err(_) => Ok(Grantee::Account(self.store().account_id(foreign)?)),
        }
    }

    fn authority_update(
        &self,
        builder: &mut TransactionBuilder,
        target: Target,
        account: Id<tag::Account>,
        level: AuthorityLevel,
        authority: Permission,
    ) -> Result<(), ClientError> {
        let (owner, active) = match level {
            AuthorityLevel::Owner => (Some(authority), None),
            AuthorityLevel::Active => (None, Some(authority)),
        };
        let fee = AssetAmount::zero(builder.fee_asset());
        self.append(
            builder,
            target,
            AccountUpdate {
                fee,
                account,
                owner,
                active,
                new_options: None,
                extensions: Extensions,
            },
        )
    }

    /// Transfer `amount` (in the asset's smallest unit) between accounts.
    ///
    /// # Arguments
    /// * `to` - Recipient name or id.
    /// * `amount` - Integer amount; precision is not applied.
    /// * `asset` - Asset symbol or id.
    /// * `memo` - Optional plaintext, encrypted from the sender's memo key to
    ///   the recipient's.
    /// * `from` - Sender name or id; the default account when `None`.
    #[allow(clippy::too_many_arguments)]
    pub fn transfer(
        &self,
        builder: &mut TransactionBuilder,
        target: Target,
        to: &str,
        amount: i64,
        asset: &str,
        memo: Option<&str>,
        from: Option<&str>,
    ) -> Result<(), ClientError> {
        let from = self.account_or_default(from)?;
        let to = self.store().account_id(to)?;
        let asset_id = self.store().asset_id(asset)?;
        let memo = match memo {
            Some(text) => Some(self.encrypt_memo(from, to, text)?),
            None => None,
        };
        let fee = AssetAmount::zero(builder.fee_asset());
        self.append(
            builder,
            target,
            Transfer {
                fee,
                from,
                to,
                amount: AssetAmount::new(amount, asset_id),
                memo,
                extensions: Extensions,
            },
        )
    }

    fn encrypt_memo(&self, from: Id<tag::Account>, to: Id<tag::Account>, text: &str) -> Result<Memo, ClientError> {
        let from_key = self.store().memo_key(from)?;
        let to_key = self.store().memo_key(to)?;
        let private = self
            .keystore()
            .get_private_key_for_public_key(&from_key)?
            .ok_or_else(|| ClientError::MissingMemoKey(from.to_string()))?;
        Ok(Memo::encrypt(&private, &to_key, rand::random::<u64>(), text)?)
    }

    /// Decrypt a memo held by one of this session's accounts.
    pub fn decrypt_memo(&self, memo: &Memo) -> Result<String, ClientError> {
        for own in [&memo.to, &memo.from] {
            if let Some(private) = self.keystore().get_private_key_for_public_key(own)? {
                return Ok(memo.decrypt(&private, memo.counterparty(own))?);
            }
        }
        Err(ClientError::MissingMemoKey(memo.to.to_string()))
    }

    /// Add a key or account to an authority of `account`.
    ///
    /// The weight defaults to the current threshold, so the newcomer can
    /// sign alone. The resulting authority must still be satisfiable.
    #[allow(clippy::too_many_arguments)]
    pub fn allow(
        &self,
        builder: &mut TransactionBuilder,
        target: Target,
        foreign: &str,
        weight: Option<u16>,
        level: AuthorityLevel,
        threshold: Option<u32>,
        account: Option<&str>,
    ) -> Result<(), ClientError> {
        let account = self.account_or_default(account)?;
        let mut authority = self.store().authority(account, level)?;
        let weight = weight
            .unwrap_or_else(|| u16::try_from(authority.weight_threshold()).unwrap_or(u16::MAX));
        match self.grantee(foreign)? {
            Grantee::Key(key) => authority.add_key(key, weight),
            Grantee::Account(grantee) => authority.add_account(grantee, weight),
        }
        if let Some(threshold) = threshold {
            authority.set_threshold(threshold);
        }
        authority.validate()?;
        self.authority_update(builder, target, account, level, authority)
    }

    /// Remove a key or account from an authority of `account`.
    ///
    /// When the removal leaves the threshold unreachable, the threshold is
    /// lowered by the removed weight.
    pub fn disallow(
        &self,
        builder: &mut TransactionBuilder,
        target: Target,
        foreign: &str,
        level: AuthorityLevel,
        threshold: Option<u32>,
        account: Option<&str>,
    ) -> Result<(), ClientError> {
        let account = self.account_or_default(account)?;
        let mut authority = self.store().authority(account, level)?;
        let removed = match self.grantee(foreign)? {
            Grantee::Key(key) => authority.remove_key(&key),
            Grantee::Account(grantee) => authority.remove_account(&grantee),
        }
        .ok_or_else(|| ClientError::NotInAuthority {
            foreign: foreign.to_string(),
            account: account.to_string(),
            level,
        })?;
        if let Some(threshold) = threshold {
            authority.set_threshold(threshold);
        }
        if let Err(TypesError::ThresholdTooRestrictive { threshold, total }) = authority.validate() {
            let lowered = threshold.saturating_sub(u32::from(removed));
            warn!(
                account = %account,
                level = %level,
                from = threshold,
                to = lowered,
                total,
                "lowering authority threshold"
            );
            authority.set_threshold(lowered);
        }
        authority.validate()?;
        self.authority_update(builder, target, account, level, authority)
    }

    /// Point `account`'s memo key at `key`, keeping its other options.
    pub fn update_memo_key(
        &self,
        builder: &mut TransactionBuilder,
        target: Target,
        key: &str,
        account: Option<&str>,
    ) -> Result<(), ClientError> {
        let account = self.account_or_default(account)?;
        let key: PublicKey = key.parse()?;
        let object = self.store().account(&account.to_string())?;
        let raw = object.get("options").ok_or_else(|| {
            ClientError::InvalidArgument(format!("account {} has no options", account))
        })?;
        let mut options = AccountOptions::from_json(raw)?;
        options.memo_key = key;
        let fee = AssetAmount::zero(builder.fee_asset());
        self.append(
            builder,
            target,
            AccountUpdate {
                fee,
                account,
                owner: None,
                active: None,
                new_options: Some(options),
                extensions: Extensions,
            },
        )
    }

    /// Upgrade `account` to lifetime membership.
    pub fn upgrade_account(
        &self,
        builder: &mut TransactionBuilder,
        target: Target,
        account: Option<&str>,
    ) -> Result<(), ClientError> {
        let account = self.account_or_default(account)?;
        let fee = AssetAmount::zero(builder.fee_asset());
        self.append(
            builder,
            target,
            AccountUpgrade {
                fee,
                account_to_upgrade: account,
                upgrade_to_lifetime_member: true,
                extensions: Extensions,
            },
        )
    }

    /// Add `approver`'s active approval to each proposal.
    pub fn approve_proposal(
        &self,
        builder: &mut TransactionBuilder,
        target: Target,
        proposals: &[&str],
        approver: Option<&str>,
    ) -> Result<(), ClientError> {
        let approver = self.account_or_default(approver)?;
        for proposal in proposals {
            let proposal = self.existing_id::<tag::Proposal>(proposal)?;
            let mut update = ProposalUpdate::approve(approver, proposal, approver);
            update.fee = AssetAmount::zero(builder.fee_asset());
            self.append(builder, target, update)?;
        }
        Ok(())
    }
}
