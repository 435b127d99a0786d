//! The closed registry of operation kinds.
//!
//! Wire ids are positions in an append-only list shared with the node. The
//! registry is total: every id and every name below resolves, even for kinds
//! this SDK cannot construct.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use peerplays_types::ObjectType;

use crate::OperationError;

macro_rules! operation_kinds {
    ($($variant:ident = $id:literal => $name:literal),* $(,)?) => {
        /// Every operation the chain knows about, by wire id.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum OperationKind {
            $($variant = $id,)*
        }

        impl OperationKind {
            /// All kinds in wire-id order.
            pub const ALL: &'static [OperationKind] = &[$(OperationKind::$variant,)*];

            const NAMES: &'static [&'static str] = &[$($name,)*];
        }
    };
}

operation_kinds! {
    Transfer = 0 => "transfer",
    LimitOrderCreate = 1 => "limit_order_create",
    LimitOrderCancel = 2 => "limit_order_cancel",
    CallOrderUpdate = 3 => "call_order_update",
    FillOrder = 4 => "fill_order",
    AccountCreate = 5 => "account_create",
    AccountUpdate = 6 => "account_update",
    AccountWhitelist = 7 => "account_whitelist",
    AccountUpgrade = 8 => "account_upgrade",
    AccountTransfer = 9 => "account_transfer",
    AssetCreate = 10 => "asset_create",
    AssetUpdate = 11 => "asset_update",
    AssetUpdateBitasset = 12 => "asset_update_bitasset",
    AssetUpdateFeedProducers = 13 => "asset_update_feed_producers",
    AssetIssue = 14 => "asset_issue",
    AssetReserve = 15 => "asset_reserve",
    AssetFundFeePool = 16 => "asset_fund_fee_pool",
    AssetSettle = 17 => "asset_settle",
    AssetGlobalSettle = 18 => "asset_global_settle",
    AssetPublishFeed = 19 => "asset_publish_feed",
    WitnessCreate = 20 => "witness_create",
    WitnessUpdate = 21 => "witness_update",
    ProposalCreate = 22 => "proposal_create",
    ProposalUpdate = 23 => "proposal_update",
    ProposalDelete = 24 => "proposal_delete",
    WithdrawPermissionCreate = 25 => "withdraw_permission_create",
    WithdrawPermissionUpdate = 26 => "withdraw_permission_update",
    WithdrawPermissionClaim = 27 => "withdraw_permission_claim",
    WithdrawPermissionDelete = 28 => "withdraw_permission_delete",
    CommitteeMemberCreate = 29 => "committee_member_create",
    CommitteeMemberUpdate = 30 => "committee_member_update",
    CommitteeMemberUpdateGlobalParameters = 31 => "committee_member_update_global_parameters",
    VestingBalanceCreate = 32 => "vesting_balance_create",
    VestingBalanceWithdraw = 33 => "vesting_balance_withdraw",
    WorkerCreate = 34 => "worker_create",
    Custom = 35 => "custom",
    Assert = 36 => "assert",
    BalanceClaim = 37 => "balance_claim",
    OverrideTransfer = 38 => "override_transfer",
    TransferToBlind = 39 => "transfer_to_blind",
    BlindTransfer = 40 => "blind_transfer",
    TransferFromBlind = 41 => "transfer_from_blind",
    AssetSettleCancel = 42 => "asset_settle_cancel",
    AssetClaimFees = 43 => "asset_claim_fees",
    FbaDistribute = 44 => "fba_distribute",
    TournamentCreate = 45 => "tournament_create",
    TournamentJoin = 46 => "tournament_join",
    GameMove = 47 => "game_move",
    TournamentPayout = 48 => "tournament_payout",
    TournamentLeave = 49 => "tournament_leave",
    SportCreate = 50 => "sport_create",
    SportUpdate = 51 => "sport_update",
    EventGroupCreate = 52 => "event_group_create",
    EventGroupUpdate = 53 => "event_group_update",
    EventCreate = 54 => "event_create",
    EventUpdate = 55 => "event_update",
    BettingMarketRulesCreate = 56 => "betting_market_rules_create",
    BettingMarketRulesUpdate = 57 => "betting_market_rules_update",
    BettingMarketGroupCreate = 58 => "betting_market_group_create",
    BettingMarketCreate = 59 => "betting_market_create",
    BetPlace = 60 => "bet_place",
    BettingMarketGroupResolve = 61 => "betting_market_group_resolve",
    BettingMarketGroupResolved = 62 => "betting_market_group_resolved",
    BetAdjusted = 63 => "bet_adjusted",
    BettingMarketGroupCancelUnmatchedBets = 64 => "betting_market_group_cancel_unmatched_bets",
    BetMatched = 65 => "bet_matched",
    BetCancel = 66 => "bet_cancel",
    BetCanceled = 67 => "bet_canceled",
    BettingMarketGroupUpdate = 68 => "betting_market_group_update",
    BettingMarketUpdate = 69 => "betting_market_update",
    EventUpdateStatus = 70 => "event_update_status",
    SportDelete = 71 => "sport_delete",
    EventGroupDelete = 72 => "event_group_delete",
    AffiliatePayout = 73 => "affiliate_payout",
    AffiliateReferralPayout = 74 => "affiliate_referral_payout",
    LotteryAssetCreate = 75 => "lottery_asset_create",
    TicketPurchase = 76 => "ticket_purchase",
    LotteryReward = 77 => "lottery_reward",
    LotteryEnd = 78 => "lottery_end",
    SweepsVestingClaim = 79 => "sweeps_vesting_claim",
}

// Ids are positions, so the table must be dense and the name table aligned.
const _: () = {
    assert!(OperationKind::ALL.len() == OperationKind::NAMES.len());
    let mut i = 0;
    while i < OperationKind::ALL.len() {
        assert!(OperationKind::ALL[i] as usize == i);
        i += 1;
    }
};

fn name_index() -> &'static HashMap<&'static str, OperationKind> {
    static INDEX: OnceLock<HashMap<&'static str, OperationKind>> = OnceLock::new();
    INDEX.get_or_init(|| {
        OperationKind::ALL
            .iter()
            .map(|kind| (kind.name(), *kind))
            .collect()
    })
}

impl OperationKind {
    pub fn id(self) -> u64 {
        self as u64
    }

    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    pub fn from_id(id: u64) -> Option<Self> {
        usize::try_from(id).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        name_index().get(name).copied()
    }

    /// The object type whose instances this operation creates, if any.
    ///
    /// Relative ids (`0.0.N`) are only valid when operation `N` of the bundle
    /// creates an object of the type the referencing field expects.
    pub fn creates(self) -> Option<ObjectType> {
        use OperationKind::*;
        Some(match self {
            AccountCreate => ObjectType::Account,
            AssetCreate | LotteryAssetCreate => ObjectType::Asset,
            WitnessCreate => ObjectType::Witness,
            CommitteeMemberCreate => ObjectType::CommitteeMember,
            ProposalCreate => ObjectType::Proposal,
            LimitOrderCreate => ObjectType::LimitOrder,
            WithdrawPermissionCreate => ObjectType::WithdrawPermission,
            VestingBalanceCreate => ObjectType::VestingBalance,
            WorkerCreate => ObjectType::Worker,
            TournamentCreate => ObjectType::Tournament,
            SportCreate => ObjectType::Sport,
            EventGroupCreate => ObjectType::EventGroup,
            EventCreate => ObjectType::Event,
            BettingMarketRulesCreate => ObjectType::BettingMarketRules,
            BettingMarketGroupCreate => ObjectType::BettingMarketGroup,
            BettingMarketCreate => ObjectType::BettingMarket,
            BetPlace => ObjectType::Bet,
            _ => return None,
        })
    }

    /// The operation kind that creates objects of `object_type`.
    pub fn creating(object_type: ObjectType) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.creates() == Some(object_type))
    }

    /// Whether this SDK can construct and decode operations of this kind.
    pub fn is_supported(self) -> bool {
        use OperationKind::*;
        matches!(
            self,
            Transfer
                | AssetIssue
                | AccountCreate
                | AccountUpdate
                | AccountUpgrade
                | ProposalCreate
                | ProposalUpdate
                | ProposalDelete
                | SportCreate
                | SportUpdate
                | SportDelete
                | EventGroupCreate
                | EventGroupUpdate
                | EventGroupDelete
                | EventCreate
                | EventUpdate
                | EventUpdateStatus
                | BettingMarketRulesCreate
                | BettingMarketRulesUpdate
                | BettingMarketGroupCreate
                | BettingMarketGroupUpdate
                | BettingMarketGroupResolve
                | BettingMarketGroupCancelUnmatchedBets
                | BettingMarketCreate
                | BettingMarketUpdate
                | BetPlace
                | BetCancel
                | TournamentJoin
                | TournamentLeave
                | GameMove
        )
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a name or a decimal wire id.
impl FromStr for OperationKind {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(kind) = Self::from_name(s) {
            return Ok(kind);
        }
        s.parse::<u64>()
            .ok()
            .and_then(Self::from_id)
            .ok_or_else(|| OperationError::UnknownOperation(s.to_string()))
    }
}
