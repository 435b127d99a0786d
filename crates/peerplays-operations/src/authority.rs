//! Which accounts must sign an operation, and which of its fields point at
//! objects created earlier in the same bundle.

use std::fmt;
use std::str::FromStr;

use peerplays_types::object_id::{tag, FullId, Id, ObjectId, ObjectType, ObjectTypeTag};

use crate::operation::Operation;
use crate::OperationError;

/// The witness account, fee payer for all sports and betting administration.
pub const WITNESS_ACCOUNT: Id<tag::Account> = Id::new(1);

/// Permission level of an account authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AuthorityLevel {
    Active,
    Owner,
}

impl AuthorityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthorityLevel::Active => "active",
            AuthorityLevel::Owner => "owner",
        }
    }
}

impl fmt::Display for AuthorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthorityLevel {
    type Err = OperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AuthorityLevel::Active),
            "owner" => Ok(AuthorityLevel::Owner),
            other => Err(OperationError::Malformed(format!(
                "unknown permission level {}",
                other
            ))),
        }
    }
}

/// An `(account, level)` pair whose authority must be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequiredAuthority {
    pub account: Id<tag::Account>,
    pub level: AuthorityLevel,
}

impl RequiredAuthority {
    pub fn active(account: Id<tag::Account>) -> Self {
        Self {
            account,
            level: AuthorityLevel::Active,
        }
    }

    pub fn owner(account: Id<tag::Account>) -> Self {
        Self {
            account,
            level: AuthorityLevel::Owner,
        }
    }
}

impl fmt::Display for RequiredAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.account, self.level)
    }
}

/// A full-id field holding a relative `0.0.N` reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeReference {
    pub field: &'static str,
    pub id: ObjectId,
    /// Type of the object the field must point at.
    pub expected: ObjectType,
}

impl RelativeReference {
    /// Position of the creating operation within the bundle.
    pub fn index(&self) -> u64 {
        self.id.instance
    }
}

#[derive(Default)]
struct References(Vec<RelativeReference>);

impl References {
    fn push<T: ObjectTypeTag>(&mut self, field: &'static str, id: &FullId<T>) {
        if id.is_relative() {
            self.0.push(RelativeReference {
                field,
                id: id.object_id(),
                expected: T::OBJECT_TYPE,
            });
        }
    }

    fn push_opt<T: ObjectTypeTag>(&mut self, field: &'static str, id: &Option<FullId<T>>) {
        if let Some(id) = id {
            self.push(field, id);
        }
    }
}

impl Operation {
    /// The account authorities this operation requires, deduplicated, in
    /// first-seen order.
    pub fn required_authorities(&self) -> Vec<RequiredAuthority> {
        use Operation::*;
        let mut required = match self {
            Transfer(op) => vec![RequiredAuthority::active(op.from)],
            AssetIssue(op) => vec![RequiredAuthority::active(op.issuer)],
            AccountCreate(op) => vec![RequiredAuthority::active(op.registrar)],
            AccountUpdate(op) => {
                if op.owner.is_some() {
                    vec![RequiredAuthority::owner(op.account)]
                } else {
                    vec![RequiredAuthority::active(op.account)]
                }
            }
            AccountUpgrade(op) => vec![RequiredAuthority::active(op.account_to_upgrade)],
            ProposalCreate(op) => vec![RequiredAuthority::active(op.fee_paying_account)],
            ProposalUpdate(op) => {
                let mut v = vec![RequiredAuthority::active(op.fee_paying_account)];
                v.extend(
                    op.active_approvals_to_add
                        .iter()
                        .chain(&op.active_approvals_to_remove)
                        .map(|a| RequiredAuthority::active(*a)),
                );
                v.extend(
                    op.owner_approvals_to_add
                        .iter()
                        .chain(&op.owner_approvals_to_remove)
                        .map(|a| RequiredAuthority::owner(*a)),
                );
                v
            }
            ProposalDelete(op) => {
                if op.using_owner_authority {
                    vec![RequiredAuthority::owner(op.fee_paying_account)]
                } else {
                    vec![RequiredAuthority::active(op.fee_paying_account)]
                }
            }
            SportCreate(_)
            | SportUpdate(_)
            | SportDelete(_)
            | EventGroupCreate(_)
            | EventGroupUpdate(_)
            | EventGroupDelete(_)
            | EventCreate(_)
            | EventUpdate(_)
            | EventUpdateStatus(_)
            | BettingMarketRulesCreate(_)
            | BettingMarketRulesUpdate(_)
            | BettingMarketGroupCreate(_)
            | BettingMarketGroupUpdate(_)
            | BettingMarketGroupResolve(_)
            | BettingMarketGroupCancelUnmatchedBets(_)
            | BettingMarketCreate(_)
            | BettingMarketUpdate(_) => vec![RequiredAuthority::active(WITNESS_ACCOUNT)],
            BetPlace(op) => vec![RequiredAuthority::active(op.bettor_id)],
            BetCancel(op) => vec![RequiredAuthority::active(op.bettor_id)],
            TournamentJoin(op) => vec![RequiredAuthority::active(op.payer_account_id)],
            TournamentLeave(op) => vec![RequiredAuthority::active(op.canceling_account_id)],
            GameMove(op) => vec![RequiredAuthority::active(op.player_account_id)],
        };
        let mut seen = std::collections::HashSet::new();
        required.retain(|r| seen.insert(*r));
        required
    }

    /// Fields of this operation that hold relative ids.
    ///
    /// Nested proposal bodies are not descended into; their references are
    /// relative to the proposal, not to the outer bundle.
    pub fn relative_references(&self) -> Vec<RelativeReference> {
        use Operation::*;
        let mut refs = References::default();
        match self {
            EventGroupCreate(op) => refs.push("sport_id", &op.sport_id),
            EventGroupUpdate(op) => refs.push_opt("new_sport_id", &op.new_sport_id),
            EventCreate(op) => refs.push("event_group_id", &op.event_group_id),
            EventUpdate(op) => refs.push_opt("new_event_group_id", &op.new_event_group_id),
            BettingMarketGroupCreate(op) => {
                refs.push("event_id", &op.event_id);
                refs.push("rules_id", &op.rules_id);
            }
            BettingMarketGroupUpdate(op) => refs.push_opt("new_rules_id", &op.new_rules_id),
            BettingMarketCreate(op) => refs.push("group_id", &op.group_id),
            BettingMarketUpdate(op) => refs.push_opt("new_group_id", &op.new_group_id),
            _ => {}
        }
        refs.0
    }
}
