//! Typed records for every constructible operation, grouped by family.

pub mod account;
pub mod betting;
pub mod proposal;
pub mod sports;
pub mod tournament;
pub mod transfer;

pub use account::{AccountCreate, AccountUpdate, AccountUpgrade};
pub use betting::{
    BetCancel, BetPlace, BettingMarketCreate, BettingMarketGroupCancelUnmatchedBets,
    BettingMarketGroupCreate, BettingMarketGroupResolve, BettingMarketGroupUpdate,
    BettingMarketRulesCreate, BettingMarketRulesUpdate, BettingMarketUpdate,
};
pub use proposal::{OpWrapper, ProposalCreate, ProposalDelete, ProposalUpdate};
pub use sports::{
    EventCreate, EventGroupCreate, EventGroupDelete, EventGroupUpdate, EventUpdate,
    EventUpdateStatus, SportCreate, SportDelete, SportUpdate,
};
pub use tournament::{GameMove, TournamentJoin, TournamentLeave};
pub use transfer::{AssetIssue, Transfer};
