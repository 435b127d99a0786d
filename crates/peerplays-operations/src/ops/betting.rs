//! Betting market rules, groups, markets and bets.

use peerplays_types::object_id::{tag, FullId, Id};
use peerplays_types::{
    AssetAmount, BetType, BettingMarketGroupStatus, BettingMarketResolution, FlatMap,
    LocalizedString, ResolutionConstraint,
};

define_operation! {
    BettingMarketRulesCreate {
        name: LocalizedString,
        description: LocalizedString,
    }
}

define_operation! {
    BettingMarketRulesUpdate {
        betting_market_rules_id: Id<tag::BettingMarketRules>,
        new_name: Option<LocalizedString>,
        new_description: Option<LocalizedString>,
    }
}

define_operation! {
    /// Open a group of mutually related markets on an event.
    BettingMarketGroupCreate {
        description: LocalizedString,
        event_id: FullId<tag::Event>,
        rules_id: FullId<tag::BettingMarketRules>,
        asset_id: Id<tag::Asset>,
        never_in_play: bool,
        delay_before_settling: u32,
        resolution_constraint: ResolutionConstraint,
    }
}

define_operation! {
    BettingMarketGroupUpdate {
        betting_market_group_id: Id<tag::BettingMarketGroup>,
        new_description: Option<LocalizedString>,
        new_rules_id: Option<FullId<tag::BettingMarketRules>>,
        status: Option<BettingMarketGroupStatus>,
    }
}

define_operation! {
    /// Settle every market of a group; one resolution per market.
    BettingMarketGroupResolve {
        betting_market_group_id: Id<tag::BettingMarketGroup>,
        resolutions: FlatMap<Id<tag::BettingMarket>, BettingMarketResolution>,
    }
}

define_operation! {
    BettingMarketGroupCancelUnmatchedBets {
        betting_market_group_id: Id<tag::BettingMarketGroup>,
    }
}

define_operation! {
    BettingMarketCreate {
        group_id: FullId<tag::BettingMarketGroup>,
        description: LocalizedString,
        payout_condition: LocalizedString,
    }
}

define_operation! {
    BettingMarketUpdate {
        betting_market_id: Id<tag::BettingMarket>,
        new_group_id: Option<FullId<tag::BettingMarketGroup>>,
        new_description: Option<LocalizedString>,
        new_payout_condition: Option<LocalizedString>,
    }
}

define_operation! {
    /// Back or lay an outcome at decimal odds `backer_multiplier / 10000`.
    BetPlace {
        bettor_id: Id<tag::Account>,
        betting_market_id: Id<tag::BettingMarket>,
        amount_to_bet: AssetAmount,
        backer_multiplier: u32,
        back_or_lay: BetType,
    }
}

define_operation! {
    BetCancel {
        bettor_id: Id<tag::Account>,
        bet_to_cancel: Id<tag::Bet>,
    }
}
