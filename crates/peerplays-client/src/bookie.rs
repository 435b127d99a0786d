//! Bookie helpers: sports, event groups, events, betting markets and bets.
//!
//! Parent ids may be absolute (`1.x.y`, checked against the chain) or
//! relative (`0.0.N`, checked against the target when appended).

use peerplays_operations::{
    BetCancel, BetPlace, BettingMarketCreate, BettingMarketGroupCreate, BettingMarketGroupResolve,
    BettingMarketRulesCreate, EventCreate, EventGroupCreate, SportCreate,
};
use peerplays_chain::Rule;
use peerplays_types::object_id::tag;
use peerplays_types::{
    AssetAmount, BetType, BettingMarketResolution, Extensions, FlatMap, LocalizedString,
    PointInTime, ResolutionConstraint,
};
use peerplays_transaction::{Target, TransactionBuilder};

use crate::{Client, ClientError};

/// `(locale, text)` pairs, e.g. `[("en", "Football"), ("de", "Fussball")]`.
pub type Localized<'a> = &'a [(&'a str, &'a str)];

fn localized(entries: Localized<'_>) -> Result<LocalizedString, ClientError> {
    if entries.is_empty() {
        return Err(ClientError::InvalidArgument("localized text needs at least one locale".into()));
    }
    Ok(LocalizedString::new(entries.iter().copied())?)
}

impl Client {
    pub fn sport_create(
        &self,
        builder: &mut TransactionBuilder,
        target: Target,
        names: Localized<'_>,
    ) -> Result<(), ClientError> {
        let fee = AssetAmount::zero(builder.fee_asset());
        self.append(
            builder,
            target,
            SportCreate {
                fee,
                name: localized(names)?,
                extensions: Extensions,
            },
        )
    }

    pub fn event_group_create(
        &self,
        builder: &mut TransactionBuilder,
        target: Target,
        names: Localized<'_>,
        sport_id: &str,
    ) -> Result<(), ClientError> {
        let sport_id = self.full_id::<tag::Sport>(sport_id)?;
        let fee = AssetAmount::zero(builder.fee_asset());
        self.append(
            builder,
            target,
            EventGroupCreate {
                fee,
                name: localized(names)?,
                sport_id,
                extensions: Extensions,
            },
        )
    }

    /// Schedule an event.
    ///
    /// # Arguments
    /// * `names` - Localized event name.
    /// * `season` - Localized season label.
    /// * `start_time` - Scheduled start, if known.
    /// * `event_group_id` - Parent group, absolute or relative.
    #[allow(clippy::too_many_arguments)]
    pub fn event_create(
        &self,
        builder: &mut TransactionBuilder,
        target: Target,
        names: Localized<'_>,
        season: Localized<'_>,
        start_time: Option<PointInTime>,
        event_group_id: &str,
    ) -> Result<(), ClientError> {
        let event_group_id = self.full_id::<tag::EventGroup>(event_group_id)?;
        let fee = AssetAmount::zero(builder.fee_asset());
        self.append(
            builder,
            target,
            EventCreate {
                fee,
                name: localized(names)?,
                season: localized(season)?,
                start_time,
                event_group_id,
                extensions: Extensions,
            },
        )
    }

    pub fn betting_market_rules_create(
        &self,
        builder: &mut TransactionBuilder,
        target: Target,
        names: Localized<'_>,
        descriptions: Localized<'_>,
    ) -> Result<(), ClientError> {
        let fee = AssetAmount::zero(builder.fee_asset());
        self.append(
            builder,
            target,
            BettingMarketRulesCreate {
                fee,
                name: localized(names)?,
                description: localized(descriptions)?,
                extensions: Extensions,
            },
        )
    }

    /// Open a betting market group on an event.
    ///
    /// # Arguments
    /// * `event_id` - Event, absolute or relative.
    /// * `rules_id` - Rules, absolute or relative.
    /// * `asset` - Symbol or id of the asset bets are placed in.
    /// * `delay_before_settling` - Seconds between resolution and payout.
    #[allow(clippy::too_many_arguments)]
    pub fn betting_market_group_create(
        &self,
        builder: &mut TransactionBuilder,
        target: Target,
        description: Localized<'_>,
        event_id: &str,
        rules_id: &str,
        asset: &str,
        never_in_play: bool,
        delay_before_settling: u32,
        resolution_constraint: ResolutionConstraint,
    ) -> Result<(), ClientError> {
        let event_id = self.full_id::<tag::Event>(event_id)?;
        let rules_id = self.full_id::<Rule>(rules_id)?;
        let asset_id = self.store().asset_id(asset)?;
        let fee = AssetAmount::zero(builder.fee_asset());
        self.append(
            builder,
            target,
            BettingMarketGroupCreate {
                fee,
                description: localized(description)?,
                event_id,
                rules_id,
                asset_id,
                never_in_play,
                delay_before_settling,
                resolution_constraint,
                extensions: Extensions,
            },
        )
    }

    pub fn betting_market_create(
        &self,
        builder: &mut TransactionBuilder,
        target: Target,
        group_id: &str,
        description: Localized<'_>,
        payout_condition: Localized<'_>,
    ) -> Result<(), ClientError> {
        let group_id = self.full_id::<tag::BettingMarketGroup>(group_id)?;
        let fee = AssetAmount::zero(builder.fee_asset());
        self.append(
            builder,
            target,
            BettingMarketCreate {
                fee,
                group_id,
                description: localized(description)?,
                payout_condition: localized(payout_condition)?,
                extensions: Extensions,
            },
        )
    }

    /// Resolve every market of a group.
    ///
    /// Markets and the group must already exist on chain; resolutions cannot
    /// refer to objects inside a proposal. Results may come in any order but
    /// each market only once.
    pub fn betting_market_resolve(
        &self,
        builder: &mut TransactionBuilder,
        target: Target,
        group_id: &str,
        results: &[(&str, BettingMarketResolution)],
    ) -> Result<(), ClientError> {
        let group = self.existing_id::<tag::BettingMarketGroup>(group_id)?;
        let resolutions = results
            .iter()
            .map(|(market, resolution)| {
                Ok((self.existing_id::<tag::BettingMarket>(market)?, *resolution))
            })
            .collect::<Result<Vec<_>, ClientError>>()?;
        let resolutions = FlatMap::new(resolutions)?;
        let fee = AssetAmount::zero(builder.fee_asset());
        self.append(
            builder,
            target,
            BettingMarketGroupResolve {
                fee,
                betting_market_group_id: group,
                resolutions,
                extensions: Extensions,
            },
        )
    }

    /// Place a bet on a market.
    ///
    /// `amount` is in the asset's smallest unit; `backer_multiplier` is the
    /// decimal odds scaled by 10000.
    #[allow(clippy::too_many_arguments)]
    pub fn bet_place(
        &self,
        builder: &mut TransactionBuilder,
        target: Target,
        market_id: &str,
        amount: i64,
        asset: &str,
        backer_multiplier: u32,
        back_or_lay: BetType,
        account: Option<&str>,
    ) -> Result<(), ClientError> {
        let bettor_id = self.account_or_default(account)?;
        let betting_market_id = self.existing_id::<tag::BettingMarket>(market_id)?;
        let asset_id = self.store().asset_id(asset)?;
        let fee = AssetAmount::zero(builder.fee_asset());
        self.append(
            builder,
            target,
            BetPlace {
                fee,
                bettor_id,
                betting_market_id,
                amount_to_bet: AssetAmount::new(amount, asset_id),
                backer_multiplier,
                back_or_lay,
                extensions: Extensions,
            },
        )
    }

    pub fn bet_cancel(
        &self,
        builder: &mut TransactionBuilder,
        target: Target,
        bet_id: &str,
        account: Option<&str>,
    ) -> Result<(), ClientError> {
        let bettor_id = self.account_or_default(account)?;
        let bet_to_cancel = self.existing_id::<tag::Bet>(bet_id)?;
        let fee = AssetAmount::zero(builder.fee_asset());
        self.append(
            builder,
            target,
            BetCancel {
                fee,
                bettor_id,
                bet_to_cancel,
                extensions: Extensions,
            },
        )
    }
}
