//! Sports, event groups and events.
//!
//! Parent references (`sport_id` of an event group, `event_group_id` of an
//! event) are full ids so that they may point at an object created earlier in
//! the same proposal.

use peerplays_types::object_id::{tag, FullId, Id};
use peerplays_types::{EventStatus, LocalizedString, PointInTime};

define_operation! {
    SportCreate {
        name: LocalizedString,
    }
}

define_operation! {
    SportUpdate {
        sport_id: Id<tag::Sport>,
        new_name: Option<LocalizedString>,
    }
}

define_operation! {
    SportDelete {
        sport_id: Id<tag::Sport>,
    }
}

define_operation! {
    EventGroupCreate {
        name: LocalizedString,
        sport_id: FullId<tag::Sport>,
    }
}

define_operation! {
    EventGroupUpdate {
        new_sport_id: Option<FullId<tag::Sport>>,
        new_name: Option<LocalizedString>,
        event_group_id: Id<tag::EventGroup>,
    }
}

define_operation! {
    EventGroupDelete {
        event_group_id: Id<tag::EventGroup>,
    }
}

define_operation! {
    /// Schedule an event inside an event group.
    EventCreate {
        name: LocalizedString,
        season: LocalizedString,
        start_time: Option<PointInTime>,
        event_group_id: FullId<tag::EventGroup>,
    }
}

define_operation! {
    EventUpdate {
        event_id: Id<tag::Event>,
        new_event_group_id: Option<FullId<tag::EventGroup>>,
        new_name: Option<LocalizedString>,
        new_season: Option<LocalizedString>,
        new_start_time: Option<PointInTime>,
        new_status: Option<EventStatus>,
    }
}

define_operation! {
    /// Move an event through its lifecycle, optionally posting scores.
    EventUpdateStatus {
        event_id: Id<tag::Event>,
        status: EventStatus,
        scores: Vec<String>,
    }
}
