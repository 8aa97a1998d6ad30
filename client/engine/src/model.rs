//! # Event model
//!
//! Shared data structures for the four promotional event variants and the
//! server-owned contribution records.
//!
//! ## Design decisions
//!
//! ### Events as a closed variant set
//!
//! [`Event`] is an internally-tagged enum rather than a trait hierarchy:
//! the lifecycle resolver pattern-matches exhaustively, so adding a variant
//! without classifying it is a compile error, not a runtime surprise.
//!
//! ### Configuration vs state
//!
//! Event definitions are immutable configuration — nothing in this crate
//! ever writes to them. Mutable counter/claim state lives in
//! [`crate::counter`] and [`crate::claim`], keyed by `event_key`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, Result};

/// Fields common to every event variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBase {
    /// Unique string identifier, also the key for counter/claim state.
    pub event_key: String,
    pub title: String,
    pub description: String,
    /// Which game the event belongs to (e.g. "scarlet-violet").
    pub game: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// One raid availability window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaidPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// "Defeat N globally, then claim during a distribution window" event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterEvent {
    #[serde(flatten)]
    pub base: EventBase,
    /// Start of the reward claim window (after the activity window closes).
    pub distribution_start: DateTime<Utc>,
    pub distribution_end: DateTime<Utc>,
    /// Global contribution count that unlocks the base reward.
    pub target_count: u64,
    /// Absolute count past which no further bonus tiers unlock.
    pub max_rewards: u64,
}

/// Raid available in up to two disjoint time windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeraRaidEvent {
    #[serde(flatten)]
    pub base: EventBase,
    pub period1: RaidPeriod,
    pub period2: Option<RaidPeriod>,
    pub raid_level: u8,
}

/// Gift with either a bounded window or no end at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MysteryGiftEvent {
    #[serde(flatten)]
    pub base: EventBase,
    /// When true the gift is permanently available and the base dates are
    /// ignored entirely.
    pub is_ongoing: bool,
}

/// Code valid until a single cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCodeEvent {
    #[serde(flatten)]
    pub base: EventBase,
    pub expiration_date: DateTime<Utc>,
}

/// A promotional event, one of four variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    Counter(CounterEvent),
    TeraRaid(TeraRaidEvent),
    MysteryGift(MysteryGiftEvent),
    PromoCode(PromoCodeEvent),
}

impl Event {
    pub fn base(&self) -> &EventBase {
        match self {
            Event::Counter(e) => &e.base,
            Event::TeraRaid(e) => &e.base,
            Event::MysteryGift(e) => &e.base,
            Event::PromoCode(e) => &e.base,
        }
    }

    pub fn event_key(&self) -> &str {
        &self.base().event_key
    }

    /// Check the variant's date fields for internal consistency.
    ///
    /// Malformed definitions (inverted distribution window, overlapping
    /// raid periods) are configuration errors: callers log the returned
    /// error as a warning. The resolver itself stays total and non-crashing
    /// on such input, but its result for the malformed range is
    /// unspecified — the error is not silently "fixed".
    pub fn validate(&self) -> Result<()> {
        let base = self.base();
        if base.end_date < base.start_date {
            return Err(EngineError::Config(format!(
                "event {}: end_date precedes start_date",
                base.event_key
            )));
        }
        match self {
            Event::Counter(e) => {
                if e.distribution_end < e.distribution_start {
                    return Err(EngineError::Config(format!(
                        "event {}: distribution_end precedes distribution_start",
                        base.event_key
                    )));
                }
                if e.distribution_start < e.base.end_date {
                    return Err(EngineError::Config(format!(
                        "event {}: distribution window opens before the activity window closes",
                        base.event_key
                    )));
                }
            }
            Event::TeraRaid(e) => {
                if e.period1.end < e.period1.start {
                    return Err(EngineError::Config(format!(
                        "event {}: period1 is inverted",
                        base.event_key
                    )));
                }
                if let Some(p2) = &e.period2 {
                    if p2.end < p2.start {
                        return Err(EngineError::Config(format!(
                            "event {}: period2 is inverted",
                            base.event_key
                        )));
                    }
                    if p2.start <= e.period1.end {
                        return Err(EngineError::Config(format!(
                            "event {}: period2 overlaps period1",
                            base.event_key
                        )));
                    }
                }
            }
            Event::MysteryGift(_) | Event::PromoCode(_) => {}
        }
        Ok(())
    }
}

/// Who a contribution is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Participant {
    /// Authenticated account id from the session provider.
    User(String),
    /// Device-local pseudo-id from [`crate::identity`].
    Anonymous(String),
}

impl Participant {
    pub fn id(&self) -> &str {
        match self {
            Participant::User(id) | Participant::Anonymous(id) => id,
        }
    }
}

/// Authoritative per-event counter record, as returned by
/// `GET /events/:eventKey`. Server-owned; the client only ever replaces its
/// local copy with one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionRecord {
    pub id: i64,
    pub event_key: String,
    /// Global count, monotonically non-decreasing on the server.
    pub total_count: u64,
    pub target_count: u64,
    pub max_rewards: u64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Server-side write timestamp; used to discard stale responses.
    pub updated_at: DateTime<Utc>,
}
