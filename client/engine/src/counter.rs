//! # Community contribution counter
//!
//! Eventually-consistent view of `(global count, own contribution)` for one
//! event, reconciled against the authoritative server record.
//!
//! ## Consistency strategy
//!
//! The server owns both counts. On a successful increment the response
//! **replaces** the local values — the client never computes the new total
//! itself, because concurrent participants would silently diverge. On
//! failure nothing is mutated; the only optimistic signal is the
//! `in_flight` flag a UI can use to disable its button. This
//! authoritative-server / client-as-cache rule stands in for a distributed
//! counter and must not be "optimized" into a local `+= 1`.
//!
//! Responses are applied through a single gate that discards any payload
//! older than the one already applied, so a slow response racing a newer
//! one can never roll the displayed count backwards. Dropping an
//! in-progress `load`/`increment` future abandons the request before any
//! local mutation, so a torn-down caller never sees a late write.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::api::EventApi;
use crate::errors::Result;
use crate::model::{ContributionRecord, Participant};

/// Contributions past the target needed to unlock one bonus reward tier.
pub const BONUS_TIER_STEP: u64 = 100_000;

/// Per-event counter state held by one client.
#[derive(Debug, Clone)]
pub struct ContributionCounter {
    event_key: String,
    participant: Participant,
    global_count: u64,
    user_contribution: u64,
    last_updated: Option<DateTime<Utc>>,
    in_flight: bool,
}

impl ContributionCounter {
    pub fn new(event_key: impl Into<String>, participant: Participant) -> Self {
        Self {
            event_key: event_key.into(),
            participant,
            global_count: 0,
            user_contribution: 0,
            last_updated: None,
            in_flight: false,
        }
    }

    pub fn global_count(&self) -> u64 {
        self.global_count
    }

    pub fn user_contribution(&self) -> u64 {
        self.user_contribution
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// True while an increment request is outstanding; UIs disable the
    /// contribute button on this instead of pre-incrementing the total.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Fetch the authoritative record and this participant's own count.
    ///
    /// Both reads complete before any local value changes, so a failure
    /// leaves the prior values untouched — a failed refresh must never
    /// reset displayed counts to zero.
    pub async fn load(&mut self, api: &dyn EventApi) -> Result<()> {
        let record = api.fetch_event(&self.event_key).await?;
        let own = api
            .fetch_participation(&self.event_key, &self.participant)
            .await?;
        if self.apply_record(&record) {
            self.user_contribution = own;
        }
        Ok(())
    }

    /// Issue one server-side atomic increment attributed to this
    /// participant.
    ///
    /// At most one request per call, never retried automatically — the
    /// server owns idempotency, and an automatic retry would risk a silent
    /// duplicate. On failure no local state is mutated and the error is
    /// surfaced for a manual retry.
    pub async fn increment(&mut self, api: &dyn EventApi) -> Result<()> {
        self.in_flight = true;
        let outcome = api.increment(&self.event_key, &self.participant).await;
        self.in_flight = false;

        let response = outcome?;
        if self.apply_record(&response.event) {
            self.user_contribution = response.user_contribution;
        }
        Ok(())
    }

    /// Replace local counts with an authoritative record.
    ///
    /// Returns false and applies nothing when the record is older than the
    /// one already applied (a slow response losing the race to a newer
    /// one).
    fn apply_record(&mut self, record: &ContributionRecord) -> bool {
        if let Some(seen) = self.last_updated {
            if record.updated_at < seen {
                debug!(
                    event_key = %self.event_key,
                    "discarding stale counter response ({} < {})",
                    record.updated_at,
                    seen
                );
                return false;
            }
        }
        self.global_count = record.total_count;
        self.last_updated = Some(record.updated_at);
        true
    }
}

/// Progress towards the target as a percentage, clamped at 100.
///
/// Kept as `f64` so very large targets still show fractional progress
/// (3,333 of 1,000,000 is 0.333%, not 0%).
pub fn progress_percentage(count: u64, target: u64) -> f64 {
    if target == 0 {
        return 100.0;
    }
    ((count as f64 / target as f64) * 100.0).min(100.0)
}

/// Bonus reward tiers unlocked past the target: one per
/// [`BONUS_TIER_STEP`] contributions beyond `target`, capped at
/// `(max_rewards - target) / BONUS_TIER_STEP`. Zero at or below target.
pub fn bonus_reward_tier(count: u64, target: u64, max_rewards: u64) -> u64 {
    if count <= target || max_rewards <= target {
        return 0;
    }
    let earned = (count - target) / BONUS_TIER_STEP;
    let cap = (max_rewards - target) / BONUS_TIER_STEP;
    earned.min(cap)
}
