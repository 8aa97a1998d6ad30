//! Human-readable "time remaining" text, derived from the resolved status.
//!
//! Depends on [`crate::status`], never the other way around. Terminal
//! states yield `None`; permanently available gifts have nothing to count
//! down to, so they yield `None` as well.

use chrono::{DateTime, Duration, Utc};

use crate::model::Event;
use crate::status::{CounterStatus, GiftStatus, PromoStatus, RaidStatus};

/// Render a duration as `"2d 04h 30m"`. Sub-minute remainders render as
/// `"<1m"`; negative durations clamp to that as well.
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes();
    if total_minutes < 1 {
        return "<1m".to_string();
    }
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes % (24 * 60)) / 60;
    let minutes = total_minutes % 60;
    if days > 0 {
        format!("{days}d {hours:02}h {minutes:02}m")
    } else if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else {
        format!("{minutes}m")
    }
}

fn until(label: &str, target: DateTime<Utc>, now: DateTime<Utc>) -> Option<String> {
    Some(format!("{label} {}", format_duration(target - now)))
}

/// Countdown line for the event at `now`, or `None` when there is nothing
/// left to count down to.
pub fn countdown_text(event: &Event, now: DateTime<Utc>) -> Option<String> {
    match event {
        Event::Counter(e) => match e.status_at(now) {
            CounterStatus::Upcoming => until("Starts in", e.base.start_date, now),
            CounterStatus::Active => until("Ends in", e.base.end_date, now),
            CounterStatus::Limbo => until("Rewards in", e.distribution_start, now),
            CounterStatus::Distribution => {
                until("Claim window closes in", e.distribution_end, now)
            }
            CounterStatus::Ended => None,
        },
        Event::TeraRaid(e) => match e.status_at(now) {
            RaidStatus::Upcoming => until("Starts in", e.period1.start, now),
            RaidStatus::Period1Active => until("Period 1 ends in", e.period1.end, now),
            RaidStatus::Period1Ended => e
                .period2
                .as_ref()
                .and_then(|p2| until("Period 2 starts in", p2.start, now)),
            RaidStatus::Period2Active => e
                .period2
                .as_ref()
                .and_then(|p2| until("Period 2 ends in", p2.end, now)),
            RaidStatus::Ended => None,
        },
        Event::MysteryGift(e) => match e.status_at(now) {
            GiftStatus::Active if e.is_ongoing => None,
            GiftStatus::Upcoming => until("Starts in", e.base.start_date, now),
            GiftStatus::Active => until("Ends in", e.base.end_date, now),
            GiftStatus::Ended => None,
        },
        Event::PromoCode(e) => match e.status_at(now) {
            PromoStatus::Active => until("Code expires in", e.expiration_date, now),
            PromoStatus::Expired => None,
        },
    }
}
