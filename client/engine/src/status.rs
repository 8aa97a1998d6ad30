//! # Lifecycle status resolver
//!
//! Pure classification of an event at an instant. No network, no caching,
//! no interior mutability — safe to call on every render tick, and
//! referentially transparent for a fixed `now`.
//!
//! Each variant has its own closed status set; rules are applied in
//! precedence order and the first match wins, so the sets are mutually
//! exclusive and total over the timeline:
//!
//! ```text
//! Counter:  Upcoming ──► Active ──► Limbo ──► Distribution ──► Ended
//! TeraRaid: Upcoming ──► Period1Active ──► Period1Ended ──► Period2Active ──► Ended
//!                                     └──────────(no period2)──────────────► Ended
//! Gift:     Upcoming ──► Active ──► Ended   (is_ongoing short-circuits to Active)
//! Promo:    Active ──► Expired
//! ```
//!
//! Malformed definitions (overlapping raid periods, inverted windows) are
//! configuration errors caught by [`Event::validate`]; the resolver does
//! not special-case them and its output for such input is unspecified but
//! never a panic.

use chrono::{DateTime, Utc};

use crate::model::{CounterEvent, Event, MysteryGiftEvent, PromoCodeEvent, TeraRaidEvent};

/// Lifecycle of a community counter event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterStatus {
    Upcoming,
    /// Activity window open; contributions count.
    Active,
    /// Activity closed but rewards not yet claimable. A genuine dead zone,
    /// surfaced distinctly rather than collapsed into Ended or Active.
    Limbo,
    /// Claim window open.
    Distribution,
    Ended,
}

/// Lifecycle of a tera raid event with up to two windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaidStatus {
    Upcoming,
    Period1Active,
    /// Gap between the two raid windows.
    Period1Ended,
    Period2Active,
    Ended,
}

/// Lifecycle of a mystery gift event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiftStatus {
    Upcoming,
    Active,
    Ended,
}

/// Lifecycle of a promo code: binary split on the expiration cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoStatus {
    Active,
    Expired,
}

/// Status of any event variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Counter(CounterStatus),
    TeraRaid(RaidStatus),
    MysteryGift(GiftStatus),
    PromoCode(PromoStatus),
}

impl CounterEvent {
    pub fn status_at(&self, now: DateTime<Utc>) -> CounterStatus {
        if now < self.base.start_date {
            CounterStatus::Upcoming
        } else if now <= self.base.end_date {
            CounterStatus::Active
        } else if now < self.distribution_start {
            CounterStatus::Limbo
        } else if now <= self.distribution_end {
            CounterStatus::Distribution
        } else {
            CounterStatus::Ended
        }
    }
}

impl TeraRaidEvent {
    pub fn status_at(&self, now: DateTime<Utc>) -> RaidStatus {
        if now < self.period1.start {
            return RaidStatus::Upcoming;
        }
        if now <= self.period1.end {
            return RaidStatus::Period1Active;
        }
        match &self.period2 {
            None => RaidStatus::Ended,
            Some(p2) => {
                if now < p2.start {
                    RaidStatus::Period1Ended
                } else if now <= p2.end {
                    RaidStatus::Period2Active
                } else {
                    RaidStatus::Ended
                }
            }
        }
    }
}

impl MysteryGiftEvent {
    pub fn status_at(&self, now: DateTime<Utc>) -> GiftStatus {
        // Permanent gifts ignore the date fields entirely.
        if self.is_ongoing {
            return GiftStatus::Active;
        }
        if now < self.base.start_date {
            GiftStatus::Upcoming
        } else if now <= self.base.end_date {
            GiftStatus::Active
        } else {
            GiftStatus::Ended
        }
    }
}

impl PromoCodeEvent {
    pub fn status_at(&self, now: DateTime<Utc>) -> PromoStatus {
        if now <= self.expiration_date {
            PromoStatus::Active
        } else {
            PromoStatus::Expired
        }
    }
}

impl Event {
    /// Classify this event at `now`. Exactly one status is returned for
    /// any `(event, now)` pair.
    pub fn status_at(&self, now: DateTime<Utc>) -> EventStatus {
        match self {
            Event::Counter(e) => EventStatus::Counter(e.status_at(now)),
            Event::TeraRaid(e) => EventStatus::TeraRaid(e.status_at(now)),
            Event::MysteryGift(e) => EventStatus::MysteryGift(e.status_at(now)),
            Event::PromoCode(e) => EventStatus::PromoCode(e.status_at(now)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EventBase, RaidPeriod};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn days(n: i64) -> Duration {
        Duration::days(n)
    }

    fn base() -> EventBase {
        EventBase {
            event_key: "test-event".to_string(),
            title: "Test".to_string(),
            description: String::new(),
            game: "scarlet-violet".to_string(),
            start_date: t0(),
            end_date: t0() + days(10),
        }
    }

    fn counter_event() -> CounterEvent {
        CounterEvent {
            base: base(),
            distribution_start: t0() + days(14),
            distribution_end: t0() + days(60),
            target_count: 1_000_000,
            max_rewards: 2_000_000,
        }
    }

    fn raid_event(second_period: bool) -> TeraRaidEvent {
        TeraRaidEvent {
            base: base(),
            period1: RaidPeriod {
                start: t0(),
                end: t0() + days(3),
            },
            period2: second_period.then(|| RaidPeriod {
                start: t0() + days(7),
                end: t0() + days(10),
            }),
            raid_level: 7,
        }
    }

    #[test]
    fn counter_limbo_between_activity_and_distribution() {
        // Raid window closed, rewards not yet claimable.
        let status = counter_event().status_at(t0() + days(12));
        assert_eq!(status, CounterStatus::Limbo);
    }

    #[test]
    fn counter_window_boundaries_are_inclusive() {
        let e = counter_event();
        assert_eq!(e.status_at(t0()), CounterStatus::Active);
        assert_eq!(e.status_at(t0() + days(10)), CounterStatus::Active);
        assert_eq!(e.status_at(t0() + days(14)), CounterStatus::Distribution);
        assert_eq!(e.status_at(t0() + days(60)), CounterStatus::Distribution);
        assert_eq!(e.status_at(t0() - days(1)), CounterStatus::Upcoming);
        assert_eq!(e.status_at(t0() + days(61)), CounterStatus::Ended);
    }

    #[test]
    fn counter_statuses_partition_the_timeline() {
        // Sample hourly across the whole configured range plus margins:
        // exactly one status at every instant, advancing monotonically.
        let e = counter_event();
        let order = [
            CounterStatus::Upcoming,
            CounterStatus::Active,
            CounterStatus::Limbo,
            CounterStatus::Distribution,
            CounterStatus::Ended,
        ];
        let mut last_index = 0usize;
        for hour in -48..(65 * 24) {
            let status = e.status_at(t0() + Duration::hours(hour));
            let index = order.iter().position(|s| *s == status).unwrap();
            assert!(
                index >= last_index,
                "status regressed at hour {hour}: {status:?}"
            );
            last_index = index;
        }
        assert_eq!(last_index, order.len() - 1);
    }

    #[test]
    fn raid_gap_between_periods() {
        let status = raid_event(true).status_at(t0() + days(5));
        assert_eq!(status, RaidStatus::Period1Ended);
    }

    #[test]
    fn raid_without_second_period_ends_after_first() {
        let e = raid_event(false);
        assert_eq!(e.status_at(t0() + days(2)), RaidStatus::Period1Active);
        assert_eq!(e.status_at(t0() + days(4)), RaidStatus::Ended);
    }

    #[test]
    fn raid_statuses_partition_from_period1_start() {
        let e = raid_event(true);
        let order = [
            RaidStatus::Period1Active,
            RaidStatus::Period1Ended,
            RaidStatus::Period2Active,
            RaidStatus::Ended,
        ];
        let mut last_index = 0usize;
        for hour in 0..(12 * 24) {
            let status = e.status_at(t0() + Duration::hours(hour));
            let index = order.iter().position(|s| *s == status).unwrap();
            assert!(index >= last_index, "status regressed at hour {hour}");
            last_index = index;
        }
        assert_eq!(last_index, order.len() - 1);
        assert_eq!(e.status_at(t0() - days(1)), RaidStatus::Upcoming);
    }

    #[test]
    fn ongoing_gift_is_always_active() {
        let gift = MysteryGiftEvent {
            base: base(),
            is_ongoing: true,
        };
        // Dates are ignored entirely, even far outside the window.
        assert_eq!(gift.status_at(t0() - days(365)), GiftStatus::Active);
        assert_eq!(gift.status_at(t0() + days(365)), GiftStatus::Active);
    }

    #[test]
    fn bounded_gift_follows_its_window() {
        let gift = MysteryGiftEvent {
            base: base(),
            is_ongoing: false,
        };
        assert_eq!(gift.status_at(t0() - days(1)), GiftStatus::Upcoming);
        assert_eq!(gift.status_at(t0() + days(5)), GiftStatus::Active);
        assert_eq!(gift.status_at(t0() + days(11)), GiftStatus::Ended);
    }

    #[test]
    fn promo_code_splits_on_expiration() {
        let promo = PromoCodeEvent {
            base: base(),
            expiration_date: t0() + days(30),
        };
        assert_eq!(promo.status_at(t0() + days(30)), PromoStatus::Active);
        assert_eq!(
            promo.status_at(t0() + days(30) + Duration::seconds(1)),
            PromoStatus::Expired
        );
    }

    #[test]
    fn resolver_is_deterministic_for_fixed_now() {
        let event = Event::Counter(counter_event());
        let now = t0() + days(12);
        let first = event.status_at(now);
        for _ in 0..100 {
            assert_eq!(event.status_at(now), first);
        }
    }
}
