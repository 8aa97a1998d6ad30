//! End-to-end flow against an in-process backend fake: anonymous identity,
//! contribution counting, and reward claiming for one event.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use event_engine::{
    get_or_create_anonymous_id, ClaimTracker, ContributionCounter, ContributionRecord,
    EngineError, EventApi, IncrementResponse, MemoryStore, Participant, Result,
};

/// Stateful backend fake. Every increment also adds contributions from
/// "other participants" so the authoritative total always runs ahead of
/// anything a client could compute locally.
struct BackendFake {
    state: Mutex<BackendState>,
}

struct BackendState {
    total: u64,
    per_participant: HashMap<String, u64>,
    claims: HashMap<String, bool>,
    updated_at: DateTime<Utc>,
    crowd_per_increment: u64,
}

impl BackendFake {
    fn new() -> Self {
        Self {
            state: Mutex::new(BackendState {
                total: 500,
                per_participant: HashMap::new(),
                claims: HashMap::new(),
                updated_at: Utc.with_ymd_and_hms(2024, 6, 5, 12, 0, 0).unwrap(),
                crowd_per_increment: 7,
            }),
        }
    }

    fn record(state: &BackendState, event_key: &str) -> ContributionRecord {
        ContributionRecord {
            id: 1,
            event_key: event_key.to_string(),
            total_count: state.total,
            target_count: 1_000_000,
            max_rewards: 2_000_000,
            start_date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap(),
            updated_at: state.updated_at,
        }
    }
}

#[async_trait]
impl EventApi for BackendFake {
    async fn fetch_event(&self, event_key: &str) -> Result<ContributionRecord> {
        let state = self.state.lock().unwrap();
        Ok(Self::record(&state, event_key))
    }

    async fn increment(
        &self,
        event_key: &str,
        participant: &Participant,
    ) -> Result<IncrementResponse> {
        let mut state = self.state.lock().unwrap();
        let crowd = state.crowd_per_increment;
        state.total += 1 + crowd;
        state.updated_at += Duration::seconds(1);
        let own = state
            .per_participant
            .entry(participant.id().to_string())
            .or_insert(0);
        *own += 1;
        let user_contribution = *own;
        Ok(IncrementResponse {
            event: Self::record(&state, event_key),
            user_contribution,
        })
    }

    async fn fetch_participation(
        &self,
        _event_key: &str,
        participant: &Participant,
    ) -> Result<u64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .per_participant
            .get(participant.id())
            .copied()
            .unwrap_or(0))
    }

    async fn fetch_claim(&self, _event_key: &str, user_id: &str) -> Result<bool> {
        let state = self.state.lock().unwrap();
        Ok(state.claims.get(user_id).copied().unwrap_or(false))
    }

    async fn put_claim(&self, _event_key: &str, user_id: &str, claimed: bool) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.claims.insert(user_id.to_string(), claimed);
        Ok(())
    }
}

#[tokio::test]
async fn anonymous_participant_contributes_and_reconciles() {
    let backend = BackendFake::new();
    let store = MemoryStore::new();

    // Anonymous identity is created once and reused.
    let anon_id = get_or_create_anonymous_id(&store, "wild-area-challenge").await;
    assert_eq!(
        get_or_create_anonymous_id(&store, "wild-area-challenge").await,
        anon_id
    );

    let mut counter = ContributionCounter::new(
        "wild-area-challenge",
        Participant::Anonymous(anon_id),
    );
    counter.load(&backend).await.unwrap();
    assert_eq!(counter.global_count(), 500);
    assert_eq!(counter.user_contribution(), 0);

    // Each press adds our 1 plus the crowd's 7; the local view always
    // matches the server's authoritative total, not local arithmetic.
    counter.increment(&backend).await.unwrap();
    assert_eq!(counter.global_count(), 508);
    assert_eq!(counter.user_contribution(), 1);

    counter.increment(&backend).await.unwrap();
    assert_eq!(counter.global_count(), 516);
    assert_eq!(counter.user_contribution(), 2);

    // A fresh client for the same participant converges to the same view.
    let anon_id = get_or_create_anonymous_id(&store, "wild-area-challenge").await;
    let mut second =
        ContributionCounter::new("wild-area-challenge", Participant::Anonymous(anon_id));
    second.load(&backend).await.unwrap();
    assert_eq!(second.global_count(), 516);
    assert_eq!(second.user_contribution(), 2);
}

#[tokio::test]
async fn claim_flow_requires_a_session() {
    let backend = BackendFake::new();
    let mut tracker = ClaimTracker::new("wild-area-challenge");

    // Anonymous visitors cannot claim.
    let denied = tracker.toggle(&backend, None).await;
    assert!(matches!(denied, Err(EngineError::AuthRequired)));
    assert!(!tracker.claimed());

    // Signed in: claim sticks and survives a reload.
    assert!(tracker.toggle(&backend, Some("user-1")).await.unwrap());

    let mut reloaded = ClaimTracker::new("wild-area-challenge");
    reloaded.load(&backend, Some("user-1")).await.unwrap();
    assert!(reloaded.claimed());

    // Other accounts are unaffected.
    let mut other = ClaimTracker::new("wild-area-challenge");
    other.load(&backend, Some("user-2")).await.unwrap();
    assert!(!other.claimed());
}
