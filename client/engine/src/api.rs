//! HTTP client for the companion backend's event endpoints.
//!
//! Every endpoint wraps its payload in a `{ success, data, error }`
//! envelope. Transport failures, `success: false` envelopes, and missing
//! payloads all collapse into the per-operation error variant (`Fetch` for
//! reads, `Increment` for the counter write) so callers branch on the
//! operation that failed, not on transport details. 401/403 pass through
//! as [`EngineError::AuthRequired`] untouched.
//!
//! Requests carry an explicit timeout (default 15s) so a hung request
//! becomes a failure instead of pending forever.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::errors::{EngineError, Result};
use crate::model::{ContributionRecord, Participant};

/// Response envelope shared by all endpoints.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// Payload of `POST /events/:eventKey/increment`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncrementResponse {
    /// Authoritative event record after the increment was applied.
    pub event: ContributionRecord,
    /// The caller's own contribution count after the increment.
    pub user_contribution: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParticipationResponse {
    contribution_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClaimResponse {
    claimed: bool,
}

/// Outbound boundary to the event backend.
///
/// Counter and claim logic depend on this trait rather than on a concrete
/// client, so tests drive them with in-process fakes.
#[async_trait]
pub trait EventApi: Send + Sync {
    /// `GET /events/:eventKey` — the authoritative counter record.
    async fn fetch_event(&self, event_key: &str) -> Result<ContributionRecord>;

    /// `POST /events/:eventKey/increment` — one server-side atomic
    /// increment attributed to `participant`.
    async fn increment(
        &self,
        event_key: &str,
        participant: &Participant,
    ) -> Result<IncrementResponse>;

    /// `GET /events/:eventKey/participation/...` — the participant's own
    /// contribution count.
    async fn fetch_participation(
        &self,
        event_key: &str,
        participant: &Participant,
    ) -> Result<u64>;

    /// Read the claimed flag for `(user_id, event_key)`.
    async fn fetch_claim(&self, event_key: &str, user_id: &str) -> Result<bool>;

    /// Write the claimed flag for `(user_id, event_key)`.
    async fn put_claim(&self, event_key: &str, user_id: &str, claimed: bool) -> Result<()>;
}

/// [`EventApi`] over HTTP with a shared [`reqwest::Client`].
pub struct HttpEventApi {
    client: Client,
    base_url: String,
}

impl HttpEventApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::unwrap_envelope(response).await
    }

    async fn post_data<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::unwrap_envelope(response).await
    }

    async fn put_data<T: DeserializeOwned>(&self, path: &str, body: &Value) -> Result<T> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::unwrap_envelope(response).await
    }

    async fn unwrap_envelope<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(EngineError::AuthRequired);
        }
        debug!("response status {status}");
        let envelope: ApiEnvelope<T> = response.json().await?;
        if !envelope.success {
            let message = envelope
                .error
                .unwrap_or_else(|| "server reported failure".to_string());
            return Err(EngineError::Fetch(message));
        }
        envelope
            .data
            .ok_or_else(|| EngineError::Fetch("empty data in successful envelope".to_string()))
    }
}

/// Re-tag an error as a fetch failure, preserving the auth signal.
fn as_fetch(e: EngineError) -> EngineError {
    match e {
        EngineError::AuthRequired => EngineError::AuthRequired,
        already @ EngineError::Fetch(_) => already,
        other => EngineError::Fetch(other.to_string()),
    }
}

/// Re-tag an error as an increment failure, preserving the auth signal.
fn as_increment(e: EngineError) -> EngineError {
    match e {
        EngineError::AuthRequired => EngineError::AuthRequired,
        EngineError::Fetch(msg) => EngineError::Increment(msg),
        other => EngineError::Increment(other.to_string()),
    }
}

fn increment_body(participant: &Participant) -> Value {
    match participant {
        Participant::User(id) => json!({ "userId": id }),
        Participant::Anonymous(id) => json!({ "anonymousId": id }),
    }
}

#[async_trait]
impl EventApi for HttpEventApi {
    async fn fetch_event(&self, event_key: &str) -> Result<ContributionRecord> {
        self.get_data(&format!("/events/{event_key}"))
            .await
            .map_err(as_fetch)
    }

    async fn increment(
        &self,
        event_key: &str,
        participant: &Participant,
    ) -> Result<IncrementResponse> {
        self.post_data(
            &format!("/events/{event_key}/increment"),
            &increment_body(participant),
        )
        .await
        .map_err(as_increment)
    }

    async fn fetch_participation(
        &self,
        event_key: &str,
        participant: &Participant,
    ) -> Result<u64> {
        let path = match participant {
            Participant::User(id) => format!("/events/{event_key}/participation/{id}"),
            Participant::Anonymous(id) => {
                format!("/events/{event_key}/participation/anonymous/{id}")
            }
        };
        let payload: ParticipationResponse = self.get_data(&path).await.map_err(as_fetch)?;
        Ok(payload.contribution_count)
    }

    async fn fetch_claim(&self, event_key: &str, user_id: &str) -> Result<bool> {
        let payload: ClaimResponse = self
            .get_data(&format!("/events/{event_key}/claim/{user_id}"))
            .await
            .map_err(as_fetch)?;
        Ok(payload.claimed)
    }

    async fn put_claim(&self, event_key: &str, user_id: &str, claimed: bool) -> Result<()> {
        let _: ClaimResponse = self
            .put_data(
                &format!("/events/{event_key}/claim/{user_id}"),
                &json!({ "claimed": claimed }),
            )
            .await
            .map_err(as_fetch)?;
        Ok(())
    }
}
