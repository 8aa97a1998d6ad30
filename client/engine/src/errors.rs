//! Engine-wide error types.
//!
//! Expected conditions (network failure, missing session, unavailable
//! storage) are surfaced as distinct variants so callers can branch on them;
//! they are never panics.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Reading counts or claim state failed. Callers keep their last-known
    /// values and offer a retry — counts must never reset to zero on this.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The increment round-trip failed. No local state was mutated; retry
    /// is manual (re-press), never automatic.
    #[error("increment failed: {0}")]
    Increment(String),

    /// The operation needs an authenticated session. Callers redirect to
    /// sign-in instead of showing a generic failure.
    #[error("authentication required")]
    AuthRequired,

    /// Device-local storage failure.
    #[error("local storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Malformed event definition (overlapping raid periods, inverted
    /// distribution window, missing env var).
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed server payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
