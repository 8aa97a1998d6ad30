//! Per-event reward claim flag, gated on authentication.
//!
//! Claims are a cross-device, account-bound concept — unlike contribution
//! counts they are never recorded anonymously. The flag flips optimistically
//! for responsiveness and rolls back to its pre-toggle value on any server
//! rejection, including a late-discovered auth failure.

use tracing::warn;

use crate::api::EventApi;
use crate::errors::{EngineError, Result};

#[derive(Debug, Clone)]
pub struct ClaimTracker {
    event_key: String,
    claimed: bool,
}

impl ClaimTracker {
    pub fn new(event_key: impl Into<String>) -> Self {
        Self {
            event_key: event_key.into(),
            claimed: false,
        }
    }

    pub fn claimed(&self) -> bool {
        self.claimed
    }

    /// Read the current flag from the server.
    ///
    /// Without a session there is no claim to read; the flag stays false.
    /// On a fetch failure the prior value is kept and the error surfaced.
    pub async fn load(&mut self, api: &dyn EventApi, session: Option<&str>) -> Result<()> {
        let Some(user_id) = session else {
            self.claimed = false;
            return Ok(());
        };
        self.claimed = api.fetch_claim(&self.event_key, user_id).await?;
        Ok(())
    }

    /// Flip the claimed flag, last-write-wins against the server.
    ///
    /// Fails immediately with [`EngineError::AuthRequired`] when no session
    /// is available, so callers redirect to sign-in instead of silently
    /// recording an anonymous claim. Toggling twice restores the original
    /// value; no toggle history is queued.
    pub async fn toggle(&mut self, api: &dyn EventApi, session: Option<&str>) -> Result<bool> {
        let Some(user_id) = session else {
            return Err(EngineError::AuthRequired);
        };

        let previous = self.claimed;
        self.claimed = !previous;

        match api.put_claim(&self.event_key, user_id, self.claimed).await {
            Ok(()) => Ok(self.claimed),
            Err(e) => {
                warn!(
                    event_key = %self.event_key,
                    "claim toggle rejected, rolling back: {e}"
                );
                self.claimed = previous;
                Err(e)
            }
        }
    }
}
