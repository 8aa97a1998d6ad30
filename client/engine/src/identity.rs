//! Anonymous participant identity.
//!
//! A participant without a session still gets a stable pseudo-id so their
//! contribution count survives restarts. The id is keyed **per event** —
//! deliberately, so a participant's anonymous identity for one event
//! carries no linkage to another. Tokens are best-effort community
//! metrics, not verified identity; nothing server-side checks them.

use chrono::Utc;
use tracing::warn;

use crate::store::LocalStore;

/// Storage key for the anonymous id of one event.
pub fn storage_key(event_key: &str) -> String {
    format!("anonymous_id_{event_key}")
}

/// Return the persisted anonymous id for `event_key`, creating and storing
/// one on first call.
///
/// Storage failure degrades to a fresh ephemeral id per call instead of
/// erroring — anonymous counts are best-effort, and a session-scoped id
/// still lets the current visit contribute.
pub async fn get_or_create_anonymous_id(store: &dyn LocalStore, event_key: &str) -> String {
    let key = storage_key(event_key);
    match store.get(&key).await {
        Ok(Some(existing)) => existing,
        Ok(None) => {
            let id = generate_token();
            if let Err(e) = store.put(&key, &id).await {
                warn!("could not persist anonymous id for {event_key}: {e}");
            }
            id
        }
        Err(e) => {
            warn!("local storage unavailable, using ephemeral anonymous id: {e}");
            generate_token()
        }
    }
}

/// Millisecond timestamp plus random bytes — enough entropy to avoid
/// collisions across concurrent devices.
fn generate_token() -> String {
    let millis = Utc::now().timestamp_millis();
    let noise: [u8; 8] = rand::random();
    format!("{millis:x}-{}", hex::encode(noise))
}
