//! # Event Lifecycle & Contribution Engine
//!
//! Client-side core of the companion app's promotional events: classifies
//! an event into a lifecycle state from wall-clock time, and keeps a shared
//! community contribution counter and a per-user claim flag reconciled
//! against the authoritative backend.
//!
//! | Concern            | Module                           |
//! |--------------------|----------------------------------|
//! | Event definitions  | [`model`]                        |
//! | Lifecycle states   | [`status`] (pure, no I/O)        |
//! | Countdown text     | [`countdown`]                    |
//! | Contribution count | [`counter`]                      |
//! | Claim flag         | [`claim`]                        |
//! | Anonymous identity | [`identity`] over [`store`]      |
//! | HTTP boundary      | [`api`]                          |
//!
//! The resolver in [`status`] never touches the network; everything that
//! does goes through the [`api::EventApi`] trait so it can be driven by
//! fakes in tests. Persistence, auth, and rendering are external
//! collaborators — this crate only consumes their interfaces.

pub mod api;
pub mod claim;
pub mod config;
pub mod countdown;
pub mod counter;
pub mod errors;
pub mod identity;
pub mod model;
pub mod status;
pub mod store;

pub use api::{EventApi, HttpEventApi, IncrementResponse};
pub use claim::ClaimTracker;
pub use config::Config;
pub use counter::{bonus_reward_tier, progress_percentage, ContributionCounter};
pub use errors::{EngineError, Result};
pub use identity::get_or_create_anonymous_id;
pub use model::{ContributionRecord, Event, Participant};
pub use status::EventStatus;
pub use store::{LocalStore, MemoryStore, SqliteStore};
