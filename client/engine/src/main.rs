//! Event probe — CLI entry point.
//!
//! Fetches the authoritative counter record for one event key, resolves an
//! anonymous identity from the local store, and prints progress and bonus
//! tier information. Handy for poking a backend without the app UI.

use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use event_engine::{
    counter, get_or_create_anonymous_id, Config, ContributionCounter, EventApi, HttpEventApi,
    Participant, SqliteStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;

    let event_key = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: event-probe <event-key>"))?;

    let store = SqliteStore::open(&config.database_url).await?;
    let api = HttpEventApi::new(
        &config.api_base_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;

    let anonymous_id = get_or_create_anonymous_id(&store, &event_key).await;
    info!("Participating as anonymous id {anonymous_id}");

    let mut contribution =
        ContributionCounter::new(&event_key, Participant::Anonymous(anonymous_id));
    contribution.load(&api).await?;

    let record = api.fetch_event(&event_key).await?;
    println!("event:        {event_key}");
    println!("global count: {}", contribution.global_count());
    println!("your count:   {}", contribution.user_contribution());
    println!(
        "progress:     {:.3}%",
        counter::progress_percentage(contribution.global_count(), record.target_count)
    );
    println!(
        "bonus tiers:  {}",
        counter::bonus_reward_tier(
            contribution.global_count(),
            record.target_count,
            record.max_rewards
        )
    );

    Ok(())
}
