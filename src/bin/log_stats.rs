//! Prints statistics about the nginx access logs stored in MongoDB.
//!
//! Connection settings come from `MONGO_URI`, `MONGO_DATABASE` and
//! `MONGO_COLLECTION`.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use page_cache::config::Config;
use page_cache::documents::{nginx_stats, MongoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the report on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "page_cache=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    let store = MongoStore::connect(
        &config.mongo_uri,
        &config.mongo_database,
        &config.mongo_collection,
    )
    .await
    .context("failed to open log collection")?;

    let stats = nginx_stats(&store)
        .await
        .context("failed to collect log statistics")?;
    print!("{}", stats);

    Ok(())
}
