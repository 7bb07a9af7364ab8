use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use quotebook_core::{
    events::QuoteEventSink,
    quotes::{QuoteService, QuoteServiceTrait, SyncOptions},
    storage::{MemoryKeyValueStore, QuoteStorage},
};
use quotebook_remote::RemoteQuoteClient;
use quotebook_storage_file::build_file_store;

use crate::config::Config;

pub struct AppState {
    pub quote_service: Arc<dyn QuoteServiceTrait>,
}

/// Installs the global subscriber. Logs go to stderr so they never interleave
/// with quotes printed on stdout.
pub fn init_tracing() {
    let log_format = std::env::var("QB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_state(
    config: &Config,
    events: Arc<dyn QuoteEventSink>,
) -> anyhow::Result<Arc<AppState>> {
    let persistent = build_file_store(&config.data_dir);
    tracing::info!("Storage file in use: {}", persistent.path().display());

    // Session values live as long as the process.
    let storage = QuoteStorage::new(Arc::new(persistent), Arc::new(MemoryKeyValueStore::new()));

    let fetcher = RemoteQuoteClient::new(
        &config.server_url,
        config.fetch_limit,
        config.request_timeout,
    )?;
    tracing::info!(
        "Remote endpoint: {} (limit {})",
        fetcher.url(),
        fetcher.limit()
    );

    let quote_service = QuoteService::load(
        storage,
        Arc::new(fetcher),
        events,
        SyncOptions {
            push_on_sync: config.push_on_sync,
        },
    )?;

    Ok(Arc::new(AppState {
        quote_service: Arc::new(quote_service),
    }))
}
