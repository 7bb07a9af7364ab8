use std::path::{Path, PathBuf};

use anyhow::bail;
use clap::{Parser, Subcommand};

use quotebook_core::{
    errors::ImportError,
    quotes::{ImportResult, SyncOutcome, DEFAULT_EXPORT_FILE},
};

use crate::main_lib::AppState;
use crate::render::{category_list, quote_panel};

#[derive(Parser, Debug)]
#[command(author, version, about = "Quote collection with periodic server sync")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the interactive session with background sync (default).
    Run,
    /// Print a random quote from the active category.
    Show,
    /// Add a quote to the collection.
    Add {
        /// Quote text.
        text: String,
        /// Category to file the quote under.
        #[arg(short, long)]
        category: String,
    },
    /// List the categories.
    Categories,
    /// Select a category filter; omit the name to show all categories.
    Filter { category: Option<String> },
    /// Write the collection to a JSON file.
    Export {
        /// Destination file (defaults to quotes.json).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Add quotes from a JSON file.
    Import { file: PathBuf },
    /// Run one sync cycle against the server now.
    Sync,
}

/// Runs a one-shot command and returns what should be printed.
pub async fn execute(state: &AppState, command: Command) -> anyhow::Result<String> {
    let service = &state.quote_service;

    match command {
        Command::Run => bail!("the interactive session is not a one-shot command"),
        Command::Show => {
            let quote = service.show_random_quote().await?;
            Ok(quote_panel(quote.as_ref(), false))
        }
        Command::Add { text, category } => match service.add_quote(&text, &category).await? {
            Some(quote) => Ok(quote_panel(Some(&quote), false)),
            None => bail!("both the quote text and a category are required"),
        },
        Command::Categories => {
            let categories = service.categories().await;
            let active = service.active_category().await?;
            Ok(category_list(&categories, &active))
        }
        Command::Filter { category } => {
            let category = category.unwrap_or_default();
            let quote = service.select_category(category.trim()).await?;
            let categories = service.categories().await;
            let active = service.active_category().await?;
            Ok(format!(
                "{}\n{}",
                category_list(&categories, &active),
                quote_panel(quote.as_ref(), false)
            ))
        }
        Command::Export { output } => {
            let path = output.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
            let count = export_to_file(state, &path).await?;
            Ok(format!("Exported {} quotes to {}", count, path.display()))
        }
        Command::Import { file } => {
            let result = import_from_file(state, &file).await?;
            Ok(import_summary(&result))
        }
        Command::Sync => match service.sync_with_remote().await? {
            SyncOutcome::Completed(report) => Ok(report.summary()),
            SyncOutcome::AlreadyRunning => Ok("A sync is already running.".to_string()),
        },
    }
}

/// Writes the exported collection to `path`, returning the number of quotes.
pub async fn export_to_file(state: &AppState, path: &Path) -> anyhow::Result<usize> {
    let json = state.quote_service.export_json().await?;
    tokio::fs::write(path, &json).await?;
    let count = state.quote_service.all_quotes().await.len();
    tracing::info!("Exported {} quotes to {}", count, path.display());
    Ok(count)
}

/// Reads `path` and imports its contents.
pub async fn import_from_file(
    state: &AppState,
    path: &Path,
) -> quotebook_core::Result<ImportResult> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ImportError::Io(format!("{}: {}", path.display(), e)))?;
    state.quote_service.import_json(&raw).await
}

pub fn import_summary(result: &ImportResult) -> String {
    format!(
        "Imported {} quotes ({} duplicates, {} incomplete entries skipped)",
        result.added, result.duplicates, result.incomplete
    )
}
