//! Interactive line-oriented session.
//!
//! Reads one command per line and prints quotes, the category list and
//! notifications. Notifications raised by background sync cycles are printed
//! as they arrive; those raised by a command are printed right after its
//! output.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use quotebook_core::{
    events::QuoteEvent,
    quotes::{SyncOutcome, DEFAULT_EXPORT_FILE},
    Error,
};

use crate::commands::{export_to_file, import_from_file, import_summary};
use crate::main_lib::AppState;
use crate::notifications::{drain, NotificationReceiver};
use crate::render::{category_list, quote_panel};

pub const HELP: &str = "\
Commands:
  next | n                  show a random quote (also: empty line)
  last                      show the last viewed quote
  add <text> | <category>   add a quote
  filter [category]         filter by category; no name shows all
  categories                list categories
  export [file]             export quotes as JSON (default quotes.json)
  import <file>             import quotes from a JSON file
  sync                      sync with the server now
  help                      show this help
  quit | exit               leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Next,
    Last,
    Add { text: String, category: String },
    Filter(String),
    Categories,
    Export(PathBuf),
    Import(PathBuf),
    Sync,
    Help,
    Quit,
}

/// Parses one input line. The error is a message for the user.
pub fn parse_line(line: &str) -> Result<SessionCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" | "n" | "next" => Ok(SessionCommand::Next),
        "last" => Ok(SessionCommand::Last),
        "add" => match rest.rsplit_once('|') {
            Some((text, category)) => Ok(SessionCommand::Add {
                text: text.to_string(),
                category: category.to_string(),
            }),
            None => Err("Usage: add <text> | <category>".to_string()),
        },
        "filter" => Ok(SessionCommand::Filter(rest.to_string())),
        "categories" => Ok(SessionCommand::Categories),
        "export" => Ok(SessionCommand::Export(PathBuf::from(if rest.is_empty() {
            DEFAULT_EXPORT_FILE
        } else {
            rest
        }))),
        "import" if rest.is_empty() => Err("Usage: import <file>".to_string()),
        "import" => Ok(SessionCommand::Import(PathBuf::from(rest))),
        "sync" => Ok(SessionCommand::Sync),
        "help" | "?" => Ok(SessionCommand::Help),
        "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
        other => Err(format!("Unknown command '{}'. Type 'help' for commands.", other)),
    }
}

pub struct Session<W> {
    state: Arc<AppState>,
    notifications: NotificationReceiver,
    out: W,
}

impl<W: AsyncWrite + Unpin> Session<W> {
    pub fn new(state: Arc<AppState>, notifications: NotificationReceiver, out: W) -> Self {
        Self {
            state,
            notifications,
            out,
        }
    }

    /// Runs until `quit` or end of input, then hands back the writer.
    pub async fn run<R>(mut self, input: R) -> anyhow::Result<W>
    where
        R: AsyncBufRead + Unpin,
    {
        self.open().await?;

        let mut lines = input.lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match parse_line(&line) {
                        Ok(SessionCommand::Quit) => break,
                        Ok(command) => self.handle(command).await?,
                        Err(message) => self.print(&message).await?,
                    }
                    self.flush_notifications().await?;
                }
                Some(event) = self.notifications.recv() => {
                    self.notify(event).await?;
                }
            }
        }

        self.flush_notifications().await?;
        self.out.flush().await?;
        Ok(self.out)
    }

    /// Initial view: the category list, then a quote from the restored
    /// filter, the last viewed quote, or a random one.
    async fn open(&mut self) -> anyhow::Result<()> {
        let service = self.state.quote_service.clone();
        let categories = self.category_view().await;
        self.print(&categories).await?;

        let filtered = matches!(
            service.active_category().await,
            Ok(active) if !active.is_empty()
        );
        if !filtered {
            if let Ok(Some(last)) = service.last_viewed_quote() {
                return self.print(&quote_panel(Some(&last), true)).await;
            }
        }
        let panel = match service.show_random_quote().await {
            Ok(quote) => quote_panel(quote.as_ref(), false),
            Err(e) => format!("Error: {}", e),
        };
        self.print(&panel).await
    }

    /// The category list, or the error that prevented reading the filter.
    async fn category_view(&self) -> String {
        let service = &self.state.quote_service;
        match service.active_category().await {
            Ok(active) => category_list(&service.categories().await, &active),
            Err(e) => format!("Error: {}", e),
        }
    }

    async fn handle(&mut self, command: SessionCommand) -> anyhow::Result<()> {
        let service = self.state.quote_service.clone();

        let output = match command {
            SessionCommand::Next => match service.show_random_quote().await {
                Ok(quote) => quote_panel(quote.as_ref(), false),
                Err(e) => format!("Error: {}", e),
            },
            SessionCommand::Last => match service.last_viewed_quote() {
                Ok(Some(quote)) => quote_panel(Some(&quote), true),
                Ok(None) => "No quote viewed yet in this session.".to_string(),
                Err(e) => format!("Error: {}", e),
            },
            SessionCommand::Add { text, category } => {
                match service.add_quote(&text, &category).await {
                    Ok(Some(quote)) => quote_panel(Some(&quote), false),
                    Ok(None) => "Please enter both a quote and a category.".to_string(),
                    Err(e) => format!("Error: {}", e),
                }
            }
            SessionCommand::Filter(category) => match service.select_category(&category).await {
                Ok(quote) => format!(
                    "{}\n{}",
                    self.category_view().await,
                    quote_panel(quote.as_ref(), false)
                ),
                Err(Error::UnknownCategory(name)) => format!("No such category: {}", name),
                Err(e) => format!("Error: {}", e),
            },
            SessionCommand::Categories => self.category_view().await,
            SessionCommand::Export(path) => match export_to_file(&self.state, &path).await {
                Ok(count) => format!("Exported {} quotes to {}", count, path.display()),
                Err(e) => format!("Export failed: {}", e),
            },
            SessionCommand::Import(path) => match import_from_file(&self.state, &path).await {
                Ok(result) => import_summary(&result),
                Err(Error::Import(e)) => format!("Invalid file format: {}", e),
                Err(e) => format!("Error: {}", e),
            },
            SessionCommand::Sync => match service.sync_with_remote().await {
                Ok(SyncOutcome::Completed(report)) => report.summary(),
                Ok(SyncOutcome::AlreadyRunning) => "A sync is already running.".to_string(),
                Err(e) => format!("Sync failed: {}", e),
            },
            SessionCommand::Help => HELP.to_string(),
            SessionCommand::Quit => return Ok(()),
        };

        self.print(&output).await
    }

    async fn flush_notifications(&mut self) -> anyhow::Result<()> {
        for event in drain(&mut self.notifications) {
            self.notify(event).await?;
        }
        Ok(())
    }

    async fn notify(&mut self, event: QuoteEvent) -> anyhow::Result<()> {
        self.print(&format!("* {}", event.message())).await?;

        // NewQuoteFromServer always arrives ahead of its QuotesSynced.
        let refresh = match &event {
            QuoteEvent::NewQuoteFromServer { .. } => false,
            other => other.changes_collection(),
        };
        if refresh {
            let categories = self.category_view().await;
            self.print(&categories).await?;
        }
        Ok(())
    }

    async fn print(&mut self, text: &str) -> anyhow::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }
}
