use std::sync::Arc;

use clap::Parser;
use tokio::io::BufReader;

use quotebook_cli::{
    build_state,
    commands::{self, Cli, Command},
    config::Config,
    init_tracing,
    notifications::{drain, TerminalEventSink},
    scheduler,
    session::Session,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    init_tracing();

    let (sink, mut notifications) = TerminalEventSink::channel();
    let state = build_state(&config, Arc::new(sink))?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let sync = scheduler::start_sync_scheduler(
                state.quote_service.clone(),
                config.sync_interval,
            );
            let session = Session::new(state.clone(), notifications, tokio::io::stdout());
            let result = session.run(BufReader::new(tokio::io::stdin())).await;
            sync.abort();
            result?;
        }
        command => {
            let output = commands::execute(&state, command).await;
            for event in drain(&mut notifications) {
                eprintln!("{}", event.message());
            }
            println!("{}", output?);
        }
    }
    Ok(())
}
