use std::time::Duration;

use anyhow::Result;

use club_session::SessionStore;
use club_store::Store;

mod cli;
mod commands;
mod formatting;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::init();

    let store = Store::open(&cli.data)
        .await?
        .with_latency(Duration::from_millis(cli.latency_ms));
    let sessions = SessionStore::open(&cli.session_dir)?;
    match cli.command {
        Command::Members(cmd) => cmd.run(&store).await,
        Command::Payments(cmd) => cmd.run(&store, &sessions).await,
        Command::Events(cmd) => cmd.run(&store).await,
        Command::Expenses(cmd) => cmd.run(&store, &sessions).await,
        Command::Finance(cmd) => cmd.run(&store).await,
        Command::Qr(cmd) => cmd.run(&store).await,
        Command::Account(cmd) => cmd.run(&store, &sessions).await,
        Command::Dashboard(cmd) => cmd.run(&store, &sessions).await,
    }?;

    Ok(())
}
