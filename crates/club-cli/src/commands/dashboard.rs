use anyhow::{anyhow, Result};
use clap::Args;

use club_reports::dashboard_stats;
use club_session::SessionStore;
use club_store::Store;

use crate::formatting::PrintFormatted;

#[derive(Args, Debug)]
pub struct ShowDashboard {}

impl ShowDashboard {
    /// Run the command and show the overview for the logged-in user
    pub async fn run(self, db: &Store, sessions: &SessionStore) -> Result<()> {
        let user = sessions
            .current()
            .ok_or_else(|| anyhow!("Not logged in. Run \"club account login\" first."))?;

        let stats = dashboard_stats(db, &user).await?;
        println!();
        println!("Welcome back, {}.", user.name);
        println!();
        stats.print_formatted();
        println!();

        Ok(())
    }
}
