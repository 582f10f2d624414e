use clap::{Parser, Subcommand};

use crate::commands::{
    Account, Events, Expenses, Finance, Members, Payments, Qr, ShowDashboard,
};

#[derive(Parser, Debug)]
#[clap(name = "club", version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Path to the club data file
    #[clap(long, default_value = "clubhouse.json", env = "CLUBHOUSE_DATA")]
    pub data: String,

    /// Directory holding the cached login
    #[clap(long, default_value = ".clubhouse", env = "CLUBHOUSE_SESSION_DIR")]
    pub session_dir: String,

    /// Simulated backend latency in milliseconds
    #[clap(long, default_value_t = 0, env = "CLUBHOUSE_LATENCY_MS")]
    pub latency_ms: u64,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage the membership roster
    #[clap(subcommand)]
    Members(Members),
    /// Manage payment requests and verification
    #[clap(subcommand)]
    Payments(Payments),
    /// Manage club events
    #[clap(subcommand)]
    Events(Events),
    /// Manage club expenses
    #[clap(subcommand)]
    Expenses(Expenses),
    /// Financial reports
    #[clap(subcommand)]
    Finance(Finance),
    /// Payment QR code shown to members
    #[clap(subcommand)]
    Qr(Qr),
    /// Login, registration and password management
    #[clap(subcommand)]
    Account(Account),
    /// Overview for the logged-in user
    Dashboard(ShowDashboard),
}
