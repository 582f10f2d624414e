use anyhow::Result;

use clap::{Parser, Subcommand};

use club_store::Store;

#[derive(Parser, Debug)]
#[clap(name = "club-setup")]
struct Cli {
    #[clap(default_value = "clubhouse.json")]
    pub data_file: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Init {
        /// Discard an existing data file and reseed
        #[clap(long)]
        force: bool,
    },
}

/// Initialize the data file with the demo roster
async fn data_init(filename: &str, force: bool) -> Result<()> {
    if force && std::path::Path::new(filename).exists() {
        std::fs::remove_file(filename)?;
    }
    Store::open(filename).await?;
    println!("Data file ready at {}.", filename);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => data_init(&cli.data_file, force).await?,
    }
    Ok(())
}
