use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};

use club_store::Store;

#[derive(Subcommand, Debug)]
pub enum Qr {
    /// Show the payment destination
    #[clap(name = "show")]
    Show(ShowQr),
    /// Set the payment destination
    #[clap(name = "set")]
    Set(SetQr),
}

impl Qr {
    pub async fn run(self, db: &Store) -> Result<()> {
        match self {
            Qr::Show(cmd) => cmd.run(db).await,
            Qr::Set(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowQr {}

impl ShowQr {
    pub async fn run(self, db: &Store) -> Result<()> {
        let value = db.qr_code().await;
        if value.is_empty() {
            println!("No payment QR code configured.");
        } else {
            println!("{}", value);
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct SetQr {
    /// Store this value directly, e.g. a data url
    #[clap(short, long, conflicts_with_all = ["upi_id", "payee"])]
    pub url: Option<String>,
    /// UPI id to build a upi://pay link from
    #[clap(long, requires = "payee")]
    pub upi_id: Option<String>,
    /// Payee name for the upi://pay link
    #[clap(long)]
    pub payee: Option<String>,
}

impl SetQr {
    pub async fn run(self, db: &Store) -> Result<()> {
        let value = match (self.url, self.upi_id, self.payee) {
            (Some(url), _, _) => url,
            (None, Some(upi_id), Some(payee)) => {
                format!("upi://pay?pa={}&pn={}", upi_id, payee)
            }
            _ => return Err(anyhow!("Pass --url, or --upi-id together with --payee.")),
        };
        db.set_qr_code(&value).await?;
        println!("Payment QR code updated.");
        Ok(())
    }
}
