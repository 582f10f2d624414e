use std::fs::File;

use anyhow::Result;
use clap::{Args, Subcommand};

use club_data::{Payment, PaymentFilter, Query};
use club_reports::{financial_summary, payments_csv};
use club_store::Store;

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Finance {
    /// Revenue, expenses and net balance
    #[clap(name = "summary")]
    Summary(ShowSummary),
    /// Export all payments as CSV
    #[clap(name = "export")]
    Export(ExportPayments),
}

impl Finance {
    pub async fn run(self, db: &Store) -> Result<()> {
        match self {
            Finance::Summary(cmd) => cmd.run(db).await,
            Finance::Export(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowSummary {}

impl ShowSummary {
    pub async fn run(self, db: &Store) -> Result<()> {
        let summary = financial_summary(db).await?;
        println!();
        summary.print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ExportPayments {
    /// Output file
    #[clap(short, long, default_value = "payments.csv")]
    pub output: String,
}

impl ExportPayments {
    pub async fn run(self, db: &Store) -> Result<()> {
        let payments: Vec<Payment> = db.query(&PaymentFilter::default()).await?;
        let file = File::create(&self.output)?;
        payments_csv(&payments, file)?;
        println!("{} payments written to {}.", payments.len(), self.output);
        Ok(())
    }
}
