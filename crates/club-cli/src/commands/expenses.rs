use anyhow::{anyhow, Result};
use chrono::{NaiveDate, Utc};
use clap::{Args, Subcommand};

use club_data::{Expense, ExpenseCategory, ExpenseFilter, Insert, Query};
use club_session::SessionStore;
use club_store::Store;

use crate::formatting::PrintFormatted;

fn parse_category(value: &str) -> Result<ExpenseCategory> {
    match value {
        "equipment" => Ok(ExpenseCategory::Equipment),
        "maintenance" => Ok(ExpenseCategory::Maintenance),
        "event" => Ok(ExpenseCategory::Event),
        "other" => Ok(ExpenseCategory::Other),
        _ => Err(anyhow!("unknown expense category: {}", value)),
    }
}

#[derive(Subcommand, Debug)]
pub enum Expenses {
    /// List expenses
    #[clap(name = "list")]
    List(ListExpenses),
    /// Add an expense
    #[clap(name = "add")]
    Add(AddExpense),
}

impl Expenses {
    pub async fn run(self, db: &Store, sessions: &SessionStore) -> Result<()> {
        match self {
            Expenses::List(cmd) => cmd.run(db).await,
            Expenses::Add(cmd) => cmd.run(db, sessions).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListExpenses {
    #[clap(short, long)]
    pub id: Option<String>,
    #[clap(short, long)]
    pub category: Option<String>,
}

impl ListExpenses {
    pub async fn run(self, db: &Store) -> Result<()> {
        let filter = ExpenseFilter {
            id: self.id,
            category: self.category.as_deref().map(parse_category).transpose()?,
        };

        let expenses: Vec<Expense> = db.query(&filter).await?;
        println!("{} expenses.", expenses.len());
        expenses.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddExpense {
    #[clap(short, long)]
    pub description: String,
    #[clap(short, long)]
    pub amount: f64,
    #[clap(short, long, default_value = "other")]
    pub category: String,
    /// Expense date as YYYY-MM-DD, today when omitted
    #[clap(long)]
    pub date: Option<NaiveDate>,
}

impl AddExpense {
    /// Run the command and record an expense against the logged-in admin
    pub async fn run(self, db: &Store, sessions: &SessionStore) -> Result<()> {
        let admin = sessions
            .current()
            .ok_or_else(|| anyhow!("Not logged in. Run \"club account login\" first."))?;
        if !admin.is_admin() {
            return Err(anyhow!("This command needs an admin login."));
        }

        let expense = db
            .insert(Expense {
                description: self.description,
                amount: self.amount,
                category: parse_category(&self.category)?,
                date: self.date.unwrap_or_else(|| Utc::now().date_naive()),
                added_by: admin.id,
                ..Default::default()
            })
            .await?;
        println!("Expense added with id {}.", expense.id);

        Ok(())
    }
}
