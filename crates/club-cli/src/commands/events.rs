use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use club_data::{Event, EventFilter, EventKind, Insert, Query};
use club_reports::{event_payment_status, unpaid_members};
use club_store::Store;

use crate::formatting::PrintFormatted;

fn parse_kind(value: &str) -> Result<EventKind> {
    match value {
        "tournament" => Ok(EventKind::Tournament),
        "training" => Ok(EventKind::Training),
        "social" => Ok(EventKind::Social),
        _ => Err(anyhow!("unknown event type: {}", value)),
    }
}

#[derive(Subcommand, Debug)]
pub enum Events {
    /// List events
    #[clap(name = "list")]
    List(ListEvents),
    /// Add an event
    #[clap(name = "add")]
    Add(AddEvent),
    /// Payment standing of active members for an event
    #[clap(name = "status")]
    Status(EventStatus),
    /// Remind members with an open event payment
    #[clap(name = "notify")]
    Notify(NotifyUnpaid),
}

impl Events {
    pub async fn run(self, db: &Store) -> Result<()> {
        match self {
            Events::List(cmd) => cmd.run(db).await,
            Events::Add(cmd) => cmd.run(db).await,
            Events::Status(cmd) => cmd.run(db).await,
            Events::Notify(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListEvents {
    #[clap(short, long)]
    pub id: Option<String>,
    #[clap(short, long)]
    pub kind: Option<String>,
}

impl ListEvents {
    /// Run the command and list events, soonest first
    pub async fn run(self, db: &Store) -> Result<()> {
        let filter = EventFilter {
            id: self.id,
            kind: self.kind.as_deref().map(parse_kind).transpose()?,
        };

        let events: Vec<Event> = db.query(&filter).await?;
        println!("{} events.", events.len());
        events.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddEvent {
    #[clap(short, long)]
    pub title: String,
    /// Event date as YYYY-MM-DD
    #[clap(short, long)]
    pub date: NaiveDate,
    /// Start time, e.g. 18:30
    #[clap(long, default_value = "")]
    pub time: String,
    #[clap(short, long, default_value = "")]
    pub venue: String,
    #[clap(long, default_value = "")]
    pub description: String,
    #[clap(short, long, default_value = "training")]
    pub kind: String,
}

impl AddEvent {
    /// Run the command and add an event
    pub async fn run(self, db: &Store) -> Result<()> {
        let event = db
            .insert(Event {
                title: self.title,
                date: self.date,
                time: self.time,
                venue: self.venue,
                description: self.description,
                kind: parse_kind(&self.kind)?,
                ..Default::default()
            })
            .await?;

        println!();
        event.print_formatted();
        println!();
        println!("Event added with id {}.", event.id);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct EventStatus {
    #[clap(short, long)]
    pub id: String,
}

impl EventStatus {
    pub async fn run(self, db: &Store) -> Result<()> {
        let statuses = event_payment_status(db, &self.id).await?;
        statuses.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct NotifyUnpaid {
    #[clap(short, long)]
    pub id: String,
}

impl NotifyUnpaid {
    /// Run the command and print one reminder per unpaid member
    pub async fn run(self, db: &Store) -> Result<()> {
        let unpaid = unpaid_members(db, &self.id).await?;
        if unpaid.is_empty() {
            println!("Everyone has paid.");
            return Ok(());
        }
        for member in &unpaid {
            println!(
                "Reminder sent to {}: payment for event {} is {}.",
                member.member_name,
                self.id,
                member.describe()
            );
        }
        println!("{} reminders sent.", unpaid.len());
        Ok(())
    }
}
