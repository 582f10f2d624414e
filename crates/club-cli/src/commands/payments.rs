use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;

use club_data::{
    BulkPaymentRequest, Payment, PaymentFilter, PaymentRequest, PaymentStatus, Query, Retrieve,
    User, UserFilter, UserStatus,
};
use club_session::SessionStore;
use club_store::Store;

use crate::formatting::PrintFormatted;

fn parse_payment_status(value: &str) -> Result<PaymentStatus> {
    match value {
        "paid" => Ok(PaymentStatus::Paid),
        "pending" => Ok(PaymentStatus::Pending),
        "overdue" => Ok(PaymentStatus::Overdue),
        "cancelled" => Ok(PaymentStatus::Cancelled),
        _ => Err(anyhow!("unknown payment status: {}", value)),
    }
}

fn to_due_date(date: NaiveDate) -> chrono::DateTime<chrono::Utc> {
    date.and_hms_opt(0, 0, 0).unwrap().and_utc()
}

fn require_admin(sessions: &SessionStore) -> Result<User> {
    let user = sessions
        .current()
        .ok_or_else(|| anyhow!("Not logged in. Run \"club account login\" first."))?;
    if !user.is_admin() {
        return Err(anyhow!("This command needs an admin login."));
    }
    Ok(user)
}

#[derive(Subcommand, Debug)]
pub enum Payments {
    /// List payments
    #[clap(name = "list")]
    List(ListPayments),
    /// Show a payment
    #[clap(name = "show")]
    Show(ShowPayment),
    /// Request a payment from one member
    #[clap(name = "request")]
    Request(RequestPayment),
    /// Request the same payment from many members
    #[clap(name = "bulk")]
    Bulk(BulkRequest),
    /// Attach a proof of payment
    #[clap(name = "proof")]
    Proof(SubmitProof),
    /// Approve or reject a payment proof
    #[clap(name = "verify")]
    Verify(VerifyPayment),
    /// The five most recently paid payments
    #[clap(name = "recent")]
    Recent(RecentPayments),
    /// Payments waiting for verification
    #[clap(name = "queue")]
    Queue(VerificationQueue),
}

impl Payments {
    pub async fn run(self, db: &Store, sessions: &SessionStore) -> Result<()> {
        match self {
            Payments::List(cmd) => cmd.run(db).await,
            Payments::Show(cmd) => cmd.run(db).await,
            Payments::Request(cmd) => cmd.run(db, sessions).await,
            Payments::Bulk(cmd) => cmd.run(db, sessions).await,
            Payments::Proof(cmd) => cmd.run(db).await,
            Payments::Verify(cmd) => cmd.run(db, sessions).await,
            Payments::Recent(cmd) => cmd.run(db).await,
            Payments::Queue(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListPayments {
    #[clap(short, long)]
    pub id: Option<String>,
    #[clap(short, long)]
    pub user: Option<String>,
    #[clap(short, long)]
    pub status: Option<String>,
    #[clap(short, long)]
    pub event: Option<String>,
    /// Only payments with a proof attached
    #[clap(short, long)]
    pub proof: bool,
}

impl ListPayments {
    /// Run the command and list payments, newest first
    pub async fn run(self, db: &Store) -> Result<()> {
        let filter = PaymentFilter {
            id: self.id,
            user_id: self.user,
            status: self.status.as_deref().map(parse_payment_status).transpose()?,
            event_id: self.event,
            has_proof: self.proof.then_some(true),
        };

        let payments: Vec<Payment> = db.query(&filter).await?;
        println!("{} payments.", payments.len());
        payments.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ShowPayment {
    #[clap(short, long)]
    pub id: String,
}

impl ShowPayment {
    pub async fn run(self, db: &Store) -> Result<()> {
        let payment: Payment = db.retrieve(self.id).await?;
        println!();
        payment.print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct RequestPayment {
    /// Member to bill
    #[clap(short, long)]
    pub user: String,
    /// Payment type, e.g. membership, event or fine
    #[clap(short, long)]
    pub kind: String,
    #[clap(short, long)]
    pub amount: f64,
    /// Due date as YYYY-MM-DD
    #[clap(short, long)]
    pub due: NaiveDate,
    /// Event this payment belongs to
    #[clap(short, long)]
    pub event: Option<String>,
}

impl RequestPayment {
    /// Run the command and issue a payment request
    pub async fn run(self, db: &Store, sessions: &SessionStore) -> Result<()> {
        require_admin(sessions)?;

        let payment = db
            .create_request(PaymentRequest {
                user_id: self.user,
                kind: self.kind,
                amount: self.amount,
                due_date: to_due_date(self.due),
                event_id: self.event,
            })
            .await?;

        println!();
        payment.print_formatted();
        println!();
        println!("Payment requested with id {}.", payment.id);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct BulkRequest {
    /// Member ids, comma separated
    #[clap(short, long, value_delimiter = ',', conflicts_with = "all_active")]
    pub ids: Vec<String>,
    /// Bill every active member instead
    #[clap(long)]
    pub all_active: bool,
    #[clap(short, long)]
    pub kind: String,
    #[clap(short, long)]
    pub amount: f64,
    /// Due date as YYYY-MM-DD
    #[clap(short, long)]
    pub due: NaiveDate,
}

impl BulkRequest {
    /// Run the command and issue one request per selected member
    pub async fn run(self, db: &Store, sessions: &SessionStore) -> Result<()> {
        require_admin(sessions)?;

        let user_ids = if self.all_active {
            let members: Vec<User> = db
                .query(&UserFilter {
                    status: Some(UserStatus::Active),
                    ..Default::default()
                })
                .await?;
            members.into_iter().map(|m| m.id).collect()
        } else {
            self.ids
        };
        if user_ids.is_empty() {
            return Err(anyhow!("No members selected."));
        }

        let prompt_msg = format!(
            "Request {} of {:.2} from {} members?",
            self.kind,
            self.amount,
            user_ids.len()
        );
        let confirm = Confirm::new(&prompt_msg).with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let created = db
            .create_bulk_requests(BulkPaymentRequest {
                user_ids,
                kind: self.kind,
                amount: self.amount,
                due_date: to_due_date(self.due),
            })
            .await?;
        println!("{} payments requested.", created.len());
        created.print_formatted();

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct SubmitProof {
    #[clap(short, long)]
    pub id: String,
    /// Transaction reference or document url
    #[clap(short, long)]
    pub document: String,
}

impl SubmitProof {
    pub async fn run(self, db: &Store) -> Result<()> {
        let payment = db.submit_proof(&self.id, &self.document).await?;
        println!();
        payment.print_formatted();
        println!();
        println!("Proof recorded. An admin still has to verify it.");
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct VerifyPayment {
    #[clap(short, long)]
    pub id: String,
    /// Mark the payment as paid
    #[clap(long, conflicts_with = "reject")]
    pub approve: bool,
    /// Cancel the payment
    #[clap(long)]
    pub reject: bool,
    #[clap(short, long, default_value = "")]
    pub notes: String,
}

impl VerifyPayment {
    /// Run the command and record the verdict
    pub async fn run(self, db: &Store, sessions: &SessionStore) -> Result<()> {
        let admin = require_admin(sessions)?;

        let status = match (self.approve, self.reject) {
            (true, false) => PaymentStatus::Paid,
            (false, true) => PaymentStatus::Cancelled,
            _ => return Err(anyhow!("Pass exactly one of --approve or --reject.")),
        };

        let payment: Payment = db.retrieve(self.id.clone()).await?;
        println!();
        payment.print_formatted();
        println!();
        let prompt_msg = format!("Mark payment as {}?", status);
        let confirm = Confirm::new(&prompt_msg).with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let payment = db.verify(&self.id, status, &self.notes, &admin.id).await?;
        println!("Payment {} is now {}.", payment.id, payment.status);

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct RecentPayments {}

impl RecentPayments {
    pub async fn run(self, db: &Store) -> Result<()> {
        let payments = db.recent_paid().await?;
        payments.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct VerificationQueue {}

impl VerificationQueue {
    pub async fn run(self, db: &Store) -> Result<()> {
        let payments = db.pending_verifications().await?;
        println!("{} payments waiting for verification.", payments.len());
        payments.print_formatted();
        Ok(())
    }
}
