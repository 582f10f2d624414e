use anyhow::Result;

use club_data::{
    Event, Payment, PaymentFilter, PaymentStatus, Query, Retrieve, User, UserFilter, UserRole,
    UserStatus,
};

/// One active member's standing for an event. A member without a
/// payment record has no status; that is normal, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct EventPaymentStatus {
    pub member_id: String,
    pub member_name: String,
    pub status: Option<PaymentStatus>,
}

impl EventPaymentStatus {
    pub fn describe(&self) -> String {
        match self.status {
            Some(status) => status.to_string(),
            None => "Not Paid".to_string(),
        }
    }
}

/// Payment standing of every active member for one event.
pub async fn event_payment_status<DB>(db: &DB, event_id: &str) -> Result<Vec<EventPaymentStatus>>
where
    DB: Retrieve<Event, Key = String>
        + Query<User, Filter = UserFilter>
        + Query<Payment, Filter = PaymentFilter>
        + Send
        + Sync,
{
    // Fails with NotFound for an unknown event
    let _event: Event = db.retrieve(event_id.to_string()).await?;

    let members: Vec<User> = db
        .query(&UserFilter {
            role: Some(UserRole::Member),
            status: Some(UserStatus::Active),
            ..Default::default()
        })
        .await?;
    let payments: Vec<Payment> = db
        .query(&PaymentFilter {
            event_id: Some(event_id.to_string()),
            ..Default::default()
        })
        .await?;

    let statuses = members
        .into_iter()
        .map(|member| {
            let status = payments
                .iter()
                .find(|p| p.user_id == member.id)
                .map(|p| p.status);
            EventPaymentStatus {
                member_id: member.id,
                member_name: member.name,
                status,
            }
        })
        .collect();
    Ok(statuses)
}

/// Active members whose event payment is missing or not yet paid.
pub async fn unpaid_members<DB>(db: &DB, event_id: &str) -> Result<Vec<EventPaymentStatus>>
where
    DB: Retrieve<Event, Key = String>
        + Query<User, Filter = UserFilter>
        + Query<Payment, Filter = PaymentFilter>
        + Send
        + Sync,
{
    let statuses = event_payment_status(db, event_id).await?;
    Ok(statuses
        .into_iter()
        .filter(|s| s.status != Some(PaymentStatus::Paid))
        .collect())
}
