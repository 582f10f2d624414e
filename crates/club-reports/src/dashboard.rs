use anyhow::Result;

use club_data::{
    Event, EventFilter, Payment, PaymentFilter, PaymentStatus, Query, User, UserFilter, UserRole,
};

/// Landing-page numbers, branched on the viewer's role.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardStats {
    Admin {
        total_members: usize,
        total_revenue: f64,
        pending_verifications: usize,
        upcoming_events: usize,
    },
    Member {
        pending_payments: usize,
        total_paid: f64,
        upcoming_events: usize,
    },
}

pub async fn dashboard_stats<DB>(db: &DB, user: &User) -> Result<DashboardStats>
where
    DB: Query<User, Filter = UserFilter>
        + Query<Payment, Filter = PaymentFilter>
        + Query<Event, Filter = EventFilter>
        + Send
        + Sync,
{
    let events: Vec<Event> = db.query(&EventFilter::default()).await?;

    if user.is_admin() {
        let members: Vec<User> = db
            .query(&UserFilter {
                role: Some(UserRole::Member),
                ..Default::default()
            })
            .await?;
        let payments: Vec<Payment> = db.query(&PaymentFilter::default()).await?;
        let total_revenue: f64 = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Paid)
            .map(|p| p.amount)
            .sum();
        let pending_verifications = payments.iter().filter(|p| p.awaits_verification()).count();
        Ok(DashboardStats::Admin {
            total_members: members.len(),
            total_revenue,
            pending_verifications,
            upcoming_events: events.len(),
        })
    } else {
        let payments: Vec<Payment> = db
            .query(&PaymentFilter {
                user_id: Some(user.id.clone()),
                ..Default::default()
            })
            .await?;
        let pending_payments = payments.iter().filter(|p| p.is_open()).count();
        let total_paid: f64 = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Paid)
            .map(|p| p.amount)
            .sum();
        Ok(DashboardStats::Member {
            pending_payments,
            total_paid,
            upcoming_events: events.len(),
        })
    }
}
