use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
    Overdue,
    Cancelled,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PaymentStatus::Paid => write!(f, "paid"),
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Overdue => write!(f, "overdue"),
            PaymentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PaymentFilter {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub status: Option<PaymentStatus>,
    pub event_id: Option<String>,
    pub has_proof: Option<bool>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub user_id: String,
    /// Snapshot of the user's name at creation time. Kept in sync
    /// when the user record changes name or avatar.
    pub user_name: String,
    pub user_avatar: String,
    /// membership, event, fine, ...
    pub kind: String,
    pub amount: f64,
    pub status: PaymentStatus,
    pub date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub payment_method: String,
    pub proof_document: Option<String>,
    pub admin_notes: Option<String>,
    pub verified_by: Option<String>,
    pub event_id: Option<String>,
}

impl Payment {
    /// A payment still owed by the member.
    pub fn is_open(&self) -> bool {
        matches!(self.status, PaymentStatus::Pending | PaymentStatus::Overdue)
    }

    /// Pending with a proof document attached, waiting for an admin.
    pub fn awaits_verification(&self) -> bool {
        self.status == PaymentStatus::Pending && self.proof_document.is_some()
    }
}

/// A single payment request issued by an admin.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub user_id: String,
    pub kind: String,
    pub amount: f64,
    pub due_date: DateTime<Utc>,
    pub event_id: Option<String>,
}

/// One payment per selected member, identical kind/amount/due date.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct BulkPaymentRequest {
    pub user_ids: Vec<String>,
    pub kind: String,
    pub amount: f64,
    pub due_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_is_open() {
        let mut payment = Payment {
            status: PaymentStatus::Pending,
            ..Default::default()
        };
        assert!(payment.is_open());
        payment.status = PaymentStatus::Overdue;
        assert!(payment.is_open());
        payment.status = PaymentStatus::Paid;
        assert!(!payment.is_open());
    }

    #[test]
    fn test_awaits_verification() {
        let mut payment = Payment {
            status: PaymentStatus::Pending,
            ..Default::default()
        };
        assert!(!payment.awaits_verification());
        payment.proof_document = Some("upi-ref-1234".to_string());
        assert!(payment.awaits_verification());
        payment.status = PaymentStatus::Paid;
        assert!(!payment.awaits_verification());
    }
}
