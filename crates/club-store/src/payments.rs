use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use club_data::{
    BulkPaymentRequest, Insert, Payment, PaymentFilter, PaymentRequest, PaymentStatus, Query,
    Retrieve, User,
};

use crate::{
    results::StoreError,
    store::{generate_id, keys},
    Store,
};

#[async_trait]
impl Query<Payment> for Store {
    type Filter = PaymentFilter;
    /// Query payments, newest first.
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Payment>> {
        let payments: Vec<Payment> = self.load(keys::PAYMENTS).await;
        let mut payments: Vec<Payment> = payments
            .into_iter()
            .filter(|p| filter.id.as_ref().map_or(true, |id| &p.id == id))
            .filter(|p| {
                filter
                    .user_id
                    .as_ref()
                    .map_or(true, |user_id| &p.user_id == user_id)
            })
            .filter(|p| filter.status.map_or(true, |status| p.status == status))
            .filter(|p| {
                filter
                    .event_id
                    .as_ref()
                    .map_or(true, |event_id| p.event_id.as_deref() == Some(event_id))
            })
            .filter(|p| {
                filter
                    .has_proof
                    .map_or(true, |has_proof| p.proof_document.is_some() == has_proof)
            })
            .collect();
        payments.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(payments)
    }
}

#[async_trait]
impl Retrieve<Payment> for Store {
    type Key = String;
    async fn retrieve(&self, payment_id: Self::Key) -> Result<Payment> {
        let filter = PaymentFilter {
            id: Some(payment_id),
            ..Default::default()
        };
        let payment = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(StoreError::NotFound("payment"))?;
        Ok(payment)
    }
}

#[async_trait]
impl Insert<Payment> for Store {
    async fn insert(&self, payment: Payment) -> Result<Payment> {
        let mut payment = payment;
        if payment.id.is_empty() {
            payment.id = generate_id();
        }
        if payment.date == DateTime::<Utc>::default() {
            payment.date = Utc::now();
        }
        let mut payments: Vec<Payment> = self.load(keys::PAYMENTS).await;
        payments.insert(0, payment.clone());
        self.save(keys::PAYMENTS, &payments).await?;
        Ok(payment)
    }
}

impl Store {
    /// The five most recently paid payments.
    pub async fn recent_paid(&self) -> Result<Vec<Payment>> {
        let paid = self
            .query(&PaymentFilter {
                status: Some(PaymentStatus::Paid),
                ..Default::default()
            })
            .await?;
        Ok(paid.into_iter().take(5).collect())
    }

    /// The verification queue: pending payments with a proof attached.
    pub async fn pending_verifications(&self) -> Result<Vec<Payment>> {
        self.query(&PaymentFilter {
            status: Some(PaymentStatus::Pending),
            has_proof: Some(true),
            ..Default::default()
        })
        .await
    }

    /// Issue a payment request for one member. The member must exist;
    /// name and avatar are snapshotted onto the payment.
    pub async fn create_request(&self, request: PaymentRequest) -> Result<Payment> {
        let user: User = self.retrieve(request.user_id.clone()).await?;
        let payment = Payment {
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            user_avatar: user.avatar.clone(),
            kind: request.kind,
            amount: request.amount,
            status: PaymentStatus::Pending,
            date: Utc::now(),
            due_date: request.due_date,
            event_id: request.event_id,
            ..Default::default()
        };
        self.insert(payment).await
    }

    /// Issue one payment request per selected member with identical
    /// kind, amount and due date. Unknown member ids are skipped;
    /// any other failure aborts the batch.
    pub async fn create_bulk_requests(
        &self,
        request: BulkPaymentRequest,
    ) -> Result<Vec<Payment>> {
        let mut created = Vec::new();
        for user_id in &request.user_ids {
            let payment = self
                .create_request(PaymentRequest {
                    user_id: user_id.clone(),
                    kind: request.kind.clone(),
                    amount: request.amount,
                    due_date: request.due_date,
                    event_id: None,
                })
                .await;
            match payment {
                Ok(payment) => created.push(payment),
                Err(err) => match err.downcast_ref::<StoreError>() {
                    Some(StoreError::NotFound(_)) => continue,
                    _ => return Err(err),
                },
            }
        }
        Ok(created)
    }

    /// Attach a proof document to a payment. The status is unchanged
    /// until an admin verifies it.
    pub async fn submit_proof(&self, payment_id: &str, document: &str) -> Result<Payment> {
        let mut payments: Vec<Payment> = self.load(keys::PAYMENTS).await;
        let payment = payments
            .iter_mut()
            .find(|p| p.id == payment_id)
            .ok_or(StoreError::NotFound("payment"))?;
        payment.proof_document = Some(document.to_string());
        let updated = payment.clone();
        self.save(keys::PAYMENTS, &payments).await?;
        Ok(updated)
    }

    /// Record an admin's verdict on a payment. Verification can only
    /// mark a payment paid or cancelled.
    pub async fn verify(
        &self,
        payment_id: &str,
        status: PaymentStatus,
        notes: &str,
        verified_by: &str,
    ) -> Result<Payment> {
        if !matches!(status, PaymentStatus::Paid | PaymentStatus::Cancelled) {
            return Err(anyhow!(
                "verification can only mark a payment paid or cancelled"
            ));
        }
        let mut payments: Vec<Payment> = self.load(keys::PAYMENTS).await;
        let payment = payments
            .iter_mut()
            .find(|p| p.id == payment_id)
            .ok_or(StoreError::NotFound("payment"))?;
        payment.status = status;
        payment.admin_notes = Some(notes.to_string());
        payment.verified_by = Some(verified_by.to_string());
        let updated = payment.clone();
        self.save(keys::PAYMENTS, &payments).await?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Datelike, TimeZone};

    use club_data::UserFilter;

    async fn test_member(store: &Store, name: &str, email: &str) -> User {
        store
            .insert(User {
                name: name.to_string(),
                email: email.to_string(),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_request_snapshots_user() {
        let store = Store::open_test();
        let user = test_member(&store, "John Doe", "john@clubhouse.test").await;

        let payment = store
            .create_request(PaymentRequest {
                user_id: user.id.clone(),
                kind: "membership".to_string(),
                amount: 5000.0,
                due_date: Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap(),
                event_id: None,
            })
            .await
            .unwrap();

        assert!(!payment.id.is_empty());
        assert_eq!(payment.user_name, "John Doe");
        assert_eq!(payment.user_avatar, user.avatar);
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert!(payment.proof_document.is_none());
    }

    #[tokio::test]
    async fn test_create_request_unknown_user() {
        let store = Store::open_test();
        let result = store
            .create_request(PaymentRequest {
                user_id: "missing".to_string(),
                kind: "membership".to_string(),
                amount: 5000.0,
                ..Default::default()
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_bulk_requests_skip_unknown_users() {
        let store = Store::open_test();
        let m1 = test_member(&store, "Member 1", "m1@clubhouse.test").await;
        let m2 = test_member(&store, "Member 2", "m2@clubhouse.test").await;

        let created = store
            .create_bulk_requests(BulkPaymentRequest {
                user_ids: vec![m1.id.clone(), "missing".to_string(), m2.id.clone()],
                kind: "membership".to_string(),
                amount: 5000.0,
                due_date: Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(created.len(), 2);
        for payment in &created {
            assert_eq!(payment.kind, "membership");
            assert_eq!(payment.amount, 5000.0);
        }
    }

    #[tokio::test]
    async fn test_bulk_requests_surface_write_failures() {
        let path = format!("/tmp/clubhouse_test_{}.json", rand::random::<u64>());
        let store = Store::open(&path).await.unwrap();
        let member: User = store.retrieve("member1".to_string()).await.unwrap();

        // Break the backing file so every save fails
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let result = store
            .create_bulk_requests(BulkPaymentRequest {
                user_ids: vec![member.id],
                kind: "membership".to_string(),
                amount: 5000.0,
                due_date: Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap(),
            })
            .await;
        assert!(result.is_err());

        std::fs::remove_dir(&path).unwrap();
    }

    #[tokio::test]
    async fn test_submit_proof_unknown_payment() {
        let store = Store::open_test();
        let result = store.submit_proof("missing", "upi-ref-1").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_query_sorted_newest_first() {
        let store = Store::open_test();
        let user = test_member(&store, "Member", "m@clubhouse.test").await;
        for (id, day) in [("a", 1), ("b", 20), ("c", 10)] {
            store
                .insert(Payment {
                    id: id.to_string(),
                    user_id: user.id.clone(),
                    date: Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let payments: Vec<Payment> = store.query(&PaymentFilter::default()).await.unwrap();
        let ids: Vec<&str> = payments.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn test_recent_paid_takes_top_five() {
        let store = Store::open_test();
        let user = test_member(&store, "Member", "m@clubhouse.test").await;
        for day in 1..=7 {
            store
                .insert(Payment {
                    user_id: user.id.clone(),
                    status: PaymentStatus::Paid,
                    date: Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let recent = store.recent_paid().await.unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].date.day(), 7);
    }

    #[tokio::test]
    async fn test_submit_proof_keeps_status() {
        let store = Store::open_test();
        let user = test_member(&store, "Member", "m@clubhouse.test").await;
        let payment = store
            .create_request(PaymentRequest {
                user_id: user.id.clone(),
                kind: "fine".to_string(),
                amount: 200.0,
                ..Default::default()
            })
            .await
            .unwrap();

        let payment = store
            .submit_proof(&payment.id, "upi-ref-1234")
            .await
            .unwrap();
        assert_eq!(payment.proof_document.as_deref(), Some("upi-ref-1234"));
        assert_eq!(payment.status, PaymentStatus::Pending);

        let queue = store.pending_verifications().await.unwrap();
        assert_eq!(queue.len(), 1);
    }

    #[tokio::test]
    async fn test_verify_unknown_payment() {
        let store = Store::open_test();
        let result = store
            .verify("missing", PaymentStatus::Paid, "", "admin1")
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_verify_sets_fields_and_clears_queue() {
        let store = Store::open_test();
        let user = test_member(&store, "Member", "m@clubhouse.test").await;
        let payment = store
            .create_request(PaymentRequest {
                user_id: user.id.clone(),
                kind: "membership".to_string(),
                amount: 5000.0,
                ..Default::default()
            })
            .await
            .unwrap();
        store.submit_proof(&payment.id, "upi-ref-42").await.unwrap();

        let payment = store
            .verify(&payment.id, PaymentStatus::Paid, "checked against bank", "admin1")
            .await
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.admin_notes.as_deref(), Some("checked against bank"));
        assert_eq!(payment.verified_by.as_deref(), Some("admin1"));

        let queue = store.pending_verifications().await.unwrap();
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_verify_rejects_other_statuses() {
        let store = Store::open_test();
        let user = test_member(&store, "Member", "m@clubhouse.test").await;
        let payment = store
            .create_request(PaymentRequest {
                user_id: user.id.clone(),
                kind: "membership".to_string(),
                amount: 5000.0,
                ..Default::default()
            })
            .await
            .unwrap();

        let result = store
            .verify(&payment.id, PaymentStatus::Overdue, "", "admin1")
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_payments_helper() {
        let store = Store::open_test();
        let user = test_member(&store, "Member", "m@clubhouse.test").await;
        let other = test_member(&store, "Other", "o@clubhouse.test").await;
        for target in [&user, &user, &other] {
            store
                .create_request(PaymentRequest {
                    user_id: target.id.clone(),
                    kind: "membership".to_string(),
                    amount: 100.0,
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let payments = user.get_payments(&store).await.unwrap();
        assert_eq!(payments.len(), 2);

        // Sanity: both members still present
        let users: Vec<User> = store.query(&UserFilter::default()).await.unwrap();
        assert_eq!(users.len(), 2);
    }
}
