use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use club_data::{
    Event, EventKind, Expense, ExpenseCategory, Payment, PaymentStatus, User, UserRole,
    UserStatus,
};

use crate::{auth::DEFAULT_PASSWORD, keys, Store};

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn avatar(id: &str) -> String {
    format!("https://i.pravatar.cc/150?u={}", id)
}

fn users() -> Vec<User> {
    vec![
        User {
            id: "admin1".to_string(),
            name: "Admin User".to_string(),
            email: "admin@clubhouse.test".to_string(),
            role: UserRole::Admin,
            status: UserStatus::Active,
            avatar: avatar("admin1"),
            phone: "123-456-7890".to_string(),
            join_date: at(2022, 1, 15, 10),
        },
        User {
            id: "member1".to_string(),
            name: "John Doe".to_string(),
            email: "member@clubhouse.test".to_string(),
            role: UserRole::Member,
            status: UserStatus::Active,
            avatar: avatar("member1"),
            phone: "987-654-3210".to_string(),
            join_date: at(2022, 3, 20, 14),
        },
        User {
            id: "member2".to_string(),
            name: "Jane Smith".to_string(),
            email: "jane.smith@example.com".to_string(),
            role: UserRole::Member,
            status: UserStatus::Active,
            avatar: avatar("member2"),
            phone: "555-123-4567".to_string(),
            join_date: at(2023, 5, 10, 9),
        },
        User {
            id: "member3".to_string(),
            name: "Peter Jones".to_string(),
            email: "peter.jones@example.com".to_string(),
            role: UserRole::Member,
            status: UserStatus::Inactive,
            avatar: avatar("member3"),
            phone: "555-987-6543".to_string(),
            join_date: at(2023, 6, 1, 11),
        },
    ]
}

fn payments() -> Vec<Payment> {
    vec![
        Payment {
            id: "payment1".to_string(),
            user_id: "member1".to_string(),
            user_name: "John Doe".to_string(),
            user_avatar: avatar("member1"),
            kind: "membership".to_string(),
            amount: 5000.0,
            status: PaymentStatus::Paid,
            date: at(2024, 5, 1, 10),
            due_date: at(2024, 5, 15, 10),
            payment_method: "Credit Card".to_string(),
            verified_by: Some("admin1".to_string()),
            ..Default::default()
        },
        Payment {
            id: "payment2".to_string(),
            user_id: "member1".to_string(),
            user_name: "John Doe".to_string(),
            user_avatar: avatar("member1"),
            kind: "event".to_string(),
            event_id: Some("event1".to_string()),
            amount: 500.0,
            status: PaymentStatus::Pending,
            date: at(2024, 6, 10, 11),
            due_date: at(2024, 6, 25, 11),
            payment_method: "UPI".to_string(),
            ..Default::default()
        },
        Payment {
            id: "payment3".to_string(),
            user_id: "member2".to_string(),
            user_name: "Jane Smith".to_string(),
            user_avatar: avatar("member2"),
            kind: "membership".to_string(),
            amount: 5000.0,
            status: PaymentStatus::Overdue,
            date: at(2024, 5, 1, 10),
            due_date: at(2024, 5, 15, 10),
            payment_method: "Bank Transfer".to_string(),
            ..Default::default()
        },
        Payment {
            id: "payment4".to_string(),
            user_id: "member2".to_string(),
            user_name: "Jane Smith".to_string(),
            user_avatar: avatar("member2"),
            kind: "fine".to_string(),
            amount: 200.0,
            status: PaymentStatus::Pending,
            date: at(2024, 6, 15, 15),
            due_date: at(2024, 6, 30, 15),
            payment_method: "UPI".to_string(),
            proof_document: Some("upi-ref-8842".to_string()),
            ..Default::default()
        },
        Payment {
            id: "payment5".to_string(),
            user_id: "member3".to_string(),
            user_name: "Peter Jones".to_string(),
            user_avatar: avatar("member3"),
            kind: "event".to_string(),
            event_id: Some("event2".to_string()),
            amount: 200.0,
            status: PaymentStatus::Paid,
            date: at(2024, 4, 2, 12),
            due_date: at(2024, 4, 20, 12),
            payment_method: "Cash".to_string(),
            verified_by: Some("admin1".to_string()),
            ..Default::default()
        },
    ]
}

fn events() -> Vec<Event> {
    vec![
        Event {
            id: "event1".to_string(),
            title: "Summer Tournament".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
            time: "09:00".to_string(),
            venue: "Main Ground".to_string(),
            description: "Annual knockout tournament, all members welcome.".to_string(),
            kind: EventKind::Tournament,
            attendees: vec!["member1".to_string(), "member2".to_string()],
        },
        Event {
            id: "event2".to_string(),
            title: "Net Practice".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 7, 6).unwrap(),
            time: "18:30".to_string(),
            venue: "Practice Nets".to_string(),
            description: "Weekly coached practice session.".to_string(),
            kind: EventKind::Training,
            attendees: vec![],
        },
    ]
}

fn expenses() -> Vec<Expense> {
    vec![
        Expense {
            id: "expense1".to_string(),
            description: "Replacement practice nets".to_string(),
            amount: 4000.0,
            category: ExpenseCategory::Equipment,
            date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            added_by: "admin1".to_string(),
        },
        Expense {
            id: "expense2".to_string(),
            description: "Ground maintenance".to_string(),
            amount: 1500.0,
            category: ExpenseCategory::Maintenance,
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            added_by: "admin1".to_string(),
        },
    ]
}

/// Install the seed data. Every seed account starts with the
/// default password.
pub(crate) async fn install(store: &Store) -> Result<()> {
    let users = users();
    store.save(keys::USERS, &users).await?;
    store.save(keys::PAYMENTS, &payments()).await?;
    store.save(keys::EVENTS, &events()).await?;
    store.save(keys::EXPENSES, &expenses()).await?;
    store.save(keys::QR_CODE, &String::new()).await?;
    store
        .save(keys::RESET_TOKENS, &HashMap::<String, String>::new())
        .await?;
    for user in &users {
        store.set_password(&user.id, DEFAULT_PASSWORD).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_referential_integrity() {
        let users = users();
        for payment in payments() {
            assert!(users.iter().any(|u| u.id == payment.user_id));
        }
        for expense in expenses() {
            assert!(users.iter().any(|u| u.id == expense.added_by));
        }
    }

    #[tokio::test]
    async fn test_seed_totals() {
        // Paid payments sum to 5200, expenses to 5500: net is -300.
        let paid: f64 = payments()
            .iter()
            .filter(|p| p.status == PaymentStatus::Paid)
            .map(|p| p.amount)
            .sum();
        let spent: f64 = expenses().iter().map(|e| e.amount).sum();
        assert_eq!(paid, 5200.0);
        assert_eq!(spent, 5500.0);
        assert_eq!(paid - spent, -300.0);
    }
}
