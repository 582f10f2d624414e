use std::io;

use anyhow::Result;
use serde::Serialize;

use club_data::{Expense, ExpenseFilter, Payment, PaymentFilter, PaymentStatus, Query};

/// Club-wide financial picture: revenue counts paid payments only,
/// expenses count everything.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net: f64,
}

pub async fn financial_summary<DB>(db: &DB) -> Result<FinancialSummary>
where
    DB: Query<Payment, Filter = PaymentFilter> + Query<Expense, Filter = ExpenseFilter>
        + Send
        + Sync,
{
    let payments: Vec<Payment> = db.query(&PaymentFilter::default()).await?;
    let expenses: Vec<Expense> = db.query(&ExpenseFilter::default()).await?;

    let total_revenue: f64 = payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Paid)
        .map(|p| p.amount)
        .sum();
    let total_expenses: f64 = expenses.iter().map(|e| e.amount).sum();

    Ok(FinancialSummary {
        total_revenue,
        total_expenses,
        net: total_revenue - total_expenses,
    })
}

/// Write payments as a CSV report.
pub fn payments_csv<W>(payments: &[Payment], writer: W) -> Result<()>
where
    W: io::Write,
{
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "Payment ID",
        "Member Name",
        "Type",
        "Amount",
        "Status",
        "Date",
        "Due Date",
        "Payment Method",
    ])?;
    for payment in payments {
        let amount = format!("{}", payment.amount);
        let status = payment.status.to_string();
        let date = payment.date.format("%-d %B %Y").to_string();
        let due_date = payment.due_date.format("%-d %B %Y").to_string();
        csv.write_record([
            payment.id.as_str(),
            payment.user_name.as_str(),
            payment.kind.as_str(),
            &amount,
            &status,
            &date,
            &due_date,
            payment.payment_method.as_str(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{NaiveDate, TimeZone, Utc};

    use club_data::{ExpenseCategory, Insert, PaymentRequest, User};
    use club_store::Store;

    #[tokio::test]
    async fn test_financial_summary_exact_net() {
        let store = Store::open_test();
        let member = store
            .insert(User {
                name: "Member".to_string(),
                email: "member@clubhouse.test".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        // Paid payments sum to 5200
        for amount in [5000.0, 200.0] {
            let payment = store
                .create_request(PaymentRequest {
                    user_id: member.id.clone(),
                    kind: "membership".to_string(),
                    amount,
                    ..Default::default()
                })
                .await
                .unwrap();
            store
                .verify(&payment.id, PaymentStatus::Paid, "", "admin1")
                .await
                .unwrap();
        }
        // A pending payment does not count as revenue
        store
            .create_request(PaymentRequest {
                user_id: member.id.clone(),
                kind: "event".to_string(),
                amount: 999.0,
                ..Default::default()
            })
            .await
            .unwrap();
        // Expenses sum to 5500
        for amount in [4000.0, 1500.0] {
            store
                .insert(Expense {
                    description: "club cost".to_string(),
                    amount,
                    category: ExpenseCategory::Other,
                    date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                    added_by: "admin1".to_string(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let summary = financial_summary(&store).await.unwrap();
        assert_eq!(summary.total_revenue, 5200.0);
        assert_eq!(summary.total_expenses, 5500.0);
        assert_eq!(summary.net, -300.0);
    }

    #[test]
    fn test_payments_csv() {
        let payments = vec![Payment {
            id: "payment1".to_string(),
            user_name: "John Doe".to_string(),
            kind: "membership".to_string(),
            amount: 5000.0,
            status: PaymentStatus::Paid,
            date: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            due_date: Utc.with_ymd_and_hms(2024, 5, 15, 10, 0, 0).unwrap(),
            payment_method: "UPI".to_string(),
            ..Default::default()
        }];

        let mut out = Vec::new();
        payments_csv(&payments, &mut out).unwrap();
        let report = String::from_utf8(out).unwrap();

        let mut lines = report.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Payment ID,Member Name,Type,Amount,Status,Date,Due Date,Payment Method"
        );
        assert_eq!(
            lines.next().unwrap(),
            "payment1,John Doe,membership,5000,paid,1 May 2024,15 May 2024,UPI"
        );
    }
}
