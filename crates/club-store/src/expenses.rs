use anyhow::Result;
use async_trait::async_trait;

use club_data::{Expense, ExpenseFilter, Insert, Query};

use crate::store::{generate_id, keys};
use crate::Store;

#[async_trait]
impl Query<Expense> for Store {
    type Filter = ExpenseFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Expense>> {
        let expenses: Vec<Expense> = self.load(keys::EXPENSES).await;
        let expenses = expenses
            .into_iter()
            .filter(|e| filter.id.as_ref().map_or(true, |id| &e.id == id))
            .filter(|e| filter.category.map_or(true, |category| e.category == category))
            .collect();
        Ok(expenses)
    }
}

#[async_trait]
impl Insert<Expense> for Store {
    async fn insert(&self, expense: Expense) -> Result<Expense> {
        let mut expense = expense;
        if expense.id.is_empty() {
            expense.id = generate_id();
        }
        let mut expenses: Vec<Expense> = self.load(keys::EXPENSES).await;
        expenses.insert(0, expense.clone());
        self.save(keys::EXPENSES, &expenses).await?;
        Ok(expense)
    }
}
