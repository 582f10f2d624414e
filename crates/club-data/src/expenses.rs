use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Equipment,
    Maintenance,
    Event,
    #[default]
    Other,
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExpenseCategory::Equipment => write!(f, "equipment"),
            ExpenseCategory::Maintenance => write!(f, "maintenance"),
            ExpenseCategory::Event => write!(f, "event"),
            ExpenseCategory::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ExpenseFilter {
    pub id: Option<String>,
    pub category: Option<ExpenseCategory>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
    /// Id of the admin who recorded the expense
    pub added_by: String,
}
