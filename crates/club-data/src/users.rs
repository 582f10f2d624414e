use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Payment, PaymentFilter, Query};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Member,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Member => write!(f, "member"),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UserFilter {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub avatar: String,
    pub phone: String,
    pub join_date: DateTime<Utc>,
}

impl User {
    /// Get all payments recorded for this user, newest first.
    pub async fn get_payments<DB>(&self, db: &DB) -> Result<Vec<Payment>>
    where
        DB: Query<Payment, Filter = PaymentFilter> + Send + Sync,
    {
        let payments = db
            .query(&PaymentFilter {
                user_id: Some(self.id.clone()),
                ..Default::default()
            })
            .await?;
        Ok(payments)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    // Active membership gates event payment tracking
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// Credential check at the storage seam. Implementations reject
/// unknown emails and password mismatches alike.
#[async_trait]
pub trait Authenticate {
    async fn login(&self, email: &str, password: &str) -> Result<User>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde() {
        let role: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, UserRole::Admin);
        assert_eq!(serde_json::to_string(&UserRole::Member).unwrap(), "\"member\"");
    }

    #[test]
    fn test_user_flags() {
        let user = User {
            role: UserRole::Admin,
            status: UserStatus::Inactive,
            ..Default::default()
        };
        assert!(user.is_admin());
        assert!(!user.is_active());
    }
}
