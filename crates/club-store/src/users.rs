use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use club_data::{Delete, Insert, Payment, Query, Retrieve, Update, User, UserFilter};

use crate::{
    auth::DEFAULT_PASSWORD,
    results::StoreError,
    store::{generate_id, keys},
    Store,
};

fn default_avatar(user_id: &str) -> String {
    format!("https://i.pravatar.cc/150?u={}", user_id)
}

#[async_trait]
impl Query<User> for Store {
    type Filter = UserFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<User>> {
        let users: Vec<User> = self.load(keys::USERS).await;
        let users = users
            .into_iter()
            .filter(|u| filter.id.as_ref().map_or(true, |id| &u.id == id))
            .filter(|u| {
                filter.name.as_ref().map_or(true, |name| {
                    u.name.to_lowercase().contains(&name.to_lowercase())
                })
            })
            .filter(|u| {
                filter
                    .email
                    .as_ref()
                    .map_or(true, |email| u.email.eq_ignore_ascii_case(email))
            })
            .filter(|u| filter.role.map_or(true, |role| u.role == role))
            .filter(|u| filter.status.map_or(true, |status| u.status == status))
            .collect();
        Ok(users)
    }
}

#[async_trait]
impl Retrieve<User> for Store {
    type Key = String;
    async fn retrieve(&self, user_id: Self::Key) -> Result<User> {
        let filter = UserFilter {
            id: Some(user_id),
            ..Default::default()
        };
        let user = self
            .query(&filter)
            .await?
            .pop()
            .ok_or(StoreError::NotFound("user"))?;
        Ok(user)
    }
}

#[async_trait]
impl Insert<User> for Store {
    /// Insert a user. Id, avatar and join date are assigned when
    /// unset, and the account starts with the default password.
    async fn insert(&self, user: User) -> Result<User> {
        let mut user = user;
        if user.id.is_empty() {
            user.id = generate_id();
        }
        if user.avatar.is_empty() {
            user.avatar = default_avatar(&user.id);
        }
        if user.join_date == DateTime::<Utc>::default() {
            user.join_date = Utc::now();
        }

        let mut users: Vec<User> = self.load(keys::USERS).await;
        users.insert(0, user.clone());
        self.save(keys::USERS, &users).await?;
        self.set_password(&user.id, DEFAULT_PASSWORD).await?;
        Ok(user)
    }
}

#[async_trait]
impl Update<User> for Store {
    /// Replace a user record. A changed name or avatar cascades into
    /// the denormalized snapshots on that user's payments.
    async fn update(&self, user: User) -> Result<User> {
        let mut users: Vec<User> = self.load(keys::USERS).await;
        let current = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(StoreError::NotFound("user"))?;
        let snapshot_stale = current.name != user.name || current.avatar != user.avatar;
        *current = user.clone();
        self.save(keys::USERS, &users).await?;

        if snapshot_stale {
            let mut payments: Vec<Payment> = self.load(keys::PAYMENTS).await;
            for payment in payments.iter_mut().filter(|p| p.user_id == user.id) {
                payment.user_name = user.name.clone();
                payment.user_avatar = user.avatar.clone();
            }
            self.save(keys::PAYMENTS, &payments).await?;
        }
        Ok(user)
    }
}

#[async_trait]
impl Delete<User> for Store {
    /// Delete a user. Cascades to the user's payments and credentials.
    async fn delete(&self, user: User) -> Result<()> {
        let mut users: Vec<User> = self.load(keys::USERS).await;
        let before = users.len();
        users.retain(|u| u.id != user.id);
        if users.len() == before {
            return Err(StoreError::NotFound("user").into());
        }
        self.save(keys::USERS, &users).await?;

        let mut payments: Vec<Payment> = self.load(keys::PAYMENTS).await;
        payments.retain(|p| p.user_id != user.id);
        self.save(keys::PAYMENTS, &payments).await?;

        self.remove_credentials(&user.id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use club_data::{PaymentFilter, PaymentRequest, UserRole, UserStatus};

    #[tokio::test]
    async fn test_user_insert_assigns_defaults() {
        let store = Store::open_test();
        let user = store
            .insert(User {
                name: "Test Member".to_string(),
                email: "mail@test-member.club".to_string(),
                phone: "555-0000".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(!user.id.is_empty());
        assert_eq!(user.avatar, default_avatar(&user.id));
        assert!(user.join_date > DateTime::<Utc>::default());
        assert_eq!(user.role, UserRole::Member);
        assert_eq!(user.status, UserStatus::Active);
    }

    #[tokio::test]
    async fn test_user_query_email_case_insensitive() {
        let store = Store::open_test();
        store
            .insert(User {
                name: "Test Member".to_string(),
                email: "Mixed.Case@Example.com".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let users: Vec<User> = store
            .query(&UserFilter {
                email: Some("mixed.case@example.com".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(users.len(), 1);
    }

    #[tokio::test]
    async fn test_user_query_name_substring() {
        let store = Store::open_test();
        store
            .insert(User {
                name: "Test Member".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let users: Vec<User> = store
            .query(&UserFilter {
                name: Some("tEsT MeMber".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(users.len(), 1);

        let users: Vec<User> = store
            .query(&UserFilter {
                name: Some("f3st MeMber".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(users.len(), 0);
    }

    #[tokio::test]
    async fn test_user_retrieve_not_found() {
        let store = Store::open_test();
        let result: Result<User> = store.retrieve("missing".to_string()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_user_update_cascades_payment_snapshots() {
        let store = Store::open_test();
        let mut user = store
            .insert(User {
                name: "Old Name".to_string(),
                email: "cascade@clubhouse.test".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        store
            .create_request(PaymentRequest {
                user_id: user.id.clone(),
                kind: "membership".to_string(),
                amount: 100.0,
                ..Default::default()
            })
            .await
            .unwrap();

        user.name = "New Name".to_string();
        store.update(user.clone()).await.unwrap();

        let payments: Vec<Payment> = store
            .query(&PaymentFilter {
                user_id: Some(user.id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].user_name, "New Name");
    }

    #[tokio::test]
    async fn test_user_update_not_found() {
        let store = Store::open_test();
        let result = store
            .update(User {
                id: "missing".to_string(),
                ..Default::default()
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_user_delete_cascades() {
        let store = Store::open_test();
        let user = store
            .insert(User {
                name: "To Delete".to_string(),
                email: "delete-me@clubhouse.test".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        store
            .create_request(PaymentRequest {
                user_id: user.id.clone(),
                kind: "fine".to_string(),
                amount: 50.0,
                ..Default::default()
            })
            .await
            .unwrap();

        store.delete(user.clone()).await.unwrap();

        let users: Vec<User> = store.query(&UserFilter::default()).await.unwrap();
        assert!(users.is_empty());
        let payments: Vec<Payment> = store
            .query(&PaymentFilter::default())
            .await
            .unwrap();
        assert!(payments.is_empty());
    }

    #[tokio::test]
    async fn test_user_delete_not_found() {
        let store = Store::open_test();
        let result = store
            .delete(User {
                id: "missing".to_string(),
                ..Default::default()
            })
            .await;
        assert!(result.is_err());
    }
}
