use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use club_data::{Authenticate, Insert, Query, User, UserFilter};

use crate::{
    results::StoreError,
    store::{generate_id, keys},
    Store,
};

/// Password given to accounts created by an admin, until the member
/// changes it.
pub const DEFAULT_PASSWORD: &str = "password";

const PBKDF2_ROUNDS: u32 = 10_000;

/// A salted password hash. Plaintext is never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Credential {
    salt: String,
    hash: String,
}

/// Derive the password hash using pbkdf2 hmac with sha256.
fn derive_hash(password: &str, salt: &[u8]) -> String {
    let mut key: [u8; 32] = [0; 32];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ROUNDS, &mut key);
    hex::encode(key)
}

impl Credential {
    fn new(password: &str) -> Credential {
        let salt: [u8; 16] = rand::random();
        Credential {
            salt: hex::encode(salt),
            hash: derive_hash(password, &salt),
        }
    }

    fn matches(&self, password: &str) -> bool {
        let Ok(salt) = hex::decode(&self.salt) else {
            return false;
        };
        derive_hash(password, &salt) == self.hash
    }
}

/// Self-service registration data.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[async_trait]
impl Authenticate for Store {
    /// Validate email and password. The email match is
    /// case-insensitive; unknown emails and wrong passwords are
    /// indistinguishable to the caller.
    async fn login(&self, email: &str, password: &str) -> Result<User> {
        let users: Vec<User> = self
            .query(&UserFilter {
                email: Some(email.to_string()),
                ..Default::default()
            })
            .await?;
        let user = users
            .into_iter()
            .next()
            .ok_or(StoreError::InvalidCredentials)?;

        let credentials: HashMap<String, Credential> = self.load(keys::PASSWORDS).await;
        let ok = credentials
            .get(&user.id)
            .map(|credential| credential.matches(password))
            .unwrap_or(false);
        if !ok {
            return Err(StoreError::InvalidCredentials.into());
        }
        Ok(user)
    }
}

impl Store {
    /// Register a new member account. Rejects an email that is
    /// already taken, ignoring case.
    pub async fn register(&self, account: NewAccount) -> Result<User> {
        let existing: Vec<User> = self
            .query(&UserFilter {
                email: Some(account.email.clone()),
                ..Default::default()
            })
            .await?;
        if !existing.is_empty() {
            return Err(StoreError::Conflict.into());
        }

        let user = self
            .insert(User {
                name: account.name,
                email: account.email,
                phone: account.phone,
                ..Default::default()
            })
            .await?;
        self.set_password(&user.id, &account.password).await?;
        Ok(user)
    }

    pub async fn set_password(&self, user_id: &str, password: &str) -> Result<()> {
        let mut credentials: HashMap<String, Credential> = self.load(keys::PASSWORDS).await;
        credentials.insert(user_id.to_string(), Credential::new(password));
        self.save(keys::PASSWORDS, &credentials).await
    }

    pub(crate) async fn remove_credentials(&self, user_id: &str) -> Result<()> {
        let mut credentials: HashMap<String, Credential> = self.load(keys::PASSWORDS).await;
        credentials.remove(user_id);
        self.save(keys::PASSWORDS, &credentials).await
    }

    /// Issue a single-use reset token for an account. Returns None
    /// for unknown emails so callers cannot probe which addresses
    /// have an account.
    pub async fn request_password_reset(&self, email: &str) -> Result<Option<String>> {
        let users: Vec<User> = self
            .query(&UserFilter {
                email: Some(email.to_string()),
                ..Default::default()
            })
            .await?;
        let Some(user) = users.into_iter().next() else {
            return Ok(None);
        };

        let token = format!("reset_{}", generate_id());
        let mut tokens: HashMap<String, String> = self.load(keys::RESET_TOKENS).await;
        tokens.insert(token.clone(), user.id);
        self.save(keys::RESET_TOKENS, &tokens).await?;
        Ok(Some(token))
    }

    /// Consume a reset token and set the new password. A token is
    /// valid exactly once; it also dies with its account.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<()> {
        let mut tokens: HashMap<String, String> = self.load(keys::RESET_TOKENS).await;
        let user_id = tokens.remove(token).ok_or(StoreError::InvalidToken)?;

        let users: Vec<User> = self
            .query(&UserFilter {
                id: Some(user_id.clone()),
                ..Default::default()
            })
            .await?;
        if users.is_empty() {
            return Err(StoreError::InvalidToken.into());
        }

        self.set_password(&user_id, new_password).await?;
        self.save(keys::RESET_TOKENS, &tokens).await?;
        Ok(())
    }
}
