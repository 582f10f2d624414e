use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::seed;

/// Fixed keys for the persisted collections. The data file is a
/// single JSON object mapping these keys to JSON arrays (or a plain
/// string for the QR code). There is no schema versioning; a layout
/// change requires a reseed.
pub mod keys {
    pub const USERS: &str = "clubhouse_users";
    pub const PAYMENTS: &str = "clubhouse_payments";
    pub const EVENTS: &str = "clubhouse_events";
    pub const EXPENSES: &str = "clubhouse_expenses";
    pub const QR_CODE: &str = "clubhouse_qr_code";
    pub const PASSWORDS: &str = "clubhouse_passwords";
    pub const RESET_TOKENS: &str = "clubhouse_reset_tokens";
}

/// Short random identifier, hex encoded.
pub fn generate_id() -> String {
    hex::encode(rand::random::<[u8; 8]>())
}

/// A thread safe handle to the record store.
///
/// Every operation reads a whole collection, mutates it in memory and
/// writes the whole collection back. Concurrent writers would overwrite
/// each other at collection granularity; the store assumes a single
/// writer, like the browser-local storage it stands in for.
#[derive(Clone)]
pub struct Store {
    values: Arc<Mutex<HashMap<String, Value>>>,
    path: Option<PathBuf>,
    latency: Duration,
}

impl Store {
    /// Open a file-backed store. The file is created and seeded on
    /// first use.
    pub async fn open(path: impl AsRef<Path>) -> Result<Store> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let data = tokio::fs::read(&path).await?;
            serde_json::from_slice(&data)?
        } else {
            HashMap::new()
        };
        let store = Store {
            values: Arc::new(Mutex::new(values)),
            path: Some(path),
            latency: Duration::ZERO,
        };
        store.seed_if_empty().await?;
        Ok(store)
    }

    /// Open a seeded in-process store.
    pub async fn open_memory() -> Result<Store> {
        let store = Store::open_test();
        store.seed_if_empty().await?;
        Ok(store)
    }

    /// Open an empty in-process store without seed data.
    pub fn open_test() -> Store {
        Store {
            values: Arc::new(Mutex::new(HashMap::new())),
            path: None,
            latency: Duration::ZERO,
        }
    }

    /// Add a fixed delay to every read, simulating a remote backend.
    pub fn with_latency(mut self, latency: Duration) -> Store {
        self.latency = latency;
        self
    }

    async fn seed_if_empty(&self) -> Result<()> {
        let empty = {
            let values = self.values.lock().await;
            !values.contains_key(keys::USERS)
        };
        if empty {
            seed::install(self).await?;
        }
        Ok(())
    }

    /// Current snapshot of a collection. Never fails: a missing or
    /// unreadable value yields the default.
    pub(crate) async fn load<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let values = self.values.lock().await;
        values
            .get(key)
            .cloned()
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default()
    }

    /// Replace a collection value and, when file-backed, rewrite the
    /// whole data file.
    pub(crate) async fn save<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let mut values = self.values.lock().await;
        values.insert(key.to_string(), serde_json::to_value(value)?);
        if let Some(path) = &self.path {
            let data = serde_json::to_string_pretty(&*values)?;
            tokio::fs::write(path, data).await?;
        }
        Ok(())
    }
}

pub struct TestHandle {
    path: PathBuf,
}

impl Drop for TestHandle {
    fn drop(&mut self) {
        if self.path.exists() {
            fs::remove_file(&self.path).unwrap();
        }
    }
}

/// Open a new file-backed test store. The data file is removed when
/// the handle is dropped.
pub async fn open_test_file() -> (TestHandle, Store) {
    let path = PathBuf::from(format!(
        "/tmp/clubhouse_test_{}.json",
        rand::random::<u64>()
    ));
    let handle = TestHandle { path: path.clone() };
    let store = Store::open(&path).await.unwrap();
    (handle, store)
}

#[cfg(test)]
mod tests {
    use super::*;

    use club_data::{Insert, Retrieve, User};

    #[tokio::test]
    async fn test_load_missing_key_yields_default() {
        let store = Store::open_test();
        let users: Vec<User> = store.load(keys::USERS).await;
        assert!(users.is_empty());
        let qr: String = store.load(keys::QR_CODE).await;
        assert_eq!(qr, "");
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let store = Store::open_test();
        store
            .save(keys::QR_CODE, &"upi://pay?pa=club@bank".to_string())
            .await
            .unwrap();
        let qr: String = store.load(keys::QR_CODE).await;
        assert_eq!(qr, "upi://pay?pa=club@bank");
    }

    #[tokio::test]
    async fn test_open_memory_is_seeded() {
        let store = Store::open_memory().await.unwrap();
        let admin: User = store.retrieve("admin1".to_string()).await.unwrap();
        assert!(admin.is_admin());
    }

    #[tokio::test]
    async fn test_open_seeds_empty_file() {
        let (_handle, store) = open_test_file().await;
        let users: Vec<User> = store.load(keys::USERS).await;
        assert!(!users.is_empty());
    }

    #[tokio::test]
    async fn test_reopen_keeps_written_records() {
        let path = format!("/tmp/clubhouse_test_{}.json", rand::random::<u64>());
        let handle = TestHandle {
            path: PathBuf::from(&path),
        };

        let store = Store::open(&path).await.unwrap();
        let user = store
            .insert(User {
                name: "Persistent Member".to_string(),
                email: "persist@clubhouse.test".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        drop(store);

        let store = Store::open(&path).await.unwrap();
        let found: User = store.retrieve(user.id.clone()).await.unwrap();
        assert_eq!(found.name, "Persistent Member");
        drop(handle);
    }
}
