use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use club_data::{Authenticate, User};

const LOCAL_FILE: &str = "clubhouse_user_local.json";
const SESSION_FILE: &str = "clubhouse_user_session.json";

/// Client-side cache of the logged-in user.
///
/// Two JSON files in one directory: a long-lived cache for "remember
/// me" logins and a short-lived one for everything else. This is a
/// convenience cache, not a security boundary: there is no expiry and
/// nothing validates the cached user against the store.
pub struct SessionStore {
    local: PathBuf,
    session: PathBuf,
}

impl SessionStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<SessionStore> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(SessionStore {
            local: dir.join(LOCAL_FILE),
            session: dir.join(SESSION_FILE),
        })
    }

    /// Authenticate against the store and cache the user. The
    /// remember flag selects the long-lived cache.
    pub async fn login<DB>(
        &self,
        db: &DB,
        email: &str,
        password: &str,
        remember: bool,
    ) -> Result<User>
    where
        DB: Authenticate + Send + Sync,
    {
        let user = db.login(email, password).await?;
        let path = if remember { &self.local } else { &self.session };
        write_user(path, &user)?;
        Ok(user)
    }

    /// The cached user, long-lived cache first. An unreadable cache
    /// file is discarded.
    pub fn current(&self) -> Option<User> {
        for path in [&self.local, &self.session] {
            match read_user(path) {
                Ok(Some(user)) => return Some(user),
                Ok(None) => continue,
                Err(_) => {
                    let _ = fs::remove_file(path);
                }
            }
        }
        None
    }

    /// Log out: drop both caches.
    pub fn clear(&self) -> Result<()> {
        for path in [&self.local, &self.session] {
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    /// Keep whichever caches exist in sync with a profile edit.
    pub fn profile_updated(&self, user: &User) -> Result<()> {
        for path in [&self.local, &self.session] {
            if path.exists() {
                write_user(path, user)?;
            }
        }
        Ok(())
    }
}

fn write_user(path: &Path, user: &User) -> Result<()> {
    let data = serde_json::to_string_pretty(user)?;
    fs::write(path, data)?;
    Ok(())
}

fn read_user(path: &Path) -> Result<Option<User>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read(path)?;
    Ok(Some(serde_json::from_slice(&data)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    use club_store::{NewAccount, Store};

    struct TestDir {
        path: PathBuf,
    }

    impl Drop for TestDir {
        fn drop(&mut self) {
            if self.path.exists() {
                fs::remove_dir_all(&self.path).unwrap();
            }
        }
    }

    fn test_dir() -> TestDir {
        TestDir {
            path: PathBuf::from(format!(
                "/tmp/clubhouse_test_session_{}",
                rand::random::<u64>()
            )),
        }
    }

    async fn store_with_account() -> Store {
        let store = Store::open_test();
        store
            .register(NewAccount {
                name: "Jane Smith".to_string(),
                email: "jane@clubhouse.test".to_string(),
                phone: "".to_string(),
                password: "s3cret".to_string(),
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_remembered_login_survives_reopen() {
        let dir = test_dir();
        let store = store_with_account().await;

        let sessions = SessionStore::open(&dir.path).unwrap();
        let user = sessions
            .login(&store, "jane@clubhouse.test", "s3cret", true)
            .await
            .unwrap();

        let sessions = SessionStore::open(&dir.path).unwrap();
        let cached = sessions.current().unwrap();
        assert_eq!(cached.id, user.id);
        assert_eq!(cached.email, "jane@clubhouse.test");
    }

    #[tokio::test]
    async fn test_login_failure_caches_nothing() {
        let dir = test_dir();
        let store = store_with_account().await;

        let sessions = SessionStore::open(&dir.path).unwrap();
        let result = sessions
            .login(&store, "jane@clubhouse.test", "wrong", true)
            .await;
        assert!(result.is_err());
        assert!(sessions.current().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_both_caches() {
        let dir = test_dir();
        let store = store_with_account().await;

        let sessions = SessionStore::open(&dir.path).unwrap();
        sessions
            .login(&store, "jane@clubhouse.test", "s3cret", false)
            .await
            .unwrap();
        assert!(sessions.current().is_some());

        sessions.clear().unwrap();
        assert!(sessions.current().is_none());
    }

    #[tokio::test]
    async fn test_profile_update_rewrites_cache() {
        let dir = test_dir();
        let store = store_with_account().await;

        let sessions = SessionStore::open(&dir.path).unwrap();
        let mut user = sessions
            .login(&store, "jane@clubhouse.test", "s3cret", true)
            .await
            .unwrap();

        user.name = "Jane Renamed".to_string();
        sessions.profile_updated(&user).unwrap();
        assert_eq!(sessions.current().unwrap().name, "Jane Renamed");
    }

    #[tokio::test]
    async fn test_corrupt_cache_discarded() {
        let dir = test_dir();
        let sessions = SessionStore::open(&dir.path).unwrap();

        fs::write(dir.path.join(LOCAL_FILE), "not json").unwrap();
        assert!(sessions.current().is_none());
        assert!(!dir.path.join(LOCAL_FILE).exists());
    }
}
