use anyhow::Result;
use async_trait::async_trait;

/// Filtered lookup over a whole collection. `Filter` is the
/// per-entity struct of optional predicates (`UserFilter`,
/// `PaymentFilter`, ...); a default filter matches everything.
#[async_trait]
pub trait Query<T> {
    type Filter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<T>>;
}

/// Add a record to its collection. Implementations fill in missing
/// defaults (id, avatar, dates, initial credentials) and return the
/// record as stored.
#[async_trait]
pub trait Insert<T> {
    async fn insert(&self, item: T) -> Result<T>;
}

/// Replace a stored record wholesale, keyed by its id. Fails when the
/// record does not exist; replaying the same update changes nothing.
#[async_trait]
pub trait Update<T> {
    async fn update(&self, item: T) -> Result<T>;
}

/// Fetch one record by key. `Key` is the entity id for every
/// collection here; a miss is an error, not an empty result.
#[async_trait]
pub trait Retrieve<T> {
    type Key;
    async fn retrieve(&self, key: Self::Key) -> Result<T>;
}

/// Remove a record along with whatever hangs off it (a member's
/// payments and credentials, for instance).
#[async_trait]
pub trait Delete<T> {
    async fn delete(&self, item: T) -> Result<()>;
}
