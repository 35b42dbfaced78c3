//! Backing store: the abstract persistence collaborator, plus the in-memory
//! sample implementation. Any store with unique, stable ids and
//! `None`-signaled not-found substitutes without touching the core.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence operations the CRUD orchestrator composes over. The store owns
/// all shared mutable state and serializes id allocation; operations are
/// atomic from the caller's point of view.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Persist a new entity from a partial record; the store assigns the id
    /// and timestamps. Returns the stored entity.
    async fn create(&self, partial: Value) -> Result<Value, StoreError>;

    async fn find_all(&self) -> Result<Vec<Value>, StoreError>;

    /// `None` when no entity has the id.
    async fn find_one(&self, id: i64) -> Result<Option<Value>, StoreError>;

    /// Merge the partial onto the stored entity. The id is stable: an `id`
    /// key in the partial is ignored. `None` when the id is unknown.
    async fn update(&self, id: i64, partial: Value) -> Result<Option<Value>, StoreError>;

    /// `false` when the id is unknown.
    async fn remove(&self, id: i64) -> Result<bool, StoreError>;
}

struct Rows {
    rows: Vec<Value>,
    next_id: i64,
}

/// In-memory store: a list plus a monotonically increasing id counter behind
/// a mutex.
pub struct MemoryStore {
    inner: Mutex<Rows>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            inner: Mutex::new(Rows { rows: Vec::new(), next_id: 1 }),
        }
    }

    fn locked(&self) -> Result<MutexGuard<'_, Rows>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn as_object(partial: Value) -> Map<String, Value> {
    match partial {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn create(&self, partial: Value) -> Result<Value, StoreError> {
        let mut inner = self.locked()?;
        let id = inner.next_id;
        inner.next_id += 1;
        let now = Utc::now().to_rfc3339();
        let mut row = as_object(partial);
        row.insert("id".into(), Value::Number(id.into()));
        row.insert("createdAt".into(), Value::String(now.clone()));
        row.insert("updatedAt".into(), Value::String(now));
        let row = Value::Object(row);
        inner.rows.push(row.clone());
        tracing::debug!(id, total = inner.rows.len(), "store create");
        Ok(row)
    }

    async fn find_all(&self) -> Result<Vec<Value>, StoreError> {
        let inner = self.locked()?;
        tracing::debug!(total = inner.rows.len(), "store find_all");
        Ok(inner.rows.clone())
    }

    async fn find_one(&self, id: i64) -> Result<Option<Value>, StoreError> {
        let inner = self.locked()?;
        tracing::debug!(id, "store find_one");
        Ok(inner.rows.iter().find(|r| row_id(r) == Some(id)).cloned())
    }

    async fn update(&self, id: i64, partial: Value) -> Result<Option<Value>, StoreError> {
        let mut inner = self.locked()?;
        tracing::debug!(id, "store update");
        let row = match inner.rows.iter_mut().find(|r| row_id(r) == Some(id)) {
            Some(row) => row,
            None => return Ok(None),
        };
        if let Value::Object(ref mut target) = row {
            for (k, v) in as_object(partial) {
                if k == "id" {
                    continue;
                }
                target.insert(k, v);
            }
            target.insert("updatedAt".into(), Value::String(Utc::now().to_rfc3339()));
        }
        Ok(Some(row.clone()))
    }

    async fn remove(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.locked()?;
        let before = inner.rows.len();
        inner.rows.retain(|r| row_id(r) != Some(id));
        let removed = inner.rows.len() < before;
        tracing::debug!(id, removed, "store remove");
        Ok(removed)
    }
}

fn row_id(row: &Value) -> Option<i64> {
    row.get("id").and_then(Value::as_i64)
}
