//! Repository interface and its in-memory implementation.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use super::entity::Entity;
use super::error::StoreError;

/// Keyed access to one kind of record.
///
/// Reads return owned copies; callers hand those snapshots to the
/// calculation code, which never sees the repository itself.
pub trait Repository<T: Entity>: Send + Sync {
    /// Looks up a record by ID.
    fn get(&self, id: &T::Id) -> Option<T>;

    /// Records matching `filter`, in insertion order.
    fn list(&self, filter: &dyn Fn(&T) -> bool) -> Vec<T>;

    /// Inserts or replaces a record. Returns the previous version, if any.
    fn upsert(&self, record: T) -> Option<T>;

    /// Removes a record. Returns it, if it existed.
    fn delete(&self, id: &T::Id) -> Option<T>;

    /// Every record, in insertion order.
    fn all(&self) -> Vec<T> {
        self.list(&|_| true)
    }

    /// Like [`Self::get`], but a missing record is an error.
    fn require(&self, id: &T::Id) -> Result<T, StoreError> {
        self.get(id).ok_or_else(|| StoreError::NotFound {
            kind: T::KIND,
            id: id.to_string(),
        })
    }
}

/// Repository backed by a concurrent hash map.
///
/// Each record keeps the sequence number of its first insertion, so
/// replacing a record does not move it in listings.
#[derive(Debug)]
pub struct InMemoryRepository<T: Entity> {
    rows: DashMap<T::Id, (u64, T)>,
    sequence: AtomicU64,
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            rows: DashMap::new(),
            sequence: AtomicU64::new(0),
        }
    }
}

impl<T: Entity> InMemoryRepository<T> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Removes every record matching `filter`. Returns how many were removed.
    pub fn delete_where(&self, filter: impl Fn(&T) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|_, (_, record)| !filter(record));
        before - self.rows.len()
    }
}

impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    fn get(&self, id: &T::Id) -> Option<T> {
        self.rows.get(id).map(|entry| entry.value().1.clone())
    }

    fn list(&self, filter: &dyn Fn(&T) -> bool) -> Vec<T> {
        let mut rows: Vec<(u64, T)> = self
            .rows
            .iter()
            .filter(|entry| filter(&entry.value().1))
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);
        rows.into_iter().map(|(_, record)| record).collect()
    }

    fn upsert(&self, record: T) -> Option<T> {
        let id = record.id().clone();
        if let Some(mut existing) = self.rows.get_mut(&id) {
            let seq = existing.0;
            return Some(std::mem::replace(&mut *existing, (seq, record)).1);
        }
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.rows.insert(id, (seq, record)).map(|(_, previous)| previous)
    }

    fn delete(&self, id: &T::Id) -> Option<T> {
        self.rows.remove(id).map(|(_, (_, record))| record)
    }
}
