use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::constraint::{CheckConstraint, UniqueKey};
use crate::error::{DatabaseError, DatabaseResult};

/// A row of one catalog table
pub trait Row: Clone + Send + Sync + 'static {
    /// Table name as it appears in the schema
    const TABLE: &'static str;

    fn id(&self) -> Uuid;

    fn set_id(&mut self, id: Uuid);

    fn unique_keys(&self) -> Vec<UniqueKey> {
        Vec::new()
    }

    fn checks(&self) -> Vec<CheckConstraint> {
        Vec::new()
    }
}

/// Predicate over rows used by [`Repository::find`]
pub type RowFilter<'a, T> = &'a (dyn Fn(&T) -> bool + Send + Sync);

/// Storage interface for one table
///
/// Every mutation either applies completely or returns an error and leaves
/// the table untouched.
#[async_trait]
pub trait Repository<T: Row>: Send + Sync {
    /// Insert a row; a nil id is replaced by a fresh one
    async fn insert(&self, row: T) -> DatabaseResult<T>;

    /// Replace an existing row
    async fn update(&self, row: T) -> DatabaseResult<T>;

    /// Remove a row by id
    async fn delete(&self, id: Uuid) -> DatabaseResult<T>;

    async fn get(&self, id: Uuid) -> DatabaseResult<Option<T>>;

    async fn list(&self) -> DatabaseResult<Vec<T>>;

    /// Rows matching the predicate
    async fn find(&self, filter: RowFilter<'_, T>) -> DatabaseResult<Vec<T>>;

    /// Fetch a row that must exist
    async fn require(&self, id: Uuid) -> DatabaseResult<T> {
        self.get(id)
            .await?
            .ok_or(DatabaseError::NotFound { table: T::TABLE, id })
    }
}

/// In-memory table for tests, demos and embedded use
///
/// Constraint checks and the mutation run under the same write lock.
pub struct InMemoryRepository<T: Row> {
    rows: Arc<RwLock<BTreeMap<Uuid, T>>>,
}

impl<T: Row> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    fn enforce(rows: &BTreeMap<Uuid, T>, candidate: &T) -> DatabaseResult<()> {
        if let Some(failed) = candidate.checks().into_iter().find(|check| !check.holds) {
            return Err(DatabaseError::constraint_violation(failed.constraint));
        }

        let keys = candidate.unique_keys();
        for existing in rows.values().filter(|row| row.id() != candidate.id()) {
            for existing_key in existing.unique_keys() {
                if let Some(clash) = keys.iter().find(|key| key.conflicts_with(&existing_key)) {
                    return Err(DatabaseError::constraint_violation(clash.constraint));
                }
            }
        }
        Ok(())
    }
}

impl<T: Row> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Row> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

#[async_trait]
impl<T: Row> Repository<T> for InMemoryRepository<T> {
    async fn insert(&self, mut row: T) -> DatabaseResult<T> {
        if row.id().is_nil() {
            row.set_id(Uuid::new_v4());
        }

        let mut rows = self.rows.write();
        if rows.contains_key(&row.id()) {
            return Err(DatabaseError::InternalError(anyhow::anyhow!(
                "duplicate primary key {} in {}",
                row.id(),
                T::TABLE
            )));
        }
        Self::enforce(&rows, &row)?;
        rows.insert(row.id(), row.clone());
        debug!(table = T::TABLE, id = %row.id(), "Row inserted");
        Ok(row)
    }

    async fn update(&self, row: T) -> DatabaseResult<T> {
        let mut rows = self.rows.write();
        if !rows.contains_key(&row.id()) {
            return Err(DatabaseError::NotFound {
                table: T::TABLE,
                id: row.id(),
            });
        }
        Self::enforce(&rows, &row)?;
        rows.insert(row.id(), row.clone());
        debug!(table = T::TABLE, id = %row.id(), "Row updated");
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<T> {
        let removed = self
            .rows
            .write()
            .remove(&id)
            .ok_or(DatabaseError::NotFound { table: T::TABLE, id })?;
        debug!(table = T::TABLE, id = %id, "Row deleted");
        Ok(removed)
    }

    async fn get(&self, id: Uuid) -> DatabaseResult<Option<T>> {
        Ok(self.rows.read().get(&id).cloned())
    }

    async fn list(&self) -> DatabaseResult<Vec<T>> {
        Ok(self.rows.read().values().cloned().collect())
    }

    async fn find(&self, filter: RowFilter<'_, T>) -> DatabaseResult<Vec<T>> {
        Ok(self
            .rows
            .read()
            .values()
            .filter(|row| filter(row))
            .cloned()
            .collect())
    }
}
