use futures::future::BoxFuture;

use crate::error::StoreError;
use crate::model::attendance::{AttendanceRecord, StoredRecord};
use crate::utils::pagination::PageRequest;

#[cfg(test)]
pub mod memory;
pub mod mongo;

/// Durable home for attendance records. Records are append-only: there is
/// no update or delete.
pub trait AttendanceStore: Send + Sync {
    /// Persists one record and returns it with its assigned id. A failed
    /// insert must leave nothing visible to later reads.
    fn insert(&self, record: AttendanceRecord) -> BoxFuture<'_, Result<StoredRecord, StoreError>>;

    /// Every persisted record in the store's natural order, or one page of
    /// them ordered by id.
    fn find_all(
        &self,
        page: Option<PageRequest>,
    ) -> BoxFuture<'_, Result<Vec<StoredRecord>, StoreError>>;

    fn ping(&self) -> BoxFuture<'_, Result<(), StoreError>>;
}
