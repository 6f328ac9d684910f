use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use actix_web::rt::time::timeout;

use crate::error::StoreError;
use crate::model::attendance::{AttendanceRecord, StoredRecord};
use crate::store::AttendanceStore;
use crate::utils::pagination::PageRequest;

/// Handle to the persistence layer shared by all request handlers.
///
/// Built once in `main` and handed to the app as `web::Data`. Every call is
/// bounded by `store_timeout`; expiry is reported as [`StoreError::Timeout`].
pub struct AttendanceService {
    store: Arc<dyn AttendanceStore>,
    store_timeout: Duration,
}

impl AttendanceService {
    pub fn new(store: Arc<dyn AttendanceStore>, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }

    pub async fn record(&self, record: AttendanceRecord) -> Result<StoredRecord, StoreError> {
        self.bounded(self.store.insert(record)).await
    }

    pub async fn list(&self, page: Option<PageRequest>) -> Result<Vec<StoredRecord>, StoreError> {
        self.bounded(self.store.find_all(page)).await
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.bounded(self.store.ping()).await
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        timeout(self.store_timeout, call)
            .await
            .unwrap_or(Err(StoreError::Timeout(self.store_timeout)))
    }
}
