//! Test doubles for the persistence layer.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::future::{self, BoxFuture, FutureExt};

use super::AttendanceStore;
use crate::error::StoreError;
use crate::model::attendance::{AttendanceRecord, StoredRecord};
use crate::utils::pagination::PageRequest;

/// Insertion-ordered store that can be switched into a failing state to
/// imitate a lost database connection.
#[derive(Default)]
pub struct MemoryAttendanceStore {
    records: Mutex<Vec<StoredRecord>>,
    offline: AtomicBool,
}

impl MemoryAttendanceStore {
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().unwrap().is_empty()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StoreError::Backend("connection closed".into()))
        } else {
            Ok(())
        }
    }
}

impl AttendanceStore for MemoryAttendanceStore {
    fn insert(&self, record: AttendanceRecord) -> BoxFuture<'_, Result<StoredRecord, StoreError>> {
        let result = self.check_online().map(|_| {
            let mut records = self.records.lock().unwrap();
            let stored = StoredRecord {
                id: format!("{:024x}", records.len() + 1),
                card_id: record.card_id,
                timestamp: record.timestamp,
            };
            records.push(stored.clone());
            stored
        });
        future::ready(result).boxed()
    }

    fn find_all(
        &self,
        page: Option<PageRequest>,
    ) -> BoxFuture<'_, Result<Vec<StoredRecord>, StoreError>> {
        let result = self.check_online().map(|_| {
            let records = self.records.lock().unwrap();
            match page {
                Some(page) => records
                    .iter()
                    .skip(page.offset() as usize)
                    .take(page.limit() as usize)
                    .cloned()
                    .collect(),
                None => records.clone(),
            }
        });
        future::ready(result).boxed()
    }

    fn ping(&self) -> BoxFuture<'_, Result<(), StoreError>> {
        future::ready(self.check_online()).boxed()
    }
}

/// A store whose calls never complete, for exercising the request timeout.
pub struct StallingStore;

impl AttendanceStore for StallingStore {
    fn insert(&self, _: AttendanceRecord) -> BoxFuture<'_, Result<StoredRecord, StoreError>> {
        future::pending().boxed()
    }

    fn find_all(&self, _: Option<PageRequest>) -> BoxFuture<'_, Result<Vec<StoredRecord>, StoreError>> {
        future::pending().boxed()
    }

    fn ping(&self) -> BoxFuture<'_, Result<(), StoreError>> {
        future::pending().boxed()
    }
}
