use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use futures::future::{BoxFuture, FutureExt};
use mongodb::bson::doc;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};

use super::AttendanceStore;
use crate::error::StoreError;
use crate::model::attendance::{AttendanceRecord, StoredRecord};
use crate::utils::pagination::PageRequest;

/// On-disk shape: `{_id, cardId, timestamp: Date}`.
#[derive(Debug, Serialize, Deserialize)]
struct AttendanceDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(rename = "cardId")]
    card_id: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    timestamp: DateTime<Utc>,
}

impl From<AttendanceRecord> for AttendanceDocument {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            id: None,
            card_id: record.card_id,
            timestamp: record.timestamp,
        }
    }
}

impl TryFrom<AttendanceDocument> for StoredRecord {
    type Error = StoreError;

    fn try_from(doc: AttendanceDocument) -> Result<Self, Self::Error> {
        let id = doc
            .id
            .ok_or_else(|| StoreError::Backend("attendance document without _id".into()))?;

        Ok(StoredRecord {
            id: id.to_hex(),
            card_id: doc.card_id,
            timestamp: doc.timestamp,
        })
    }
}

/// MongoDB-backed store. `Collection` wraps the driver's shared connection
/// pool, so clones are cheap and safe across workers.
#[derive(Clone)]
pub struct MongoAttendanceStore {
    database: Database,
    collection: Collection<AttendanceDocument>,
}

impl MongoAttendanceStore {
    pub fn new(database: &Database, collection_name: &str) -> Self {
        Self {
            database: database.clone(),
            collection: database.collection(collection_name),
        }
    }
}

impl AttendanceStore for MongoAttendanceStore {
    fn insert(&self, record: AttendanceRecord) -> BoxFuture<'_, Result<StoredRecord, StoreError>> {
        async move {
            let mut document = AttendanceDocument::from(record);
            let result = self.collection.insert_one(&document).await?;

            let id = result.inserted_id.as_object_id().ok_or_else(|| {
                StoreError::Backend(format!(
                    "insert returned a non-ObjectId identifier: {}",
                    result.inserted_id
                ))
            })?;
            document.id = Some(id);

            StoredRecord::try_from(document)
        }
        .boxed()
    }

    fn find_all(
        &self,
        page: Option<PageRequest>,
    ) -> BoxFuture<'_, Result<Vec<StoredRecord>, StoreError>> {
        async move {
            let mut find = self.collection.find(doc! {});
            if let Some(page) = page {
                find = find
                    .sort(doc! { "_id": 1 })
                    .skip(page.offset())
                    .limit(i64::try_from(page.limit()).unwrap_or(i64::MAX));
            }

            let documents: Vec<AttendanceDocument> = find.await?.try_collect().await?;

            documents
                .into_iter()
                .map(StoredRecord::try_from)
                .collect::<Result<Vec<_>, _>>()
        }
        .boxed()
    }

    fn ping(&self) -> BoxFuture<'_, Result<(), StoreError>> {
        async move {
            self.database.run_command(doc! { "ping": 1 }).await?;
            Ok::<_, StoreError>(())
        }
        .boxed()
    }
}
