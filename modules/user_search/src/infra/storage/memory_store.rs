use std::sync::Arc;

use async_trait::async_trait;

use crate::contract::model::UserRecord;
use crate::domain::repo::RecordStore;

/// Fixed in-memory dataset, for tests and for embedding the service.
#[derive(Clone, Debug, Default)]
pub struct InMemoryRecordStore {
    records: Arc<Vec<UserRecord>>,
}

impl InMemoryRecordStore {
    pub fn new(records: Vec<UserRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn load_all(&self) -> anyhow::Result<Arc<Vec<UserRecord>>> {
        Ok(self.records.clone())
    }
}
