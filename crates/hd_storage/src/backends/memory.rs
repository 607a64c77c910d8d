use async_trait::async_trait;
use hd_core::{RawRecord, RecordStore, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{StorageBackend, StoreLocation};

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    records: Arc<RwLock<Vec<RawRecord>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<RawRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl StorageBackend for InMemoryStorage {
    fn get_error_message() -> &'static str {
        "Memory storage should be available"
    }

    async fn open(_location: &StoreLocation) -> Result<Self> {
        Ok(Self::new())
    }
}

#[async_trait]
impl RecordStore for InMemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_all(&self) -> Result<Vec<RawRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn store_record(&self, record: &RawRecord) -> Result<()> {
        self.records.write().await.push(record.clone());
        Ok(())
    }
}
