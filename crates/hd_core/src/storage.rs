use async_trait::async_trait;
use crate::types::RawRecord;
use crate::Result;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short backend name used in logs
    fn name(&self) -> &str;

    /// Fetch every record in the collection, unfiltered and in store order
    async fn fetch_all(&self) -> Result<Vec<RawRecord>>;

    /// Store a raw record
    async fn store_record(&self, record: &RawRecord) -> Result<()>;
}
