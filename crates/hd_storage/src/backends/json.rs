use async_trait::async_trait;
use hd_core::{Error, RawRecord, RecordStore, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::document::{from_document, to_document};
use crate::{StorageBackend, StoreLocation};

/// A collection dump on disk, either one JSON array or one document per line.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn get_path(&self) -> &Path {
        &self.path
    }

    async fn read_documents(&self) -> Result<Vec<Value>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::Storage(format!("Dump file not found: {}", self.path.display())))
            }
            Err(e) => return Err(e.into()),
        };

        let trimmed = raw.trim_start();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        if trimmed.starts_with('[') {
            return Ok(serde_json::from_str(trimmed)?);
        }

        let mut docs = Vec::new();
        for (i, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let doc = serde_json::from_str(line).map_err(|e| {
                Error::Storage(format!("{}:{}: invalid document: {}", self.path.display(), i + 1, e))
            })?;
            docs.push(doc);
        }
        Ok(docs)
    }

    async fn is_array_file(&self) -> Result<bool> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(raw.trim_start().starts_with('[')),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl StorageBackend for JsonFileStorage {
    fn get_error_message() -> &'static str {
        "JSON document dump should be readable"
    }

    async fn open(location: &StoreLocation) -> Result<Self> {
        let path = location.require_path()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                return Err(Error::Storage(format!("Directory does not exist: {}", parent.display())));
            }
        }
        Ok(Self::new(path.clone()))
    }
}

#[async_trait]
impl RecordStore for JsonFileStorage {
    fn name(&self) -> &str {
        "json"
    }

    async fn fetch_all(&self) -> Result<Vec<RawRecord>> {
        let docs = self.read_documents().await?;
        let total = docs.len();
        let records: Vec<RawRecord> = docs.iter().filter_map(from_document).collect();
        if records.len() < total {
            warn!("Skipped {} non-object entries in {}", total - records.len(), self.path.display());
        }
        debug!("Read {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    async fn store_record(&self, record: &RawRecord) -> Result<()> {
        let doc = to_document(record);

        if self.is_array_file().await? {
            let mut docs = self.read_documents().await?;
            docs.push(doc);
            // Replace through a sibling file so a failed write leaves the dump intact
            let mut tmp_path = self.path.clone().into_os_string();
            tmp_path.push(".tmp");
            let tmp_path = PathBuf::from(tmp_path);
            fs::write(&tmp_path, serde_json::to_string_pretty(&docs)?).await?;
            fs::rename(&tmp_path, &self.path).await?;
            return Ok(());
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{}\n", serde_json::to_string(&doc)?).as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
