use async_trait::async_trait;
use hd_core::{Error, RecordStore, Result};
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use tracing::info;
use url::Url;

pub mod backends;
pub mod document;

pub use backends::*;

fn decode(encoded: &str, raw: &str) -> Result<String> {
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|path| path.into_owned())
        .map_err(|e| Error::InvalidStoreUrl(format!("{}: {}", raw, e)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Memory,
    Json,
    SQLite,
}

/// A parsed store URL: `memory://`, `json:<path>`, `file://<path>` or
/// `sqlite:<path>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    pub kind: StoreKind,
    pub path: Option<PathBuf>,
}

impl StoreLocation {
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw).map_err(|e| Error::InvalidStoreUrl(format!("{}: {}", raw, e)))?;

        let kind = match url.scheme() {
            "memory" => return Ok(Self { kind: StoreKind::Memory, path: None }),
            "json" | "file" => StoreKind::Json,
            "sqlite" => StoreKind::SQLite,
            other => {
                return Err(Error::InvalidStoreUrl(format!("Unsupported store scheme: {}", other)))
            }
        };

        let path = if url.scheme() == "file" {
            url.to_file_path()
                .map_err(|_| Error::InvalidStoreUrl(format!("Not a local file URL: {}", raw)))?
        } else {
            // `sqlite://articles.db` puts the file name in the host slot
            let encoded = format!("{}{}", url.host_str().unwrap_or_default(), url.path());
            PathBuf::from(decode(&encoded, raw)?)
        };
        if path.as_os_str().is_empty() || path == Path::new("/") {
            return Err(Error::InvalidStoreUrl(format!("Missing path in store URL: {}", raw)));
        }

        Ok(Self { kind, path: Some(path) })
    }

    fn require_path(&self) -> Result<&PathBuf> {
        self.path
            .as_ref()
            .ok_or_else(|| Error::InvalidStoreUrl(format!("{:?} store needs a path", self.kind)))
    }
}

#[async_trait]
pub trait StorageBackend: RecordStore + Sized {
    fn get_error_message() -> &'static str;
    async fn open(location: &StoreLocation) -> Result<Self>;
}

async fn open_backend<T: StorageBackend + 'static>(location: &StoreLocation) -> Result<Box<dyn RecordStore>> {
    match T::open(location).await {
        Ok(store) => {
            info!("🏦 Opened {} store", store.name());
            Ok(Box::new(store))
        }
        Err(e) => Err(Error::Storage(format!("{} ({})", T::get_error_message(), e))),
    }
}

/// Opens the store behind `url`. The returned handle owns its connection;
/// dropping it releases the connection.
pub async fn create_store(url: &str) -> Result<Box<dyn RecordStore>> {
    let location = StoreLocation::parse(url)?;
    match location.kind {
        StoreKind::Memory => open_backend::<InMemoryStorage>(&location).await,
        StoreKind::Json => open_backend::<JsonFileStorage>(&location).await,
        #[cfg(feature = "sqlite")]
        StoreKind::SQLite => open_backend::<SQLiteStorage>(&location).await,
        #[cfg(not(feature = "sqlite"))]
        StoreKind::SQLite => Err(Error::Storage(
            "SQLite support not compiled in; rebuild with the `sqlite` feature".to_string(),
        )),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_store, StorageBackend, StoreKind, StoreLocation};
}
