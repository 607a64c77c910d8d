use async_trait::async_trait;
use hd_core::{Error, RawRecord, RawTimestamp, RecordStore, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool};
use sqlx::Row;
use std::path::{Path, PathBuf};

use crate::{StorageBackend, StoreLocation};

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT,
        content TEXT,
        published_at TEXT
    )
    "#,
    // Add future migrations here
];

pub struct SQLiteStorage {
    pool: SqlitePool,
    db_path: PathBuf,
}

#[async_trait]
impl StorageBackend for SQLiteStorage {
    fn get_error_message() -> &'static str {
        "SQLite database should be available"
    }

    async fn open(location: &StoreLocation) -> Result<Self> {
        Self::new_with_path(location.require_path()?).await
    }
}

impl SQLiteStorage {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("Failed to create database directory: {}", e)))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| Error::Storage(format!("Failed to connect to database: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Storage(format!("Failed to run migration {}: {}", i, e)))?;
        }

        Ok(Self {
            pool,
            db_path: db_path.to_path_buf(),
        })
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }
}

#[async_trait]
impl RecordStore for SQLiteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn fetch_all(&self) -> Result<Vec<RawRecord>> {
        let rows = sqlx::query("SELECT title, content, published_at FROM articles ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("Failed to fetch articles: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|row| RawRecord {
                title: row.get::<Option<String>, _>("title"),
                content: row.get::<Option<String>, _>("content"),
                published_at: row
                    .get::<Option<String>, _>("published_at")
                    .map(RawTimestamp::Text),
            })
            .collect())
    }

    async fn store_record(&self, record: &RawRecord) -> Result<()> {
        let published_at = record.published_at.as_ref().map(|ts| match ts {
            RawTimestamp::Structured(dt) => dt.to_rfc3339(),
            RawTimestamp::Text(text) => text.clone(),
        });

        sqlx::query("INSERT INTO articles (title, content, published_at) VALUES (?, ?, ?)")
            .bind(record.title.as_deref())
            .bind(record.content.as_deref())
            .bind(published_at)
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("Failed to store article: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_sqlite_storage() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("nested").join("test.db");

        let storage = SQLiteStorage::new_with_path(&db_path).await.unwrap();
        assert!(storage.fetch_all().await.unwrap().is_empty());

        storage
            .store_record(&RawRecord::new("Skoliosis", "Tulang belakang", "2020-03-01"))
            .await
            .unwrap();
        storage.store_record(&RawRecord::default()).await.unwrap();

        let records = storage.fetch_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], RawRecord::new("Skoliosis", "Tulang belakang", "2020-03-01"));
        assert_eq!(records[1], RawRecord::default());
        assert_eq!(storage.get_db_path(), db_path.as_path());
    }
}
