use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::clean::{TextCleaner, DEFAULT_STOPWORDS};
use crate::filter::{Topic, ALL_TOPICS};
use crate::{Error, Result};

pub const DEFAULT_STORE_URL: &str = "memory://";
pub const DEFAULT_ALL_LABEL: &str = "Semua";
pub const DEFAULT_TOPICS: &[&str] = &["Skoliosis", "Lordosis", "Kifosis"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub store_url: String,
    pub topics: Vec<String>,
    /// Display label that also selects every article.
    pub all_label: String,
    pub stopwords: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            store_url: DEFAULT_STORE_URL.to_string(),
            topics: DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect(),
            all_label: DEFAULT_ALL_LABEL.to_string(),
            stopwords: DEFAULT_STOPWORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl DashboardConfig {
    /// Reads a JSON config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.store_url.trim().is_empty() {
            return Err(Error::Config("store_url must not be empty".to_string()));
        }
        if let Some(topic) = self.topics.iter().find(|t| t.trim().is_empty()) {
            return Err(Error::Config(format!("Blank topic in topic list: {:?}", topic)));
        }
        Ok(())
    }

    pub fn with_store_url(mut self, url: &str) -> Self {
        self.store_url = url.to_string();
        self
    }

    pub fn cleaner(&self) -> TextCleaner {
        TextCleaner::new(&self.stopwords)
    }

    pub fn parse_topic(&self, input: &str) -> Topic {
        Topic::parse(input, &self.all_label)
    }

    /// Selection list offered to the presentation layer, `all` first.
    pub fn topic_choices(&self) -> Vec<String> {
        std::iter::once(ALL_TOPICS.to_string())
            .chain(self.topics.iter().cloned())
            .collect()
    }
}
