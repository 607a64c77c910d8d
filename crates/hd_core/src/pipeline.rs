//! One fetch → normalize → filter → aggregate pass.

use serde::Serialize;
use std::fmt;
use tracing::info;

use crate::aggregate::{
    corpus_join, metadata_table, top_word_per_year, word_frequencies, yearly_counts, ArticleRow,
    TopWord, WordFrequency, YearCount,
};
use crate::clean::TextCleaner;
use crate::filter::{filter_by_topic, Topic};
use crate::normalize::{normalize_all, DateWarning};
use crate::storage::RecordStore;
use crate::Result;

pub const DEFAULT_CLOUD_SIZE: usize = 50;

/// Reasons a run stops before anything is aggregated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EmptySource,
    NoArticlesForTopic(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::EmptySource => write!(f, "No data found in the record store."),
            Notice::NoArticlesForTopic(topic) => write!(f, "No articles found for topic '{}'.", topic),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub topic: String,
    /// True when no topic filter was applied.
    pub all_topics: bool,
    pub total_articles: usize,
    pub shown_articles: usize,
    pub yearly_counts: Vec<YearCount>,
    /// Word-cloud input.
    pub corpus_text: String,
    pub word_cloud: Vec<WordFrequency>,
    pub top_words: Vec<TopWord>,
    pub articles: Vec<ArticleRow>,
    pub warnings: Vec<DateWarning>,
}

impl Dashboard {
    pub fn banner(&self) -> String {
        if self.all_topics {
            "Showing all articles (no topic filter)".to_string()
        } else {
            format!("Showing articles for topic: {}", self.topic)
        }
    }
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    Rendered(Dashboard),
    Halted(Notice),
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub topic: Topic,
    pub cleaner: TextCleaner,
    pub cloud_size: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            topic: Topic::All,
            cleaner: TextCleaner::default(),
            cloud_size: DEFAULT_CLOUD_SIZE,
        }
    }
}

pub async fn run(store: &dyn RecordStore, options: &RunOptions) -> Result<RunOutcome> {
    info!("📥 Fetching records from {} store", store.name());
    let records = store.fetch_all().await?;
    if records.is_empty() {
        return Ok(RunOutcome::Halted(Notice::EmptySource));
    }

    let total = records.len();
    let (articles, warnings) = normalize_all(records, &options.cleaner);
    if !warnings.is_empty() {
        info!("⚠️ {} of {} records fell back to the default date", warnings.len(), total);
    }

    let filtered = filter_by_topic(&articles, &options.topic);
    if filtered.is_empty() {
        return Ok(RunOutcome::Halted(Notice::NoArticlesForTopic(options.topic.to_string())));
    }
    info!("🔍 {} of {} articles match topic '{}'", filtered.len(), total, options.topic);

    let corpus_text = corpus_join(&filtered);
    let dashboard = Dashboard {
        topic: options.topic.to_string(),
        all_topics: options.topic == Topic::All,
        total_articles: total,
        shown_articles: filtered.len(),
        yearly_counts: yearly_counts(&filtered),
        word_cloud: word_frequencies(&corpus_text, options.cloud_size),
        corpus_text,
        top_words: top_word_per_year(&filtered),
        articles: metadata_table(&filtered),
        warnings,
    };

    Ok(RunOutcome::Rendered(dashboard))
}
