use std::fmt;

use crate::types::Article;

pub const ALL_TOPICS: &str = "all";

/// Topic selection for a dashboard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Topic {
    All,
    Keyword(String),
}

impl Topic {
    /// Maps `"all"` (any case), the configured all-label and blank input to
    /// [`Topic::All`]; everything else is a keyword.
    pub fn parse(input: &str, all_label: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case(ALL_TOPICS)
            || trimmed.to_lowercase() == all_label.trim().to_lowercase()
        {
            Topic::All
        } else {
            Topic::Keyword(trimmed.to_string())
        }
    }

    pub fn matches(&self, article: &Article) -> bool {
        match self {
            Topic::All => true,
            Topic::Keyword(keyword) => {
                let needle = keyword.to_lowercase();
                article.title.to_lowercase().contains(&needle)
                    || article.content.to_lowercase().contains(&needle)
            }
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::All => write!(f, "{}", ALL_TOPICS),
            Topic::Keyword(keyword) => write!(f, "{}", keyword),
        }
    }
}

pub fn filter_by_topic<'a>(articles: &'a [Article], topic: &Topic) -> Vec<&'a Article> {
    articles.iter().filter(|article| topic.matches(article)).collect()
}
