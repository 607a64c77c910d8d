//! Read-only reductions over a filtered article set.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::types::Article;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopWord {
    pub year: i32,
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

/// One row of the article metadata table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRow {
    pub title: String,
    pub published_at: DateTime<FixedOffset>,
    pub word_count: usize,
}

pub fn yearly_counts(articles: &[&Article]) -> Vec<YearCount> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for article in articles {
        *counts.entry(article.year).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// Joins every article's cleaned text in input order.
pub fn corpus_join(articles: &[&Article]) -> String {
    articles
        .iter()
        .map(|article| article.clean_content.as_str())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn count_tokens<'a>(tokens: impl Iterator<Item = &'a str>) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// Higher count first, then the lexicographically smaller word.
fn by_rank(a: &(&str, usize), b: &(&str, usize)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Most frequent token per year, ascending by year. Ties go to the
/// lexicographically smallest token; years without tokens are skipped.
pub fn top_word_per_year(articles: &[&Article]) -> Vec<TopWord> {
    let mut by_year: BTreeMap<i32, Vec<&str>> = BTreeMap::new();
    for article in articles {
        by_year
            .entry(article.year)
            .or_default()
            .extend(article.clean_content.split_whitespace());
    }

    by_year
        .into_iter()
        .filter_map(|(year, tokens)| {
            count_tokens(tokens.into_iter())
                .into_iter()
                .min_by(by_rank)
                .map(|(word, count)| TopWord {
                    year,
                    word: word.to_string(),
                    count,
                })
        })
        .collect()
}

/// Word-cloud weights for a joined corpus, most frequent first.
pub fn word_frequencies(text: &str, limit: usize) -> Vec<WordFrequency> {
    let mut ranked: Vec<(&str, usize)> = count_tokens(text.split_whitespace()).into_iter().collect();
    ranked.sort_by(by_rank);
    ranked
        .into_iter()
        .take(limit)
        .map(|(word, count)| WordFrequency {
            word: word.to_string(),
            count,
        })
        .collect()
}

pub fn metadata_table(articles: &[&Article]) -> Vec<ArticleRow> {
    articles
        .iter()
        .map(|article| ArticleRow {
            title: article.title.clone(),
            published_at: article.published_at,
            word_count: article.word_count,
        })
        .collect()
}
