//! Plain-text rendering of a dashboard for the terminal.

use hd_core::aggregate::{ArticleRow, TopWord, WordFrequency, YearCount};
use hd_core::Dashboard;
use std::fmt::Write;

const BAR_WIDTH: usize = 40;
const TITLE_WIDTH: usize = 48;

fn bar(value: usize, max: usize) -> String {
    if max == 0 || value == 0 {
        return String::new();
    }
    let len = ((value * BAR_WIDTH) + max - 1) / max;
    "█".repeat(len.max(1))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}\n{}", title, "─".repeat(title.chars().count()));
}

pub fn render_yearly_counts(counts: &[YearCount]) -> String {
    let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
    let mut out = String::new();
    for c in counts {
        let _ = writeln!(out, "{:>6} │ {} {}", c.year, bar(c.count, max), c.count);
    }
    out
}

pub fn render_word_cloud(words: &[WordFrequency]) -> String {
    let width = words.iter().map(|w| w.word.chars().count()).max().unwrap_or(0);
    let max = words.first().map(|w| w.count).unwrap_or(0);
    let mut out = String::new();
    for w in words {
        let _ = writeln!(out, "{:<width$} │ {} {}", w.word, bar(w.count, max), w.count, width = width);
    }
    out
}

pub fn render_top_words(top: &[TopWord]) -> String {
    let max = top.iter().map(|t| t.count).max().unwrap_or(0);
    let mut out = String::new();
    for t in top {
        let _ = writeln!(out, "{:>6} │ {} {} ({})", t.year, bar(t.count, max), t.word, t.count);
    }
    out
}

pub fn render_articles(rows: &[ArticleRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<width$}  {:<10}  {:>6}", "Title", "Published", "Words", width = TITLE_WIDTH);
    for row in rows {
        let title = if row.title.is_empty() { "(untitled)" } else { row.title.as_str() };
        let _ = writeln!(
            out,
            "{:<width$}  {:<10}  {:>6}",
            truncate(title, TITLE_WIDTH),
            row.published_at.format("%Y-%m-%d").to_string(),
            row.word_count,
            width = TITLE_WIDTH,
        );
    }
    out
}

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📘 {}", dashboard.banner());
    let _ = writeln!(
        out,
        "Articles shown: {} of {}",
        dashboard.shown_articles, dashboard.total_articles
    );
    for warning in &dashboard.warnings {
        let _ = writeln!(out, "⚠️  {}", warning);
    }

    heading(&mut out, "📅 Articles per publication year");
    out.push_str(&render_yearly_counts(&dashboard.yearly_counts));

    heading(&mut out, "☁️  Word cloud");
    if dashboard.word_cloud.is_empty() {
        out.push_str("(no words left after cleaning)\n");
    } else {
        out.push_str(&render_word_cloud(&dashboard.word_cloud));
    }

    heading(&mut out, "🔝 Top word per year");
    out.push_str(&render_top_words(&dashboard.top_words));

    heading(&mut out, "📄 Articles");
    out.push_str(&render_articles(&dashboard.articles));
    out
}
