//! Text normalisation shared by the word count, the word cloud and the
//! per-year frequency table.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref WORD_RUN: Regex = Regex::new(r"\w+").unwrap();
    static ref DIGITS: Regex = Regex::new(r"\d+").unwrap();
    static ref NON_LETTERS: Regex = Regex::new(r"[^\p{Alphabetic}\p{M}]+").unwrap();
}

/// Indonesian function words excluded from cleaned text.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "dan", "di", "ke", "dari", "yang", "untuk", "dengan", "pada", "adalah",
    "ini", "itu", "atau", "juga", "karena", "sebagai", "oleh", "dalam", "agar",
    "bisa", "tidak", "anda", "jika", "namun", "dapat", "saat", "berikut",
    "dilakukan", "seperti", "akan", "selain",
];

/// Number of maximal runs of word characters (letters, digits, underscore).
pub fn word_count(text: &str) -> usize {
    WORD_RUN.find_iter(text).count()
}

#[derive(Debug, Clone)]
pub struct TextCleaner {
    stopwords: HashSet<String>,
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new(DEFAULT_STOPWORDS.iter().copied())
    }
}

impl TextCleaner {
    pub fn new<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: stopwords
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Lowercases, drops digits and punctuation, removes stopwords and
    /// rejoins the surviving tokens with single spaces.
    pub fn clean(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let lowered = text.to_lowercase();
        let without_digits = DIGITS.replace_all(&lowered, "");
        let spaced = NON_LETTERS.replace_all(&without_digits, " ");

        spaced
            .split_whitespace()
            .filter(|token| !self.is_stopword(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("Nyeri punggung, 3 kali_sehari!"), 4);
        assert_eq!(word_count("   ...   "), 0);
    }

    #[test]
    fn test_clean_strips_digits_punctuation_and_stopwords() {
        let cleaner = TextCleaner::default();
        let cleaned = cleaner.clean("Skoliosis adalah kelainan 2 tulang-belakang, dan BISA diobati!");
        assert_eq!(cleaned, "skoliosis kelainan tulang belakang diobati");
    }

    #[test]
    fn test_clean_joins_digit_split_words() {
        let cleaner = TextCleaner::default();
        assert_eq!(cleaner.clean("covid19 abc123def"), "covid abcdef");
    }

    #[test]
    fn test_clean_treats_underscore_as_separator() {
        let cleaner = TextCleaner::default();
        assert_eq!(cleaner.clean("postur_tubuh"), "postur tubuh");
    }

    #[test]
    fn test_clean_splits_on_connector_punctuation() {
        let cleaner = TextCleaner::default();
        assert_eq!(cleaner.clean("postur\u{203F}tubuh"), "postur tubuh");
        assert_eq!(cleaner.clean("tulang\u{200D}belakang"), "tulang belakang");
        assert_eq!(cleaner.clean("naïve café"), "naïve café");
    }

    #[test]
    fn test_clean_empty_input() {
        let cleaner = TextCleaner::default();
        assert_eq!(cleaner.clean(""), "");
        assert_eq!(cleaner.clean("123 456 !!!"), "");
        assert_eq!(cleaner.clean("dan yang di"), "");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let cleaner = TextCleaner::default();
        let samples = [
            "Kifosis: punggung bungkuk, 2023.",
            "ÉTUDE über Ärzte -- dan Lordosis",
            "a_b c-d e.f 12g",
            "",
        ];
        for sample in samples {
            let once = cleaner.clean(sample);
            assert_eq!(cleaner.clean(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_clean_output_has_only_letters() {
        let cleaner = TextCleaner::default();
        let cleaned = cleaner.clean("Olahraga 3x seminggu (30 menit) untuk postur & keseimbangan.");
        assert!(cleaned.chars().all(|c| c.is_alphabetic() || c == ' '));
        assert!(cleaned.split(' ').all(|w| !cleaner.is_stopword(w)));
    }

    #[test]
    fn test_custom_stopwords_are_lowercased() {
        let cleaner = TextCleaner::new(["Tulang", " NYERI "]);
        assert_eq!(cleaner.clean("tulang nyeri punggung"), "punggung");
    }
}
