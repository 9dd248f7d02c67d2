//! Crawl results: the merged histogram and the error log

use crate::processor::ProcessError;
use std::collections::HashMap;

/// One failed page: the URL and what went wrong
///
/// Entries appear in completion order, not discovery order.
#[derive(Debug)]
pub struct PageFailure {
    pub url: String,
    pub error: ProcessError,
}

/// A word and its total occurrence count across the crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

/// The outcome of a crawl run
///
/// The histogram is the additive merge of every successfully processed page's
/// word counts; merge order never affects the totals. When a run was
/// interrupted, both structures reflect exactly the pages that finished
/// before the drain completed.
#[derive(Debug, Default)]
pub struct CrawlReport {
    pub(crate) words: HashMap<String, u64>,
    pub(crate) failures: Vec<PageFailure>,
    pub(crate) interrupted: bool,
    pub(crate) pages_visited: usize,
}

impl CrawlReport {
    /// Returns the `n` most frequent words, descending by count
    ///
    /// Ties are broken by ascending lexical order, so the ranking is
    /// deterministic across runs.
    pub fn top_words(&self, n: usize) -> Vec<WordCount> {
        let mut entries: Vec<WordCount> = self
            .words
            .iter()
            .map(|(word, &count)| WordCount {
                word: word.clone(),
                count,
            })
            .collect();

        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        entries.truncate(n);
        entries
    }

    /// The pages that failed to process, in completion order
    pub fn failures(&self) -> &[PageFailure] {
        &self.failures
    }

    /// Whether the run was cut short by cancellation
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }

    /// Number of unique URLs dispatched over the run
    pub fn pages_visited(&self) -> usize {
        self.pages_visited
    }

    /// Total count recorded for one word
    pub fn word_count(&self, word: &str) -> u64 {
        self.words.get(word).copied().unwrap_or(0)
    }
}

/// Prints the error log and the top-N table to stdout
pub fn print_report(report: &CrawlReport, top_n: usize) {
    if report.failures().is_empty() {
        println!("No errors occurred in run.");
    } else {
        for failure in report.failures() {
            println!("'{}': error occurred: {}", failure.url, failure.error);
        }
    }

    println!("top {} word totals:", top_n);
    for (i, entry) in report.top_words(top_n).iter().enumerate() {
        println!("[{}] {}: {}", i + 1, entry.word, entry.count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with(words: &[(&str, u64)]) -> CrawlReport {
        CrawlReport {
            words: words
                .iter()
                .map(|(w, c)| (w.to_string(), *c))
                .collect(),
            ..CrawlReport::default()
        }
    }

    #[test]
    fn test_top_words_descending_by_count() {
        let report = report_with(&[("alpha", 3), ("bravo", 7), ("charlie", 5)]);
        let top = report.top_words(3);
        assert_eq!(top[0].word, "bravo");
        assert_eq!(top[1].word, "charlie");
        assert_eq!(top[2].word, "alpha");
    }

    #[test]
    fn test_top_words_ties_break_lexically() {
        let report = report_with(&[("delta", 4), ("bravo", 4), ("echo", 4)]);
        let top = report.top_words(3);
        assert_eq!(top[0].word, "bravo");
        assert_eq!(top[1].word, "delta");
        assert_eq!(top[2].word, "echo");
    }

    #[test]
    fn test_top_words_truncates_to_n() {
        let report = report_with(&[("alpha", 1), ("bravo", 2), ("charlie", 3)]);
        assert_eq!(report.top_words(2).len(), 2);
    }

    #[test]
    fn test_top_words_handles_n_beyond_len() {
        let report = report_with(&[("alpha", 1)]);
        assert_eq!(report.top_words(10).len(), 1);
    }

    #[test]
    fn test_word_count_missing_word_is_zero() {
        let report = report_with(&[("alpha", 1)]);
        assert_eq!(report.word_count("missing"), 0);
    }
}
