/// Engine configuration, passed explicitly into [`crate::CrawlEngine::new`]
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of parallel workers, fixed for the lifetime of a run
    pub concurrency: usize,

    /// Minimum length a word must have to be tracked in the histogram
    pub min_word_len: usize,

    /// How many of the most frequent words to report
    pub top_words: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            min_word_len: 10,
            top_words: 10,
        }
    }
}
