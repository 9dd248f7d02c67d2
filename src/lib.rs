//! Wordcrawl: a host-scoped word-frequency crawler
//!
//! This crate crawls a single web site, tallies word frequencies across every
//! page it reaches, and reports the most frequent words once the frontier is
//! exhausted. The interesting part is the crawl engine: a fixed worker pool,
//! a two-channel producer/consumer protocol with counting-based termination,
//! an elastic result buffer that keeps workers from ever blocking on their
//! reports, and cooperative cancellation that drains in-flight work.

pub mod config;
pub mod engine;
pub mod processor;
pub mod report;
pub mod url;

use thiserror::Error;

/// Fatal errors that prevent a crawl from starting
///
/// Per-page failures are not represented here; they are recovered by the
/// workers and surfaced through [`report::CrawlReport::failures`].
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL '{url}': {source}")]
    InvalidSeed {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Seed URL '{0}' has no host")]
    SeedMissingHost(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for wordcrawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use config::EngineConfig;
pub use engine::{BufferStrategy, CancelHandle, CancelSignal, CrawlEngine};
pub use processor::{HttpPageProcessor, PageData, PageProcessor, ProcessError};
pub use report::{CrawlReport, PageFailure, WordCount};
