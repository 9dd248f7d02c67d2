//! Page processing: fetch a page, tally its words, extract its links
//!
//! The engine consumes page processing through the [`PageProcessor`] trait so
//! the crawl machinery can be exercised against in-memory fakes. The real
//! implementation, [`HttpPageProcessor`], fetches over HTTP and parses HTML.

mod fetcher;
mod http;
mod parser;

pub use fetcher::{build_http_client, fetch_page};
pub use http::HttpPageProcessor;
pub use parser::{parse_page, word_regex};

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use crate::engine::CancelSignal;

/// Everything extracted from a single page
#[derive(Debug, Clone, Default)]
pub struct PageData {
    /// Word → occurrence count, restricted to words meeting the configured
    /// minimum length
    pub words: HashMap<String, u64>,

    /// Absolute same-host URLs discovered on the page
    pub links: Vec<String>,
}

/// Why a single page failed to process
///
/// These never abort the crawl; the coordinator records them and moves on.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("unsupported content type '{0}'")]
    ContentType(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// A page-processing capability consumed by the worker pool
///
/// Implementations must never panic the calling task; every failure is
/// returned as a [`ProcessError`]. The cancellation signal is advisory: an
/// implementation may use it to skip optional work, but processing that has
/// started is allowed to run to completion.
#[async_trait]
pub trait PageProcessor: Send + Sync {
    async fn process(&self, url: &str, cancel: CancelSignal) -> Result<PageData, ProcessError>;
}

// Shared processors work too; callers that want to inspect a processor after
// the run hand the engine an Arc and keep a clone.
#[async_trait]
impl<T> PageProcessor for std::sync::Arc<T>
where
    T: PageProcessor + ?Sized,
{
    async fn process(&self, url: &str, cancel: CancelSignal) -> Result<PageData, ProcessError> {
        (**self).process(url, cancel).await
    }
}
