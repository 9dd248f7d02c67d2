//! The HTTP-backed page processor

use crate::config::EngineConfig;
use crate::engine::CancelSignal;
use crate::processor::parser::{parse_page, word_regex};
use crate::processor::{build_http_client, fetch_page, PageData, PageProcessor, ProcessError};
use crate::url::target_host;
use crate::CrawlError;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use url::Url;

/// Fetches pages over HTTP and parses them with scraper
///
/// One instance is shared by every worker in the pool; the client, the word
/// tokenizer, and the target host are all fixed at construction.
pub struct HttpPageProcessor {
    client: Client,
    target: String,
    word_re: Regex,
    min_word_len: usize,
}

impl HttpPageProcessor {
    /// Creates a processor scoped to the seed's host
    ///
    /// # Arguments
    ///
    /// * `config` - Engine configuration (minimum word length)
    /// * `seed` - The seed URL, which fixes the crawl target host
    ///
    /// # Returns
    ///
    /// * `Ok(HttpPageProcessor)` - Ready to process pages
    /// * `Err(CrawlError)` - Seed has no host or the client failed to build
    pub fn new(config: &EngineConfig, seed: &Url) -> Result<Self, CrawlError> {
        let target = target_host(seed)
            .ok_or_else(|| CrawlError::SeedMissingHost(seed.as_str().to_string()))?;
        let client = build_http_client()?;

        Ok(Self {
            client,
            target,
            word_re: word_regex(),
            min_word_len: config.min_word_len,
        })
    }

    /// The host this processor confines links to
    pub fn target(&self) -> &str {
        &self.target
    }
}

#[async_trait]
impl PageProcessor for HttpPageProcessor {
    async fn process(&self, url: &str, _cancel: CancelSignal) -> Result<PageData, ProcessError> {
        let base_url = Url::parse(url)?;
        let body = fetch_page(&self.client, url).await?;

        tracing::debug!("Fetched {} ({} bytes)", url, body.len());

        Ok(parse_page(
            &body,
            &base_url,
            &self.target,
            &self.word_re,
            self.min_word_len,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processor_scopes_to_seed_host() {
        let seed = Url::parse("https://www.example.com/start").unwrap();
        let processor = HttpPageProcessor::new(&EngineConfig::default(), &seed).unwrap();
        assert_eq!(processor.target(), "example.com");
    }

    #[test]
    fn test_hostless_seed_rejected() {
        // `data:` URLs parse but carry no host.
        let seed = Url::parse("data:text/plain,hello").unwrap();
        let result = HttpPageProcessor::new(&EngineConfig::default(), &seed);
        assert!(matches!(result, Err(CrawlError::SeedMissingHost(_))));
    }
}
