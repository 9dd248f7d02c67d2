//! HTTP fetching for the page processor
//!
//! One shared client per run, built once at engine construction. Fetching is
//! deliberately simple: GET the page, insist on a success status and an HTML
//! content type, return the body. Redirects are followed by the client.

use crate::processor::ProcessError;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client shared by all workers
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body, enforcing status and content-type gates
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The absolute URL to fetch
///
/// # Returns
///
/// * `Ok(String)` - The HTML body
/// * `Err(ProcessError)` - Any failure, classified for the error log
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, ProcessError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProcessError::Status(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains("text/html") {
        return Err(ProcessError::ContentType(content_type));
    }

    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client().is_ok());
    }
}
