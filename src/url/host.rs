use url::Url;

/// Extracts the crawl target host from the seed URL
///
/// The host is lowercased and a leading `www.` is stripped, so the crawl
/// follows links regardless of whether pages reference the `www` form.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use wordcrawl::url::target_host;
///
/// let seed = Url::parse("https://www.Example.COM/start").unwrap();
/// assert_eq!(target_host(&seed), Some("example.com".to_string()));
/// ```
pub fn target_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| {
        let host = h.to_lowercase();
        match host.strip_prefix("www.") {
            Some(stripped) => stripped.to_string(),
            None => host,
        }
    })
}

/// Tests whether a URL belongs to the crawl target host
///
/// `target` must already be in the canonical form produced by
/// [`target_host`].
pub fn is_same_host(url: &Url, target: &str) -> bool {
    match target_host(url) {
        Some(host) => host == target,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_host_plain() {
        let url = Url::parse("https://example.com/page").unwrap();
        assert_eq!(target_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_target_host_strips_www() {
        let url = Url::parse("https://www.example.com/page").unwrap();
        assert_eq!(target_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_target_host_lowercases() {
        let url = Url::parse("https://WWW.EXAMPLE.COM/").unwrap();
        assert_eq!(target_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_target_host_keeps_subdomain() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert_eq!(target_host(&url), Some("blog.example.com".to_string()));
    }

    #[test]
    fn test_same_host_with_and_without_www() {
        let url = Url::parse("https://www.example.com/a").unwrap();
        assert!(is_same_host(&url, "example.com"));

        let url = Url::parse("https://example.com/b").unwrap();
        assert!(is_same_host(&url, "example.com"));
    }

    #[test]
    fn test_different_host_rejected() {
        let url = Url::parse("https://other.com/").unwrap();
        assert!(!is_same_host(&url, "example.com"));
    }

    #[test]
    fn test_subdomain_is_a_different_host() {
        let url = Url::parse("https://blog.example.com/").unwrap();
        assert!(!is_same_host(&url, "example.com"));
    }

    #[test]
    fn test_ip_host_with_port() {
        let url = Url::parse("http://127.0.0.1:8080/page").unwrap();
        assert!(is_same_host(&url, "127.0.0.1"));
    }
}
