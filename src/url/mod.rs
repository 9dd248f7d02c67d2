//! Host scoping for the crawl
//!
//! The crawl is confined to the seed's host. A leading `www.` is ignored on
//! both sides of the comparison, so `https://www.example.com` and
//! `https://example.com` count as the same site.

mod host;

pub use host::{is_same_host, target_host};
