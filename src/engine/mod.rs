//! The concurrent crawl engine
//!
//! This module is the core of the crate:
//! - [`CrawlEngine`] runs the single-threaded coordination loop with its
//!   counting-based termination test.
//! - A fixed pool of workers drains the task queue and reports through the
//!   elastic result buffer, which never blocks a producer.
//! - Cancellation is cooperative: a monotonic flag checked only at the
//!   dispatch point, with in-flight work drained rather than aborted.

mod buffer;
mod cancel;
mod coordinator;
mod worker;

pub use buffer::BufferStrategy;
pub use cancel::{cancel_pair, CancelHandle, CancelSignal};
pub use coordinator::CrawlEngine;
