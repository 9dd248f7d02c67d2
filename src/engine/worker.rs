//! The fixed-size worker pool
//!
//! Each worker repeatedly takes a task from the shared task queue, runs the
//! page processor, merges words and errors into the shared tallies under one
//! lock, and submits the discovered-link batch through the result buffer.
//! Workers never touch the visited set or the outstanding counter; all
//! frontier bookkeeping belongs to the coordinator.

use crate::engine::buffer::BatchSubmitter;
use crate::engine::CancelSignal;
use crate::processor::PageProcessor;
use crate::report::PageFailure;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One unit of work: a URL to process
#[derive(Debug)]
pub(crate) struct CrawlTask {
    pub url: String,
}

/// Worker-mutated run state: the histogram and the error log
///
/// The only engine state touched by more than one task, hence the only state
/// behind a lock.
#[derive(Debug, Default)]
pub(crate) struct Tallies {
    pub words: HashMap<String, u64>,
    pub failures: Vec<PageFailure>,
}

impl Tallies {
    /// Merges one page's outcome, returning the links to report
    ///
    /// Word merges are additive and commutative, so the totals are
    /// independent of completion order. Failed pages contribute an error-log
    /// entry and an empty link batch.
    fn absorb(
        &mut self,
        url: String,
        outcome: Result<crate::processor::PageData, crate::processor::ProcessError>,
    ) -> Vec<String> {
        match outcome {
            Ok(page) => {
                for (word, count) in page.words {
                    *self.words.entry(word).or_insert(0) += count;
                }
                page.links
            }
            Err(error) => {
                self.failures.push(PageFailure { url, error });
                Vec::new()
            }
        }
    }
}

/// Spawns `count` workers onto the runtime
///
/// The task receiver sits behind an async mutex so the fixed pool can share
/// one queue; a worker holds the lock only while waiting for its next task.
/// Every task produces exactly one submitted batch, success or failure, which
/// is what the coordinator's counting relies on.
pub(crate) fn spawn_workers<P>(
    count: usize,
    processor: Arc<P>,
    tasks: Arc<tokio::sync::Mutex<mpsc::Receiver<CrawlTask>>>,
    results: BatchSubmitter,
    tallies: Arc<Mutex<Tallies>>,
    cancel: CancelSignal,
) -> Vec<JoinHandle<()>>
where
    P: PageProcessor + 'static,
{
    let mut handles = Vec::with_capacity(count);

    for worker_id in 0..count {
        let processor = Arc::clone(&processor);
        let tasks = Arc::clone(&tasks);
        let results = results.clone();
        let tallies = Arc::clone(&tallies);
        let cancel = cancel.clone();

        handles.push(tokio::spawn(async move {
            loop {
                let task = {
                    let mut queue = tasks.lock().await;
                    queue.recv().await
                };

                let Some(task) = task else {
                    // Task queue closed: the run is over.
                    tracing::trace!("worker {} exiting", worker_id);
                    break;
                };

                tracing::debug!("worker {} processing {}", worker_id, task.url);
                let outcome = processor.process(&task.url, cancel.clone()).await;

                let links = {
                    let mut tallies = tallies.lock().unwrap_or_else(|e| e.into_inner());
                    tallies.absorb(task.url, outcome)
                };

                results.submit(links);
            }
        }));
    }

    handles
}
