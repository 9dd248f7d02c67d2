//! The crawl coordinator
//!
//! A single logical thread of control owns the visited set, the outstanding
//! counter, and the termination decision, so none of that state needs a lock.
//! The loop keeps a count of dispatched-but-unresolved tasks: every newly
//! enqueued task adds one, every consumed result batch subtracts one, and the
//! run is over exactly when the count reaches zero. Only then are the queues
//! closed, which is safe precisely because the count proves no send can still
//! be in flight.

use crate::config::EngineConfig;
use crate::engine::buffer::{self, BufferStrategy};
use crate::engine::worker::{spawn_workers, CrawlTask, Tallies};
use crate::engine::CancelSignal;
use crate::processor::PageProcessor;
use crate::report::CrawlReport;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use url::Url;

/// Per-worker multiplier for queue capacities, a guess that each visited
/// page yields around this many new links.
const CHANNEL_SCALE: usize = 5;

/// The crawl engine: worker pool, result buffer, and coordination loop
pub struct CrawlEngine<P> {
    config: EngineConfig,
    processor: Arc<P>,
    strategy: BufferStrategy,
    buffer_capacity: Option<usize>,
}

impl<P> CrawlEngine<P>
where
    P: PageProcessor + 'static,
{
    /// Creates an engine with the deferred-send buffer strategy
    pub fn new(config: EngineConfig, processor: P) -> Self {
        Self {
            config,
            processor: Arc::new(processor),
            strategy: BufferStrategy::DeferredSend,
            buffer_capacity: None,
        }
    }

    /// Overrides the result-buffer strategy and capacity
    ///
    /// Any positive capacity is correct; smaller values exercise the
    /// overflow-avoidance path harder.
    pub fn with_buffer(mut self, strategy: BufferStrategy, capacity: usize) -> Self {
        self.strategy = strategy;
        self.buffer_capacity = Some(capacity);
        self
    }

    /// Runs the crawl to completion and returns the merged results
    ///
    /// Blocks until the frontier is exhausted, or until cancellation has been
    /// requested and all in-flight tasks have drained. Cancellation is
    /// consulted at exactly one point, the task-dispatch decision, so drain
    /// time is bounded by the in-flight task count rather than the remaining
    /// frontier.
    pub async fn run(&self, seed: &Url, cancel: CancelSignal) -> CrawlReport {
        let capacity = self
            .buffer_capacity
            .unwrap_or(CHANNEL_SCALE * self.config.concurrency)
            .max(1);

        let (task_tx, task_rx) = mpsc::channel::<CrawlTask>(capacity);
        let task_rx = Arc::new(tokio::sync::Mutex::new(task_rx));
        let (submitter, mut batches) = buffer::channel(self.strategy, capacity);
        let tallies = Arc::new(Mutex::new(Tallies::default()));

        let workers = spawn_workers(
            self.config.concurrency,
            Arc::clone(&self.processor),
            task_rx,
            submitter,
            Arc::clone(&tallies),
            cancel.clone(),
        );

        // Prime the pump: the seed is the first dispatched task. Link
        // extraction strips fragments, so the seed's key must match.
        let mut visited = HashSet::new();
        let mut seed = seed.clone();
        seed.set_fragment(None);
        let seed_key = seed.to_string();
        visited.insert(seed_key.clone());
        let mut outstanding: u64 = 1;
        let mut interrupted = false;
        let mut cancel = cancel;

        if task_tx.send(CrawlTask { url: seed_key }).await.is_err() {
            tracing::error!("task queue closed before the seed was dispatched");
            outstanding = 0;
        }

        while outstanding > 0 {
            let Some(batch) = batches.recv().await else {
                // Workers hold submitter clones until the task queue closes,
                // so this cannot fire while tasks are outstanding.
                tracing::error!(
                    "result buffer closed with {} tasks outstanding",
                    outstanding
                );
                break;
            };

            // Once interrupted, discard links and let the queue drain. The
            // batch's words and errors were already merged by its worker.
            if !interrupted {
                for link in batch {
                    if visited.insert(link.clone()) {
                        outstanding += 1;

                        // Dispatch races cancellation, biased toward the
                        // signal so an asserted interrupt wins
                        // deterministically.
                        tokio::select! {
                            biased;
                            _ = cancel.cancelled() => {
                                outstanding -= 1;
                                interrupted = true;
                                tracing::info!("interrupt received, draining in-flight tasks");
                                break;
                            }
                            sent = task_tx.send(CrawlTask { url: link }) => {
                                if sent.is_err() {
                                    tracing::error!("task queue closed during dispatch");
                                    outstanding -= 1;
                                    interrupted = true;
                                    break;
                                }
                            }
                        }
                    }
                }
            }

            // Balances the increment made when this batch's task was
            // dispatched.
            outstanding -= 1;
        }

        if interrupted {
            tracing::warn!("process was interrupted, results are partial");
        }

        // The counter reached zero: every dispatched task has reported and
        // nothing can send on either channel again. Close both sides exactly
        // once, then wait for the pool to exit.
        drop(task_tx);
        batches.close();
        for handle in workers {
            if let Err(e) = handle.await {
                tracing::error!("worker task failed: {}", e);
            }
        }

        let tallies = match Arc::try_unwrap(tallies) {
            Ok(tallies) => tallies.into_inner().unwrap_or_else(|e| e.into_inner()),
            Err(shared) => {
                // All workers have been joined, so this arm is unreachable;
                // taking the contents under the lock keeps it harmless.
                let mut guard = shared.lock().unwrap_or_else(|e| e.into_inner());
                std::mem::take(&mut *guard)
            }
        };

        CrawlReport {
            words: tallies.words,
            failures: tallies.failures,
            interrupted,
            pages_visited: visited.len(),
        }
    }
}
