//! Elastic result buffer
//!
//! The delivery path from workers back to the coordinator. With a fixed pool
//! of P workers and a bounded result channel, all P workers can be stuck
//! reporting while the coordinator is itself blocked pushing a task into a
//! full task queue that only those workers service. That circular wait is a
//! deadlock, so batch submission must never block a worker indefinitely.
//!
//! Two interchangeable strategies satisfy that contract:
//!
//! - [`BufferStrategy::DeferredSend`]: try a non-blocking send into a bounded
//!   channel; when the channel is full, hand the batch to a short-lived
//!   helper task that blocks in the worker's stead.
//! - [`BufferStrategy::Unbounded`]: a logically unbounded queue whose send
//!   never waits, capacity limited only by memory.
//!
//! Neither strategy guarantees delivery order. Both guarantee every submitted
//! batch is delivered exactly once.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// A single result batch: the links discovered on one page
///
/// Word counts and errors are merged by the worker before submission, so the
/// coordinator only ever sees link batches. An empty batch still counts: the
/// coordinator's termination accounting needs exactly one batch per task.
pub type LinkBatch = Vec<String>;

/// Which overflow-avoidance strategy the buffer uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferStrategy {
    /// Bounded channel with a spawned helper on overflow
    DeferredSend,
    /// Logically unbounded internal queue
    Unbounded,
}

/// Worker-side handle for submitting result batches
#[derive(Clone)]
pub enum BatchSubmitter {
    Deferred(mpsc::Sender<LinkBatch>),
    Unbounded(mpsc::UnboundedSender<LinkBatch>),
}

impl BatchSubmitter {
    /// Submits one batch without ever suspending the caller
    ///
    /// On the deferred-send path a full channel spawns a helper task whose
    /// sole job is to wait out the backlog, freeing the worker immediately.
    pub fn submit(&self, batch: LinkBatch) {
        match self {
            BatchSubmitter::Deferred(tx) => match tx.try_send(batch) {
                Ok(()) => {}
                Err(TrySendError::Full(batch)) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        if tx.send(batch).await.is_err() {
                            tracing::error!("result buffer closed with a deferred batch in flight");
                        }
                    });
                }
                Err(TrySendError::Closed(_)) => {
                    // The counting invariant closes the receiver only after
                    // every batch has been consumed, so a live submission
                    // against a closed buffer is a bug.
                    tracing::error!("result batch submitted after buffer close");
                }
            },
            BatchSubmitter::Unbounded(tx) => {
                if tx.send(batch).is_err() {
                    tracing::error!("result batch submitted after buffer close");
                }
            }
        }
    }
}

/// Coordinator-side receiving end of the buffer
pub enum BatchReceiver {
    Bounded(mpsc::Receiver<LinkBatch>),
    Unbounded(mpsc::UnboundedReceiver<LinkBatch>),
}

impl BatchReceiver {
    /// Receives the next batch, in whatever order batches arrive
    pub async fn recv(&mut self) -> Option<LinkBatch> {
        match self {
            BatchReceiver::Bounded(rx) => rx.recv().await,
            BatchReceiver::Unbounded(rx) => rx.recv().await,
        }
    }

    /// Closes the inbound side of the buffer
    ///
    /// Called exactly once, after the outstanding count proves no further
    /// submissions can occur.
    pub fn close(&mut self) {
        match self {
            BatchReceiver::Bounded(rx) => rx.close(),
            BatchReceiver::Unbounded(rx) => rx.close(),
        }
    }
}

/// Creates a result buffer with the given strategy
///
/// `capacity` bounds the channel on the deferred-send path; the unbounded
/// strategy ignores it. Any positive capacity preserves correctness, the
/// value is purely a tuning knob.
pub fn channel(strategy: BufferStrategy, capacity: usize) -> (BatchSubmitter, BatchReceiver) {
    match strategy {
        BufferStrategy::DeferredSend => {
            let (tx, rx) = mpsc::channel(capacity.max(1));
            (BatchSubmitter::Deferred(tx), BatchReceiver::Bounded(rx))
        }
        BufferStrategy::Unbounded => {
            let (tx, rx) = mpsc::unbounded_channel();
            (BatchSubmitter::Unbounded(tx), BatchReceiver::Unbounded(rx))
        }
    }
}
