//! Cooperative cancellation
//!
//! Cancellation is a monotonic false→true flag carried on a watch channel.
//! The coordinator is the only consumer, and it consults the signal at
//! exactly one point: the task-dispatch decision. In-flight page processing
//! is never aborted; the run drains naturally once the flag is set.

use tokio::sync::watch;

/// The sending half of the cancellation signal
///
/// Held by whoever decides to stop the crawl, typically the OS signal
/// listener installed by the binary.
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Flips the cancellation flag
    ///
    /// Idempotent; the transition only happens once.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// The receiving half of the cancellation signal
///
/// Cheap to clone; every clone observes the same flag.
#[derive(Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// Returns true once cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation has been requested
    ///
    /// If the [`CancelHandle`] is dropped without cancelling, the run can no
    /// longer be interrupted and this future stays pending forever.
    pub async fn cancelled(&mut self) {
        if self.rx.wait_for(|&cancelled| cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    /// A signal that will never fire, for callers that opt out of cancellation
    pub fn never() -> Self {
        // Sender dropped immediately; `cancelled` treats the closed channel
        // as a flag that never fires.
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }
}

/// Creates a connected cancellation handle/signal pair
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelSignal { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_flag_starts_clear() {
        let (_handle, signal) = cancel_pair();
        assert!(!signal.is_cancelled());
    }

    #[test]
    fn test_cancel_sets_flag() {
        let (handle, signal) = cancel_pair();
        handle.cancel();
        assert!(signal.is_cancelled());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let (handle, signal) = cancel_pair();
        handle.cancel();
        handle.cancel();
        assert!(signal.is_cancelled());
    }

    #[test]
    fn test_clones_observe_the_same_flag() {
        let (handle, signal) = cancel_pair();
        let clone = signal.clone();
        handle.cancel();
        assert!(clone.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_resolves_after_cancel() {
        let (handle, mut signal) = cancel_pair();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            handle.cancel();
        });

        tokio::time::timeout(Duration::from_secs(1), signal.cancelled())
            .await
            .expect("cancelled() should resolve once the handle fires");
    }

    #[tokio::test]
    async fn test_cancelled_resolves_immediately_when_already_set() {
        let (handle, mut signal) = cancel_pair();
        handle.cancel();

        tokio::time::timeout(Duration::from_millis(50), signal.cancelled())
            .await
            .expect("cancelled() should resolve for an already-set flag");
    }

    #[tokio::test]
    async fn test_never_signal_stays_pending() {
        let mut signal = CancelSignal::never();
        assert!(!signal.is_cancelled());

        let timed_out = tokio::time::timeout(Duration::from_millis(20), signal.cancelled())
            .await
            .is_err();
        assert!(timed_out);
    }
}
