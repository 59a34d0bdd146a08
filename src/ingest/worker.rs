//! Ingestion workers and their termination signals.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::{mpsc, oneshot};

use super::RecordSink;
use crate::error_handling::{IngestError, RequestError};

/// Drains one queue in order until it is closed or a write fails, then reports
/// the outcome on `done`.
pub(super) async fn run_worker<S: RecordSink + ?Sized>(
    worker: usize,
    sink: Arc<S>,
    mut queue: mpsc::Receiver<Vec<u8>>,
    done: oneshot::Sender<Result<(), RequestError>>,
    written: Arc<AtomicUsize>,
) {
    let mut result = Ok(());
    let mut count = 0usize;
    while let Some(record) = queue.recv().await {
        if let Err(e) = sink.put(record).await {
            warn!("Worker {worker} stopped after {count} writes: {e}");
            result = Err(e);
            break;
        }
        count += 1;
        written.fetch_add(1, Ordering::SeqCst);
    }
    debug!("Worker {worker} finished ({count} writes)");
    // The receiver is gone only if the dispatcher itself was dropped
    let _ = done.send(result);
}

/// Single-slot completion state of one worker.
///
/// `poll` checks without blocking and caches what it sees, so a value taken
/// during dispatch is still reported by `wait`.
pub(super) struct TerminationSignal {
    worker: usize,
    rx: oneshot::Receiver<Result<(), RequestError>>,
    outcome: Option<Result<(), IngestError>>,
}

impl TerminationSignal {
    pub(super) fn new(worker: usize, rx: oneshot::Receiver<Result<(), RequestError>>) -> Self {
        Self {
            worker,
            rx,
            outcome: None,
        }
    }

    /// True once the worker has terminated.
    pub(super) fn poll(&mut self) -> bool {
        if self.outcome.is_some() {
            return true;
        }
        match self.rx.try_recv() {
            Ok(result) => {
                self.outcome = Some(result.map_err(IngestError::from));
                true
            }
            Err(oneshot::error::TryRecvError::Empty) => false,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.outcome = Some(Err(IngestError::WorkerLost {
                    worker: self.worker,
                }));
                true
            }
        }
    }

    /// Waits for the worker to terminate and returns its outcome.
    pub(super) async fn wait(self) -> Result<(), IngestError> {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        match self.rx.await {
            Ok(result) => result.map_err(IngestError::from),
            Err(_) => Err(IngestError::WorkerLost {
                worker: self.worker,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::TransportError;

    #[tokio::test]
    async fn test_poll_is_non_blocking_and_cached() {
        let (tx, rx) = oneshot::channel();
        let mut signal = TerminationSignal::new(0, rx);
        assert!(!signal.poll());
        tx.send(Err(RequestError::Transport {
            url: "http://host/".into(),
            source: TransportError::Other("down".into()),
        }))
        .unwrap();
        assert!(signal.poll());
        assert!(signal.poll());
        assert!(matches!(
            signal.wait().await,
            Err(IngestError::Request(RequestError::Transport { .. }))
        ));
    }

    #[tokio::test]
    async fn test_dropped_sender_is_worker_lost() {
        let (tx, rx) = oneshot::channel::<Result<(), RequestError>>();
        drop(tx);
        let signal = TerminationSignal::new(3, rx);
        assert!(matches!(
            signal.wait().await,
            Err(IngestError::WorkerLost { worker: 3 })
        ));
    }
}
