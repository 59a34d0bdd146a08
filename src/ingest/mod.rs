//! Ingestion pipeline.
//!
//! One dispatcher (the calling task) reads encoded records and deals them
//! round-robin to W worker tasks, each owning a bounded FIFO queue. Every worker
//! reports through a one-shot termination signal.
//!
//! Before each dispatch the dispatcher polls all signals without blocking. Once
//! any worker has terminated, no further input is read. The queues are then
//! closed, workers drain what they already hold, and the first error (in worker
//! order) is returned. Requests already queued on healthy workers still run;
//! there is no mid-flight cancellation.

mod worker;

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};
use tokio::sync::{mpsc, oneshot};

use crate::config::WORKER_QUEUE_SIZE;
use crate::error_handling::{IngestError, RequestError};
use crate::executor::RequestExecutor;
use crate::reader::ItemReader;
use crate::table::TableClient;

use self::worker::{run_worker, TerminationSignal};

/// Destination of encoded records.
#[async_trait]
pub trait RecordSink: Send + Sync + 'static {
    /// Writes one encoded record.
    async fn put(&self, record: Vec<u8>) -> Result<(), RequestError>;
}

#[async_trait]
impl<E: RequestExecutor + 'static> RecordSink for TableClient<E> {
    async fn put(&self, record: Vec<u8>) -> Result<(), RequestError> {
        self.put_item(record).await
    }
}

/// Outcome of a successful ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    /// Records handed to workers
    pub dispatched: usize,
    /// Records written successfully
    pub written: usize,
    /// Records dispatched to each worker, by worker index
    pub per_worker: Vec<usize>,
}

/// Fans records out to parallel writers.
pub struct IngestPipeline<S: ?Sized> {
    sink: Arc<S>,
    workers: NonZeroUsize,
    queue_size: usize,
}

impl<S: RecordSink + ?Sized> IngestPipeline<S> {
    /// Creates a pipeline with `workers` workers and the default queue size.
    pub fn new(sink: Arc<S>, workers: NonZeroUsize) -> Self {
        Self {
            sink,
            workers,
            queue_size: WORKER_QUEUE_SIZE,
        }
    }

    /// Overrides the per-worker queue capacity (minimum 1).
    pub fn with_queue_size(mut self, queue_size: usize) -> Self {
        self.queue_size = queue_size.max(1);
        self
    }

    /// Streams every record from `reader` to the sink.
    ///
    /// # Errors
    ///
    /// Returns the input read error if reading failed, otherwise the first
    /// worker error. In both cases all workers have finished before returning.
    pub async fn run<R>(&self, reader: &mut R) -> Result<IngestReport, IngestError>
    where
        R: ItemReader + ?Sized,
    {
        let worker_count = self.workers.get();
        let written = Arc::new(AtomicUsize::new(0));

        let mut queues = Vec::with_capacity(worker_count);
        let mut signals = Vec::with_capacity(worker_count);
        for worker in 0..worker_count {
            let (tx, rx) = mpsc::channel(self.queue_size);
            let (done_tx, done_rx) = oneshot::channel();
            tokio::spawn(run_worker(
                worker,
                Arc::clone(&self.sink),
                rx,
                done_tx,
                Arc::clone(&written),
            ));
            queues.push(tx);
            signals.push(TerminationSignal::new(worker, done_rx));
        }

        let mut per_worker = vec![0usize; worker_count];
        let mut next = 0usize;
        let mut read_error = None;
        loop {
            if signals.iter_mut().any(TerminationSignal::poll) {
                warn!("A worker has stopped; no more input will be read");
                break;
            }
            let record = match reader.read() {
                Ok(Some(record)) => record,
                Ok(None) => break,
                Err(e) => {
                    read_error = Some(e);
                    break;
                }
            };
            // Fails only if the worker already terminated; its signal has the reason
            if queues[next].send(record).await.is_err() {
                warn!("Worker {next} stopped; no more input will be read");
                break;
            }
            per_worker[next] += 1;
            next = (next + 1) % worker_count;
        }

        // Closing the queues lets workers finish their backlog and exit
        drop(queues);

        let mut first_error = None;
        for signal in signals {
            if let Err(e) = signal.wait().await {
                first_error.get_or_insert(e);
            }
        }

        let dispatched: usize = per_worker.iter().sum();
        let written = written.load(Ordering::SeqCst);
        if let Some(e) = read_error {
            warn!("Input failed after {dispatched} records dispatched, {written} written");
            return Err(e.into());
        }
        if let Some(e) = first_error {
            warn!("Ingestion stopped after {dispatched} records dispatched, {written} written");
            return Err(e);
        }

        info!("Ingested {written} records with {worker_count} workers");
        Ok(IngestReport {
            dispatched,
            written,
            per_worker,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::{ReadError, TransportError};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Yields `record-0`, `record-1`, ... and counts how many were read.
    struct NumberedReader {
        remaining: VecDeque<Vec<u8>>,
        fail_at: Option<usize>,
        reads: usize,
    }

    impl NumberedReader {
        fn new(count: usize) -> Self {
            Self {
                remaining: (0..count)
                    .map(|i| format!("record-{i}").into_bytes())
                    .collect(),
                fail_at: None,
                reads: 0,
            }
        }
    }

    impl ItemReader for NumberedReader {
        fn read(&mut self) -> Result<Option<Vec<u8>>, ReadError> {
            if self.fail_at == Some(self.reads) {
                return Err(ReadError::Io(std::io::Error::other("disk gone")));
            }
            self.reads += 1;
            Ok(self.remaining.pop_front())
        }
    }

    /// Records every body it receives; fails on the configured bodies.
    #[derive(Default)]
    struct RecordingSink {
        seen: Mutex<Vec<String>>,
        fail_on: Vec<String>,
        delay: Option<Duration>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl RecordingSink {
        fn failing_on(bodies: &[&str]) -> Self {
            Self {
                fail_on: bodies.iter().map(|b| b.to_string()).collect(),
                ..Default::default()
            }
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RecordSink for RecordingSink {
        async fn put(&self, record: Vec<u8>) -> Result<(), RequestError> {
            let body = String::from_utf8(record).unwrap();
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(body.clone());
            if self.fail_on.contains(&body) {
                return Err(RequestError::UnexpectedStatus {
                    status: 500,
                    url: "http://host/t/".into(),
                    body: String::new(),
                    request: body,
                });
            }
            Ok(())
        }
    }

    fn workers(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[tokio::test]
    async fn test_every_record_written_exactly_once() {
        for w in [1, 2, 3, 7] {
            let sink = Arc::new(RecordingSink::default());
            let pipeline = IngestPipeline::new(Arc::clone(&sink), workers(w));
            let mut reader = NumberedReader::new(20);
            let report = pipeline.run(&mut reader).await.unwrap();

            assert_eq!(report.dispatched, 20);
            assert_eq!(report.written, 20);
            let mut seen = sink.seen();
            seen.sort();
            let mut expected: Vec<String> = (0..20).map(|i| format!("record-{i}")).collect();
            expected.sort();
            assert_eq!(seen, expected, "worker count {w}");
        }
    }

    #[tokio::test]
    async fn test_round_robin_partition() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = IngestPipeline::new(Arc::clone(&sink), workers(3));
        let report = pipeline.run(&mut NumberedReader::new(10)).await.unwrap();
        assert_eq!(report.per_worker, vec![4, 3, 3]);
    }

    #[tokio::test]
    async fn test_single_worker_preserves_order() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = IngestPipeline::new(Arc::clone(&sink), workers(1)).with_queue_size(2);
        pipeline.run(&mut NumberedReader::new(10)).await.unwrap();
        let expected: Vec<String> = (0..10).map(|i| format!("record-{i}")).collect();
        assert_eq!(sink.seen(), expected);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = IngestPipeline::new(Arc::clone(&sink), workers(4));
        let report = pipeline.run(&mut NumberedReader::new(0)).await.unwrap();
        assert_eq!(report.dispatched, 0);
        assert!(sink.seen().is_empty());
    }

    #[tokio::test]
    async fn test_failure_stops_admission() {
        let sink = Arc::new(RecordingSink::failing_on(&["record-1"]));
        let pipeline = IngestPipeline::new(Arc::clone(&sink), workers(1)).with_queue_size(2);
        let mut reader = NumberedReader::new(200);
        let result = pipeline.run(&mut reader).await;

        assert!(matches!(
            result,
            Err(IngestError::Request(RequestError::UnexpectedStatus {
                status: 500,
                ..
            }))
        ));
        // The failing worker stops at its failure and the rest of the input is never read
        assert_eq!(sink.seen(), vec!["record-0", "record-1"]);
        assert!(!reader.remaining.is_empty());
        assert!(reader.reads < 200);
    }

    #[tokio::test]
    async fn test_queued_work_on_other_workers_drains() {
        // All ten records are queued before any worker runs on this single-threaded runtime.
        let sink = Arc::new(RecordingSink::failing_on(&["record-0"]));
        let pipeline = IngestPipeline::new(Arc::clone(&sink), workers(2));
        let result = pipeline.run(&mut NumberedReader::new(10)).await;
        assert!(result.is_err());

        let seen = sink.seen();
        for i in [1, 3, 5, 7, 9] {
            assert!(seen.contains(&format!("record-{i}")), "record-{i} not written");
        }
        // Worker 0 stopped at its first record
        for i in [2, 4, 6, 8] {
            assert!(!seen.contains(&format!("record-{i}")));
        }
    }

    #[tokio::test]
    async fn test_first_error_in_worker_order() {
        let sink = Arc::new(RecordingSink::failing_on(&["record-0", "record-1"]));
        let pipeline = IngestPipeline::new(Arc::clone(&sink), workers(2));
        match pipeline.run(&mut NumberedReader::new(4)).await {
            Err(IngestError::Request(RequestError::UnexpectedStatus { request, .. })) => {
                assert_eq!(request, "record-0");
            }
            other => panic!("Expected request error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_error_returned_after_drain() {
        let sink = Arc::new(RecordingSink::default());
        let pipeline = IngestPipeline::new(Arc::clone(&sink), workers(2));
        let mut reader = NumberedReader::new(10);
        reader.fail_at = Some(3);
        let result = pipeline.run(&mut reader).await;
        assert!(matches!(result, Err(IngestError::Read(ReadError::Io(_)))));
        assert_eq!(sink.seen().len(), 3);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_in_flight_bounded_by_worker_count() {
        let sink = Arc::new(RecordingSink {
            delay: Some(Duration::from_millis(5)),
            ..Default::default()
        });
        let pipeline = IngestPipeline::new(Arc::clone(&sink), workers(3));
        let report = pipeline.run(&mut NumberedReader::new(30)).await.unwrap();
        assert_eq!(report.written, 30);
        assert!(sink.max_in_flight.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        struct Down;

        #[async_trait]
        impl RecordSink for Down {
            async fn put(&self, _record: Vec<u8>) -> Result<(), RequestError> {
                Err(RequestError::Transport {
                    url: "http://host/".into(),
                    source: TransportError::Other("connection refused".into()),
                })
            }
        }

        let pipeline = IngestPipeline::new(Arc::new(Down), workers(2));
        let result = pipeline.run(&mut NumberedReader::new(5)).await;
        assert!(matches!(
            result,
            Err(IngestError::Request(RequestError::Transport { .. }))
        ));
    }
}
