use crate::error::LogError;
use crate::file_sink::FileSink;
use crate::record::{FieldMap, LogRecord, Severity};
use crate::sink::LogSink;
use std::path::Path;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Configuration for [`EventLogger`].
///
/// **Fields**
/// - `channel_buffer`: maximum number of [`LogRecord`]s queued between
///   callers and the writer task before new records are dropped.
#[derive(Clone, Debug)]
pub struct EventLoggerConfig {
    pub channel_buffer: usize,
}

impl Default for EventLoggerConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 1024,
        }
    }
}

/// Structured event logger writing to a single [`LogSink`].
///
/// One instance owns one sink for its whole lifetime: construct it at
/// startup, pass it (or clone its handle via the tracing layer) to the
/// components that log, and call [`EventLogger::shutdown`] at teardown to
/// drain and flush. There is no ambient global logger.
///
/// `log_event` is fire-and-forget: the record is stamped, queued on a
/// bounded channel and written by a background task, so sink I/O never
/// runs on the caller's thread. Each call produces exactly one record;
/// there is no batching, deduplication or rate limiting.
pub struct EventLogger {
    pub(crate) sender: mpsc::Sender<LogRecord>,
    worker: JoinHandle<()>,
    /// Total `log_event` calls observed.
    pub total_events: Arc<AtomicU64>,
    /// Successfully enqueued into the channel.
    pub enqueued_events: Arc<AtomicU64>,
    /// Dropped because the channel was full.
    pub dropped_events: Arc<AtomicU64>,
}

impl EventLogger {
    /// Create a logger backed by `sink` and spawn its writer task.
    ///
    /// A minimal threshold is enforced for `channel_buffer` to avoid
    /// degenerate configurations. Must be called within a Tokio runtime.
    pub fn new(sink: Arc<dyn LogSink>, config: EventLoggerConfig) -> Self {
        let buffer = config.channel_buffer.max(16);
        let (tx, mut rx) = mpsc::channel::<LogRecord>(buffer);

        let worker = tokio::spawn(async move {
            while let Some(record) = rx.recv().await {
                if let Err(e) = sink.send(&record).await {
                    eprintln!("failed to write log record: {}", e);
                }
            }
            // Channel closed: every sender is gone, drain is complete.
            if let Err(e) = sink.flush().await {
                eprintln!("failed to flush log sink: {}", e);
            }
        });

        Self {
            sender: tx,
            worker,
            total_events: Arc::new(AtomicU64::new(0)),
            enqueued_events: Arc::new(AtomicU64::new(0)),
            dropped_events: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Convenience constructor: append to the JSON-lines file at `path`
    /// with the default configuration.
    pub async fn to_file(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let sink = FileSink::open(path).await?;
        Ok(Self::new(Arc::new(sink), EventLoggerConfig::default()))
    }

    /// Record one event.
    ///
    /// Stamps the record with the current UTC time, strips caller fields
    /// that collide with the reserved envelope keys and queues it for the
    /// writer task. Never fails and never blocks: if the queue is full the
    /// record is counted as dropped and a warning goes to stderr. A
    /// logging failure must not alter the outcome of the code being
    /// instrumented.
    pub fn log_event(&self, level: Severity, message: impl Into<String>, fields: FieldMap) {
        self.total_events.fetch_add(1, Ordering::Relaxed);

        let record = LogRecord::new(level, message, fields);
        match self.sender.try_send(record) {
            Ok(()) => {
                self.enqueued_events.fetch_add(1, Ordering::Relaxed);
            }
            Err(_) => {
                self.dropped_events.fetch_add(1, Ordering::Relaxed);
                eprintln!("event log channel full, dropping log record");
            }
        }
    }

    /// Like [`EventLogger::log_event`] but takes the severity by name, for
    /// callers holding plain strings (HTTP handlers, config values).
    ///
    /// **Returns**
    /// - `Err(LogError::InvalidSeverity)` if `level` is not a recognized
    ///   severity name; nothing is emitted in that case.
    pub fn log_event_str(
        &self,
        level: &str,
        message: impl Into<String>,
        fields: FieldMap,
    ) -> Result<(), LogError> {
        let level: Severity = level.parse()?;
        self.log_event(level, message, fields);
        Ok(())
    }

    /// Drain the queue, flush the sink and stop the writer task.
    ///
    /// Every record accepted by `log_event` before this call is written
    /// before it returns. Any tracing layer cloned from this logger must
    /// be dropped first, since its sender also keeps the writer alive.
    pub async fn shutdown(self) {
        let EventLogger { sender, worker, .. } = self;
        drop(sender);
        if let Err(e) = worker.await {
            eprintln!("log writer task failed: {}", e);
        }
    }
}
