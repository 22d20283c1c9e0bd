use crate::record::LogRecord;
use async_trait::async_trait;
use std::error::Error;

/// Asynchronous destination for [`LogRecord`]s produced by the logger.
///
/// Implementations transport records to a concrete destination (an
/// append-only file, stderr, a test buffer). The logger calls `send`
/// from a background task and never awaits it on the caller's thread.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Append a single record to the underlying destination.
    ///
    /// The serialized bytes of one record must land in the destination as
    /// one contiguous unit: implementations that share a writer take an
    /// internal lock and issue a single write per record, so concurrent
    /// records never interleave.
    ///
    /// **Returns**
    /// - `Ok(())` if the record was durably handed to the destination.
    /// - `Err(..)` if the write failed (disk full, permission denied,
    ///   closed handle). The logger treats this as non-fatal and reports
    ///   it to stderr.
    async fn send(&self, record: &LogRecord) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Flush any buffered bytes, if the destination buffers.
    ///
    /// Called once by the logger during shutdown, after the queue has
    /// drained. Default implementation is a no-op.
    async fn flush(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}
