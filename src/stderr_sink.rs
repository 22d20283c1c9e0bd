use crate::record::LogRecord;
use crate::sink::LogSink;
use async_trait::async_trait;
use std::error::Error;
use tokio::io::{AsyncWriteExt, Stderr};
use tokio::sync::Mutex;

/// Sink that writes JSON lines to standard error.
///
/// Useful during development and as a fallback destination when a file
/// sink cannot be opened. The handle is held behind a lock so whole
/// lines reach stderr intact.
pub struct StderrSink {
    stderr: Mutex<Stderr>,
}

impl StderrSink {
    pub fn new() -> Self {
        StderrSink {
            stderr: Mutex::new(tokio::io::stderr()),
        }
    }
}

impl Default for StderrSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogSink for StderrSink {
    async fn send(&self, record: &LogRecord) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut stderr = self.stderr.lock().await;
        stderr.write_all(line.as_bytes()).await?;
        stderr.flush().await?;
        Ok(())
    }
}
