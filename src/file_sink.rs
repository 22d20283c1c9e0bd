use crate::error::LogError;
use crate::record::LogRecord;
use crate::sink::LogSink;
use async_trait::async_trait;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Append-only file sink emitting one JSON object per line.
///
/// The file is opened once at construction and shared for the life of the
/// sink. Each record is serialized to a full line first and written with a
/// single `write_all` while holding the file lock, so records from
/// concurrent callers never interleave on disk.
#[derive(Debug)]
pub struct FileSink {
    file: Mutex<File>,
    path: PathBuf,
}

impl FileSink {
    /// Open (creating if needed) the log file at `path` in append mode.
    ///
    /// **Returns**
    /// - `Err(LogError::SinkUnavailable)` if the file cannot be opened,
    ///   e.g. the directory does not exist or permission is denied.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, LogError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        Ok(FileSink {
            file: Mutex::new(file),
            path,
        })
    }

    /// Path this sink appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LogSink for FileSink {
    async fn send(&self, record: &LogRecord) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        Ok(())
    }

    async fn flush(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut file = self.file.lock().await;
        file.flush().await?;
        Ok(())
    }
}
