use crate::logger::{EventLogger, EventLoggerConfig};
use crate::sink::LogSink;
use std::sync::Arc;

/// Environment variable names used by this crate for convenient
/// configuration from services.
///
/// These are purely helpers; the core logger and sink types remain
/// decoupled from environment access.

/// Path of the JSON-lines log file, e.g. `/var/log/app/events.jsonl`.
pub const EVENT_LOG_FILE_ENV: &str = "EVENT_LOG_FILE";

/// Channel buffer size for the logger, as a decimal integer.
pub const EVENT_LOG_BUFFER_ENV: &str = "EVENT_LOG_BUFFER";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Build an [`EventLogger`] from the environment.
///
/// Opens the file named by [`EVENT_LOG_FILE_ENV`] (default
/// `events.jsonl`) and applies [`EVENT_LOG_BUFFER_ENV`] if it parses as
/// an integer. If the file cannot be opened the logger falls back to a
/// stderr sink so the process keeps a working log destination, per the
/// sink-unavailable policy.
pub async fn logger_from_env() -> EventLogger {
    let path = env_or(EVENT_LOG_FILE_ENV, "events.jsonl");
    let mut config = EventLoggerConfig::default();
    if let Ok(buffer) = env_or(EVENT_LOG_BUFFER_ENV, "").parse::<usize>() {
        config.channel_buffer = buffer;
    }

    let sink: Arc<dyn LogSink> = match crate::file_sink::FileSink::open(&path).await {
        Ok(sink) => Arc::new(sink),
        Err(e) => {
            eprintln!(
                "could not open log file {}: {}, falling back to stderr",
                path, e
            );
            Arc::new(crate::stderr_sink::StderrSink::new())
        }
    };

    EventLogger::new(sink, config)
}
