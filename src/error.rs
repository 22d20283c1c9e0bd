/// Errors produced while constructing or emitting log records.
///
/// Logging failures are deliberately isolated from the code path being
/// instrumented: [`crate::logger::EventLogger::log_event`] never returns
/// these, reporting sink trouble to stderr instead. They surface only
/// from explicit operations such as opening a sink, parsing a severity
/// name or shutting the logger down.
#[derive(thiserror::Error, Debug)]
pub enum LogError {
    #[error("unrecognized severity level: {0}")]
    InvalidSeverity(String),

    #[error("log sink unavailable: {0}")]
    SinkUnavailable(#[from] std::io::Error),

    #[error("could not serialize log record: {0}")]
    SerializationFailure(#[from] serde_json::Error),
}
