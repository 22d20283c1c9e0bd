use crate::logger::EventLogger;
use crate::record::{FieldMap, FieldValue, LogRecord, Severity};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::sync::mpsc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// `tracing_subscriber` layer that converts `tracing` events into
/// [`LogRecord`]s and queues them on an [`EventLogger`]'s channel.
///
/// Events at `INFO`, `WARN` and `ERROR` are captured and mapped onto the
/// three record severities; `DEBUG` and `TRACE` are ignored. Event fields
/// become record fields, with non-scalar values coerced to their `Debug`
/// string. Sink I/O stays fully decoupled from the emitting thread.
pub struct EventLogLayer {
    sender: mpsc::Sender<LogRecord>,
    /// Total events seen by the layer (before filtering by level).
    pub total_events: Arc<AtomicU64>,
    /// Successfully enqueued into the channel.
    pub enqueued_events: Arc<AtomicU64>,
    /// Dropped because the channel was full.
    pub dropped_events: Arc<AtomicU64>,
}

impl EventLogLayer {
    /// Create a layer feeding the given logger's writer task.
    ///
    /// The layer holds its own channel sender, so it keeps the writer
    /// alive independently of the [`EventLogger`] it was created from.
    pub fn new(logger: &EventLogger) -> Self {
        Self {
            sender: logger.sender.clone(),
            total_events: Arc::clone(&logger.total_events),
            enqueued_events: Arc::clone(&logger.enqueued_events),
            dropped_events: Arc::clone(&logger.dropped_events),
        }
    }
}

fn severity_for(level: &Level) -> Severity {
    match *level {
        Level::ERROR => Severity::Error,
        Level::WARN => Severity::Warning,
        _ => Severity::Info,
    }
}

impl<S> Layer<S> for EventLogLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event, _ctx: Context<'_, S>) {
        self.total_events.fetch_add(1, Ordering::Relaxed);
        if *event.metadata().level() > Level::INFO {
            return;
        }

        let mut fields = FieldMap::new();
        let mut message: Option<String> = None;

        let mut visitor = FieldVisitor {
            fields: &mut fields,
            message: &mut message,
        };
        event.record(&mut visitor);

        let record = LogRecord::new(
            severity_for(event.metadata().level()),
            message.unwrap_or_default(),
            fields,
        );

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
}

struct FieldVisitor<'a> {
    fields: &'a mut FieldMap,
    message: &'a mut Option<String>,
}

impl<'a> Visit for FieldVisitor<'a> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            *self.message = Some(value.to_string());
        } else {
            self.fields
                .insert(field.name().to_string(), FieldValue::from(value));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields
            .insert(field.name().to_string(), FieldValue::Int(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields
            .insert(field.name().to_string(), FieldValue::Uint(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields
            .insert(field.name().to_string(), FieldValue::Float(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields
            .insert(field.name().to_string(), FieldValue::Bool(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        // The event message arrives here as `format_args!` output.
        if field.name() == "message" {
            *self.message = Some(format!("{:?}", value));
        } else {
            self.fields
                .insert(field.name().to_string(), FieldValue::coerce_debug(&value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::EventLoggerConfig;
    use crate::sink::LogSink;
    use async_trait::async_trait;
    use std::error::Error;
    use tokio::sync::Mutex;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    #[derive(Default)]
    struct CaptureSink {
        records: Mutex<Vec<LogRecord>>,
    }

    #[async_trait]
    impl LogSink for CaptureSink {
        async fn send(&self, record: &LogRecord) -> Result<(), Box<dyn Error + Send + Sync>> {
            self.records.lock().await.push(record.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn events_become_records() {
        let sink = Arc::new(CaptureSink::default());
        let logger = EventLogger::new(sink.clone(), EventLoggerConfig::default());
        let layer = EventLogLayer::new(&logger);
        let subscriber = Registry::default().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(ip_address = "203.0.113.5", "Suspicious activity detected");
            tracing::info!(endpoint = "/api", response_time_ms = 731_i64, "API request received");
            tracing::debug!("should be filtered out");
        });

        // Subscriber (and its sender) dropped by with_default; shutdown drains.
        logger.shutdown().await;

        let records = sink.records.lock().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].level, Severity::Warning);
        assert_eq!(records[0].message, "Suspicious activity detected");
        assert_eq!(
            records[0].fields.get("ip_address"),
            Some(&FieldValue::Str("203.0.113.5".to_string()))
        );
        assert_eq!(records[1].level, Severity::Info);
        assert_eq!(
            records[1].fields.get("response_time_ms"),
            Some(&FieldValue::Int(731))
        );
    }
}
