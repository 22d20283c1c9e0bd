use event_log_sink::fields;
use event_log_sink::logger::{EventLogger, EventLoggerConfig};
use event_log_sink::noop_sink::NoopSink;
use event_log_sink::record::Severity;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let sink = Arc::new(NoopSink::default());
    let logger = EventLogger::new(
        sink,
        EventLoggerConfig {
            channel_buffer: 65_536,
        },
    );

    let n: u64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        logger.log_event(Severity::Info, "load test event", fields! { "iteration" => i });
    }

    let elapsed = start.elapsed();
    println!(
        "sent {} events in {:?} (~{:.0} ev/s), dropped {}",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64(),
        logger
            .dropped_events
            .load(std::sync::atomic::Ordering::Relaxed)
    );

    logger.shutdown().await;
}
