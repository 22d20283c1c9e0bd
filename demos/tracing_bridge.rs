use event_log_sink::init::init_tracing;
use event_log_sink::logger::EventLogger;
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let logger = EventLogger::to_file("website_logs.jsonl")
        .await
        .expect("open log file");
    init_tracing(logger);

    info!(endpoint = "/", status = "success", "Accessed Home Page");
    warn!(ip_address = "203.0.113.5", "Suspicious activity detected");
    error!(path = "/missing", "404 error");

    // Give the writer task a little time to drain the channel.
    sleep(Duration::from_secs(1)).await;
}
