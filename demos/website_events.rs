//! Emits the event categories of a small demo website (page access, API
//! calls, system health, auth, suspicious activity, purchases) to a
//! JSON-lines file, using fixed values where the real site would measure
//! or receive them.

use event_log_sink::fields;
use event_log_sink::logger::EventLogger;
use event_log_sink::record::{FieldMap, Severity};

#[tokio::main]
async fn main() {
    let logger = EventLogger::to_file("website_logs.jsonl")
        .await
        .expect("open log file");

    // Application logs
    logger.log_event(
        Severity::Info,
        "Accessed Home Page",
        fields! { "endpoint" => "/", "status" => "success" },
    );
    logger.log_event(
        Severity::Info,
        "API request received",
        fields! { "endpoint" => "/api", "status" => "success", "response_time_ms" => 420_i64 },
    );

    // System logs
    logger.log_event(
        Severity::Info,
        "System health checked",
        fields! { "endpoint" => "/system", "cpu_usage" => 37.5_f64, "memory_usage" => 61.2_f64 },
    );

    // Security logs
    logger.log_event(
        Severity::Info,
        "User login attempt: LOGIN_SUCCESS",
        fields! { "username" => "alice", "status" => "success" },
    );
    logger.log_event(
        Severity::Info,
        "User login attempt: LOGIN_FAILURE",
        fields! { "username" => "mallory", "status" => "failure" },
    );
    logger.log_event(
        Severity::Warning,
        "Suspicious activity detected",
        fields! { "ip_address" => "203.0.113.5" },
    );

    // Business logs
    logger.log_event(
        Severity::Info,
        "Purchase made",
        fields! {
            "user" => "alice",
            "product" => "notebook",
            "amount" => 240_i64,
            "transaction_id" => 48213_i64,
        },
    );

    // Bulk generation
    for _ in 0..10 {
        logger.log_event(Severity::Info, "Generated bulk logs for testing", FieldMap::new());
    }

    // Error logs
    logger.log_event(
        Severity::Error,
        "404 error",
        fields! { "path" => "/does-not-exist" },
    );

    logger.shutdown().await;
    println!("wrote records to website_logs.jsonl");
}
