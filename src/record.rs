use crate::error::LogError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Keys owned by the record envelope itself. Caller-supplied fields with
/// these names are removed before the record is built, so the envelope
/// values always win.
pub const RESERVED_KEYS: [&str; 3] = ["timestamp", "level", "message"];

/// Severity of a single log record.
///
/// Serialized as the upper-case wire names `"INFO"`, `"WARNING"` and
/// `"ERROR"`. Parsing is case-insensitive; an unrecognized name fails
/// with [`LogError::InvalidSeverity`] rather than being silently
/// normalized to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INFO" => Ok(Severity::Info),
            "WARNING" | "WARN" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            _ => Err(LogError::InvalidSeverity(s.to_string())),
        }
    }
}

/// Scalar value attached to a record under a caller-supplied key.
///
/// Only strings, integers, floats and booleans are representable; anything
/// richer is coerced to its `Debug` string at the boundary via
/// [`FieldValue::coerce_debug`] so a bad field never costs the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
}

impl FieldValue {
    /// Coerce a non-scalar value into a string field using its `Debug`
    /// representation.
    pub fn coerce_debug<T: fmt::Debug>(value: &T) -> Self {
        FieldValue::Str(format!("{:?}", value))
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Str(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(v as i64)
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        FieldValue::Uint(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

/// Caller-supplied structured context for a single record.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// Build a [`FieldMap`] from `key => value` pairs.
///
/// Values go through [`FieldValue::from`], so plain strings, integers,
/// floats and booleans all work:
///
/// ```
/// use event_log_sink::fields;
///
/// let f = fields! { "endpoint" => "/", "status" => "success" };
/// assert_eq!(f.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => { $crate::record::FieldMap::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::record::FieldMap::new();
        $( map.insert(($key).to_string(), $crate::record::FieldValue::from($value)); )+
        map
    }};
}

/// One structured log record: the envelope (timestamp, level, message)
/// plus caller fields flattened next to it on the wire.
///
/// Serializes to a single JSON object of the shape
/// `{"timestamp": <RFC 3339 UTC>, "level": "...", "message": "...", ...fields}`.
/// Records are write-once: constructed, serialized, appended, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: Severity,
    pub message: String,
    #[serde(flatten)]
    pub fields: FieldMap,
}

impl LogRecord {
    /// Build a record stamped with the current UTC time.
    ///
    /// Caller fields that collide with the reserved envelope keys
    /// (`timestamp`, `level`, `message`) are dropped so the envelope
    /// always takes precedence and the emitted JSON never carries a
    /// duplicate key.
    pub fn new(level: Severity, message: impl Into<String>, mut fields: FieldMap) -> Self {
        for key in RESERVED_KEYS {
            fields.remove(key);
        }
        LogRecord {
            timestamp: Utc::now(),
            level,
            message: message.into(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!("info".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!("WARNING".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("Error".parse::<Severity>().unwrap(), Severity::Error);
    }

    #[test]
    fn unknown_severity_is_rejected() {
        let err = "CRITICAL".parse::<Severity>().unwrap_err();
        assert!(matches!(err, LogError::InvalidSeverity(s) if s == "CRITICAL"));
    }

    #[test]
    fn record_serializes_flat() {
        let record = LogRecord::new(
            Severity::Info,
            "Accessed Home Page",
            fields! { "endpoint" => "/", "status" => "success" },
        );

        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&record).unwrap()).unwrap();
        assert_eq!(value["level"], "INFO");
        assert_eq!(value["message"], "Accessed Home Page");
        assert_eq!(value["endpoint"], "/");
        assert_eq!(value["status"], "success");
        // Timestamp is RFC 3339 and parseable back to a UTC instant.
        let ts = value["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[test]
    fn reserved_keys_win_over_caller_fields() {
        let record = LogRecord::new(
            Severity::Warning,
            "real message",
            fields! { "message" => "spoofed", "level" => "ERROR", "ip_address" => "203.0.113.5" },
        );

        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&record).unwrap()).unwrap();
        assert_eq!(value["message"], "real message");
        assert_eq!(value["level"], "WARNING");
        assert_eq!(value["ip_address"], "203.0.113.5");
    }

    #[test]
    fn empty_record_has_only_envelope_keys() {
        let record = LogRecord::new(Severity::Info, "", FieldMap::new());
        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&record).unwrap()).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(value["message"], "");
    }

    #[test]
    fn field_values_round_trip() {
        let record = LogRecord::new(
            Severity::Info,
            "Purchase made",
            fields! {
                "user" => "alice",
                "amount" => 240_i64,
                "transaction_id" => 48213_i64,
                "discounted" => false,
                "rate" => 0.25_f64,
            },
        );

        let parsed: LogRecord =
            serde_json::from_str(&serde_json::to_string(&record).unwrap()).unwrap();
        assert_eq!(parsed.fields, record.fields);
        assert_eq!(parsed.message, record.message);
        assert_eq!(parsed.level, record.level);
    }

    #[test]
    fn coerce_debug_turns_non_scalars_into_strings() {
        let v = FieldValue::coerce_debug(&vec![1, 2, 3]);
        assert_eq!(v, FieldValue::Str("[1, 2, 3]".to_string()));
    }
}
