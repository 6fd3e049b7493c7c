//! JSON-lines span formatting.
//!
//! Each finished span becomes one flat JSON object:
//!
//! ```json
//! {"service":"recluta","traceId":"…","spanId":"…","parentSpanId":null,
//!  "name":"list_fetch","start":"2024-05-01T10:00:00.123Z","durationMs":41.7,
//!  "attributes":{"entity":"candidatos","seq":3,"page":1},
//!  "events":[{"name":"page fetched","time":"…","attributes":{…}}],
//!  "status":"unset"}
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use opentelemetry::trace::{SpanId, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use serde_json::{json, Map, Value as JsonValue};
use std::time::SystemTime;

/// Formats one span as a JSON object.
pub fn format_span(span: &SpanData, service: &str) -> JsonValue {
    let duration_ms = span
        .end_time
        .duration_since(span.start_time)
        .map_or(0.0, |d| d.as_secs_f64() * 1000.0);

    let events: Vec<JsonValue> = span
        .events
        .iter()
        .map(|event| {
            json!({
                "name": event.name,
                "time": timestamp(event.timestamp),
                "attributes": attributes(&event.attributes),
            })
        })
        .collect();

    json!({
        "service": service,
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": (span.parent_span_id != SpanId::INVALID)
            .then(|| format!("{:016x}", span.parent_span_id)),
        "name": span.name,
        "start": timestamp(span.start_time),
        "durationMs": duration_ms,
        "attributes": attributes(&span.attributes),
        "events": events,
        "status": status(&span.status),
    })
}

fn timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Collects key-values into a JSON object; later keys win.
pub(crate) fn attributes(pairs: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = pairs
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

pub(crate) fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

pub(crate) fn status(status: &Status) -> JsonValue {
    match status {
        Status::Unset => json!("unset"),
        Status::Ok => json!("ok"),
        Status::Error { description } => json!({ "error": description.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_become_a_flat_object() {
        let attrs = attributes(&[
            KeyValue::new("entity", "candidatos"),
            KeyValue::new("seq", 3_i64),
            KeyValue::new("stale", false),
        ]);
        assert_eq!(attrs, json!({"entity": "candidatos", "seq": 3, "stale": false}));
    }

    #[test]
    fn error_status_keeps_description() {
        let value = status(&Status::error("timeout"));
        assert_eq!(value, json!({"error": "timeout"}));
        assert_eq!(status(&Status::Unset), json!("unset"));
    }

    #[test]
    fn timestamps_are_utc_millis() {
        assert_eq!(timestamp(SystemTime::UNIX_EPOCH), "1970-01-01T00:00:00.000Z");
    }
}
