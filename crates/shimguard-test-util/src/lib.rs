//! Shared test utilities for the shimguard workspace.
//!
//! Lives in its own crate because `xtask` needs `normalize_nondeterministic`
//! at runtime, not only behind `#[cfg(test)]`.

use serde_json::Value;

/// Placeholder written over `tool.version` in golden reports.
pub const VERSION_PLACEHOLDER: &str = "__VERSION__";
/// Placeholder written over timestamps in golden reports.
pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";

const TIMESTAMP_KEYS: [&str; 2] = ["started_at", "finished_at"];

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// `tool.version` is replaced only when the *root* object is a report
/// envelope (`schema`, `tool`, `verdict`, `findings`, `data`), so finding
/// payloads that happen to carry a `tool` object are left alone. Timestamp
/// keys are replaced at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ["schema", "tool", "verdict", "findings", "data"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_envelope
            && let Some(tool_obj) = obj.get_mut("tool").and_then(Value::as_object_mut)
            && tool_obj.contains_key("name")
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String(VERSION_PLACEHOLDER.to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in TIMESTAMP_KEYS {
                if let Some(slot) = map.get_mut(key) {
                    *slot = Value::String(TIMESTAMP_PLACEHOLDER.to_string());
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}
