//! Core JSON operations: load, extract, merge, stringify
//!
//! These are the only functions that understand the reserved `controls`
//! key. They are pure and synchronous; front ends feed them text and
//! render the results. Object field order survives every operation
//! (serde_json is built with `preserve_order`).

use serde_json::{Map, Value};

use crate::constants::json::CONTROLS_KEY;
use crate::error::{ControlsError, Result};

/// Parse settings text into a JSON value.
///
/// Parsing is strict: malformed input (smart quotes, trailing commas) is
/// rejected with the parser's own line/column diagnostic, never repaired.
pub fn load(text: &str) -> Result<Value> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ControlsError::EmptyInput);
    }
    Ok(serde_json::from_str(text)?)
}

/// Wrap the `controls` field of a settings object into a new
/// controls-only object.
pub fn extract_controls(doc: &Value) -> Result<Value> {
    let Some(obj) = doc.as_object() else {
        return Err(ControlsError::NotAnObject { role: "settings" });
    };
    let controls = obj
        .get(CONTROLS_KEY)
        .ok_or(ControlsError::MissingControls { role: "settings" })?;

    let mut wrapped = Map::new();
    wrapped.insert(CONTROLS_KEY.to_string(), controls.clone());
    Ok(Value::Object(wrapped))
}

/// Replace the target's `controls` value with the source's, leaving every
/// other field of the target untouched.
///
/// The source may be a full settings document or a controls-only document;
/// only its `controls` field is read. A target without `controls` gains
/// one as its last field.
pub fn merge_controls(source: &Value, target: &Value) -> Result<Value> {
    let controls = source
        .as_object()
        .and_then(|obj| obj.get(CONTROLS_KEY))
        .ok_or(ControlsError::MissingControls { role: "source" })?;
    let Some(target_obj) = target.as_object() else {
        return Err(ControlsError::NotAnObject { role: "target" });
    };

    // Insert on an existing key keeps its position in the target
    let mut merged = target_obj.clone();
    merged.insert(CONTROLS_KEY.to_string(), controls.clone());
    Ok(Value::Object(merged))
}

/// Render a value back to text: two-space indented with Unicode preserved,
/// or minified with no whitespace.
pub fn stringify(value: &Value, pretty: bool) -> String {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    // Serializing an in-memory Value cannot fail (all keys are strings)
    rendered.unwrap_or_default()
}
