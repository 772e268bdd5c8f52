//! Error types for the merger core
//!
//! Every core operation fails with exactly one of these kinds; front ends
//! catch them and show the message without crashing.

use thiserror::Error;

/// Validation and parse failures from the core JSON operations
#[derive(Error, Debug)]
pub enum ControlsError {
    /// Input text was blank after trimming
    #[error("no JSON text provided")]
    EmptyInput,

    /// Text failed to parse; the inner error carries line/column
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The parsed value was not a JSON object
    #[error("{role} JSON must be an object")]
    NotAnObject { role: &'static str },

    /// The object has no `controls` field
    #[error("{role} JSON does not contain a 'controls' section")]
    MissingControls { role: &'static str },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, ControlsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_message() {
        let err = ControlsError::EmptyInput;
        assert!(err.to_string().contains("no JSON text"));
    }

    #[test]
    fn test_invalid_json_carries_position() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let err = ControlsError::from(parse_err);
        let msg = err.to_string();
        assert!(msg.starts_with("invalid JSON:"));
        // serde_json reports "... at line L column C"
        assert!(msg.contains("line"));
        assert!(msg.contains("column"));
    }

    #[test]
    fn test_not_an_object_names_role() {
        let err = ControlsError::NotAnObject { role: "target" };
        assert_eq!(err.to_string(), "target JSON must be an object");
    }

    #[test]
    fn test_missing_controls_names_role() {
        let err = ControlsError::MissingControls { role: "source" };
        assert!(err.to_string().contains("source"));
        assert!(err.to_string().contains("'controls'"));
    }
}
