//! Structured error types for the quotation pager.
//!
//! Configuration and shape errors come from the engine itself. Probe errors
//! come from the rendering surface and pass through untouched. Parse errors
//! cover host configuration supplied as JSON.

use thiserror::Error;

/// Error type returned by a [`HeightProbe`](crate::layout::probe::HeightProbe).
pub type ProbeError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The unified error type returned by all public API functions.
#[derive(Debug, Error)]
pub enum QuotationError {
    /// Header, suppliers, purpose or page settings are missing or inconsistent.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A row does not have one cell per header column.
    #[error("Shape error: row has {actual} cells, header has {expected} columns")]
    Shape { expected: usize, actual: usize },

    /// JSON configuration failed to parse.
    #[error("Failed to parse configuration: {source}{}", hint_suffix(.hint))]
    Parse {
        #[source]
        source: serde_json::Error,
        hint: String,
    },

    /// The measurement surface failed. Never rewritten by the engine.
    #[error(transparent)]
    Probe(ProbeError),

    /// The exporter could not produce its artifact.
    #[error("Export error: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, QuotationError>;

impl QuotationError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        QuotationError::Configuration(msg.into())
    }
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for QuotationError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the layout configuration schema. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        QuotationError::Parse { source: e, hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_error_message_names_both_lengths() {
        let err = QuotationError::Shape {
            expected: 6,
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "Shape error: row has 5 cells, header has 6 columns"
        );
    }

    #[test]
    fn parse_error_carries_hint() {
        let err: QuotationError = serde_json::from_str::<serde_json::Value>("{\"a\": 1,}")
            .unwrap_err()
            .into();
        let msg = err.to_string();
        assert!(msg.contains("Hint: Check for trailing commas"), "{}", msg);
    }

    #[test]
    fn probe_errors_are_transparent() {
        let inner: ProbeError = "surface detached".into();
        let err = QuotationError::Probe(inner);
        assert_eq!(err.to_string(), "surface detached");
    }
}
