//! Structured error types for the reflow engine.
//!
//! The transform itself is total over its input domain, so errors only
//! surface at the boundaries: JSON parsing and file I/O in the CLI.

use std::fmt;
use std::io;

/// The unified error type returned by all public reflow API functions.
#[derive(Debug)]
pub enum ReflowError {
    /// JSON input failed to parse as a valid layout document.
    ParseError {
        source: serde_json::Error,
        hint: String,
    },
    /// Reading or writing a layout document failed.
    IoError(io::Error),
}

impl fmt::Display for ReflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReflowError::ParseError { source, hint } => {
                write!(f, "Failed to parse layout document: {}", source)?;
                if !hint.is_empty() {
                    write!(f, "\n  Hint: {}", hint)?;
                }
                Ok(())
            }
            ReflowError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ReflowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReflowError::ParseError { source, .. } => Some(source),
            ReflowError::IoError(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for ReflowError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the layout document schema. \
                 Expected an array of component records or an object with a `components` field."
                    .to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input — is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        ReflowError::ParseError { source: e, hint }
    }
}

impl From<io::Error> for ReflowError {
    fn from(e: io::Error) -> Self {
        ReflowError::IoError(e)
    }
}
