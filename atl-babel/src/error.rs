//! Error types for conversion operations

use std::fmt;

/// Errors that can occur while converting between rich-text formats
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Source markup could not be parsed
    ParseError(String),
    /// Document could not be rendered
    SerializationError(String),
    /// Direction not supported by the format
    NotSupported(String),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            ConversionError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConversionError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            ConversionError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
        }
    }
}

impl std::error::Error for ConversionError {}
