//! Error types for the DC-DC converter designer.
//!
//! This module provides a unified error type [`DesignError`] that covers
//! all error conditions that can occur during design-file parsing, design
//! validation, converter sizing, and report output.

use thiserror::Error;

use crate::design::Topology;

/// Result type alias using [`DesignError`].
pub type Result<T> = std::result::Result<T, DesignError>;

/// Unified error type for all designer operations.
#[derive(Error, Debug)]
pub enum DesignError {
    // ============ Sizing Errors ============
    /// The voltage ordering required by the topology is violated
    #[error("Invalid {topology} design: {message}")]
    InvalidSpec { topology: Topology, message: String },

    // ============ Design File Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Unknown design parameter name
    #[error("Unknown parameter '{name}' at line {line}")]
    UnknownParameter { name: String, line: usize },

    /// Parameter given more than once
    #[error("Duplicate parameter '{name}' at line {line}")]
    DuplicateParameter { name: String, line: usize },

    /// Required parameter not present in the design
    #[error("Missing required parameter '{name}'")]
    MissingParameter { name: String },

    /// Core material not found in the material table
    #[error("Unknown core material '{name}'")]
    UnknownCore { name: String },

    /// Material defined twice in the same design
    #[error("Duplicate material name '{name}'")]
    DuplicateMaterial { name: String },

    // ============ Validation Errors ============
    /// Parameter value out of its allowed range
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // ============ I/O Errors ============
    /// Error reading design file
    #[error("Failed to read design file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing a report
    #[error("Output error: {message}")]
    OutputError { message: String },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl DesignError {
    /// Create an invalid spec error
    pub fn invalid_spec(topology: Topology, message: impl Into<String>) -> Self {
        Self::InvalidSpec {
            topology,
            message: message.into(),
        }
    }

    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Returns true for the topology voltage-ordering error.
    pub fn is_invalid_spec(&self) -> bool {
        matches!(self, Self::InvalidSpec { .. })
    }
}
