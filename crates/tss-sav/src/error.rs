//! Error types for system file decoding.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when decoding a system file.
///
/// Every variant is fatal: a parse either completes or aborts with one of
/// these. Messages always name the expected and the observed value.
#[derive(Debug, Error)]
pub enum SavError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Seek target lies outside the buffer.
    #[error("seek out of bounds: position {position}, expected 0..={len}")]
    SeekOutOfBounds { position: usize, len: usize },

    /// A backward step would move before the start of the buffer.
    #[error("rewind out of bounds: {count} bytes back from offset {offset}, expected at most {offset}")]
    RewindOutOfBounds { offset: usize, count: usize },

    /// A read requested more bytes than remain in the buffer.
    #[error(
        "unexpected end of file at offset {offset}: requested {requested} bytes, {remaining} remaining"
    )]
    UnexpectedEof {
        offset: usize,
        requested: usize,
        remaining: usize,
    },

    /// The leading file signature is wrong.
    #[error("signature mismatch: expected {expected:?}, found {actual:?}")]
    SignatureMismatch {
        expected: &'static str,
        actual: String,
    },

    /// A fixed magic constant inside a record is wrong.
    #[error("magic mismatch in {record}: expected {expected}, found {actual}")]
    MagicMismatch {
        record: &'static str,
        expected: i32,
        actual: i32,
    },

    /// An extension record has the wrong size for its subtype.
    #[error("size mismatch in extension subtype {subtype}: expected {expected}, found {actual}")]
    SizeMismatch {
        subtype: i32,
        expected: String,
        actual: String,
    },

    /// An instruction code that is not valid for the current cell.
    #[error("invalid instruction code {code} in {context}: expected {expected}")]
    InvalidCode {
        code: u8,
        context: &'static str,
        expected: &'static str,
    },

    /// End-of-data code found in the middle of a row.
    #[error("unexpected end of records at offset {offset}: code 252 inside a case")]
    UnexpectedEndOfRecords { offset: usize },

    /// A dictionary record tag outside the allowed set.
    #[error("unknown record type {tag} at offset {offset}: expected one of {expected}")]
    UnknownRecordType {
        tag: i32,
        offset: usize,
        expected: &'static str,
    },

    /// Structurally invalid content.
    #[error("invalid system file: {message}")]
    InvalidFormat { message: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for system file operations.
pub type Result<T> = std::result::Result<T, SavError>;

impl SavError {
    /// Create an InvalidFormat error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create a SizeMismatch error.
    pub fn size_mismatch(
        subtype: i32,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::SizeMismatch {
            subtype,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an InvalidCode error.
    pub fn invalid_code(code: u8, context: &'static str, expected: &'static str) -> Self {
        Self::InvalidCode {
            code,
            context,
            expected,
        }
    }
}
