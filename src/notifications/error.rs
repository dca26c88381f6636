//! Notification Error Types
//!
//! Lifecycle operations on unknown or already-dismissed ids are deliberately
//! silent no-ops, so the error surface here is small: parsing the plain
//! configuration enums from text (config files, style sheets).

use thiserror::Error;

/// Result type for parsing notification configuration values
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors produced when parsing configuration enums from text
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Unrecognised notification category
    #[error("unknown category '{0}' (expected: info, success, warning, error, neutral)")]
    Category(String),

    /// Unrecognised screen position
    #[error("unknown position '{0}' (expected: top, bottom, left, right)")]
    Position(String),

    /// Unrecognised animation kind
    #[error("unknown animation '{0}' (expected: slide, fade, scale)")]
    Animation(String),
}
