//! Error handling types for text-with-changes
//!
//! This module provides the error type returned when an edit is rejected.

use crate::position::{Position, Range};
use thiserror::Error;

/// Reasons an edit submitted to [`TextWithChanges`](crate::TextWithChanges) can be rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    /// Offset out of bounds, inside a replaced region, or naming an edit that
    /// is no longer part of the change set
    #[error("Invalid position: {0}")]
    InvalidPosition(Position),

    /// Range end precedes its start
    #[error("Invalid range: {0}")]
    InvalidRange(Range),

    /// Replacement text or replaced text contains a non-whitespace character
    #[error("Change touches non-whitespace text")]
    NonWhitespace,

    /// Range boundaries are ambiguous relative to existing edits
    #[error("Change intersects existing changes")]
    IntersectingChanges,
}

/// Result type for change set operations
pub type TextResult<T> = Result<T, TextError>;

/// Helper functions for common error patterns
impl TextError {
    /// Create an invalid position error
    pub fn invalid_position(position: Position) -> Self {
        TextError::InvalidPosition(position)
    }

    /// Create an invalid range error
    pub fn invalid_range(range: Range) -> Self {
        TextError::InvalidRange(range)
    }
}
