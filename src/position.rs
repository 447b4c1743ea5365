//! Positions and ranges in the logical (edited) text.
//!
//! A position is either an offset into the unchanged base text or an offset
//! into the replacement text of a specific edit. Neither type validates
//! itself; only [`TextWithChanges`](crate::TextWithChanges) can tell whether a
//! position is meaningful against its current change set.

use serde::Serialize;
use std::fmt;

use crate::edit::EditId;

/// A location in the logical text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Position {
    /// Byte offset into the base text, outside any replaced region
    InBase { offset: usize },
    /// Byte offset into the replacement text of `edit`
    InEdit { edit: EditId, offset: usize },
}

impl Position {
    pub fn in_base(offset: usize) -> Self {
        Position::InBase { offset }
    }

    pub fn in_edit(edit: EditId, offset: usize) -> Self {
        Position::InEdit { edit, offset }
    }

    /// Range from `self` (inclusive) to `end` (exclusive)
    pub fn up_to(self, end: Position) -> Range {
        Range::new(self, end)
    }

    /// Edit referenced by this position, if any
    pub fn edit(&self) -> Option<EditId> {
        match self {
            Position::InBase { .. } => None,
            Position::InEdit { edit, .. } => Some(*edit),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::InBase { offset } => write!(f, "base@{offset}"),
            Position::InEdit { edit, offset } => write!(f, "{edit}@{offset}"),
        }
    }
}

/// Start (inclusive) and end (exclusive) of a span of logical text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Empty range at `position`
    pub fn empty(position: Position) -> Self {
        Self::new(position, position)
    }

    /// Range over the base offsets `start..end`
    pub fn in_base(start: usize, end: usize) -> Self {
        Self::new(Position::in_base(start), Position::in_base(end))
    }

    /// Range over the replacement bytes `start..end` of one edit
    pub fn in_edit(edit: EditId, start: usize, end: usize) -> Self {
        Self::new(Position::in_edit(edit, start), Position::in_edit(edit, end))
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Whether a validated position sits inside replacement text or on base text.
///
/// Replacement text anchored at `o` precedes the base character at `o`, so
/// `InEdit` orders first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Phase {
    InEdit,
    InBase,
}

/// Total order over validated positions: base anchor, then phase, then the
/// offset inside the edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct AnchorKey {
    pub anchor: usize,
    pub phase: Phase,
    pub inner: usize,
}

impl AnchorKey {
    pub fn base(offset: usize) -> Self {
        Self {
            anchor: offset,
            phase: Phase::InBase,
            inner: 0,
        }
    }

    pub fn edit(from: usize, inner: usize) -> Self {
        Self {
            anchor: from,
            phase: Phase::InEdit,
            inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_order_by_anchor_first() {
        assert!(AnchorKey::base(1) < AnchorKey::base(2));
        assert!(AnchorKey::edit(1, 5) < AnchorKey::base(2));
        assert!(AnchorKey::base(1) < AnchorKey::edit(2, 0));
    }

    #[test]
    fn test_inserted_text_precedes_base_at_same_anchor() {
        assert!(AnchorKey::edit(3, 0) < AnchorKey::base(3));
        assert!(AnchorKey::edit(3, 2) < AnchorKey::base(3));
        assert!(AnchorKey::edit(3, 0) < AnchorKey::edit(3, 1));
    }

    #[test]
    fn test_up_to_builds_range() {
        let range = Position::in_base(0).up_to(Position::in_base(4));
        assert_eq!(range, Range::in_base(0, 4));
        assert!(!range.is_empty());
        assert!(Range::empty(Position::in_base(2)).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::in_base(3).to_string(), "base@3");
        assert_eq!(Range::in_base(1, 2).to_string(), "base@1..base@2");
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_value(Position::in_base(3)).unwrap();
        insta::assert_json_snapshot!(json, @r#"
        {
          "kind": "in_base",
          "offset": 3
        }
        "#);
    }
}
