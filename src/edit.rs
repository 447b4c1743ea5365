//! Immutable whitespace edits over the base text.
//!
//! An [`Edit`] replaces the base range `[from, to)` with a whitespace-only
//! string. Edits are never mutated: every change to the change set allocates a
//! fresh [`EditId`], so positions held across a mutation stop resolving instead
//! of silently pointing at a different edit.

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{TextError, TextResult};

static NEXT_EDIT_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of one edit. Unique across every change set in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EditId(u64);

impl EditId {
    pub(crate) fn fresh() -> Self {
        EditId(NEXT_EDIT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for EditId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Returns true if `text` is empty or consists only of whitespace
pub fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// A replacement of the base range `[from, to)` with whitespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    id: EditId,
    from: usize,
    to: usize,
    text: String,
}

impl Edit {
    /// Build an edit with a fresh identity.
    ///
    /// Fails with `NonWhitespace` if `text` contains anything but whitespace.
    pub(crate) fn new(from: usize, to: usize, text: impl Into<String>) -> TextResult<Self> {
        debug_assert!(from <= to, "edit range [{from}, {to}) is reversed");
        let text = text.into();
        if !is_blank(&text) {
            return Err(TextError::NonWhitespace);
        }
        Ok(Self {
            id: EditId::fresh(),
            from,
            to,
            text,
        })
    }

    pub fn id(&self) -> EditId {
        self.id
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    /// Replacement text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn base_range(&self) -> std::ops::Range<usize> {
        self.from..self.to
    }

    /// Bytes removed from the base text minus bytes inserted.
    pub fn length_delta(&self) -> isize {
        (self.to - self.from) as isize - self.text.len() as isize
    }

    /// Pure insertion: empty base range
    pub fn is_insertion(&self) -> bool {
        self.from == self.to
    }

    /// Pure deletion: empty replacement
    pub fn is_deletion(&self) -> bool {
        self.text.is_empty()
    }

    /// An edit that neither removes nor inserts anything
    pub fn is_noop(&self) -> bool {
        self.is_insertion() && self.is_deletion()
    }

    /// True if the base character at `offset` is replaced by this edit
    pub fn covers(&self, offset: usize) -> bool {
        self.from <= offset && offset < self.to
    }

    /// True if `offset` lies in `[from, to]`, both bounds inclusive
    pub fn contains(&self, offset: usize) -> bool {
        self.from <= offset && offset <= self.to
    }

    /// Concatenate two touching edits (`self.to == right.from`) into one.
    ///
    /// The result has a fresh identity; both inputs are superseded.
    pub(crate) fn merge(&self, right: &Edit) -> Edit {
        debug_assert_eq!(self.to, right.from, "merged edits must touch");
        let mut text = String::with_capacity(self.text.len() + right.text.len());
        text.push_str(&self.text);
        text.push_str(&right.text);
        Edit {
            id: EditId::fresh(),
            from: self.from,
            to: right.to,
            text,
        }
    }

    /// Replace the bytes `start..end` of the replacement text with `text`,
    /// keeping the base range.
    pub(crate) fn splice(&self, start: usize, end: usize, text: &str) -> Edit {
        let mut spliced =
            String::with_capacity(self.text.len() - (end - start) + text.len());
        spliced.push_str(&self.text[..start]);
        spliced.push_str(text);
        spliced.push_str(&self.text[end..]);
        Edit {
            id: EditId::fresh(),
            from: self.from,
            to: self.to,
            text: spliced,
        }
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}) {:?}", self.from, self.to, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_whitespace_replacement() {
        assert_eq!(Edit::new(0, 1, "x").unwrap_err(), TextError::NonWhitespace);
        assert!(Edit::new(0, 1, " \t\n").is_ok());
        assert!(Edit::new(0, 1, "").is_ok());
    }

    #[test]
    fn test_length_delta() {
        assert_eq!(Edit::new(0, 1, "  ").unwrap().length_delta(), -1);
        assert_eq!(Edit::new(4, 5, "").unwrap().length_delta(), 1);
        assert_eq!(Edit::new(2, 2, "\n").unwrap().length_delta(), -1);
        assert_eq!(Edit::new(2, 4, "\t\t").unwrap().length_delta(), 0);
    }

    #[test]
    fn test_every_edit_gets_a_fresh_identity() {
        let a = Edit::new(0, 1, " ").unwrap();
        let b = Edit::new(0, 1, " ").unwrap();
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn test_merge_concatenates_text_and_spans_union() {
        let left = Edit::new(0, 1, "\t").unwrap();
        let right = Edit::new(1, 3, "  ").unwrap();

        let merged = left.merge(&right);

        assert_eq!(merged.base_range(), 0..3);
        assert_eq!(merged.text(), "\t  ");
        assert_ne!(merged.id(), left.id());
        assert_ne!(merged.id(), right.id());
    }

    #[test]
    fn test_splice_keeps_base_range() {
        let edit = Edit::new(0, 2, "\t\t").unwrap();

        let spliced = edit.splice(1, 1, "  ");

        assert_eq!(spliced.base_range(), 0..2);
        assert_eq!(spliced.text(), "\t  \t");
    }

    #[test]
    fn test_covers_excludes_end_but_contains_includes_it() {
        let edit = Edit::new(2, 4, "").unwrap();
        assert!(!edit.covers(1));
        assert!(edit.covers(2));
        assert!(edit.covers(3));
        assert!(!edit.covers(4));
        assert!(edit.contains(2));
        assert!(edit.contains(4));
        assert!(!edit.contains(5));
    }

    #[test]
    fn test_display() {
        let edit = Edit::new(0, 2, "\t ").unwrap();
        assert_eq!(edit.to_string(), "[0, 2) \"\\t \"");
    }
}
