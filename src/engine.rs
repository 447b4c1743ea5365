//! The text-with-changes engine.
//!
//! [`TextWithChanges`] owns an immutable base text and the set of whitespace
//! edits pending against it. Callers address the logical (edited) text through
//! [`Position`]s, which stay expressed in base offsets wherever the base text
//! is unchanged, so positions taken from a syntax tree of the base text remain
//! usable while edits accumulate.

mod insert;
mod metrics;
mod search;
mod segments;

pub use search::{Direction, MatchKind, SearchType};

use crate::change_set::ChangeSet;
use crate::edit::{Edit, EditId};
use crate::error::{TextError, TextResult};
use crate::position::{AnchorKey, Position, Range};

#[derive(Debug, Clone)]
pub struct TextWithChanges {
    base: String,
    changes: ChangeSet,
}

impl TextWithChanges {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            changes: ChangeSet::new(),
        }
    }

    /// The unedited text
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    /// Current edits in ascending base order
    pub fn edits(&self) -> impl DoubleEndedIterator<Item = &Edit> + '_ {
        self.changes.iter()
    }

    pub fn edit(&self, id: EditId) -> Option<&Edit> {
        self.changes.get(id)
    }

    /// Edit whose base range contains `offset`, bounds inclusive
    pub fn find_change(&self, offset: usize) -> Option<&Edit> {
        self.changes.touching(offset)
    }

    /// Byte length of the logical text
    pub fn logical_len(&self) -> usize {
        let delta: isize = self.changes.iter().map(Edit::length_delta).sum();
        self.base.len().saturating_add_signed(-delta)
    }

    /// Range spanning the whole logical text
    pub fn full_range(&self) -> Range {
        let start = match self.changes.starting_at(0) {
            Some(edit) => Position::in_edit(edit.id(), 0),
            None => Position::in_base(0),
        };
        start.up_to(Position::in_base(self.base.len()))
    }

    /// Splice every edit into the base text.
    pub fn apply_changes(&self) -> String {
        let mut result = String::with_capacity(self.logical_len());
        let mut cursor = 0;
        for edit in self.changes.iter() {
            result.push_str(&self.base[cursor..edit.from()]);
            result.push_str(edit.text());
            cursor = edit.to();
        }
        result.push_str(&self.base[cursor..]);
        result
    }

    /// Check `position` against the current change set and return its order key.
    pub(crate) fn validate(&self, position: Position) -> TextResult<AnchorKey> {
        let invalid = || TextError::invalid_position(position);
        match position {
            Position::InBase { offset } => {
                if offset > self.base.len() || !self.base.is_char_boundary(offset) {
                    return Err(invalid());
                }
                if self.changes.covering(offset).is_some() {
                    return Err(invalid());
                }
                Ok(AnchorKey::base(offset))
            }
            Position::InEdit { edit, offset } => {
                let edit = self.changes.get(edit).ok_or_else(invalid)?;
                if offset > edit.text().len() || !edit.text().is_char_boundary(offset) {
                    return Err(invalid());
                }
                Ok(AnchorKey::edit(edit.from(), offset))
            }
        }
    }

    /// Validate both endpoints and require `start <= end`.
    pub(crate) fn validate_range(&self, range: Range) -> TextResult<(AnchorKey, AnchorKey)> {
        let start = self.validate(range.start)?;
        let end = self.validate(range.end)?;
        if end < start {
            return Err(TextError::invalid_range(range));
        }
        Ok((start, end))
    }

    /// Edit named by `position`; a base position or a superseded edit is
    /// reported as `position` itself.
    fn resolve(&self, position: Position) -> TextResult<&Edit> {
        position
            .edit()
            .and_then(|id| self.changes.get(id))
            .ok_or_else(|| TextError::invalid_position(position))
    }
}
