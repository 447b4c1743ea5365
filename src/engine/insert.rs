//! Edit insertion and normalization.
//!
//! Every submitted change resolves to exactly one new [`Edit`]. Edits it
//! fully covers are absorbed, edits it touches are merged into it, and the
//! change set never ends up with two overlapping or touching edits. All checks
//! run before the change set is mutated, so a rejected change leaves it
//! untouched.

use super::TextWithChanges;
use crate::edit::{Edit, EditId, is_blank};
use crate::error::{TextError, TextResult};
use crate::position::{Position, Range};

impl TextWithChanges {
    /// Replace the logical text in `range` with the whitespace `text`.
    ///
    /// Returns the range now covering the inserted text. Positions naming an
    /// edit that this call superseded become invalid; use the returned range
    /// to keep addressing the edited region.
    pub fn add_change(&mut self, range: Range, text: &str) -> TextResult<Range> {
        self.validate_range(range)?;
        if !is_blank(text) {
            return Err(TextError::NonWhitespace);
        }
        if range.is_empty() && text.is_empty() {
            return Ok(range);
        }
        if self.count_non_whitespace(range)? != 0 {
            return Err(TextError::NonWhitespace);
        }

        let result = match (range.start, range.end) {
            (Position::InBase { offset }, end) => self.replace_from_base(offset, end, text),
            (Position::InEdit { edit, offset }, Position::InBase { offset: end }) => {
                self.replace_from_edit(edit, offset, end, text)
            }
            (
                Position::InEdit {
                    edit: start_edit,
                    offset: start,
                },
                Position::InEdit {
                    edit: end_edit,
                    offset: end,
                },
            ) => {
                if start_edit != end_edit {
                    return Err(TextError::IntersectingChanges);
                }
                self.replace_inside(start_edit, start, end, text)
            }
        };

        if let Err(err) = &result {
            log::debug!(target: "text_with_changes::insert", "rejected change {range}: {err}");
        }
        result
    }

    /// Range starting on base text. The end is either base text or the very
    /// start of an edit, which is then merged on the right.
    fn replace_from_base(&mut self, from: usize, end: Position, text: &str) -> TextResult<Range> {
        let (to, right) = match end {
            Position::InBase { offset } => (offset, None),
            Position::InEdit { edit, offset: 0 } => (self.resolve(end)?.from(), Some(edit)),
            Position::InEdit { .. } => return Err(TextError::invalid_position(end)),
        };

        let contained: Vec<EditId> = self
            .changes
            .within(from, to)
            .filter(|edit| Some(edit.id()) != right)
            // Text inserted at `from` precedes the range.
            .filter(|edit| !(edit.is_insertion() && edit.from() == from))
            .map(Edit::id)
            .collect();
        let absorbed = match contained.as_slice() {
            [] => None,
            [edit] => Some(*edit),
            _ => {
                log::debug!(
                    target: "text_with_changes::insert",
                    "[{from}, {to}) spans {} existing edits",
                    contained.len()
                );
                return Err(TextError::IntersectingChanges);
            }
        };

        self.commit(from, to, absorbed, right, text, end)
    }

    /// Range starting at the very beginning of an edit and ending on base
    /// text; the edit and everything up to `to` is replaced.
    fn replace_from_edit(
        &mut self,
        edit: EditId,
        offset: usize,
        to: usize,
        text: &str,
    ) -> TextResult<Range> {
        if offset != 0 {
            return Err(TextError::IntersectingChanges);
        }
        let from = self.resolve(Position::in_edit(edit, offset))?.from();
        if self.changes.within(from, to).any(|other| other.id() != edit) {
            return Err(TextError::IntersectingChanges);
        }

        self.commit(from, to, Some(edit), None, text, Position::in_base(to))
    }

    /// Range inside the replacement text of a single edit.
    fn replace_inside(
        &mut self,
        edit: EditId,
        start: usize,
        end: usize,
        text: &str,
    ) -> TextResult<Range> {
        let replaced = self
            .resolve(Position::in_edit(edit, start))?
            .splice(start, end, text);
        self.changes.remove(edit);
        log::debug!(
            target: "text_with_changes::insert",
            "replaced {edit} with {} {replaced}",
            replaced.id()
        );

        let base_end = Position::in_base(replaced.to());
        if replaced.is_noop() {
            return Ok(Range::empty(base_end));
        }
        let id = replaced.id();
        let empty = replaced.is_deletion();
        self.changes.insert(replaced);

        if empty {
            return Ok(Range::empty(base_end));
        }
        let end = Position::in_edit(id, start + text.len());
        let start = if text.is_empty() {
            end
        } else {
            Position::in_edit(id, start)
        };
        Ok(start.up_to(end))
    }

    /// Build the edit over `[from, to)`, drop `absorbed`, merge the edit
    /// ending at `from` on the left and `right` on the right, then insert.
    ///
    /// `end` is the caller's range end, returned as-is when nothing is merged
    /// on the right.
    fn commit(
        &mut self,
        from: usize,
        to: usize,
        absorbed: Option<EditId>,
        right: Option<EditId>,
        text: &str,
        end: Position,
    ) -> TextResult<Range> {
        let mut edit = Edit::new(from, to, text)?;

        let left = self
            .changes
            .ending_at(from)
            .map(Edit::id)
            .filter(|left| Some(*left) != absorbed);

        if let Some(absorbed) = absorbed.and_then(|id| self.changes.remove(id)) {
            log::debug!(target: "text_with_changes::insert", "absorbed {absorbed}");
        }

        let mut shift = 0;
        if let Some(left) = left.and_then(|id| self.changes.remove(id)) {
            log::debug!(target: "text_with_changes::insert", "merging {left} on the left");
            shift = left.text().len();
            edit = left.merge(&edit);
        }
        let merged_right = match right.and_then(|id| self.changes.remove(id)) {
            Some(right) => {
                log::debug!(target: "text_with_changes::insert", "merging {right} on the right");
                edit = edit.merge(&right);
                true
            }
            None => false,
        };

        let id = edit.id();
        let base_end = Position::in_base(edit.to());
        let has_text = !edit.is_deletion();
        if edit.is_noop() {
            log::debug!(target: "text_with_changes::insert", "change at {from} cancels out");
        } else {
            log::debug!(target: "text_with_changes::insert", "inserting {} {edit}", edit.id());
            self.changes.insert(edit);
        }

        let end = match (merged_right, has_text) {
            (true, true) => Position::in_edit(id, shift + text.len()),
            (true, false) => base_end,
            (false, _) => end,
        };
        let start = if text.is_empty() {
            end
        } else {
            Position::in_edit(id, shift)
        };
        Ok(start.up_to(end))
    }
}
