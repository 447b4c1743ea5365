//! Decomposition of a logical range into base and edit slices.
//!
//! A range splits into at most three zones: the tail of the start edit, the
//! middle span alternating base text with fully contained edits, and the head
//! of the end edit. Search and metrics both walk this decomposition.

use super::TextWithChanges;
use crate::edit::Edit;
use crate::error::TextResult;
use crate::position::{Position, Range};

/// A contiguous slice of the logical text
#[derive(Debug, Clone, Copy)]
pub(crate) enum Segment<'a> {
    /// `text` is the base text starting at byte `start`
    Base { start: usize, text: &'a str },
    /// `text` is the replacement of `edit` starting at byte `start`
    Edit {
        edit: &'a Edit,
        start: usize,
        text: &'a str,
    },
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Base { text, .. } | Segment::Edit { text, .. } => text,
        }
    }

    /// Position of the byte at `index` within this segment
    pub fn position(&self, index: usize) -> Position {
        match self {
            Segment::Base { start, .. } => Position::in_base(start + index),
            Segment::Edit { edit, start, .. } => Position::in_edit(edit.id(), start + index),
        }
    }
}

impl TextWithChanges {
    /// Validate `range` and list its slices in logical order. Empty slices are
    /// omitted.
    pub(crate) fn segments(&self, range: Range) -> TextResult<Vec<Segment<'_>>> {
        self.validate_range(range)?;
        let mut segments = Vec::new();

        match (range.start, range.end) {
            (
                Position::InEdit {
                    edit: start_id,
                    offset: start,
                },
                Position::InEdit {
                    edit: end_id,
                    offset: end,
                },
            ) if start_id == end_id => {
                let edit = self.resolve(range.start)?;
                push_edit(&mut segments, edit, start, end);
                return Ok(segments);
            }
            _ => {}
        }

        // Zone a: tail of the start edit.
        let (cursor, start_edit) = match range.start {
            Position::InBase { offset } => (offset, None),
            Position::InEdit { offset, .. } => {
                let edit = self.resolve(range.start)?;
                push_edit(&mut segments, edit, offset, edit.text().len());
                (edit.to(), Some(edit.id()))
            }
        };

        let (base_end, end_edit) = match range.end {
            Position::InBase { offset } => (offset, None),
            Position::InEdit { offset, .. } => {
                let edit = self.resolve(range.end)?;
                (edit.from(), Some((edit, offset)))
            }
        };

        // Zone b: base text interleaved with the edits it fully contains.
        let mut pos = cursor;
        for edit in self.changes.within(cursor, base_end) {
            let bounding = Some(edit.id()) == start_edit
                || end_edit.is_some_and(|(end, _)| end.id() == edit.id());
            if bounding {
                continue;
            }
            // Text inserted at a base start precedes it.
            if start_edit.is_none() && edit.is_insertion() && edit.from() == cursor {
                continue;
            }
            push_base(&mut segments, &self.base, pos, edit.from());
            push_edit(&mut segments, edit, 0, edit.text().len());
            pos = edit.to();
        }
        push_base(&mut segments, &self.base, pos, base_end);

        // Zone c: head of the end edit.
        if let Some((edit, offset)) = end_edit {
            push_edit(&mut segments, edit, 0, offset);
        }

        log::trace!(
            target: "text_with_changes::segments",
            "{} split into {} segments",
            range,
            segments.len()
        );
        Ok(segments)
    }
}

fn push_base<'a>(segments: &mut Vec<Segment<'a>>, base: &'a str, start: usize, end: usize) {
    if start < end {
        segments.push(Segment::Base {
            start,
            text: &base[start..end],
        });
    }
}

fn push_edit<'a>(segments: &mut Vec<Segment<'a>>, edit: &'a Edit, start: usize, end: usize) {
    if start < end {
        segments.push(Segment::Edit {
            edit,
            start,
            text: &edit.text()[start..end],
        });
    }
}
