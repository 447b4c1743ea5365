//! Range-scoped character counts.

use super::TextWithChanges;
use crate::error::TextResult;
use crate::position::Range;

/// Running visual column while rendering tabs
#[derive(Debug, Clone, Copy, Default)]
struct ColumnState {
    column: usize,
    spaces: usize,
}

impl ColumnState {
    fn advance(mut self, ch: char, tab_width: usize) -> Self {
        match ch {
            ' ' => {
                self.spaces += 1;
                self.column += 1;
            }
            '\t' => {
                let width = tab_width - self.column % tab_width;
                self.spaces += width;
                self.column += width;
            }
            _ => self.column += 1,
        }
        self
    }
}

impl TextWithChanges {
    /// Fold `f` over every character of `range` in logical order.
    pub(crate) fn fold_chars<S>(
        &self,
        range: Range,
        init: S,
        mut f: impl FnMut(S, char) -> S,
    ) -> TextResult<S> {
        let segments = self.segments(range)?;
        Ok(segments
            .iter()
            .flat_map(|segment| segment.text().chars())
            .fold(init, |acc, ch| f(acc, ch)))
    }

    /// Number of non-whitespace characters in `range`
    pub(crate) fn count_non_whitespace(&self, range: Range) -> TextResult<usize> {
        self.fold_chars(range, 0, |count, ch| count + usize::from(!ch.is_whitespace()))
    }

    /// Number of line breaks in `range`; zero if the range is invalid.
    pub fn count_breaks(&self, range: Range) -> usize {
        self.fold_chars(range, 0, |count, ch| count + usize::from(ch == '\n'))
            .unwrap_or_else(|err| {
                log::debug!(target: "text_with_changes::metrics", "count_breaks over {range}: {err}");
                0
            })
    }

    /// Visual width of the spaces and tabs in `range`, with the range start
    /// placed at column zero.
    ///
    /// A tab advances to the next multiple of `tab_width`; any other
    /// character advances one column without contributing. A zero
    /// `tab_width` is treated as one. Zero if the range is invalid.
    pub fn count_spaces(&self, range: Range, tab_width: usize) -> usize {
        let tab_width = tab_width.max(1);
        self.fold_chars(range, ColumnState::default(), |state, ch| {
            state.advance(ch, tab_width)
        })
        .map(|state| state.spaces)
        .unwrap_or_else(|err| {
            log::debug!(target: "text_with_changes::metrics", "count_spaces over {range}: {err}");
            0
        })
    }
}
