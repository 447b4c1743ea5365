//! Bidirectional search across base text and edits.

use serde::Serialize;

use super::TextWithChanges;
use super::segments::Segment;
use crate::position::{Position, Range};

/// What a search looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    NonWhitespace,
    LineBreak,
    /// A line break or a non-whitespace character, whichever comes first
    Both,
}

impl SearchType {
    fn matches(self, ch: char) -> bool {
        match self {
            SearchType::NonWhitespace => !ch.is_whitespace(),
            SearchType::LineBreak => ch == '\n',
            SearchType::Both => ch == '\n' || !ch.is_whitespace(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Kind of character a search stopped at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    NonWhitespace,
    LineBreak,
}

impl MatchKind {
    fn of(ch: char) -> Self {
        if ch == '\n' {
            MatchKind::LineBreak
        } else {
            MatchKind::NonWhitespace
        }
    }
}

impl TextWithChanges {
    /// Find the first (or, scanning backward, the last) character in `range`
    /// matching `search_type`.
    ///
    /// An invalid range yields `None`.
    pub fn search(
        &self,
        range: Range,
        search_type: SearchType,
        direction: Direction,
    ) -> Option<(Position, MatchKind)> {
        let segments = match self.segments(range) {
            Ok(segments) => segments,
            Err(err) => {
                log::debug!(target: "text_with_changes::search", "search over {range}: {err}");
                return None;
            }
        };

        let hit = |segment: &Segment<'_>, (index, ch): (usize, char)| {
            search_type
                .matches(ch)
                .then(|| (segment.position(index), MatchKind::of(ch)))
        };

        match direction {
            Direction::Forward => segments.iter().find_map(|segment| {
                segment
                    .text()
                    .char_indices()
                    .find_map(|found| hit(segment, found))
            }),
            Direction::Backward => segments.iter().rev().find_map(|segment| {
                segment
                    .text()
                    .char_indices()
                    .rev()
                    .find_map(|found| hit(segment, found))
            }),
        }
    }

    /// First match in `range`
    pub fn search_first(&self, range: Range, search_type: SearchType) -> Option<(Position, MatchKind)> {
        self.search(range, search_type, Direction::Forward)
    }

    /// Last match in `range`
    pub fn search_last(&self, range: Range, search_type: SearchType) -> Option<(Position, MatchKind)> {
        self.search(range, search_type, Direction::Backward)
    }
}
