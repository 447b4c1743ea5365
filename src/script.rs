//! Edit scripts: a list of base-offset changes read from TOML.
//!
//! ```toml
//! [[edit]]
//! from = 5
//! to = 5
//! text = " "
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::ConfigResult;
use crate::engine::TextWithChanges;
use crate::error::TextError;
use crate::position::{Position, Range};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptEdit {
    pub from: usize,
    pub to: usize,
    #[serde(default)]
    pub text: String,
}

impl ScriptEdit {
    pub fn range(&self) -> Range {
        Range::in_base(self.from, self.to)
    }

    /// Range of this entry against the current edits of `text`.
    ///
    /// A replacement already starting at `to` has taken over the base text
    /// there, so the range ends at the start of that edit and the two merge.
    pub fn range_in(&self, text: &TextWithChanges) -> Range {
        let end = match text.changes().starting_at(self.to) {
            Some(edit) if !edit.is_insertion() => Position::in_edit(edit.id(), 0),
            _ => Position::in_base(self.to),
        };
        Position::in_base(self.from).up_to(end)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditScript {
    #[serde(default, rename = "edit")]
    pub edits: Vec<ScriptEdit>,
}

/// A script entry the engine refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("edit #{index} ([{from}, {to})): {source}")]
pub struct ScriptError {
    pub index: usize,
    pub from: usize,
    pub to: usize,
    pub source: TextError,
}

impl EditScript {
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Submit every entry in order, stopping at the first rejected one.
    ///
    /// Returns the range each accepted entry produced.
    pub fn apply(&self, text: &mut TextWithChanges) -> Result<Vec<Range>, ScriptError> {
        self.edits
            .iter()
            .enumerate()
            .map(|(index, edit)| {
                let range = edit.range_in(text);
                text.add_change(range, &edit.text)
                    .map_err(|source| ScriptError {
                        index,
                        from: edit.from,
                        to: edit.to,
                        source,
                    })
            })
            .collect()
    }
}
