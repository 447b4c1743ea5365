//! Whitespace edits layered over an immutable base text.
//!
//! A formatter submits whitespace-only edits against the base text through
//! [`TextWithChanges::add_change`]; consumers holding base-text offsets (for
//! example from a syntax tree) keep navigating the edited text through
//! [`Position`]s without re-parsing or materializing it.

pub mod change_set;
pub mod config;
pub mod edit;
pub mod engine;
pub mod error;
pub mod position;
pub mod script;

pub use change_set::ChangeSet;
pub use edit::{Edit, EditId};
pub use engine::{Direction, MatchKind, SearchType, TextWithChanges};
pub use error::{TextError, TextResult};
pub use position::{Position, Range};
