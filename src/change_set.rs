//! Ordered storage for the current set of edits.
//!
//! Edits are keyed by the start of their base range. The set never holds two
//! edits whose base ranges overlap or touch; the insertion engine merges
//! touching edits before they reach [`ChangeSet::insert`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::edit::{Edit, EditId};

#[derive(Debug, Default, Clone)]
pub struct ChangeSet {
    by_start: BTreeMap<usize, Edit>,
    starts: HashMap<EditId, usize>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_start.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_start.is_empty()
    }

    /// Edits in ascending base order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Edit> + '_ {
        self.by_start.values()
    }

    /// Look up a live edit by identity
    pub fn get(&self, id: EditId) -> Option<&Edit> {
        let start = self.starts.get(&id)?;
        self.by_start.get(start)
    }

    pub fn contains_id(&self, id: EditId) -> bool {
        self.starts.contains_key(&id)
    }

    /// Edit starting at exactly `offset`
    pub fn starting_at(&self, offset: usize) -> Option<&Edit> {
        self.by_start.get(&offset)
    }

    /// Edit with the greatest start `<= offset`
    pub fn floor(&self, offset: usize) -> Option<&Edit> {
        self.by_start.range(..=offset).next_back().map(|(_, edit)| edit)
    }

    /// Edit with the least start `>= offset`
    pub fn ceiling(&self, offset: usize) -> Option<&Edit> {
        self.by_start.range(offset..).next().map(|(_, edit)| edit)
    }

    /// Edit replacing the base character at `offset`
    pub fn covering(&self, offset: usize) -> Option<&Edit> {
        self.floor(offset).filter(|edit| edit.covers(offset))
    }

    /// Edit whose base range ends at `offset`
    pub fn ending_at(&self, offset: usize) -> Option<&Edit> {
        self.floor(offset).filter(|edit| edit.to() == offset)
    }

    /// Edit whose base range contains `offset`, bounds inclusive
    pub fn touching(&self, offset: usize) -> Option<&Edit> {
        self.floor(offset).filter(|edit| edit.contains(offset))
    }

    /// Edits whose base range lies entirely within `[from, to]`
    pub fn within(&self, from: usize, to: usize) -> impl Iterator<Item = &Edit> + '_ {
        let upper = to.max(from);
        self.by_start
            .range(from..=upper)
            .map(|(_, edit)| edit)
            .filter(move |edit| edit.to() <= upper)
    }

    pub(crate) fn insert(&mut self, edit: Edit) {
        debug_assert!(
            self.fits(&edit),
            "edit {edit} overlaps or touches an existing edit"
        );
        self.starts.insert(edit.id(), edit.from());
        self.by_start.insert(edit.from(), edit);
    }

    pub(crate) fn remove(&mut self, id: EditId) -> Option<Edit> {
        let start = self.starts.remove(&id)?;
        self.by_start.remove(&start)
    }

    /// True if `edit` neither overlaps nor touches any stored edit
    fn fits(&self, edit: &Edit) -> bool {
        let clear_left = self
            .floor(edit.from())
            .is_none_or(|left| left.to() < edit.from());
        let clear_right = self
            .by_start
            .range(edit.from() + 1..)
            .next()
            .is_none_or(|(_, right)| edit.to() < right.from());
        let clear_same = !self.by_start.contains_key(&edit.from());
        clear_left && clear_right && clear_same
    }
}

impl fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, edit) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{edit}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(edits: &[(usize, usize, &str)]) -> ChangeSet {
        let mut set = ChangeSet::new();
        for (from, to, text) in edits {
            set.insert(Edit::new(*from, *to, *text).unwrap());
        }
        set
    }

    #[test]
    fn test_iterates_in_base_order() {
        let set = set_of(&[(5, 6, " "), (0, 1, "\t"), (3, 3, "\n")]);
        let starts: Vec<usize> = set.iter().map(Edit::from).collect();
        assert_eq!(starts, vec![0, 3, 5]);
    }

    #[test]
    fn test_floor_and_ceiling() {
        let set = set_of(&[(2, 4, ""), (8, 8, " ")]);
        assert!(set.floor(1).is_none());
        assert_eq!(set.floor(2).map(Edit::from), Some(2));
        assert_eq!(set.floor(7).map(Edit::from), Some(2));
        assert_eq!(set.ceiling(3).map(Edit::from), Some(8));
        assert_eq!(set.ceiling(0).map(Edit::from), Some(2));
        assert!(set.ceiling(9).is_none());
    }

    #[test]
    fn test_covering_ignores_range_end_and_insertions() {
        let set = set_of(&[(2, 4, ""), (8, 8, " ")]);
        assert!(set.covering(1).is_none());
        assert_eq!(set.covering(2).map(Edit::from), Some(2));
        assert_eq!(set.covering(3).map(Edit::from), Some(2));
        assert!(set.covering(4).is_none());
        assert!(set.covering(8).is_none());
    }

    #[test]
    fn test_ending_at_and_touching() {
        let set = set_of(&[(2, 4, ""), (8, 8, " ")]);
        assert_eq!(set.ending_at(4).map(Edit::from), Some(2));
        assert_eq!(set.ending_at(8).map(Edit::from), Some(8));
        assert!(set.ending_at(3).is_none());
        assert_eq!(set.touching(4).map(Edit::from), Some(2));
        assert!(set.touching(5).is_none());
    }

    #[test]
    fn test_within_requires_full_containment() {
        let set = set_of(&[(1, 2, ""), (4, 6, " "), (8, 8, "\n")]);
        let inside: Vec<usize> = set.within(0, 5).map(Edit::from).collect();
        assert_eq!(inside, vec![1]);
        let inside: Vec<usize> = set.within(1, 8).map(Edit::from).collect();
        assert_eq!(inside, vec![1, 4, 8]);
    }

    #[test]
    fn test_lookup_and_remove_by_identity() {
        let mut set = ChangeSet::new();
        let edit = Edit::new(3, 4, " ").unwrap();
        let id = edit.id();
        set.insert(edit);

        assert!(set.contains_id(id));
        assert_eq!(set.get(id).map(Edit::from), Some(3));

        let removed = set.remove(id).unwrap();
        assert_eq!(removed.id(), id);
        assert!(set.get(id).is_none());
        assert!(set.is_empty());
        assert!(set.remove(id).is_none());
    }

    #[test]
    fn test_fits_rejects_touching_edits() {
        let set = set_of(&[(2, 4, "")]);
        assert!(!set.fits(&Edit::new(4, 5, " ").unwrap()));
        assert!(!set.fits(&Edit::new(1, 2, " ").unwrap()));
        assert!(!set.fits(&Edit::new(3, 3, " ").unwrap()));
        assert!(set.fits(&Edit::new(5, 5, " ").unwrap()));
        assert!(set.fits(&Edit::new(0, 1, " ").unwrap()));
    }
}
