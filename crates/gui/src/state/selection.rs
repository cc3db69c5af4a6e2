//! Joint selection set.
//!
//! The node `selected` flags are the source of truth; this set is the
//! cached reverse index over them, kept in insertion order so the
//! joint picker can list selected joints stably.

use crate::scene::NodeId;

/// Ordered, duplicate-free set of selected joint ids.
#[derive(Default)]
pub struct SelectionState {
    selected: Vec<NodeId>,
}

impl SelectionState {
    /// All selected joints, in selection order.
    pub fn all(&self) -> &[NodeId] {
        &self.selected
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Bring the set in line with a node flag that just changed.
    pub fn set_selected(&mut self, id: NodeId, selected: bool) {
        if selected {
            if !self.selected.contains(&id) {
                self.selected.push(id);
            }
        } else if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
        }
    }

    /// Toggle membership; returns the new state.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        if let Some(pos) = self.selected.iter().position(|s| *s == id) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_empty() {
        let s = SelectionState::default();
        assert!(s.is_empty());
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn test_toggle_add_and_remove() {
        let mut s = SelectionState::default();
        assert!(s.toggle(3));
        assert!(s.is_selected(3));
        assert!(!s.toggle(3));
        assert!(!s.is_selected(3));
    }

    #[test]
    fn test_set_selected_is_idempotent() {
        let mut s = SelectionState::default();
        s.set_selected(7, true);
        s.set_selected(7, true);
        assert_eq!(s.count(), 1);
        s.set_selected(7, false);
        s.set_selected(7, false);
        assert_eq!(s.count(), 0);
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut s = SelectionState::default();
        s.set_selected(5, true);
        s.set_selected(2, true);
        s.set_selected(9, true);
        assert_eq!(s.all(), &[5, 2, 9]);
        s.set_selected(2, false);
        assert_eq!(s.all(), &[5, 9]);
    }

    #[test]
    fn test_clear() {
        let mut s = SelectionState::default();
        s.set_selected(1, true);
        s.set_selected(2, true);
        s.clear();
        assert!(s.is_empty());
    }
}
