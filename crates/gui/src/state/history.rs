//! Undo/redo history over joint edits.
//!
//! A command records, for every joint touched by one continuous drag,
//! the (x, y) angles at drag start and drag end. Commands are plain
//! values owned by exactly one stack at a time; undo/redo move them
//! between the stacks and hand the caller a borrow to apply.

use crate::scene::NodeId;

/// Before/after angle snapshot for one joint.
#[derive(Debug, Clone, PartialEq)]
pub struct JointEdit {
    pub joint: NodeId,
    pub before: [f32; 2],
    pub after: [f32; 2],
}

/// The unit of undo/redo: every joint edited during one drag.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseCommand {
    pub entries: Vec<JointEdit>,
}

/// Undo/redo stacks plus the command currently being recorded.
#[derive(Default)]
pub struct History {
    undo_stack: Vec<PoseCommand>,
    redo_stack: Vec<PoseCommand>,
    pending: Option<PoseCommand>,
}

impl History {
    /// Open a command at drag start. `starts` holds one (joint,
    /// angles) pair per selected joint; an empty snapshot opens
    /// nothing. No-op while a drag is already recording.
    pub fn begin_drag(&mut self, starts: Vec<(NodeId, [f32; 2])>) {
        if self.pending.is_some() || starts.is_empty() {
            return;
        }
        self.pending = Some(PoseCommand {
            entries: starts
                .into_iter()
                .map(|(joint, before)| JointEdit {
                    joint,
                    before,
                    after: before,
                })
                .collect(),
        });
    }

    pub fn drag_in_progress(&self) -> bool {
        self.pending.is_some()
    }

    /// Joints recorded by the in-flight command.
    pub fn pending_joints(&self) -> Vec<NodeId> {
        self.pending
            .as_ref()
            .map(|c| c.entries.iter().map(|e| e.joint).collect())
            .unwrap_or_default()
    }

    /// Close the in-flight command at drag end: record the end
    /// angles, push onto the undo stack, and clear the redo stack
    /// (history past a fresh edit is no longer reachable).
    pub fn finish_drag(&mut self, ends: &[(NodeId, [f32; 2])]) {
        let Some(mut cmd) = self.pending.take() else {
            return;
        };
        for entry in &mut cmd.entries {
            if let Some((_, after)) = ends.iter().find(|(id, _)| *id == entry.joint) {
                entry.after = *after;
            }
        }
        self.undo_stack.push(cmd);
        self.redo_stack.clear();
    }

    /// Pop the newest command onto the redo stack and return it so
    /// the caller can restore the `before` snapshots. No-op on an
    /// empty stack.
    pub fn undo(&mut self) -> Option<&PoseCommand> {
        let cmd = self.undo_stack.pop()?;
        self.redo_stack.push(cmd);
        self.redo_stack.last()
    }

    /// Mirror of `undo`: the caller restores the `after` snapshots.
    pub fn redo(&mut self) -> Option<&PoseCommand> {
        let cmd = self.redo_stack.pop()?;
        self.undo_stack.push(cmd);
        self.undo_stack.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drop all history, including any in-flight command.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_drag(h: &mut History, joint: NodeId, before: [f32; 2], after: [f32; 2]) {
        h.begin_drag(vec![(joint, before)]);
        h.finish_drag(&[(joint, after)]);
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut h = History::default();
        assert!(h.undo().is_none());
        assert!(h.redo().is_none());
        assert!(!h.can_undo());
        assert!(!h.can_redo());
    }

    #[test]
    fn test_begin_with_no_joints_opens_nothing() {
        let mut h = History::default();
        h.begin_drag(vec![]);
        assert!(!h.drag_in_progress());
        h.finish_drag(&[]);
        assert!(!h.can_undo());
    }

    #[test]
    fn test_finish_records_end_angles() {
        let mut h = History::default();
        one_drag(&mut h, 4, [0.0, 0.0], [30.0, 5.0]);
        let cmd = h.undo().unwrap();
        assert_eq!(cmd.entries.len(), 1);
        assert_eq!(cmd.entries[0].before, [0.0, 0.0]);
        assert_eq!(cmd.entries[0].after, [30.0, 5.0]);
    }

    #[test]
    fn test_undo_redo_move_ownership() {
        let mut h = History::default();
        one_drag(&mut h, 1, [0.0; 2], [10.0, 0.0]);
        assert!(h.can_undo() && !h.can_redo());
        h.undo();
        assert!(!h.can_undo() && h.can_redo());
        h.redo();
        assert!(h.can_undo() && !h.can_redo());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut h = History::default();
        one_drag(&mut h, 1, [0.0; 2], [10.0, 0.0]);
        h.undo();
        assert!(h.can_redo());
        one_drag(&mut h, 1, [0.0; 2], [-5.0, 0.0]);
        // redo() after [edit, undo, edit] is a no-op.
        assert!(!h.can_redo());
        assert!(h.redo().is_none());
    }

    #[test]
    fn test_second_begin_ignored_while_recording() {
        let mut h = History::default();
        h.begin_drag(vec![(1, [0.0; 2])]);
        h.begin_drag(vec![(2, [9.0, 9.0])]);
        h.finish_drag(&[(1, [15.0, 0.0])]);
        let cmd = h.undo().unwrap();
        assert_eq!(cmd.entries.len(), 1);
        assert_eq!(cmd.entries[0].joint, 1);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut h = History::default();
        one_drag(&mut h, 1, [0.0; 2], [10.0, 0.0]);
        h.undo();
        h.begin_drag(vec![(2, [1.0, 1.0])]);
        h.clear();
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert!(!h.drag_in_progress());
    }

    #[test]
    fn test_batch_command_keeps_all_joints() {
        let mut h = History::default();
        h.begin_drag(vec![(1, [0.0; 2]), (2, [5.0, 0.0]), (3, [0.0, -5.0])]);
        h.finish_drag(&[(1, [10.0, 0.0]), (3, [0.0, 0.0])]);
        let cmd = h.undo().unwrap();
        assert_eq!(cmd.entries.len(), 3);
        // Joint 2 was not in the end set: its after stays at before.
        let e2 = cmd.entries.iter().find(|e| e.joint == 2).unwrap();
        assert_eq!(e2.after, e2.before);
    }
}
