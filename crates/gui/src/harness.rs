//! Headless test harness for programmatic puppet manipulation.
//!
//! Drives the interaction core through the same event entry points the
//! windowing layer uses, with no GL context and no event loop.

use glam::Vec2;
use shared::PuppetDescription;

use crate::scene::NodeId;
use crate::state::{Mode, MouseButton, PoseController};

/// Headless harness — wraps the controller and synthesizes input.
pub struct PoseHarness {
    pub controller: PoseController,
    cursor: Vec2,
}

impl PoseHarness {
    /// Create a harness around an empty scene.
    pub fn new() -> Self {
        let mut controller = PoseController::new();
        controller.window_resize(800.0, 600.0);
        controller.mouse_move(400.0, 300.0);
        Self {
            controller,
            cursor: Vec2::new(400.0, 300.0),
        }
    }

    /// Create a harness with a puppet already loaded.
    pub fn with_puppet(puppet: &PuppetDescription) -> Self {
        let mut h = Self::new();
        h.controller.load(Some(puppet));
        h
    }

    /// Load a puppet from a JSON description string.
    pub fn load_puppet_json(&mut self, json: &str) -> Result<(), String> {
        let puppet: PuppetDescription =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.controller.load(Some(&puppet));
        Ok(())
    }

    // ── Input synthesis ───────────────────────────────────────

    /// Move the cursor to an absolute window position.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.cursor = Vec2::new(x, y);
        self.controller.mouse_move(x, y);
    }

    /// Move the cursor by a delta. Positive `dy` moves down, as on
    /// screen.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.move_to(self.cursor.x + dx, self.cursor.y + dy);
    }

    pub fn press(&mut self, button: MouseButton) {
        self.controller.mouse_button(button, true);
    }

    pub fn release(&mut self, button: MouseButton) {
        self.controller.mouse_button(button, false);
    }

    /// Press, move by (dx, dy), release.
    pub fn drag(&mut self, button: MouseButton, dx: f32, dy: f32) {
        self.press(button);
        self.move_by(dx, dy);
        self.release(button);
    }

    // ── Joint helpers ─────────────────────────────────────────

    /// Id of the joint with the given name.
    pub fn joint_id(&self, name: &str) -> Option<NodeId> {
        self.controller
            .joints()
            .into_iter()
            .find(|j| j.name == name)
            .map(|j| j.id)
    }

    /// Select or deselect a joint by name.
    pub fn select_joint(&mut self, name: &str) {
        if let Some(id) = self.joint_id(name) {
            self.controller.toggle_joint_selection(id);
        }
    }

    /// Current (x, y) angles of the named joint, in degrees.
    pub fn angles(&self, name: &str) -> Option<[f32; 2]> {
        self.joint_id(name)
            .and_then(|id| self.controller.joint_angles(id))
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.controller.set_mode(mode);
    }
}

impl Default for PoseHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_load_puppet_json() {
        let mut h = PoseHarness::new();
        let json = serde_json::to_string(&fixtures::simple_puppet()).unwrap();
        h.load_puppet_json(&json).unwrap();
        assert_eq!(h.joint_id("neckJoint"), Some(2));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut h = PoseHarness::new();
        assert!(h.load_puppet_json("{ not json").is_err());
    }

    #[test]
    fn test_drag_bends_selected_joint() {
        let mut h = PoseHarness::with_puppet(&fixtures::simple_puppet());
        h.set_mode(Mode::Joint);
        h.select_joint("neckJoint");
        h.drag(MouseButton::Secondary, 30.0, 0.0);
        assert_eq!(h.angles("neckJoint"), Some([30.0, 0.0]));
        assert!(h.controller.can_undo());
    }

    #[test]
    fn test_swing_drag_uses_vertical_axis() {
        let mut h = PoseHarness::with_puppet(&fixtures::simple_puppet());
        h.set_mode(Mode::Joint);
        h.select_joint("neckJoint");
        // 25 px upward swings by +25 degrees.
        h.drag(MouseButton::Tertiary, 0.0, -25.0);
        assert_eq!(h.angles("neckJoint"), Some([0.0, 25.0]));
    }

    #[test]
    fn test_full_session_reset() {
        let mut h = PoseHarness::with_puppet(&fixtures::arm_puppet());
        h.set_mode(Mode::Joint);
        h.select_joint("neckJoint");
        h.select_joint("leftElbow-hand");
        h.drag(MouseButton::Secondary, -40.0, 0.0);
        h.controller.reset_all();
        assert_eq!(h.angles("neckJoint"), Some([0.0, 0.0]));
        assert_eq!(h.angles("leftElbow-hand"), Some([0.0, 0.0]));
        assert!(h.controller.selection().is_empty());
        assert!(!h.controller.can_undo());
    }
}
