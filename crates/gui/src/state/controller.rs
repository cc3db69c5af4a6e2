//! Interaction controller: owns the scene tree, selection, history,
//! the puppet pose matrices, and the input state machine.
//!
//! All mutation of the tree, the selection set, and the history
//! stacks happens here, from event-handler entry points that run to
//! completion; the rendering collaborator only reads.

use glam::{Mat4, Vec2, Vec3};
use shared::PuppetDescription;

use crate::scene::{self, NodeId, RenderItem, SceneNode};
use crate::state::history::History;
use crate::state::selection::SelectionState;
use crate::trackball;

/// View-plane translation per pixel of drag.
const TRANSLATE_PER_PIXEL: f32 = 0.01;
/// Joint rotation per pixel of drag, in degrees.
const JOINT_DEG_PER_PIXEL: f32 = 1.0;

/// Interaction mode. Exclusive; switched explicitly by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Position,
    Joint,
}

/// Logical mouse buttons: primary drags/picks, secondary bends,
/// tertiary feeds the trackball / swings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Tertiary,
}

/// Keyboard commands the core understands. The windowing layer maps
/// physical keys onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    TogglePanels,
    Quit,
    ResetOrientation,
    ResetPosition,
    ResetJoints,
    ResetAll,
    Undo,
    Redo,
    ToggleCircle,
    ToggleZBuffer,
    ToggleBackfaceCulling,
    ToggleFrontfaceCulling,
    PositionMode,
    JointMode,
}

/// Viewer display toggles, driven by the Options panel and keyboard.
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub draw_circle: bool,
    pub z_buffer: bool,
    pub backface_culling: bool,
    pub frontface_culling: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            draw_circle: false,
            z_buffer: true,
            backface_culling: false,
            frontface_culling: false,
        }
    }
}

#[derive(Default)]
struct ButtonState {
    primary: bool,
    secondary: bool,
    tertiary: bool,
}

/// One joint for the picker panel.
pub struct JointListEntry {
    pub id: NodeId,
    pub name: String,
    pub selected: bool,
}

pub struct PoseController {
    root: Option<SceneNode>,
    selection: SelectionState,
    history: History,
    mode: Mode,
    buttons: ButtonState,
    /// Last seen cursor position, window coordinates (y down).
    mouse: Vec2,
    /// Window size in pixels, for trackball mapping.
    viewport: Vec2,
    /// Accumulated whole-puppet translation.
    translation: Mat4,
    /// Accumulated whole-puppet orientation.
    orientation: Mat4,
    pub display: DisplayOptions,
    /// Click position waiting for an id-buffer readback.
    pending_pick: Option<Vec2>,
    panels_visible: bool,
    quit_requested: bool,
}

impl Default for PoseController {
    fn default() -> Self {
        Self {
            root: None,
            selection: SelectionState::default(),
            history: History::default(),
            mode: Mode::Position,
            buttons: ButtonState::default(),
            mouse: Vec2::ZERO,
            viewport: Vec2::new(1024.0, 768.0),
            translation: Mat4::IDENTITY,
            orientation: Mat4::IDENTITY,
            display: DisplayOptions::default(),
            pending_pick: None,
            panels_visible: true,
            quit_requested: false,
        }
    }
}

impl PoseController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the puppet. `None` leaves an empty scene on which all
    /// operations are no-ops.
    pub fn load(&mut self, description: Option<&PuppetDescription>) {
        self.root = description.map(scene::build);
        self.selection.clear();
        self.history.clear();
        match &self.root {
            Some(root) => {
                let mut joints = 0;
                root.visit(&mut |n| {
                    if n.is_joint() {
                        joints += 1;
                    }
                });
                tracing::info!(name = %root.name, joints, "loaded puppet");
            }
            None => tracing::warn!("no puppet loaded; scene is empty"),
        }
    }

    // ── Read-only views for collaborators ─────────────────────

    pub fn root(&self) -> Option<&SceneNode> {
        self.root.as_ref()
    }

    /// Snapshot of the renderable scene for the renderer.
    pub fn render_items(&self) -> Vec<RenderItem> {
        self.root
            .as_ref()
            .map(scene::collect_render_items)
            .unwrap_or_default()
    }

    /// All joints, pre-order, for the joint picker panel.
    pub fn joints(&self) -> Vec<JointListEntry> {
        let mut out = Vec::new();
        if let Some(root) = &self.root {
            root.visit(&mut |n| {
                if n.is_joint() {
                    out.push(JointListEntry {
                        id: n.id,
                        name: n.name.clone(),
                        selected: n.selected,
                    });
                }
            });
        }
        out
    }

    pub fn joint_angles(&self, id: NodeId) -> Option<[f32; 2]> {
        self.root
            .as_ref()?
            .find(id)
            .and_then(|n| n.joint())
            .map(|j| j.angles())
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn translation(&self) -> Mat4 {
        self.translation
    }

    pub fn orientation(&self) -> Mat4 {
        self.orientation
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn panels_visible(&self) -> bool {
        self.panels_visible
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Take the click position awaiting an id readback, if any.
    pub fn take_pending_pick(&mut self) -> Option<Vec2> {
        self.pending_pick.take()
    }

    // ── Input events ──────────────────────────────────────────

    pub fn cursor_enter(&mut self, _entered: bool) -> bool {
        false
    }

    pub fn scroll(&mut self, _dx: f32, _dy: f32) -> bool {
        false
    }

    pub fn window_resize(&mut self, width: f32, height: f32) -> bool {
        if width > 0.0 && height > 0.0 {
            self.viewport = Vec2::new(width, height);
        }
        false
    }

    pub fn mouse_move(&mut self, x: f32, y: f32) -> bool {
        let prev = self.mouse;
        let dx = x - prev.x;
        let dy = prev.y - y; // screen y grows downward
        self.mouse = Vec2::new(x, y);

        match self.mode {
            Mode::Position => self.position_drag(prev, dx, dy),
            Mode::Joint => self.joint_drag(dx, dy),
        }
    }

    fn position_drag(&mut self, prev: Vec2, dx: f32, dy: f32) -> bool {
        let mut consumed = false;
        if self.buttons.primary {
            self.translation *= Mat4::from_translation(Vec3::new(
                dx * TRANSLATE_PER_PIXEL,
                dy * TRANSLATE_PER_PIXEL,
                0.0,
            ));
            consumed = true;
        }
        if self.buttons.secondary {
            self.translation *=
                Mat4::from_translation(Vec3::new(0.0, 0.0, dy * TRANSLATE_PER_PIXEL));
            consumed = true;
        }
        if self.buttons.tertiary {
            let half = self.viewport * 0.5;
            let from = Vec2::new(prev.x - half.x, half.y - prev.y);
            let to = Vec2::new(self.mouse.x - half.x, half.y - self.mouse.y);
            let radius = half.x.min(half.y);
            // Pre-multiplied: drags compose in world space.
            self.orientation = trackball::rotation_matrix(from, to, radius) * self.orientation;
            consumed = true;
        }
        consumed
    }

    fn joint_drag(&mut self, dx: f32, dy: f32) -> bool {
        let ids: Vec<NodeId> = self.selection.all().to_vec();
        if ids.is_empty() {
            return false;
        }
        let Some(root) = self.root.as_mut() else {
            return false;
        };

        let mut consumed = false;
        if self.buttons.secondary {
            for id in &ids {
                if let Some(j) = root.find_mut(*id).and_then(|n| n.joint_mut()) {
                    j.rotate(j.bend_axis, dx * JOINT_DEG_PER_PIXEL);
                }
            }
            consumed = true;
        }
        if self.buttons.tertiary {
            // Consumed only if some swing joint actually rotated.
            for id in &ids {
                if let Some(j) = root.find_mut(*id).and_then(|n| n.joint_mut()) {
                    if j.swing {
                        j.rotate(j.bend_axis.alternate(), dy * JOINT_DEG_PER_PIXEL);
                        consumed = true;
                    }
                }
            }
        }
        consumed
    }

    pub fn mouse_button(&mut self, button: MouseButton, pressed: bool) -> bool {
        if pressed {
            match button {
                MouseButton::Primary => {
                    if self.mode == Mode::Joint {
                        // Picking: the renderer answers with an id.
                        self.pending_pick = Some(self.mouse);
                    } else {
                        self.buttons.primary = true;
                    }
                }
                MouseButton::Secondary => {
                    self.buttons.secondary = true;
                    if self.mode == Mode::Joint {
                        self.begin_command();
                    }
                }
                MouseButton::Tertiary => {
                    self.buttons.tertiary = true;
                    if self.mode == Mode::Joint {
                        self.begin_command();
                    }
                }
            }
        } else {
            match button {
                MouseButton::Primary => self.buttons.primary = false,
                MouseButton::Secondary => {
                    self.buttons.secondary = false;
                    if self.mode == Mode::Joint && !self.buttons.tertiary {
                        self.finish_command();
                    }
                }
                MouseButton::Tertiary => {
                    self.buttons.tertiary = false;
                    if self.mode == Mode::Joint && !self.buttons.secondary {
                        self.finish_command();
                    }
                }
            }
        }
        true
    }

    pub fn key(&mut self, command: KeyCommand, pressed: bool) -> bool {
        if !pressed {
            return false;
        }
        match command {
            KeyCommand::TogglePanels => self.panels_visible = !self.panels_visible,
            KeyCommand::Quit => self.quit_requested = true,
            KeyCommand::ResetOrientation => self.reset_orientation(),
            KeyCommand::ResetPosition => self.reset_position(),
            KeyCommand::ResetJoints => self.reset_joints(),
            KeyCommand::ResetAll => self.reset_all(),
            KeyCommand::Undo => self.undo(),
            KeyCommand::Redo => self.redo(),
            KeyCommand::ToggleCircle => self.display.draw_circle = !self.display.draw_circle,
            KeyCommand::ToggleZBuffer => self.display.z_buffer = !self.display.z_buffer,
            KeyCommand::ToggleBackfaceCulling => {
                self.display.backface_culling = !self.display.backface_culling
            }
            KeyCommand::ToggleFrontfaceCulling => {
                self.display.frontface_culling = !self.display.frontface_culling
            }
            KeyCommand::PositionMode => self.mode = Mode::Position,
            KeyCommand::JointMode => self.mode = Mode::Joint,
        }
        true
    }

    // ── Picking ───────────────────────────────────────────────

    /// Resolve an id read back from the renderer's picking pass.
    pub fn resolve_pick(&mut self, id: u32) {
        let Some(root) = self.root.as_mut() else {
            return;
        };
        if let Some(joint_id) = scene::pick(root, id) {
            let selected = root.find(joint_id).map(|n| n.selected).unwrap_or(false);
            self.selection.set_selected(joint_id, selected);
            tracing::info!(joint = joint_id, selected, "pick toggled joint");
        }
    }

    /// Toggle one joint from the picker panel (bypasses the
    /// id-buffer path but keeps flag and set in sync).
    pub fn toggle_joint_selection(&mut self, id: NodeId) {
        let Some(root) = self.root.as_mut() else {
            return;
        };
        if let Some(node) = root.find_mut(id) {
            if node.is_joint() {
                let selected = node.toggle_selected();
                self.selection.set_selected(id, selected);
            }
        }
    }

    // ── Command lifecycle ─────────────────────────────────────

    fn begin_command(&mut self) {
        if self.history.drag_in_progress() {
            return;
        }
        let Some(root) = self.root.as_ref() else {
            return;
        };
        let starts: Vec<(NodeId, [f32; 2])> = self
            .selection
            .all()
            .iter()
            .filter_map(|id| {
                root.find(*id)
                    .and_then(|n| n.joint())
                    .map(|j| (*id, j.angles()))
            })
            .collect();
        self.history.begin_drag(starts);
    }

    fn finish_command(&mut self) {
        if !self.history.drag_in_progress() {
            return;
        }
        let joints = self.history.pending_joints();
        let ends: Vec<(NodeId, [f32; 2])> = joints
            .iter()
            .filter_map(|id| self.joint_angles(*id).map(|a| (*id, a)))
            .collect();
        self.history.finish_drag(&ends);
        tracing::info!(joints = ends.len(), "committed pose command");
    }

    // ── Operations ────────────────────────────────────────────

    pub fn undo(&mut self) {
        let Some(root) = self.root.as_mut() else {
            return;
        };
        let Some(cmd) = self.history.undo() else {
            return;
        };
        for e in &cmd.entries {
            if let Some(j) = root.find_mut(e.joint).and_then(|n| n.joint_mut()) {
                j.set_angles(e.before);
            }
        }
    }

    pub fn redo(&mut self) {
        let Some(root) = self.root.as_mut() else {
            return;
        };
        let Some(cmd) = self.history.redo() else {
            return;
        };
        for e in &cmd.entries {
            if let Some(j) = root.find_mut(e.joint).and_then(|n| n.joint_mut()) {
                j.set_angles(e.after);
            }
        }
    }

    pub fn reset_position(&mut self) {
        self.translation = Mat4::IDENTITY;
    }

    pub fn reset_orientation(&mut self) {
        self.orientation = Mat4::IDENTITY;
    }

    /// Undo everything, then forget everything: unwind the entire
    /// undo stack, reset the selected joints to their load-time
    /// angles, deselect every node, and clear both stacks.
    pub fn reset_joints(&mut self) {
        while self.history.can_undo() {
            self.undo();
        }
        let ids: Vec<NodeId> = self.selection.all().to_vec();
        if let Some(root) = self.root.as_mut() {
            for id in ids {
                if let Some(j) = root.find_mut(id).and_then(|n| n.joint_mut()) {
                    j.reset();
                }
            }
            root.deselect_all();
        }
        self.selection.clear();
        self.history.clear();
    }

    pub fn reset_all(&mut self) {
        self.reset_orientation();
        self.reset_position();
        self.reset_joints();
    }
}
