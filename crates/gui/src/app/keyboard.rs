//! Keyboard shortcut handling

use eframe::egui;

use crate::state::{AppState, KeyCommand};

const BINDINGS: &[(egui::Key, KeyCommand)] = &[
    (egui::Key::M, KeyCommand::TogglePanels),
    (egui::Key::Q, KeyCommand::Quit),
    (egui::Key::I, KeyCommand::ResetPosition),
    (egui::Key::O, KeyCommand::ResetOrientation),
    (egui::Key::N, KeyCommand::ResetJoints),
    (egui::Key::A, KeyCommand::ResetAll),
    (egui::Key::U, KeyCommand::Undo),
    (egui::Key::R, KeyCommand::Redo),
    (egui::Key::C, KeyCommand::ToggleCircle),
    (egui::Key::Z, KeyCommand::ToggleZBuffer),
    (egui::Key::B, KeyCommand::ToggleBackfaceCulling),
    (egui::Key::F, KeyCommand::ToggleFrontfaceCulling),
    (egui::Key::P, KeyCommand::PositionMode),
    (egui::Key::J, KeyCommand::JointMode),
];

/// Handle keyboard shortcuts for the application
pub fn handle_keyboard(ctx: &egui::Context, state: &mut AppState) {
    // Don't handle shortcuts when a text field is focused
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    ctx.input(|i| {
        if i.modifiers.any() {
            return;
        }
        for (key, command) in BINDINGS {
            if i.key_pressed(*key) {
                state.pose.key(*command, true);
            }
        }
    });
}
