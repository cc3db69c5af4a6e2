//! Application menu: resets, quit, framerate readout

use egui::Ui;

use crate::state::AppState;

pub fn menu(ui: &mut Ui, state: &mut AppState) {
    ui.menu_button("Application", |ui| {
        if ui.button("Reset Position (I)").clicked() {
            state.pose.reset_position();
            ui.close_menu();
        }
        if ui.button("Reset Orientation (O)").clicked() {
            state.pose.reset_orientation();
            ui.close_menu();
        }
        if ui.button("Reset Joints (N)").clicked() {
            state.pose.reset_joints();
            ui.close_menu();
        }
        if ui.button("Reset All (A)").clicked() {
            state.pose.reset_all();
            ui.close_menu();
        }
        ui.separator();
        if ui.button("Quit (Q)").clicked() {
            state.pose.request_quit();
        }
    });
}

/// Framerate readout for the menu bar's right edge.
pub fn framerate(ui: &mut Ui) {
    let dt = ui.input(|i| i.stable_dt).max(1e-6);
    ui.weak(format!("{:5.1} fps", 1.0 / dt));
}
