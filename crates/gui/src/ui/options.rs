//! Options menu: interaction mode and display toggles

use egui::Ui;

use crate::state::{AppState, Mode};

pub fn menu(ui: &mut Ui, state: &mut AppState) {
    ui.menu_button("Options", |ui| {
        let mut mode = state.pose.mode();
        ui.radio_value(&mut mode, Mode::Position, "Position/Orientation (P)");
        ui.radio_value(&mut mode, Mode::Joint, "Joints (J)");
        state.pose.set_mode(mode);

        ui.separator();

        let display = &mut state.pose.display;
        ui.checkbox(&mut display.draw_circle, "Circle (C)");
        ui.checkbox(&mut display.z_buffer, "Z-buffer (Z)");
        ui.checkbox(&mut display.backface_culling, "Backface Culling (B)");
        ui.checkbox(&mut display.frontface_culling, "Frontface Culling (F)");

        ui.separator();

        ui.checkbox(&mut state.panels.joint_picker, "Joint Picker");
    });
}
