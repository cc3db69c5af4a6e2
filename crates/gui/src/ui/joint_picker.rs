//! Joint picker panel: one checkbox per joint, as a GUI alternative
//! to picking joints by clicking their meshes.

use egui::Ui;

use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Joint Picker");
    ui.separator();

    let joints = state.pose.joints();
    if joints.is_empty() {
        ui.weak("No joints loaded");
        return;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for joint in joints {
            let mut selected = joint.selected;
            if ui.checkbox(&mut selected, &joint.name).changed() {
                state.pose.toggle_joint_selection(joint.id);
            }
            if let Some([x, y]) = state.pose.joint_angles(joint.id) {
                ui.weak(format!("  x {x:6.1}°   y {y:6.1}°"));
            }
        }
    });
}
