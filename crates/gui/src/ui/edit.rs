//! Edit menu: undo/redo

use egui::Ui;

use crate::state::AppState;

pub fn menu(ui: &mut Ui, state: &mut AppState) {
    ui.menu_button("Edit", |ui| {
        let can_undo = state.pose.can_undo();
        if ui
            .add_enabled(can_undo, egui::Button::new("Undo (U)"))
            .clicked()
        {
            state.pose.undo();
            ui.close_menu();
        }
        let can_redo = state.pose.can_redo();
        if ui
            .add_enabled(can_redo, egui::Button::new("Redo (R)"))
            .clicked()
        {
            state.pose.redo();
            ui.close_menu();
        }
    });
}
