//! Main application module

mod keyboard;
mod styles;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{application, edit, joint_picker, options};
use crate::viewport::ViewportPanel;

/// Main application
pub struct PoseApp {
    state: AppState,
    viewport: ViewportPanel,
}

impl PoseApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        initial_puppet: Option<shared::PuppetDescription>,
    ) -> Self {
        let mut state = AppState::default();
        state.pose.load(initial_puppet.as_ref());

        styles::configure_styles(&cc.egui_ctx);

        let mut viewport = ViewportPanel::new();

        // Initialize GL renderer if glow context is available
        if let Some(gl) = cc.gl.as_ref() {
            viewport.init_gl(gl);
        }

        Self { state, viewport }
    }
}

impl eframe::App for PoseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        keyboard::handle_keyboard(ctx, &mut self.state);

        if self.state.pose.quit_requested() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        // All chrome hides behind one toggle; the viewport stays.
        if self.state.pose.panels_visible() {
            egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
                egui::menu::bar(ui, |ui| {
                    application::menu(ui, &mut self.state);
                    edit::menu(ui, &mut self.state);
                    options::menu(ui, &mut self.state);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        application::framerate(ui);
                    });
                });
            });

            if self.state.panels.joint_picker {
                egui::SidePanel::right("joint_picker")
                    .default_width(220.0)
                    .resizable(true)
                    .show(ctx, |ui| {
                        joint_picker::show(ui, &mut self.state);
                    });
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.show(ui, &mut self.state);
            });
    }
}
