//! 3D viewport panel with OpenGL rendering

mod camera;
mod gl_renderer;
mod mesh;

use std::sync::{Arc, Mutex};

use egui::Ui;
use glam::Vec2;

use crate::state::{AppState, MouseButton};
use camera::SceneCamera;
use gl_renderer::{GlRenderer, RenderParams};

/// 3D viewport panel with OpenGL rendering
pub struct ViewportPanel {
    camera: SceneCamera,
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
    /// Id read back by the picking pass, consumed next frame
    pick_result: Arc<Mutex<Option<u32>>>,
}

impl ViewportPanel {
    pub fn new() -> Self {
        Self {
            camera: SceneCamera::new(),
            gl_renderer: None,
            pick_result: Arc::new(Mutex::new(None)),
        }
    }

    /// Initialize GL renderer (must be called with a GL context)
    pub fn init_gl(&mut self, gl: &glow::Context) {
        let renderer = GlRenderer::new(gl);
        self.gl_renderer = Some(Arc::new(Mutex::new(renderer)));
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        // Deliver the picking readback from the previous frame.
        if let Ok(mut result) = self.pick_result.lock() {
            if let Some(id) = result.take() {
                state.pose.resolve_pick(id);
            }
        }

        state.pose.window_resize(rect.width(), rect.height());

        self.forward_input(ui, rect, &response, state);

        if !ui.is_rect_visible(rect) {
            return;
        }

        self.render_gl(ui, rect, state);
    }

    /// Translate raw pointer events into controller events, in
    /// viewport-local coordinates.
    fn forward_input(
        &mut self,
        ui: &mut Ui,
        rect: egui::Rect,
        response: &egui::Response,
        state: &mut AppState,
    ) {
        let events = ui.input(|i| i.events.clone());
        for event in events {
            match event {
                egui::Event::PointerMoved(pos) => {
                    let local = pos - rect.min;
                    state.pose.mouse_move(local.x, local.y);
                }
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    ..
                } => {
                    let Some(button) = map_button(button) else {
                        continue;
                    };
                    // Presses belong to the viewport only while it is
                    // hovered; releases always reach the controller so
                    // drags cannot get stuck.
                    if pressed && !response.hovered() {
                        continue;
                    }
                    if pressed && !rect.contains(pos) {
                        continue;
                    }
                    state.pose.mouse_button(button, pressed);
                }
                _ => {}
            }
        }
    }

    fn render_gl(&self, ui: &mut Ui, rect: egui::Rect, state: &mut AppState) {
        let Some(gl_renderer) = &self.gl_renderer else {
            return;
        };

        let renderer_clone = gl_renderer.clone();
        let pick_result = self.pick_result.clone();

        let items = state.pose.render_items();
        let view = self
            .camera
            .view_matrix(state.pose.translation(), state.pose.orientation());
        let projection = self
            .camera
            .projection_matrix(rect.width() / rect.height().max(1.0));
        let display = state.pose.display.clone();
        let pick_local: Option<Vec2> = state.pose.take_pending_pick();

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(eframe::egui_glow::CallbackFn::new(move |info, painter| {
                let gl = painter.gl();

                let clip = info.clip_rect_in_pixels();
                let viewport = [
                    clip.left_px as f32,
                    clip.from_bottom_px as f32,
                    clip.width_px as f32,
                    clip.height_px as f32,
                ];

                // Local point coordinates -> GL window pixels
                // (origin bottom-left).
                let pick_at = pick_local.map(|p| {
                    let ppp = info.pixels_per_point;
                    [
                        (clip.left_px as f32 + p.x * ppp) as i32,
                        (clip.from_bottom_px as f32 + clip.height_px as f32 - p.y * ppp) as i32,
                    ]
                });

                let params = RenderParams {
                    viewport,
                    view,
                    projection,
                    z_buffer: display.z_buffer,
                    backface_culling: display.backface_culling,
                    frontface_culling: display.frontface_culling,
                    draw_circle: display.draw_circle,
                    pick_at,
                };

                if let Ok(r) = renderer_clone.lock() {
                    let picked = r.paint(gl, &params, &items);
                    if pick_at.is_some() {
                        if let Ok(mut result) = pick_result.lock() {
                            *result = picked;
                        }
                    }
                }
            })),
        };
        ui.painter().add(callback);

        // A pick readback wants one more frame to apply the result.
        if pick_local.is_some() {
            ui.ctx().request_repaint();
        }
    }
}

/// Physical buttons -> logical buttons: left picks and translates,
/// middle bends and depth-translates, right tumbles and swings.
fn map_button(button: egui::PointerButton) -> Option<MouseButton> {
    match button {
        egui::PointerButton::Primary => Some(MouseButton::Primary),
        egui::PointerButton::Middle => Some(MouseButton::Secondary),
        egui::PointerButton::Secondary => Some(MouseButton::Tertiary),
        _ => None,
    }
}
