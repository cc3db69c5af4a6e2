pub mod controller;
pub mod history;
pub mod selection;

pub use controller::{DisplayOptions, KeyCommand, Mode, MouseButton, PoseController};
pub use history::{History, JointEdit, PoseCommand};
pub use selection::SelectionState;

/// Panel visibility flags. The menus always show while chrome is
/// visible; only the joint picker is opt-in.
#[derive(Default)]
pub struct PanelVisibility {
    pub joint_picker: bool,
}

/// Combined application state
pub struct AppState {
    pub pose: PoseController,
    pub panels: PanelVisibility,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            pose: PoseController::new(),
            panels: PanelVisibility::default(),
        }
    }
}
