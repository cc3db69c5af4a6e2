pub mod application;
pub mod edit;
pub mod joint_picker;
pub mod options;
