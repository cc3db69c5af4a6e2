// Library crate: exposes testable modules for integration tests and
// headless driving. GUI-specific modules (app, ui, viewport rendering)
// remain in the binary crate.

pub mod fixtures;
pub mod harness;
pub mod scene;
pub mod state;
pub mod trackball;
