mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::scene`, `crate::state`,
// etc. resolve to the lib crate types everywhere in the binary.
pub use marionette_gui_lib::scene;
pub use marionette_gui_lib::state;

use app::PoseApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marionette_gui=info".into()),
        )
        .init();

    // Parse --puppet <path> argument
    let initial_puppet = parse_puppet_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Marionette — Puppet Pose Editor")
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "marionette-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(PoseApp::new(cc, initial_puppet)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_puppet_arg() -> Option<shared::PuppetDescription> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--puppet" && i + 1 < args.len() {
            let path = &args[i + 1];
            match std::fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str::<shared::PuppetDescription>(&json) {
                    Ok(puppet) => {
                        tracing::info!("Loaded puppet \"{}\" from {path}", puppet.name);
                        return Some(puppet);
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse puppet JSON from {path}: {e}");
                    }
                },
                Err(e) => {
                    tracing::error!("Failed to read puppet file {path}: {e}");
                }
            }
            break;
        }
        i += 1;
    }
    None
}
