//! Application entry point for the binary search tree viewer.
//!
//! This binary sets up logging and eframe/egui, then delegates all
//! interactive logic and rendering to [`Viewer`] from the `viewer` module.

mod effects;
mod svg;
mod viewer;

use viewer::Viewer;

/// Starts the native eframe application.
///
/// This function installs the tracing subscriber, configures
/// [`eframe::NativeOptions`] with default settings, and launches the main
/// window titled `"BST Search"`. All UI state and rendering are handled by
/// [`Viewer`].
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "BST Search",
        options,
        Box::new(|_cc| {
            // Construct the root app state for the viewer.
            Ok(Box::new(Viewer::new()))
        }),
    )
}
