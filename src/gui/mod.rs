//! GUI module for the log delta viewer.
//!
//! This module contains the egui-based user interface: the main
//! application window, the toolbar with the search box, the line list,
//! and the error dialog.

mod app;
mod controls;
mod dialogs;
mod lines;

pub use app::LogDeltaViewerApp;
