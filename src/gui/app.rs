//! Main application state and GUI logic.
//!
//! This module owns the three pieces of session state — the loaded
//! document, its reference selection, and the search pattern — and wires
//! the external inputs (file drop, line click, search edits) to the core
//! engines, re-rendering each frame.

use std::path::{Path, PathBuf};

use eframe::egui;

use crate::core::config::AppSettings;
use crate::core::document::Document;
use crate::core::error::AppError;
use crate::core::filter::SearchFilter;
use crate::core::loader::{self, FileLoader, LoadResult};
use crate::core::parser;

use super::controls::{ToolbarAction, ToolbarRenderer};
use super::dialogs::{ErrorDialogAction, ErrorDialogRenderer, ErrorDialogState};
use super::lines::{LineListAction, LineListRenderer};

/// Application state indicating the current loading status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppState {
    /// No file has been loaded yet (initial state)
    #[default]
    NoFileLoaded,
    /// A file read is in flight
    Loading,
    /// A file has been successfully loaded
    Ready,
}

impl AppState {
    /// Returns true while a file read is in flight.
    pub fn is_loading(self) -> bool {
        matches!(self, AppState::Loading)
    }
}

/// Kind of status message to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Success message (shown in green)
    Success,
    /// Error message (shown in red)
    Error,
}

/// A transient status message shown in the toolbar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// The message text
    pub text: String,
    /// Kind of message (success/error)
    pub kind: StatusKind,
    /// When the message was created (for auto-dismiss)
    created_at: std::time::Instant,
}

impl StatusMessage {
    /// Duration to show status messages before auto-dismissing.
    const DISPLAY_DURATION: std::time::Duration = std::time::Duration::from_secs(5);

    /// Create a new status message.
    pub fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: std::time::Instant::now(),
        }
    }

    /// Check if the message should still be displayed.
    pub fn is_visible(&self) -> bool {
        self.created_at.elapsed() < Self::DISPLAY_DURATION
    }
}

/// Main application state and GUI logic.
pub struct LogDeltaViewerApp {
    /// Current loading status
    state: AppState,
    /// Loaded document (records, reference selection)
    document: Option<Document>,
    /// Live search filter; survives document replacement
    filter: SearchFilter,
    /// Background file loader with the stale-read generation guard
    loader: FileLoader,
    /// Persistent viewer settings
    settings: AppSettings,
    /// Transient status message
    status_message: Option<StatusMessage>,
    /// Modal error dialog state
    error_dialog: ErrorDialogState,
    /// Path of the last failed load, kept for the dialog's retry action
    last_failed_path: Option<PathBuf>,
    /// Indices of records that pass the current filter, in file order
    visible_rows: Vec<usize>,
    /// Whether the search box should grab focus next frame
    focus_search: bool,
}

impl LogDeltaViewerApp {
    /// Create a new application instance.
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: AppSettings) -> Self {
        Self {
            state: AppState::NoFileLoaded,
            document: None,
            filter: SearchFilter::new(),
            loader: FileLoader::new(),
            settings,
            status_message: None,
            error_dialog: ErrorDialogState::default(),
            last_failed_path: None,
            visible_rows: Vec::new(),
            focus_search: false,
        }
    }

    /// Start a background read of the given path.
    fn start_load(&mut self, path: PathBuf, ctx: &egui::Context) {
        tracing::info!(path = %path.display(), "loading file");
        self.loader.begin(path, ctx);
        self.state = AppState::Loading;
    }

    /// Install a freshly read file as the current document.
    ///
    /// The previous search pattern stays in the search box but is not
    /// re-applied to the new lines until the user edits it again, so a
    /// fresh document always starts fully visible with no deltas.
    fn finish_load(&mut self, name: String, path: Option<PathBuf>, text: &str, ctx: &egui::Context) {
        let document = Document::new(name.clone(), parser::parse(text));
        let line_count = document.line_count();
        let timestamped = document.timestamped_count();

        self.document = Some(document);
        self.state = AppState::Ready;
        self.rebuild_visible_rows();

        ctx.send_viewport_cmd(egui::ViewportCommand::Title(name.clone()));
        if let Some(path) = path {
            self.settings.add_recent_file(path);
        }
        self.status_message = Some(StatusMessage::new(
            format!("Loaded: {name} ({line_count} lines, {timestamped} timestamped)"),
            StatusKind::Success,
        ));
        tracing::info!(%name, line_count, timestamped, "loaded file");
    }

    /// Surface a failed load without touching the current view.
    ///
    /// The window title and any previously loaded document keep their
    /// values; a failed read never leaves a half-updated state behind.
    fn fail_load(&mut self, error: AppError) {
        tracing::warn!(%error, "load failed");
        self.state = if self.document.is_some() {
            AppState::Ready
        } else {
            AppState::NoFileLoaded
        };
        self.last_failed_path = error.file_path().map(Path::to_path_buf);
        self.status_message = Some(StatusMessage::new(
            error.brief_description(),
            StatusKind::Error,
        ));
        self.error_dialog.show(error);
    }

    /// Drain the loader channel and apply the newest completed read.
    fn poll_loader(&mut self, ctx: &egui::Context) {
        if let Some(result) = self.loader.poll() {
            let LoadResult {
                name,
                path,
                outcome,
                ..
            } = result;
            match outcome {
                Ok(text) => self.finish_load(name, path, &text, ctx),
                Err(error) => self.fail_load(error),
            }
        }
    }

    /// Handle files dropped onto the window. Only the first file of a
    /// multi-file drop is loaded.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.first() else {
            return;
        };

        if let Some(bytes) = &file.bytes {
            // The payload came with its contents in memory; it becomes the
            // newest load and supersedes any in-flight read.
            self.loader.supersede();
            let name = if file.name.is_empty() {
                file.path
                    .as_deref()
                    .map(loader::display_name)
                    .unwrap_or_else(|| "(dropped file)".to_string())
            } else {
                file.name.clone()
            };
            let text = loader::decode_text(bytes);
            self.finish_load(name, file.path.clone(), &text, ctx);
        } else if let Some(path) = &file.path {
            self.start_load(path.clone(), ctx);
        } else {
            self.fail_load(AppError::UnreadableDrop {
                name: file.name.clone(),
            });
        }
    }

    /// Handle keyboard shortcuts: Ctrl+F focuses search, Ctrl+O opens the
    /// file dialog.
    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        if self.error_dialog.is_open() {
            return;
        }
        let (focus_search, open_file) = ctx.input(|i| {
            (
                i.modifiers.command && i.key_pressed(egui::Key::F),
                i.modifiers.command && i.key_pressed(egui::Key::O),
            )
        });
        if focus_search {
            self.focus_search = true;
        }
        if open_file {
            self.open_file_dialog(ctx);
        }
    }

    /// Open a native file dialog and start loading the picked file.
    fn open_file_dialog(&mut self, ctx: &egui::Context) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Log files", &["log", "txt"])
            .add_filter("All files", &["*"])
            .set_title("Open Log File")
            .pick_file()
        {
            self.start_load(path, ctx);
        }
    }

    /// Apply an edited search pattern.
    fn on_pattern_changed(&mut self, pattern: &str) {
        if !self.filter.set_pattern(pattern) {
            // Stale visibility from the last valid pattern stays in place;
            // the search box carries the invalid flag instead.
            return;
        }
        if let Some(document) = &mut self.document {
            self.filter.apply(&mut document.records);
        }
        self.rebuild_visible_rows();
    }

    /// Select a clicked row as the delta reference.
    fn handle_line_click(&mut self, index: usize) {
        if let Some(document) = &mut self.document
            && document.select_reference(index)
        {
            tracing::debug!(index, "reference line selected");
        }
    }

    /// Rebuild the index of rows to paint from record visibility.
    fn rebuild_visible_rows(&mut self) {
        self.visible_rows = match &self.document {
            Some(document) => document
                .records
                .iter()
                .enumerate()
                .filter(|(_, r)| r.visible)
                .map(|(i, _)| i)
                .collect(),
            None => Vec::new(),
        };
    }

    /// Render the top toolbar and dispatch its actions.
    fn render_toolbar(&mut self, ctx: &egui::Context) {
        let mut action = None;
        let focus_search = std::mem::take(&mut self.focus_search);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let renderer = ToolbarRenderer::new(
                    &self.filter,
                    &self.settings,
                    self.state.is_loading(),
                    focus_search,
                );
                action = renderer.render(ui);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.render_status_message(ui);
                });
            });
        });

        match action {
            Some(ToolbarAction::OpenFileDialog) => self.open_file_dialog(ctx),
            Some(ToolbarAction::OpenRecent(path)) => self.start_load(path, ctx),
            Some(ToolbarAction::PatternChanged(pattern)) => self.on_pattern_changed(&pattern),
            None => {}
        }
    }

    /// Render the status message if one is active.
    fn render_status_message(&mut self, ui: &mut egui::Ui) {
        if self.status_message.as_ref().is_some_and(|m| !m.is_visible()) {
            self.status_message = None;
            return;
        }
        if let Some(message) = &self.status_message {
            let color = match message.kind {
                StatusKind::Success => self.settings.colors.status_success_color(),
                StatusKind::Error => self.settings.colors.status_error_color(),
            };
            ui.colored_label(color, &message.text);
            // Keep repainting so the message dismisses without input.
            ui.ctx()
                .request_repaint_after(std::time::Duration::from_millis(250));
        }
    }

    /// Render the central line list (or a placeholder).
    fn render_lines(&mut self, ctx: &egui::Context) {
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(document) = &self.document {
                // An in-flight load keeps showing the previous document
                // until its replacement actually arrives.
                let renderer = LineListRenderer::new(
                    document,
                    &self.visible_rows,
                    &self.settings.colors,
                    self.settings.font_size,
                );
                action = renderer.render(ui);
            } else if self.state.is_loading() {
                Self::render_loading_placeholder(ui);
            } else {
                Self::render_empty_placeholder(ui);
            }
        });

        if let Some(LineListAction::Select(index)) = action {
            self.handle_line_click(index);
        }
    }

    /// Placeholder shown while the very first file is being read.
    fn render_loading_placeholder(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("Loading…");
            ui.add_space(12.0);
            ui.spinner();
        });
    }

    /// Placeholder shown before any file has been loaded.
    fn render_empty_placeholder(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("No File Loaded");
            ui.add_space(8.0);
            ui.label("Drop a log file anywhere in this window to get started.");
            ui.label("Click a timestamped line to see every other line's offset from it.");
            ui.label("Type a regular expression in the search box to filter lines.");
        });
    }

    /// Render the translucent overlay while files hover over the window.
    fn render_drop_overlay(&self, ctx: &egui::Context) {
        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("drop_overlay"),
        ));
        let screen_rect = ctx.input(|i| i.viewport_rect());
        painter.rect_filled(screen_rect, 0.0, egui::Color32::from_black_alpha(160));
        painter.text(
            screen_rect.center(),
            egui::Align2::CENTER_CENTER,
            "Drop log file to load",
            egui::FontId::proportional(24.0),
            egui::Color32::WHITE,
        );
    }

    /// Render the error dialog and dispatch its actions.
    fn render_error_dialog(&mut self, ctx: &egui::Context) {
        let action = ErrorDialogRenderer::new(&mut self.error_dialog).render(ctx);
        match action {
            Some(ErrorDialogAction::Retry) => {
                if let Some(path) = self.last_failed_path.take() {
                    self.start_load(path, ctx);
                }
            }
            Some(ErrorDialogAction::Close) | None => {}
        }
    }
}

impl eframe::App for LogDeltaViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader(ctx);
        self.handle_dropped_files(ctx);
        self.handle_keyboard_shortcuts(ctx);

        self.render_toolbar(ctx);
        self.render_lines(ctx);
        self.render_drop_overlay(ctx);
        self.render_error_dialog(ctx);

        // Remember the window size for the next session.
        let size = ctx.input(|i| i.viewport_rect()).size();
        self.settings.set_window_size(size.x, size.y);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(error) = self.settings.save() {
            tracing::warn!(%error, "failed to save settings");
        }
    }
}
