//! Toolbar and search controls.
//!
//! This module renders the top toolbar: file opening, the recent-files
//! menu, and the live regex search box with its invalid-pattern indicator.

use std::path::PathBuf;

use eframe::egui;

use crate::core::config::AppSettings;
use crate::core::filter::SearchFilter;
use crate::core::loader;

/// User actions that can be triggered from the toolbar.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    /// Open the native file picker
    OpenFileDialog,
    /// Load a file from the recent-files list
    OpenRecent(PathBuf),
    /// The search pattern text changed
    PatternChanged(String),
}

/// Renders the toolbar and returns any action triggered by user input.
pub struct ToolbarRenderer<'a> {
    /// Current search filter (pattern text and validity)
    filter: &'a SearchFilter,
    /// Settings, for the recent-files list and colors
    settings: &'a AppSettings,
    /// Whether a file read is in flight
    loading: bool,
    /// Whether the search box should grab keyboard focus this frame
    focus_search: bool,
}

impl<'a> ToolbarRenderer<'a> {
    /// Create a toolbar renderer.
    pub fn new(
        filter: &'a SearchFilter,
        settings: &'a AppSettings,
        loading: bool,
        focus_search: bool,
    ) -> Self {
        Self {
            filter,
            settings,
            loading,
            focus_search,
        }
    }

    /// Render the toolbar row and return any triggered action.
    pub fn render(&self, ui: &mut egui::Ui) -> Option<ToolbarAction> {
        let mut action = None;

        ui.heading("Log Delta Viewer");
        ui.separator();
        action = self.render_file_controls(ui).or(action);
        ui.separator();
        action = self.render_search_box(ui).or(action);

        if self.loading {
            ui.spinner();
        }

        action
    }

    /// Render the Open File button and the recent-files menu.
    fn render_file_controls(&self, ui: &mut egui::Ui) -> Option<ToolbarAction> {
        let mut action = None;

        if ui
            .button("📂 Open File")
            .on_hover_text("Open a log file (Ctrl+O), or drop one anywhere")
            .clicked()
        {
            action = Some(ToolbarAction::OpenFileDialog);
        }

        ui.menu_button("Recent", |ui| {
            if self.settings.recent_files.is_empty() {
                ui.label("(no recent files)");
            }
            for path in &self.settings.recent_files {
                if ui.button(loader::display_name(path)).clicked() {
                    action = Some(ToolbarAction::OpenRecent(path.clone()));
                }
            }
        });

        action
    }

    /// Render the search box with its invalid-pattern indicator.
    fn render_search_box(&self, ui: &mut egui::Ui) -> Option<ToolbarAction> {
        let mut action = None;
        let invalid = !self.filter.is_valid();

        ui.label("Search:");
        let mut pattern = self.filter.pattern().to_owned();
        let mut edit = egui::TextEdit::singleline(&mut pattern)
            .hint_text("regular expression")
            .desired_width(280.0);
        if invalid {
            edit = edit.text_color(self.settings.colors.search_invalid_color());
        }

        let response = ui.add(edit);
        if self.focus_search {
            response.request_focus();
        }
        if response.changed() {
            action = Some(ToolbarAction::PatternChanged(pattern));
        }

        if invalid {
            ui.colored_label(
                self.settings.colors.search_invalid_color(),
                "invalid pattern",
            );
        }

        action
    }
}
