//! Dialog components for the log delta viewer.
//!
//! Currently a single modal error dialog with an expandable details
//! section and an optional retry action for failed file reads.

use eframe::egui;

use crate::core::error::AppError;

/// Actions that can be triggered from the error dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDialogAction {
    /// Try the failed load again
    Retry,
    /// Dismiss the dialog
    Close,
}

/// State for the modal error dialog.
#[derive(Debug, Clone, Default)]
pub struct ErrorDialogState {
    error: Option<AppError>,
    details_expanded: bool,
}

impl ErrorDialogState {
    /// Open the dialog with the given error.
    pub fn show(&mut self, error: AppError) {
        self.error = Some(error);
        self.details_expanded = false;
    }

    /// Close the dialog and drop the error.
    pub fn close(&mut self) {
        self.error = None;
        self.details_expanded = false;
    }

    /// Whether the dialog is currently open.
    pub fn is_open(&self) -> bool {
        self.error.is_some()
    }
}

/// Renderer for the modal error dialog.
pub struct ErrorDialogRenderer<'a> {
    state: &'a mut ErrorDialogState,
}

impl<'a> ErrorDialogRenderer<'a> {
    /// Create a renderer over the dialog state.
    pub fn new(state: &'a mut ErrorDialogState) -> Self {
        Self { state }
    }

    /// Render the dialog and return the action the user took, if any.
    ///
    /// Both actions close the dialog; retrying is only offered for errors
    /// where a retry can succeed.
    pub fn render(&mut self, ctx: &egui::Context) -> Option<ErrorDialogAction> {
        let error = self.state.error.clone()?;
        let mut action = None;

        // Dim the view behind the dialog.
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Background,
            egui::Id::new("error_dialog_dim"),
        ));
        let screen_rect = ctx.input(|i| i.viewport_rect());
        painter.rect_filled(screen_rect, 0.0, egui::Color32::from_black_alpha(150));

        egui::Window::new(format!("⚠ {}", error.dialog_title()))
            .id(egui::Id::new("error_dialog"))
            .collapsible(false)
            .resizable(false)
            .default_width(420.0)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.label(error.brief_description());
                ui.add_space(8.0);

                let toggle = if self.state.details_expanded {
                    "Hide details"
                } else {
                    "Show details"
                };
                if ui.link(toggle).clicked() {
                    self.state.details_expanded = !self.state.details_expanded;
                }
                if self.state.details_expanded {
                    egui::Frame::new()
                        .fill(egui::Color32::from_gray(30))
                        .inner_margin(8.0)
                        .corner_radius(4.0)
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(error.detailed_info())
                                    .monospace()
                                    .color(egui::Color32::LIGHT_GRAY),
                            );
                        });
                }

                ui.add_space(8.0);
                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("📋 Copy Error").clicked() {
                        ui.ctx().copy_text(error.detailed_info());
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            action = Some(ErrorDialogAction::Close);
                        }
                        if error.supports_retry() && ui.button("🔄 Retry").clicked() {
                            action = Some(ErrorDialogAction::Retry);
                        }
                    });
                });
                ui.add_space(4.0);
            });

        if action.is_some() {
            self.state.close();
        }
        action
    }
}
