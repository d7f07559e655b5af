//! Line list rendering.
//!
//! This module draws the loaded document as one row per visible record, in
//! file order: a fixed-width delta indicator followed by the raw line text.
//! Timestamped rows are clickable and become the delta reference.

use eframe::egui;

use crate::core::config::ColorSettings;
use crate::core::document::{Document, LineRecord};

/// Width of the delta indicator column, in points.
const DELTA_COLUMN_WIDTH: f32 = 90.0;

/// Alpha of the reference-line background highlight.
const REFERENCE_HIGHLIGHT_ALPHA: u8 = 56;

/// User actions that can be triggered from the line list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineListAction {
    /// A timestamped row was clicked and becomes the reference
    Select(usize),
}

/// Renders the document's visible rows and reports clicks.
pub struct LineListRenderer<'a> {
    /// The document to render
    document: &'a Document,
    /// Indices of the records that pass the current filter, in file order
    visible_rows: &'a [usize],
    /// Color settings for row and delta styling
    colors: &'a ColorSettings,
    /// Font size for row text
    font_size: f32,
}

impl<'a> LineListRenderer<'a> {
    /// Create a renderer for the given document and visible-row index.
    pub fn new(
        document: &'a Document,
        visible_rows: &'a [usize],
        colors: &'a ColorSettings,
        font_size: f32,
    ) -> Self {
        Self {
            document,
            visible_rows,
            colors,
            font_size,
        }
    }

    /// Render the list and return any action triggered by user input.
    ///
    /// Hidden rows are skipped during painting but their records survive in
    /// the document, so relaxing the filter restores them with their deltas
    /// intact.
    pub fn render(&self, ui: &mut egui::Ui) -> Option<LineListAction> {
        if self.visible_rows.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label("No lines match the current filter.");
            });
            return None;
        }

        let mut action = None;
        let row_height = ui.text_style_height(&egui::TextStyle::Monospace);

        egui::ScrollArea::both()
            .auto_shrink([false; 2])
            .show_rows(ui, row_height, self.visible_rows.len(), |ui, range| {
                for &record_index in &self.visible_rows[range] {
                    if let Some(a) = self.render_row(ui, record_index) {
                        action = Some(a);
                    }
                }
            });

        action
    }

    /// Render one row: delta indicator, then the raw line text.
    fn render_row(&self, ui: &mut egui::Ui, record_index: usize) -> Option<LineListAction> {
        let record = &self.document.records[record_index];
        let mut action = None;

        ui.horizontal(|ui| {
            self.render_delta(ui, record);

            let color = if record.has_timestamp() {
                self.colors.line_timestamped_color()
            } else {
                self.colors.line_plain_color()
            };
            let mut text = egui::RichText::new(&record.text)
                .monospace()
                .size(self.font_size)
                .color(color);
            if self.document.reference == Some(record_index) {
                text = text.background_color(
                    self.colors.reference_color_alpha(REFERENCE_HIGHLIGHT_ALPHA),
                );
            }

            let label = egui::Label::new(text).extend();
            if record.has_timestamp() {
                let response = ui
                    .add(label.sense(egui::Sense::click()))
                    .on_hover_cursor(egui::CursorIcon::PointingHand);
                if response.clicked() {
                    action = Some(LineListAction::Select(record_index));
                }
            } else {
                // Rows without a timestamp cannot become the reference.
                ui.add(label);
            }
        });

        action
    }

    /// Render the delta indicator slot for a row.
    ///
    /// A delta of exactly 0 (the reference line itself) and an absent delta
    /// both leave the indicator hidden; the slot keeps its width so line
    /// text stays aligned.
    fn render_delta(&self, ui: &mut egui::Ui, record: &LineRecord) {
        let slot = egui::vec2(
            DELTA_COLUMN_WIDTH,
            ui.text_style_height(&egui::TextStyle::Monospace),
        );
        match record.delta_ms {
            Some(delta) if delta != 0 => {
                let color = if delta < 0 {
                    self.colors.delta_negative_color()
                } else {
                    self.colors.delta_positive_color()
                };
                // The sign rides along in the number; no unit suffix.
                ui.add_sized(
                    slot,
                    egui::Label::new(
                        egui::RichText::new(delta.to_string())
                            .monospace()
                            .size(self.font_size)
                            .color(color),
                    ),
                );
            }
            _ => {
                ui.allocate_space(slot);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser;

    #[test]
    fn test_renderer_wires_document_state() {
        let records =
            parser::parse("01-01 00:00:00.000 1 2 start\nplain\n01-01 00:00:01.500 1 2 end");
        let mut document = Document::new("t.log", records);
        document.select_reference(0);
        let visible: Vec<usize> = (0..document.records.len()).collect();
        let colors = ColorSettings::default();

        let renderer = LineListRenderer::new(&document, &visible, &colors, 13.0);
        assert_eq!(renderer.visible_rows.len(), 3);
        assert_eq!(renderer.document.records[2].delta_ms, Some(1500));
    }
}
