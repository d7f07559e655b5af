//! Configuration and settings module.
//!
//! This module handles persistent viewer settings: color customization,
//! font size, window size, and the recent-files list, saved to the user
//! config directory as JSON. Nothing about the loaded document, the
//! selection, or the search pattern is ever persisted.

use eframe::egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::AppError;

/// Settings filename for persistence.
const SETTINGS_FILENAME: &str = "config.json";

/// Maximum number of recent files to track.
const MAX_RECENT_FILES: usize = 10;

/// Color settings for the viewer UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSettings {
    /// Text color for lines that carry a timestamp
    pub line_timestamped: [u8; 3],
    /// Text color for lines without one
    pub line_plain: [u8; 3],
    /// Delta indicator color for positive offsets
    pub delta_positive: [u8; 3],
    /// Delta indicator color for negative offsets
    pub delta_negative: [u8; 3],
    /// Background highlight for the selected reference line
    pub reference: [u8; 3],
    /// Search box text while the pattern does not compile
    pub search_invalid: [u8; 3],
    /// Success status color
    pub status_success: [u8; 3],
    /// Error status color
    pub status_error: [u8; 3],
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            line_timestamped: [220, 220, 220], // Near-white
            line_plain: [140, 140, 140],       // Gray
            delta_positive: [76, 175, 80],     // Green
            delta_negative: [244, 67, 54],     // Red
            reference: [150, 80, 200],         // Purple
            search_invalid: [244, 67, 54],     // Red
            status_success: [76, 175, 80],     // Green
            status_error: [244, 67, 54],       // Red
        }
    }
}

impl ColorSettings {
    /// Convert a color array to egui Color32.
    #[inline]
    pub fn to_color32(color: [u8; 3]) -> Color32 {
        Color32::from_rgb(color[0], color[1], color[2])
    }

    /// Convert a color array to egui Color32 with alpha.
    #[inline]
    pub fn to_color32_alpha(color: [u8; 3], alpha: u8) -> Color32 {
        Color32::from_rgba_unmultiplied(color[0], color[1], color[2], alpha)
    }

    /// Get the timestamped-line text color as Color32.
    pub fn line_timestamped_color(&self) -> Color32 {
        Self::to_color32(self.line_timestamped)
    }

    /// Get the plain-line text color as Color32.
    pub fn line_plain_color(&self) -> Color32 {
        Self::to_color32(self.line_plain)
    }

    /// Get the positive delta color as Color32.
    pub fn delta_positive_color(&self) -> Color32 {
        Self::to_color32(self.delta_positive)
    }

    /// Get the negative delta color as Color32.
    pub fn delta_negative_color(&self) -> Color32 {
        Self::to_color32(self.delta_negative)
    }

    /// Get the reference-line highlight with alpha.
    pub fn reference_color_alpha(&self, alpha: u8) -> Color32 {
        Self::to_color32_alpha(self.reference, alpha)
    }

    /// Get the invalid-search color as Color32.
    pub fn search_invalid_color(&self) -> Color32 {
        Self::to_color32(self.search_invalid)
    }

    /// Get the success status color as Color32.
    pub fn status_success_color(&self) -> Color32 {
        Self::to_color32(self.status_success)
    }

    /// Get the error status color as Color32.
    pub fn status_error_color(&self) -> Color32 {
        Self::to_color32(self.status_error)
    }
}

/// Viewer settings persisted across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Color customization settings.
    pub colors: ColorSettings,

    /// Font size for the line list.
    #[serde(default = "default_font_size")]
    pub font_size: f32,

    /// Recently opened files (most recent first).
    #[serde(default)]
    pub recent_files: Vec<PathBuf>,

    /// Window size to restore on startup (width, height).
    #[serde(default)]
    pub window_size: Option<(f32, f32)>,
}

/// Default line-list font size.
fn default_font_size() -> f32 {
    13.0
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            colors: ColorSettings::default(),
            font_size: default_font_size(),
            recent_files: Vec::new(),
            window_size: None,
        }
    }
}

impl AppSettings {
    /// Get the settings file path in the user's config directory.
    fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("log-delta-viewer");
            path.push(SETTINGS_FILENAME);
            path
        })
    }

    /// Load settings from disk, returning defaults if loading fails.
    pub fn load() -> Self {
        Self::settings_path()
            .and_then(|path| std::fs::read_to_string(&path).ok())
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save settings to disk.
    pub fn save(&self) -> Result<(), AppError> {
        let path = Self::settings_path().ok_or_else(|| AppError::SettingsSaveError {
            reason: "could not determine config directory".to_string(),
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::SettingsSaveError {
                reason: format!("failed to create config directory: {}", e),
            })?;
        }

        let content =
            serde_json::to_string_pretty(self).map_err(|e| AppError::SettingsSaveError {
                reason: format!("failed to serialize settings: {}", e),
            })?;

        std::fs::write(&path, content).map_err(|e| AppError::SettingsSaveError {
            reason: format!("failed to write settings file: {}", e),
        })
    }

    /// Add a file to the recent files list, moving it to the front and
    /// capping the list length.
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(MAX_RECENT_FILES);
    }

    /// Remember the window size for the next session.
    pub fn set_window_size(&mut self, width: f32, height: f32) {
        self.window_size = Some((width, height));
    }
}
