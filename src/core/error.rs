//! Application error types for user-facing error handling.
//!
//! Every failure here is local and non-fatal: the viewer keeps its previous
//! document and window title, and the error is surfaced through the status
//! line and the modal error dialog.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors surfaced to the user.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// File was not found at the dropped or picked path
    #[error("File not found")]
    FileNotFound {
        /// Path the load was requested for
        path: PathBuf,
    },

    /// File exists but could not be read (permissions, device errors)
    #[error("Cannot read file")]
    FileReadError {
        /// Path the read failed on
        path: PathBuf,
        /// Reason for the failure
        reason: String,
    },

    /// A drop payload carried neither a path nor in-memory contents
    #[error("Unreadable drop payload")]
    UnreadableDrop {
        /// Name reported by the drop source, possibly empty
        name: String,
    },

    /// Settings could not be written to the config directory
    #[error("Settings save error")]
    SettingsSaveError {
        /// Description of the failure
        reason: String,
    },
}

impl AppError {
    /// Whether retrying the failed operation can succeed. File reads can,
    /// once the user fixes the path or its permissions.
    pub fn supports_retry(&self) -> bool {
        matches!(self, Self::FileNotFound { .. } | Self::FileReadError { .. })
    }

    /// The file path associated with this error, if any.
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            Self::FileNotFound { path } | Self::FileReadError { path, .. } => Some(path),
            Self::UnreadableDrop { .. } | Self::SettingsSaveError { .. } => None,
        }
    }

    /// Title for the error dialog.
    pub fn dialog_title(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "File Not Found",
            Self::FileReadError { .. } => "Cannot Read File",
            Self::UnreadableDrop { .. } => "Unreadable Drop",
            Self::SettingsSaveError { .. } => "Settings Error",
        }
    }

    /// Brief one-line description suitable for the status line.
    pub fn brief_description(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("The file '{}' could not be found.", short_name(path))
            }
            Self::FileReadError { path, .. } => {
                format!("Could not read the file '{}'.", short_name(path))
            }
            Self::UnreadableDrop { name } if name.is_empty() => {
                "The dropped item carried no readable contents.".to_string()
            }
            Self::UnreadableDrop { name } => {
                format!("The dropped item '{}' carried no readable contents.", name)
            }
            Self::SettingsSaveError { reason } => {
                format!("Could not save settings: {}", reason)
            }
        }
    }

    /// Detailed, multi-line error information for the dialog's details
    /// section.
    pub fn detailed_info(&self) -> String {
        let mut lines = vec![
            format!("Error: {}", self.dialog_title()),
            format!("Description: {}", self.brief_description()),
        ];
        match self {
            Self::FileNotFound { path } => {
                lines.push(format!("Full path: {}", path.display()));
            }
            Self::FileReadError { path, reason } => {
                lines.push(format!("Full path: {}", path.display()));
                lines.push(format!("Reason: {}", reason));
            }
            Self::UnreadableDrop { name } => {
                lines.push(format!("Drop source name: {:?}", name));
            }
            Self::SettingsSaveError { reason } => {
                lines.push(format!("Reason: {}", reason));
            }
        }
        lines.join("\n")
    }
}

/// Map an I/O error from a read attempt onto the error taxonomy.
pub fn from_io_error(path: PathBuf, error: std::io::Error) -> AppError {
    match error.kind() {
        std::io::ErrorKind::NotFound => AppError::FileNotFound { path },
        std::io::ErrorKind::PermissionDenied => AppError::FileReadError {
            path,
            reason: "Permission denied".to_string(),
        },
        _ => AppError::FileReadError {
            path,
            reason: error.to_string(),
        },
    }
}

/// File-name component of a path, for compact user-facing messages.
fn short_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_errors_support_retry() {
        let not_found = AppError::FileNotFound {
            path: PathBuf::from("/tmp/missing.log"),
        };
        assert!(not_found.supports_retry());
        assert_eq!(not_found.dialog_title(), "File Not Found");
        assert!(not_found.brief_description().contains("missing.log"));
        assert_eq!(
            not_found.file_path(),
            Some(Path::new("/tmp/missing.log"))
        );
    }

    #[test]
    fn test_drop_and_settings_errors_do_not_retry() {
        let drop = AppError::UnreadableDrop {
            name: String::new(),
        };
        assert!(!drop.supports_retry());
        assert!(drop.file_path().is_none());

        let settings = AppError::SettingsSaveError {
            reason: "disk full".to_string(),
        };
        assert!(!settings.supports_retry());
        assert!(settings.brief_description().contains("disk full"));
    }

    #[test]
    fn test_from_io_error_not_found() {
        let path = PathBuf::from("/tmp/gone.log");
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        assert!(matches!(
            from_io_error(path, io),
            AppError::FileNotFound { .. }
        ));
    }

    #[test]
    fn test_from_io_error_permission_denied() {
        let path = PathBuf::from("/tmp/locked.log");
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        match from_io_error(path, io) {
            AppError::FileReadError { reason, .. } => {
                assert!(reason.contains("Permission"));
            }
            other => panic!("expected FileReadError, got {:?}", other),
        }
    }

    #[test]
    fn test_detailed_info_includes_full_path() {
        let error = AppError::FileReadError {
            path: PathBuf::from("/var/log/app.log"),
            reason: "device busy".to_string(),
        };
        let details = error.detailed_info();
        assert!(details.contains("/var/log/app.log"));
        assert!(details.contains("device busy"));
    }
}
