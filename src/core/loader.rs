//! Background file loading.
//!
//! Dropped or picked files are read on a worker thread so the UI never
//! blocks on disk. Every request carries a generation token; completions
//! for superseded generations are discarded, so a slow earlier read can
//! never clobber the result of a faster later one.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use eframe::egui;

use super::error::{self, AppError};

/// Completed read of one load request.
#[derive(Debug)]
pub struct LoadResult {
    /// Generation the request was issued under.
    pub generation: u64,
    /// Display name of the file.
    pub name: String,
    /// Path the file was read from, kept for retry.
    pub path: Option<PathBuf>,
    /// Decoded file contents, or the error that prevented the read.
    pub outcome: Result<String, AppError>,
}

/// Hands file reads to worker threads and collects their results.
pub struct FileLoader {
    generation: u64,
    pending: bool,
    tx: Sender<LoadResult>,
    rx: Receiver<LoadResult>,
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileLoader {
    /// Create a loader with no outstanding reads.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            generation: 0,
            pending: false,
            tx,
            rx,
        }
    }

    /// Whether the newest request is still being read.
    pub fn is_loading(&self) -> bool {
        self.pending
    }

    /// Start reading `path` on a worker thread.
    ///
    /// Supersedes any in-flight request: an earlier read still runs to
    /// completion (there is no cancellation) but its result fails the
    /// generation check in [`FileLoader::poll`] and is dropped there.
    pub fn begin(&mut self, path: PathBuf, ctx: &egui::Context) {
        self.generation += 1;
        self.pending = true;
        let generation = self.generation;
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let name = display_name(&path);
            let outcome = read_text(&path);
            let _ = tx.send(LoadResult {
                generation,
                name,
                path: Some(path),
                outcome,
            });
            ctx.request_repaint();
        });
    }

    /// Invalidate any in-flight request without starting a new read.
    ///
    /// Used when a drop payload arrives with its contents already in
    /// memory and takes over as the newest load.
    pub fn supersede(&mut self) {
        self.generation += 1;
        self.pending = false;
    }

    /// Poll for a completed read.
    ///
    /// Results from superseded generations are discarded here, so callers
    /// only ever observe the newest request.
    pub fn poll(&mut self) -> Option<LoadResult> {
        loop {
            match self.rx.try_recv() {
                Ok(result) if result.generation == self.generation => {
                    self.pending = false;
                    return Some(result);
                }
                Ok(result) => {
                    tracing::debug!(name = %result.name, "discarding stale load result");
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return None,
            }
        }
    }
}

/// Read a file and decode it as text.
fn read_text(path: &Path) -> Result<String, AppError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(decode_text(&bytes)),
        Err(e) => Err(error::from_io_error(path.to_path_buf(), e)),
    }
}

/// Decode raw bytes as UTF-8, replacing invalid sequences.
///
/// Lossy decoding mirrors a plain text-mode read: a stray byte becomes
/// U+FFFD instead of failing the whole load.
pub fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Display name of a path: its file-name component, or the whole path when
/// there is none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn temp_file(label: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "log-delta-viewer-test-{}-{}.log",
            std::process::id(),
            label
        ));
        std::fs::write(&path, contents).expect("write temp file");
        path
    }

    fn poll_blocking(loader: &mut FileLoader) -> LoadResult {
        for _ in 0..500 {
            if let Some(result) = loader.poll() {
                return result;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("loader did not deliver a result in time");
    }

    #[test]
    fn test_begin_and_poll_round_trip() {
        let path = temp_file("roundtrip", "hello\nworld");
        let ctx = egui::Context::default();
        let mut loader = FileLoader::new();

        loader.begin(path.clone(), &ctx);
        assert!(loader.is_loading());

        let result = poll_blocking(&mut loader);
        assert!(!loader.is_loading());
        assert_eq!(result.name, display_name(&path));
        assert_eq!(result.outcome.expect("read ok"), "hello\nworld");

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_reports_not_found() {
        let ctx = egui::Context::default();
        let mut loader = FileLoader::new();
        loader.begin(PathBuf::from("/nonexistent/never-here.log"), &ctx);

        let result = poll_blocking(&mut loader);
        assert!(matches!(
            result.outcome,
            Err(AppError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let first = temp_file("stale-first", "first");
        let second = temp_file("stale-second", "second");
        let ctx = egui::Context::default();
        let mut loader = FileLoader::new();

        loader.begin(first.clone(), &ctx);
        loader.begin(second.clone(), &ctx);

        // Whichever order the reads finish, only the newest generation
        // can come out of poll.
        let result = poll_blocking(&mut loader);
        assert_eq!(result.outcome.expect("read ok"), "second");
        assert!(loader.poll().is_none());

        let _ = std::fs::remove_file(first);
        let _ = std::fs::remove_file(second);
    }

    #[test]
    fn test_supersede_drops_in_flight_read() {
        let path = temp_file("superseded", "old contents");
        let ctx = egui::Context::default();
        let mut loader = FileLoader::new();

        loader.begin(path.clone(), &ctx);
        loader.supersede();
        assert!(!loader.is_loading());

        // The read completes eventually but never surfaces.
        thread::sleep(Duration::from_millis(100));
        assert!(loader.poll().is_none());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_decode_text_replaces_invalid_bytes() {
        let decoded = decode_text(b"ok \xff\xfe bytes");
        assert!(decoded.starts_with("ok "));
        assert!(decoded.contains('\u{FFFD}'));
    }

    #[test]
    fn test_display_name_uses_file_name_component() {
        assert_eq!(display_name(Path::new("/a/b/trace.log")), "trace.log");
    }
}
