//! File-based host source.
//!
//! Reads a JSON [`HostSnapshot`] that the host (or a bridge script) rewrites
//! periodically.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::warn;

use super::{HostSnapshot, HostSource};

/// A host source backed by a JSON file.
///
/// The file is re-read only when its modification time advances. Between
/// changes the last good snapshot is returned, so the monitor keeps ticking
/// on the most recent host state. A failed read or parse keeps the previous
/// snapshot and records the error.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
    cached_snapshot: Option<HostSnapshot>,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
            cached_snapshot: None,
        }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&mut self) -> Option<HostSnapshot> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                self.record_error(format!("Read error: {}", e));
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(snapshot) => {
                self.last_error = None;
                Some(snapshot)
            }
            Err(e) => {
                self.record_error(format!("Parse error: {}", e));
                None
            }
        }
    }

    /// Store `message` as the current error, logging it only when it changes.
    fn record_error(&mut self, message: String) {
        if self.last_error.as_deref() != Some(message.as_str()) {
            warn!(path = %self.path.display(), error = %message, "failed to load host snapshot");
        }
        self.last_error = Some(message);
    }
}

impl HostSource for FileSource {
    fn snapshot(&mut self) -> Option<HostSnapshot> {
        let current_modified = self.get_modified_time();

        let file_changed = match (&self.last_modified, &current_modified) {
            (None, _) => true,
            (Some(_), None) => false, // File disappeared, keep the cached state
            (Some(last), Some(current)) => current > last,
        };

        if file_changed {
            if let Some(snapshot) = self.read_file() {
                self.last_modified = current_modified;
                self.cached_snapshot = Some(snapshot);
            }
        }

        self.cached_snapshot.clone()
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::OpenOptions;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    /// Replace the file contents and push its mtime forward so the change is
    /// visible even on filesystems with coarse timestamps.
    fn rewrite(path: &Path, content: &str, bump_secs: u64) {
        fs::write(path, content).unwrap();
        let file = OpenOptions::new().write(true).open(path).unwrap();
        let modified = SystemTime::now() + Duration::from_secs(bump_secs);
        file.set_modified(modified).unwrap();
    }

    fn sample_json() -> &'static str {
        r#"{
            "time": 120,
            "servers": [
                {
                    "name": "Web",
                    "id": 1,
                    "capacity": 100.0,
                    "node_count": 2,
                    "items": [ { "load_requirement": 20.0 } ]
                }
            ]
        }"#
    }

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/host.json");
        assert_eq!(source.path(), Path::new("/tmp/host.json"));
        assert_eq!(source.description(), "file: /tmp/host.json");
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_reads_and_caches() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());

        let snapshot = source.snapshot().unwrap();
        assert_eq!(snapshot.time, 120);
        assert_eq!(snapshot.servers[0].name, "Web");

        // Unchanged file still yields the cached host state
        let again = source.snapshot().unwrap();
        assert_eq!(again, snapshot);
    }

    #[test]
    fn test_file_source_missing_file() {
        let mut source = FileSource::new("/nonexistent/path/host.json");

        assert!(source.snapshot().is_none());
        assert!(source.error().unwrap().contains("Read error"));
    }

    #[test]
    fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());

        assert!(source.snapshot().is_none());
        assert!(source.error().unwrap().contains("Parse error"));
    }

    #[test]
    fn test_file_source_detects_changes() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());
        assert_eq!(source.snapshot().unwrap().time, 120);

        rewrite(file.path(), &sample_json().replace("120", "180"), 10);

        let snapshot = source.snapshot().unwrap();
        assert_eq!(snapshot.time, 180);
        assert!(source.error().is_none());
    }

    #[test]
    fn test_file_source_keeps_last_good_snapshot_on_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let mut source = FileSource::new(file.path());
        let good = source.snapshot().unwrap();

        rewrite(file.path(), "{ truncated", 10);

        assert_eq!(source.snapshot(), Some(good.clone()));
        assert!(source.error().unwrap().contains("Parse error"));

        // Repeated failures keep the same error and the same snapshot
        assert_eq!(source.snapshot(), Some(good));
        assert!(source.error().unwrap().contains("Parse error"));
    }

    #[test]
    fn test_file_source_recovers_after_bad_write() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let mut source = FileSource::new(file.path());
        assert!(source.snapshot().is_none());

        rewrite(file.path(), sample_json(), 10);

        assert_eq!(source.snapshot().unwrap().time, 120);
        assert!(source.error().is_none());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_repeated_failure_is_logged_once() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let mut source = FileSource::new("/nonexistent/path/host.json");
        tracing::subscriber::with_default(subscriber, || {
            for _ in 0..5 {
                assert!(source.snapshot().is_none());
            }
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("failed to load host snapshot").count(), 1);
    }
}
