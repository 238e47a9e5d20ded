//! On-disk record of feed responses that could not be used.
//!
//! Each payload goes to its own file named after the local time it was
//! written, so a bad response can be inspected after the sign has moved on.

use std::path::{Path, PathBuf};

use chrono::Local;

/// Filename timestamp format.
const FILE_TIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Error writing a payload.
#[derive(Debug, thiserror::Error)]
pub enum PayloadLogError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes payloads under a directory.
#[derive(Debug, Clone)]
pub struct PayloadLog {
    dir: PathBuf,
}

impl PayloadLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write a payload, as pretty JSON if it parses and as text otherwise.
    pub fn record(&self, payload: &str) -> Result<PathBuf, PayloadLogError> {
        match serde_json::from_str::<serde_json::Value>(payload) {
            Ok(value) => self.record_json(&value),
            Err(_) => self.record_text(payload),
        }
    }

    /// Write a JSON payload to `{dir}/{time}.json`.
    pub fn record_json(&self, value: &serde_json::Value) -> Result<PathBuf, PayloadLogError> {
        let contents = serde_json::to_string_pretty(value)?;
        self.write("json", &contents)
    }

    /// Write a non-JSON payload to `{dir}/{time}.txt`.
    pub fn record_text(&self, text: &str) -> Result<PathBuf, PayloadLogError> {
        self.write("txt", text)
    }

    fn write(&self, extension: &str, contents: &str) -> Result<PathBuf, PayloadLogError> {
        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source| PayloadLogError::Io { path, source }
        };

        std::fs::create_dir_all(&self.dir).map_err(io_error(self.dir.as_path()))?;

        let stem = Local::now().format(FILE_TIME_FORMAT).to_string();
        let path = self.free_path(&stem, extension);
        std::fs::write(&path, contents).map_err(io_error(path.as_path()))?;
        Ok(path)
    }

    /// First unused path for this stem, suffixing `-1`, `-2`, ... when
    /// several payloads land in the same second.
    fn free_path(&self, stem: &str, extension: &str) -> PathBuf {
        let mut path = self.dir.join(format!("{stem}.{extension}"));
        let mut n = 1;
        while path.exists() {
            path = self.dir.join(format!("{stem}-{n}.{extension}"));
            n += 1;
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_payload_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let log = PayloadLog::new(dir.path().join("logs"));

        let path = log.record(r#"{"ctatt":{"errCd":"500"}}"#).unwrap();
        assert_eq!(path.extension().unwrap(), "json");
        assert!(path.starts_with(dir.path().join("logs")));

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["ctatt"]["errCd"], "500");
    }

    #[test]
    fn text_payload_kept_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let log = PayloadLog::new(dir.path());

        let path = log.record("<html>Service Unavailable</html>").unwrap();
        assert_eq!(path.extension().unwrap(), "txt");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "<html>Service Unavailable</html>"
        );
    }

    #[test]
    fn same_second_payloads_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let log = PayloadLog::new(dir.path());

        let paths: Vec<_> = (0..3).map(|i| log.record_text(&i.to_string()).unwrap()).collect();
        assert_ne!(paths[0], paths[1]);
        assert_ne!(paths[1], paths[2]);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn file_named_by_time() {
        let dir = tempfile::tempdir().unwrap();
        let log = PayloadLog::new(dir.path());
        let path = log.record_text("x").unwrap();

        let stem = path.file_stem().unwrap().to_str().unwrap();
        let parsed = chrono::NaiveDateTime::parse_from_str(&stem[..19], FILE_TIME_FORMAT);
        assert!(parsed.is_ok());
    }

    #[test]
    fn unwritable_directory_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        let log = PayloadLog::new(blocker.join("logs"));
        assert!(matches!(
            log.record_text("x"),
            Err(PayloadLogError::Io { .. })
        ));
    }
}
