//! Best-effort capture of raw provider payloads.
//!
//! Adapters hand the unmodified provider response to a [`RawCapture`] before
//! mapping it. A failed capture is logged and never fails the search.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// Sink for raw provider payloads, keyed by adapter name.
#[async_trait]
pub trait RawCapture: Send + Sync {
    /// Store `payload` under `name`.
    ///
    /// # Errors
    /// Returns the underlying I/O error.
    async fn store(&self, name: &str, payload: &serde_json::Value) -> std::io::Result<()>;
}

/// Store a payload and swallow any failure with a warning.
pub async fn capture_best_effort(capture: &dyn RawCapture, name: &str, payload: &serde_json::Value) {
    if let Err(e) = capture.store(name, payload).await {
        warn!(source = name, error = %e, "failed to capture raw payload");
    }
}

/// Writes each payload as pretty JSON to `{dir}/{name}.json`, name lowercased.
///
/// Later payloads for the same name overwrite earlier ones.
#[derive(Debug, Clone)]
pub struct FileRawCapture {
    dir: PathBuf,
}

impl FileRawCapture {
    /// Create a capture rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory receiving payloads.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a payload for `name` is written to.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        let file_stem: String = name
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{file_stem}.json"))
    }
}

#[async_trait]
impl RawCapture for FileRawCapture {
    async fn store(&self, name: &str, payload: &serde_json::Value) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(name);
        let contents = serde_json::to_vec_pretty(payload)?;

        // Concurrent searches on one adapter each write their own temp file;
        // the rename swaps in a complete payload.
        let tmp_path = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
        tokio::fs::write(&tmp_path, contents).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e);
        }

        debug!(source = name, path = %path.display(), "captured raw payload");
        Ok(())
    }
}

/// Discards every payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRawCapture;

#[async_trait]
impl RawCapture for NoopRawCapture {
    async fn store(&self, _name: &str, _payload: &serde_json::Value) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_capture_writes_lowercased_name() {
        let tmp = TempDir::new().expect("create temp dir");
        let capture = FileRawCapture::new(tmp.path().join("raw_data"));

        capture
            .store("InternalDB", &json!({"contacts": []}))
            .await
            .expect("store payload");

        let path = tmp.path().join("raw_data").join("internaldb.json");
        let written = std::fs::read_to_string(&path).expect("read captured file");
        let value: serde_json::Value = serde_json::from_str(&written).expect("parse captured file");
        assert_eq!(value, json!({"contacts": []}));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_stores_leave_one_complete_payload() {
        let tmp = TempDir::new().expect("create temp dir");
        let capture = FileRawCapture::new(tmp.path());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let capture = capture.clone();
                let payload = json!({ "writer": i, "contacts": vec![i; 2_000] });
                tokio::spawn(async move { capture.store("clay", &payload).await })
            })
            .collect();
        for handle in handles {
            handle.await.expect("join store task").expect("store payload");
        }

        let written = std::fs::read_to_string(capture.path_for("clay")).expect("read captured file");
        let value: serde_json::Value = serde_json::from_str(&written).expect("parse captured file");
        let writer = value["writer"].as_u64().expect("writer field");
        assert_eq!(value["contacts"].as_array().map(Vec::len), Some(2_000));
        assert!(value["contacts"].as_array().expect("contacts").iter().all(|c| c.as_u64() == Some(writer)));

        let entries: Vec<_> = std::fs::read_dir(tmp.path())
            .expect("list capture dir")
            .map(|entry| entry.expect("dir entry").file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("clay.json")]);
    }

    #[test]
    fn test_path_for_sanitizes_name() {
        let capture = FileRawCapture::new("/tmp/raw");
        assert_eq!(
            capture.path_for("Clay API/v1"),
            PathBuf::from("/tmp/raw/clay_api_v1.json")
        );
    }

    #[tokio::test]
    async fn test_best_effort_swallows_failure() {
        let tmp = TempDir::new().expect("create temp dir");
        let blocker = tmp.path().join("not-a-dir");
        std::fs::write(&blocker, "file").expect("write blocker file");

        // The capture dir is a regular file, so every write fails.
        let capture = FileRawCapture::new(&blocker);
        assert!(capture.store("clay", &json!([])).await.is_err());
        capture_best_effort(&capture, "clay", &json!([])).await;
    }
}
