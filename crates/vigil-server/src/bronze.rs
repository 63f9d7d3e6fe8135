//! Bronze-layer event archive
//!
//! Raw inbound events are appended as JSON Lines, one file per event kind,
//! before any fraud processing. Archive failures are the caller's concern
//! to log; they must not block the fraud path.

use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use vigil_core::EventKind;

/// Append-only JSONL archive rooted at a configurable directory
pub struct BronzeArchive {
    root: PathBuf,
}

impl BronzeArchive {
    /// Create an archive rooted at the given directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Append one raw event to the archive file for its kind
    pub async fn append(&self, kind: EventKind, event: &serde_json::Value) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;

        let path = self.root.join(format!("{}.jsonl", kind.name()));
        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(line.as_bytes()).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let archive = BronzeArchive::new(dir.path().to_path_buf());

        let first = serde_json::json!({"user_id": "u1", "success": true});
        let second = serde_json::json!({"user_id": "u2", "success": false});
        archive.append(EventKind::Login, &first).await.unwrap();
        archive.append(EventKind::Login, &second).await.unwrap();

        let content = std::fs::read_to_string(dir.path().join("login.jsonl")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["user_id"], "u1");
    }

    #[tokio::test]
    async fn test_kinds_archive_to_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let archive = BronzeArchive::new(dir.path().to_path_buf());

        let event = serde_json::json!({"user_id": "u1"});
        archive.append(EventKind::Login, &event).await.unwrap();
        archive.append(EventKind::Buy, &event).await.unwrap();

        assert!(dir.path().join("login.jsonl").exists());
        assert!(dir.path().join("buy.jsonl").exists());
    }
}
