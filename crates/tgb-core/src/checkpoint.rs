//! Checkpoint (update offset) persistence.

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::{ports::CheckpointStore, Result};

/// Stores the offset as a bare decimal integer followed by `\n`.
#[derive(Clone, Debug)]
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "offset".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CheckpointStore for FileCheckpointStore {
    async fn load(&self) -> i64 {
        let txt = match tokio::fs::read_to_string(&self.path).await {
            Ok(txt) => txt,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return 0,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "checkpoint unreadable, starting from 0");
                return 0;
            }
        };
        parse_offset(&txt).unwrap_or_else(|| {
            warn!(path = %self.path.display(), "checkpoint malformed, starting from 0");
            0
        })
    }

    async fn save(&self, offset: i64) -> Result<()> {
        // Write, fsync, rename: readers never see a half-written slot.
        let tmp = self.tmp_path();
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(format!("{offset}\n").as_bytes()).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!(offset, "checkpoint saved");
        Ok(())
    }
}

/// First line as a non-negative integer; empty content counts as missing.
fn parse_offset(txt: &str) -> Option<i64> {
    let line = txt.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        return None;
    }
    line.parse::<i64>().ok().filter(|v| *v >= 0)
}

/// Process-local store. Keeps the full history of saved values.
#[derive(Debug, Default)]
pub struct MemoryCheckpointStore {
    initial: i64,
    saved: Mutex<Vec<i64>>,
}

impl MemoryCheckpointStore {
    pub fn new(initial: i64) -> Self {
        Self {
            initial,
            saved: Mutex::new(Vec::new()),
        }
    }

    /// Every value passed to `save`, oldest first.
    pub fn history(&self) -> Vec<i64> {
        self.saved.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

#[async_trait]
impl CheckpointStore for MemoryCheckpointStore {
    async fn load(&self) -> i64 {
        let saved = self.saved.lock().unwrap_or_else(|p| p.into_inner());
        saved.last().copied().unwrap_or(self.initial)
    }

    async fn save(&self, offset: i64) -> Result<()> {
        self.saved
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(offset);
        Ok(())
    }
}
