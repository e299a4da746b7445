use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{PilotError, Result};

const EXTENSION: &str = "json";

/// Key-value store backed by `<dir>/<key>.json` files.
///
/// Each `set` replaces the whole document. Writes to different keys are
/// independent; there is no transaction spanning several keys.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub async fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        self.recover_interrupted_writes().await;
        Ok(())
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).await?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.key_path(key)?;
        let content = serde_json::to_string_pretty(value)?;
        fs::create_dir_all(&self.dir).await?;
        self.write_atomic(&path, &content).await
    }

    pub async fn remove(&self, key: &str) -> Result<bool> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).await?;
        debug!(key, "Removed key");
        Ok(true)
    }

    /// Keys currently stored, sorted.
    pub async fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        if !self.dir.exists() {
            return Ok(keys);
        }

        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == EXTENSION)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                keys.push(stem.to_string());
            }
        }

        keys.sort();
        Ok(keys)
    }

    async fn write_atomic(&self, path: &Path, content: &str) -> Result<()> {
        let tmp_path = path.with_extension("json.tmp");

        fs::write(&tmp_path, content).await?;

        let tmp_path_clone = tmp_path.clone();
        let sync_result = tokio::task::spawn_blocking(move || {
            std::fs::File::open(&tmp_path_clone).and_then(|file| file.sync_all())
        })
        .await;

        match sync_result {
            Err(e) => warn!(error = %e, "Failed to sync temp file to disk"),
            Ok(Err(e)) => warn!(error = %e, "Failed to sync temp file to disk"),
            Ok(Ok(())) => {}
        }

        fs::rename(&tmp_path, path).await?;

        debug!(path = %path.display(), "Atomic write completed");
        Ok(())
    }

    async fn recover_interrupted_writes(&self) {
        if let Ok(mut entries) = fs::read_dir(&self.dir).await {
            while let Ok(Some(entry)) = entries.next_entry().await {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "tmp") {
                    debug!(path = %path.display(), "Removing interrupted write");
                    let _ = fs::remove_file(&path).await;
                }
            }
        }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PilotError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.{}", key, EXTENSION)))
    }
}
