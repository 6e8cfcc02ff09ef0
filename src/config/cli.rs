use crate::core::KeyValueStore;
use crate::utils::error::{FinderError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File-backed key/value slots: each key is stored as `<base_path>/<key>.json`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(FinderError::StorageError {
                key: key.to_string(),
                message: "Keys may only contain ASCII letters, digits, '_' and '-'".to_string(),
            });
        }

        Ok(Path::new(&self.base_path).join(format!("{}.json", key)))
    }
}

impl KeyValueStore for LocalStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let full_path = self.slot_path(key)?;
        match tokio::fs::read_to_string(&full_path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let full_path = self.slot_path(key)?;

        let parent = full_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        tokio::fs::create_dir_all(&parent).await?;

        // 每次寫入使用獨立的暫存檔再 rename，多個寫入者不會互相搬走對方的檔案
        let data = value.to_string();
        let target = full_path.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut tmp = NamedTempFile::new_in(&parent)?;
            tmp.write_all(data.as_bytes())?;
            tmp.as_file().sync_all()?;
            tmp.persist(&target)
                .map_err(|e| FinderError::IoError(e.error))?;
            Ok(())
        })
        .await
        .map_err(|e| FinderError::StorageError {
            key: key.to_string(),
            message: format!("write task failed: {}", e),
        })??;

        tracing::debug!("Wrote {} bytes to {}", value.len(), full_path.display());
        Ok(())
    }
}
