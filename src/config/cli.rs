use crate::core::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    async fn list_files(&self, dir: &str) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(self.resolve(dir)).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            // metadata 會跟隨符號連結；無法解析的連結留給讀檔時回報
            let is_file = match tokio::fs::metadata(entry.path()).await {
                Ok(meta) => meta.is_file(),
                Err(_) => true,
            };
            if is_file {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        Ok(names)
    }

    async fn create_dir(&self, dir: &str) -> Result<()> {
        tokio::fs::create_dir_all(self.resolve(dir)).await?;
        Ok(())
    }

    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.resolve(path)).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

/// True when `path` exists and is a directory.
pub fn dir_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_dir()
}
