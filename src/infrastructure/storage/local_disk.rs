use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tokio::fs;

use crate::domain::repositories::file_store::FileStore;

#[derive(Clone, Debug)]
pub struct LocalDiskConfig {
    pub root: PathBuf,
    /// Public path the root directory is served under, e.g. `/uploads`.
    pub url_prefix: String,
}

pub struct LocalDiskStore {
    root: PathBuf,
    url_prefix: String,
}

impl LocalDiskStore {
    pub fn new(config: LocalDiskConfig) -> Self {
        Self {
            root: config.root,
            url_prefix: config.url_prefix.trim_end_matches('/').to_string(),
        }
    }

    fn public_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.url_prefix, file_name)
    }
}

#[async_trait]
impl FileStore for LocalDiskStore {
    async fn root_exists(&self) -> Result<bool> {
        match fs::metadata(&self.root).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err)
                .with_context(|| format!("failed to stat upload dir {}", self.root.display())),
        }
    }

    async fn write_file(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        // Names are generated server-side; anything path-like is rejected.
        if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name.starts_with('.') {
            bail!("refusing to write file with unsafe name {file_name:?}");
        }

        let path = self.root.join(file_name);
        fs::write(&path, &bytes)
            .await
            .with_context(|| format!("failed to write upload {}", path.display()))?;

        Ok(self.public_url(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(root: PathBuf) -> LocalDiskStore {
        LocalDiskStore::new(LocalDiskConfig {
            root,
            url_prefix: "/uploads/".to_string(),
        })
    }

    #[tokio::test]
    async fn writes_bytes_and_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path().to_path_buf());

        assert!(store.root_exists().await.unwrap());
        let url = store.write_file("a.png", vec![1, 2, 3]).await.unwrap();

        assert_eq!(url, "/uploads/a.png");
        assert_eq!(std::fs::read(dir.path().join("a.png")).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn missing_root_is_reported_and_write_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path().join("missing"));

        assert!(!store.root_exists().await.unwrap());
        assert!(store.write_file("a.png", vec![1]).await.is_err());
    }

    #[tokio::test]
    async fn path_like_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path().to_path_buf());

        for name in ["../escape.png", "nested/a.png", ".hidden", ""] {
            assert!(store.write_file(name, vec![1]).await.is_err(), "{name:?} accepted");
        }
    }
}
