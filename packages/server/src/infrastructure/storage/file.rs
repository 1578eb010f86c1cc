//! File-backed snapshot store.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;

use crate::domain::{SnapshotStore, StorageError};

/// Stores the snapshot at a single path.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so a crash mid-write never leaves a truncated snapshot behind.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temporary_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "snapshot".into());
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn load(&self) -> Result<Option<Vec<u8>>, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, bytes: &[u8]) -> Result<(), StorageError> {
        let temporary = self.temporary_path();
        tokio::fs::write(&temporary, bytes).await?;
        tokio::fs::rename(&temporary, &self.path).await?;
        tracing::debug!(
            "Wrote {} byte snapshot to {}",
            bytes.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_path() -> PathBuf {
        std::env::temp_dir().join(format!("hekiga-test-{}.png", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_load_missing_file_returns_none() {
        // テスト項目: ファイルが存在しない場合は None が返る
        // given (前提条件):
        let store = FileSnapshotStore::new(unique_path());

        // when (操作):
        let result = store.load().await;

        // then (期待する結果):
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_save_then_load() {
        // テスト項目: 保存したバイト列を読み込める（一時ファイルは残らない）
        // given (前提条件):
        let path = unique_path();
        let store = FileSnapshotStore::new(&path);

        // when (操作):
        store.save(b"first").await.unwrap();
        store.save(b"second").await.unwrap();
        let loaded = store.load().await.unwrap();

        // then (期待する結果):
        assert_eq!(loaded.as_deref(), Some(&b"second"[..]));
        assert!(!store.temporary_path().exists());

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails() {
        // テスト項目: 存在しないディレクトリへの保存は I/O エラーになる
        // given (前提条件):
        let path = std::env::temp_dir()
            .join(format!("hekiga-missing-{}", uuid::Uuid::new_v4()))
            .join("canvas.png");
        let store = FileSnapshotStore::new(path);

        // when (操作):
        let result = store.save(b"bytes").await;

        // then (期待する結果):
        assert!(matches!(result, Err(StorageError::Io(_))));
    }
}
