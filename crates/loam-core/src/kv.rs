//! Key-value persistence primitives
//!
//! The default persistence backend and the storage location configuration
//! both live in a small string-to-string store, mirroring the async
//! key-value storage a mobile platform provides.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

use crate::error::Result;

/// Trait for async key-value storage operations
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; a no-op when absent
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Key-value store backed by a single JSON object file
///
/// A missing file reads as an empty store. An unparsable file is reported
/// via `tracing::warn!` and also reads as empty rather than failing the
/// caller.
pub struct JsonFileKv {
    path: PathBuf,
}

impl JsonFileKv {
    /// Create a store backed by the file at `path`
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => Ok(map),
                Err(error) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        %error,
                        "key-value file is unreadable, treating as empty"
                    );
                    Ok(BTreeMap::new())
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(error) => Err(error.into()),
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_string_pretty(map)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
        }
        Ok(())
    }
}

/// In-memory key-value store for tests and previews
#[derive(Default)]
pub struct MemoryKv {
    map: Mutex<BTreeMap<String, String>>,
}

impl MemoryKv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.map.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_kv_roundtrip() {
        let kv = MemoryKv::new();
        assert_eq!(kv.get("a").await.unwrap(), None);

        kv.set("a", "1").await.unwrap();
        assert_eq!(kv.get("a").await.unwrap(), Some("1".to_string()));

        kv.remove("a").await.unwrap();
        assert_eq!(kv.get("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_kv_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let kv = JsonFileKv::new(dir.path().join("kv.json"));

        kv.set("notes", "[]").await.unwrap();
        kv.set("other", "x").await.unwrap();
        assert_eq!(kv.get("notes").await.unwrap(), Some("[]".to_string()));
        assert_eq!(kv.get("other").await.unwrap(), Some("x".to_string()));

        kv.remove("notes").await.unwrap();
        assert_eq!(kv.get("notes").await.unwrap(), None);
        assert_eq!(kv.get("other").await.unwrap(), Some("x".to_string()));
    }

    #[tokio::test]
    async fn test_file_kv_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let kv = JsonFileKv::new(dir.path().join("missing.json"));
        assert_eq!(kv.get("anything").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_kv_corrupt_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kv.json");
        std::fs::write(&path, "not json {").unwrap();

        let kv = JsonFileKv::new(path);
        assert_eq!(kv.get("anything").await.unwrap(), None);
    }
}
