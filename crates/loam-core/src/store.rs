//! Persistence adapter for the note collection
//!
//! The whole collection is one JSON document. It lives under a single
//! key-value key while the default storage location is active, and in a
//! `notes.json` file when the user has picked a custom directory. Backend
//! selection happens on every call, so a location change takes effect on
//! the next read or write without a restart.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::kv::KeyValueStore;
use crate::location::StorageLocationResolver;
use crate::models::Note;

/// Key-value key holding the serialized collection on the default backend
const NOTES_KEY: &str = "notes";

/// File name holding the serialized collection on a custom location
const NOTES_FILE: &str = "notes.json";

/// Trait for loading and saving the full note collection
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Load the persisted collection; empty when nothing is stored
    async fn load(&self) -> Result<Vec<Note>>;

    /// Persist the full collection, replacing whatever was stored
    async fn save(&self, notes: &[Note]) -> Result<()>;
}

/// JSON-document store routed through the storage location resolver
pub struct JsonCollectionStore {
    kv: Arc<dyn KeyValueStore>,
    resolver: Arc<StorageLocationResolver>,
}

impl JsonCollectionStore {
    /// Create a store over the given key-value backend and resolver
    pub fn new(kv: Arc<dyn KeyValueStore>, resolver: Arc<StorageLocationResolver>) -> Self {
        Self { kv, resolver }
    }

    async fn load_from_file(path: &Path) -> Result<Vec<Note>> {
        let file = path.join(NOTES_FILE);
        match tokio::fs::read_to_string(&file).await {
            Ok(raw) => Ok(parse_collection(&raw, &file.display().to_string())),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(error) => Err(error.into()),
        }
    }

    async fn save_to_file(path: &Path, raw: &str) -> Result<()> {
        tokio::fs::create_dir_all(path).await?;
        tokio::fs::write(path.join(NOTES_FILE), raw).await?;
        Ok(())
    }
}

#[async_trait]
impl CollectionStore for JsonCollectionStore {
    async fn load(&self) -> Result<Vec<Note>> {
        let location = self.resolver.current().await?;
        if location.is_default {
            match self.kv.get(NOTES_KEY).await? {
                Some(raw) => Ok(parse_collection(&raw, NOTES_KEY)),
                None => Ok(Vec::new()),
            }
        } else {
            Self::load_from_file(&location.path).await
        }
    }

    async fn save(&self, notes: &[Note]) -> Result<()> {
        let location = self.resolver.current().await?;
        let raw = serde_json::to_string(notes)?;
        if location.is_default {
            self.kv.set(NOTES_KEY, &raw).await
        } else {
            Self::save_to_file(&location.path, &raw).await
        }
    }
}

/// Parse a stored collection, degrading to empty on failure.
///
/// A collection that cannot be parsed reads as empty instead of failing the
/// caller; the parse error is surfaced as a diagnostic so corruption does
/// not go unnoticed.
fn parse_collection(raw: &str, source: &str) -> Vec<Note> {
    match serde_json::from_str(raw) {
        Ok(notes) => notes,
        Err(error) => {
            tracing::warn!(%source, %error, "stored note collection is unreadable, loading empty");
            Vec::new()
        }
    }
}
