//! Storage location resolution
//!
//! Resolves which directory the persistence layer targets. The active
//! location is lazily initialized from a persisted configuration document
//! and falls back to the application-private default whenever that
//! configuration is missing, unreadable, or no longer writable.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::kv::KeyValueStore;
use crate::models::{LocationKind, StorageLocation};

/// Key-value key holding the serialized `StorageLocation` document
const LOCATION_KEY: &str = "storage-location";

/// Resolves and validates the active storage location
pub struct StorageLocationResolver {
    kv: Arc<dyn KeyValueStore>,
    default_dir: PathBuf,
    active: RwLock<Option<StorageLocation>>,
}

impl StorageLocationResolver {
    /// Create a resolver with the given configuration store and default directory
    pub fn new(kv: Arc<dyn KeyValueStore>, default_dir: PathBuf) -> Self {
        Self {
            kv,
            default_dir,
            active: RwLock::new(None),
        }
    }

    /// The application-private default location
    #[must_use]
    pub fn default_location(&self) -> StorageLocation {
        StorageLocation::internal_default(self.default_dir.clone())
    }

    /// Return the active location, initializing it from persisted
    /// configuration on first call. Idempotent afterwards.
    pub async fn current(&self) -> Result<StorageLocation> {
        if let Some(location) = self.active.read().await.clone() {
            return Ok(location);
        }

        let mut active = self.active.write().await;
        // Another caller may have initialized while we waited for the lock.
        if let Some(location) = active.clone() {
            return Ok(location);
        }

        let location = self.load_configured().await;
        *active = Some(location.clone());
        Ok(location)
    }

    /// Activate `path` as the storage location.
    ///
    /// Fails with `InvalidLocation` unless the path exists (or can be
    /// created) and a write probe succeeds. The configuration is persisted
    /// before the active location is swapped, so a persistence failure
    /// leaves the previous location in effect.
    pub async fn set_location(&self, path: &Path, kind: LocationKind) -> Result<StorageLocation> {
        if !validate(path).await {
            return Err(Error::InvalidLocation(path.display().to_string()));
        }

        let location = if path == self.default_dir {
            self.default_location()
        } else {
            StorageLocation::custom(path.to_path_buf(), kind)
        };

        let raw = serde_json::to_string(&location)?;
        self.kv.set(LOCATION_KEY, &raw).await?;

        *self.active.write().await = Some(location.clone());
        Ok(location)
    }

    /// Clear the persisted configuration and revert to the default directory
    pub async fn reset_to_default(&self) -> Result<StorageLocation> {
        self.kv.remove(LOCATION_KEY).await?;
        let location = self.default_location();
        *self.active.write().await = Some(location.clone());
        Ok(location)
    }

    async fn load_configured(&self) -> StorageLocation {
        let raw = match self.kv.get(LOCATION_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return self.default_location(),
            Err(error) => {
                tracing::warn!(%error, "failed to read storage location config, using default");
                return self.default_location();
            }
        };

        let location: StorageLocation = match serde_json::from_str(&raw) {
            Ok(location) => location,
            Err(error) => {
                tracing::warn!(%error, "storage location config is unreadable, using default");
                return self.default_location();
            }
        };

        if validate(&location.path).await {
            location
        } else {
            tracing::warn!(
                path = %location.path.display(),
                "configured storage location is no longer writable, using default"
            );
            self.default_location()
        }
    }
}

/// Check that `path` exists (or can be created) and is writable.
///
/// The write probe creates and deletes a uniquely named marker file; any
/// failure along the way reports `false` rather than an error.
pub async fn validate(path: &Path) -> bool {
    if !path.exists() && tokio::fs::create_dir_all(path).await.is_err() {
        return false;
    }

    let probe = path.join(format!(".loam-probe-{}", Uuid::now_v7()));
    if tokio::fs::write(&probe, b"probe").await.is_err() {
        return false;
    }
    tokio::fs::remove_file(&probe).await.is_ok()
}
