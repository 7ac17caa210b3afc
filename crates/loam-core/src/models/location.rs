//! Storage location configuration model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Classification of a storage location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationKind {
    /// Application-private storage
    #[default]
    Internal,
    /// Removable or shared device storage
    External,
    /// User-selected directory
    Custom,
}

/// The active persistence target, persisted separately from notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageLocation {
    /// Directory the persistence layer writes into
    pub path: PathBuf,
    /// Location classification
    #[serde(rename = "type")]
    pub kind: LocationKind,
    /// When this location was last selected
    pub last_updated: DateTime<Utc>,
    /// Whether `path` is the application-private default
    pub is_default: bool,
}

impl StorageLocation {
    /// The application-private default location
    #[must_use]
    pub fn internal_default(path: PathBuf) -> Self {
        Self {
            path,
            kind: LocationKind::Internal,
            last_updated: Utc::now(),
            is_default: true,
        }
    }

    /// A user-selected location rooted at `path`
    #[must_use]
    pub fn custom(path: PathBuf, kind: LocationKind) -> Self {
        Self {
            path,
            kind,
            last_updated: Utc::now(),
            is_default: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_location_flags() {
        let location = StorageLocation::internal_default(PathBuf::from("/data/loam"));
        assert!(location.is_default);
        assert_eq!(location.kind, LocationKind::Internal);
    }

    #[test]
    fn test_serde_layout() {
        let location = StorageLocation::custom(PathBuf::from("/sdcard/loam"), LocationKind::External);
        let json = serde_json::to_value(&location).unwrap();
        assert_eq!(json["type"], "external");
        assert!(json.get("lastUpdated").is_some());
        assert_eq!(json["isDefault"], false);
    }
}
