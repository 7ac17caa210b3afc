//! Note model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Title assigned when a note is saved with a blank title.
pub const UNTITLED_TITLE: &str = "Untitled Note";

/// A unique identifier for a note, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Create a new unique note ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A note in the system
///
/// Serialized with camelCase field names to match the persisted
/// collection layout (`isFavorite`, `audioRecordings`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Display title; never persisted blank
    pub title: String,
    /// Plain text content
    pub content: String,
    /// URIs of attached images, in attachment order
    #[serde(default)]
    pub images: Vec<String>,
    /// URIs of attached audio recordings, in attachment order
    #[serde(default)]
    pub audio_recordings: Vec<String>,
    /// URIs of attached videos, in attachment order
    #[serde(default)]
    pub videos: Vec<String>,
    /// Favorite flag
    #[serde(default)]
    pub is_favorite: bool,
    /// Tags in display order; matching ignores order
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation timestamp, fixed at creation
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp, never before `created_at`
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a new note from a draft, assigning id and timestamps
    #[must_use]
    pub fn new(draft: NoteDraft) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::new(),
            title: normalize_title(draft.title),
            content: draft.content,
            images: draft.images,
            audio_recordings: draft.audio_recordings,
            videos: draft.videos,
            is_favorite: false,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`, clamped so it never moves backwards
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }

    /// Case-insensitive substring match over title, content, and tags
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self.content.to_lowercase().contains(&needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle))
    }
}

/// Replace a blank title with the untitled placeholder
#[must_use]
pub fn normalize_title(title: String) -> String {
    if title.trim().is_empty() {
        UNTITLED_TITLE.to_string()
    } else {
        title
    }
}

/// Input for creating a note; id and timestamps are assigned by the repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub images: Vec<String>,
    pub audio_recordings: Vec<String>,
    pub videos: Vec<String>,
    pub tags: Vec<String>,
}

impl NoteDraft {
    /// Convenience constructor for plain text notes
    #[must_use]
    pub fn text(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }
}

/// Partial update merged over an existing note; `None` fields are untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub images: Option<Vec<String>>,
    pub audio_recordings: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub is_favorite: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl NotePatch {
    /// Merge this patch over `note`, normalizing the title
    pub fn apply(&self, note: &mut Note) {
        if let Some(title) = &self.title {
            note.title = normalize_title(title.clone());
        }
        if let Some(content) = &self.content {
            note.content = content.clone();
        }
        if let Some(images) = &self.images {
            note.images = images.clone();
        }
        if let Some(audio) = &self.audio_recordings {
            note.audio_recordings = audio.clone();
        }
        if let Some(videos) = &self.videos {
            note.videos = videos.clone();
        }
        if let Some(favorite) = self.is_favorite {
            note.is_favorite = favorite;
        }
        if let Some(tags) = &self.tags {
            note.tags = tags.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_id_unique() {
        let id1 = NoteId::new();
        let id2 = NoteId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_note_id_parse() {
        let id = NoteId::new();
        let parsed: NoteId = id.as_str().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_note_new() {
        let note = Note::new(NoteDraft::text("Groceries", "milk, eggs"));
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk, eggs");
        assert!(!note.is_favorite);
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn test_blank_title_defaults() {
        let note = Note::new(NoteDraft::text("   ", "body"));
        assert_eq!(note.title, UNTITLED_TITLE);
    }

    #[test]
    fn test_touch_never_moves_backwards() {
        let mut note = Note::new(NoteDraft::default());
        let before = note.updated_at;
        note.touch();
        assert!(note.updated_at >= before);
        assert!(note.updated_at >= note.created_at);
    }

    #[test]
    fn test_matches_title_content_tags() {
        let mut note = Note::new(NoteDraft::text("ABC", "nothing here"));
        note.tags = vec!["Travel".to_string()];

        assert!(note.matches("abc"));
        assert!(note.matches("nothing"));
        assert!(note.matches("travel"));
        assert!(note.matches("TRAVEL"));
        assert!(!note.matches("xyz"));
    }

    #[test]
    fn test_patch_merges_selected_fields() {
        let mut note = Note::new(NoteDraft::text("Old", "old body"));
        let patch = NotePatch {
            content: Some("new body".to_string()),
            is_favorite: Some(true),
            ..NotePatch::default()
        };
        patch.apply(&mut note);

        assert_eq!(note.title, "Old");
        assert_eq!(note.content, "new body");
        assert!(note.is_favorite);
    }

    #[test]
    fn test_patch_blank_title_defaults() {
        let mut note = Note::new(NoteDraft::text("Old", ""));
        let patch = NotePatch {
            title: Some("  ".to_string()),
            ..NotePatch::default()
        };
        patch.apply(&mut note);
        assert_eq!(note.title, UNTITLED_TITLE);
    }

    #[test]
    fn test_serde_camel_case_layout() {
        let note = Note::new(NoteDraft::text("T", "c"));
        let json = serde_json::to_value(&note).unwrap();
        assert!(json.get("isFavorite").is_some());
        assert!(json.get("audioRecordings").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
