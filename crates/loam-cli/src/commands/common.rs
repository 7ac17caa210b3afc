use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use loam_core::kv::{JsonFileKv, KeyValueStore};
use loam_core::location::StorageLocationResolver;
use loam_core::repo::NoteRepository;
use loam_core::store::JsonCollectionStore;
use loam_core::{Note, StoreNoteRepository};
use serde::Serialize;

use crate::error::CliError;

/// File name of the key-value document under the data directory
const KV_FILE: &str = "kv.json";

/// Core services wired for one CLI invocation
pub struct Services {
    pub repo: StoreNoteRepository<JsonCollectionStore>,
    pub resolver: Arc<StorageLocationResolver>,
}

impl Services {
    /// Build the service graph under `data_dir`; no I/O happens until use
    #[must_use]
    pub fn open(data_dir: &Path) -> Self {
        let kv: Arc<dyn KeyValueStore> = Arc::new(JsonFileKv::new(data_dir.join(KV_FILE)));
        let resolver = Arc::new(StorageLocationResolver::new(
            Arc::clone(&kv),
            data_dir.join("notes"),
        ));
        let store = JsonCollectionStore::new(kv, Arc::clone(&resolver));
        Self {
            repo: StoreNoteRepository::new(store),
            resolver,
        }
    }
}

/// The data directory: `--data-dir` when given, else the platform default
#[must_use]
pub fn resolve_data_dir(override_dir: Option<PathBuf>) -> PathBuf {
    override_dir.unwrap_or_else(|| {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("loam")
    })
}

/// Join CLI word arguments into note text; `None` when blank
#[must_use]
pub fn normalize_text(parts: &[String]) -> Option<String> {
    let joined = parts.join(" ");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Resolve a note by full id or unique id prefix
pub async fn resolve_note(
    repo: &impl NoteRepository,
    query: &str,
) -> Result<Note, CliError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(CliError::EmptyNoteId);
    }

    if let Ok(id) = query.parse() {
        if let Some(note) = repo.get(&id).await? {
            return Ok(note);
        }
    }

    let notes = repo.list().await?;
    let matches: Vec<&Note> = notes
        .iter()
        .filter(|note| note.id.as_str().starts_with(query))
        .collect();

    match matches.as_slice() {
        [] => Err(CliError::NoteNotFound(query.to_string())),
        [note] => Ok((*note).clone()),
        many => {
            let options = many
                .iter()
                .take(3)
                .map(|note| note.id.as_str().chars().take(13).collect::<String>())
                .collect::<Vec<_>>()
                .join(", ");
            Err(CliError::AmbiguousNoteId(format!(
                "Ambiguous note id prefix '{query}', candidates: {options}"
            )))
        }
    }
}

/// Serializable list entry for `--json` output
#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub is_favorite: bool,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    pub relative_time: String,
}

/// Convert a note into a list entry
#[must_use]
pub fn to_list_item(note: &Note) -> NoteListItem {
    NoteListItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        preview: note_preview(note, 60),
        is_favorite: note.is_favorite,
        tags: note.tags.clone(),
        created_at: note.created_at.to_rfc3339(),
        updated_at: note.updated_at.to_rfc3339(),
        relative_time: format_relative_time(note.updated_at),
    }
}

/// First content line, truncated to `max_len` characters
#[must_use]
pub fn note_preview(note: &Note, max_len: usize) -> String {
    note.content
        .lines()
        .next()
        .unwrap_or("")
        .chars()
        .take(max_len)
        .collect()
}

/// Compact "how long ago" formatting for list output
#[must_use]
pub fn format_relative_time(timestamp: DateTime<Utc>) -> String {
    let elapsed = Utc::now().signed_duration_since(timestamp);
    let seconds = elapsed.num_seconds();

    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86_400 {
        format!("{}h ago", seconds / 3600)
    } else if seconds < 7 * 86_400 {
        format!("{}d ago", seconds / 86_400)
    } else {
        timestamp.format("%Y-%m-%d").to_string()
    }
}

/// Print notes either as human-readable lines or a JSON array
pub fn print_notes(notes: &[Note], json: bool) -> Result<(), CliError> {
    if json {
        let items: Vec<NoteListItem> = notes.iter().map(to_list_item).collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if notes.is_empty() {
        println!("No notes.");
        return Ok(());
    }

    for note in notes {
        let item = to_list_item(note);
        let short_id: String = item.id.chars().take(8).collect();
        let star = if item.is_favorite { "* " } else { "" };
        let attachments =
            note.images.len() + note.audio_recordings.len() + note.videos.len();
        let clip = if attachments > 0 {
            format!(" [{attachments} attachment(s)]")
        } else {
            String::new()
        };
        println!("{short_id}  {star}{}{clip}  ({})", item.title, item.relative_time);
        if !item.preview.is_empty() {
            println!("          {}", item.preview);
        }
    }
    Ok(())
}
