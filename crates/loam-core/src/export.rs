//! Shared note export helpers for client parity.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::models::Note;

/// Export output format shared by all clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Serializable note representation used in JSON and Markdown exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNote {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
    pub is_favorite: bool,
    pub tags: Vec<String>,
    pub attachments: usize,
}

/// Convert a note into an export record with stable tag ordering.
#[must_use]
pub fn note_to_export_item(note: &Note) -> ExportNote {
    let mut tags = note.tags.clone();
    tags.sort();

    ExportNote {
        id: note.id.to_string(),
        title: note.title.clone(),
        content: note.content.clone(),
        created_at: note.created_at.to_rfc3339(),
        updated_at: note.updated_at.to_rfc3339(),
        is_favorite: note.is_favorite,
        tags,
        attachments: note.images.len() + note.audio_recordings.len() + note.videos.len(),
    }
}

/// Render notes as pretty-printed JSON.
pub fn render_json_export(notes: &[Note]) -> serde_json::Result<String> {
    let items = notes
        .iter()
        .map(note_to_export_item)
        .collect::<Vec<ExportNote>>();
    serde_json::to_string_pretty(&items)
}

/// Render notes in Markdown with frontmatter blocks.
#[must_use]
pub fn render_markdown_export(notes: &[Note]) -> String {
    let mut output = String::new();

    for (index, note) in notes.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let export_note = note_to_export_item(note);
        let _ = writeln!(output, "---");
        let _ = writeln!(output, "id: {}", export_note.id);
        let _ = writeln!(output, "created_at: {}", export_note.created_at);
        let _ = writeln!(output, "updated_at: {}", export_note.updated_at);
        let _ = writeln!(output, "favorite: {}", export_note.is_favorite);
        let _ = writeln!(output, "tags:");
        for tag in &export_note.tags {
            let _ = writeln!(output, "  - {tag}");
        }
        let _ = writeln!(output, "---");
        let _ = writeln!(output);
        let _ = writeln!(output, "# {}", export_note.title);
        let _ = writeln!(output);
        output.push_str(&export_note.content);
        output.push('\n');
    }

    output
}

/// Render notes based on selected export format.
pub fn render_notes_export(notes: &[Note], format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(notes),
        ExportFormat::Markdown => Ok(render_markdown_export(notes)),
    }
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("loam-export-{timestamp_ms}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteDraft;

    #[test]
    fn test_export_item_sorts_tags_and_counts_attachments() {
        let mut note = Note::new(NoteDraft::text("T", "c"));
        note.tags = vec!["zeta".to_string(), "alpha".to_string()];
        note.images = vec!["file:///a.png".to_string()];
        note.videos = vec!["file:///b.mp4".to_string()];

        let export = note_to_export_item(&note);
        assert_eq!(export.tags, vec!["alpha", "zeta"]);
        assert_eq!(export.attachments, 2);
    }

    #[test]
    fn test_markdown_export_has_frontmatter() {
        let note = Note::new(NoteDraft::text("Title", "the body"));
        let markdown = render_markdown_export(&[note]);

        assert!(markdown.starts_with("---\n"));
        assert!(markdown.contains("# Title"));
        assert!(markdown.contains("the body"));
    }

    #[test]
    fn test_json_export_parses_back() {
        let notes = vec![Note::new(NoteDraft::text("A", "a"))];
        let rendered = render_json_export(&notes).unwrap();
        let parsed: Vec<ExportNote> = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "A");
    }

    #[test]
    fn test_suggested_file_name() {
        assert_eq!(
            suggested_export_file_name(ExportFormat::Markdown, 42),
            "loam-export-42.md"
        );
    }
}
