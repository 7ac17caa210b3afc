use loam_core::repo::NoteRepository;
use loam_core::NoteDraft;

use crate::commands::common::{normalize_text, Services};
use crate::error::CliError;

pub async fn run_add(
    title: Option<String>,
    content_parts: &[String],
    tags: Vec<String>,
    services: &Services,
) -> Result<(), CliError> {
    let content = normalize_text(content_parts).ok_or(CliError::EmptyContent)?;

    let draft = NoteDraft {
        title: title.unwrap_or_default(),
        content,
        tags,
        ..NoteDraft::default()
    };
    let note = services.repo.create(draft).await?;

    println!("{}", note.id);
    Ok(())
}
