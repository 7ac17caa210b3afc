use loam_core::repo::NoteRepository;
use loam_core::NotePatch;

use crate::commands::common::{resolve_note, Services};
use crate::error::CliError;

pub async fn run_edit(
    id: &str,
    title: Option<String>,
    content: Option<String>,
    tags: Option<Vec<String>>,
    services: &Services,
) -> Result<(), CliError> {
    if title.is_none() && content.is_none() && tags.is_none() {
        return Err(CliError::EmptyEdit);
    }

    let note = resolve_note(&services.repo, id).await?;
    let patch = NotePatch {
        title,
        content,
        tags,
        ..NotePatch::default()
    };
    let updated = services.repo.update(&note.id, patch).await?;

    println!("Updated {}", updated.id);
    Ok(())
}
