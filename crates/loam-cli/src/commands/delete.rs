use loam_core::repo::NoteRepository;

use crate::commands::common::{resolve_note, Services};
use crate::error::CliError;

pub async fn run_delete(id: &str, services: &Services) -> Result<(), CliError> {
    let note = resolve_note(&services.repo, id).await?;
    services.repo.delete(&note.id).await?;

    println!("Deleted {}", note.id);
    Ok(())
}
