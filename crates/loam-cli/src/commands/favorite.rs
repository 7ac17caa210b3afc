use loam_core::repo::NoteRepository;

use crate::commands::common::{resolve_note, Services};
use crate::error::CliError;

pub async fn run_favorite(id: &str, services: &Services) -> Result<(), CliError> {
    let note = resolve_note(&services.repo, id).await?;
    let toggled = services.repo.toggle_favorite(&note.id).await?;

    if toggled.is_favorite {
        println!("Favorited {}", toggled.id);
    } else {
        println!("Unfavorited {}", toggled.id);
    }
    Ok(())
}
