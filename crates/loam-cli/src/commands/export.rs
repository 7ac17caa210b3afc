use std::path::Path;

use loam_core::export::{render_notes_export, ExportFormat};
use loam_core::repo::NoteRepository;

use crate::commands::common::Services;
use crate::error::CliError;

pub async fn run_export(
    format: ExportFormat,
    output: Option<&Path>,
    services: &Services,
) -> Result<(), CliError> {
    let notes = services.repo.list().await?;
    let rendered = render_notes_export(&notes, format)?;

    match output {
        Some(path) => {
            tokio::fs::write(path, rendered).await?;
            println!("Exported {} note(s) to {}", notes.len(), path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
