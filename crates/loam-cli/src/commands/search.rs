use loam_core::repo::NoteRepository;

use crate::commands::common::{print_notes, Services};
use crate::error::CliError;

pub async fn run_search(
    query: &str,
    limit: usize,
    json: bool,
    services: &Services,
) -> Result<(), CliError> {
    if query.trim().is_empty() {
        return Err(CliError::EmptySearchQuery);
    }

    let mut notes = services.repo.search(query.trim()).await?;
    notes.truncate(limit);

    print_notes(&notes, json)
}
