use loam_core::query;
use loam_core::repo::NoteRepository;
use loam_core::Note;

use crate::commands::common::{print_notes, Services};
use crate::error::CliError;

pub async fn run_list(
    limit: usize,
    favorites: bool,
    json: bool,
    services: &Services,
) -> Result<(), CliError> {
    let notes = services.repo.list().await?;
    let notes = select_notes(&notes, limit, favorites);

    print_notes(&notes, json)
}

/// Recency-ordered view of the collection, optionally favorites only.
///
/// Persisted order is creation order; listing goes by `updated_at` so an
/// edited old note surfaces at the top.
#[must_use]
pub fn select_notes(notes: &[Note], limit: usize, favorites: bool) -> Vec<Note> {
    if favorites {
        query::recent_notes(&query::favorite_notes(notes), limit)
    } else {
        query::recent_notes(notes, limit)
    }
}
