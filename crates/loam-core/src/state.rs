//! Application state store
//!
//! In-memory mirror of the note collection with optimistic mutations.
//! Every mutation marks a per-operation key in flight, applies a local
//! transform immediately, then reconciles with the record the repository
//! returns. On failure the store rolls back: create/update/delete reload
//! the collection from the repository (known-good refetch), while a
//! favorite toggle just inverts the flip locally. Errors are kept as a
//! user-visible string; nothing here retries.

use std::collections::HashSet;

use crate::error::Result;
use crate::models::{Note, NoteDraft, NoteId, NotePatch};
use crate::query;
use crate::repo::NoteRepository;

/// One collection entry: either confirmed by persistence or still pending
///
/// A pending entry carries the provisional record shown to the UI until the
/// repository answers, at which point it is replaced wholesale by the
/// committed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteEntry {
    /// Optimistically inserted, awaiting the repository's record
    Pending { temp_id: NoteId, note: Note },
    /// Confirmed by persistence
    Committed(Note),
}

impl NoteEntry {
    /// The note this entry currently presents
    #[must_use]
    pub const fn note(&self) -> &Note {
        match self {
            Self::Pending { note, .. } | Self::Committed(note) => note,
        }
    }

    /// The id this entry is addressed by
    #[must_use]
    pub const fn id(&self) -> NoteId {
        match self {
            Self::Pending { temp_id, .. } => *temp_id,
            Self::Committed(note) => note.id,
        }
    }
}

/// Operation key for note creation
#[must_use]
pub fn create_key() -> String {
    "create".to_string()
}

/// Operation key for updating the given note
#[must_use]
pub fn update_key(id: &NoteId) -> String {
    format!("update-{id}")
}

/// Operation key for deleting the given note
#[must_use]
pub fn delete_key(id: &NoteId) -> String {
    format!("delete-{id}")
}

/// Operation key for toggling the given note's favorite flag
#[must_use]
pub fn favorite_key(id: &NoteId) -> String {
    format!("favorite-{id}")
}

/// Reducer-style store over a [`NoteRepository`]
pub struct NoteStateStore<R> {
    repo: R,
    entries: Vec<NoteEntry>,
    loading: bool,
    last_error: Option<String>,
    in_flight: HashSet<String>,
}

impl<R: NoteRepository> NoteStateStore<R> {
    /// Create an empty store over the given repository
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            entries: Vec::new(),
            loading: false,
            last_error: None,
            in_flight: HashSet::new(),
        }
    }

    /// Reload the whole collection under the global loading flag
    pub async fn refresh(&mut self) -> Result<()> {
        self.loading = true;
        let result = self.repo.list().await;
        self.loading = false;

        match result {
            Ok(notes) => {
                self.entries = notes.into_iter().map(NoteEntry::Committed).collect();
                self.last_error = None;
                Ok(())
            }
            Err(error) => {
                self.last_error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Snapshot of the in-memory collection, pending entries included
    #[must_use]
    pub fn notes(&self) -> Vec<Note> {
        self.entries
            .iter()
            .map(|entry| entry.note().clone())
            .collect()
    }

    /// Whether a full reload is running
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The last mutation error, formatted for display
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the given operation key is in flight
    #[must_use]
    pub fn in_flight(&self, key: &str) -> bool {
        self.in_flight.contains(key)
    }

    /// Create a note, showing a provisional record until persistence confirms
    pub async fn create_note(&mut self, draft: NoteDraft) -> Result<Note> {
        let key = create_key();
        self.in_flight.insert(key.clone());

        let provisional = Note::new(draft.clone());
        let temp_id = provisional.id;
        self.entries.insert(
            0,
            NoteEntry::Pending {
                temp_id,
                note: provisional,
            },
        );

        let result = self.repo.create(draft).await;
        match &result {
            Ok(note) => self.commit_pending(temp_id, note.clone()),
            Err(error) => {
                self.last_error = Some(error.to_string());
                // Drop the provisional entry before refetching so a failed
                // refetch can never leave a never-persisted note visible.
                self.entries.retain(|entry| entry.id() != temp_id);
                self.rollback_by_refetch().await;
            }
        }

        self.in_flight.remove(&key);
        result
    }

    /// Merge a patch over a note, applying it locally before persistence
    pub async fn update_note(&mut self, id: &NoteId, patch: NotePatch) -> Result<Note> {
        let key = update_key(id);
        self.in_flight.insert(key.clone());

        if let Some(entry) = self.entry_mut(id) {
            let mut note = entry.note().clone();
            patch.apply(&mut note);
            note.touch();
            *entry = NoteEntry::Committed(note);
        }

        let result = self.repo.update(id, patch).await;
        match &result {
            Ok(note) => self.replace(id, note.clone()),
            Err(error) => {
                self.last_error = Some(error.to_string());
                self.rollback_by_refetch().await;
            }
        }

        self.in_flight.remove(&key);
        result
    }

    /// Delete a note, removing it locally before persistence confirms
    pub async fn delete_note(&mut self, id: &NoteId) -> Result<()> {
        let key = delete_key(id);
        self.in_flight.insert(key.clone());

        self.entries.retain(|entry| entry.id() != *id);

        let result = self.repo.delete(id).await;
        if let Err(error) = &result {
            self.last_error = Some(error.to_string());
            self.rollback_by_refetch().await;
        }

        self.in_flight.remove(&key);
        result
    }

    /// Toggle a note's favorite flag; rollback is a local inversion
    pub async fn toggle_favorite(&mut self, id: &NoteId) -> Result<Note> {
        let key = favorite_key(id);
        self.in_flight.insert(key.clone());

        self.flip_favorite(id);

        let result = self.repo.toggle_favorite(id).await;
        match &result {
            Ok(note) => self.replace(id, note.clone()),
            Err(error) => {
                self.last_error = Some(error.to_string());
                // The optimistic transform is a bare boolean flip, so
                // inverting it is cheaper than refetching the collection.
                self.flip_favorite(id);
            }
        }

        self.in_flight.remove(&key);
        result
    }

    /// Most recently updated notes, at most `limit`
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<Note> {
        query::recent_notes(&self.notes(), limit)
    }

    /// Favorites in collection order
    #[must_use]
    pub fn favorites(&self) -> Vec<Note> {
        query::favorite_notes(&self.notes())
    }

    /// Search the in-memory mirror without touching the repository
    #[must_use]
    pub fn search(&self, query_text: &str) -> Vec<Note> {
        query::search_notes(&self.notes(), query_text)
    }

    fn entry_mut(&mut self, id: &NoteId) -> Option<&mut NoteEntry> {
        self.entries.iter_mut().find(|entry| entry.id() == *id)
    }

    fn commit_pending(&mut self, temp_id: NoteId, note: Note) {
        self.last_error = None;
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| matches!(entry, NoteEntry::Pending { temp_id: t, .. } if *t == temp_id))
        {
            *entry = NoteEntry::Committed(note);
        }
    }

    fn replace(&mut self, id: &NoteId, note: Note) {
        self.last_error = None;
        if let Some(entry) = self.entry_mut(id) {
            *entry = NoteEntry::Committed(note);
        }
    }

    fn flip_favorite(&mut self, id: &NoteId) {
        if let Some(entry) = self.entry_mut(id) {
            let mut note = entry.note().clone();
            note.is_favorite = !note.is_favorite;
            *entry = NoteEntry::Committed(note);
        }
    }

    /// Restore a known-good collection after a failed mutation.
    ///
    /// When even the refetch fails there is nothing trustworthy to show;
    /// the optimistic state is kept and the refetch failure is logged.
    async fn rollback_by_refetch(&mut self) {
        match self.repo.list().await {
            Ok(notes) => {
                self.entries = notes.into_iter().map(NoteEntry::Committed).collect();
            }
            Err(error) => {
                tracing::warn!(%error, "rollback refetch failed, keeping optimistic state");
            }
        }
    }
}
