//! Note repository
//!
//! CRUD over the persisted collection. Every mutation is a full-collection
//! read-modify-write: the backend stores one JSON document, so write cost
//! is bounded by total collection size. Overlapping mutations race with
//! last-write-wins semantics at the persistence layer (see DESIGN.md).

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::{Note, NoteDraft, NoteId, NotePatch};
use crate::store::CollectionStore;

/// Trait for note storage operations
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// All notes in persisted order (newest first)
    async fn list(&self) -> Result<Vec<Note>>;

    /// Get a note by ID
    async fn get(&self, id: &NoteId) -> Result<Option<Note>>;

    /// Create a new note from a draft
    async fn create(&self, draft: NoteDraft) -> Result<Note>;

    /// Merge a patch over an existing note
    async fn update(&self, id: &NoteId, patch: NotePatch) -> Result<Note>;

    /// Remove a note; a no-op when the id is absent
    async fn delete(&self, id: &NoteId) -> Result<()>;

    /// Flip a note's favorite flag
    async fn toggle_favorite(&self, id: &NoteId) -> Result<Note>;

    /// Case-insensitive substring search over title, content, and tags
    async fn search(&self, query: &str) -> Result<Vec<Note>>;
}

/// Repository over a [`CollectionStore`] backend
pub struct StoreNoteRepository<S> {
    store: S,
}

impl<S: CollectionStore> StoreNoteRepository<S> {
    /// Create a repository over the given collection store
    pub const fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: CollectionStore> NoteRepository for StoreNoteRepository<S> {
    async fn list(&self) -> Result<Vec<Note>> {
        self.store.load().await
    }

    async fn get(&self, id: &NoteId) -> Result<Option<Note>> {
        let notes = self.store.load().await?;
        Ok(notes.into_iter().find(|note| note.id == *id))
    }

    async fn create(&self, draft: NoteDraft) -> Result<Note> {
        let note = Note::new(draft);

        let mut notes = self.store.load().await?;
        notes.insert(0, note.clone());
        self.store.save(&notes).await?;

        tracing::debug!(id = %note.id, "created note");
        Ok(note)
    }

    async fn update(&self, id: &NoteId, patch: NotePatch) -> Result<Note> {
        let mut notes = self.store.load().await?;
        let note = notes
            .iter_mut()
            .find(|note| note.id == *id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        patch.apply(note);
        note.touch();
        let updated = note.clone();

        self.store.save(&notes).await?;
        Ok(updated)
    }

    async fn delete(&self, id: &NoteId) -> Result<()> {
        let mut notes = self.store.load().await?;
        let before = notes.len();
        notes.retain(|note| note.id != *id);

        if notes.len() == before {
            tracing::debug!(%id, "delete of absent note, nothing to do");
            return Ok(());
        }

        self.store.save(&notes).await
    }

    async fn toggle_favorite(&self, id: &NoteId) -> Result<Note> {
        let mut notes = self.store.load().await?;
        let note = notes
            .iter_mut()
            .find(|note| note.id == *id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        note.is_favorite = !note.is_favorite;
        note.touch();
        let updated = note.clone();

        self.store.save(&notes).await?;
        Ok(updated)
    }

    async fn search(&self, query: &str) -> Result<Vec<Note>> {
        let notes = self.store.load().await?;
        Ok(notes
            .into_iter()
            .filter(|note| note.matches(query))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{KeyValueStore, MemoryKv};
    use crate::location::StorageLocationResolver;
    use crate::models::UNTITLED_TITLE;
    use crate::store::JsonCollectionStore;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn setup(dir: &std::path::Path) -> StoreNoteRepository<JsonCollectionStore> {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryKv::new());
        let resolver = Arc::new(StorageLocationResolver::new(
            Arc::clone(&kv),
            dir.to_path_buf(),
        ));
        StoreNoteRepository::new(JsonCollectionStore::new(kv, resolver))
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let dir = tempfile::tempdir().unwrap();
        let repo = setup(dir.path());

        let note = repo
            .create(NoteDraft::text("Hello", "world"))
            .await
            .unwrap();
        assert_eq!(note.title, "Hello");

        let fetched = repo.get(&note.id).await.unwrap().unwrap();
        assert_eq!(fetched, note);
    }

    #[tokio::test]
    async fn test_create_defaults_blank_title() {
        let dir = tempfile::tempdir().unwrap();
        let repo = setup(dir.path());

        let note = repo.create(NoteDraft::text("", "body")).await.unwrap();
        assert_eq!(note.title, UNTITLED_TITLE);
    }

    #[tokio::test]
    async fn test_create_ids_are_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let repo = setup(dir.path());

        let mut ids = Vec::new();
        for n in 0..5 {
            let note = repo
                .create(NoteDraft::text(format!("Note {n}"), ""))
                .await
                .unwrap();
            ids.push(note.id);
        }
        ids.sort_by_key(NoteId::as_str);
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let repo = setup(dir.path());

        repo.create(NoteDraft::text("First", "")).await.unwrap();
        repo.create(NoteDraft::text("Second", "")).await.unwrap();
        repo.create(NoteDraft::text("Third", "")).await.unwrap();

        let notes = repo.list().await.unwrap();
        let titles: Vec<&str> = notes.iter().map(|note| note.title.as_str()).collect();
        assert_eq!(titles, vec!["Third", "Second", "First"]);
    }

    #[tokio::test]
    async fn test_update_merges_and_touches() {
        let dir = tempfile::tempdir().unwrap();
        let repo = setup(dir.path());

        let note = repo
            .create(NoteDraft::text("Original", "body"))
            .await
            .unwrap();
        let patch = NotePatch {
            content: Some("edited".to_string()),
            ..NotePatch::default()
        };
        let updated = repo.update(&note.id, patch).await.unwrap();

        assert_eq!(updated.title, "Original");
        assert_eq!(updated.content, "edited");
        assert!(updated.updated_at >= note.updated_at);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = setup(dir.path());

        let result = repo.update(&NoteId::new(), NotePatch::default()).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_twice_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let repo = setup(dir.path());

        let keep = repo.create(NoteDraft::text("Keep", "")).await.unwrap();
        let gone = repo.create(NoteDraft::text("Gone", "")).await.unwrap();

        repo.delete(&gone.id).await.unwrap();
        let after_first = repo.list().await.unwrap();
        assert_eq!(after_first.len(), 1);
        assert_eq!(after_first[0].id, keep.id);

        // Second delete neither errors nor changes the collection.
        repo.delete(&gone.id).await.unwrap();
        assert_eq!(repo.list().await.unwrap(), after_first);
    }

    #[tokio::test]
    async fn test_toggle_favorite_flips_and_touches() {
        let dir = tempfile::tempdir().unwrap();
        let repo = setup(dir.path());

        let note = repo.create(NoteDraft::text("Fav", "")).await.unwrap();
        let toggled = repo.toggle_favorite(&note.id).await.unwrap();
        assert!(toggled.is_favorite);
        assert!(toggled.updated_at >= note.updated_at);

        let toggled = repo.toggle_favorite(&note.id).await.unwrap();
        assert!(!toggled.is_favorite);

        let missing = repo.toggle_favorite(&NoteId::new()).await;
        assert!(matches!(missing, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_search_over_title_content_tags() {
        let dir = tempfile::tempdir().unwrap();
        let repo = setup(dir.path());

        repo.create(NoteDraft::text("ABC", "")).await.unwrap();
        repo.create(NoteDraft::text("xyz", "has abc inside"))
            .await
            .unwrap();
        repo.create(NoteDraft::text("none", "")).await.unwrap();
        repo.create(NoteDraft {
            title: "tagged".to_string(),
            tags: vec!["abcdef".to_string()],
            ..NoteDraft::default()
        })
        .await
        .unwrap();

        let results = repo.search("abc").await.unwrap();
        let titles: Vec<&str> = results.iter().map(|note| note.title.as_str()).collect();
        assert_eq!(titles, vec!["tagged", "xyz", "ABC"]);
    }
}
