//! Data models for Loam

mod location;
mod note;

pub use location::{LocationKind, StorageLocation};
pub use note::{Note, NoteDraft, NoteId, NotePatch, UNTITLED_TITLE};
