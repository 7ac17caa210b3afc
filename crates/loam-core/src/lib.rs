//! loam-core - Core library for Loam
//!
//! This crate contains the shared models, persistence layer, and note state
//! management used by all Loam clients. Notes (text plus attached media
//! URIs) persist as a single JSON document, either under a key-value key in
//! the app-private default location or as a file in a user-selected
//! directory.

pub mod error;
pub mod export;
pub mod kv;
pub mod location;
pub mod models;
pub mod query;
pub mod repo;
pub mod state;
pub mod store;

pub use error::{Error, Result};
pub use models::{LocationKind, Note, NoteDraft, NoteId, NotePatch, StorageLocation};
pub use repo::{NoteRepository, StoreNoteRepository};
pub use state::NoteStateStore;
