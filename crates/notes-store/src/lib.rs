//! notes-store: client-side mirror of the note collection
//!
//! This crate provides:
//! - [`NoteStore`], the ordered in-memory collection for one session
//! - Mutations that apply server-confirmed notes without duplicating ids
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_store::NoteStore;
//!
//! let mut store = NoteStore::new();
//! store.replace_all(client.list_notes().await?);
//!
//! let created = client.create_note(&input).await?;
//! store.add(created);
//! ```

pub mod store;

pub use store::NoteStore;

// Re-export notes-core for downstream crates
pub use notes_core;
