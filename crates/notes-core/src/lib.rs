//! notes-core: shared types for the notes client
//!
//! This crate provides:
//! - The [`Note`] entity and its server-assigned [`NoteId`]
//! - [`NoteInput`], the title/content pair submitted on create and update
//! - Authentication payloads ([`Credentials`], [`AuthResponse`], [`User`])

pub mod types;

pub use types::{
    AuthResponse, Credentials, Note, NoteId, NoteIdParseError, NoteInput, NoteInputError, User,
};
