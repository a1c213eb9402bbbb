//! notes-client: data-synchronization layer for the notes API
//!
//! This crate provides:
//! - [`HttpClient`], an authenticated JSON client for the notes endpoints
//! - [`CredentialStore`], the injected slot holding the bearer token
//! - [`Session`], the owned context that keeps a [`NoteStore`] in step with
//!   confirmed server responses and logs out on authentication failures
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use notes_client::{ClientConfig, FileCredentialStore, HttpClient, Session};
//!
//! let config = ClientConfig::from_env()?;
//! let credentials = Arc::new(FileCredentialStore::new(config.token_path()?));
//! let mut session = Session::new(HttpClient::new(&config, credentials)?);
//!
//! session.login("me@example.com", "secret").await?;
//! for note in session.load_notes().await? {
//!     println!("{}", note.title);
//! }
//! ```

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod session;

pub use client::HttpClient;
pub use config::{ClientConfig, ConfigError};
pub use credentials::{CredentialError, CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use error::{ApiErrorKind, ClientError, ClientResult};
pub use session::{Session, SessionError, SessionResult};

// Re-export dependent crates
pub use notes_core;
pub use notes_store::{self, NoteStore};
