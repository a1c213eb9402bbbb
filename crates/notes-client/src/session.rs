//! Session controller pairing the HTTP client with the note store.
//!
//! A [`Session`] is the single owned context a front end holds for the
//! lifetime of a login. It performs each operation against the server and,
//! only once the server confirms it, applies the returned note to its
//! [`NoteStore`].
//!
//! # Failure policy
//!
//! Failures classified as authentication failures end the session: the
//! stored token is cleared, the note store is emptied, and the caller gets
//! [`SessionError::SessionEnded`]. Every other failure is returned as
//! [`SessionError::Client`] and leaves all state untouched.

use std::sync::Arc;

use notes_core::{AuthResponse, Note, NoteId, NoteInput, NoteInputError, User};
use notes_store::NoteStore;
use thiserror::Error;

use crate::client::HttpClient;
use crate::credentials::{CredentialError, CredentialStore};
use crate::error::ClientError;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors returned by [`Session`] operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The server rejected the credential; the session has been logged out.
    #[error("session ended: {0}")]
    SessionEnded(#[source] ClientError),

    /// Any other client failure. Session state is unchanged.
    #[error(transparent)]
    Client(ClientError),

    /// The note input was rejected before any request was sent.
    #[error("invalid note: {0}")]
    InvalidInput(#[from] NoteInputError),

    /// The token returned by login or signup could not be stored.
    #[error("credential storage error: {0}")]
    Credential(#[from] CredentialError),
}

impl SessionError {
    /// Whether the session was logged out as a result of this error.
    pub fn is_session_ended(&self) -> bool {
        matches!(self, Self::SessionEnded(_))
    }

    /// The underlying client error, if any.
    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::SessionEnded(e) | Self::Client(e) => Some(e),
            _ => None,
        }
    }
}

/// An authenticated (or not yet authenticated) notes session.
#[derive(Debug)]
pub struct Session {
    client: HttpClient,
    credentials: Arc<dyn CredentialStore>,
    notes: NoteStore,
    user: Option<User>,
}

impl Session {
    /// Start a session with an empty note store.
    ///
    /// The token slot is the one the client reads from.
    pub fn new(client: HttpClient) -> Self {
        Self::with_store(client, NoteStore::new())
    }

    /// Start a session over an existing note collection.
    pub fn with_store(client: HttpClient, notes: NoteStore) -> Self {
        let credentials = Arc::clone(client.credentials());
        Self {
            client,
            credentials,
            notes,
            user: None,
        }
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// The session's note collection.
    pub fn store(&self) -> &NoteStore {
        &self.notes
    }

    /// Notes in display order.
    pub fn notes(&self) -> &[Note] {
        self.notes.notes()
    }

    /// The user reported by the last signup or login, if the server sent one.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether a token is currently stored.
    ///
    /// A stored token may still be rejected by the server.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.credentials.get(), Ok(Some(_)))
    }

    // ========================================================================
    // Authentication
    // ========================================================================

    /// Register a new account and store the returned token.
    pub async fn signup(&mut self, email: &str, password: &str) -> SessionResult<AuthResponse> {
        let response = self
            .client
            .signup(email, password)
            .await
            .map_err(SessionError::Client)?;
        self.begin(&response)?;
        Ok(response)
    }

    /// Log in and store the returned token.
    ///
    /// A rejected login is returned as [`SessionError::Client`]; there is no
    /// session to end yet.
    pub async fn login(&mut self, email: &str, password: &str) -> SessionResult<AuthResponse> {
        let response = self
            .client
            .login(email, password)
            .await
            .map_err(SessionError::Client)?;
        self.begin(&response)?;
        Ok(response)
    }

    fn begin(&mut self, response: &AuthResponse) -> SessionResult<()> {
        self.credentials.set(&response.token)?;
        self.notes.clear();
        self.user = response.user.clone();

        match &self.user {
            Some(user) => tracing::info!(email = %user.email, "Session started"),
            None => tracing::info!("Session started"),
        }
        Ok(())
    }

    /// Clear the stored token, the note store and the user.
    ///
    /// The note store and user are cleared even when the token cannot be
    /// removed. That failure is returned as [`SessionError::Credential`]; the
    /// token is then still stored and will be sent by the next request.
    pub fn logout(&mut self) -> SessionResult<()> {
        let cleared = self.credentials.clear();
        self.notes.clear();
        self.user = None;

        match cleared {
            Ok(()) => {
                tracing::info!("Session ended");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Session ended but the stored credential could not be cleared");
                Err(e.into())
            }
        }
    }

    // ========================================================================
    // Notes
    // ========================================================================

    /// Fetch every note and replace the store's contents with them.
    pub async fn load_notes(&mut self) -> SessionResult<&[Note]> {
        match self.client.list_notes().await {
            Ok(notes) => {
                tracing::debug!(count = notes.len(), "Loaded notes");
                self.notes.replace_all(notes);
                Ok(self.notes.notes())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Fetch one note. If the store holds it, the stored copy is refreshed.
    pub async fn fetch_note(&mut self, id: &NoteId) -> SessionResult<Note> {
        match self.client.get_note(id).await {
            Ok(note) => {
                self.notes.update(note.clone());
                Ok(note)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Create a note and put the server's copy at the front of the store.
    pub async fn create_note(&mut self, input: &NoteInput) -> SessionResult<Note> {
        input.validate()?;

        match self.client.create_note(input).await {
            Ok(note) => {
                tracing::debug!(id = %note.id, "Created note");
                self.notes.add(note.clone());
                Ok(note)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Update a note and replace the stored copy with the server's.
    ///
    /// If the store does not hold the note, the store is left as is.
    pub async fn update_note(&mut self, id: &NoteId, input: &NoteInput) -> SessionResult<Note> {
        input.validate()?;

        match self.client.update_note(id, input).await {
            Ok(note) => {
                if !self.notes.update(note.clone()) {
                    tracing::debug!(id = %note.id, "Updated note is not in the local store");
                }
                Ok(note)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Create a new note, or update `editing` if given.
    pub async fn save_note(
        &mut self,
        editing: Option<&NoteId>,
        input: &NoteInput,
    ) -> SessionResult<Note> {
        match editing {
            Some(id) => self.update_note(id, input).await,
            None => self.create_note(input).await,
        }
    }

    /// Delete a note and drop it from the store.
    ///
    /// Callers are expected to have confirmed the deletion with the user.
    pub async fn delete_note(&mut self, id: &NoteId) -> SessionResult<()> {
        match self.client.delete_note(id).await {
            Ok(()) => {
                self.notes.remove(id);
                tracing::debug!(%id, "Deleted note");
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Apply the failure policy to a client error.
    ///
    /// An authentication failure still yields `SessionEnded` when the token
    /// cannot be cleared; the clear failure is logged at error level and
    /// [`Session::is_authenticated`] keeps reporting the stale token.
    fn fail(&mut self, err: ClientError) -> SessionError {
        if err.is_auth_failure() {
            tracing::warn!(error = %err, "Authentication failed; logging out");
            // logout() logs the clear failure itself
            let _ = self.logout();
            SessionError::SessionEnded(err)
        } else {
            SessionError::Client(err)
        }
    }
}
