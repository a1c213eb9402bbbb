//! Core data types for the notes service.
//!
//! This module defines the types exchanged with the notes API:
//!
//! - A note is owned by the server; the client only holds a cached copy
//! - Identifiers and timestamps are always server-assigned
//! - The client submits a [`NoteInput`] and receives a full [`Note`] back
//!
//! All wire types use camelCase field names to match the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ID Types
// ============================================================================

/// Server-assigned identifier of a note.
///
/// The server treats ids as opaque strings, so no format is assumed beyond
/// being non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Wraps an identifier returned by the server.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NoteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for NoteId {
    type Err = NoteIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(NoteIdParseError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Error type for parsing a NoteId from user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteIdParseError {
    /// The identifier was empty or whitespace only.
    Empty,
}

impl fmt::Display for NoteIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "note id must not be empty"),
        }
    }
}

impl std::error::Error for NoteIdParseError {}

// ============================================================================
// Notes
// ============================================================================

/// A titled block of text owned by one authenticated user.
///
/// Every field is assigned or confirmed by the server. `updated_at` is never
/// earlier than `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable server-assigned identifier.
    pub id: NoteId,

    /// Non-empty title.
    pub title: String,

    /// Free-form body text.
    pub content: String,

    /// When the server first stored the note.
    pub created_at: DateTime<Utc>,

    /// When the server last stored a change to the note.
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Whether the note has been edited since it was created.
    #[must_use]
    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// Title and content submitted when creating or updating a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
}

impl NoteInput {
    /// Creates a new input from a title and content.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Checks the input before it is sent to the server.
    ///
    /// A title made only of whitespace counts as empty.
    pub fn validate(&self) -> Result<(), NoteInputError> {
        if self.title.trim().is_empty() {
            return Err(NoteInputError::EmptyTitle);
        }
        Ok(())
    }
}

/// Reasons a [`NoteInput`] is rejected before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteInputError {
    /// The title was empty.
    EmptyTitle,
}

impl fmt::Display for NoteInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be empty"),
        }
    }
}

impl std::error::Error for NoteInputError {}

// ============================================================================
// Authentication
// ============================================================================

/// Email and password sent to the signup and login endpoints.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Descriptor of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
}

/// A validated reply from the signup or login endpoint.
///
/// Only constructed once the server's reply has been checked to carry a
/// non-empty token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Opaque bearer token for subsequent requests.
    pub token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_note() -> Note {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        Note {
            id: NoteId::new("n-1"),
            title: "Groceries".to_string(),
            content: "milk, eggs".to_string(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn note_uses_camel_case_fields() {
        let json = serde_json::to_value(sample_note()).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
        assert_eq!(json["id"], "n-1");
    }

    #[test]
    fn note_deserializes_server_payload() {
        let json = r#"{
            "id": "abc",
            "title": "T",
            "content": "C",
            "createdAt": "2024-01-02T03:04:05Z",
            "updatedAt": "2024-01-03T03:04:05.123Z"
        }"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.id.as_str(), "abc");
        assert!(note.is_edited());
    }

    #[test]
    fn note_id_parse_trims_and_rejects_empty() {
        let id: NoteId = "  42 ".parse().unwrap();
        assert_eq!(id, NoteId::new("42"));

        let result: Result<NoteId, _> = "   ".parse();
        assert_eq!(result, Err(NoteIdParseError::Empty));
    }

    #[test]
    fn note_input_rejects_blank_title() {
        assert_eq!(
            NoteInput::new("  ", "body").validate(),
            Err(NoteInputError::EmptyTitle)
        );
        assert!(NoteInput::new("Title", "").validate().is_ok());
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("a@example.com", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("a@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn auth_response_optional_fields() {
        let response: AuthResponse = serde_json::from_str(r#"{"token": "t"}"#).unwrap();
        assert_eq!(response.token, "t");
        assert!(response.user.is_none());
        assert!(response.message.is_none());

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"token":"t"}"#);
    }
}
