//! READ command - Retrieve a single note.

use anyhow::Result;
use clap::Args;
use notes_client::Session;
use notes_core::NoteId;

use super::{output, session_failure};

/// Arguments for the read command.
#[derive(Args)]
pub struct ReadArgs {
    /// Note ID to read
    pub note_id: NoteId,
}

/// Execute the read command.
pub async fn execute(session: &mut Session, human: bool, args: ReadArgs) -> Result<()> {
    let note = session
        .fetch_note(&args.note_id)
        .await
        .map_err(session_failure)?;

    output(&note, human)
}
