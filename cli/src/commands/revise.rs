//! REVISE command - Update an existing note.

use anyhow::Result;
use clap::Args;
use notes_client::Session;
use notes_core::{NoteId, NoteInput};

use super::{output, read_content, session_failure};

/// Arguments for the revise command.
#[derive(Args)]
#[command(group = clap::ArgGroup::new("changes").required(true).multiple(true).args(["title", "content"]))]
pub struct ReviseArgs {
    /// Note ID to revise
    pub note_id: NoteId,

    /// New title (kept unchanged when omitted)
    #[arg(short, long)]
    pub title: Option<String>,

    /// New content (use @filename to read from file, or - for stdin; kept
    /// unchanged when omitted)
    #[arg(short, long)]
    pub content: Option<String>,
}

/// Execute the revise command.
///
/// The API replaces title and content together, so a field that was not
/// given is filled in from the server's current copy.
pub async fn execute(session: &mut Session, human: bool, args: ReviseArgs) -> Result<()> {
    let content = args.content.map(read_content).transpose()?;

    let input = match (args.title, content) {
        (Some(title), Some(content)) => NoteInput::new(title, content),
        (title, content) => {
            let current = session
                .fetch_note(&args.note_id)
                .await
                .map_err(session_failure)?;
            NoteInput::new(
                title.unwrap_or(current.title),
                content.unwrap_or(current.content),
            )
        }
    };

    let note = session
        .update_note(&args.note_id, &input)
        .await
        .map_err(session_failure)?;

    output(&note, human)
}
