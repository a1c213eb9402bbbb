//! WRITE command - Create a new note.

use anyhow::Result;
use clap::Args;
use notes_client::Session;
use notes_core::NoteInput;

use super::{output, read_content, session_failure};

/// Arguments for the write command.
#[derive(Args)]
pub struct WriteArgs {
    /// Title of the new note
    #[arg(short, long)]
    pub title: String,

    /// Note content (use @filename to read from file, or - for stdin)
    #[arg(short, long, default_value = "")]
    pub content: String,
}

/// Execute the write command.
pub async fn execute(session: &mut Session, human: bool, args: WriteArgs) -> Result<()> {
    let content = read_content(args.content)?;
    let input = NoteInput::new(args.title, content);

    let note = session
        .create_note(&input)
        .await
        .map_err(session_failure)?;

    output(&note, human)
}
