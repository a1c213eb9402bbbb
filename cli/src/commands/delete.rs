//! DELETE command - Delete a note.

use std::io::IsTerminal;

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use notes_client::Session;
use notes_core::NoteId;
use serde::Serialize;

use super::{HumanReadable, confirm, output, session_failure};

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// Note ID to delete
    pub note_id: NoteId,

    /// Skip confirmation prompt (for non-interactive use)
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteOutput {
    pub id: NoteId,
    pub deleted: bool,
}

impl HumanReadable for DeleteOutput {
    fn print_human(&self) {
        println!("{}", "Note deleted successfully!".green().bold());
        println!();
        println!("  {} {}", "ID:".cyan(), self.id);
    }
}

/// Execute the delete command.
pub async fn execute(session: &mut Session, human: bool, args: DeleteArgs) -> Result<()> {
    if !args.yes {
        if !std::io::stdin().is_terminal() {
            bail!("refusing to delete note {} without confirmation; pass --yes", args.note_id);
        }
        let prompt = format!("Are you sure you want to delete note {}?", args.note_id);
        if !confirm(&prompt)? {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    session
        .delete_note(&args.note_id)
        .await
        .map_err(session_failure)?;

    let result = DeleteOutput {
        id: args.note_id,
        deleted: true,
    };
    output(&result, human)
}
