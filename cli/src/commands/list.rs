//! LIST command - List all notes.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notes_client::Session;
use notes_core::Note;

use super::{HumanReadable, format_timestamp, output, session_failure, truncate};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Characters of content to preview per note in human output
    #[arg(long, default_value_t = 80)]
    pub preview: usize,
}

struct NoteListing<'a> {
    notes: &'a [Note],
    preview: usize,
}

impl serde::Serialize for NoteListing<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.notes.serialize(serializer)
    }
}

impl HumanReadable for NoteListing<'_> {
    fn print_human(&self) {
        println!("{}", "Notes".green().bold());
        println!("{}", "=".repeat(80));
        println!();

        if self.notes.is_empty() {
            println!("  {}", "No notes yet. Create your first note!".dimmed());
            return;
        }

        for note in self.notes {
            println!("  {}", note.title.bold());
            println!("    {} {}", "ID:".cyan(), note.id);
            println!(
                "    {} {}",
                "Updated:".cyan(),
                format_timestamp(&note.updated_at)
            );
            let first_line = note.content.lines().next().unwrap_or_default();
            if !first_line.is_empty() {
                println!("    {}", truncate(first_line, self.preview).dimmed());
            }
            println!();
        }

        println!("  {} {}", "Total:".cyan(), self.notes.len());
    }
}

/// Execute the list command.
pub async fn execute(session: &mut Session, human: bool, args: ListArgs) -> Result<()> {
    let notes = session.load_notes().await.map_err(session_failure)?;

    let listing = NoteListing {
        notes,
        preview: args.preview,
    };
    output(&listing, human)
}
