//! Command implementations and shared output helpers.

pub mod auth;
pub mod delete;
pub mod list;
pub mod read;
pub mod revise;
pub mod write;

use std::io::{BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use notes_client::SessionError;
use notes_core::Note;
use serde::Serialize;

/// Types that can print themselves for a human reader.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Print `value` as pretty JSON, or in human form when `human` is set.
pub fn output<T>(value: &T, human: bool) -> Result<()>
where
    T: Serialize + HumanReadable + ?Sized,
{
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Shorten `s` to at most `max` characters, marking the cut with "...".
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Resolve a content argument: `-` reads stdin, `@path` reads a file.
pub fn read_content(arg: String) -> Result<String> {
    if arg == "-" {
        use std::io::Read;
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else if let Some(path) = arg.strip_prefix('@') {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))
    } else {
        Ok(arg)
    }
}

/// Ask a yes/no question on stderr. Anything but "y" counts as no.
pub fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{} {} [y/N] ", "Warning:".yellow().bold(), prompt);
    std::io::stderr().flush()?;

    let mut input = String::new();
    std::io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Read a password from the given value or, failing that, from stdin.
pub fn password_or_prompt(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        std::io::stderr().flush()?;
    }

    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    anyhow::ensure!(!password.is_empty(), "password must not be empty");
    Ok(password)
}

/// Convert a session failure into a CLI error, adding a hint when the
/// session was ended.
pub fn session_failure(err: SessionError) -> anyhow::Error {
    if err.is_session_ended() {
        anyhow::Error::new(err).context("Your session has expired. Run `notes login` to sign in again")
    } else {
        anyhow::Error::new(err)
    }
}

impl HumanReadable for Note {
    fn print_human(&self) {
        println!("{}", self.title.green().bold());
        println!("{}", "=".repeat(60));
        println!();
        println!("  {} {}", "ID:".cyan(), self.id);
        println!("  {} {}", "Created:".cyan(), format_timestamp(&self.created_at));
        if self.is_edited() {
            println!("  {} {}", "Updated:".cyan(), format_timestamp(&self.updated_at));
        }
        println!();
        println!("{}", "-".repeat(60));
        println!("{}", self.content);
        println!("{}", "-".repeat(60));
    }
}
