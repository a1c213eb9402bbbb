//! Command-line interface for the notes service.
//!
//! This CLI tool provides commands for every notes operation:
//! - signup / login: Authenticate and store the session token
//! - logout: Forget the session token
//! - list: List all notes
//! - read: Show one note
//! - write: Create a new note
//! - revise: Update an existing note
//! - delete: Delete a note
//!
//! Configuration via environment:
//! - NOTES_API_URL: Base URL of the notes API (default: http://localhost:3000/dev)
//! - NOTES_TOKEN_FILE: Where the session token is kept
//! - NOTES_TIMEOUT_SECS: Per-request timeout (default: 30)
//! - NOTES_LOG_LEVEL: Log level when RUST_LOG is unset (default: warn)

mod commands;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use notes_client::{ClientConfig, FileCredentialStore, HttpClient, Session};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use commands::{
    auth::CredentialArgs, delete::DeleteArgs, list::ListArgs, read::ReadArgs,
    revise::ReviseArgs, write::WriteArgs,
};

/// Notes CLI
///
/// Manage your notes from the command line. Prints JSON by default; pass
/// --human for formatted output.
#[derive(Parser)]
#[command(name = "notes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Notes API base URL (overrides NOTES_API_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// File holding the session token (overrides NOTES_TOKEN_FILE)
    #[arg(long, global = true)]
    token_file: Option<PathBuf>,

    /// Request timeout in seconds (overrides NOTES_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Signup(CredentialArgs),

    /// Log in to an existing account
    Login(CredentialArgs),

    /// Log out and forget the session token
    Logout,

    /// List all notes
    List(ListArgs),

    /// Show a single note
    Read(ReadArgs),

    /// Create a new note
    Write(WriteArgs),

    /// Update an existing note
    Revise(ReviseArgs),

    /// Delete a note
    Delete(DeleteArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    init_tracing(&config.log_level);

    let credentials = Arc::new(FileCredentialStore::new(config.token_path()?));
    tracing::debug!(
        base_url = %config.base_url,
        token_file = %credentials.path().display(),
        "Configured client"
    );

    let client = HttpClient::new(&config, credentials)?;
    let mut session = Session::new(client);

    match cli.command {
        Commands::Signup(args) => commands::auth::signup(&mut session, cli.human, args).await,
        Commands::Login(args) => commands::auth::login(&mut session, cli.human, args).await,
        Commands::Logout => commands::auth::logout(&mut session, cli.human),
        Commands::List(args) => commands::list::execute(&mut session, cli.human, args).await,
        Commands::Read(args) => commands::read::execute(&mut session, cli.human, args).await,
        Commands::Write(args) => commands::write::execute(&mut session, cli.human, args).await,
        Commands::Revise(args) => commands::revise::execute(&mut session, cli.human, args).await,
        Commands::Delete(args) => commands::delete::execute(&mut session, cli.human, args).await,
    }
}

/// Environment configuration with command-line overrides applied.
fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;

    if let Some(url) = &cli.url {
        config.base_url = url.clone();
    }
    if let Some(path) = &cli.token_file {
        config.token_file = Some(path.clone());
    }
    if let Some(secs) = cli.timeout {
        config.timeout = Duration::from_secs(secs);
    }

    Ok(config)
}

/// Initialize the tracing subscriber. Logs go to stderr so stdout stays
/// machine-readable.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
