//! Taskdeck CLI - Command-line interface for the Taskdeck auth session.

mod commands;
mod output;

use anyhow::Result;
use auth_config_and_utils::{init_logging, Config, Paths};
use auth_service_client::HttpAuthService;
use auth_session::SessionMachine;
use clap::{Parser, Subcommand};
use session_store::{FileStorage, SessionStorage};
use std::sync::Arc;
use tracing::debug;

/// Taskdeck CLI - Manage your Taskdeck session.
#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Taskdeck CLI for authentication and session management")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Log level (trace, debug, info, warn, error); defaults to the configured level
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Login with email and password
    Login {
        /// Account email (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Create an account and sign in
    Register {
        /// Display name (prompted when omitted)
        #[arg(short, long)]
        name: Option<String>,
        /// Account email (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Logout and clear session
    Logout,

    /// Change the password of the signed-in account
    ChangePassword,

    /// Check authentication status
    Status,
}

/// Wire the session machine to on-disk storage and the HTTP auth service.
fn build_machine(paths: &Paths, config: &Config) -> Result<SessionMachine> {
    paths.ensure_dirs()?;
    let storage: Arc<dyn SessionStorage> = Arc::new(FileStorage::new(paths.session_file()));
    let api_url = config.api_url()?;
    let service = HttpAuthService::new(api_url.as_str(), config.http_timeout())?
        .with_token_storage(storage.clone());

    Ok(SessionMachine::new(
        storage,
        Arc::new(service),
        config.session.clone(),
    ))
}

async fn run(cli: Cli) -> Result<()> {
    let paths = Paths::new()?;
    let config = Config::load(&paths)?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_logging(level, Some(paths.log_file()), false);
    debug!(api_url = %config.api_url, "Loaded configuration");

    let machine = build_machine(&paths, &config)?;

    // Restore before anything reads the session.
    if let Err(rejection) = machine.check_auth_status().await {
        debug!(error = %rejection, "Session restore failed");
    }

    match cli.command {
        Commands::Login { email } => commands::login(&machine, email, &cli.format).await,
        Commands::Register { name, email } => {
            commands::register(&machine, name, email, &cli.format).await
        }
        Commands::Logout => commands::logout(&machine, &cli.format).await,
        Commands::ChangePassword => commands::change_password(&machine, &cli.format).await,
        Commands::Status => commands::status(&machine, &cli.format),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
