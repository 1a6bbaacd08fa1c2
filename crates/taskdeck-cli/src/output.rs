//! Output formatting for the CLI.

use auth_service_client::User;
use auth_session::AuthState;
use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print output in the specified format.
pub fn print<T: Serialize + fmt::Display>(value: &T, format: &OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            } else {
                println!("{}", value);
            }
        }
    }
}

/// Print a success message.
pub fn print_success(message: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", message),
        OutputFormat::Json => println!("{}", status_json("success", message)),
    }
}

/// Print an error message.
pub fn print_error(message: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Text => eprintln!("Error: {}", message),
        OutputFormat::Json => eprintln!("{}", status_json("error", message)),
    }
}

fn status_json(status: &str, message: &str) -> serde_json::Value {
    serde_json::json!({ "status": status, "message": message })
}

/// What `taskdeck status` shows. The token is never printed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusView {
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub error: Option<String>,
}

impl From<&AuthState> for StatusView {
    fn from(state: &AuthState) -> Self {
        Self {
            is_authenticated: state.is_authenticated,
            user: state.user.clone(),
            error: state.error.clone(),
        }
    }
}

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.user, self.is_authenticated) {
            (Some(user), true) => {
                writeln!(f, "Auth:     logged in")?;
                writeln!(f, "User ID:  {}", user.id)?;
                writeln!(f, "Name:     {}", user.name)?;
                write!(f, "Email:    {}", user.email)?;
            }
            _ => write!(f, "Auth:     not logged in")?,
        }
        if let Some(error) = &self.error {
            write!(f, "\nError:    {}", error)?;
        }
        Ok(())
    }
}
