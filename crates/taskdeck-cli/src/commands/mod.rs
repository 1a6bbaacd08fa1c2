//! CLI command implementations.

mod auth;

pub use auth::{change_password, login, logout, register, status};

use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Prompt on stdout and read one trimmed line from stdin.
fn prompt_line(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    Ok(read_trimmed(&mut io::stdin().lock())?)
}

/// Prompt for a secret without echo.
fn prompt_secret(label: &str) -> Result<String> {
    Ok(rpassword::prompt_password(format!("{}: ", label))?)
}

/// Use `value` when given, otherwise prompt for it.
fn value_or_prompt(value: Option<String>, label: &str) -> Result<String> {
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(v) => Ok(v),
        None => prompt_line(label),
    }
}

fn read_trimmed<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
