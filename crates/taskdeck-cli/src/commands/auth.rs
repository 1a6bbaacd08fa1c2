//! Authentication commands.

use super::{prompt_secret, value_or_prompt};
use crate::output::{self, OutputFormat, StatusView};
use anyhow::Result;
use auth_session::{Credentials, PasswordChange, Registration, SessionMachine};
use tracing::info;

fn signed_in_email(machine: &SessionMachine) -> Option<String> {
    let state = machine.state();
    if !state.is_authenticated {
        return None;
    }
    state.user.map(|user| user.email)
}

/// Login with email and password.
pub async fn login(
    machine: &SessionMachine,
    email: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    if let Some(current) = signed_in_email(machine) {
        output::print_success(&format!("Already logged in as {}", current), format);
        return Ok(());
    }

    let email = value_or_prompt(email, "Email")?;
    if email.is_empty() {
        output::print_error("Email is required", format);
        return Ok(());
    }

    let password = prompt_secret("Password")?;
    if password.is_empty() {
        output::print_error("Password is required", format);
        return Ok(());
    }

    match machine.login(&Credentials::new(email, password)).await {
        Ok(session) => {
            info!(user_id = %session.user.id, "Logged in");
            output::print_success(&format!("Logged in as {}", session.user.email), format);
        }
        Err(rejection) => {
            output::print_error(&format!("Login failed: {}", rejection), format);
        }
    }

    Ok(())
}

/// Create an account and sign in.
pub async fn register(
    machine: &SessionMachine,
    name: Option<String>,
    email: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let name = value_or_prompt(name, "Name")?;
    let email = value_or_prompt(email, "Email")?;
    if name.is_empty() || email.is_empty() {
        output::print_error("Name and email are required", format);
        return Ok(());
    }

    let password = prompt_secret("Password")?;
    if password.is_empty() {
        output::print_error("Password is required", format);
        return Ok(());
    }

    match machine
        .register(&Registration::new(name, email, password))
        .await
    {
        Ok(session) => {
            info!(user_id = %session.user.id, "Registered");
            output::print_success(
                &format!("Registered and logged in as {}", session.user.email),
                format,
            );
        }
        Err(rejection) => {
            output::print_error(&format!("Registration failed: {}", rejection), format);
        }
    }

    Ok(())
}

/// Logout and clear session.
pub async fn logout(machine: &SessionMachine, format: &OutputFormat) -> Result<()> {
    match machine.logout().await {
        Ok(()) => output::print_success("Logged out successfully", format),
        Err(rejection) => output::print_error(&rejection.message, format),
    }

    Ok(())
}

/// Change the password of the signed-in account.
pub async fn change_password(machine: &SessionMachine, format: &OutputFormat) -> Result<()> {
    let state = machine.state();
    let Some(token) = state.token.filter(|_| state.is_authenticated) else {
        output::print_error("Not logged in. Run 'taskdeck login' first", format);
        return Ok(());
    };

    let current = prompt_secret("Current password")?;
    let new = prompt_secret("New password")?;
    if current.is_empty() || new.is_empty() {
        output::print_error("Both passwords are required", format);
        return Ok(());
    }

    match machine
        .change_password(&PasswordChange::new(current, new, token))
        .await
    {
        Ok(()) => output::print_success("Password changed", format),
        Err(rejection) => {
            output::print_error(&format!("Password change failed: {}", rejection), format)
        }
    }

    Ok(())
}

/// Check authentication status.
pub fn status(machine: &SessionMachine, format: &OutputFormat) -> Result<()> {
    output::print(&StatusView::from(&machine.state()), format);
    Ok(())
}
