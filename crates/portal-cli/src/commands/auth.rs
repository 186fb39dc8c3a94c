//! Login, logout, profile and status commands.

use super::render;
use anyhow::{Context, Result};
use colored::Colorize;
use portal_application::PortalSession;
use portal_core::{ApiMode, Credentials, PortalError};

/// Reads the password without echoing it.
pub fn prompt_password() -> Result<String> {
    dialoguer::Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()
        .context("Failed to read password")
}

pub async fn login(
    session: &PortalSession,
    program: Option<&str>,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_password()?,
    };
    let credentials = Credentials::from_form(program.unwrap_or_default(), username, password)?;

    match session.login(&credentials).await {
        Ok(grant) => {
            println!("{}", render::login_summary(&grant));
            Ok(())
        }
        Err(err) => {
            if session.mode().await == ApiMode::Mock {
                println!("{}", render::demo_hint());
            }
            Err(err.into())
        }
    }
}

pub async fn profile(session: &PortalSession) -> Result<()> {
    let profile = session.current_profile().await?;
    print!("{}", render::profile_view(&profile));
    Ok(())
}

pub fn logout(session: &PortalSession) -> Result<()> {
    session.logout()?;
    println!("{} Logged out", "✓".green());
    Ok(())
}

pub fn status(session: &PortalSession) -> Result<()> {
    match session.current_token() {
        Ok(token) => println!("{}", render::token_status(Some(&token))),
        Err(PortalError::NotAuthenticated) => println!("{}", render::token_status(None)),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
