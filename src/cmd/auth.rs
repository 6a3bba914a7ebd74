//! Account commands: `habitual register|login|logout|whoami|profile`.

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, Password};
use habitual::models::{Credentials, ProfileUpdate, Registration};
use habitual::ui::{notify, with_spinner};
use habitual::validation::{validate_email, validate_login, validate_registration, validate_username};

use super::AppContext;
use super::super::ProfileCommands;

fn read_password_line() -> Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn prompt_text(label: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Input::<String>::new()
            .with_prompt(label)
            .interact_text()
            .with_context(|| format!("Failed to read {}", label.to_lowercase())),
    }
}

pub async fn cmd_register(
    ctx: &AppContext,
    username: Option<String>,
    email: Option<String>,
    password_stdin: bool,
) -> Result<()> {
    let username = prompt_text("Username", username)?;
    let email = prompt_text("E-mail", email)?;
    let (password, confirmation) = if password_stdin {
        let pw = read_password_line()?;
        (pw.clone(), pw)
    } else {
        let pw = Password::new()
            .with_prompt("Password")
            .interact()
            .context("Failed to read password")?;
        let confirmation = Password::new()
            .with_prompt("Repeat password")
            .interact()
            .context("Failed to read password")?;
        (pw, confirmation)
    };

    validate_registration(&username, &email, &password, &confirmation)?;

    let client = ctx.anonymous_client()?;
    let registration = Registration {
        username: username.clone(),
        email,
        password: password.clone(),
    };
    let user = with_spinner("Creating account...", client.register(&registration)).await?;
    tracing::info!(user_id = user.id, "account created");

    let credentials = Credentials {
        identifier: username,
        password,
    };
    let session = with_spinner("Signing in...", client.login(&credentials)).await?;
    ctx.store.save(&session)?;
    notify::success(format!("Welcome, {}! You are logged in.", session.user.username));
    Ok(())
}

pub async fn cmd_login(
    ctx: &AppContext,
    identifier: Option<String>,
    password_stdin: bool,
) -> Result<()> {
    let identifier = prompt_text("Username or e-mail", identifier)?;
    let password = if password_stdin {
        read_password_line()?
    } else {
        Password::new()
            .with_prompt("Password")
            .interact()
            .context("Failed to read password")?
    };
    validate_login(&identifier, &password)?;

    let client = ctx.anonymous_client()?;
    let credentials = Credentials {
        identifier,
        password,
    };
    let session = with_spinner("Signing in...", client.login(&credentials)).await?;
    ctx.store.save(&session)?;
    notify::success(format!("Logged in as {}", session.user.username));
    Ok(())
}

pub async fn cmd_logout(ctx: &AppContext) -> Result<()> {
    let Some(session) = ctx.store.load()? else {
        notify::info("Not logged in.");
        return Ok(());
    };

    let client = ctx.anonymous_client()?.with_token(session.token.clone());
    // The local session goes away even if the API is unreachable.
    if let Err(e) = client.logout().await {
        tracing::warn!(error = %e, "remote logout failed");
        notify::warn(format!("Could not reach the API to end the session: {}", e));
    }
    ctx.store.clear()?;
    notify::success(format!("Logged out {}", session.user.username));
    Ok(())
}

pub async fn cmd_whoami(ctx: &AppContext) -> Result<()> {
    let (client, _) = ctx.authed_client()?;
    let user = with_spinner("Loading profile...", client.current_user()).await?;
    println!("{} {}", style(&user.username).bold(), style(format!("<{}>", user.email)).dim());
    println!("{}", style(format!("user #{} at {}", user.id, client.base_url())).dim());
    Ok(())
}

pub async fn cmd_profile(ctx: &AppContext, command: ProfileCommands) -> Result<()> {
    match command {
        ProfileCommands::Update { username, email } => {
            let update = ProfileUpdate { username, email };
            if update.is_empty() {
                anyhow::bail!("Nothing to update; pass --username and/or --email");
            }
            if let Some(msg) = update.username.as_deref().and_then(validate_username) {
                anyhow::bail!("username {}", msg);
            }
            if let Some(msg) = update.email.as_deref().and_then(validate_email) {
                anyhow::bail!("email {}", msg);
            }

            let (client, mut session) = ctx.authed_client()?;
            let user = with_spinner("Saving profile...", client.update_profile(&update)).await?;
            session.user = user;
            ctx.store.save(&session)?;
            notify::success(format!(
                "Profile updated: {} <{}>",
                session.user.username, session.user.email
            ));
        }
    }
    Ok(())
}
