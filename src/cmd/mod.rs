//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module        | Commands handled                                   |
//! |---------------|----------------------------------------------------|
//! | `auth`        | `Register`, `Login`, `Logout`, `Whoami`, `Profile` |
//! | `habits`      | `Habits`                                           |
//! | `categories`  | `Categories`                                       |
//! | `track`       | `Done`, `Undo`                                     |
//! | `overview`    | `Today`, `Calendar`, `Stats`                       |
//! | `config`      | `Config`                                           |

pub mod auth;
pub mod categories;
pub mod config;
pub mod context;
pub mod habits;
pub mod overview;
pub mod track;

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use habitual::errors::ClientError;
use habitual::ui::notify;

use super::{Cli, Commands};
pub use context::AppContext;

/// Clap value parser for day arguments: `YYYY-MM-DD`, `today`, `yesterday`
/// or `tomorrow`.
pub fn parse_day(s: &str) -> Result<NaiveDate, String> {
    let today = context::today();
    match s.trim().to_lowercase().as_str() {
        "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        "tomorrow" => Ok(today + Duration::days(1)),
        other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
            .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", s)),
    }
}

pub async fn dispatch(cli: &Cli) -> Result<()> {
    // Config commands must keep working when config.toml does not parse.
    let ctx = match &cli.command {
        Commands::Config { command } => return config::cmd_config(cli, command.clone()),
        _ => AppContext::new(cli)?,
    };

    let result = match &cli.command {
        Commands::Register {
            username,
            email,
            password_stdin,
        } => auth::cmd_register(&ctx, username.clone(), email.clone(), *password_stdin).await,
        Commands::Login {
            identifier,
            password_stdin,
        } => auth::cmd_login(&ctx, identifier.clone(), *password_stdin).await,
        Commands::Logout => auth::cmd_logout(&ctx).await,
        Commands::Whoami => auth::cmd_whoami(&ctx).await,
        Commands::Profile { command } => auth::cmd_profile(&ctx, command.clone()).await,
        Commands::Habits { command } => habits::cmd_habits(&ctx, command.clone()).await,
        Commands::Categories { command } => {
            categories::cmd_categories(&ctx, command.clone()).await
        }
        Commands::Done { habit, date } => track::cmd_done(&ctx, habit, *date).await,
        Commands::Undo { habit, date } => track::cmd_undo(&ctx, habit, *date).await,
        Commands::Today { date } => overview::cmd_today(&ctx, *date).await,
        Commands::Calendar {
            month,
            habit,
            category,
        } => {
            overview::cmd_calendar(&ctx, month.as_deref(), habit.as_deref(), category.as_deref())
                .await
        }
        Commands::Stats { habit, days } => overview::cmd_stats(&ctx, habit, *days).await,
        Commands::Config { .. } => Ok(()),
    };

    // A rejected token means the stored session is stale; drop it so the
    // next command asks for a fresh login.
    if let Err(err) = &result {
        if err
            .downcast_ref::<ClientError>()
            .is_some_and(ClientError::is_unauthorized)
        {
            if ctx.store.clear()? {
                notify::warn("Your session has expired. Run `habitual login` to sign in again.");
            }
        }
    }
    result
}
