//! Per-invocation state shared by every command.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use dialoguer::Confirm;
use habitual::ApiClient;
use habitual::config::Config;
use habitual::models::Session;
use habitual::session::SessionStore;

use super::super::Cli;

pub struct AppContext {
    pub config: Config,
    pub store: SessionStore,
    pub assume_yes: bool,
}

/// The local calendar day, which is what "today" means to the user.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl AppContext {
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = Config::new(cli.api_url.clone(), cli.verbose)?;
        tracing::debug!(
            api_url = %config.api_url,
            config_dir = %config.config_dir.display(),
            "configuration resolved"
        );
        let store = SessionStore::new(&config.session_file);
        Ok(Self {
            config,
            store,
            assume_yes: cli.yes,
        })
    }

    /// Client without credentials, for register and login.
    pub fn anonymous_client(&self) -> Result<ApiClient> {
        ApiClient::new(&self.config.api_url, self.config.timeout)
            .context("Failed to create API client")
    }

    /// Client carrying the stored bearer token. Fails when nobody is logged in.
    pub fn authed_client(&self) -> Result<(ApiClient, Session)> {
        let session = self.store.require_session()?;
        let client = self.anonymous_client()?.with_token(session.token.clone());
        Ok((client, session))
    }

    /// Ask before a destructive action; `--yes` answers for the user.
    pub fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}
