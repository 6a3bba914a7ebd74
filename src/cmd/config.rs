//! Configuration view and validation commands: `habitual config`.

use anyhow::{Context, Result};
use habitual::config::{
    API_URL_ENV, CONFIG_DIR_ENV, CONFIG_FILE_NAME, Config, ConfigFile, resolve_config_dir,
};
use habitual::ui::notify;

use super::super::{Cli, ConfigCommands};

/// Runs without an `AppContext`: only `show` needs `config.toml` to parse, so
/// `path`, `init` and `validate` still work on a broken file.
pub fn cmd_config(cli: &Cli, command: Option<ConfigCommands>) -> Result<()> {
    let config_dir = resolve_config_dir(std::env::var(CONFIG_DIR_ENV).ok().as_deref())?;
    let config_path = &config_dir.join(CONFIG_FILE_NAME);

    match command {
        None | Some(ConfigCommands::Show) => {
            let config = Config::new(cli.api_url.clone(), cli.verbose)?;
            println!();
            println!("Habitual Configuration");
            println!("======================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
                println!();
                let file = ConfigFile::load(config_path)?;
                println!("[api]");
                println!("  base_url = \"{}\"", file.api.base_url);
                println!("  timeout_secs = {}", file.api.timeout_secs);
                println!();
                println!("[display]");
                println!("  week_start = \"{}\"", file.display.week_start);
                println!();
            } else {
                println!("No config.toml found at {}", config_path.display());
                println!("Using defaults. Run 'habitual config init' to create one.");
                println!();
            }

            println!("Effective values (with env/CLI overrides):");
            println!("  api_url = \"{}\"", config.api_url);
            println!("  timeout = {}s", config.timeout.as_secs());
            println!("  week_start = \"{}\"", config.week_start);
            println!(
                "  session = {}",
                if config.session_file.exists() {
                    "logged in"
                } else {
                    "not logged in"
                }
            );
            println!();
        }
        Some(ConfigCommands::Validate) => {
            if !config_path.exists() {
                println!("No config.toml found. Using defaults (valid).");
                return Ok(());
            }
            let file = ConfigFile::load(config_path).context("Configuration is invalid")?;
            let warnings = file.validate();
            if warnings.is_empty() {
                notify::success("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("config.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }
            ConfigFile::default().save(config_path)?;
            notify::success(format!("Created config.toml at {}", config_path.display()));
            println!();
            println!("Point it at your API with [api] base_url, or set {}.", API_URL_ENV);
        }
        Some(ConfigCommands::Path) => {
            println!("{}", config_dir.display());
        }
    }

    Ok(())
}
