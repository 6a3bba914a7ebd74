use clap::{Parser, Subcommand};
use habitual::ui::notify;

mod cmd;

#[derive(Parser)]
#[command(name = "habitual")]
#[command(version, about = "Track habits, log completions and review progress")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip confirmation prompts
    #[arg(long, global = true)]
    pub yes: bool,

    /// API base URL. Overrides HABITUAL_API_URL and config.toml.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and log in
    Register {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Read the password from the first line of stdin
        #[arg(long)]
        password_stdin: bool,
    },
    /// Log in and store the session token
    Login {
        /// Username or e-mail address
        #[arg(long)]
        identifier: Option<String>,
        /// Read the password from the first line of stdin
        #[arg(long)]
        password_stdin: bool,
    },
    /// End the session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Manage the account profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// List and manage habits
    Habits {
        #[command(subcommand)]
        command: Option<HabitsCommands>,
    },
    /// List and manage categories
    Categories {
        #[command(subcommand)]
        command: Option<CategoriesCommands>,
    },
    /// Mark a habit as done
    Done {
        /// Habit id or title
        habit: String,
        /// Day to mark (YYYY-MM-DD, "today", "yesterday" or "tomorrow")
        #[arg(long, value_parser = cmd::parse_day)]
        date: Option<chrono::NaiveDate>,
    },
    /// Remove a completion
    Undo {
        /// Habit id or title
        habit: String,
        /// Day to clear (YYYY-MM-DD, "today" or "yesterday")
        #[arg(long, value_parser = cmd::parse_day)]
        date: Option<chrono::NaiveDate>,
    },
    /// Habits due on a day and whether they are done
    Today {
        /// Day to show (YYYY-MM-DD, "today", "yesterday" or "tomorrow")
        #[arg(long, value_parser = cmd::parse_day)]
        date: Option<chrono::NaiveDate>,
    },
    /// Month calendar of completion progress
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(long)]
        month: Option<String>,
        /// Restrict to one habit (id or title)
        #[arg(long)]
        habit: Option<String>,
        /// Restrict to one category (id or title)
        #[arg(long)]
        category: Option<String>,
    },
    /// Completion rate and streaks for a habit
    Stats {
        /// Habit id or title
        habit: String,
        /// Window size in days, ending today (1 to 3650)
        #[arg(
            long,
            default_value = "30",
            value_parser = clap::value_parser!(u32).range(1..=i64::from(cmd::overview::MAX_STATS_DAYS))
        )]
        days: u32,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ProfileCommands {
    /// Change username and/or e-mail
    Update {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
}

/// Schedule options shared by `habits add` and `habits edit`.
#[derive(clap::Args, Clone, Default)]
pub struct HabitFields {
    /// daily, weekly, monthly or custom
    #[arg(long)]
    pub frequency: Option<habitual::Frequency>,
    /// Repeat interval in days for custom schedules
    #[arg(long)]
    pub every: Option<u32>,
    /// Days for custom schedules, e.g. mon,wed,fri
    #[arg(long)]
    pub days: Option<String>,
    #[arg(long, value_parser = cmd::parse_day)]
    pub start: Option<chrono::NaiveDate>,
    #[arg(long, value_parser = cmd::parse_day)]
    pub end: Option<chrono::NaiveDate>,
    /// Category id or title
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Subcommand, Clone)]
pub enum HabitsCommands {
    /// List habits
    List {
        /// Only habits in this category (id or title)
        #[arg(long)]
        category: Option<String>,
    },
    /// Show a habit with its recent progress
    Show { habit: String },
    /// Create a habit
    Add {
        title: String,
        #[command(flatten)]
        fields: HabitFields,
    },
    /// Change a habit
    Edit {
        habit: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: HabitFields,
        /// Remove the end date
        #[arg(long, conflicts_with = "end")]
        no_end: bool,
        /// Remove the category
        #[arg(long, conflicts_with = "category")]
        no_category: bool,
    },
    /// Delete a habit
    Delete { habit: String },
}

#[derive(Subcommand, Clone)]
pub enum CategoriesCommands {
    /// List categories
    List,
    /// Create a category
    Add { title: String },
    /// Rename a category
    Rename { category: String, title: String },
    /// Delete a category
    Delete { category: String },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Write a default config.toml
    Init,
    /// Print the config directory
    Path,
}

#[tokio::main]
async fn main() {
    // A missing .env is the common case.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    habitual::logging::init(cli.verbose);

    if let Err(err) = cmd::dispatch(&cli).await {
        notify::error_chain(&err);
        std::process::exit(1);
    }
}
