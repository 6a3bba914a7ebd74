//! Integration tests for the habitual CLI
//!
//! Each test gets its own config directory and, where it talks to the API,
//! its own mock server.

mod common;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use common::{MockApi, PASSWORD};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a habitual Command isolated to `dir`
fn habitual(dir: &TempDir, api: Option<&MockApi>) -> Command {
    let mut cmd = cargo_bin_cmd!("habitual");
    cmd.current_dir(dir.path())
        .env("HABITUAL_CONFIG_DIR", dir.path())
        .env_remove("HABITUAL_API_URL")
        .env_remove("HABITUAL_LOG");
    if let Some(api) = api {
        cmd.env("HABITUAL_API_URL", &api.base_url);
    }
    cmd
}

/// Helper to log in as the seeded user
fn login(dir: &TempDir, api: &MockApi) {
    habitual(dir, Some(api))
        .args(["login", "--identifier", "jo", "--password-stdin"])
        .write_stdin(format!("{}\n", PASSWORD))
        .assert()
        .success();
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_help() {
        let dir = TempDir::new().unwrap();
        habitual(&dir, None)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("calendar"));
    }

    #[test]
    fn test_version() {
        let dir = TempDir::new().unwrap();
        habitual(&dir, None).arg("--version").assert().success();
    }

    #[test]
    fn test_stats_window_is_bounded() {
        let dir = TempDir::new().unwrap();
        for days in ["0", "3651", "4294967295"] {
            habitual(&dir, None)
                .args(["stats", "1", "--days", days])
                .assert()
                .failure()
                .stderr(predicate::str::contains("--days"));
        }
    }

    #[test]
    fn test_invalid_date_rejected_by_parser() {
        let dir = TempDir::new().unwrap();
        habitual(&dir, None)
            .args(["today", "--date", "31-01-2024"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("YYYY-MM-DD"));
    }
}

// =============================================================================
// Configuration
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn test_config_path_honours_env() {
        let dir = TempDir::new().unwrap();
        habitual(&dir, None)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains(dir.path().to_str().unwrap()));
    }

    #[test]
    fn test_config_init_then_show() {
        let dir = TempDir::new().unwrap();
        habitual(&dir, None)
            .args(["config", "init"])
            .assert()
            .success();
        assert!(dir.path().join("config.toml").exists());

        habitual(&dir, None)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));

        habitual(&dir, None)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("base_url = \"http://localhost:8000/api\""))
            .stdout(predicate::str::contains("not logged in"));
    }

    #[test]
    fn test_cli_flag_overrides_env() {
        let dir = TempDir::new().unwrap();
        habitual(&dir, None)
            .env("HABITUAL_API_URL", "https://env.example/api")
            .args(["--api-url", "https://flag.example/api", "config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("api_url = \"https://flag.example/api\""));
    }

    #[test]
    fn test_malformed_config_does_not_block_path_or_init() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "[api\nbase_url = ").unwrap();

        habitual(&dir, None)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains(dir.path().to_str().unwrap()));
        habitual(&dir, None)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));
        habitual(&dir, None)
            .args(["config", "validate"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Configuration is invalid"));
        habitual(&dir, None)
            .arg("today")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_validate_reports_warnings() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "[api]\nbase_url = \"localhost\"\ntimeout_secs = 0\n",
        )
        .unwrap();
        habitual(&dir, None)
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("should start with http://"))
            .stdout(predicate::str::contains("timeout_secs"));
    }
}

// =============================================================================
// Session handling
// =============================================================================

mod session {
    use super::*;

    #[test]
    fn test_commands_require_login() {
        let dir = TempDir::new().unwrap();
        for args in [vec!["habits"], vec!["today"], vec!["calendar"], vec!["whoami"]] {
            habitual(&dir, None)
                .args(&args)
                .assert()
                .failure()
                .stderr(predicate::str::contains("Not logged in"));
        }
    }

    #[test]
    fn test_login_stores_session_and_logout_clears_it() {
        let dir = TempDir::new().unwrap();
        let api = MockApi::start();
        habitual(&dir, Some(&api))
            .args(["login", "--identifier", "jo", "--password-stdin"])
            .write_stdin(format!("{}\n", PASSWORD))
            .assert()
            .success()
            .stdout(predicate::str::contains("Logged in as jo"));
        assert!(dir.path().join("session.json").exists());

        habitual(&dir, Some(&api))
            .arg("whoami")
            .assert()
            .success()
            .stdout(predicate::str::contains("jo@example.com"));

        habitual(&dir, Some(&api))
            .arg("logout")
            .assert()
            .success();
        assert!(!dir.path().join("session.json").exists());
        assert!(api.db.lock().unwrap().logged_out);
    }

    #[test]
    fn test_wrong_password() {
        let dir = TempDir::new().unwrap();
        let api = MockApi::start();
        habitual(&dir, Some(&api))
            .args(["login", "--identifier", "jo", "--password-stdin"])
            .write_stdin("nope\n")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid username/e-mail or password"));
        assert!(!dir.path().join("session.json").exists());
    }

    #[test]
    fn test_register_validates_then_logs_in() {
        let dir = TempDir::new().unwrap();
        let api = MockApi::start();
        habitual(&dir, Some(&api))
            .args(["register", "--username", "x", "--email", "bad", "--password-stdin"])
            .write_stdin("short\n")
            .assert()
            .failure()
            .stderr(predicate::str::contains("username"))
            .stderr(predicate::str::contains("email"));

        habitual(&dir, Some(&api))
            .args([
                "register",
                "--username",
                "sam",
                "--email",
                "sam@example.com",
                "--password-stdin",
            ])
            .write_stdin(format!("{}\n", PASSWORD))
            .assert()
            .success()
            .stdout(predicate::str::contains("Welcome, sam!"));
        assert!(dir.path().join("session.json").exists());
    }

    #[test]
    fn test_rejected_token_clears_session() {
        let dir = TempDir::new().unwrap();
        let api = MockApi::start();
        fs::write(
            dir.path().join("session.json"),
            r#"{"user": {"id": 1, "username": "jo", "email": "jo@example.com"}, "token": "stale"}"#,
        )
        .unwrap();

        habitual(&dir, Some(&api))
            .arg("whoami")
            .assert()
            .failure()
            .stderr(predicate::str::contains("session has expired"));
        assert!(!dir.path().join("session.json").exists());
    }
}

// =============================================================================
// Habits, completions and views
// =============================================================================

mod tracking {
    use super::*;

    #[test]
    fn test_habits_list_shows_categories() {
        let dir = TempDir::new().unwrap();
        let api = MockApi::start();
        login(&dir, &api);
        habitual(&dir, Some(&api))
            .args(["habits", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Drink water"))
            .stdout(predicate::str::contains("Health"))
            .stdout(predicate::str::contains("3 habit(s)"));

        habitual(&dir, Some(&api))
            .args(["habits", "list", "--category", "health"])
            .assert()
            .success()
            .stdout(predicate::str::contains("2 habit(s)"));
    }

    #[test]
    fn test_add_custom_habit_requires_days() {
        let dir = TempDir::new().unwrap();
        let api = MockApi::start();
        login(&dir, &api);
        habitual(&dir, Some(&api))
            .args(["habits", "add", "Read", "--frequency", "custom"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("custom_days"));

        habitual(&dir, Some(&api))
            .args([
                "habits", "add", "Read", "--frequency", "custom", "--days", "mon,wed", "--every",
                "2", "--start", "2024-01-01",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("every 2 days on Mon, Wed"));
        assert_eq!(api.db.lock().unwrap().habits.len(), 4);
    }

    #[test]
    fn test_edit_and_delete_habit() {
        let dir = TempDir::new().unwrap();
        let api = MockApi::start();
        login(&dir, &api);
        habitual(&dir, Some(&api))
            .args(["habits", "edit", "weekly review", "--title", "Sunday review"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Sunday review"));

        habitual(&dir, Some(&api))
            .args(["--yes", "habits", "delete", "2"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Deleted habit 'Sunday review'"));
        assert_eq!(api.db.lock().unwrap().habits.len(), 2);
    }

    #[test]
    fn test_done_and_undo() {
        let dir = TempDir::new().unwrap();
        let api = MockApi::start();
        login(&dir, &api);

        habitual(&dir, Some(&api))
            .args(["done", "Drink water", "--date", "2024-01-02"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Marked 'Drink water' done for 2024-01-02"));
        assert_eq!(api.completion_count(1), 2);

        habitual(&dir, Some(&api))
            .args(["done", "1", "--date", "2024-01-02"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already done"));
        assert_eq!(api.completion_count(1), 2);

        habitual(&dir, Some(&api))
            .args(["undo", "1", "--date", "2024-01-02"])
            .assert()
            .success();
        assert_eq!(api.completion_count(1), 1);
    }

    #[test]
    fn test_done_refuses_unscheduled_day() {
        let dir = TempDir::new().unwrap();
        let api = MockApi::start();
        login(&dir, &api);
        habitual(&dir, Some(&api))
            .args(["done", "Weekly review", "--date", "2024-01-02"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("is not scheduled on 2024-01-02"));
        assert_eq!(api.completion_count(2), 0);
    }

    #[test]
    fn test_today_view() {
        let dir = TempDir::new().unwrap();
        let api = MockApi::start();
        login(&dir, &api);
        // 2024-01-01 is a Monday: all three seeded habits are due, one is done.
        habitual(&dir, Some(&api))
            .args(["today", "--date", "2024-01-01"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Gym"))
            .stdout(predicate::str::contains("1/3 done"));
    }

    #[test]
    fn test_calendar_view() {
        let dir = TempDir::new().unwrap();
        let api = MockApi::start();
        login(&dir, &api);
        habitual(&dir, Some(&api))
            .args(["calendar", "--month", "2024-01"])
            .assert()
            .success()
            .stdout(predicate::str::contains("January 2024"))
            .stdout(predicate::str::contains("Mon  Tue"));

        habitual(&dir, Some(&api))
            .args(["calendar", "--month", "2024-1x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("expected YYYY-MM"));

        habitual(&dir, Some(&api))
            .args(["calendar", "--month", "262142-12"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("year must be between 1 and 9999"))
            .stderr(predicate::str::contains("panicked").not());
    }

    #[test]
    fn test_stats_and_show() {
        let dir = TempDir::new().unwrap();
        let api = MockApi::start();
        login(&dir, &api);
        habitual(&dir, Some(&api))
            .args(["stats", "Drink water", "--days", "7"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Last 7 days"));

        habitual(&dir, Some(&api))
            .args(["habits", "show", "gym"])
            .assert()
            .success()
            .stdout(predicate::str::contains("every 2 days on Mon"))
            .stdout(predicate::str::contains("Category:  Health"));
    }

    #[test]
    fn test_categories_crud() {
        let dir = TempDir::new().unwrap();
        let api = MockApi::start();
        login(&dir, &api);
        habitual(&dir, Some(&api))
            .args(["categories", "add", "Work"])
            .assert()
            .success();
        habitual(&dir, Some(&api))
            .args(["categories", "rename", "work", "Career"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Renamed 'Work' to 'Career'"));
        habitual(&dir, Some(&api))
            .arg("categories")
            .assert()
            .success()
            .stdout(predicate::str::contains("Career"))
            .stdout(predicate::str::contains("2 habit(s)"));
        habitual(&dir, Some(&api))
            .args(["--yes", "categories", "delete", "Career"])
            .assert()
            .success();
        assert_eq!(api.db.lock().unwrap().categories.len(), 1);
    }
}
