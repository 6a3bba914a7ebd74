//! Client-side form validation, run before any request leaves the machine.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::models::{CategoryDraft, Frequency, HabitDraft};

pub const MAX_HABIT_TITLE: usize = 100;
pub const MAX_CATEGORY_TITLE: usize = 50;
pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is a valid static pattern")
});

static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]{3,30}$").expect("username regex is a valid static pattern")
});

/// One problem with one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every problem found in a form, reported together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "Invalid input ({})", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

pub fn validate_habit(draft: &HabitDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let title = draft.title.trim();
    if title.is_empty() {
        errors.push("title", "is required");
    } else if title.chars().count() > MAX_HABIT_TITLE {
        errors.push("title", format!("must be at most {} characters", MAX_HABIT_TITLE));
    }

    if draft.repeat_interval < 1 {
        errors.push("repeat_interval", "must be at least 1");
    }

    if draft.frequency == Frequency::Custom && draft.custom_days.is_empty() {
        errors.push("custom_days", "pick at least one day for a custom schedule");
    }

    if let Some(end) = draft.end_date {
        if end < draft.start_date {
            errors.push("end_date", "must not be before the start date");
        }
    }

    errors.into_result()
}

pub fn validate_category(draft: &CategoryDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let title = draft.title.trim();
    if title.is_empty() {
        errors.push("title", "is required");
    } else if title.chars().count() > MAX_CATEGORY_TITLE {
        errors.push("title", format!("must be at most {} characters", MAX_CATEGORY_TITLE));
    }
    errors.into_result()
}

pub fn validate_username(username: &str) -> Option<String> {
    if USERNAME_RE.is_match(username) {
        None
    } else {
        Some("must be 3-30 characters of letters, digits, '_', '.' or '-'".to_string())
    }
}

pub fn validate_email(email: &str) -> Option<String> {
    if EMAIL_RE.is_match(email) {
        None
    } else {
        Some("is not a valid e-mail address".to_string())
    }
}

pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    confirmation: &str,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if let Some(msg) = validate_username(username) {
        errors.push("username", msg);
    }
    if let Some(msg) = validate_email(email) {
        errors.push("email", msg);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LEN),
        );
    }
    if password != confirmation {
        errors.push("password_confirmation", "does not match the password");
    }
    errors.into_result()
}

pub fn validate_login(identifier: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if identifier.trim().is_empty() {
        errors.push("identifier", "is required");
    }
    if password.is_empty() {
        errors.push("password", "is required");
    }
    errors.into_result()
}
