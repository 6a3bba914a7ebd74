pub mod api;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod recurrence;
pub mod session;
pub mod ui;
pub mod validation;

pub use api::ApiClient;
pub use errors::{ClientError, SessionError};
pub use models::{Category, DayOfWeek, Frequency, Habit, HabitCompletion, Session, User};
