//! Records mirrored from the habits API.
//!
//! The API owns every entity; these are transient copies fetched per command.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often a habit recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Custom,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for Frequency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            "custom" => Ok(Frequency::Custom),
            _ => anyhow::bail!(
                "Invalid frequency '{}'. Valid values: daily, weekly, monthly, custom",
                s
            ),
        }
    }
}

/// Day of the week as the API spells it (`"monday"` .. `"sunday"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn short_name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Mon",
            DayOfWeek::Tuesday => "Tue",
            DayOfWeek::Wednesday => "Wed",
            DayOfWeek::Thursday => "Thu",
            DayOfWeek::Friday => "Fri",
            DayOfWeek::Saturday => "Sat",
            DayOfWeek::Sunday => "Sun",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(day: DayOfWeek) -> Self {
        match day {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for DayOfWeek {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| {
                let short = day.short_name().to_lowercase();
                let long = format!("{:?}", day).to_lowercase();
                lower == short || lower == long
            })
            .ok_or_else(|| anyhow::anyhow!("Invalid day '{}'. Use mon..sun or monday..sunday", s))
    }
}

/// Parse a comma separated day list such as `mon,wed,fri`.
pub fn parse_day_list(s: &str) -> anyhow::Result<Vec<DayOfWeek>> {
    let mut days = Vec::new();
    for part in s.split(',').filter(|p| !p.trim().is_empty()) {
        let day: DayOfWeek = part.parse()?;
        if !days.contains(&day) {
            days.push(day);
        }
    }
    Ok(days)
}

fn default_repeat_interval() -> u32 {
    1
}

/// A recurring task with a frequency rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub frequency: Frequency,
    #[serde(default = "default_repeat_interval")]
    pub repeat_interval: u32,
    #[serde(default)]
    pub custom_days: Vec<DayOfWeek>,
    #[serde(with = "calendar_day")]
    pub start_date: NaiveDate,
    #[serde(default, with = "optional_calendar_day")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Habit {
    /// Short human description of the schedule, e.g. `every 2 days on Mon, Thu`.
    pub fn schedule_summary(&self) -> String {
        match self.frequency {
            Frequency::Daily => "daily".to_string(),
            Frequency::Weekly => format!("weekly on {}", DayOfWeek::from(self.start_date.weekday())),
            Frequency::Monthly => format!("monthly on day {}", self.start_date.day()),
            Frequency::Custom => {
                let days = self
                    .custom_days
                    .iter()
                    .map(|d| d.short_name())
                    .collect::<Vec<_>>()
                    .join(", ");
                if self.repeat_interval > 1 {
                    format!("every {} days on {}", self.repeat_interval, days)
                } else {
                    format!("on {}", days)
                }
            }
        }
    }
}

/// Body for creating or replacing a habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub frequency: Frequency,
    pub repeat_interval: u32,
    #[serde(default)]
    pub custom_days: Vec<DayOfWeek>,
    #[serde(with = "calendar_day")]
    pub start_date: NaiveDate,
    #[serde(default, with = "optional_calendar_day")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

impl From<&Habit> for HabitDraft {
    fn from(habit: &Habit) -> Self {
        Self {
            title: habit.title.clone(),
            description: habit.description.clone(),
            frequency: habit.frequency,
            repeat_interval: habit.repeat_interval,
            custom_days: habit.custom_days.clone(),
            start_date: habit.start_date,
            end_date: habit.end_date,
            category_id: habit.category_id,
        }
    }
}

/// A user-defined label attached to habits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub title: String,
}

/// A record that a habit was done on a specific day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitCompletion {
    pub id: i64,
    pub habit_id: i64,
    #[serde(with = "calendar_day")]
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionDraft {
    pub habit_id: i64,
    #[serde(with = "calendar_day")]
    pub date: NaiveDate,
}

/// Filters for `GET /habit-completions`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionQuery {
    pub habit_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl CompletionQuery {
    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            habit_id: None,
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn for_habit(mut self, habit_id: i64) -> Self {
        self.habit_id = Some(habit_id);
        self
    }

    pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.habit_id {
            pairs.push(("habit_id", id.to_string()));
        }
        if let Some(from) = self.from {
            pairs.push(("from", from.format(calendar_day::FORMAT).to_string()));
        }
        if let Some(to) = self.to {
            pairs.push(("to", to.format(calendar_day::FORMAT).to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// An authenticated user plus the bearer token the API issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Login form. `identifier` is a username or an e-mail address.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

impl From<AuthResponse> for Session {
    fn from(resp: AuthResponse) -> Self {
        Session {
            user: resp.user,
            token: resp.token,
        }
    }
}

/// Look a record up by numeric id or, failing that, by case-insensitive title.
fn find_by_id_or_title<'a, T>(
    items: &'a [T],
    query: &str,
    kind: &str,
    id_of: impl Fn(&T) -> i64,
    title_of: impl Fn(&T) -> &str,
) -> anyhow::Result<&'a T> {
    let query = query.trim();
    if let Ok(id) = query.parse::<i64>() {
        if let Some(item) = items.iter().find(|i| id_of(i) == id) {
            return Ok(item);
        }
    }
    let matches: Vec<&T> = items
        .iter()
        .filter(|i| title_of(i).eq_ignore_ascii_case(query))
        .collect();
    match matches.as_slice() {
        [item] => Ok(*item),
        [] => anyhow::bail!("No {} matches '{}'", kind, query),
        _ => anyhow::bail!(
            "{} {}s are titled '{}'; use the numeric id instead",
            matches.len(),
            kind,
            query
        ),
    }
}

pub fn find_habit<'a>(habits: &'a [Habit], query: &str) -> anyhow::Result<&'a Habit> {
    find_by_id_or_title(habits, query, "habit", |h| h.id, |h| h.title.as_str())
}

pub fn find_category<'a>(categories: &'a [Category], query: &str) -> anyhow::Result<&'a Category> {
    find_by_id_or_title(categories, query, "category", |c| c.id, |c| c.title.as_str())
}

/// Calendar days travel as `YYYY-MM-DD`, but timestamps are accepted too and
/// reduced to their date so that day equality holds.
pub mod calendar_day {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn parse(s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, FORMAT) {
            return Some(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.date_naive());
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|dt| dt.date())
    }

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw)))
    }
}

pub mod optional_calendar_day {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => super::calendar_day::serialize(d, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => super::calendar_day::parse(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw))),
        }
    }
}
