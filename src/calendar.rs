//! Month grid for the progress calendar.
//!
//! Builds the data behind `habitual calendar`; rendering lives in
//! [`crate::ui::calendar`].

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::config::WeekStart;
use crate::models::{Habit, HabitCompletion};
use crate::recurrence::{DayStatus, day_status};

/// Years accepted by [`YearMonth::parse`]. Keeps the following month
/// representable so `last_day` never leaves chrono's date range.
const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// A calendar month, `month` in 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse `YYYY-MM`.
    pub fn parse(s: &str) -> Result<Self> {
        let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
        if !YEARS.contains(&first.year()) {
            anyhow::bail!(
                "Invalid month '{}', year must be between {} and {}",
                s,
                YEARS.start(),
                YEARS.end()
            );
        }
        Ok(Self::of(first))
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("YearMonth always holds a valid month")
    }

    pub fn last_day(self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn title(self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

/// One day cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub status: DayStatus,
    pub is_today: bool,
    pub is_future: bool,
}

/// Weeks of the month; cells outside the month are `None`.
#[derive(Debug, Clone)]
pub struct MonthView {
    pub month: YearMonth,
    pub week_start: WeekStart,
    pub weeks: Vec<[Option<DayCell>; 7]>,
}

impl MonthView {
    pub fn build(
        month: YearMonth,
        week_start: WeekStart,
        habits: &[Habit],
        completions: &[HabitCompletion],
        today: NaiveDate,
    ) -> Self {
        let first = month.first_day();
        let last = month.last_day();
        let mut weeks = Vec::new();
        let mut week: [Option<DayCell>; 7] = [None; 7];

        let mut date = first;
        while date <= last {
            let column = column_of(date.weekday(), week_start);
            if column == 0 && date != first {
                weeks.push(week);
                week = [None; 7];
            }
            week[column] = Some(DayCell {
                date,
                status: day_status(habits, completions, date),
                is_today: date == today,
                is_future: date > today,
            });
            date += Duration::days(1);
        }
        weeks.push(week);

        Self {
            month,
            week_start,
            weeks,
        }
    }

    /// Column headers in display order.
    pub fn weekday_headers(&self) -> [Weekday; 7] {
        let mut day = match self.week_start {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        };
        let mut headers = [day; 7];
        for slot in headers.iter_mut() {
            *slot = day;
            day = day.succ();
        }
        headers
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(|w| w.iter().flatten())
    }
}

fn column_of(day: Weekday, week_start: WeekStart) -> usize {
    match week_start {
        WeekStart::Monday => day.num_days_from_monday() as usize,
        WeekStart::Sunday => day.num_days_from_sunday() as usize,
    }
}
