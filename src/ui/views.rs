//! Text renderings of habits, categories and the day view.
//!
//! Renderers return `String`s so commands decide where output goes and tests
//! can inspect it.

use chrono::NaiveDate;
use console::{Alignment, pad_str, style};
use std::collections::HashMap;

use super::icons::{DONE, PENDING, STREAK};
use crate::models::{Category, Habit, HabitCompletion};
use crate::recurrence::{HabitStats, habits_due_on_date, is_habit_completed};

const TITLE_WIDTH: usize = 28;
const SCHEDULE_WIDTH: usize = 26;
const CATEGORY_WIDTH: usize = 14;

pub fn category_lookup(categories: &[Category]) -> HashMap<i64, &str> {
    categories
        .iter()
        .map(|c| (c.id, c.title.as_str()))
        .collect()
}

fn date_range(habit: &Habit) -> String {
    match habit.end_date {
        Some(end) => format!("{} → {}", habit.start_date, end),
        None => format!("since {}", habit.start_date),
    }
}

pub fn habit_table(habits: &[Habit], categories: &[Category]) -> String {
    let lookup = category_lookup(categories);
    let mut out = String::new();
    out.push_str(&format!(
        "{:>5}  {}  {}  {}  {}\n",
        style("ID").bold(),
        style(pad_str("Title", TITLE_WIDTH, Alignment::Left, None)).bold(),
        style(pad_str("Schedule", SCHEDULE_WIDTH, Alignment::Left, None)).bold(),
        style(pad_str("Category", CATEGORY_WIDTH, Alignment::Left, None)).bold(),
        style("Dates").bold(),
    ));
    for habit in habits {
        let category = habit
            .category_id
            .and_then(|id| lookup.get(&id).copied())
            .unwrap_or("-");
        out.push_str(&format!(
            "{:>5}  {}  {}  {}  {}\n",
            habit.id,
            pad_str(&habit.title, TITLE_WIDTH, Alignment::Left, Some("…")),
            pad_str(&habit.schedule_summary(), SCHEDULE_WIDTH, Alignment::Left, Some("…")),
            pad_str(category, CATEGORY_WIDTH, Alignment::Left, Some("…")),
            style(date_range(habit)).dim(),
        ));
    }
    out
}

pub fn category_list(categories: &[Category], habits: &[Habit]) -> String {
    let mut out = String::new();
    for category in categories {
        let count = habits
            .iter()
            .filter(|h| h.category_id == Some(category.id))
            .count();
        out.push_str(&format!(
            "{:>5}  {}  {}\n",
            category.id,
            pad_str(&category.title, TITLE_WIDTH, Alignment::Left, Some("…")),
            style(format!("{} habit(s)", count)).dim()
        ));
    }
    out
}

pub fn habit_details(habit: &Habit, category: Option<&Category>, stats: &HabitStats, window_days: i64) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", style(format!("#{}", habit.id)).dim(), style(&habit.title).bold()));
    if let Some(description) = habit.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("  {}\n", description));
    }
    out.push_str(&format!("  Schedule:  {}\n", habit.schedule_summary()));
    out.push_str(&format!("  Dates:     {}\n", date_range(habit)));
    if let Some(category) = category {
        out.push_str(&format!("  Category:  {}\n", category.title));
    }
    out.push('\n');
    out.push_str(&stats_block(stats, window_days));
    out
}

pub fn stats_block(stats: &HabitStats, window_days: i64) -> String {
    let mut out = String::new();
    out.push_str(&format!("  Last {} days\n", window_days));
    out.push_str(&format!(
        "    Completed: {}/{} due days ({:.0}%)\n",
        stats.completed_days,
        stats.due_days,
        stats.rate() * 100.0
    ));
    out.push_str(&format!(
        "    Streak:    {}{} (longest {})\n",
        STREAK, stats.current_streak, stats.longest_streak
    ));
    out
}

/// Habits due on `date` with check marks.
pub fn day_view(habits: &[Habit], completions: &[HabitCompletion], date: NaiveDate) -> String {
    let due = habits_due_on_date(habits, date);
    let mut out = format!("{}\n", style(date.format("%A, %-d %B %Y")).bold());
    if due.is_empty() {
        out.push_str(&format!("  {}\n", style("Nothing scheduled.").dim()));
        return out;
    }
    let mut done = 0;
    for habit in &due {
        if is_habit_completed(habit, completions, date) {
            done += 1;
            out.push_str(&format!(
                "  [{}] {} {}\n",
                style(DONE).green(),
                style(&habit.title).strikethrough(),
                style(format!("#{}", habit.id)).dim()
            ));
        } else {
            out.push_str(&format!(
                "  [{}] {} {}\n",
                PENDING,
                habit.title,
                style(format!("#{}", habit.id)).dim()
            ));
        }
    }
    out.push_str(&format!("  {}/{} done\n", done, due.len()));
    out
}
