//! Recurrence rules: is a habit due on a date, and was it done.
//!
//! Everything here is pure date arithmetic over [`Habit`] and
//! [`HabitCompletion`] records; nothing touches the network.
//!
//! | Frequency | Due when                                                            |
//! |-----------|---------------------------------------------------------------------|
//! | `daily`   | every active day                                                    |
//! | `weekly`  | the weekday matches `start_date`'s weekday                          |
//! | `monthly` | the day of month matches `start_date`'s (short months are skipped)  |
//! | `custom`  | the weekday is in `custom_days` and days since start divide evenly by `repeat_interval` |

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{DayOfWeek, Frequency, Habit, HabitCompletion};

/// True when `date` falls inside the habit's `[start_date, end_date]` window.
pub fn is_habit_active_on_date(habit: &Habit, date: NaiveDate) -> bool {
    habit.start_date <= date && habit.end_date.is_none_or(|end| end >= date)
}

/// True when the habit's recurrence rule schedules it on `date`.
pub fn must_habit_be_done_on_date(habit: &Habit, date: NaiveDate) -> bool {
    if !is_habit_active_on_date(habit, date) {
        return false;
    }

    match habit.frequency {
        Frequency::Daily => true,
        Frequency::Weekly => date.weekday() == habit.start_date.weekday(),
        Frequency::Monthly => date.day() == habit.start_date.day(),
        Frequency::Custom => {
            let day = DayOfWeek::from(date.weekday());
            if !habit.custom_days.contains(&day) {
                return false;
            }
            // An interval of 0 would divide by zero; treat it as "every day".
            let interval = i64::from(habit.repeat_interval.max(1));
            let days_since_start = (date - habit.start_date).num_days();
            days_since_start % interval == 0
        }
    }
}

/// True when the habit was due on `date` and a completion exists for that day.
pub fn is_habit_completed(habit: &Habit, completions: &[HabitCompletion], date: NaiveDate) -> bool {
    must_habit_be_done_on_date(habit, date)
        && completions
            .iter()
            .any(|c| c.habit_id == habit.id && c.date == date)
}

/// True when every habit due on `date` is completed. Vacuously true when none are due.
pub fn are_all_habits_of_date_completed(
    habits: &[Habit],
    completions: &[HabitCompletion],
    date: NaiveDate,
) -> bool {
    habits
        .iter()
        .filter(|h| must_habit_be_done_on_date(h, date))
        .all(|h| is_habit_completed(h, completions, date))
}

/// The habits due on `date`, in input order.
pub fn habits_due_on_date(habits: &[Habit], date: NaiveDate) -> Vec<&Habit> {
    habits
        .iter()
        .filter(|h| must_habit_be_done_on_date(h, date))
        .collect()
}

/// Summary of a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    /// No habit is scheduled.
    NothingDue,
    /// Every due habit has a completion.
    Complete,
    /// Some but not all due habits are done.
    Partial { done: usize, due: usize },
    /// Habits were due and none were done.
    Missed { due: usize },
}

pub fn day_status(habits: &[Habit], completions: &[HabitCompletion], date: NaiveDate) -> DayStatus {
    let due = habits_due_on_date(habits, date);
    if due.is_empty() {
        return DayStatus::NothingDue;
    }
    let done = due
        .iter()
        .filter(|h| is_habit_completed(h, completions, date))
        .count();
    match done {
        0 => DayStatus::Missed { due: due.len() },
        n if n == due.len() => DayStatus::Complete,
        n => DayStatus::Partial {
            done: n,
            due: due.len(),
        },
    }
}

/// Completion history of one habit over an inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HabitStats {
    pub due_days: u32,
    pub completed_days: u32,
    /// Consecutive completed due days ending at the range's last due day.
    /// A due `to` that is not yet done does not break the streak.
    pub current_streak: u32,
    pub longest_streak: u32,
}

impl HabitStats {
    /// Completed share of due days, 0.0 when nothing was due.
    pub fn rate(&self) -> f64 {
        if self.due_days == 0 {
            0.0
        } else {
            f64::from(self.completed_days) / f64::from(self.due_days)
        }
    }
}

pub fn completion_stats(
    habit: &Habit,
    completions: &[HabitCompletion],
    from: NaiveDate,
    to: NaiveDate,
) -> HabitStats {
    let mut stats = HabitStats::default();
    if from > to {
        return stats;
    }

    let mut run = 0u32;
    let mut date = from;
    while date <= to {
        if must_habit_be_done_on_date(habit, date) {
            stats.due_days += 1;
            if is_habit_completed(habit, completions, date) {
                stats.completed_days += 1;
                run += 1;
                stats.longest_streak = stats.longest_streak.max(run);
            } else if date != to {
                run = 0;
            }
        }
        date += Duration::days(1);
    }
    stats.current_streak = run;
    stats
}
