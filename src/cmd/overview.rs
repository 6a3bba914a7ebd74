//! Progress views: `habitual today`, `habitual calendar`, `habitual stats`.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use habitual::calendar::{MonthView, YearMonth};
use habitual::models::{CompletionQuery, Habit, find_category, find_habit};
use habitual::recurrence::completion_stats;
use habitual::ui::icons::PROGRESS;
use habitual::ui::{calendar, views, with_spinner};

use super::AppContext;
use super::context::today;

pub async fn cmd_today(ctx: &AppContext, date: Option<NaiveDate>) -> Result<()> {
    let (client, _) = ctx.authed_client()?;
    let date = date.unwrap_or_else(today);

    let day_query = CompletionQuery::between(date, date);
    let (habits, completions) = with_spinner("Loading...", async {
        tokio::try_join!(
            client.list_habits(None),
            client.list_completions(&day_query)
        )
    })
    .await?;

    print!("{}", views::day_view(&habits, &completions, date));
    Ok(())
}

pub async fn cmd_calendar(
    ctx: &AppContext,
    month: Option<&str>,
    habit: Option<&str>,
    category: Option<&str>,
) -> Result<()> {
    let (client, _) = ctx.authed_client()?;
    let now = today();
    let month = match month {
        Some(m) => YearMonth::parse(m)?,
        None => YearMonth::of(now),
    };
    let query = CompletionQuery::between(month.first_day(), month.last_day());

    let (habits, completions, categories) = with_spinner("Loading...", async {
        tokio::try_join!(
            client.list_habits(None),
            client.list_completions(&query),
            client.list_categories()
        )
    })
    .await?;

    let selected: Vec<Habit> = match (habit, category) {
        (Some(h), _) => vec![find_habit(&habits, h)?.clone()],
        (None, Some(c)) => {
            let category_id = find_category(&categories, c)?.id;
            habits
                .into_iter()
                .filter(|h| h.category_id == Some(category_id))
                .collect()
        }
        (None, None) => habits,
    };

    let view = MonthView::build(month, ctx.config.week_start, &selected, &completions, now);
    print!("{}", calendar::render_month(&view));
    Ok(())
}

/// Longest window `habitual stats --days` accepts.
pub const MAX_STATS_DAYS: u32 = 3650;

/// First day of a `days`-long window ending on `to`.
fn window_start(to: NaiveDate, days: u32) -> Result<NaiveDate> {
    if !(1..=MAX_STATS_DAYS).contains(&days) {
        anyhow::bail!("--days must be between 1 and {}", MAX_STATS_DAYS);
    }
    to.checked_sub_signed(Duration::days(i64::from(days) - 1))
        .with_context(|| format!("A {}-day window ending {} is out of range", days, to))
}

pub async fn cmd_stats(ctx: &AppContext, query: &str, days: u32) -> Result<()> {
    let to = today();
    let from = window_start(to, days)?;

    let (client, _) = ctx.authed_client()?;
    let habits = client.list_habits(None).await?;
    let habit = find_habit(&habits, query)?;

    let history_query = CompletionQuery::between(from, to).for_habit(habit.id);
    let completions =
        with_spinner("Loading history...", client.list_completions(&history_query)).await?;
    let stats = completion_stats(habit, &completions, from, to);

    println!("{}{} ({})", PROGRESS, habit.title, habit.schedule_summary());
    print!("{}", views::stats_block(&stats, i64::from(days)));
    Ok(())
}
