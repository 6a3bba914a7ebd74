//! Completion commands: `habitual done` and `habitual undo`.

use anyhow::Result;
use chrono::NaiveDate;
use habitual::models::{CompletionDraft, CompletionQuery, find_habit};
use habitual::recurrence::{are_all_habits_of_date_completed, must_habit_be_done_on_date};
use habitual::ui::icons::SPARKLE;
use habitual::ui::{notify, with_spinner};

use super::AppContext;
use super::context::today;

pub async fn cmd_done(ctx: &AppContext, query: &str, date: Option<NaiveDate>) -> Result<()> {
    let (client, _) = ctx.authed_client()?;
    let date = date.unwrap_or_else(today);
    if date > today() {
        anyhow::bail!("Cannot complete a habit on {}, which is in the future", date);
    }

    let day_query = CompletionQuery::between(date, date);
    let (habits, completions) = with_spinner("Loading habits...", async {
        tokio::try_join!(
            client.list_habits(None),
            client.list_completions(&day_query)
        )
    })
    .await?;
    let habit = find_habit(&habits, query)?;

    if !must_habit_be_done_on_date(habit, date) {
        anyhow::bail!(
            "'{}' is not scheduled on {} ({})",
            habit.title,
            date,
            habit.schedule_summary()
        );
    }
    if completions
        .iter()
        .any(|c| c.habit_id == habit.id && c.date == date)
    {
        notify::info(format!("'{}' is already done for {}", habit.title, date));
        return Ok(());
    }

    let draft = CompletionDraft {
        habit_id: habit.id,
        date,
    };
    let created = with_spinner("Saving...", client.create_completion(&draft)).await?;
    tracing::info!(habit_id = habit.id, completion_id = created.id, %date, "completion recorded");
    notify::success(format!("Marked '{}' done for {}", habit.title, date));

    let mut completions = completions;
    completions.push(created);
    if are_all_habits_of_date_completed(&habits, &completions, date) {
        println!("{}All habits for {} are done!", SPARKLE, date);
    }
    Ok(())
}

pub async fn cmd_undo(ctx: &AppContext, query: &str, date: Option<NaiveDate>) -> Result<()> {
    let (client, _) = ctx.authed_client()?;
    let date = date.unwrap_or_else(today);

    let habits = client.list_habits(None).await?;
    let habit = find_habit(&habits, query)?;
    let completions = client
        .list_completions(&CompletionQuery::between(date, date).for_habit(habit.id))
        .await?;

    let matching: Vec<_> = completions
        .iter()
        .filter(|c| c.habit_id == habit.id && c.date == date)
        .collect();
    if matching.is_empty() {
        notify::info(format!("'{}' has no completion on {}", habit.title, date));
        return Ok(());
    }
    for completion in matching {
        with_spinner("Removing...", client.delete_completion(completion.id)).await?;
    }
    notify::success(format!("Removed completion of '{}' for {}", habit.title, date));
    Ok(())
}
