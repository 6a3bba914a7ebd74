//! Habit management commands: `habitual habits`.

use anyhow::Result;
use chrono::Duration;
use habitual::ApiClient;
use habitual::models::{
    Category, CompletionQuery, Frequency, Habit, HabitDraft, find_category, find_habit,
    parse_day_list,
};
use habitual::recurrence::completion_stats;
use habitual::ui::{notify, views, with_spinner};
use habitual::validation::validate_habit;

use super::context::today;
use super::super::{HabitFields, HabitsCommands};
use super::AppContext;

pub const DETAIL_WINDOW_DAYS: i64 = 30;

pub async fn cmd_habits(ctx: &AppContext, command: Option<HabitsCommands>) -> Result<()> {
    let (client, _) = ctx.authed_client()?;

    match command {
        None => list(&client, None).await,
        Some(HabitsCommands::List { category }) => list(&client, category.as_deref()).await,
        Some(HabitsCommands::Show { habit }) => show(&client, &habit).await,
        Some(HabitsCommands::Add { title, fields }) => add(&client, title, fields).await,
        Some(HabitsCommands::Edit {
            habit,
            title,
            fields,
            no_end,
            no_category,
        }) => edit(&client, &habit, title, fields, no_end, no_category).await,
        Some(HabitsCommands::Delete { habit }) => delete(ctx, &client, &habit).await,
    }
}

async fn list(client: &ApiClient, category: Option<&str>) -> Result<()> {
    let categories = with_spinner("Loading categories...", client.list_categories()).await?;
    let category_id = resolve_category(&categories, category)?;
    let habits = with_spinner("Loading habits...", client.list_habits(category_id)).await?;

    if habits.is_empty() {
        println!("No habits yet.");
        println!();
        println!("Create one with:");
        println!("  habitual habits add \"Drink water\" --frequency daily");
        return Ok(());
    }
    print!("{}", views::habit_table(&habits, &categories));
    println!();
    println!("{} habit(s)", habits.len());
    Ok(())
}

async fn show(client: &ApiClient, query: &str) -> Result<()> {
    let (habits, categories) = tokio::try_join!(client.list_habits(None), client.list_categories())?;
    let habit = find_habit(&habits, query)?;

    let to = today();
    let from = to - Duration::days(DETAIL_WINDOW_DAYS - 1);
    let completions = client
        .list_completions(&CompletionQuery::between(from, to).for_habit(habit.id))
        .await?;
    let stats = completion_stats(habit, &completions, from, to);
    let category = habit
        .category_id
        .and_then(|id| categories.iter().find(|c| c.id == id));

    print!("{}", views::habit_details(habit, category, &stats, DETAIL_WINDOW_DAYS));
    Ok(())
}

fn resolve_category(categories: &[Category], query: Option<&str>) -> Result<Option<i64>> {
    query
        .map(|q| find_category(categories, q).map(|c| c.id))
        .transpose()
}

/// Apply the command-line fields on top of `draft`.
fn apply_fields(draft: &mut HabitDraft, fields: &HabitFields, categories: &[Category]) -> Result<()> {
    if let Some(frequency) = fields.frequency {
        draft.frequency = frequency;
    }
    if let Some(every) = fields.every {
        draft.repeat_interval = every;
    }
    if let Some(days) = &fields.days {
        draft.custom_days = parse_day_list(days)?;
    }
    if let Some(start) = fields.start {
        draft.start_date = start;
    }
    if fields.end.is_some() {
        draft.end_date = fields.end;
    }
    if let Some(id) = resolve_category(categories, fields.category.as_deref())? {
        draft.category_id = Some(id);
    }
    if let Some(description) = &fields.description {
        draft.description = Some(description.clone()).filter(|d| !d.trim().is_empty());
    }
    // Days only mean something for custom schedules.
    if draft.frequency != Frequency::Custom {
        draft.custom_days.clear();
    }
    Ok(())
}

async fn add(client: &ApiClient, title: String, fields: HabitFields) -> Result<()> {
    let categories = client.list_categories().await?;
    let mut draft = HabitDraft {
        title: title.trim().to_string(),
        description: None,
        frequency: Frequency::Daily,
        repeat_interval: 1,
        custom_days: Vec::new(),
        start_date: today(),
        end_date: None,
        category_id: None,
    };
    apply_fields(&mut draft, &fields, &categories)?;
    validate_habit(&draft)?;

    let habit = with_spinner("Creating habit...", client.create_habit(&draft)).await?;
    tracing::info!(habit_id = habit.id, "habit created");
    notify::success(format!(
        "Created habit #{} '{}' ({})",
        habit.id,
        habit.title,
        habit.schedule_summary()
    ));
    Ok(())
}

async fn edit(
    client: &ApiClient,
    query: &str,
    title: Option<String>,
    fields: HabitFields,
    no_end: bool,
    no_category: bool,
) -> Result<()> {
    let (habits, categories) = tokio::try_join!(client.list_habits(None), client.list_categories())?;
    let habit: &Habit = find_habit(&habits, query)?;

    let mut draft = HabitDraft::from(habit);
    if let Some(title) = title {
        draft.title = title.trim().to_string();
    }
    apply_fields(&mut draft, &fields, &categories)?;
    if no_end {
        draft.end_date = None;
    }
    if no_category {
        draft.category_id = None;
    }
    if draft == HabitDraft::from(habit) {
        notify::info("Nothing to change.");
        return Ok(());
    }
    validate_habit(&draft)?;

    let updated = with_spinner("Saving habit...", client.update_habit(habit.id, &draft)).await?;
    notify::success(format!(
        "Updated habit #{} '{}' ({})",
        updated.id,
        updated.title,
        updated.schedule_summary()
    ));
    Ok(())
}

async fn delete(ctx: &AppContext, client: &ApiClient, query: &str) -> Result<()> {
    let habits = client.list_habits(None).await?;
    let habit = find_habit(&habits, query)?;

    if !ctx.confirm(&format!("Delete habit '{}' and its history?", habit.title)) {
        println!("Deletion cancelled.");
        return Ok(());
    }
    with_spinner("Deleting habit...", client.delete_habit(habit.id)).await?;
    notify::success(format!("Deleted habit '{}'", habit.title));
    Ok(())
}
