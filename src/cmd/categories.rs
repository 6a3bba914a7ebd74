//! Category commands: `habitual categories`.

use anyhow::Result;
use habitual::models::{CategoryDraft, find_category};
use habitual::ui::{notify, views, with_spinner};
use habitual::validation::validate_category;

use super::super::CategoriesCommands;
use super::AppContext;

pub async fn cmd_categories(ctx: &AppContext, command: Option<CategoriesCommands>) -> Result<()> {
    let (client, _) = ctx.authed_client()?;

    match command {
        None | Some(CategoriesCommands::List) => {
            let (categories, habits) = with_spinner("Loading categories...", async {
                tokio::try_join!(client.list_categories(), client.list_habits(None))
            })
            .await?;
            if categories.is_empty() {
                println!("No categories yet.");
                println!();
                println!("Create one with:");
                println!("  habitual categories add Health");
                return Ok(());
            }
            print!("{}", views::category_list(&categories, &habits));
        }
        Some(CategoriesCommands::Add { title }) => {
            let draft = CategoryDraft {
                title: title.trim().to_string(),
            };
            validate_category(&draft)?;
            let category = with_spinner("Creating category...", client.create_category(&draft)).await?;
            notify::success(format!("Created category #{} '{}'", category.id, category.title));
        }
        Some(CategoriesCommands::Rename { category, title }) => {
            let categories = client.list_categories().await?;
            let existing = find_category(&categories, &category)?;
            let draft = CategoryDraft {
                title: title.trim().to_string(),
            };
            validate_category(&draft)?;
            let renamed = with_spinner(
                "Renaming category...",
                client.update_category(existing.id, &draft),
            )
            .await?;
            notify::success(format!("Renamed '{}' to '{}'", existing.title, renamed.title));
        }
        Some(CategoriesCommands::Delete { category }) => {
            let categories = client.list_categories().await?;
            let existing = find_category(&categories, &category)?;
            if !ctx.confirm(&format!("Delete category '{}'?", existing.title)) {
                println!("Deletion cancelled.");
                return Ok(());
            }
            with_spinner("Deleting category...", client.delete_category(existing.id)).await?;
            notify::success(format!("Deleted category '{}'", existing.title));
        }
    }

    Ok(())
}
