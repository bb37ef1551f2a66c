use anyhow::{Result, bail};
use std::process;

use sous_core::coordinator::RequestCoordinator;
use sous_core::models::HistoryRecord;

use super::helpers::{json_error, print_history_table, prompt_confirm, short_id, stars};
use super::resolve_record;

fn not_found(id: &str, json: bool) -> ! {
    if json {
        println!("{}", json_error(&format!("No recipe matching '{id}'")));
    } else {
        eprintln!("No recipe matching '{id}'. List them with: sous history");
    }
    process::exit(2);
}

/// Resolve `id` and make that record the active one.
fn select(coord: &RequestCoordinator, id: &str, json: bool) -> Result<HistoryRecord> {
    let Some(found) = resolve_record(coord, id)? else {
        not_found(id, json)
    };
    match coord.select_history_record(&found.id) {
        Some(record) => Ok(record),
        None => not_found(id, json),
    }
}

pub(crate) fn cmd_history(coord: &RequestCoordinator, favorites: bool, json: bool) -> Result<()> {
    let records = coord.history(favorites);
    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        if favorites {
            println!("No favorite recipes yet. Mark one with: sous favorite <id>");
        } else {
            println!("No recipes yet. Generate one with: sous generate");
        }
        return Ok(());
    }
    print_history_table(&records);
    Ok(())
}

pub(crate) fn cmd_show(coord: &RequestCoordinator, id: &str, json: bool) -> Result<()> {
    let record = select(coord, id, json)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let when = record
        .created_at
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M");
    println!("Recipe {} ({when})", short_id(&record.id));
    println!("Ingredients: {}", record.ingredients.join(", "));
    if !record.dietary_preferences.is_empty() {
        let diet: Vec<&str> = record.dietary_preferences.iter().map(|p| p.label()).collect();
        println!("Diet: {}", diet.join(", "));
    }
    if !record.cuisine_type.is_any() {
        println!("Cuisine: {}", record.cuisine_type);
    }
    let favorite = if record.is_favorite { "  (favorite)" } else { "" };
    println!("Rating: {}{favorite}", stars(record.rating));
    println!();
    println!("{}", record.recipe_text.trim_end());
    Ok(())
}

pub(crate) fn cmd_rate(coord: &RequestCoordinator, id: &str, rating: u8, json: bool) -> Result<()> {
    let record = select(coord, id, json)?;
    let Some(updated) = coord.rate(rating)? else {
        bail!("Could not rate recipe {}", short_id(&record.id));
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&updated)?);
    } else {
        println!("Rated {} {}", updated.title(), stars(updated.rating));
    }
    Ok(())
}

pub(crate) fn cmd_favorite(coord: &RequestCoordinator, id: &str, json: bool) -> Result<()> {
    let record = select(coord, id, json)?;
    let Some((toggled_id, is_favorite)) = coord.toggle_favorite() else {
        bail!("Could not update recipe {}", short_id(&record.id));
    };

    if json {
        println!(
            "{}",
            serde_json::json!({ "id": toggled_id, "isFavorite": is_favorite })
        );
    } else if is_favorite {
        println!("Added {} to favorites", record.title());
    } else {
        println!("Removed {} from favorites", record.title());
    }
    Ok(())
}

pub(crate) fn cmd_clear_history(coord: &RequestCoordinator, yes: bool, json: bool) -> Result<()> {
    let count = coord.history(false).len();
    if count > 0 && !yes {
        if json {
            bail!("Refusing to clear history without --yes");
        }
        if !prompt_confirm(&format!("Delete all {count} saved recipe(s)?"))? {
            println!("Cancelled");
            return Ok(());
        }
    }

    coord.clear_history();
    if json {
        println!("{}", serde_json::json!({ "cleared": count }));
    } else {
        println!("Cleared {count} recipe(s) from history");
    }
    Ok(())
}
