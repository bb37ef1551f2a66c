use anyhow::{Result, bail};
use std::process;

use sous_core::coordinator::{RequestCoordinator, RequestOutcome};
use sous_core::models::{
    Cuisine, DietaryPreference, MIN_INGREDIENTS, Preferences, validate_ingredient_name,
};
use sous_core::store::PersistentStore;

use crate::config::InferenceConfig;

use super::helpers::{json_error, short_id};
use super::ingredient::load_ingredients;

fn parse_preferences(diets: &[String], cuisine: Option<&str>) -> Result<Preferences> {
    let dietary = diets
        .iter()
        .map(|d| d.parse::<DietaryPreference>())
        .collect::<Result<Vec<_>, _>>()?;
    let cuisine = match cuisine {
        Some(c) => c.parse::<Cuisine>()?,
        None => Cuisine::Any,
    };
    Ok(Preferences::new(dietary, cuisine))
}

/// Saved ingredient list followed by one-off `--ingredient` values.
fn collect_ingredients(saved: Vec<String>, extra: &[String]) -> Result<Vec<String>> {
    let mut names = saved;
    for name in extra {
        names.push(validate_ingredient_name(name)?);
    }
    if names.len() < MIN_INGREDIENTS {
        bail!(
            "Need at least {MIN_INGREDIENTS} ingredients to generate a recipe (have {}). \
             Add some with: sous ingredient add <name>",
            names.len()
        );
    }
    Ok(names)
}

pub(crate) async fn cmd_generate(
    coord: &RequestCoordinator,
    store: &PersistentStore,
    inference: &InferenceConfig,
    diets: &[String],
    cuisine: Option<&str>,
    extra: &[String],
    json: bool,
) -> Result<()> {
    inference.require_token()?;
    let preferences = parse_preferences(diets, cuisine)?;
    let ingredients = collect_ingredients(load_ingredients(store).names(), extra)?;

    if !json {
        eprintln!("Generating a recipe with {}...", ingredients.join(", "));
    }

    match coord.request_recipe(ingredients, preferences).await {
        RequestOutcome::Completed(record) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("{}", record.recipe_text.trim_end());
                println!();
                let id = short_id(&record.id);
                println!("Saved to history as {id}. Rate it with: sous rate {id} <0-5>");
            }
            Ok(())
        }
        RequestOutcome::Failed(message) => {
            if json {
                println!("{}", json_error(&message));
            } else {
                eprintln!("{message}");
            }
            process::exit(1);
        }
        RequestOutcome::Superseded => bail!("Recipe request was superseded by a newer one"),
    }
}
