use anyhow::Result;
use std::process;

use sous_core::ingredients::IngredientList;
use sous_core::models::{Ingredient, MIN_INGREDIENTS};
use sous_core::providers::UuidProvider;
use sous_core::store::{INGREDIENTS_KEY, PersistentStore};

use super::helpers::json_error;

pub(crate) fn load_ingredients(store: &PersistentStore) -> IngredientList {
    store.load(INGREDIENTS_KEY, IngredientList::new())
}

fn save_ingredients(store: &PersistentStore, list: &IngredientList) {
    if !store.save(INGREDIENTS_KEY, list) {
        eprintln!("Warning: ingredient list could not be saved");
    }
}

/// Match by 1-based position, exact id, or case-insensitive name.
fn find_ingredient<'a>(list: &'a IngredientList, target: &str) -> Option<&'a Ingredient> {
    let target = target.trim();
    if let Ok(n) = target.parse::<usize>() {
        if let Some(item) = n.checked_sub(1).and_then(|i| list.items().get(i)) {
            return Some(item);
        }
    }
    list.items()
        .iter()
        .find(|i| i.id == target)
        .or_else(|| {
            list.items()
                .iter()
                .find(|i| i.name.eq_ignore_ascii_case(target))
        })
}

pub(crate) fn cmd_ingredient_add(store: &PersistentStore, names: &[String], json: bool) -> Result<()> {
    let mut list = load_ingredients(store);
    let mut added = Vec::with_capacity(names.len());
    for name in names {
        added.push(list.add(name, &UuidProvider)?.clone());
    }
    save_ingredients(store, &list);

    if json {
        println!("{}", serde_json::to_string_pretty(&added)?);
    } else {
        for ingredient in &added {
            println!("Added {}", ingredient.name);
        }
        let count = list.len();
        if count < MIN_INGREDIENTS {
            println!("Add at least {MIN_INGREDIENTS} ingredients to generate a recipe ({count} so far)");
        } else {
            println!("{count} ingredients ready. Run: sous generate");
        }
    }
    Ok(())
}

pub(crate) fn cmd_ingredient_remove(store: &PersistentStore, target: &str, json: bool) -> Result<()> {
    let mut list = load_ingredients(store);
    let Some(id) = find_ingredient(&list, target).map(|i| i.id.clone()) else {
        if json {
            println!("{}", json_error(&format!("Ingredient '{target}' not found")));
        } else {
            eprintln!("Ingredient '{target}' not found");
        }
        process::exit(2);
    };

    if let Some(removed) = list.remove(&id) {
        save_ingredients(store, &list);
        if json {
            println!("{}", serde_json::to_string_pretty(&removed)?);
        } else {
            println!("Removed {}", removed.name);
        }
    }
    Ok(())
}

pub(crate) fn cmd_ingredient_list(store: &PersistentStore, json: bool) -> Result<()> {
    let list = load_ingredients(store);
    if json {
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    if list.is_empty() {
        println!("No ingredients yet. Add some with: sous ingredient add <name>");
        return Ok(());
    }
    println!("Your ingredients ({}):", list.len());
    for (i, ingredient) in list.items().iter().enumerate() {
        println!("  {}. {}", i + 1, ingredient.name);
    }
    Ok(())
}

pub(crate) fn cmd_ingredient_clear(store: &PersistentStore, json: bool) -> Result<()> {
    let mut list = load_ingredients(store);
    let count = list.len();
    list.clear();
    save_ingredients(store, &list);

    if json {
        println!("{}", serde_json::json!({ "cleared": count }));
    } else {
        println!("Cleared {count} ingredient(s)");
    }
    Ok(())
}
