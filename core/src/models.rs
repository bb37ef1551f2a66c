use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SousError;

pub const MAX_RATING: u8 = 5;

/// Fewest ingredients a user-facing surface will send to the model.
pub const MIN_INGREDIENTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DietaryPreference {
    Vegetarian,
    Vegan,
    #[serde(rename = "Gluten-free")]
    GlutenFree,
    #[serde(rename = "Low-carb")]
    LowCarb,
    #[serde(rename = "Dairy-free")]
    DairyFree,
    #[serde(rename = "Nut-free")]
    NutFree,
}

impl DietaryPreference {
    pub const ALL: &'static [DietaryPreference] = &[
        Self::Vegetarian,
        Self::Vegan,
        Self::GlutenFree,
        Self::LowCarb,
        Self::DairyFree,
        Self::NutFree,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::GlutenFree => "Gluten-free",
            Self::LowCarb => "Low-carb",
            Self::DairyFree => "Dairy-free",
            Self::NutFree => "Nut-free",
        }
    }
}

impl fmt::Display for DietaryPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DietaryPreference {
    type Err = SousError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Self::ALL
            .iter()
            .copied()
            .find(|p| normalize_label(p.label()) == wanted)
            .ok_or_else(|| {
                let options: Vec<&str> = Self::ALL.iter().map(|p| p.label()).collect();
                SousError::invalid(format!(
                    "Invalid dietary preference '{s}'. Must be one of: {}",
                    options.join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cuisine {
    #[default]
    Any,
    Italian,
    Asian,
    Mexican,
    Indian,
    Mediterranean,
    American,
    French,
    #[serde(rename = "Surprise me!")]
    SurpriseMe,
}

impl Cuisine {
    pub const ALL: &'static [Cuisine] = &[
        Self::Any,
        Self::Italian,
        Self::Asian,
        Self::Mexican,
        Self::Indian,
        Self::Mediterranean,
        Self::American,
        Self::French,
        Self::SurpriseMe,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Any => "Any",
            Self::Italian => "Italian",
            Self::Asian => "Asian",
            Self::Mexican => "Mexican",
            Self::Indian => "Indian",
            Self::Mediterranean => "Mediterranean",
            Self::American => "American",
            Self::French => "French",
            Self::SurpriseMe => "Surprise me!",
        }
    }

    /// `Any` places no constraint on the recipe.
    #[must_use]
    pub fn is_any(self) -> bool {
        self == Self::Any
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Cuisine {
    type Err = SousError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        // "surprise" is accepted as shorthand on the command line
        if wanted == "surprise" {
            return Ok(Self::SurpriseMe);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|c| normalize_label(c.label()) == wanted)
            .ok_or_else(|| {
                let options: Vec<&str> = Self::ALL.iter().map(|c| c.label()).collect();
                SousError::invalid(format!(
                    "Invalid cuisine '{s}'. Must be one of: {}",
                    options.join(", ")
                ))
            })
    }
}

/// Lowercase and keep only letters and digits, so "gluten free", "Gluten-free"
/// and "GLUTEN_FREE" all match.
fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Dietary and cuisine constraints for one generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub dietary_preferences: BTreeSet<DietaryPreference>,
    #[serde(default)]
    pub cuisine_type: Cuisine,
}

impl Preferences {
    #[must_use]
    pub fn new(dietary: impl IntoIterator<Item = DietaryPreference>, cuisine: Cuisine) -> Self {
        Self {
            dietary_preferences: dietary.into_iter().collect(),
            cuisine_type: cuisine,
        }
    }
}

/// Transient input to a single generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub ingredient_names: Vec<String>,
    pub preferences: Preferences,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
}

/// One generated recipe. Everything except `rating` and `is_favorite` is fixed
/// at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: String,
    #[serde(rename = "recipe")]
    pub recipe_text: String,
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub dietary_preferences: BTreeSet<DietaryPreference>,
    #[serde(default)]
    pub cuisine_type: Cuisine,
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub is_favorite: bool,
}

impl HistoryRecord {
    #[must_use]
    pub fn new(
        id: String,
        recipe_text: String,
        request: &GenerationRequest,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            recipe_text,
            ingredients: request.ingredient_names.clone(),
            dietary_preferences: request.preferences.dietary_preferences.clone(),
            cuisine_type: request.preferences.cuisine_type,
            created_at,
            rating: 0,
            is_favorite: false,
        }
    }

    /// Short title for list views: the first three ingredients.
    #[must_use]
    pub fn title(&self) -> String {
        let shown: Vec<&str> = self.ingredients.iter().take(3).map(String::as_str).collect();
        let mut title = shown.join(", ");
        if self.ingredients.len() > 3 {
            title.push_str("...");
        }
        title
    }
}

pub fn validate_rating(rating: u8) -> Result<u8, SousError> {
    if rating > MAX_RATING {
        return Err(SousError::invalid(format!(
            "Rating must be between 0 and {MAX_RATING} (got {rating})"
        )));
    }
    Ok(rating)
}

pub fn validate_ingredient_name(name: &str) -> Result<String, SousError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SousError::invalid("Ingredient name must not be empty"));
    }
    Ok(trimmed.to_string())
}
