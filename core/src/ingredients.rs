use serde::{Deserialize, Serialize};

use crate::error::SousError;
use crate::models::{Ingredient, validate_ingredient_name};
use crate::providers::IdProvider;

/// The ingredients the user is collecting for the next request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientList {
    items: Vec<Ingredient>,
}

impl IngredientList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, ids: &dyn IdProvider) -> Result<&Ingredient, SousError> {
        let name = validate_ingredient_name(name)?;
        self.items.push(Ingredient {
            id: ids.next_id(),
            name,
        });
        Ok(&self.items[self.items.len() - 1])
    }

    /// Remove by id, returning the removed ingredient.
    pub fn remove(&mut self, id: &str) -> Option<Ingredient> {
        let idx = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(idx))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn items(&self) -> &[Ingredient] {
        &self.items
    }

    /// Names in insertion order, as sent to the model.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|i| i.name.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
