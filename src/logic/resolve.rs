use crate::model::{Id, Ingredient, Recipe};
use std::collections::HashMap;

/// Looks up each referenced id in the ingredient snapshot, keeping the order
/// of `ids`. References with no matching ingredient are skipped. When the
/// snapshot holds the same id twice the first entry wins.
pub fn resolve_ingredients<'a>(ids: &[Id], snapshot: &'a [Ingredient]) -> Vec<&'a Ingredient> {
    let mut by_id: HashMap<&str, &'a Ingredient> = HashMap::with_capacity(snapshot.len());
    for ingredient in snapshot {
        by_id.entry(ingredient.id.as_str()).or_insert(ingredient);
    }

    ids.iter()
        .filter_map(|id| by_id.get(id.as_str()).copied())
        .collect()
}

/// A recipe together with the ingredients its references resolve to right now.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRecipe {
    pub recipe: Recipe,
    pub ingredients: Vec<Ingredient>,
}

impl ResolvedRecipe {
    pub fn resolve(recipe: &Recipe, snapshot: &[Ingredient]) -> Self {
        Self {
            recipe: recipe.clone(),
            ingredients: resolve_ingredients(&recipe.ingredient_ids, snapshot)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    pub fn ingredient_names(&self) -> Vec<&str> {
        self.ingredients.iter().map(|i| i.name.as_str()).collect()
    }
}
