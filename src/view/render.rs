use crate::logic::Draft;
use crate::model::{format_cost, Id, Ingredient};
use serde::Serialize;
use std::fmt;

/// Everything a front end needs to draw the workspace. Plain data, rebuilt
/// on every render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkspaceView {
    pub recipes: Vec<RecipeCard>,
    pub ingredients: Vec<IngredientRow>,
    pub new_recipe_name: String,
    pub new_recipe_cost: f64,
    pub new_ingredient_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeCard {
    pub id: Id,
    pub title: String,
    pub editing: bool,
    pub draft: Option<Draft>,
    pub last_failure: Option<String>,
    /// Resolved ingredients, in reference order.
    pub ingredients: Vec<Ingredient>,
    pub selected_ingredient: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientRow {
    pub id: Id,
    pub name: String,
    pub editing: bool,
    pub draft: Option<Draft>,
    pub last_failure: Option<String>,
}

impl fmt::Display for WorkspaceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Recipes")?;
        if self.recipes.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for card in &self.recipes {
            writeln!(f, "  {}{}", card.title, if card.editing { " [editing]" } else { "" })?;
            for ingredient in &card.ingredients {
                writeln!(f, "    - {}", ingredient.name)?;
            }
            if let Some(reason) = &card.last_failure {
                writeln!(f, "    ! {}", reason)?;
            }
        }

        writeln!(f, "Ingredients")?;
        if self.ingredients.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for row in &self.ingredients {
            writeln!(f, "  {}{}", row.name, if row.editing { " [editing]" } else { "" })?;
            if let Some(reason) = &row.last_failure {
                writeln!(f, "    ! {}", reason)?;
            }
        }

        if !self.new_recipe_name.is_empty() || self.new_recipe_cost != 0.0 {
            writeln!(
                f,
                "New recipe: {} (${})",
                self.new_recipe_name,
                format_cost(self.new_recipe_cost)
            )?;
        }
        Ok(())
    }
}
