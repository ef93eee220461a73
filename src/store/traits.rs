use crate::model::{Id, Ingredient, IngredientPatch, NewIngredient, NewRecipe, Recipe, RecipePatch};
use anyhow::Result;

#[async_trait::async_trait]
pub trait IngredientCollection: Send + Sync {
    async fn list_ingredients(&self) -> Result<Vec<Ingredient>>;
    async fn create_ingredient(&self, new_ingredient: NewIngredient) -> Result<Ingredient>;
    /// Returns `None` when no ingredient has this id.
    async fn update_ingredient(&self, id: &Id, patch: IngredientPatch) -> Result<Option<Ingredient>>;
    async fn delete_ingredient(&self, id: &Id) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait RecipeCollection: Send + Sync {
    async fn list_recipes(&self) -> Result<Vec<Recipe>>;
    async fn create_recipe(&self, new_recipe: NewRecipe) -> Result<Recipe>;
    async fn update_recipe(&self, id: &Id, patch: RecipePatch) -> Result<Option<Recipe>>;
    async fn delete_recipe(&self, id: &Id) -> Result<bool>;
    /// Appends a reference; the same ingredient may be referenced twice.
    async fn add_recipe_ingredient(&self, recipe_id: &Id, ingredient_id: &Id) -> Result<Option<Recipe>>;
    /// Removes every reference to the ingredient from the recipe.
    async fn remove_recipe_ingredient(&self, recipe_id: &Id, ingredient_id: &Id) -> Result<Option<Recipe>>;
}

pub trait Store: IngredientCollection + RecipeCollection + Send + Sync {}
impl<T: IngredientCollection + RecipeCollection + Send + Sync> Store for T {}
