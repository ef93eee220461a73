use crate::client::{endpoints, Transport};
use crate::error::Result;
use crate::logic::{ResolvedRecipe, UpdateTarget};
use crate::model::{Id, NewRecipe, Recipe, RecipePatch};
use crate::sync::outcome::send_mutation;
use crate::sync::{fetch_list, log_refetch, IngredientStore, MutationOutcome};
use log::info;
use parking_lot::RwLock;
use std::sync::Arc;

/// Owns the local copy of the recipe collection and resolves recipe
/// ingredient references against the ingredient store.
pub struct RecipeStore {
    transport: Arc<dyn Transport>,
    ingredients: Arc<IngredientStore>,
    snapshot: RwLock<Arc<Vec<Recipe>>>,
}

impl RecipeStore {
    pub fn new(transport: Arc<dyn Transport>, ingredients: Arc<IngredientStore>) -> Self {
        Self {
            transport,
            ingredients,
            snapshot: RwLock::new(Arc::new(Vec::new())),
        }
    }

    pub fn snapshot(&self) -> Arc<Vec<Recipe>> {
        self.snapshot.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<Recipe> {
        self.snapshot.read().iter().find(|r| r.id == id).cloned()
    }

    /// Resolves one recipe against the current ingredient snapshot. Computed
    /// fresh on every call.
    pub fn resolved(&self, id: &str) -> Option<ResolvedRecipe> {
        let recipe = self.get(id)?;
        Some(ResolvedRecipe::resolve(&recipe, &self.ingredients.snapshot()))
    }

    pub fn resolved_all(&self) -> Vec<ResolvedRecipe> {
        let ingredients = self.ingredients.snapshot();
        self.snapshot()
            .iter()
            .map(|recipe| ResolvedRecipe::resolve(recipe, &ingredients))
            .collect()
    }

    /// Replaces the snapshot with the service's current collection.
    pub async fn list(&self) -> Result<Arc<Vec<Recipe>>> {
        let recipes: Vec<Recipe> =
            fetch_list(self.transport.as_ref(), endpoints::list_recipes()).await?;
        info!("recipe snapshot replaced ({} items)", recipes.len());

        let snapshot = Arc::new(recipes);
        *self.snapshot.write() = snapshot.clone();
        Ok(snapshot)
    }

    /// Creates a recipe with no preparation time and no ingredients.
    ///
    /// Post-condition: recipes have been refetched.
    pub async fn create(&self, name: &str, approx_cost: f64) -> Result<MutationOutcome> {
        let request = endpoints::create_recipe(&NewRecipe::new(name, approx_cost))?;
        self.mutate_then_list(request).await
    }

    /// Post-condition: recipes have been refetched, whatever the outcome.
    pub async fn update(&self, id: &str, patch: &RecipePatch) -> Result<MutationOutcome> {
        let request = endpoints::update_recipe(id, patch)?;
        self.mutate_then_list(request).await
    }

    /// Deletes a recipe.
    ///
    /// Post-condition: recipes AND ingredients have been refetched, since the
    /// service may have changed ingredients as a side effect.
    pub async fn remove(&self, id: &str) -> Result<MutationOutcome> {
        let outcome = send_mutation(self.transport.as_ref(), endpoints::delete_recipe(id)).await?;
        // Both fetches run to completion even if one of them fails.
        let (recipes, ingredients) = tokio::join!(self.list(), self.ingredients.list());
        log_refetch("recipes", recipes);
        log_refetch("ingredients", ingredients);
        Ok(outcome)
    }

    /// Appends an ingredient reference. Repeating the call sends it again;
    /// the service decides whether that creates a duplicate.
    ///
    /// Post-condition: recipes have been refetched.
    pub async fn add_ingredient(&self, recipe_id: &str, ingredient_id: &str) -> Result<MutationOutcome> {
        self.mutate_then_list(endpoints::add_recipe_ingredient(recipe_id, ingredient_id))
            .await
    }

    /// Post-condition: recipes have been refetched.
    pub async fn remove_ingredient(
        &self,
        recipe_id: &str,
        ingredient_id: &str,
    ) -> Result<MutationOutcome> {
        self.mutate_then_list(endpoints::remove_recipe_ingredient(recipe_id, ingredient_id))
            .await
    }

    async fn mutate_then_list(&self, request: crate::client::ApiRequest) -> Result<MutationOutcome> {
        let outcome = send_mutation(self.transport.as_ref(), request).await?;
        log_refetch("recipes", self.list().await);
        Ok(outcome)
    }
}

#[async_trait::async_trait]
impl UpdateTarget<Recipe> for RecipeStore {
    async fn commit(&self, id: &Id, patch: RecipePatch) -> Result<MutationOutcome> {
        self.update(id, &patch).await
    }
}
