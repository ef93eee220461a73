use crate::model::{
    generate_id, Id, Ingredient, IngredientPatch, NewIngredient, NewRecipe, Recipe, RecipePatch,
};
use crate::store::traits::{IngredientCollection, RecipeCollection};
use anyhow::Result;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// What happens to recipe references when an ingredient is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CascadePolicy {
    /// References are left dangling; clients drop them when resolving.
    #[default]
    Retain,
    /// References are pulled from every recipe.
    Pull,
}

#[derive(Debug, Default)]
struct Collections {
    ingredients: Vec<Ingredient>,
    recipes: Vec<Recipe>,
}

/// In-memory recipe service backend. Insertion order is the listing order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
    cascade: CascadePolicy,
}

impl MemoryStore {
    pub fn new(cascade: CascadePolicy) -> Self {
        Self {
            collections: RwLock::new(Collections::default()),
            cascade,
        }
    }

    pub fn cascade_policy(&self) -> CascadePolicy {
        self.cascade
    }
}

#[async_trait::async_trait]
impl IngredientCollection for MemoryStore {
    async fn list_ingredients(&self) -> Result<Vec<Ingredient>> {
        Ok(self.collections.read().ingredients.clone())
    }

    async fn create_ingredient(&self, new_ingredient: NewIngredient) -> Result<Ingredient> {
        let ingredient = Ingredient {
            id: generate_id(),
            name: new_ingredient.name,
        };
        self.collections.write().ingredients.push(ingredient.clone());
        Ok(ingredient)
    }

    async fn update_ingredient(&self, id: &Id, patch: IngredientPatch) -> Result<Option<Ingredient>> {
        let mut collections = self.collections.write();
        let Some(ingredient) = collections.ingredients.iter_mut().find(|i| &i.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            ingredient.name = name;
        }
        Ok(Some(ingredient.clone()))
    }

    async fn delete_ingredient(&self, id: &Id) -> Result<bool> {
        let mut collections = self.collections.write();
        let before = collections.ingredients.len();
        collections.ingredients.retain(|i| &i.id != id);
        let removed = collections.ingredients.len() != before;

        if removed && self.cascade == CascadePolicy::Pull {
            for recipe in collections.recipes.iter_mut() {
                recipe.ingredient_ids.retain(|ingredient_id| ingredient_id != id);
            }
        }
        Ok(removed)
    }
}

#[async_trait::async_trait]
impl RecipeCollection for MemoryStore {
    async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        Ok(self.collections.read().recipes.clone())
    }

    async fn create_recipe(&self, new_recipe: NewRecipe) -> Result<Recipe> {
        let recipe = Recipe {
            id: generate_id(),
            name: new_recipe.name,
            preparation_time: new_recipe.time_preparation,
            approx_cost: new_recipe.aproxim_cost,
            ingredient_ids: new_recipe.ingredients,
        };
        self.collections.write().recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn update_recipe(&self, id: &Id, patch: RecipePatch) -> Result<Option<Recipe>> {
        let mut collections = self.collections.write();
        let Some(recipe) = collections.recipes.iter_mut().find(|r| &r.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            recipe.name = name;
        }
        if let Some(cost) = patch.aproxim_cost {
            recipe.approx_cost = cost;
        }
        Ok(Some(recipe.clone()))
    }

    async fn delete_recipe(&self, id: &Id) -> Result<bool> {
        let mut collections = self.collections.write();
        let before = collections.recipes.len();
        collections.recipes.retain(|r| &r.id != id);
        Ok(collections.recipes.len() != before)
    }

    async fn add_recipe_ingredient(&self, recipe_id: &Id, ingredient_id: &Id) -> Result<Option<Recipe>> {
        let mut collections = self.collections.write();
        let Some(recipe) = collections.recipes.iter_mut().find(|r| &r.id == recipe_id) else {
            return Ok(None);
        };
        recipe.ingredient_ids.push(ingredient_id.clone());
        Ok(Some(recipe.clone()))
    }

    async fn remove_recipe_ingredient(&self, recipe_id: &Id, ingredient_id: &Id) -> Result<Option<Recipe>> {
        let mut collections = self.collections.write();
        let Some(recipe) = collections.recipes.iter_mut().find(|r| &r.id == recipe_id) else {
            return Ok(None);
        };
        recipe.ingredient_ids.retain(|id| id != ingredient_id);
        Ok(Some(recipe.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn soup_with_salt(store: &MemoryStore) -> (Recipe, Ingredient) {
        let salt = store.create_ingredient(NewIngredient::new("Salt")).await.unwrap();
        let soup = store.create_recipe(NewRecipe::new("Soup", 5.0)).await.unwrap();
        store.add_recipe_ingredient(&soup.id, &salt.id).await.unwrap();
        (soup, salt)
    }

    #[tokio::test]
    async fn test_retain_leaves_dangling_reference() {
        let store = MemoryStore::new(CascadePolicy::Retain);
        let (soup, salt) = soup_with_salt(&store).await;

        assert!(store.delete_ingredient(&salt.id).await.unwrap());
        let recipes = store.list_recipes().await.unwrap();
        assert_eq!(recipes[0].id, soup.id);
        assert_eq!(recipes[0].ingredient_ids, vec![salt.id]);
    }

    #[tokio::test]
    async fn test_pull_removes_reference() {
        let store = MemoryStore::new(CascadePolicy::Pull);
        let (_, salt) = soup_with_salt(&store).await;

        store.delete_ingredient(&salt.id).await.unwrap();
        let recipes = store.list_recipes().await.unwrap();
        assert!(recipes[0].ingredient_ids.is_empty());
    }

    #[tokio::test]
    async fn test_add_keeps_duplicates_and_remove_pulls_all() {
        let store = MemoryStore::default();
        let (soup, salt) = soup_with_salt(&store).await;

        let twice = store.add_recipe_ingredient(&soup.id, &salt.id).await.unwrap().unwrap();
        assert_eq!(twice.ingredient_ids.len(), 2);

        let none = store.remove_recipe_ingredient(&soup.id, &salt.id).await.unwrap().unwrap();
        assert!(none.ingredient_ids.is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_ingredient() {
        let store = MemoryStore::default();
        let updated = store
            .update_ingredient(&"missing".to_string(), IngredientPatch::name("x"))
            .await
            .unwrap();
        assert!(updated.is_none());
    }
}
