use crate::client::Transport;
use crate::error::{Result, SyncError};
use crate::logic::EditSession;
use crate::model::{Id, Ingredient, Recipe};
use crate::sync::{IngredientStore, MutationOutcome, RecipeStore};
use crate::view::render::{IngredientRow, RecipeCard, WorkspaceView};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Per-recipe UI state: its edit session and the ingredient picker.
#[derive(Debug)]
struct RecipeRowState {
    session: EditSession<Recipe>,
    selected_ingredient: String,
}

impl RecipeRowState {
    fn new(id: &str) -> Self {
        Self {
            session: EditSession::new(id),
            selected_ingredient: String::new(),
        }
    }
}

/// Composition root: owns both stores and the state of every visible row.
pub struct Workspace {
    ingredients: Arc<IngredientStore>,
    recipes: Arc<RecipeStore>,
    ingredient_rows: HashMap<Id, EditSession<Ingredient>>,
    recipe_rows: HashMap<Id, RecipeRowState>,
    new_recipe_name: String,
    new_recipe_cost: f64,
    new_ingredient_name: String,
}

impl Workspace {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let ingredients = Arc::new(IngredientStore::new(transport.clone()));
        let recipes = Arc::new(RecipeStore::new(transport, ingredients.clone()));
        Self {
            ingredients,
            recipes,
            ingredient_rows: HashMap::new(),
            recipe_rows: HashMap::new(),
            new_recipe_name: String::new(),
            new_recipe_cost: 0.0,
            new_ingredient_name: String::new(),
        }
    }

    pub fn ingredients(&self) -> &Arc<IngredientStore> {
        &self.ingredients
    }

    pub fn recipes(&self) -> &Arc<RecipeStore> {
        &self.recipes
    }

    /// Initial load of both collections. Both fetches run to completion;
    /// the first error is returned.
    pub async fn refresh(&mut self) -> Result<()> {
        let (recipes, ingredients) = tokio::join!(self.recipes.list(), self.ingredients.list());
        self.sync_rows();
        recipes?;
        ingredients?;
        Ok(())
    }

    /// Creates row state for new items and drops it for items that are no
    /// longer in their snapshot. A row only goes away once a fetch says so.
    fn sync_rows(&mut self) {
        let ingredients = self.ingredients.snapshot();
        let gone: Vec<Id> = self
            .ingredient_rows
            .keys()
            .filter(|id| !ingredients.iter().any(|i| &i.id == *id))
            .cloned()
            .collect();
        for id in gone {
            if let Some(session) = self.ingredient_rows.remove(&id) {
                session.discard();
            }
        }
        for ingredient in ingredients.iter() {
            self.ingredient_rows
                .entry(ingredient.id.clone())
                .or_insert_with(|| EditSession::new(ingredient.id.clone()));
        }

        let recipes = self.recipes.snapshot();
        let gone: Vec<Id> = self
            .recipe_rows
            .keys()
            .filter(|id| !recipes.iter().any(|r| &r.id == *id))
            .cloned()
            .collect();
        for id in gone {
            if let Some(row) = self.recipe_rows.remove(&id) {
                row.session.discard();
            }
        }
        for recipe in recipes.iter() {
            self.recipe_rows
                .entry(recipe.id.clone())
                .or_insert_with(|| RecipeRowState::new(&recipe.id));
        }
    }

    // Creation forms

    pub fn set_new_recipe_name(&mut self, name: impl Into<String>) {
        self.new_recipe_name = name.into();
    }

    pub fn set_new_recipe_cost(&mut self, cost: f64) {
        self.new_recipe_cost = cost;
    }

    pub fn set_new_ingredient_name(&mut self, name: impl Into<String>) {
        self.new_ingredient_name = name.into();
    }

    /// Submits the new-recipe form. The form is cleared once the request
    /// has been answered.
    pub async fn create_recipe_from_form(&mut self) -> Result<MutationOutcome> {
        let result = self
            .recipes
            .create(&self.new_recipe_name, self.new_recipe_cost)
            .await;
        self.new_recipe_name.clear();
        self.new_recipe_cost = 0.0;
        self.sync_rows();
        result
    }

    /// Submits the new-ingredient form. The name field is cleared right away.
    pub async fn create_ingredient_from_form(&mut self) -> Result<MutationOutcome> {
        let name = std::mem::take(&mut self.new_ingredient_name);
        let result = self.ingredients.create(&name).await;
        self.sync_rows();
        result
    }

    // Ingredient rows

    pub fn start_ingredient_edit(&mut self, id: &str) -> Result<()> {
        let ingredient = self
            .ingredients
            .get(id)
            .ok_or_else(|| SyncError::NotFound(id.to_string()))?;
        self.ingredient_row(id)?.start_edit(&ingredient);
        Ok(())
    }

    pub fn edit_ingredient_field(&mut self, id: &str, field: &str, value: &str) -> Result<()> {
        self.ingredient_row(id)?.set_field(field, value)
    }

    pub async fn save_ingredient(&mut self, id: &str) -> Result<MutationOutcome> {
        let store = self.ingredients.clone();
        let result = self.ingredient_row(id)?.save(store.as_ref()).await;
        self.sync_rows();
        result
    }

    /// Deletes regardless of edit mode. The row and any draft go away when
    /// the refetch no longer lists the ingredient; a failed delete leaves
    /// the row exactly as it was.
    pub async fn delete_ingredient(&mut self, id: &str) -> Result<MutationOutcome> {
        let result = self.ingredients.remove(id).await;
        self.sync_rows();
        result
    }

    /// Row state for an ingredient in the current snapshot, created on first
    /// use so items fetched through the store directly are editable too.
    fn ingredient_row(&mut self, id: &str) -> Result<&mut EditSession<Ingredient>> {
        if self.ingredients.get(id).is_none() {
            return Err(SyncError::NotFound(id.to_string()));
        }
        Ok(self
            .ingredient_rows
            .entry(id.to_string())
            .or_insert_with(|| EditSession::new(id)))
    }

    // Recipe rows

    pub fn start_recipe_edit(&mut self, id: &str) -> Result<()> {
        let recipe = self
            .recipes
            .get(id)
            .ok_or_else(|| SyncError::NotFound(id.to_string()))?;
        self.recipe_row(id)?.session.start_edit(&recipe);
        Ok(())
    }

    pub fn edit_recipe_field(&mut self, id: &str, field: &str, value: &str) -> Result<()> {
        self.recipe_row(id)?.session.set_field(field, value)
    }

    pub async fn save_recipe(&mut self, id: &str) -> Result<MutationOutcome> {
        let store = self.recipes.clone();
        let result = self.recipe_row(id)?.session.save(store.as_ref()).await;
        self.sync_rows();
        result
    }

    /// Deletes regardless of edit mode. Refetches recipes and ingredients;
    /// the row is dropped only once the recipe is gone from the snapshot.
    pub async fn delete_recipe(&mut self, id: &str) -> Result<MutationOutcome> {
        let result = self.recipes.remove(id).await;
        self.sync_rows();
        result
    }

    pub fn select_ingredient(&mut self, recipe_id: &str, ingredient_id: &str) -> Result<()> {
        self.recipe_row(recipe_id)?.selected_ingredient = ingredient_id.to_string();
        Ok(())
    }

    /// Adds the picker's selection to the recipe and clears the picker.
    /// Returns `None` without a request when nothing is selected.
    pub async fn add_selected_ingredient(
        &mut self,
        recipe_id: &str,
    ) -> Result<Option<MutationOutcome>> {
        let selected = std::mem::take(&mut self.recipe_row(recipe_id)?.selected_ingredient);
        if selected.is_empty() {
            debug!("no ingredient selected for {}", recipe_id);
            return Ok(None);
        }
        let result = self.recipes.add_ingredient(recipe_id, &selected).await;
        self.sync_rows();
        result.map(Some)
    }

    pub async fn remove_recipe_ingredient(
        &mut self,
        recipe_id: &str,
        ingredient_id: &str,
    ) -> Result<MutationOutcome> {
        let result = self.recipes.remove_ingredient(recipe_id, ingredient_id).await;
        self.sync_rows();
        result
    }

    fn recipe_row(&mut self, id: &str) -> Result<&mut RecipeRowState> {
        if self.recipes.get(id).is_none() {
            return Err(SyncError::NotFound(id.to_string()));
        }
        Ok(self
            .recipe_rows
            .entry(id.to_string())
            .or_insert_with(|| RecipeRowState::new(id)))
    }

    /// Builds the view from the current snapshots. Recipe ingredient lists
    /// are resolved afresh each time.
    pub fn render(&self) -> WorkspaceView {
        let recipes = self
            .recipes
            .resolved_all()
            .into_iter()
            .map(|resolved| {
                let row = self.recipe_rows.get(&resolved.recipe.id);
                RecipeCard {
                    id: resolved.recipe.id.clone(),
                    title: resolved.recipe.title(),
                    editing: row.map_or(false, |r| r.session.is_editing()),
                    draft: row.and_then(|r| r.session.draft().cloned()),
                    last_failure: row.and_then(|r| r.session.last_failure().map(str::to_string)),
                    ingredients: resolved.ingredients,
                    selected_ingredient: row
                        .map(|r| r.selected_ingredient.clone())
                        .unwrap_or_default(),
                }
            })
            .collect();

        let ingredients = self
            .ingredients
            .snapshot()
            .iter()
            .map(|ingredient| {
                let session = self.ingredient_rows.get(&ingredient.id);
                IngredientRow {
                    id: ingredient.id.clone(),
                    name: ingredient.name.clone(),
                    editing: session.map_or(false, |s| s.is_editing()),
                    draft: session.and_then(|s| s.draft().cloned()),
                    last_failure: session.and_then(|s| s.last_failure().map(str::to_string)),
                }
            })
            .collect();

        WorkspaceView {
            recipes,
            ingredients,
            new_recipe_name: self.new_recipe_name.clone(),
            new_recipe_cost: self.new_recipe_cost,
            new_ingredient_name: self.new_ingredient_name.clone(),
        }
    }
}
