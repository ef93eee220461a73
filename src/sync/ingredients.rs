use crate::client::{endpoints, Transport};
use crate::error::Result;
use crate::logic::UpdateTarget;
use crate::model::{Id, Ingredient, IngredientPatch, NewIngredient};
use crate::sync::outcome::send_mutation;
use crate::sync::{fetch_list, log_refetch, MutationOutcome};
use log::info;
use parking_lot::RwLock;
use std::sync::Arc;

/// Owns the local copy of the ingredient collection.
pub struct IngredientStore {
    transport: Arc<dyn Transport>,
    snapshot: RwLock<Arc<Vec<Ingredient>>>,
}

impl IngredientStore {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            snapshot: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// The most recently fetched collection, in server order.
    pub fn snapshot(&self) -> Arc<Vec<Ingredient>> {
        self.snapshot.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<Ingredient> {
        self.snapshot.read().iter().find(|i| i.id == id).cloned()
    }

    /// Replaces the snapshot with the service's current collection.
    pub async fn list(&self) -> Result<Arc<Vec<Ingredient>>> {
        let ingredients: Vec<Ingredient> =
            fetch_list(self.transport.as_ref(), endpoints::list_ingredients()).await?;
        info!("ingredient snapshot replaced ({} items)", ingredients.len());

        let snapshot = Arc::new(ingredients);
        *self.snapshot.write() = snapshot.clone();
        Ok(snapshot)
    }

    async fn refetch(&self) {
        log_refetch("ingredients", self.list().await);
    }

    /// Creates an ingredient. The name is forwarded as given.
    ///
    /// Post-condition: ingredients have been refetched.
    pub async fn create(&self, name: &str) -> Result<MutationOutcome> {
        let request = endpoints::create_ingredient(&NewIngredient::new(name))?;
        let outcome = send_mutation(self.transport.as_ref(), request).await?;
        self.refetch().await;
        Ok(outcome)
    }

    /// Applies a partial update.
    ///
    /// Post-condition: ingredients have been refetched, whatever the outcome.
    /// The returned outcome is the service's answer to the update alone.
    pub async fn update(&self, id: &str, patch: &IngredientPatch) -> Result<MutationOutcome> {
        let request = endpoints::update_ingredient(id, patch)?;
        let outcome = send_mutation(self.transport.as_ref(), request).await?;
        self.refetch().await;
        Ok(outcome)
    }

    /// Deletes an ingredient. Recipes that reference it are not touched
    /// locally; they pick up the service's view on their next fetch.
    ///
    /// Post-condition: ingredients have been refetched.
    pub async fn remove(&self, id: &str) -> Result<MutationOutcome> {
        let outcome = send_mutation(self.transport.as_ref(), endpoints::delete_ingredient(id)).await?;
        self.refetch().await;
        Ok(outcome)
    }
}

#[async_trait::async_trait]
impl UpdateTarget<Ingredient> for IngredientStore {
    async fn commit(&self, id: &Id, patch: IngredientPatch) -> Result<MutationOutcome> {
        self.update(id, &patch).await
    }
}
