use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use serde::Serialize;
use std::sync::Arc;

use crate::model::{Id, Ingredient, IngredientPatch, NewIngredient, NewRecipe, Recipe, RecipePatch};
use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

type HandlerError = (StatusCode, Json<ErrorResponse>);

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: Id,
}

fn internal(e: anyhow::Error) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(&e.to_string())),
    )
}

fn not_found(what: &str) -> HandlerError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(&format!("{} not found", what))),
    )
}

fn require_name(name: &str) -> Result<(), HandlerError> {
    if name.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("name must not be empty")),
        ));
    }
    Ok(())
}

// Ingredients

pub async fn list_ingredients<S: Store>(
    State(store): State<AppState<S>>,
) -> Result<Json<Vec<Ingredient>>, HandlerError> {
    store.list_ingredients().await.map(Json).map_err(internal)
}

pub async fn create_ingredient<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(new_ingredient): RequestJson<NewIngredient>,
) -> Result<(StatusCode, Json<Ingredient>), HandlerError> {
    require_name(&new_ingredient.name)?;
    let ingredient = store.create_ingredient(new_ingredient).await.map_err(internal)?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

pub async fn update_ingredient<S: Store>(
    State(store): State<AppState<S>>,
    Path(ingredient_id): Path<Id>,
    RequestJson(patch): RequestJson<IngredientPatch>,
) -> Result<Json<Ingredient>, HandlerError> {
    if let Some(name) = &patch.name {
        require_name(name)?;
    }
    match store.update_ingredient(&ingredient_id, patch).await {
        Ok(Some(ingredient)) => Ok(Json(ingredient)),
        Ok(None) => Err(not_found("Ingredient")),
        Err(e) => Err(internal(e)),
    }
}

pub async fn delete_ingredient<S: Store>(
    State(store): State<AppState<S>>,
    Path(ingredient_id): Path<Id>,
) -> Result<Json<DeletedResponse>, HandlerError> {
    match store.delete_ingredient(&ingredient_id).await {
        Ok(true) => Ok(Json(DeletedResponse {
            deleted: ingredient_id,
        })),
        Ok(false) => Err(not_found("Ingredient")),
        Err(e) => Err(internal(e)),
    }
}

// Recipes

pub async fn list_recipes<S: Store>(
    State(store): State<AppState<S>>,
) -> Result<Json<Vec<Recipe>>, HandlerError> {
    store.list_recipes().await.map(Json).map_err(internal)
}

pub async fn create_recipe<S: Store>(
    State(store): State<AppState<S>>,
    RequestJson(new_recipe): RequestJson<NewRecipe>,
) -> Result<(StatusCode, Json<Recipe>), HandlerError> {
    require_name(&new_recipe.name)?;
    let recipe = store.create_recipe(new_recipe).await.map_err(internal)?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn update_recipe<S: Store>(
    State(store): State<AppState<S>>,
    Path(recipe_id): Path<Id>,
    RequestJson(patch): RequestJson<RecipePatch>,
) -> Result<Json<Recipe>, HandlerError> {
    if let Some(name) = &patch.name {
        require_name(name)?;
    }
    match store.update_recipe(&recipe_id, patch).await {
        Ok(Some(recipe)) => Ok(Json(recipe)),
        Ok(None) => Err(not_found("Recipe")),
        Err(e) => Err(internal(e)),
    }
}

pub async fn delete_recipe<S: Store>(
    State(store): State<AppState<S>>,
    Path(recipe_id): Path<Id>,
) -> Result<Json<DeletedResponse>, HandlerError> {
    match store.delete_recipe(&recipe_id).await {
        Ok(true) => Ok(Json(DeletedResponse { deleted: recipe_id })),
        Ok(false) => Err(not_found("Recipe")),
        Err(e) => Err(internal(e)),
    }
}

pub async fn add_recipe_ingredient<S: Store>(
    State(store): State<AppState<S>>,
    Path((recipe_id, ingredient_id)): Path<(Id, Id)>,
) -> Result<Json<Recipe>, HandlerError> {
    match store.add_recipe_ingredient(&recipe_id, &ingredient_id).await {
        Ok(Some(recipe)) => Ok(Json(recipe)),
        Ok(None) => Err(not_found("Recipe")),
        Err(e) => Err(internal(e)),
    }
}

pub async fn remove_recipe_ingredient<S: Store>(
    State(store): State<AppState<S>>,
    Path((recipe_id, ingredient_id)): Path<(Id, Id)>,
) -> Result<Json<Recipe>, HandlerError> {
    match store.remove_recipe_ingredient(&recipe_id, &ingredient_id).await {
        Ok(Some(recipe)) => Ok(Json(recipe)),
        Ok(None) => Err(not_found("Recipe")),
        Err(e) => Err(internal(e)),
    }
}

#[cfg(test)]
mod tests {
    use crate::client::{endpoints, InProcessTransport, Transport};
    use crate::model::{Ingredient, NewIngredient, Recipe};
    use crate::store::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_then_list_ingredient() {
        let transport = InProcessTransport::with_store(Arc::new(MemoryStore::default()));

        let created = transport
            .execute(endpoints::create_ingredient(&NewIngredient::new("Salt")).unwrap())
            .await
            .unwrap();
        assert_eq!(created.status, 201);

        let listed = transport.execute(endpoints::list_ingredients()).await.unwrap();
        let ingredients: Vec<Ingredient> = listed.json("/ingredient").unwrap();
        assert_eq!(ingredients.len(), 1);
        assert_eq!(ingredients[0].name, "Salt");
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        let transport = InProcessTransport::with_store(Arc::new(MemoryStore::default()));
        let response = transport
            .execute(endpoints::create_ingredient(&NewIngredient::new("")).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status, 400);
    }

    #[tokio::test]
    async fn test_unknown_recipe_returns_not_found() {
        let transport = InProcessTransport::with_store(Arc::new(MemoryStore::default()));

        let response = transport
            .execute(endpoints::add_recipe_ingredient("nope", "salt"))
            .await
            .unwrap();
        assert_eq!(response.status, 404);

        let recipes: Vec<Recipe> = transport
            .execute(endpoints::list_recipes())
            .await
            .unwrap()
            .json("/recipe")
            .unwrap();
        assert!(recipes.is_empty());
    }
}
