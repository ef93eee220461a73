use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::api::handlers;
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Ingredients
        .route(
            "/ingredient",
            get(handlers::list_ingredients::<S>).post(handlers::create_ingredient::<S>),
        )
        .route(
            "/ingredient/:ingredient_id",
            put(handlers::update_ingredient::<S>).delete(handlers::delete_ingredient::<S>),
        )
        // Recipes
        .route(
            "/recipe",
            get(handlers::list_recipes::<S>).post(handlers::create_recipe::<S>),
        )
        .route(
            "/recipe/:recipe_id",
            put(handlers::update_recipe::<S>).delete(handlers::delete_recipe::<S>),
        )
        // Recipe -> ingredient references
        .route(
            "/recipe/:recipe_id/addingredient/:ingredient_id",
            put(handlers::add_recipe_ingredient::<S>),
        )
        .route(
            "/recipe/:recipe_id/removeingredient/:ingredient_id",
            put(handlers::remove_recipe_ingredient::<S>),
        )
}
