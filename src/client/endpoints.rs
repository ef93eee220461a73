//! Request builders for every call the client makes. This is the only place
//! that knows the service's paths.

use crate::client::{ApiRequest, Method};
use crate::error::Result;
use crate::model::{IngredientPatch, NewIngredient, NewRecipe, RecipePatch};

pub const RECIPE_PATH: &str = "/recipe";
pub const INGREDIENT_PATH: &str = "/ingredient";

pub fn list_ingredients() -> ApiRequest {
    ApiRequest::new(Method::Get, INGREDIENT_PATH)
}

pub fn create_ingredient(body: &NewIngredient) -> Result<ApiRequest> {
    ApiRequest::new(Method::Post, INGREDIENT_PATH).with_json(body)
}

pub fn update_ingredient(id: &str, patch: &IngredientPatch) -> Result<ApiRequest> {
    ApiRequest::new(Method::Put, format!("{}/{}", INGREDIENT_PATH, id)).with_json(patch)
}

pub fn delete_ingredient(id: &str) -> ApiRequest {
    ApiRequest::new(Method::Delete, format!("{}/{}", INGREDIENT_PATH, id))
}

pub fn list_recipes() -> ApiRequest {
    ApiRequest::new(Method::Get, RECIPE_PATH)
}

pub fn create_recipe(body: &NewRecipe) -> Result<ApiRequest> {
    ApiRequest::new(Method::Post, RECIPE_PATH).with_json(body)
}

pub fn update_recipe(id: &str, patch: &RecipePatch) -> Result<ApiRequest> {
    ApiRequest::new(Method::Put, format!("{}/{}", RECIPE_PATH, id)).with_json(patch)
}

pub fn delete_recipe(id: &str) -> ApiRequest {
    ApiRequest::new(Method::Delete, format!("{}/{}", RECIPE_PATH, id))
}

pub fn add_recipe_ingredient(recipe_id: &str, ingredient_id: &str) -> ApiRequest {
    ApiRequest::new(
        Method::Put,
        format!("{}/{}/addingredient/{}", RECIPE_PATH, recipe_id, ingredient_id),
    )
}

pub fn remove_recipe_ingredient(recipe_id: &str, ingredient_id: &str) -> ApiRequest {
    ApiRequest::new(
        Method::Put,
        format!("{}/{}/removeingredient/{}", RECIPE_PATH, recipe_id, ingredient_id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_association_paths() {
        let add = add_recipe_ingredient("r1", "i1");
        assert_eq!(add.method, Method::Put);
        assert_eq!(add.path, "/recipe/r1/addingredient/i1");
        assert!(add.body.is_none());

        let remove = remove_recipe_ingredient("r1", "i1");
        assert_eq!(remove.method, Method::Put);
        assert_eq!(remove.path, "/recipe/r1/removeingredient/i1");
    }

    #[test]
    fn test_recipe_update_body() {
        let request = update_recipe(
            "r1",
            &RecipePatch {
                name: Some("Soup".to_string()),
                aproxim_cost: Some(4.5),
            },
        )
        .unwrap();
        assert_eq!(request.path, "/recipe/r1");
        assert_eq!(request.body, Some(json!({"name": "Soup", "aproxim_cost": 4.5})));
    }

    #[test]
    fn test_delete_has_no_body() {
        let request = delete_ingredient("i9");
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.path, "/ingredient/i9");
        assert!(request.body.is_none());
    }
}
