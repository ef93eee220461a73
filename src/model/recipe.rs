use crate::model::{format_cost, Id};
use serde::{Deserialize, Serialize};

/// A recipe as the service stores it. Field names on the wire differ from
/// the Rust names and must stay exactly as they are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "_id", alias = "id")]
    pub id: Id,
    pub name: String,
    #[serde(rename = "time_preparation", default)]
    pub preparation_time: f64,
    #[serde(rename = "aproxim_cost", default)]
    pub approx_cost: f64,
    /// Ordered references into the ingredient collection. Duplicates are kept.
    #[serde(rename = "ingredientsId", default)]
    pub ingredient_ids: Vec<Id>,
}

impl Recipe {
    pub fn cost_label(&self) -> String {
        format_cost(self.approx_cost)
    }

    pub fn title(&self) -> String {
        format!("{} - ${}", self.name, self.cost_label())
    }
}

/// Body of `POST /recipe`. New recipes always start with no preparation time
/// and no ingredients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    pub time_preparation: f64,
    pub aproxim_cost: f64,
    pub ingredients: Vec<Id>,
}

impl NewRecipe {
    pub fn new(name: impl Into<String>, approx_cost: f64) -> Self {
        Self {
            name: name.into(),
            time_preparation: 0.0,
            aproxim_cost: approx_cost,
            ingredients: Vec::new(),
        }
    }
}

/// Partial body of `PUT /recipe/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aproxim_cost: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recipe_wire_names() {
        let recipe: Recipe = serde_json::from_value(json!({
            "_id": "r1",
            "name": "Soup",
            "time_preparation": 0,
            "aproxim_cost": 5,
            "ingredientsId": ["a", "b", "a"]
        }))
        .unwrap();

        assert_eq!(recipe.preparation_time, 0.0);
        assert_eq!(recipe.approx_cost, 5.0);
        assert_eq!(recipe.ingredient_ids, vec!["a", "b", "a"]);
        assert_eq!(recipe.title(), "Soup - $5.00");

        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["aproxim_cost"], json!(5.0));
        assert_eq!(value["ingredientsId"], json!(["a", "b", "a"]));
    }

    #[test]
    fn test_recipe_without_ingredient_list() {
        let recipe: Recipe =
            serde_json::from_value(json!({"_id": "r1", "name": "Soup", "aproxim_cost": 1.5}))
                .unwrap();
        assert!(recipe.ingredient_ids.is_empty());
    }

    #[test]
    fn test_new_recipe_body() {
        assert_eq!(
            serde_json::to_value(NewRecipe::new("Soup", 5.0)).unwrap(),
            json!({
                "name": "Soup",
                "time_preparation": 0.0,
                "aproxim_cost": 5.0,
                "ingredients": []
            })
        );
    }

    #[test]
    fn test_recipe_patch_omits_absent_fields() {
        let patch = RecipePatch {
            name: Some("Stew".to_string()),
            aproxim_cost: None,
        };
        assert_eq!(serde_json::to_value(patch).unwrap(), json!({"name": "Stew"}));
    }
}
