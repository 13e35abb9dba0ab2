//! Request and response shapes of the recipe endpoints.

use serde::{Deserialize, Serialize};

use crate::models::{Ingredient, Instruction, Recipe, RecipeSummary};

/// Body of `POST /recipe/create`.
///
/// Missing and `null` sequences are both kept as `None`, and reach the
/// store as `null` rather than an empty list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeRequest {
    pub title: String,
    pub user_id: String,
    #[serde(default)]
    pub ingredients: Option<Vec<Ingredient>>,
    #[serde(default)]
    pub instructions: Option<Vec<Instruction>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecipesResponse {
    pub recipes: Vec<RecipeSummary>,
}

/// `{ recipe }`, where `null` means "not found", "no row returned", or a
/// swallowed failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecipeResponse {
    pub recipe: Option<Recipe>,
}
