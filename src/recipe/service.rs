//! Recipe operations over the remote procedure client.
//!
//! Listing and creation surface remote failures as [`ApiError::Internal`];
//! single-recipe lookup swallows them into `recipe: null`.

use crate::error::ApiError;
use crate::models::{Recipe, RecipeSummary};
use crate::recipe::types::{CreateRecipeRequest, RecipeResponse, RecipesResponse};
use crate::rpc::procedures::{
    CreateRecipeParams, RecipeIdParams, UserIdParams, CREATE_NEW_RECIPE, GET_RECIPE,
    GET_USER_RECIPES,
};
use crate::rpc::{all_rows, first_row, invoke, RpcClient, RpcResult};

pub const LOAD_RECIPES_FAILED: &str = "failed to load recipes";
pub const CREATE_RECIPE_FAILED: &str = "failed to create recipe";

async fn fetch_summaries(rpc: &dyn RpcClient, user_id: &str) -> RpcResult<Vec<RecipeSummary>> {
    let rows = invoke(rpc, GET_USER_RECIPES, &UserIdParams { user_id_param: user_id }).await?;
    all_rows(GET_USER_RECIPES, rows)
}

async fn insert_recipe(rpc: &dyn RpcClient, params: &CreateRecipeParams<'_>) -> RpcResult<Option<Recipe>> {
    let rows = invoke(rpc, CREATE_NEW_RECIPE, params).await?;
    first_row(CREATE_NEW_RECIPE, rows)
}

async fn fetch_recipe(rpc: &dyn RpcClient, recipe_id: &str) -> RpcResult<Option<Recipe>> {
    let rows = invoke(rpc, GET_RECIPE, &RecipeIdParams { recipe_id_param: recipe_id }).await?;
    first_row(GET_RECIPE, rows)
}

/// Summaries of every recipe owned by `user_id`. No recipes is `[]`.
pub async fn get_user_recipes(rpc: &dyn RpcClient, user_id: &str) -> Result<RecipesResponse, ApiError> {
    match fetch_summaries(rpc, user_id).await {
        Ok(recipes) => Ok(RecipesResponse { recipes }),
        Err(e) => {
            tracing::error!(error = %e, "getUserRecipes failed");
            Err(ApiError::internal(LOAD_RECIPES_FAILED))
        }
    }
}

/// Create a recipe and return the stored record.
pub async fn create_recipe(
    rpc: &dyn RpcClient,
    request: &CreateRecipeRequest,
) -> Result<RecipeResponse, ApiError> {
    let params = CreateRecipeParams {
        title_param: &request.title,
        user_id_param: &request.user_id,
        ingredients_param: request.ingredients.as_deref(),
        instructions_param: request.instructions.as_deref(),
    };

    match insert_recipe(rpc, &params).await {
        Ok(recipe) => {
            if let Some(recipe) = &recipe {
                tracing::info!(recipe_id = %recipe.id, user_id = %recipe.created_user_id, "Created recipe");
            }
            Ok(RecipeResponse { recipe })
        }
        Err(e) => {
            tracing::error!(error = %e, "createRecipe failed");
            Err(ApiError::internal(CREATE_RECIPE_FAILED))
        }
    }
}

/// Full recipe by id, or `null`.
pub async fn get_recipe_by_id(rpc: &dyn RpcClient, recipe_id: &str) -> RecipeResponse {
    match fetch_recipe(rpc, recipe_id).await {
        Ok(recipe) => RecipeResponse { recipe },
        Err(e) => {
            tracing::error!(error = %e, "getRecipeById failed");
            RecipeResponse { recipe: None }
        }
    }
}
