//! Axum handlers for the recipe endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::error::ApiError;
use crate::http::server::AppState;
use crate::recipe::service;
use crate::recipe::types::{CreateRecipeRequest, RecipeResponse, RecipesResponse};

/// GET /recipe/user/{user_id}
pub async fn get_user_recipes(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<RecipesResponse>, ApiError> {
    state.check_non_blank("userId", &user_id)?;
    service::get_user_recipes(state.rpc(), &user_id).await.map(Json)
}

/// POST /recipe/create
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<CreateRecipeRequest>, JsonRejection>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let Json(request) = payload?;
    state.check_non_blank("title", &request.title)?;
    state.check_non_blank("userId", &request.user_id)?;
    service::create_recipe(state.rpc(), &request).await.map(Json)
}

/// GET /recipe/{recipe_id}
pub async fn get_recipe_by_id(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Json<RecipeResponse> {
    if state.skips_blank("recipeId", &recipe_id) {
        return Json(RecipeResponse { recipe: None });
    }
    Json(service::get_recipe_by_id(state.rpc(), &recipe_id).await)
}
