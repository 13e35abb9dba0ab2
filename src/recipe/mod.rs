//! Recipe endpoints.
//!
//! # Data Flow
//! ```text
//! GET  /recipe/user/{user_id}  → get_user_recipes   (failures surface as 500)
//! POST /recipe/create          → create_new_recipe  (failures surface as 500)
//! GET  /recipe/{recipe_id}     → get_recipe         (failures become null)
//! ```

pub mod handlers;
pub mod service;
pub mod types;

use axum::{
    routing::{get, post},
    Router,
};

use crate::http::server::AppState;
use self::handlers::*;

pub use types::{CreateRecipeRequest, RecipeResponse, RecipesResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recipe/user/{user_id}", get(get_user_recipes))
        .route("/recipe/create", post(create_recipe))
        .route("/recipe/{recipe_id}", get(get_recipe_by_id))
}
