//! Names and parameter shapes of the stored procedures this service calls.
//!
//! Procedure names and parameter keys are part of the contract with the
//! existing database and must not change.

use serde::Serialize;

use crate::models::{Ingredient, Instruction};

pub const GET_USER_BY_CLERK_ID: &str = "get_user_by_clerk_id";
pub const CREATE_USER_WITH_CLERK_ID: &str = "create_user_with_clerk_id";
pub const GET_USER_RECIPES: &str = "get_user_recipes";
pub const CREATE_NEW_RECIPE: &str = "create_new_recipe";
pub const GET_RECIPE: &str = "get_recipe";

/// Parameters of `get_user_by_clerk_id` and `create_user_with_clerk_id`.
#[derive(Debug, Serialize)]
pub struct ClerkIdParams<'a> {
    pub clerk_id_param: &'a str,
}

/// Parameters of `get_user_recipes`.
#[derive(Debug, Serialize)]
pub struct UserIdParams<'a> {
    pub user_id_param: &'a str,
}

/// Parameters of `create_new_recipe`. Absent sequences serialize as `null`.
#[derive(Debug, Serialize)]
pub struct CreateRecipeParams<'a> {
    pub title_param: &'a str,
    pub user_id_param: &'a str,
    pub ingredients_param: Option<&'a [Ingredient]>,
    pub instructions_param: Option<&'a [Instruction]>,
}

/// Parameters of `get_recipe`.
#[derive(Debug, Serialize)]
pub struct RecipeIdParams<'a> {
    pub recipe_id_param: &'a str,
}
