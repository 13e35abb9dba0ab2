//! In-memory stand-in for the remote data store, used by unit tests.
//!
//! Emulates the five stored procedures closely enough to check handler
//! behaviour, including uniqueness of `clerk_id` and injected failures.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::models::{Ingredient, Instruction, Recipe, RecipeSummary, User};
use crate::rpc::procedures::{
    CREATE_NEW_RECIPE, CREATE_USER_WITH_CLERK_ID, GET_RECIPE, GET_USER_BY_CLERK_ID,
    GET_USER_RECIPES,
};
use crate::rpc::{RpcClient, RpcError, RpcResult};

const CREATED_AT: &str = "2025-01-01T00:00:00+00:00";

#[derive(Default)]
struct FakeState {
    users: Vec<User>,
    recipes: Vec<Recipe>,
    failing: HashSet<String>,
    empty_results: HashSet<String>,
    calls: Vec<(String, Value)>,
    next_id: u64,
}

#[derive(Default)]
pub struct FakeRpcClient {
    state: Mutex<FakeState>,
}

impl FakeRpcClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call to `procedure` fail with a remote error.
    pub fn fail_procedure(&self, procedure: &str) {
        self.state.lock().unwrap().failing.insert(procedure.to_string());
    }

    /// Make `procedure` succeed without returning any rows.
    pub fn return_nothing_from(&self, procedure: &str) {
        self.state.lock().unwrap().empty_results.insert(procedure.to_string());
    }

    pub fn insert_user(&self, clerk_id: &str) -> User {
        let mut state = self.state.lock().unwrap();
        let id = next_id(&mut state, "user");
        let user = User {
            id,
            clerk_id: clerk_id.to_string(),
            created_at: CREATED_AT.to_string(),
            extra: Map::new(),
        };
        state.users.push(user.clone());
        user
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    /// Every `(procedure, params)` pair received, in order.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn procedures_called(&self) -> Vec<String> {
        self.calls().into_iter().map(|(p, _)| p).collect()
    }
}

fn next_id(state: &mut FakeState, prefix: &str) -> String {
    state.next_id += 1;
    format!("{}-{}", prefix, state.next_id)
}

fn remote(procedure: &str, status: u16, code: &str, message: &str) -> RpcError {
    RpcError::Remote {
        procedure: procedure.to_string(),
        status,
        code: Some(code.to_string()),
        message: message.to_string(),
    }
}

fn str_param<'a>(params: &'a Value, name: &str) -> &'a str {
    params.get(name).and_then(Value::as_str).unwrap_or_default()
}

#[async_trait]
impl RpcClient for FakeRpcClient {
    async fn call(&self, procedure: &str, params: Value) -> RpcResult<Vec<Value>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push((procedure.to_string(), params.clone()));

        if state.failing.contains(procedure) {
            return Err(remote(procedure, 500, "XX000", "injected failure"));
        }
        if state.empty_results.contains(procedure) {
            return Ok(Vec::new());
        }

        match procedure {
            GET_USER_BY_CLERK_ID => {
                let clerk_id = str_param(&params, "clerk_id_param");
                Ok(state
                    .users
                    .iter()
                    .filter(|u| u.clerk_id == clerk_id)
                    .map(|u| json!(u))
                    .collect())
            }
            CREATE_USER_WITH_CLERK_ID => {
                let clerk_id = str_param(&params, "clerk_id_param").to_string();
                if state.users.iter().any(|u| u.clerk_id == clerk_id) {
                    return Err(remote(
                        procedure,
                        409,
                        "23505",
                        "duplicate key value violates unique constraint \"users_clerk_id_key\"",
                    ));
                }
                let user = User {
                    id: next_id(&mut state, "user"),
                    clerk_id,
                    created_at: CREATED_AT.to_string(),
                    extra: Map::new(),
                };
                state.users.push(user.clone());
                Ok(vec![json!(user)])
            }
            GET_USER_RECIPES => {
                let user_id = str_param(&params, "user_id_param");
                Ok(state
                    .recipes
                    .iter()
                    .filter(|r| r.created_user_id == user_id)
                    .map(|r| {
                        json!(RecipeSummary {
                            id: r.id.clone(),
                            title: r.title.clone(),
                            image_url: r.image_url.clone(),
                            created_at: r.created_at.clone(),
                            extra: Map::new(),
                        })
                    })
                    .collect())
            }
            CREATE_NEW_RECIPE => {
                let ingredients: Option<Vec<Ingredient>> =
                    serde_json::from_value(params["ingredients_param"].clone())
                        .map_err(|e| remote(procedure, 400, "22P02", &e.to_string()))?;
                let instructions: Option<Vec<Instruction>> =
                    serde_json::from_value(params["instructions_param"].clone())
                        .map_err(|e| remote(procedure, 400, "22P02", &e.to_string()))?;
                let recipe = Recipe {
                    id: next_id(&mut state, "recipe"),
                    title: str_param(&params, "title_param").to_string(),
                    image_url: None,
                    created_at: CREATED_AT.to_string(),
                    created_user_id: str_param(&params, "user_id_param").to_string(),
                    ingredients,
                    instructions,
                    extra: Map::new(),
                };
                state.recipes.push(recipe.clone());
                Ok(vec![json!(recipe)])
            }
            GET_RECIPE => {
                let recipe_id = str_param(&params, "recipe_id_param");
                Ok(state
                    .recipes
                    .iter()
                    .filter(|r| r.id == recipe_id)
                    .map(|r| json!(r))
                    .collect())
            }
            _ => Err(remote(
                procedure,
                404,
                "PGRST202",
                "Could not find the function in the schema cache",
            )),
        }
    }
}
