//! Axum handlers for the identity endpoints.
//!
//! These routes always answer 200; a blank key is answered with
//! `user: null` the same way an unknown one is.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::error::ApiError;
use crate::http::server::AppState;
use crate::identity::service;
use crate::identity::types::{ClerkIdRequest, GetOrCreateUserResponse, UserResponse};

/// GET /identity/user/clerk/{clerk_id}
pub async fn get_user_by_clerk_id(
    State(state): State<AppState>,
    Path(clerk_id): Path<String>,
) -> Json<UserResponse> {
    if state.skips_blank("clerkId", &clerk_id) {
        return Json(UserResponse { user: None });
    }
    Json(service::get_user_by_clerk_id(state.rpc(), &clerk_id).await)
}

/// POST /identity/user/create
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<ClerkIdRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(request) = payload?;
    if state.skips_blank("clerkId", &request.clerk_id) {
        return Ok(Json(UserResponse { user: None }));
    }
    Ok(Json(service::create_user(state.rpc(), &request.clerk_id).await))
}

/// POST /identity/user/get-or-create
pub async fn get_or_create_user(
    State(state): State<AppState>,
    payload: Result<Json<ClerkIdRequest>, JsonRejection>,
) -> Result<Json<GetOrCreateUserResponse>, ApiError> {
    let Json(request) = payload?;
    if state.skips_blank("clerkId", &request.clerk_id) {
        return Ok(Json(GetOrCreateUserResponse {
            user: None,
            is_new_user: false,
        }));
    }
    Ok(Json(service::get_or_create_user(state.rpc(), &request.clerk_id).await))
}
