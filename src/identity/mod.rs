//! Identity endpoints: correlate external (Clerk) identities to local users.
//!
//! # Data Flow
//! ```text
//! GET  /identity/user/clerk/{clerk_id}  → get_user_by_clerk_id
//! POST /identity/user/create            → create_user_with_clerk_id
//! POST /identity/user/get-or-create     → get_user_by_clerk_id, then
//!                                         create_user_with_clerk_id if absent
//! ```
//!
//! Every route swallows remote failures into `{ "user": null }`.

pub mod handlers;
pub mod service;
pub mod types;

use axum::{
    routing::{get, post},
    Router,
};

use crate::http::server::AppState;
use self::handlers::*;

pub use types::{ClerkIdRequest, GetOrCreateUserResponse, UserResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/identity/user/clerk/{clerk_id}", get(get_user_by_clerk_id))
        .route("/identity/user/create", post(create_user))
        .route("/identity/user/get-or-create", post(get_or_create_user))
}
