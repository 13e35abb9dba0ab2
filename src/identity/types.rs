//! Request and response shapes of the identity endpoints.

use serde::{Deserialize, Serialize};

use crate::models::User;

/// Body of `POST /identity/user/create` and `POST /identity/user/get-or-create`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClerkIdRequest {
    pub clerk_id: String,
}

/// `{ user }`, where `null` signals "not found" or a swallowed failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserResponse {
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOrCreateUserResponse {
    pub user: Option<User>,
    pub is_new_user: bool,
}
