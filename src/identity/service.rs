//! Identity operations over the remote procedure client.
//!
//! All three operations swallow remote failures: the error is logged and
//! the caller receives `user: null`.

use crate::identity::types::{GetOrCreateUserResponse, UserResponse};
use crate::models::User;
use crate::rpc::procedures::{ClerkIdParams, CREATE_USER_WITH_CLERK_ID, GET_USER_BY_CLERK_ID};
use crate::rpc::{first_row, invoke, RpcClient, RpcResult};

async fn call_for_user(rpc: &dyn RpcClient, procedure: &str, clerk_id: &str) -> RpcResult<Option<User>> {
    let rows = invoke(rpc, procedure, &ClerkIdParams { clerk_id_param: clerk_id }).await?;
    first_row(procedure, rows)
}

/// Look up the user correlated to `clerk_id`.
pub async fn get_user_by_clerk_id(rpc: &dyn RpcClient, clerk_id: &str) -> UserResponse {
    match call_for_user(rpc, GET_USER_BY_CLERK_ID, clerk_id).await {
        Ok(user) => UserResponse { user },
        Err(e) => {
            tracing::error!(error = %e, "getUserByClerkId failed");
            UserResponse { user: None }
        }
    }
}

/// Create a user for `clerk_id`. Uniqueness is enforced by the store.
pub async fn create_user(rpc: &dyn RpcClient, clerk_id: &str) -> UserResponse {
    match call_for_user(rpc, CREATE_USER_WITH_CLERK_ID, clerk_id).await {
        Ok(user) => UserResponse { user },
        Err(e) => {
            tracing::error!(error = %e, "createUser failed");
            UserResponse { user: None }
        }
    }
}

/// Return the existing user for `clerk_id`, creating one when absent.
///
/// This is a non-atomic check-then-act: two concurrent callers with the same
/// key can both reach the create call, and the loser gets `user: null`.
/// `is_new_user` is set whenever the create path was taken, even if that
/// call failed.
pub async fn get_or_create_user(rpc: &dyn RpcClient, clerk_id: &str) -> GetOrCreateUserResponse {
    let existing = match call_for_user(rpc, GET_USER_BY_CLERK_ID, clerk_id).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!(error = %e, "getOrCreateUser lookup failed");
            None
        }
    };

    if let Some(user) = existing {
        return GetOrCreateUserResponse {
            user: Some(user),
            is_new_user: false,
        };
    }

    tracing::info!(clerk_id, "No user for identity key, creating one");

    let user = match call_for_user(rpc, CREATE_USER_WITH_CLERK_ID, clerk_id).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!(error = %e, "getOrCreateUser create failed");
            None
        }
    };

    if let Some(user) = &user {
        tracing::info!(user_id = %user.id, "Created user");
    }

    GetOrCreateUserResponse {
        user,
        is_new_user: true,
    }
}
