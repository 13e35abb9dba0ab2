//! Remote procedure error definitions and row decoding helpers.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while invoking a remote procedure.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The request never produced a response (connect failure, timeout, ...).
    #[error("transport error calling {procedure}: {source}")]
    Transport {
        procedure: String,
        #[source]
        source: reqwest::Error,
    },

    /// The data store answered with a non-success status.
    #[error("{procedure} failed with status {status}: {message}")]
    Remote {
        procedure: String,
        status: u16,
        /// Store-specific error code (e.g. a Postgres SQLSTATE), when provided.
        code: Option<String>,
        message: String,
    },

    /// The parameters could not be encoded as a JSON object.
    #[error("could not encode parameters of {procedure}: {message}")]
    Encode { procedure: String, message: String },

    /// The response body, or a row inside it, did not have the expected shape.
    #[error("could not decode response of {procedure}: {message}")]
    Decode { procedure: String, message: String },

    /// The client could not be constructed from its configuration.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

/// Result type for remote procedure calls.
pub type RpcResult<T> = Result<T, RpcError>;

/// Decode the first row, if any. Extra rows are ignored.
pub fn first_row<T: DeserializeOwned>(procedure: &str, rows: Vec<Value>) -> RpcResult<Option<T>> {
    match rows.into_iter().next() {
        None | Some(Value::Null) => Ok(None),
        Some(row) => decode(procedure, row).map(Some),
    }
}

/// Decode every row, preserving order.
pub fn all_rows<T: DeserializeOwned>(procedure: &str, rows: Vec<Value>) -> RpcResult<Vec<T>> {
    rows.into_iter().map(|row| decode(procedure, row)).collect()
}

fn decode<T: DeserializeOwned>(procedure: &str, row: Value) -> RpcResult<T> {
    serde_json::from_value(row).map_err(|e| RpcError::Decode {
        procedure: procedure.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use serde_json::json;

    fn user_row(id: &str) -> Value {
        json!({ "id": id, "clerk_id": "clerk_1", "created_at": "2025-01-01T00:00:00+00:00" })
    }

    #[test]
    fn test_first_row_of_empty_set_is_none() {
        let user: Option<User> = first_row("get_user_by_clerk_id", Vec::new()).unwrap();
        assert!(user.is_none());
    }

    #[test]
    fn test_first_row_takes_only_the_first() {
        let user: Option<User> =
            first_row("get_user_by_clerk_id", vec![user_row("a"), user_row("b")]).unwrap();
        assert_eq!(user.unwrap().id, "a");
    }

    #[test]
    fn test_null_row_is_none() {
        let user: Option<User> = first_row("get_user_by_clerk_id", vec![Value::Null]).unwrap();
        assert!(user.is_none());
    }

    #[test]
    fn test_malformed_row_is_decode_error() {
        let err = all_rows::<User>("get_user_by_clerk_id", vec![json!({ "id": 7 })]).unwrap_err();
        assert!(matches!(err, RpcError::Decode { .. }));
        assert!(err.to_string().contains("get_user_by_clerk_id"));
    }

    #[test]
    fn test_remote_error_display() {
        let err = RpcError::Remote {
            procedure: "get_recipe".to_string(),
            status: 400,
            code: Some("22P02".to_string()),
            message: "invalid input syntax for type uuid".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "get_recipe failed with status 400: invalid input syntax for type uuid"
        );
    }
}
