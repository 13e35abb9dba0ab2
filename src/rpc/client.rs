//! The remote procedure client seam.
//!
//! # Responsibilities
//! - Define the single operation every data store client offers
//! - Encode typed parameters, log and measure each call
//!
//! Handlers only ever see `Arc<dyn RpcClient>`, so tests can swap in a fake.

use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::observability::metrics;
use crate::rpc::types::{RpcError, RpcResult};

/// Invokes named procedures hosted by the remote data store.
#[async_trait]
pub trait RpcClient: Send + Sync {
    /// Call `procedure` with a JSON object of named parameters and return
    /// the resulting rows. A procedure with no result yields no rows.
    async fn call(&self, procedure: &str, params: Value) -> RpcResult<Vec<Value>>;
}

/// Encode `params` and call `procedure`, recording the outcome.
pub async fn invoke<P>(client: &dyn RpcClient, procedure: &str, params: &P) -> RpcResult<Vec<Value>>
where
    P: Serialize + ?Sized,
{
    let params = serde_json::to_value(params).map_err(|e| RpcError::Encode {
        procedure: procedure.to_string(),
        message: e.to_string(),
    })?;

    let start = Instant::now();
    let result = client.call(procedure, params).await;

    match &result {
        Ok(rows) => {
            tracing::debug!(procedure, rows = rows.len(), elapsed = ?start.elapsed(), "RPC call succeeded");
            metrics::record_rpc(procedure, "ok", start);
        }
        Err(e) => {
            tracing::debug!(procedure, error = %e, elapsed = ?start.elapsed(), "RPC call failed");
            metrics::record_rpc(procedure, outcome_label(e), start);
        }
    }

    result
}

fn outcome_label(error: &RpcError) -> &'static str {
    match error {
        RpcError::Transport { .. } => "transport_error",
        RpcError::Remote { .. } => "remote_error",
        RpcError::Encode { .. } | RpcError::Decode { .. } => "decode_error",
        RpcError::Config(_) => "config_error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::procedures::{ClerkIdParams, GET_USER_BY_CLERK_ID};
    use crate::test_support::FakeRpcClient;
    use serde_json::json;

    #[tokio::test]
    async fn test_invoke_passes_named_parameters() {
        let fake = FakeRpcClient::new();
        invoke(&fake, GET_USER_BY_CLERK_ID, &ClerkIdParams { clerk_id_param: "clerk_1" })
            .await
            .unwrap();

        let calls = fake.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, GET_USER_BY_CLERK_ID);
        assert_eq!(calls[0].1, json!({ "clerk_id_param": "clerk_1" }));
    }

    #[tokio::test]
    async fn test_invoke_returns_client_errors_unchanged() {
        let fake = FakeRpcClient::new();
        fake.fail_procedure(GET_USER_BY_CLERK_ID);

        let err = invoke(&fake, GET_USER_BY_CLERK_ID, &ClerkIdParams { clerk_id_param: "x" })
            .await
            .unwrap_err();
        assert!(matches!(err, RpcError::Remote { status: 500, .. }));
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(outcome_label(&RpcError::Config("x".into())), "config_error");
        assert_eq!(
            outcome_label(&RpcError::Decode {
                procedure: "p".into(),
                message: "m".into()
            }),
            "decode_error"
        );
    }
}
