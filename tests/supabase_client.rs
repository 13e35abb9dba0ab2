//! The Supabase client against a mocked PostgREST endpoint.

use std::time::Duration;

use recipe_gateway::rpc::procedures::{CREATE_USER_WITH_CLERK_ID, GET_RECIPE, GET_USER_BY_CLERK_ID};
use recipe_gateway::rpc::{RpcClient, RpcError, SupabaseClient};
use serde_json::{json, Value};
use wiremock::{MockServer, ResponseTemplate};

mod common;

use common::{postgrest_error, rpc_call, test_config, user_row};

async fn client_for(server: &MockServer) -> SupabaseClient {
    SupabaseClient::new(&test_config(&server.uri()).supabase).unwrap()
}

#[tokio::test]
async fn test_set_returning_call_yields_rows() {
    let server = MockServer::start().await;
    rpc_call(GET_USER_BY_CLERK_ID, json!({ "clerk_id_param": "user_a" }))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([user_row("u1", "user_a")])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let rows = client
        .call(GET_USER_BY_CLERK_ID, json!({ "clerk_id_param": "user_a" }))
        .await
        .unwrap();

    assert_eq!(rows, vec![user_row("u1", "user_a")]);
}

#[tokio::test]
async fn test_single_object_response_is_one_row() {
    let server = MockServer::start().await;
    rpc_call(CREATE_USER_WITH_CLERK_ID, json!({ "clerk_id_param": "user_b" }))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_row("u2", "user_b")))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let rows = client
        .call(CREATE_USER_WITH_CLERK_ID, json!({ "clerk_id_param": "user_b" }))
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], "u2");
}

#[tokio::test]
async fn test_no_content_is_no_rows() {
    let server = MockServer::start().await;
    rpc_call(GET_RECIPE, json!({ "recipe_id_param": "r1" }))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let rows = client.call(GET_RECIPE, json!({ "recipe_id_param": "r1" })).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_postgrest_error_becomes_remote_error() {
    let server = MockServer::start().await;
    rpc_call(CREATE_USER_WITH_CLERK_ID, json!({ "clerk_id_param": "user_dup" }))
        .respond_with(ResponseTemplate::new(409).set_body_json(postgrest_error(
            "23505",
            "duplicate key value violates unique constraint \"users_clerk_id_key\"",
        )))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client
        .call(CREATE_USER_WITH_CLERK_ID, json!({ "clerk_id_param": "user_dup" }))
        .await
        .unwrap_err();

    match err {
        RpcError::Remote {
            procedure,
            status,
            code,
            message,
        } => {
            assert_eq!(procedure, CREATE_USER_WITH_CLERK_ID);
            assert_eq!(status, 409);
            assert_eq!(code.as_deref(), Some("23505"));
            assert!(message.starts_with("duplicate key"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_non_json_error_body_is_kept_as_message() {
    let server = MockServer::start().await;
    rpc_call(GET_RECIPE, json!({ "recipe_id_param": "r1" }))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway upstream"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.call(GET_RECIPE, json!({ "recipe_id_param": "r1" })).await.unwrap_err();
    assert!(matches!(
        err,
        RpcError::Remote { status: 502, code: None, ref message, .. } if message == "bad gateway upstream"
    ));
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let server = MockServer::start().await;
    rpc_call(GET_RECIPE, json!({ "recipe_id_param": "r1" }))
        .respond_with(ResponseTemplate::new(200).set_body_string("[{not json"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.call(GET_RECIPE, json!({ "recipe_id_param": "r1" })).await.unwrap_err();
    assert!(matches!(err, RpcError::Decode { .. }));
}

#[tokio::test]
async fn test_slow_store_hits_client_timeout() {
    let server = MockServer::start().await;
    rpc_call(GET_RECIPE, json!({ "recipe_id_param": "slow" }))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(Value::Array(Vec::new()))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.supabase.timeout_secs = 1;
    let client = SupabaseClient::new(&config.supabase).unwrap();

    let err = client.call(GET_RECIPE, json!({ "recipe_id_param": "slow" })).await.unwrap_err();
    assert!(matches!(err, RpcError::Transport { .. }));
}

#[tokio::test]
async fn test_unreachable_store_is_transport_error() {
    let mut config = test_config("http://127.0.0.1:9");
    config.supabase.connect_timeout_secs = 1;
    let client = SupabaseClient::new(&config.supabase).unwrap();

    let err = client
        .call(GET_USER_BY_CLERK_ID, json!({ "clerk_id_param": "x" }))
        .await
        .unwrap_err();
    assert!(matches!(err, RpcError::Transport { .. }));
}
