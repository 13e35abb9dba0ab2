//! Shared utilities for integration tests.

use std::sync::Arc;

use recipe_gateway::config::GatewayConfig;
use recipe_gateway::{HttpServer, Shutdown, SupabaseClient};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockBuilder, MockServer};

pub const ANON_KEY: &str = "test-anon-key";

/// A gateway served on an ephemeral port, stopped on drop.
#[allow(dead_code)]
pub struct TestGateway {
    pub base_url: String,
    shutdown: Shutdown,
    handle: JoinHandle<()>,
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.shutdown.trigger();
        self.handle.abort();
    }
}

pub fn test_config(supabase_url: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.supabase.url = supabase_url.to_string();
    config.supabase.anon_key = ANON_KEY.to_string();
    config.supabase.timeout_secs = 2;
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config
}

/// Start a gateway whose Supabase client points at `supabase`.
#[allow(dead_code)]
pub async fn start_gateway(supabase: &MockServer) -> TestGateway {
    let config = test_config(&supabase.uri());
    let rpc = Arc::new(SupabaseClient::new(&config.supabase).unwrap());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, rpc);
    let handle = tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestGateway {
        base_url,
        shutdown,
        handle,
    }
}

/// Matches an authenticated RPC call to `procedure` with exactly `params`.
pub fn rpc_call(procedure: &str, params: Value) -> MockBuilder {
    Mock::given(method("POST"))
        .and(path(format!("/rest/v1/rpc/{}", procedure)))
        .and(header("apikey", ANON_KEY))
        .and(header("authorization", format!("Bearer {}", ANON_KEY).as_str()))
        .and(body_json(params))
}

pub fn user_row(id: &str, clerk_id: &str) -> Value {
    json!({ "id": id, "clerk_id": clerk_id, "created_at": "2025-03-01T10:00:00+00:00" })
}

/// PostgREST-style error body.
pub fn postgrest_error(code: &str, message: &str) -> Value {
    json!({ "code": code, "details": null, "hint": null, "message": message })
}
