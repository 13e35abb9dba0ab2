//! Supabase (PostgREST) remote procedure client.
//!
//! # Responsibilities
//! - Hold connection credentials
//! - POST named parameters to `/rest/v1/rpc/{procedure}`
//! - Normalize the response body into rows and map failures to [`RpcError`]
//!
//! No retries happen here. Timeouts come from the configured reqwest client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::config::SupabaseConfig;
use crate::rpc::client::RpcClient;
use crate::rpc::types::{RpcError, RpcResult};

/// Error payload PostgREST returns for failed calls.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
}

/// Remote procedure client backed by the Supabase REST API.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    /// Base URL ending in `/rest/v1/rpc/`.
    rpc_base: Url,
}

impl SupabaseClient {
    /// Create a new client from validated configuration.
    pub fn new(config: &SupabaseConfig) -> RpcResult<Self> {
        let rpc_base = rpc_base_url(&config.url)?;

        let mut key = HeaderValue::from_str(&config.anon_key)
            .map_err(|e| RpcError::Config(format!("anon key is not a valid header value: {}", e)))?;
        key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.anon_key))
            .map_err(|e| RpcError::Config(format!("anon key is not a valid header value: {}", e)))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| RpcError::Config(format!("failed to build HTTP client: {}", e)))?;

        tracing::info!(rpc_base = %rpc_base, timeout_secs = config.timeout_secs, "Supabase client initialized");

        Ok(Self { http, rpc_base })
    }

    /// URL a given procedure is invoked at.
    pub fn procedure_url(&self, procedure: &str) -> RpcResult<Url> {
        self.rpc_base
            .join(procedure)
            .map_err(|e| RpcError::Config(format!("invalid procedure name '{}': {}", procedure, e)))
    }
}

#[async_trait]
impl RpcClient for SupabaseClient {
    async fn call(&self, procedure: &str, params: Value) -> RpcResult<Vec<Value>> {
        let url = self.procedure_url(procedure)?;
        let transport = |source| RpcError::Transport {
            procedure: procedure.to_string(),
            source,
        };

        let response = self.http.post(url).json(&params).send().await.map_err(transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?;

        if !status.is_success() {
            let parsed = serde_json::from_slice::<PostgrestError>(&body).ok();
            let (code, message) = match parsed {
                Some(err) => (
                    err.code,
                    err.message.unwrap_or_else(|| fallback_message(status, &body)),
                ),
                None => (None, fallback_message(status, &body)),
            };
            return Err(RpcError::Remote {
                procedure: procedure.to_string(),
                status: status.as_u16(),
                code,
                message,
            });
        }

        rows_from_body(procedure, &body)
    }
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("rpc_base", &self.rpc_base.as_str())
            .finish()
    }
}

fn rpc_base_url(project_url: &str) -> RpcResult<Url> {
    let mut base = Url::parse(project_url)
        .map_err(|e| RpcError::Config(format!("invalid Supabase URL '{}': {}", project_url, e)))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("rest/v1/rpc/")
        .map_err(|e| RpcError::Config(format!("invalid Supabase URL '{}': {}", project_url, e)))
}

/// Set-returning procedures answer with an array; scalar or composite ones
/// with a single value; void ones with an empty body or `null`.
fn rows_from_body(procedure: &str, body: &[u8]) -> RpcResult<Vec<Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_slice(body).map_err(|e| RpcError::Decode {
        procedure: procedure.to_string(),
        message: e.to_string(),
    })?;
    Ok(match value {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        other => vec![other],
    })
}

fn fallback_message(status: reqwest::StatusCode, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        text.chars().take(200).collect()
    }
}
