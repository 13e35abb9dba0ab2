//! Remote procedure client subsystem.
//!
//! # Data Flow
//! ```text
//! handler (typed params, e.g. ClerkIdParams)
//!     → client.rs::invoke (encode to JSON, log, metrics)
//!     → RpcClient::call (trait object injected into AppState)
//!         → supabase.rs: POST {url}/rest/v1/rpc/{procedure}
//!     → rows (Vec<serde_json::Value>)
//!     → types.rs::first_row / all_rows (decode into models)
//! ```
//!
//! # Design Decisions
//! - One operation, `call(procedure, params) -> rows`; no query building
//! - The client is constructed once and passed in, never a global
//! - No retries; any failure is returned to the handler as an `RpcError`

pub mod client;
pub mod procedures;
pub mod supabase;
pub mod types;

pub use client::{invoke, RpcClient};
pub use supabase::SupabaseClient;
pub use types::{all_rows, first_row, RpcError, RpcResult};
