//! HTTP gateway from a recipe-management app to the stored procedures of
//! its Supabase database.

pub mod config;
pub mod error;
pub mod http;
pub mod identity;
pub mod lifecycle;
pub mod models;
pub mod observability;
pub mod recipe;
pub mod rpc;

#[cfg(test)]
mod test_support;

pub use config::schema::GatewayConfig;
pub use error::ApiError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use rpc::{RpcClient, SupabaseClient};
