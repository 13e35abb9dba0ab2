//! HTTP transport subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID on the span)
//!     → identity / recipe routers (extract + validate)
//!     → service call over Arc<dyn RpcClient>
//!     → JSON response, or ApiError { code, message }
//! ```

pub mod health;
pub mod request;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
