//! Typed client for the recipe gateway HTTP API.

pub mod client;
pub mod types;

pub use client::{RecipeClient, SdkError};
pub use types::*;
