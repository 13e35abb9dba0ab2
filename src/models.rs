//! Domain records returned by the remote data store.
//!
//! These are plain data shapes. Field names match the stored column names,
//! so rows decode directly and serialize back out unchanged. Columns not
//! named here are carried in `extra` and written back as they came.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A local user correlated to an external identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// External-identity key issued by Clerk. Unique per user.
    pub clerk_id: String,
    pub created_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One ingredient line.
///
/// Amount and unit are free-form: whatever JSON the client sent (`"2"`,
/// `2`, `"a pinch"`) is stored and returned untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One preparation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub step: i32,
    pub text: String,
}

/// A full recipe with its ingredient and instruction sequences.
///
/// `None` sequences mean the recipe was stored without them, which is
/// distinct from an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: String,
    pub created_user_id: String,
    #[serde(default)]
    pub ingredients: Option<Vec<Ingredient>>,
    #[serde(default)]
    pub instructions: Option<Vec<Instruction>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// List-view projection of a [`Recipe`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
