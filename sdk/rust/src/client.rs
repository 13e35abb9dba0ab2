use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use crate::types::*;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid gateway url: {0}")]
    InvalidUrl(String),

    /// The gateway answered with a non-success status.
    #[error("gateway returned {status}: {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

pub struct RecipeClient {
    client: Client,
    gateway_url: String,
}

impl RecipeClient {
    pub fn new(gateway_url: &str) -> Self {
        Self::with_client(Client::new(), gateway_url)
    }

    pub fn with_client(client: Client, gateway_url: &str) -> Self {
        Self {
            client,
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
        }
    }

    /// Gateway URL with `segments` appended, each percent-encoded as one
    /// path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, SdkError> {
        let mut url = Url::parse(&self.gateway_url).map_err(|e| SdkError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| SdkError::InvalidUrl(self.gateway_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `None` when the user does not exist or the lookup failed.
    pub async fn get_user_by_clerk_id(&self, clerk_id: &str) -> Result<Option<User>, SdkError> {
        let resp = self
            .client
            .get(self.endpoint(&["identity", "user", "clerk", clerk_id])?)
            .send()
            .await?;
        Ok(decode::<UserResponse>(resp).await?.user)
    }

    pub async fn create_user(&self, clerk_id: &str) -> Result<Option<User>, SdkError> {
        let resp = self
            .client
            .post(self.endpoint(&["identity", "user", "create"])?)
            .json(&json!({ "clerkId": clerk_id }))
            .send()
            .await?;
        Ok(decode::<UserResponse>(resp).await?.user)
    }

    pub async fn get_or_create_user(&self, clerk_id: &str) -> Result<GetOrCreateUserResponse, SdkError> {
        let resp = self
            .client
            .post(self.endpoint(&["identity", "user", "get-or-create"])?)
            .json(&json!({ "clerkId": clerk_id }))
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn get_user_recipes(&self, user_id: &str) -> Result<Vec<RecipeSummary>, SdkError> {
        let resp = self
            .client
            .get(self.endpoint(&["recipe", "user", user_id])?)
            .send()
            .await?;
        Ok(decode::<RecipesResponse>(resp).await?.recipes)
    }

    pub async fn create_recipe(&self, recipe: &NewRecipe) -> Result<Option<Recipe>, SdkError> {
        let resp = self
            .client
            .post(self.endpoint(&["recipe", "create"])?)
            .json(recipe)
            .send()
            .await?;
        Ok(decode::<RecipeResponse>(resp).await?.recipe)
    }

    pub async fn get_recipe(&self, recipe_id: &str) -> Result<Option<Recipe>, SdkError> {
        let resp = self
            .client
            .get(self.endpoint(&["recipe", recipe_id])?)
            .send()
            .await?;
        Ok(decode::<RecipeResponse>(resp).await?.recipe)
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, SdkError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }

    let text = resp.text().await?;
    let (code, message) = match serde_json::from_str::<ApiErrorBody>(&text) {
        Ok(body) => (Some(body.code), body.message),
        Err(_) => (None, text),
    };
    Err(SdkError::Api {
        status: status.as_u16(),
        code,
        message,
    })
}
