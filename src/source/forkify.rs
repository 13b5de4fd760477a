use super::{RecipeData, RecipeSource, RecipeSummary};
use crate::config::ApiConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use html_escape::decode_html_entities;
use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Client for the Forkify recipe API (`/api/search` and `/api/get`)
pub struct ForkifyClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    recipes: Vec<ApiSummary>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiSummary {
    #[serde(alias = "id")]
    recipe_id: String,
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    recipe: Option<ApiRecipe>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiRecipe {
    title: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    image_url: String,
    source_url: Option<String>,
    #[serde(default)]
    ingredients: Vec<String>,
    servings: Option<u32>,
    #[serde(alias = "cooking_time")]
    cook_time: Option<u32>,
}

impl ForkifyClient {
    /// Create a client for `base_url` (e.g. `https://forkify-api.herokuapp.com`)
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; RecipePlanner/0.1)")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the `[api]` configuration section
    pub fn from_config(config: &ApiConfig) -> Result<Self, FetchError> {
        Self::new(
            config.base_url.clone(),
            Some(Duration::from_secs(config.timeout)),
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self.client.get(&url).query(query).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Turn non-2xx responses into [`FetchError::Api`], keeping the API's message when present
async fn check_status(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| json["error"].as_str().map(String::from))
        .unwrap_or(body);

    Err(FetchError::Api {
        status: status.as_u16(),
        message,
    })
}

fn decode(text: &str) -> String {
    decode_html_entities(text).trim().to_string()
}

#[async_trait]
impl RecipeSource for ForkifyClient {
    fn source_name(&self) -> &str {
        "forkify"
    }

    async fn fetch_recipe_list(&self, query: &str) -> Result<Vec<RecipeSummary>, FetchError> {
        let response: SearchResponse = self.get_json("/api/search", &[("q", query)]).await?;

        if let Some(error) = response.error {
            if !error.is_empty() {
                return Err(FetchError::Api {
                    status: 200,
                    message: error,
                });
            }
        }

        let results: Vec<RecipeSummary> = response
            .recipes
            .into_iter()
            .map(|r| RecipeSummary {
                id: r.recipe_id,
                title: decode(&r.title),
                author: decode(&r.publisher),
                image_url: r.image_url,
            })
            .collect();

        debug!("Search '{}' returned {} recipes", query, results.len());
        Ok(results)
    }

    async fn fetch_recipe_by_id(&self, id: &str) -> Result<RecipeData, FetchError> {
        let response: GetResponse = self.get_json("/api/get", &[("rId", id)]).await?;

        let recipe = match (response.recipe, response.error) {
            (Some(recipe), _) => recipe,
            (None, Some(error)) if !error.is_empty() => {
                debug!("Recipe '{}' lookup failed: {}", id, error);
                return Err(FetchError::RecipeNotFound(id.to_string()));
            }
            (None, _) => return Err(FetchError::RecipeNotFound(id.to_string())),
        };

        Ok(RecipeData {
            title: decode(&recipe.title),
            author: decode(&recipe.publisher),
            image_url: recipe.image_url,
            source_url: recipe.source_url.filter(|url| !url.is_empty()),
            ingredient_lines: recipe.ingredients.iter().map(|line| decode(line)).collect(),
            servings: recipe.servings.filter(|s| *s > 0),
            cook_time_minutes: recipe.cook_time.filter(|t| *t > 0),
        })
    }
}
