mod forkify;

pub use forkify::ForkifyClient;

use crate::error::FetchError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One entry of a search result list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image_url: String,
}

/// Full recipe payload as returned by a [`RecipeSource`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecipeData {
    pub title: String,
    pub author: String,
    pub image_url: String,
    pub source_url: Option<String>,
    pub ingredient_lines: Vec<String>,
    /// Servings stated by the source, if any
    pub servings: Option<u32>,
    /// Cooking time in minutes stated by the source, if any
    pub cook_time_minutes: Option<u32>,
}

/// Unified trait for anything that can look up recipes
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Get the source name (e.g., "forkify")
    fn source_name(&self) -> &str;

    /// Search recipes matching `query`. An empty list is not an error here.
    async fn fetch_recipe_list(&self, query: &str) -> Result<Vec<RecipeSummary>, FetchError>;

    /// Fetch a single recipe by its opaque id
    async fn fetch_recipe_by_id(&self, id: &str) -> Result<RecipeData, FetchError>;
}
