pub mod config;
pub mod error;
pub mod favorites;
pub mod ingredient;
pub mod pagination;
pub mod planner;
pub mod recipe;
pub mod search;
pub mod shopping_list;
pub mod source;
pub mod storage;
pub mod units;

use std::sync::Arc;

// Re-export commonly used types
pub use config::PlannerConfig;
pub use error::{FetchError, PlannerError, StorageError};
pub use favorites::{FavoriteEntry, FavoritesStore};
pub use ingredient::{parse as parse_ingredient, ParsedIngredient};
pub use planner::{Outcome, Planner, RecipeSnapshot, ResultsPage};
pub use recipe::{RecipeModel, ServingsChange};
pub use search::SearchModel;
pub use shopping_list::{ShoppingListEntry, ShoppingListModel};
pub use source::{ForkifyClient, RecipeData, RecipeSource, RecipeSummary};
pub use storage::{FavoritesStorage, FileStorage, MemoryStorage};

/// Build a planner backed by the Forkify API and file storage, as described by `config`
pub fn planner_from_config(config: PlannerConfig) -> Result<Planner, PlannerError> {
    let source = ForkifyClient::from_config(&config.api)?;
    let storage = FileStorage::new(&config.storage.directory, &config.storage.key);
    Ok(Planner::new(Arc::new(source), Arc::new(storage), config))
}

/// Search recipes with configuration from `config.toml` and the environment
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let results = recipe_planner::search_recipes("pizza").await?;
/// for recipe in results {
///     println!("{} by {}", recipe.title, recipe.author);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_recipes(query: &str) -> Result<Vec<RecipeSummary>, PlannerError> {
    let config = PlannerConfig::load()?;
    let source = ForkifyClient::from_config(&config.api)?;
    let mut search = SearchModel::new(query);
    search.search(&source).await?;
    Ok(search.results().to_vec())
}

/// Fetch a recipe by id with its ingredients parsed and cooking time filled in
pub async fn fetch_recipe(id: &str) -> Result<RecipeModel, PlannerError> {
    let config = PlannerConfig::load()?;
    let source = ForkifyClient::from_config(&config.api)?;
    let mut recipe = RecipeModel::new(id).with_default_servings(config.default_servings);
    recipe.load(&source).await?;
    recipe.parse_ingredients();
    recipe.estimate_cook_time();
    Ok(recipe)
}
