use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::favorites::{FavoriteEntry, FavoritesStore};
use crate::pagination::paginate;
use crate::recipe::{RecipeModel, ServingsChange};
use crate::search::SearchModel;
use crate::shopping_list::{ShoppingListEntry, ShoppingListModel};
use crate::source::{RecipeSource, RecipeSummary};
use crate::storage::FavoritesStorage;
use log::{debug, info};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Result of an action that may not change anything
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The action ran and its result was installed
    Applied(T),
    /// Blank input, nothing was done
    Ignored,
    /// A newer action replaced this one while it was fetching; its result was dropped
    Superseded,
}

impl<T> Outcome<T> {
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            _ => None,
        }
    }
}

/// Open recipe plus whether it is liked
#[derive(Debug, Clone)]
pub struct RecipeSnapshot {
    pub recipe: RecipeModel,
    pub liked: bool,
}

/// One page of search results, owned
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsPage {
    pub results: Vec<RecipeSummary>,
    pub number: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Everything the planner holds between actions
pub struct AppState {
    pub search: Option<SearchModel>,
    pub recipe: Option<RecipeModel>,
    pub list: Option<ShoppingListModel>,
    pub likes: FavoritesStore,
    search_generation: u64,
    recipe_generation: u64,
}

/// Controller actions over a single [`AppState`].
///
/// The state lock is never held while fetching, so a slow fetch can be
/// overtaken by a newer action. Each fetch records a generation number and
/// only installs its result if no newer fetch of the same kind started.
pub struct Planner {
    source: Arc<dyn RecipeSource>,
    config: PlannerConfig,
    state: Mutex<AppState>,
}

impl Planner {
    pub fn new(
        source: Arc<dyn RecipeSource>,
        storage: Arc<dyn FavoritesStorage>,
        config: PlannerConfig,
    ) -> Self {
        Self {
            source,
            config,
            state: Mutex::new(AppState {
                search: None,
                recipe: None,
                list: None,
                likes: FavoritesStore::new(storage),
                search_generation: 0,
                recipe_generation: 0,
            }),
        }
    }

    /// Restore liked recipes from storage. Call once at startup.
    pub async fn load_favorites(&self) -> Result<Vec<FavoriteEntry>, PlannerError> {
        let mut state = self.state.lock().await;
        state.likes.restore()?;
        info!("Loaded {} liked recipes", state.likes.count());
        Ok(state.likes.entries().to_vec())
    }

    /// Search for `query`, replacing any previous search.
    ///
    /// Returns the first page of results.
    pub async fn search(&self, query: &str) -> Result<Outcome<ResultsPage>, PlannerError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Outcome::Ignored);
        }

        let generation = {
            let mut state = self.state.lock().await;
            state.search_generation += 1;
            state.search_generation
        };

        let mut search = SearchModel::new(query);
        let searched = search.search(self.source.as_ref()).await;

        let mut state = self.state.lock().await;
        if state.search_generation != generation {
            debug!("Dropping stale results for '{}'", query);
            return Ok(Outcome::Superseded);
        }
        searched?;

        let first_page = self.results_page(&search, 1);
        state.search = Some(search);
        Ok(Outcome::Applied(first_page))
    }

    /// Page `page` (1-based) of the current search results
    pub async fn search_page(&self, page: usize) -> Result<ResultsPage, PlannerError> {
        let state = self.state.lock().await;
        let search = state
            .search
            .as_ref()
            .ok_or_else(|| PlannerError::NotFoundError("no search has been run".to_string()))?;
        Ok(self.results_page(search, page))
    }

    fn results_page(&self, search: &SearchModel, page: usize) -> ResultsPage {
        let page = paginate(search.results(), page, self.config.results_per_page);
        ResultsPage {
            results: page.items.to_vec(),
            number: page.number,
            total_pages: page.total_pages,
            has_previous: page.has_previous(),
            has_next: page.has_next(),
        }
    }

    /// Open recipe `id`: fetch, parse ingredients, work out time and servings.
    pub async fn open_recipe(&self, id: &str) -> Result<Outcome<RecipeSnapshot>, PlannerError> {
        let id = id.trim();
        if id.is_empty() {
            return Ok(Outcome::Ignored);
        }

        let generation = {
            let mut state = self.state.lock().await;
            state.recipe_generation += 1;
            state.recipe_generation
        };

        let mut recipe =
            RecipeModel::new(id).with_default_servings(self.config.default_servings);
        let loaded = recipe.load(self.source.as_ref()).await;

        let mut state = self.state.lock().await;
        if state.recipe_generation != generation {
            debug!("Dropping stale fetch for recipe {}", id);
            return Ok(Outcome::Superseded);
        }
        loaded?;

        recipe.parse_ingredients();
        recipe.estimate_cook_time();

        let liked = state.likes.is_liked(id);
        info!("Opened recipe {} ({})", id, recipe.title);
        state.recipe = Some(recipe.clone());

        Ok(Outcome::Applied(RecipeSnapshot { recipe, liked }))
    }

    /// Change the open recipe's servings by one
    pub async fn update_servings(
        &self,
        change: ServingsChange,
    ) -> Result<RecipeModel, PlannerError> {
        let mut state = self.state.lock().await;
        let recipe = state.recipe.as_mut().ok_or_else(no_recipe)?;
        recipe.update_servings(change);
        Ok(recipe.clone())
    }

    /// Set the open recipe's servings directly
    pub async fn set_servings(&self, servings: u32) -> Result<RecipeModel, PlannerError> {
        let mut state = self.state.lock().await;
        let recipe = state.recipe.as_mut().ok_or_else(no_recipe)?;
        recipe.set_servings(servings);
        Ok(recipe.clone())
    }

    /// Copy the open recipe's ingredients onto the shopping list, creating it if needed
    pub async fn add_recipe_to_list(&self) -> Result<Vec<ShoppingListEntry>, PlannerError> {
        let mut state = self.state.lock().await;
        let AppState { recipe, list, .. } = &mut *state;
        let recipe = recipe.as_ref().ok_or_else(no_recipe)?;

        let list = list.get_or_insert_with(ShoppingListModel::new);
        Ok(list.add_ingredients(&recipe.ingredients))
    }

    /// Remove a shopping list entry. Unknown ids are ignored.
    pub async fn delete_list_item(&self, id: &str) {
        let mut state = self.state.lock().await;
        if let Some(list) = state.list.as_mut() {
            list.delete_item(id);
        }
    }

    /// Change a shopping list entry's count. Unknown ids are ignored.
    pub async fn update_list_count(&self, id: &str, count: Option<f64>) {
        let mut state = self.state.lock().await;
        if let Some(list) = state.list.as_mut() {
            list.update_count(id, count);
        }
    }

    /// Like the open recipe, or unlike it if already liked.
    ///
    /// Returns whether the recipe is liked afterwards.
    pub async fn toggle_like(&self) -> Result<bool, PlannerError> {
        let mut state = self.state.lock().await;
        let AppState { recipe, likes, .. } = &mut *state;
        let recipe = recipe.as_ref().ok_or_else(no_recipe)?;

        if likes.is_liked(&recipe.id) {
            likes.delete_like(&recipe.id)?;
            Ok(false)
        } else {
            likes.add_like(
                recipe.id.clone(),
                recipe.title.clone(),
                recipe.author.clone(),
                recipe.image_url.clone(),
            )?;
            Ok(true)
        }
    }

    pub async fn recipe(&self) -> Option<RecipeModel> {
        self.state.lock().await.recipe.clone()
    }

    pub async fn shopping_list(&self) -> Vec<ShoppingListEntry> {
        let state = self.state.lock().await;
        state
            .list
            .as_ref()
            .map(|list| list.entries().to_vec())
            .unwrap_or_default()
    }

    pub async fn favorites(&self) -> Vec<FavoriteEntry> {
        self.state.lock().await.likes.entries().to_vec()
    }

    pub async fn is_liked(&self, id: &str) -> bool {
        self.state.lock().await.likes.is_liked(id)
    }
}

fn no_recipe() -> PlannerError {
    PlannerError::NotFoundError("no recipe is open".to_string())
}
