use async_trait::async_trait;
use recipe_planner::{
    FavoriteEntry, FavoritesStorage, FetchError, MemoryStorage, Outcome, Planner, PlannerConfig,
    PlannerError, RecipeData, RecipeSource, RecipeSummary, ServingsChange,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// In-memory recipe source with a per-recipe response delay
#[derive(Default)]
struct FakeSource {
    summaries: Vec<RecipeSummary>,
    recipes: HashMap<String, (RecipeData, u64)>,
}

impl FakeSource {
    fn with_recipe(mut self, id: &str, lines: &[&str], delay_ms: u64) -> Self {
        let data = RecipeData {
            title: format!("Recipe {}", id),
            author: "Test Kitchen".to_string(),
            image_url: format!("http://example.com/{}.jpg", id),
            source_url: None,
            ingredient_lines: lines.iter().map(|l| l.to_string()).collect(),
            servings: None,
            cook_time_minutes: None,
        };
        self.summaries.push(RecipeSummary {
            id: id.to_string(),
            title: data.title.clone(),
            author: data.author.clone(),
            image_url: data.image_url.clone(),
        });
        self.recipes.insert(id.to_string(), (data, delay_ms));
        self
    }
}

#[async_trait]
impl RecipeSource for FakeSource {
    fn source_name(&self) -> &str {
        "fake"
    }

    async fn fetch_recipe_list(&self, query: &str) -> Result<Vec<RecipeSummary>, FetchError> {
        if query == "fail" {
            return Err(FetchError::Malformed("boom".to_string()));
        }
        Ok(self
            .summaries
            .iter()
            .filter(|s| s.title.contains(query) || query == "all")
            .cloned()
            .collect())
    }

    async fn fetch_recipe_by_id(&self, id: &str) -> Result<RecipeData, FetchError> {
        let delay_ms = self.recipes.get(id).map(|(_, delay)| *delay).unwrap_or(50);
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        self.recipes
            .get(id)
            .map(|(data, _)| data.clone())
            .ok_or_else(|| FetchError::RecipeNotFound(id.to_string()))
    }
}

fn planner_with(source: FakeSource, storage: Arc<MemoryStorage>) -> Planner {
    Planner::new(Arc::new(source), storage, PlannerConfig::default())
}

fn default_source() -> FakeSource {
    FakeSource::default()
        .with_recipe("slow", &["2 cups flour", "1 egg"], 100)
        .with_recipe("fast", &["1/2 tsp salt", "pepper", "3 tbsp oil"], 10)
}

#[tokio::test(start_paused = true)]
async fn test_stale_recipe_fetch_never_overwrites_newer_recipe() {
    let planner = planner_with(default_source(), Arc::new(MemoryStorage::new()));

    let (first, second) = tokio::join!(planner.open_recipe("slow"), planner.open_recipe("fast"));

    assert!(matches!(first, Ok(Outcome::Superseded)));
    let snapshot = second.unwrap().applied().unwrap();
    assert_eq!(snapshot.recipe.id, "fast");

    let current = planner.recipe().await.unwrap();
    assert_eq!(current.id, "fast");
    assert_eq!(current.title, "Recipe fast");
    assert_eq!(current.ingredients.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_earlier_response_for_superseded_recipe_is_dropped() {
    let planner = planner_with(default_source(), Arc::new(MemoryStorage::new()));

    // "fast" resolves first but was already superseded by "slow"
    let (first, second) = tokio::join!(planner.open_recipe("fast"), planner.open_recipe("slow"));

    assert!(matches!(first, Ok(Outcome::Superseded)));
    assert!(matches!(second, Ok(Outcome::Applied(_))));
    assert_eq!(planner.recipe().await.unwrap().id, "slow");
}

#[tokio::test(start_paused = true)]
async fn test_stale_fetch_failure_is_not_reported() {
    let planner = planner_with(default_source(), Arc::new(MemoryStorage::new()));

    let (first, second) = tokio::join!(planner.open_recipe("missing"), planner.open_recipe("fast"));

    assert!(matches!(first, Ok(Outcome::Superseded)));
    assert!(matches!(second, Ok(Outcome::Applied(_))));
}

#[tokio::test]
async fn test_open_unknown_recipe_fails_and_keeps_previous() {
    let planner = planner_with(default_source(), Arc::new(MemoryStorage::new()));
    planner.open_recipe("fast").await.unwrap();

    let result = planner.open_recipe("missing").await;
    assert!(matches!(
        result,
        Err(PlannerError::FetchError(FetchError::RecipeNotFound(_)))
    ));
    assert_eq!(planner.recipe().await.unwrap().id, "fast");
}

#[tokio::test]
async fn test_blank_input_is_ignored() {
    let planner = planner_with(default_source(), Arc::new(MemoryStorage::new()));

    assert!(matches!(planner.search("   ").await, Ok(Outcome::Ignored)));
    assert!(matches!(planner.open_recipe("").await, Ok(Outcome::Ignored)));
    assert!(planner.recipe().await.is_none());
}

#[tokio::test]
async fn test_search_and_pages() {
    let mut source = FakeSource::default();
    for i in 0..23 {
        source = source.with_recipe(&format!("r{}", i), &["salt"], 0);
    }
    let planner = planner_with(source, Arc::new(MemoryStorage::new()));

    let first = planner.search("all").await.unwrap().applied().unwrap();
    assert_eq!(first.results.len(), 10);
    assert_eq!(first.number, 1);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.results[0].id, "r0");
    assert!(!first.has_previous);
    assert!(first.has_next);

    let last = planner.search_page(3).await.unwrap();
    assert_eq!(last.results.len(), 3);
    assert!(last.has_previous);
    assert!(!last.has_next);
    assert_eq!(last.results[2].id, "r22");
}

#[tokio::test]
async fn test_search_failures() {
    let planner = planner_with(default_source(), Arc::new(MemoryStorage::new()));

    let empty = planner.search("nothing matches").await;
    assert!(matches!(
        empty,
        Err(PlannerError::FetchError(FetchError::NoResults(_)))
    ));

    let failed = planner.search("fail").await;
    assert!(matches!(failed, Err(PlannerError::FetchError(_))));

    assert!(matches!(
        planner.search_page(1).await,
        Err(PlannerError::NotFoundError(_))
    ));
}

#[tokio::test]
async fn test_actions_without_open_recipe() {
    let planner = planner_with(default_source(), Arc::new(MemoryStorage::new()));

    assert!(matches!(
        planner.update_servings(ServingsChange::Increase).await,
        Err(PlannerError::NotFoundError(_))
    ));
    assert!(matches!(
        planner.add_recipe_to_list().await,
        Err(PlannerError::NotFoundError(_))
    ));
    assert!(matches!(
        planner.toggle_like().await,
        Err(PlannerError::NotFoundError(_))
    ));
}

#[tokio::test]
async fn test_servings_and_shopping_list_flow() {
    let planner = planner_with(default_source(), Arc::new(MemoryStorage::new()));
    planner.open_recipe("slow").await.unwrap();

    let recipe = planner
        .update_servings(ServingsChange::Increase)
        .await
        .unwrap();
    assert_eq!(recipe.servings, 5);
    assert_eq!(recipe.ingredients[0].quantity, Some(2.5));
    assert_eq!(recipe.raw_ingredient_lines[0], "2 cups flour");

    let added = planner.add_recipe_to_list().await.unwrap();
    assert_eq!(added.len(), 2);
    assert_eq!(added[0].count, Some(2.5));
    assert_eq!(added[0].unit.as_deref(), Some("cup"));

    // A second add produces independent entries
    planner.add_recipe_to_list().await.unwrap();
    assert_eq!(planner.shopping_list().await.len(), 4);

    planner.delete_list_item(&added[0].id).await;
    planner.update_list_count(&added[1].id, Some(6.0)).await;
    planner.delete_list_item("unknown").await;

    let list = planner.shopping_list().await;
    assert_eq!(list.len(), 3);
    assert_eq!(list[0].id, added[1].id);
    assert_eq!(list[0].count, Some(6.0));
}

#[tokio::test]
async fn test_toggle_like_persists_and_restores() {
    let storage = Arc::new(MemoryStorage::with_entries(vec![FavoriteEntry {
        id: "saved".to_string(),
        title: "Saved Recipe".to_string(),
        author: "Someone".to_string(),
        image_url: "http://example.com/saved.jpg".to_string(),
    }]));
    let planner = planner_with(default_source(), storage.clone());

    let restored = planner.load_favorites().await.unwrap();
    assert_eq!(restored.len(), 1);

    let snapshot = planner.open_recipe("fast").await.unwrap().applied().unwrap();
    assert!(!snapshot.liked);

    assert!(planner.toggle_like().await.unwrap());
    assert!(planner.is_liked("fast").await);
    let stored: Vec<String> = storage
        .read_all()
        .unwrap()
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(stored, vec!["saved", "fast"]);

    // Reopening reports the like
    let snapshot = planner.open_recipe("fast").await.unwrap().applied().unwrap();
    assert!(snapshot.liked);

    assert!(!planner.toggle_like().await.unwrap());
    assert!(!planner.is_liked("fast").await);
    assert_eq!(storage.read_all().unwrap().len(), 1);
    assert_eq!(planner.favorites().await.len(), 1);
}
