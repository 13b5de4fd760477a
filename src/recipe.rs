use crate::error::FetchError;
use crate::ingredient::{self, ParsedIngredient};
use crate::source::{RecipeData, RecipeSource};
use log::debug;
use serde::Serialize;

/// Servings used when the source does not state any
pub const DEFAULT_SERVINGS: u32 = 4;

/// Minutes added per group of [`INGREDIENTS_PER_PERIOD`] ingredients
const MINUTES_PER_PERIOD: u32 = 15;
const INGREDIENTS_PER_PERIOD: usize = 3;
const MIN_COOK_TIME_MINUTES: u32 = 15;
const MAX_COOK_TIME_MINUTES: u32 = 240;

/// Direction of a serving-count change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServingsChange {
    Increase,
    Decrease,
}

/// The recipe currently being viewed
#[derive(Debug, Clone, Serialize)]
pub struct RecipeModel {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image_url: String,
    pub source_url: Option<String>,
    pub raw_ingredient_lines: Vec<String>,
    /// Parsed ingredients scaled to the current servings
    pub ingredients: Vec<ParsedIngredient>,
    pub servings: u32,
    pub cook_time_minutes: u32,
    /// Ingredients as parsed, at `base_servings`
    #[serde(skip)]
    base_ingredients: Vec<ParsedIngredient>,
    #[serde(skip)]
    base_servings: u32,
    #[serde(skip)]
    stated_cook_time: Option<u32>,
    #[serde(skip)]
    default_servings: u32,
}

impl RecipeModel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            author: String::new(),
            image_url: String::new(),
            source_url: None,
            raw_ingredient_lines: Vec::new(),
            ingredients: Vec::new(),
            servings: DEFAULT_SERVINGS,
            cook_time_minutes: 0,
            base_ingredients: Vec::new(),
            base_servings: DEFAULT_SERVINGS,
            stated_cook_time: None,
            default_servings: DEFAULT_SERVINGS,
        }
    }

    /// Servings to assume when the fetched recipe states none
    pub fn with_default_servings(mut self, servings: u32) -> Self {
        self.default_servings = servings.max(1);
        self.servings = self.default_servings;
        self.base_servings = self.default_servings;
        self
    }

    /// Fetch this recipe's data from `source`
    pub async fn load(&mut self, source: &dyn RecipeSource) -> Result<(), FetchError> {
        debug!("Loading recipe {} from {}", self.id, source.source_name());
        let data = source.fetch_recipe_by_id(&self.id).await?;
        self.apply(data);
        Ok(())
    }

    /// Populate fields from fetched data, clearing any parsed ingredients
    pub fn apply(&mut self, data: RecipeData) {
        self.title = data.title;
        self.author = data.author;
        self.image_url = data.image_url;
        self.source_url = data.source_url;
        self.raw_ingredient_lines = data.ingredient_lines;
        self.servings = data.servings.unwrap_or(self.default_servings).max(1);
        self.base_servings = self.servings;
        self.stated_cook_time = data.cook_time_minutes;
        self.cook_time_minutes = data.cook_time_minutes.unwrap_or(0);
        self.ingredients.clear();
        self.base_ingredients.clear();
    }

    /// Parse every raw line, keeping index correspondence with `raw_ingredient_lines`
    pub fn parse_ingredients(&mut self) {
        self.base_ingredients = self
            .raw_ingredient_lines
            .iter()
            .map(|line| ingredient::parse(line))
            .collect();
        self.base_servings = self.servings;
        self.ingredients = self.base_ingredients.clone();
    }

    /// Fill in `cook_time_minutes` from the ingredient count unless the source gave one.
    ///
    /// 15 minutes per started group of three ingredients, kept within 15..=240.
    pub fn estimate_cook_time(&mut self) {
        if let Some(stated) = self.stated_cook_time {
            self.cook_time_minutes = stated;
            return;
        }

        let periods = self.raw_ingredient_lines.len().div_ceil(INGREDIENTS_PER_PERIOD) as u32;
        self.cook_time_minutes = periods
            .saturating_mul(MINUTES_PER_PERIOD)
            .clamp(MIN_COOK_TIME_MINUTES, MAX_COOK_TIME_MINUTES);
    }

    /// Step servings by one and rescale quantities. Decreasing at 1 does nothing.
    pub fn update_servings(&mut self, change: ServingsChange) {
        let new_servings = match change {
            ServingsChange::Increase => self.servings.saturating_add(1),
            ServingsChange::Decrease if self.servings > 1 => self.servings - 1,
            ServingsChange::Decrease => return,
        };
        self.set_servings(new_servings);
    }

    /// Jump to `servings` (at least 1) and rescale quantities.
    ///
    /// Quantities are recomputed from the as-parsed values, so any sequence of
    /// changes ending at the original count restores the original quantities.
    pub fn set_servings(&mut self, servings: u32) {
        let servings = servings.max(1);
        if servings == self.servings {
            return;
        }

        debug!(
            "Rescaling recipe {} from {} to {} servings",
            self.id, self.servings, servings
        );
        self.servings = servings;

        let ratio = servings as f64 / self.base_servings as f64;
        self.ingredients = self
            .base_ingredients
            .iter()
            .map(|base| base.scaled(ratio))
            .collect();
    }
}
