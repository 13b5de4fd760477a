use crate::error::FetchError;
use crate::source::{RecipeSource, RecipeSummary};
use log::{debug, info};

/// Title length used by result lists
pub const DEFAULT_TITLE_LIMIT: usize = 17;

/// A query and its results, in the order the source returned them
#[derive(Debug, Clone)]
pub struct SearchModel {
    query: String,
    results: Vec<RecipeSummary>,
}

impl SearchModel {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            results: Vec::new(),
        }
    }

    /// Run the query against `source`.
    ///
    /// An empty result is reported as [`FetchError::NoResults`] so callers
    /// can tell the user nothing matched.
    pub async fn search(&mut self, source: &dyn RecipeSource) -> Result<(), FetchError> {
        debug!("Searching {} for '{}'", source.source_name(), self.query);
        let results = source.fetch_recipe_list(&self.query).await?;
        if results.is_empty() {
            return Err(FetchError::NoResults(self.query.clone()));
        }

        info!("Found {} recipes for '{}'", results.len(), self.query);
        self.results = results;
        Ok(())
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[RecipeSummary] {
        &self.results
    }
}

/// Shorten `title` to whole words whose letters fit in `limit`, appending `" ..."`.
///
/// Titles already within `limit` characters are returned unchanged.
pub fn limit_title(title: &str, limit: usize) -> String {
    if title.chars().count() <= limit {
        return title.to_string();
    }

    let mut used = 0;
    let kept: Vec<&str> = title
        .split_whitespace()
        .take_while(|word| {
            used += word.chars().count();
            used <= limit
        })
        .collect();

    format!("{} ...", kept.join(" "))
}
