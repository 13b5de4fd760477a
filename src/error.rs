use thiserror::Error;

/// Errors that can occur while talking to the recipe API
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport or decoding failure from the HTTP client
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error status or an error payload
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A search returned no recipes
    #[error("No recipes found for '{0}'")]
    NoResults(String),

    /// The API has no recipe with the requested id
    #[error("Recipe '{0}' not found")]
    RecipeNotFound(String),

    /// The response body did not have the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Errors raised by durable favorites storage
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be (de)serialized
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The storage backend cannot be used right now
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error returned by planner operations
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Failed to fetch recipe data
    #[error("Failed to fetch: {0}")]
    FetchError(#[from] FetchError),

    /// Failed to read or persist favorites
    #[error("Storage failure: {0}")]
    StorageError(#[from] StorageError),

    /// An operation referenced something that does not exist
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
