use thiserror::Error;

#[derive(Error, Debug)]
pub enum NearbyError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("No results found for \"{0}\"")]
    NoResults(String),

    #[error("{0}")]
    Api(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] tokio_rusqlite::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl NearbyError {
    /// Transport-level and HTTP-status failures collapse into `RequestFailed`.
    pub fn request_failed(err: impl std::fmt::Display) -> Self {
        Self::RequestFailed(err.to_string())
    }
}
