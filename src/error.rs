use std::path::PathBuf;
use thiserror::Error;

pub type SiteResult<T> = Result<T, SiteError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("article id {0} appears more than once")]
    DuplicateId(u32),
    #[error("article {id} has category '{category}' outside the known category list")]
    UnknownCategory { id: u32, category: String },
    #[error("category '{0}' collides with the name of the all-categories option")]
    ReservedCategory(String),
    #[error("category '{0}' is listed more than once")]
    DuplicateCategory(String),
}

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid pattern: {0}")]
    Regex(#[from] regex::Error),
    #[error("utc offset {0}s is out of range")]
    UtcOffset(i32),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl SiteError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SiteError::Io {
            path: path.into(),
            source,
        }
    }
}
