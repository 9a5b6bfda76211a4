pub mod article;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod render;
pub mod site;

pub use article::Article;
pub use catalog::Catalog;
pub use error::{CatalogError, SiteError, SiteResult};
pub use filter::{ArticleFilterEngine, CategorySelection, Selection, ALL_CATEGORIES};
