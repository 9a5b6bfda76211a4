use crate::article::Article;
use crate::error::{CatalogError, SiteError, SiteResult};
use crate::filter::CategorySelection;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

const EMBEDDED_CATALOG: &str = include_str!("../assets/catalog.json");

#[derive(Debug, Deserialize)]
struct RawCatalog {
    categories: Vec<String>,
    articles: Vec<Article>,
}

/// The fixed article table and the closed category list it draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<String>,
    articles: Vec<Article>,
}

impl Catalog {
    pub fn new(categories: Vec<String>, articles: Vec<Article>) -> Result<Catalog, CatalogError> {
        let mut seen_categories = HashSet::new();
        for category in categories.iter() {
            if CategorySelection::is_all(category) {
                return Err(CatalogError::ReservedCategory(category.clone()));
            }
            if !seen_categories.insert(category.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.clone()));
            }
        }

        let mut seen_ids = HashSet::new();
        for article in articles.iter() {
            if !seen_ids.insert(article.id) {
                return Err(CatalogError::DuplicateId(article.id));
            }
            if !seen_categories.contains(article.category.as_str()) {
                return Err(CatalogError::UnknownCategory {
                    id: article.id,
                    category: article.category.clone(),
                });
            }
        }

        Ok(Catalog {
            categories,
            articles,
        })
    }

    /// The catalog compiled into the binary.
    pub fn embedded() -> SiteResult<Catalog> {
        Catalog::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_json(raw: &str) -> SiteResult<Catalog> {
        let raw: RawCatalog = serde_json::from_str(raw)?;
        Ok(Catalog::new(raw.categories, raw.articles)?)
    }

    pub fn load(path: &Path) -> SiteResult<Catalog> {
        let raw = std::fs::read_to_string(path).map_err(|e| SiteError::io(path, e))?;
        let catalog = Catalog::from_json(&raw)?;
        debug!(
            path = %path.display(),
            articles = catalog.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn get(&self, id: u32) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Distinct tags in first-occurrence order.
    pub fn tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.articles
            .iter()
            .flat_map(|a| a.tags.iter())
            .filter(|t| seen.insert(t.as_str()))
            .map(|t| t.as_str())
            .collect()
    }
}
