use crate::article::Article;
use crate::catalog::Catalog;
use std::collections::BTreeSet;

/// Label of the category button that clears the category filter.
pub const ALL_CATEGORIES: &str = "Все";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySelection {
    #[default]
    All,
    Only(String),
}

impl CategorySelection {
    /// Names that select every category instead of one.
    pub fn is_all(category: &str) -> bool {
        category == ALL_CATEGORIES || category.eq_ignore_ascii_case("all")
    }

    /// Any string is accepted; `Все` and `all` select every category.
    pub fn parse(category: &str) -> CategorySelection {
        if CategorySelection::is_all(category) {
            CategorySelection::All
        } else {
            CategorySelection::Only(category.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategorySelection::All => ALL_CATEGORIES,
            CategorySelection::Only(category) => category.as_str(),
        }
    }

    pub fn matches(&self, article: &Article) -> bool {
        match self {
            CategorySelection::All => true,
            CategorySelection::Only(category) => article.category == *category,
        }
    }
}

/// Session-scoped filter state. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    category: CategorySelection,
    tags: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Selection {
        Selection::default()
    }

    pub fn set_category(&mut self, category: &str) {
        self.category = CategorySelection::parse(category);
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.tags.remove(tag) {
            self.tags.insert(tag.to_string());
        }
    }

    pub fn category(&self) -> &CategorySelection {
        &self.category
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn is_tag_selected(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn reset(&mut self) {
        *self = Selection::default();
    }

    fn tag_match(&self, article: &Article) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|t| article.has_tag(t))
    }

    pub fn matches(&self, article: &Article) -> bool {
        self.category.matches(article) && self.tag_match(article)
    }

    /// Articles passing both filters, in their original order.
    pub fn visible<'a>(
        &'a self,
        articles: &'a [Article],
    ) -> impl Iterator<Item = &'a Article> + 'a {
        articles.iter().filter(move |a| self.matches(a))
    }
}

/// A catalog paired with the selection a session is browsing it with.
#[derive(Debug, Clone)]
pub struct ArticleFilterEngine<'c> {
    catalog: &'c Catalog,
    selection: Selection,
}

impl<'c> ArticleFilterEngine<'c> {
    pub fn new(catalog: &'c Catalog) -> ArticleFilterEngine<'c> {
        ArticleFilterEngine {
            catalog,
            selection: Selection::new(),
        }
    }

    pub fn with_selection(catalog: &'c Catalog, selection: Selection) -> ArticleFilterEngine<'c> {
        ArticleFilterEngine { catalog, selection }
    }

    pub fn set_category(&mut self, category: &str) {
        self.selection.set_category(category);
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        self.selection.toggle_tag(tag);
    }

    pub fn reset(&mut self) {
        self.selection.reset();
    }

    pub fn visible_articles(&self) -> impl Iterator<Item = &'c Article> + '_ {
        let articles: &'c [Article] = self.catalog.articles();
        articles.iter().filter(move |a| self.selection.matches(a))
    }

    pub fn available_tags(&self) -> Vec<&'c str> {
        self.catalog.tags()
    }

    pub fn categories(&self) -> &'c [String] {
        self.catalog.categories()
    }

    pub fn is_tag_selected(&self, tag: &str) -> bool {
        self.selection.is_tag_selected(tag)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }
}
