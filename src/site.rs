use crate::article::DisplayMeta;
use crate::error::{SiteError, SiteResult};
use crate::filter::ArticleFilterEngine;
use crate::render::Renderer;
use chrono::{DateTime, FixedOffset};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the rendered page and its JSON index into `dest`.
#[derive(Debug)]
pub struct Site {
    dest: PathBuf,
    meta: DisplayMeta,
}

impl Site {
    pub fn new(dest: PathBuf) -> SiteResult<Site> {
        Ok(Site {
            dest,
            meta: DisplayMeta::new()?,
        })
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }

    pub fn index(
        &self,
        engine: &ArticleFilterEngine,
        generated_at: DateTime<FixedOffset>,
    ) -> Value {
        let articles: Vec<Value> = engine
            .visible_articles()
            .map(|article| {
                json! {
                    {
                        "id": article.id,
                        "title": article.title,
                        "category": article.category,
                        "tags": article.tags,
                        "date": article.date,
                        "published": self.meta.published_on(article).map(|d| d.to_string()),
                        "read_minutes": self.meta.read_minutes(article),
                        "image": article.image
                    }
                }
            })
            .collect();

        json! {
            {
                "category": engine.selection().category().label(),
                "tags": engine.selection().tags(),
                "generated_at": generated_at.to_rfc3339(),
                "available_tags": engine.available_tags(),
                "articles": articles
            }
        }
    }

    pub fn build(
        &self,
        engine: &ArticleFilterEngine,
        renderer: &Renderer,
        generated_at: DateTime<FixedOffset>,
    ) -> SiteResult<PathBuf> {
        std::fs::create_dir_all(&self.dest).map_err(|e| SiteError::io(&self.dest, e))?;

        let index = self.index(engine, generated_at);
        let visible = engine.visible_articles().count();
        let html = renderer.render_page(engine);

        let html_path = self.dest.join("index.html");
        let json_path = self.dest.join("index.json");
        info!(
            category = engine.selection().category().label(),
            tags = engine.selection().tags().len(),
            visible,
            dest = %self.dest.display(),
            "writing page"
        );

        std::fs::write(&html_path, html.into_bytes()).map_err(|e| SiteError::io(&html_path, e))?;
        std::fs::write(&json_path, serde_json::to_string(&index)?)
            .map_err(|e| SiteError::io(&json_path, e))?;

        Ok(html_path)
    }
}
