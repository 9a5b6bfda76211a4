use crate::article::Article;
use crate::error::SiteResult;
use crate::filter::{ArticleFilterEngine, ALL_CATEGORIES};
use comrak::ComrakOptions;
use regex::{Captures, Regex};
use std::collections::HashMap;

const INDEX_TEMPLATE: &str = include_str!("../assets/template_index.html");
const CARD_TEMPLATE: &str = include_str!("../assets/template_card.html");

pub const NO_RESULTS_TITLE: &str = "Ничего не найдено";
pub const NO_RESULTS_HINT: &str = "Попробуйте изменить фильтры";

/// Renders the browsing page for the current state of an engine.
#[derive(Debug)]
pub struct Renderer {
    title: String,
    subtitle: String,
    option: ComrakOptions,
    placeholder_regex: Regex,
    index_template: String,
    card_template: String,
}

impl Renderer {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> SiteResult<Renderer> {
        let mut option = ComrakOptions::default();
        option.extension.strikethrough = true;
        option.extension.footnotes = true;
        option.extension.autolink = true;
        option.extension.table = true;
        option.extension.description_lists = true;
        let placeholder_regex = Regex::new(r"\{\{ (\w+) \}\}")?;

        Ok(Renderer {
            title: title.into(),
            subtitle: subtitle.into(),
            option,
            placeholder_regex,
            index_template: INDEX_TEMPLATE.to_string(),
            card_template: CARD_TEMPLATE.to_string(),
        })
    }

    /// Substitutes every placeholder in one pass, so substituted text is never rescanned.
    fn fill(&self, template: &str, values: &HashMap<&str, String>) -> String {
        self.placeholder_regex
            .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    pub fn render_page(&self, engine: &ArticleFilterEngine) -> String {
        let visible: Vec<&Article> = engine.visible_articles().collect();
        let content = if visible.is_empty() {
            self.render_no_results()
        } else {
            self.render_grid(&visible)
        };

        let values = HashMap::from([
            ("title", escape(&self.title)),
            ("subtitle", escape(&self.subtitle)),
            ("categories", self.render_categories(engine)),
            ("tags", self.render_tags(engine)),
            ("content", content),
        ]);
        self.fill(&self.index_template, &values)
    }

    fn render_categories(&self, engine: &ArticleFilterEngine) -> String {
        let active = engine.selection().category().label();
        std::iter::once(ALL_CATEGORIES)
            .chain(engine.categories().iter().map(|c| c.as_str()))
            .map(|category| {
                let class = if category == active {
                    "category active"
                } else {
                    "category"
                };
                format!(
                    "        <button class=\"{class}\" data-category=\"{0}\">{0}</button>",
                    escape(category)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_tags(&self, engine: &ArticleFilterEngine) -> String {
        engine
            .available_tags()
            .into_iter()
            .map(|tag| {
                let class = if engine.is_tag_selected(tag) {
                    "badge tag selected"
                } else {
                    "badge tag"
                };
                format!(
                    "        <span class=\"{class}\" data-tag=\"{0}\">{0}</span>",
                    escape(tag)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_grid(&self, visible: &[&Article]) -> String {
        let cards: Vec<String> = visible.iter().map(|a| self.render_card(a)).collect();
        format!("    <main class=\"grid\">\n{}    </main>", cards.concat())
    }

    pub fn render_card(&self, article: &Article) -> String {
        let tags: Vec<String> = article
            .tags
            .iter()
            .map(|t| format!("<span class=\"badge\">{}</span>", escape(t)))
            .collect();
        let excerpt = comrak::markdown_to_html(&article.excerpt, &self.option);

        let values = HashMap::from([
            ("id", article.id.to_string()),
            ("image", escape(&article.image)),
            ("title", escape(&article.title)),
            ("category", escape(&article.category)),
            ("date", escape(&article.date)),
            ("read_time", escape(&article.read_time)),
            ("tags", tags.concat()),
            ("excerpt", excerpt.trim_end().to_string()),
        ]);
        self.fill(&self.card_template, &values)
    }

    fn render_no_results(&self) -> String {
        format!(
            "    <section class=\"no-results\">\n      <h3>{NO_RESULTS_TITLE}</h3>\n      <p>{NO_RESULTS_HINT}</p>\n    </section>"
        )
    }
}

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn renderer() -> Renderer {
        Renderer::new("Креативное пространство", "Исследуем границы").expect("renderer")
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape("<a href=\"x\">Tom & 'Jerry'</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape("UX/UI"), "UX/UI");
    }

    #[test]
    fn default_page_has_every_card_and_category() {
        let catalog = Catalog::embedded().expect("catalog");
        let engine = ArticleFilterEngine::new(&catalog);
        let html = renderer().render_page(&engine);

        assert_eq!(html.matches("<article class=\"card\"").count(), 6);
        assert!(html.contains("<button class=\"category active\" data-category=\"Все\">Все</button>"));
        assert!(html.contains("data-category=\"Искусство\""));
        assert!(html.contains("<h1>Креативное пространство</h1>"));
        assert!(!html.contains(NO_RESULTS_TITLE));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn active_category_and_selected_tags_are_marked() {
        let catalog = Catalog::embedded().expect("catalog");
        let mut engine = ArticleFilterEngine::new(&catalog);
        engine.set_category("UX/UI");
        engine.toggle_tag("опыт");
        let html = renderer().render_page(&engine);

        assert!(html.contains("<button class=\"category active\" data-category=\"UX/UI\">"));
        assert!(html.contains("<button class=\"category\" data-category=\"Все\">"));
        assert!(html.contains("<span class=\"badge tag selected\" data-tag=\"опыт\">"));
        assert!(html.contains("<span class=\"badge tag\" data-tag=\"цвет\">"));
        assert_eq!(html.matches("<article class=\"card\"").count(), 1);
    }

    #[test]
    fn empty_selection_renders_no_results_instead_of_grid() {
        let catalog = Catalog::embedded().expect("catalog");
        let mut engine = ArticleFilterEngine::new(&catalog);
        engine.set_category("Искусство");
        engine.toggle_tag("психология");
        let html = renderer().render_page(&engine);

        assert!(html.contains(NO_RESULTS_TITLE));
        assert!(html.contains(NO_RESULTS_HINT));
        assert!(!html.contains("class=\"grid\""));
    }

    #[test]
    fn card_renders_excerpt_markdown_and_escapes_fields() {
        let article = Article {
            id: 9,
            title: "<b>Заголовок</b>".to_string(),
            excerpt: "Текст со **смыслом**".to_string(),
            category: "Дизайн".to_string(),
            tags: vec!["a&b".to_string()],
            date: "1 мая 2024".to_string(),
            image: "https://example.com/i.png?a=1&b=2".to_string(),
            read_time: "4 мин".to_string(),
        };
        let card = renderer().render_card(&article);

        assert!(card.contains("data-id=\"9\""));
        assert!(card.contains("<h3>&lt;b&gt;Заголовок&lt;/b&gt;</h3>"));
        assert!(card.contains("<strong>смыслом</strong>"));
        assert!(card.contains("<span class=\"badge\">a&amp;b</span>"));
        assert!(card.contains("src=\"https://example.com/i.png?a=1&amp;b=2\""));
        assert!(card.contains("Читать статью"));
    }
    #[test]
    fn placeholder_text_in_a_title_is_not_substituted() {
        let article = Article {
            id: 3,
            title: "Шаблон {{ date }}".to_string(),
            excerpt: "Текст".to_string(),
            category: "Дизайн".to_string(),
            tags: vec!["{{ title }}".to_string()],
            date: "1 мая 2024".to_string(),
            image: "https://example.com/i.png".to_string(),
            read_time: "4 мин".to_string(),
        };
        let card = renderer().render_card(&article);

        assert!(card.contains("<h3>Шаблон {{ date }}</h3>"));
        assert!(card.contains("alt=\"Шаблон {{ date }}\""));
        assert!(card.contains("<span class=\"badge\">{{ title }}</span>"));
        assert_eq!(card.matches("1 мая 2024").count(), 1);
    }

    #[test]
    fn placeholder_text_in_the_subtitle_is_not_substituted() {
        let catalog = Catalog::embedded().expect("catalog");
        let engine = ArticleFilterEngine::new(&catalog);
        let html = Renderer::new("Блог", "{{ tags }}")
            .expect("renderer")
            .render_page(&engine);

        assert!(html.contains("<p class=\"subtitle\">{{ tags }}</p>"));
        assert_eq!(html.matches("data-tag=\"опыт\"").count(), 1);
    }
}
