use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use creative_space::config::{load_settings, Settings, DEFAULT_CONFIG_FILE};
use creative_space::render::{Renderer, NO_RESULTS_HINT, NO_RESULTS_TITLE};
use creative_space::site::Site;
use creative_space::{ArticleFilterEngine, Catalog, ALL_CATEGORIES};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Static article browser with category and tag filters")]
struct Cli {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Article catalog (JSON); the built-in one is used when absent.
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct FilterArgs {
    #[arg(long, default_value = ALL_CATEGORIES)]
    category: String,
    /// Repeat to select several tags; an article matches if it has any of them.
    #[arg(long = "tag")]
    tags: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render index.html and index.json for a selection.
    Build {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the articles visible under a selection.
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Print every tag in first-occurrence order.
    Tags,
    /// Print the category list, starting with the "all" option.
    Categories,
}

fn open_catalog(cli: &Cli, settings: &Settings) -> Result<Catalog> {
    match cli.catalog.as_ref().or(settings.catalog.as_ref()) {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("failed to load catalog '{}'", path.display())),
        None => Ok(Catalog::embedded()?),
    }
}

fn apply_filter(engine: &mut ArticleFilterEngine, filter: &FilterArgs) {
    engine.set_category(&filter.category);
    for tag in filter.tags.iter() {
        engine.toggle_tag(tag);
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(&cli.config)
        .with_context(|| format!("failed to read settings from '{}'", cli.config.display()))?;
    let catalog = open_catalog(&cli, &settings)?;
    let mut engine = ArticleFilterEngine::new(&catalog);

    match &cli.command {
        Command::Build { filter, out } => {
            apply_filter(&mut engine, filter);
            let dest = out.clone().unwrap_or_else(|| settings.output_dir.clone());
            let site = Site::new(dest)?;
            let renderer = Renderer::new(settings.title.as_str(), settings.subtitle.as_str())?;
            let generated_at = Utc::now().with_timezone(&settings.utc_offset()?);
            let page = site
                .build(&engine, &renderer, generated_at)
                .with_context(|| format!("failed to write site into '{}'", site.dest().display()))?;
            println!("{}", page.display());
        }
        Command::List { filter } => {
            apply_filter(&mut engine, filter);
            let mut shown = 0;
            for article in engine.visible_articles() {
                println!(
                    "{:>3}  [{}] {} ({}, {}) #{}",
                    article.id,
                    article.category,
                    article.title,
                    article.date,
                    article.read_time,
                    article.tags.join(" #")
                );
                shown += 1;
            }
            if shown == 0 {
                println!("{NO_RESULTS_TITLE}. {NO_RESULTS_HINT}");
            }
        }
        Command::Tags => {
            for tag in engine.available_tags() {
                println!("{tag}");
            }
        }
        Command::Categories => {
            println!("{ALL_CATEGORIES}");
            for category in engine.categories() {
                println!("{category}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn every_subcommand_has_help_text() {
        let cli = Cli::command();
        cli.clone().debug_assert();
        for name in ["build", "list", "tags", "categories"] {
            let about = cli
                .find_subcommand(name)
                .and_then(|c| c.get_about())
                .map(|a| a.to_string());
            assert!(about.is_some_and(|a| !a.is_empty()), "{name} has no help");
        }
    }

    #[test]
    fn repeated_tags_parse_into_the_filter() {
        let cli = Cli::try_parse_from(["creative-space", "list", "--tag", "опыт", "--tag", "цвет"])
            .expect("parse");
        match cli.command {
            Command::List { filter } => {
                assert_eq!(filter.category, ALL_CATEGORIES);
                assert_eq!(filter.tags, vec!["опыт", "цвет"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
