use crate::error::{SiteError, SiteResult};
use chrono::FixedOffset;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_CONFIG_FILE: &str = "creative-space.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub title: String,
    pub subtitle: String,
    pub output_dir: PathBuf,
    pub catalog: Option<PathBuf>,
    pub utc_offset_seconds: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Креативное пространство".into(),
            subtitle: "Исследуем границы творчества, дизайна и визуальной культуры".into(),
            output_dir: PathBuf::from("public"),
            catalog: None,
            utc_offset_seconds: 3 * 3600,
        }
    }
}

impl Settings {
    pub fn from_toml(raw: &str) -> SiteResult<Settings> {
        Ok(toml::from_str(raw)?)
    }

    pub fn utc_offset(&self) -> SiteResult<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_seconds)
            .ok_or(SiteError::UtcOffset(self.utc_offset_seconds))
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("CREATIVE_SPACE_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("CREATIVE_SPACE_CATALOG") {
            self.catalog = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("CREATIVE_SPACE_UTC_OFFSET") {
            match v.parse::<i32>() {
                Ok(parsed) => self.utc_offset_seconds = parsed,
                Err(_) => warn!(value = %v, "ignoring unparseable CREATIVE_SPACE_UTC_OFFSET"),
            }
        }
    }
}

/// Defaults, then the config file if it exists, then environment overrides.
pub fn load_settings(path: &Path) -> SiteResult<Settings> {
    let mut settings = match std::fs::read_to_string(path) {
        Ok(raw) => {
            debug!(path = %path.display(), "read config file");
            Settings::from_toml(&raw)?
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Settings::default(),
        Err(e) => return Err(SiteError::io(path, e)),
    };
    settings.apply_env(|key| std::env::var(key).ok());
    Ok(settings)
}
