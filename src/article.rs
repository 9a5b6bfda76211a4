use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Article {
    pub id: u32,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub tags: Vec<String>,
    pub date: String,
    pub image: String,
    #[serde(rename = "readTime")]
    pub read_time: String,
}

impl Article {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

const MONTHS: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Reads the display-only `date` and `readTime` strings back into values.
#[derive(Debug)]
pub struct DisplayMeta {
    date_regex: Regex,
    read_time_regex: Regex,
}

impl DisplayMeta {
    pub fn new() -> Result<DisplayMeta, regex::Error> {
        let date_regex = Regex::new(r"^\s*(\d{1,2})\s+(\p{Cyrillic}+)\s+(\d{4})\s*$")?;
        let read_time_regex = Regex::new(r"^\s*(\d+)\s*мин")?;

        Ok(DisplayMeta {
            date_regex,
            read_time_regex,
        })
    }

    /// `"15 октября 2024"` -> 2024-10-15.
    pub fn published_on(&self, article: &Article) -> Option<NaiveDate> {
        let caps = self.date_regex.captures(&article.date)?;
        let day: u32 = caps.get(1)?.as_str().parse().ok()?;
        let month_name = caps.get(2)?.as_str().to_lowercase();
        let month = MONTHS.iter().position(|m| *m == month_name)? as u32 + 1;
        let year: i32 = caps.get(3)?.as_str().parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    pub fn read_minutes(&self, article: &Article) -> Option<u32> {
        let caps = self.read_time_regex.captures(&article.read_time)?;
        caps.get(1)?.as_str().parse().ok()
    }
}
