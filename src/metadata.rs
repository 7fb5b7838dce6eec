use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::error::PostError;
use crate::frontmatter::{parse_frontmatter, RawFrontmatter};

const DATE_DISPLAY_FORMAT: &str = "%B %d, %Y";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// YAML timestamp: space or `T` separator, optional fraction, optional `Z` or `±H[H][:MM]` offset
static YAML_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<y>\d{4})-(?P<m>\d{1,2})-(?P<d>\d{1,2})",
        r"(?:[Tt]|[ \t]+)(?P<hh>\d{1,2}):(?P<mm>\d{2}):(?P<ss>\d{2})(?:\.\d*)?",
        r"(?:[ \t]*(?:Z|[-+]\d{1,2}(?::?\d{2})?))?$",
    ))
    .expect("timestamp pattern is valid")
});

/// Frontmatter with every default resolved.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Frontmatter {
    pub title: String,
    pub date: NaiveDate,
    pub tags: Vec<String>,
    pub excerpt: String,
    /// Output file name and image folder name. Defaults to the source file stem.
    pub slug: String,
    /// Image file name inside the slug folder.
    pub hero: Option<String>,
}

impl Frontmatter {
    pub fn resolve(raw: RawFrontmatter, file_stem: &str) -> Result<Self, PostError> {
        let title = raw.title.ok_or(PostError::MissingKey("title"))?;
        let date = match raw.date.ok_or(PostError::MissingKey("date"))? {
            serde_yaml::Value::String(s) => parse_iso_date(&s)?,
            other => return Err(PostError::InvalidDate(format!("{other:?}"))),
        };

        Ok(Self {
            title,
            date,
            tags: raw.tags.unwrap_or_default(),
            excerpt: raw.excerpt.unwrap_or_default(),
            slug: raw.slug.unwrap_or_else(|| file_stem.to_string()),
            hero: raw.hero,
        })
    }

    pub fn formatted_date(&self) -> String {
        self.date.format(DATE_DISPLAY_FORMAT).to_string()
    }
}

pub(crate) fn parse_iso_date(value: &str) -> Result<NaiveDate, PostError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|datetime| datetime.date())
        .or_else(|| parse_yaml_timestamp(value))
        .ok_or_else(|| PostError::InvalidDate(format!("{value:?}")))
}

// the calendar date as written; the offset does not shift it
fn parse_yaml_timestamp(value: &str) -> Option<NaiveDate> {
    let caps = YAML_TIMESTAMP.captures(value)?;
    let field = |name: &str| caps[name].parse::<u32>().ok();
    NaiveTime::from_hms_opt(field("hh")?, field("mm")?, field("ss")?)?;
    NaiveDate::from_ymd_opt(caps["y"].parse().ok()?, field("m")?, field("d")?)
}

#[derive(Debug, Clone)]
pub(crate) struct Post {
    pub meta: Frontmatter,
    pub body: String,
    /// Directory holding the source file, searched for the `<slug>` image folder.
    pub source_dir: PathBuf,
}

impl Post {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("while reading {:?}", path))?;
        Self::from_source(path, &content).with_context(|| format!("while parsing {:?}", path))
    }

    pub fn from_source(path: &Path, content: &str) -> Result<Self, PostError> {
        let (raw, body) = parse_frontmatter(content)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            meta: Frontmatter::resolve(raw, &stem)?,
            body: body.to_string(),
            source_dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
        })
    }
}
