use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{de, Deserialize, Deserializer};
use serde_yaml::Value;

use crate::error::PostError;

// pandoc-style metadata block: `---`, YAML, `---`, then the markdown body
static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"\A---\s*\n(.*?)\n---\s*\n(.*)\z")
        .dot_matches_new_line(true)
        .build()
        .expect("frontmatter pattern is valid")
});

/// Frontmatter keys exactly as written by the author. Nothing is defaulted here.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub(crate) struct RawFrontmatter {
    pub title: Option<String>,
    pub date: Option<serde_yaml::Value>,
    /// A single tag or a list of tags; scalar tags such as `2024` become text.
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Option<Vec<String>>,
    pub excerpt: Option<String>,
    pub slug: Option<String>,
    pub hero: Option<String>,
}

fn scalar_tag(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let invalid =
        || <D::Error as de::Error>::custom("invalid `tags`: expected a string or a list of strings");
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| scalar_tag(item).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        other => scalar_tag(other).map(|tag| Some(vec![tag])).ok_or_else(invalid),
    }
}

/// Splits `content` into its frontmatter and the markdown body that follows it.
pub(crate) fn parse_frontmatter(content: &str) -> Result<(RawFrontmatter, &str), PostError> {
    let caps = HEADER_PATTERN
        .captures(content)
        .ok_or(PostError::MissingFrontmatter)?;
    let (Some(header), Some(body)) = (caps.get(1), caps.get(2)) else {
        return Err(PostError::MissingFrontmatter);
    };

    let frontmatter = serde_yaml::from_str(header.as_str())?;
    Ok((frontmatter, body.as_str()))
}
