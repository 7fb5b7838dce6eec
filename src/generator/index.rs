use std::sync::LazyLock;

use anyhow::Context;
use log::{info, warn};
use regex::{NoExpand, Regex, RegexBuilder};

use crate::metadata::Frontmatter;

use super::utils::escape;

const POSTS_OPEN_TAG: &str = r#"<section class="posts">"#;

static EMPTY_STATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r#"<div class="empty-state">.*?</div>\s*"#)
        .dot_matches_new_line(true)
        .build()
        .expect("empty-state pattern is valid")
});

static POSTS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{}\s*", regex::escape(POSTS_OPEN_TAG))).expect("posts pattern is valid")
});

/// What happened to the index listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IndexChange {
    /// The post's existing card was replaced where it stood.
    Updated,
    /// A new card was placed at the top of the listing.
    Inserted,
    /// The index has no `<section class="posts">` to insert into.
    NoListing,
}

fn card_pattern(slug: &str) -> anyhow::Result<Regex> {
    let href = regex::escape(&escape(slug));
    RegexBuilder::new(&format!(r#"<a href="blog/{href}\.html" class="post-card">.*?</a>"#))
        .dot_matches_new_line(true)
        .build()
        .with_context(|| format!("while building card pattern for {slug:?}"))
}

/// Upserts `card` into the index listing.
///
/// An existing card for the same slug keeps its position; otherwise the card
/// goes first in the listing. Cards are never reordered by date.
pub(crate) fn update_index(
    index: &str,
    card: &str,
    meta: &Frontmatter,
) -> anyhow::Result<(String, IndexChange)> {
    let content = EMPTY_STATE_PATTERN.replace_all(index, NoExpand(""));

    let existing: Vec<_> = card_pattern(&meta.slug)?
        .find_iter(&content)
        .map(|m| m.range())
        .collect();

    if let Some(first) = existing.first() {
        if existing.len() > 1 {
            warn!(
                "Index has {} cards for {:?}; keeping only the first",
                existing.len(),
                meta.slug
            );
        }
        let mut out = String::with_capacity(content.len() + card.len());
        out.push_str(&content[..first.start]);
        out.push_str(card);
        let mut cursor = first.end;
        for duplicate in &existing[1..] {
            out.push_str(&content[cursor..duplicate.start]);
            cursor = duplicate.end;
        }
        out.push_str(&content[cursor..]);
        info!("  Updated existing post card in index");
        return Ok((out, IndexChange::Updated));
    }

    if let Some(m) = POSTS_PATTERN.find(&content) {
        let mut out = String::with_capacity(content.len() + card.len() + 16);
        out.push_str(&content[..m.start()]);
        out.push_str(POSTS_OPEN_TAG);
        out.push_str("\n      ");
        out.push_str(card);
        out.push_str("\n      ");
        out.push_str(&content[m.end()..]);
        info!("  Added new post card to index");
        return Ok((out, IndexChange::Inserted));
    }

    warn!("Index has no {} listing; card not added", POSTS_OPEN_TAG);
    Ok((content.into_owned(), IndexChange::NoListing))
}
