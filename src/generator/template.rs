use std::ops::Range;
use std::sync::LazyLock;

use log::{debug, warn};
use regex::{Regex, RegexBuilder};

/// Sample tag shipped in the page template.
pub(crate) const TAG_MARKER: &str = r#"<span class="post-tag">AI Workflows</span>"#;

static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<title>(?P<head>POST TITLE(?: HERE)?)|(?P<bare>POST TITLE HERE)")
        .expect("title pattern is valid")
});

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"<span>(?P<date>",
        r"(?:January|February|March|April|May|June|July|August|September|October|November|December)",
        r" \d{1,2}, \d{4})</span>",
    ))
    .expect("date pattern is valid")
});

static ARTICLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"<article>.*?</article>")
        .dot_matches_new_line(true)
        .build()
        .expect("article pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    /// Placeholder title text, in the document `<title>` and the page heading.
    Title,
    /// Text of the sample date `<span>`.
    Date,
    /// The sample tag `<span>`.
    Tags,
    /// The whole `<article>...</article>` block.
    Article,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Slot(Slot),
}

/// A page template split into literal text and named slots.
///
/// Markers are located once, when the template is parsed. The sample article
/// is replaced as a whole, so markers inside it never become slots, and date
/// and tag markers after the first are left as literal text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Self {
        let mut slots: Vec<(Range<usize>, Slot)> = Vec::new();

        let mut articles = ARTICLE_PATTERN.find_iter(source).map(|m| m.range());
        let article = articles.next();
        if articles.next().is_some() {
            warn!("Template has more than one <article> block; only the first is replaced");
        }
        let outside_article = |range: &Range<usize>| {
            article
                .as_ref()
                .map_or(true, |a| range.end <= a.start || range.start >= a.end)
        };
        if let Some(range) = article.clone() {
            slots.push((range, Slot::Article));
        }

        slots.extend(
            TITLE_PATTERN
                .captures_iter(source)
                .filter_map(|caps| caps.name("head").or_else(|| caps.name("bare")))
                .map(|m| m.range())
                .filter(|r| outside_article(r))
                .map(|r| (r, Slot::Title)),
        );

        let dates: Vec<Range<usize>> = DATE_PATTERN
            .captures_iter(source)
            .filter_map(|caps| caps.name("date"))
            .map(|m| m.range())
            .filter(|r| outside_article(r))
            .collect();
        push_first(&mut slots, dates, Slot::Date);

        let tags: Vec<Range<usize>> = source
            .match_indices(TAG_MARKER)
            .map(|(start, marker)| start..start + marker.len())
            .filter(|r| outside_article(r))
            .collect();
        push_first(&mut slots, tags, Slot::Tags);

        slots.sort_by_key(|(range, _)| range.start);
        debug!("Template slots: {:?}", slots);

        let mut segments = Vec::new();
        let mut cursor = 0;
        for (range, slot) in slots {
            if range.start < cursor {
                continue;
            }
            if range.start > cursor {
                segments.push(Segment::Text(source[cursor..range.start].to_string()));
            }
            segments.push(Segment::Slot(slot));
            cursor = range.end;
        }
        if cursor < source.len() {
            segments.push(Segment::Text(source[cursor..].to_string()));
        }

        Self { segments }
    }

    pub fn has_slot(&self, slot: Slot) -> bool {
        self.segments.contains(&Segment::Slot(slot))
    }

    /// Concatenates the literal text with `fill`'s content for every slot.
    pub fn render(&self, mut fill: impl FnMut(Slot) -> String) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(slot) => out.push_str(&fill(*slot)),
            }
        }
        out
    }
}

fn push_first(slots: &mut Vec<(Range<usize>, Slot)>, found: Vec<Range<usize>>, slot: Slot) {
    if found.len() > 1 {
        warn!(
            "Template has {} {:?} markers; only the first is replaced",
            found.len(),
            slot
        );
    }
    if let Some(range) = found.into_iter().next() {
        slots.push((range, slot));
    }
}
