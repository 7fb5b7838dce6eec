use std::collections::HashSet;
use std::sync::LazyLock;

use maud::{html, Markup};
use pulldown_cmark::html::push_html;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream};
use regex::Regex;

/// A paragraph holding only this text is replaced by the table of contents.
const TOC_MARKER: &str = "[TOC]";

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("slug pattern is valid"));
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-\s]+").expect("slug pattern is valid"));

struct Heading {
    level: usize,
    id: String,
    title: String,
}

struct TocEntry {
    id: String,
    title: String,
    children: Vec<TocEntry>,
}

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);
    options
}

/// Renders a post body to an HTML fragment.
pub(crate) fn markdown_to_html(markdown: &str) -> String {
    let mut events: Vec<Event> = TextMergeStream::new(Parser::new_ext(markdown, options())).collect();

    let markers = toc_markers(&events);
    if !markers.is_empty() {
        let headings = anchor_headings(&mut events);
        let toc = render_toc(&nest(&headings)).into_string();
        for start in markers.into_iter().rev() {
            events.splice(start..start + 3, [Event::Html(CowStr::from(toc.clone()))]);
        }
    }

    let mut body_html = String::new();
    push_html(&mut body_html, events.into_iter());
    body_html
}

fn toc_markers(events: &[Event]) -> Vec<usize> {
    events
        .windows(3)
        .enumerate()
        .filter_map(|(i, window)| match window {
            [Event::Start(Tag::Paragraph), Event::Text(text), Event::End(TagEnd::Paragraph)]
                if text.trim() == TOC_MARKER =>
            {
                Some(i)
            }
            _ => None,
        })
        .collect()
}

// gives every heading an id and returns them in document order
fn anchor_headings(events: &mut [Event]) -> Vec<Heading> {
    let mut used = HashSet::new();
    let mut headings = Vec::new();

    for i in 0..events.len() {
        if !matches!(events[i], Event::Start(Tag::Heading { .. })) {
            continue;
        }
        let title: String = events[i + 1..]
            .iter()
            .take_while(|e| !matches!(e, Event::End(TagEnd::Heading(_))))
            .filter_map(|e| match e {
                Event::Text(t) | Event::Code(t) => Some(&**t),
                _ => None,
            })
            .collect();

        if let Event::Start(Tag::Heading { level, id, .. }) = &mut events[i] {
            let anchor = unique_slug(&title, &mut used);
            *id = Some(CowStr::from(anchor.clone()));
            headings.push(Heading {
                level: *level as usize,
                id: anchor,
                title,
            });
        }
    }

    headings
}

fn slugify(text: &str) -> String {
    let stripped = NON_WORD.replace_all(text, "");
    let lowered = stripped.trim().to_lowercase();
    SEPARATORS.replace_all(&lowered, "-").into_owned()
}

fn unique_slug(text: &str, used: &mut HashSet<String>) -> String {
    let base = match slugify(text) {
        s if s.is_empty() => "_".to_string(),
        s => s,
    };
    let mut candidate = base.clone();
    let mut n = 1;
    while used.contains(&candidate) {
        candidate = format!("{base}_{n}");
        n += 1;
    }
    used.insert(candidate.clone());
    candidate
}

fn nest(headings: &[Heading]) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    let mut i = 0;
    while i < headings.len() {
        let head = &headings[i];
        let end = headings[i + 1..]
            .iter()
            .position(|h| h.level <= head.level)
            .map_or(headings.len(), |p| i + 1 + p);
        entries.push(TocEntry {
            id: head.id.clone(),
            title: head.title.clone(),
            children: nest(&headings[i + 1..end]),
        });
        i = end;
    }
    entries
}

fn render_entries(entries: &[TocEntry]) -> Markup {
    html! {
        ul {
            @for entry in entries {
                li {
                    a href={ "#" (entry.id) } { (entry.title) }
                    @if !entry.children.is_empty() {
                        (render_entries(&entry.children))
                    }
                }
            }
        }
    }
}

fn render_toc(entries: &[TocEntry]) -> Markup {
    html! {
        div.toc {
            (render_entries(entries))
        }
    }
}
