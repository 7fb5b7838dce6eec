use maud::{html, PreEscaped};

use crate::metadata::Frontmatter;

const HERO_STYLE: &str =
    "width:100%; border-radius:12px; margin-bottom:2rem; border:1px solid var(--border-color);";

pub(super) fn escape(text: &str) -> String {
    html! { (text) }.into_string()
}

/// One `post-tag` span per tag, empty for no tags.
pub(super) fn render_tags(tags: &[String]) -> String {
    html! {
        @for tag in tags {
            span.post-tag { (tag) }
        }
    }
    .into_string()
}

pub(super) fn render_hero(meta: &Frontmatter) -> Option<String> {
    let hero = meta.hero.as_deref()?;
    Some(
        html! {
            img src={ (meta.slug) "/" (hero) } alt=(meta.title) class="hero-image" style=(HERO_STYLE);
        }
        .into_string(),
    )
}

pub(super) fn render_article(meta: &Frontmatter, body_html: &str) -> String {
    let hero = render_hero(meta)
        .map(|img| format!("{img}\n      "))
        .unwrap_or_default();
    html! {
        article {
            "\n      " (PreEscaped(hero)) (PreEscaped(body_html)) "\n    "
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::frontmatter;

    #[test]
    fn tags_markup() {
        assert_eq!(
            render_tags(&["A".to_string(), "B & C".to_string()]),
            "<span class=\"post-tag\">A</span><span class=\"post-tag\">B &amp; C</span>"
        );
        assert_eq!(render_tags(&[]), "");
    }

    #[test]
    fn hero_markup() {
        let mut meta = frontmatter();
        assert_eq!(render_hero(&meta), None);

        meta.hero = Some("pic.png".to_string());
        let img = render_hero(&meta).unwrap();
        assert!(img.starts_with("<img src=\"hello/pic.png\" alt=\"Hello\" class=\"hero-image\""));
    }

    #[test]
    fn article_wraps_body() {
        let meta = frontmatter();
        assert_eq!(
            render_article(&meta, "<h1>Hi</h1>\n"),
            "<article>\n      <h1>Hi</h1>\n\n    </article>"
        );
    }
}
