use maud::{html, PreEscaped};

use crate::metadata::Frontmatter;

use super::utils::render_tags;

/// Summary card linking to the post from the blog index.
pub(crate) fn render_card(meta: &Frontmatter) -> String {
    html! {
        a href={ "blog/" (meta.slug) ".html" } class="post-card" {
            h2 { (meta.title) }
            div.post-meta {
                span { (meta.formatted_date()) }
                (PreEscaped(render_tags(&meta.tags)))
            }
            p.post-excerpt { (meta.excerpt) }
        }
    }
    .into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::frontmatter;

    #[test]
    fn card_markup() {
        let mut meta = frontmatter();
        meta.excerpt = "A first post.".to_string();
        assert_eq!(
            render_card(&meta),
            concat!(
                "<a href=\"blog/hello.html\" class=\"post-card\">",
                "<h2>Hello</h2>",
                "<div class=\"post-meta\"><span>January 05, 2025</span>",
                "<span class=\"post-tag\">A</span><span class=\"post-tag\">B</span></div>",
                "<p class=\"post-excerpt\">A first post.</p>",
                "</a>",
            )
        );
    }

    #[test]
    fn empty_excerpt_and_no_tags() {
        let mut meta = frontmatter();
        meta.tags.clear();
        let card = render_card(&meta);
        assert!(card.contains("<div class=\"post-meta\"><span>January 05, 2025</span></div>"));
        assert!(card.contains("<p class=\"post-excerpt\"></p>"));
    }

    #[test]
    fn title_is_escaped() {
        let mut meta = frontmatter();
        meta.title = "Rust & <HTML>".to_string();
        assert!(render_card(&meta).contains("<h2>Rust &amp; &lt;HTML&gt;</h2>"));
    }
}
