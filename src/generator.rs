mod card;
mod index;
mod template;
mod utils;

pub(crate) use card::render_card;
pub(crate) use index::{update_index, IndexChange};
pub(crate) use template::{Slot, Template};

use crate::metadata::Frontmatter;

/// Fills the template's slots for one post.
///
/// Slots missing from the template are skipped. Afterwards every `./<slug>/`
/// path prefix in the page becomes `<slug>/`.
pub(crate) fn compose_page(template: &Template, meta: &Frontmatter, body_html: &str) -> String {
    let html = template.render(|slot| match slot {
        Slot::Title => utils::escape(&meta.title),
        Slot::Date => meta.formatted_date(),
        Slot::Tags => utils::render_tags(&meta.tags),
        Slot::Article => utils::render_article(meta, body_html),
    });
    html.replace(&format!("./{}/", meta.slug), &format!("{}/", meta.slug))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::markdown_to_html;
    use crate::test_helpers::{frontmatter, TEMPLATE_HTML};

    #[test]
    fn hello_scenario() {
        let template = Template::parse(TEMPLATE_HTML);
        let meta = frontmatter();
        let page = compose_page(&template, &meta, &markdown_to_html("# Hi"));

        assert!(page.contains("<title>Hello | Notes</title>"));
        assert!(page.contains("<h1 class=\"post-title\">Hello</h1>"));
        assert!(page.contains("<span>January 05, 2025</span>"));
        assert_eq!(page.matches("<span class=\"post-tag\">").count(), 2);
        assert!(page.contains("<span class=\"post-tag\">A</span><span class=\"post-tag\">B</span>"));
        assert!(!page.contains("AI Workflows"));
        assert!(!page.contains("Sample paragraph"));

        let article = &page[page.find("<article>").unwrap()..page.find("</article>").unwrap()];
        assert!(article.contains("<h1>Hi</h1>"));
        assert!(!article.contains("<img"));
    }

    #[test]
    fn hero_image_leads_the_article() {
        let template = Template::parse(TEMPLATE_HTML);
        let mut meta = frontmatter();
        meta.hero = Some("pic.png".to_string());
        let page = compose_page(&template, &meta, "<p>body</p>");

        assert!(page.contains("<article>\n      <img src=\"hello/pic.png\" alt=\"Hello\""));
        let img = page.find("<img").unwrap();
        assert!(img < page.find("<p>body</p>").unwrap());
    }

    #[test]
    fn relative_slug_paths_are_rewritten() {
        let template = Template::parse(TEMPLATE_HTML);
        let meta = frontmatter();
        let page = compose_page(
            &template,
            &meta,
            "<p><img src=\"./hello/diagram.png\" alt=\"\"></p><p><a href=\"./other/x.png\">x</a></p>",
        );
        assert!(page.contains("src=\"hello/diagram.png\""));
        assert!(page.contains("href=\"./other/x.png\""));
    }

    #[test]
    fn composing_is_deterministic() {
        let template = Template::parse(TEMPLATE_HTML);
        let meta = frontmatter();
        let body = markdown_to_html("Some *text*.");
        assert_eq!(
            compose_page(&template, &meta, &body),
            compose_page(&template, &meta, &body)
        );
    }

    #[test]
    fn no_tags_leaves_empty_tag_slot() {
        let template = Template::parse(TEMPLATE_HTML);
        let mut meta = frontmatter();
        meta.tags.clear();
        let page = compose_page(&template, &meta, "");
        assert!(!page.contains("post-tag"));
    }

    #[test]
    fn template_without_markers_passes_through() {
        let template = Template::parse("<html><body>static</body></html>");
        let page = compose_page(&template, &frontmatter(), "<p>body</p>");
        assert_eq!(page, "<html><body>static</body></html>");
    }

    #[test]
    fn title_is_escaped() {
        let template = Template::parse(TEMPLATE_HTML);
        let mut meta = frontmatter();
        meta.title = "Tips & Tricks".to_string();
        let page = compose_page(&template, &meta, "");
        assert!(page.contains("<title>Tips &amp; Tricks | Notes</title>"));
    }
}
