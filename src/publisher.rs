use std::path::{Path, PathBuf};

use anyhow::Context as _;
use log::{debug, info, warn};

use crate::assets::copy_images;
use crate::context::Context;
use crate::generator::{compose_page, render_card, update_index, IndexChange, Slot, Template};
use crate::metadata::Post;
use crate::renderer::markdown_to_html;

const PREVIEW_CHARS: usize = 500;

/// Everything one publish run produces, before anything is written.
#[derive(Debug)]
pub(crate) struct Publication {
    pub slug: String,
    pub page_path: PathBuf,
    pub page_html: String,
    pub index_html: String,
    pub index_change: IndexChange,
    pub body_html: String,
    pub source_dir: PathBuf,
}

/// The first required input that does not exist: the post, then the template.
pub(crate) fn missing_input(ctx: &Context, post_path: &Path) -> Option<PathBuf> {
    [post_path, ctx.template_path.as_path()]
        .into_iter()
        .find(|path| !path.exists())
        .map(Path::to_path_buf)
}

/// Renders the post page and the updated index without touching the site.
pub(crate) fn prepare(ctx: &Context, post_path: &Path) -> anyhow::Result<Publication> {
    let file_name = post_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    info!("Publishing: {}", file_name);

    let post = Post::load(post_path)?;
    let meta = &post.meta;
    info!("  Slug: {}", meta.slug);
    info!("  Title: {}", meta.title);
    info!("  Date: {}", meta.formatted_date());
    info!("  Tags: {:?}", meta.tags);

    let body_html = markdown_to_html(&post.body);
    debug!("Rendered {} bytes of body html", body_html.len());

    let template_source = std::fs::read_to_string(&ctx.template_path)
        .with_context(|| format!("while reading {:?}", ctx.template_path))?;
    let template = Template::parse(&template_source);
    for slot in [Slot::Title, Slot::Date, Slot::Tags, Slot::Article] {
        if !template.has_slot(slot) {
            warn!("Template has no {:?} marker; leaving it as is", slot);
        }
    }
    let page_html = compose_page(&template, meta, &body_html);

    let card = render_card(meta);
    let index_source = std::fs::read_to_string(&ctx.index_path)
        .with_context(|| format!("while reading {:?}", ctx.index_path))?;
    let (index_html, index_change) = update_index(&index_source, &card, meta)?;

    Ok(Publication {
        page_path: ctx.page_path(&meta.slug),
        slug: meta.slug.clone(),
        page_html,
        index_html,
        index_change,
        body_html,
        source_dir: post.source_dir,
    })
}

/// Publishes the post, or only reports what would change when `dry_run` is set.
///
/// Files are written in order: post page, index, image folder.
pub(crate) fn publish(
    ctx: &Context,
    post_path: &Path,
    dry_run: bool,
) -> anyhow::Result<(Publication, Vec<PathBuf>)> {
    let publication = prepare(ctx, post_path)?;

    if dry_run {
        let images = copy_images(&publication.source_dir, &publication.slug, &ctx.blog_dir, true)?;
        print_preview(ctx, &publication, &images);
        return Ok((publication, images));
    }

    std::fs::write(&publication.page_path, &publication.page_html)
        .with_context(|| format!("while writing {:?}", publication.page_path))?;
    info!("  Created: {}", publication.page_path.display());

    std::fs::write(&ctx.index_path, &publication.index_html)
        .with_context(|| format!("while writing {:?}", ctx.index_path))?;
    info!("  Updated: {}", ctx.index_path.display());

    let images = copy_images(&publication.source_dir, &publication.slug, &ctx.blog_dir, false)?;

    println!("\nDone! View at: file://{}", publication.page_path.display());
    if let Some(url) = ctx.public_url(&publication.slug) {
        println!("Or after push: {url}");
    }

    Ok((publication, images))
}

fn print_preview(ctx: &Context, publication: &Publication, images: &[PathBuf]) {
    println!("\n[DRY RUN] Would create/update:");
    println!("  - {}", publication.page_path.display());
    let change = match publication.index_change {
        IndexChange::Updated => "update existing card",
        IndexChange::Inserted => "add new card",
        IndexChange::NoListing => "no post listing found",
    };
    println!("  - {} ({change})", ctx.index_path.display());
    if !images.is_empty() {
        println!(
            "  - {} images in {}/",
            images.len(),
            ctx.blog_dir.join(&publication.slug).display()
        );
    }
    println!("\nPost preview (first {PREVIEW_CHARS} chars of body):");
    println!("{}...", preview(&publication.body_html));
}

fn preview(body_html: &str) -> String {
    body_html.chars().take(PREVIEW_CHARS).collect()
}
