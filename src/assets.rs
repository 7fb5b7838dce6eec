use std::path::{Path, PathBuf};

use anyhow::Context;
use fs_extra::dir::{self, CopyOptions};
use log::info;

/// Copies the `<slug>` image folder next to the post into `dest_blog_dir/<slug>`.
///
/// The destination folder is replaced, not merged. In a dry run nothing is
/// touched and the source files are listed instead. Returns an empty list when
/// the post has no image folder.
pub(crate) fn copy_images(
    source_dir: &Path,
    slug: &str,
    dest_blog_dir: &Path,
    dry_run: bool,
) -> anyhow::Result<Vec<PathBuf>> {
    let image_folder = source_dir.join(slug);
    if !image_folder.is_dir() {
        return Ok(vec![]);
    }
    let dest_folder = dest_blog_dir.join(slug);

    if dry_run {
        info!("  Would copy {:?} -> {:?}", image_folder, dest_folder);
        return list_files(&image_folder);
    }

    // erase = true wipes an existing destination
    dir::create_all(&dest_folder, true)
        .with_context(|| format!("while preparing {:?}", dest_folder))?;
    let mut cp_opts = CopyOptions::new();
    cp_opts.copy_inside = true;
    cp_opts.content_only = true;
    cp_opts.overwrite = true;
    dir::copy(&image_folder, &dest_folder, &cp_opts)
        .with_context(|| format!("while copying {:?} to {:?}", image_folder, dest_folder))?;

    let copied = list_files(&dest_folder)?;
    info!("  Copied {} images to {:?}", copied.len(), dest_folder);
    Ok(copied)
}

fn list_files(folder: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let content =
        dir::get_dir_content(folder).with_context(|| format!("while listing {:?}", folder))?;
    let mut files: Vec<PathBuf> = content.files.into_iter().map(PathBuf::from).collect();
    files.sort();
    Ok(files)
}
