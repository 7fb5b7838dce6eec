use std::path::{Path, PathBuf};

/// Where things live inside the site tree.
#[derive(Debug, Clone)]
pub(crate) struct Context {
    pub site_dir: PathBuf,
    pub blog_dir: PathBuf,
    pub template_path: PathBuf,
    pub index_path: PathBuf,
    /// Public base URL, e.g. `https://example.com`.
    pub site_url: Option<String>,
}

impl Context {
    pub fn new(site_dir: PathBuf, site_url: Option<String>) -> Self {
        let blog_dir = site_dir.join("blog");
        Self {
            template_path: blog_dir.join("_template.html"),
            index_path: site_dir.join("blog.html"),
            blog_dir,
            site_dir,
            site_url: site_url.map(|url| url.trim_end_matches('/').to_string()),
        }
    }

    pub fn page_path(&self, slug: &str) -> PathBuf {
        self.blog_dir.join(format!("{slug}.html"))
    }

    pub fn public_url(&self, slug: &str) -> Option<String> {
        self.site_url
            .as_ref()
            .map(|base| format!("{base}/blog/{slug}.html"))
    }
}

/// The directory holding the running executable.
pub(crate) fn executable_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe.parent().map(Path::to_path_buf).unwrap_or_default())
}
