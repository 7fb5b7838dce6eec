//! Shared fixtures for unit tests.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::TempDir;

use crate::metadata::Frontmatter;

pub const TEMPLATE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>POST TITLE HERE | Notes</title>
</head>
<body>
  <main>
    <h1 class="post-title">POST TITLE HERE</h1>
    <div class="post-meta">
      <span>December 21, 2025</span>
      <span class="post-tag">AI Workflows</span>
    </div>
    <article>
      <p>Sample paragraph.</p>
    </article>
  </main>
</body>
</html>
"#;

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<body>
  <main>
    <section class="posts">
      <div class="empty-state">
        <p>No posts yet.</p>
      </div>
    </section>
  </main>
</body>
</html>
"#;

pub const HELLO_POST: &str = "---
title: \"Hello\"
date: 2025-01-05
tags: [A, B]
slug: hello
---
# Hi
";

/// The resolved frontmatter of [`HELLO_POST`].
pub fn frontmatter() -> Frontmatter {
    Frontmatter {
        title: "Hello".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
        tags: vec!["A".to_string(), "B".to_string()],
        excerpt: String::new(),
        slug: "hello".to_string(),
        hero: None,
    }
}

/// A site root holding `blog/_template.html` and `blog.html`.
pub fn site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("blog")).unwrap();
    fs::write(tmp.path().join("blog/_template.html"), TEMPLATE_HTML).unwrap();
    fs::write(tmp.path().join("blog.html"), INDEX_HTML).unwrap();
    tmp
}

pub fn write_post(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Every file under `root` with its contents, sorted by path.
pub fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                let contents = fs::read(&path).unwrap();
                files.push((path, contents));
            }
        }
    }
    files.sort();
    files
}
