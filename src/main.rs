use std::path::PathBuf;

use anyhow::Context as _;
use clap::{command, value_parser, Arg, ArgAction};
use context::Context;
use log::debug;

mod assets;
mod context;
mod error;
mod frontmatter;
mod generator;
mod metadata;
mod publisher;
mod renderer;
#[cfg(test)]
mod test_helpers;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let matches = command!()
        .about("Publish a markdown blog post to HTML using the site template")
        .args([
            Arg::new("post")
                .help("Path to the markdown post")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
            Arg::new("dry_run")
                .long("dry-run")
                .help("Show what would happen without making changes")
                .action(ArgAction::SetTrue),
            Arg::new("site_dir")
                .long("site-dir")
                .env("SITE_DIR")
                .help("Path to the site root. Defaults to the directory of this executable.")
                .value_parser(value_parser!(PathBuf)),
            Arg::new("site_url")
                .long("site-url")
                .env("SITE_URL")
                .help("Public base URL of the site, used to print the post's address"),
        ])
        .get_matches();

    let post = matches.get_one::<PathBuf>("post").context("post path is required")?;
    let post_path = std::path::absolute(post)?;
    let site_dir = match matches.get_one::<PathBuf>("site_dir") {
        Some(dir) => std::path::absolute(dir)?,
        None => context::executable_dir().context("while locating the executable")?,
    };
    let ctx = Context::new(site_dir, matches.get_one::<String>("site_url").cloned());
    debug!("Site root: {:?}", ctx.site_dir);

    // usage errors go to stderr even when logging is filtered out
    if let Some(missing) = publisher::missing_input(&ctx, &post_path) {
        eprintln!("Error: {} not found", missing.display());
        std::process::exit(1);
    }

    publisher::publish(&ctx, &post_path, matches.get_flag("dry_run"))?;

    Ok(())
}
