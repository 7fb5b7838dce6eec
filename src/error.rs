/// Problems with the content of a post source file.
#[derive(Debug, thiserror::Error)]
pub(crate) enum PostError {
    #[error("No frontmatter found. Post must start with ---")]
    MissingFrontmatter,
    #[error("Invalid frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Frontmatter is missing required key `{0}`")]
    MissingKey(&'static str),
    #[error("Invalid date {0}: expected an ISO-8601 date")]
    InvalidDate(String),
}
