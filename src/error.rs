use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unexpected tab of: {tab}; {url}")]
    UnrecognizedPageKind { tab: String, url: String },
    #[error("Missing query parameter `{param}` in {url}")]
    MissingQueryParam { param: &'static str, url: String },

    #[error("Unexpected status code: `{status}` for {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Couldn't find the {what} on the page.")]
    PatternNotFound { what: &'static str },
    /// More than one candidate where the page layout allows exactly one.
    #[error("Expected at most one {what}, found {count}.")]
    AmbiguousContent { what: &'static str, count: usize },
    #[error("Cached page name is not a numeric id: {0}")]
    InvalidPageId(PathBuf),

    #[error("The selector you are trying to scrape for is missing. Selector: {0}")]
    ParseMissingSelector(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Url Error: {0}")]
    Url(#[from] url::ParseError),
    #[error("Regex Error: {0}")]
    Regex(#[from] regex::Error),
    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Progress bar template Error: {0}")]
    ProgressTemplate(#[from] indicatif::style::TemplateError),
}
