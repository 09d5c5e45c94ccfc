use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use url::Url;

use crate::{Config, Error, Result};

const INDEX_FILE: &str = "index.html";
const PAGE_EXT: &str = "html";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Index,
    Group,
    Description,
}

impl PageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PageKind::Index => "index",
            PageKind::Group => "group",
            PageKind::Description => "description",
        }
    }
}

/// Identity of a cached page: its kind plus the `id` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKey {
    Index,
    Group(String),
    Description(String),
}

impl PageKey {
    /// Classifies `url` by its `tab` and `id` query parameters.
    /// The index page is recognised by equality with `index_url`.
    pub fn from_url(url: &Url, index_url: &Url) -> Result<Self> {
        if url == index_url {
            return Ok(PageKey::Index);
        }

        let tab = query_param(url, "tab")?;
        match tab.as_str() {
            "group" => Ok(PageKey::Group(query_param(url, "id")?)),
            "description" => Ok(PageKey::Description(query_param(url, "id")?)),
            _ => Err(Error::UnrecognizedPageKind {
                tab,
                url: url.to_string(),
            }),
        }
    }

    pub fn kind(&self) -> PageKind {
        match self {
            PageKey::Index => PageKind::Index,
            PageKey::Group(_) => PageKind::Group,
            PageKey::Description(_) => PageKind::Description,
        }
    }

    /// Path of the page relative to the collected pages directory.
    pub fn relative_path(&self) -> PathBuf {
        match self {
            PageKey::Index => PathBuf::from(INDEX_FILE),
            PageKey::Group(id) | PageKey::Description(id) => Path::new(self.kind().as_str())
                .join(format!("{id}.{PAGE_EXT}")),
        }
    }
}

/// Resolves `url` to its location in the page cache.
pub fn page_path(config: &Config, url: &Url) -> Result<PathBuf> {
    let key = PageKey::from_url(url, &config.index_url)?;
    Ok(config.collected_dir.join(key.relative_path()))
}

/// First value of a query parameter, the way the manual's links are read.
fn query_param(url: &Url, param: &'static str) -> Result<String> {
    url.query_pairs()
        .find(|(k, _)| k == param)
        .map(|(_, v)| v.into_owned())
        .ok_or_else(|| Error::MissingQueryParam {
            param,
            url: url.to_string(),
        })
}

/// A page found in the cache directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedPage {
    /// Numeric value of the file name, used for ordering.
    pub id: u64,
    /// The file name as written, so `012` stays `012` in rebuilt urls.
    pub stem: String,
    pub path: PathBuf,
}

/// Lists the cached `*.html` pages of `dir` in ascending numeric id order.
/// A directory that doesn't exist yet simply has no pages.
pub fn cached_ids(dir: impl AsRef<Path>) -> Result<Vec<CachedPage>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut pages = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension() != Some(OsStr::new(PAGE_EXT)) {
            continue;
        }
        let Some((id, stem)) = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| Some((stem.parse::<u64>().ok()?, stem.to_string())))
        else {
            return Err(Error::InvalidPageId(path));
        };
        pages.push(CachedPage { id, stem, path });
    }
    pages.sort_unstable_by_key(|page| page.id);

    Ok(pages)
}
