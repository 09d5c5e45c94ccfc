use std::path::{Path, PathBuf};
use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::page::page_path;
use crate::{info_time, Config, Error, Result};

/// A completed GET: status code plus the raw body.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Hooks called while a body streams in. Every hook defaults to a no-op.
pub trait FetchObserver {
    fn started(&self, _url: &Url, _total_len: Option<u64>) {}
    fn advanced(&self, _bytes: u64) {}
    fn finished(&self) {}
}

/// Silent observer.
impl FetchObserver for () {}

/// Byte progress bar on stderr, one bar per download.
pub struct DownloadBar {
    style: ProgressStyle,
    bar: Mutex<Option<ProgressBar>>,
}

impl DownloadBar {
    pub fn new() -> Result<Self> {
        let style = ProgressStyle::default_bar()
            .template("{bytes}/{total_bytes} [{bar:40}] {bytes_per_sec}")?
            .progress_chars("=> ");
        Ok(Self {
            style,
            bar: Mutex::new(None),
        })
    }
}

impl FetchObserver for DownloadBar {
    fn started(&self, _url: &Url, total_len: Option<u64>) {
        let bar = ProgressBar::new(total_len.unwrap_or(0)).with_style(self.style.clone());
        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
    }

    fn advanced(&self, bytes: u64) {
        if let Ok(slot) = self.bar.lock() {
            if let Some(bar) = slot.as_ref() {
                bar.inc(bytes);
            }
        }
    }

    fn finished(&self) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
    }
}

/// Anything that can GET a page. Requests are awaited one at a time.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(&self, url: &Url, observer: &dyn FetchObserver) -> Result<Fetched>;
}

/// The real site, reached with library-default `reqwest` settings.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url, observer: &dyn FetchObserver) -> Result<Fetched> {
        let mut res = self.client.get(url.clone()).send().await?;
        let status = res.status().as_u16();

        observer.started(url, res.content_length());
        let mut body = Vec::with_capacity(body_capacity(res.content_length()));
        while let Some(chunk) = res.chunk().await? {
            observer.advanced(chunk.len() as u64);
            body.extend_from_slice(&chunk);
        }
        observer.finished();

        Ok(Fetched { status, body })
    }
}

/// Upper bound on what a `Content-Length` header may pre-allocate.
const MAX_PREALLOC: u64 = 1 << 20;

/// Initial buffer size for a body. The header is only a hint from the server.
fn body_capacity(content_length: Option<u64>) -> usize {
    content_length.unwrap_or(0).min(MAX_PREALLOC) as usize
}

/// Size of the file at `path`, or `None` if there is no such file.
fn existing_size(path: &Path) -> Option<u64> {
    std::fs::metadata(path)
        .ok()
        .filter(|meta| meta.is_file())
        .map(|meta| meta.len())
}

/// Makes sure `url` is in the page cache and returns where it lives.
///
/// A non-empty file at the target path is reused without touching the network.
/// Otherwise the page is fetched once and written verbatim; anything but a
/// `200 OK` logs the response body and fails the call.
/// `target` overrides the path [`page_path`] would resolve.
pub async fn fetch_and_save<F: Fetch>(
    fetcher: &F,
    config: &Config,
    url: &Url,
    target: Option<&Path>,
    observer: &dyn FetchObserver,
) -> Result<PathBuf> {
    let target = match target {
        Some(path) => path.to_path_buf(),
        None => page_path(config, url)?,
    };

    if let Some(size) = existing_size(&target).filter(|&size| size > 0) {
        info_time!(label: "Exists", "{} bytes in {}", size, target.display());
        return Ok(target);
    }

    info_time!(label: "Downloading", "{}", url);
    let fetched = fetcher.fetch(url, observer).await?;
    if fetched.status != StatusCode::OK.as_u16() {
        tracing::error!("{}", String::from_utf8_lossy(&fetched.body));
        return Err(Error::UnexpectedStatus {
            status: fetched.status,
            url: url.to_string(),
        });
    }

    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&target, &fetched.body).await?;
    info_time!(label: "Saved", "{} {} bytes", target.display(), fetched.body.len());

    Ok(target)
}
