use std::path::Path;

use chrono::Local;

use crate::page::cached_ids;
use crate::parse::{description_links, group_links, DescriptionExtractor};
use crate::request::{fetch_and_save, Fetch, FetchObserver};
use crate::{info_time, Config, Result, COMPILED_HEADERS, PROGRESS_EVERY};

/// Links discovered by one collector run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectStats {
    pub groups: usize,
    pub descriptions: usize,
}

/// Mirrors the index, every group page and every description page into the page cache.
/// Pages already cached are not requested again, so a failed run resumes where it stopped.
pub async fn collect_pages<F: Fetch>(
    fetcher: &F,
    config: &Config,
    observer: &dyn FetchObserver,
) -> Result<CollectStats> {
    let start_time = Local::now();
    info_time!("Started collecting pages");

    let groups = fetch_group_pages(fetcher, config, observer).await?;
    info_time!(start_time, "Finished fetching {} group pages.", groups);

    let descriptions = fetch_description_pages(fetcher, config, observer).await?;
    info_time!(start_time, "Finished fetching {} description pages.", descriptions);

    Ok(CollectStats {
        groups,
        descriptions,
    })
}

async fn fetch_group_pages<F: Fetch>(
    fetcher: &F,
    config: &Config,
    observer: &dyn FetchObserver,
) -> Result<usize> {
    let index_path = fetch_and_save(fetcher, config, &config.index_url, None, observer).await?;
    let group_urls = group_links(&read_page(&index_path)?, &config.index_url)?;
    info_time!("Found {} group urls", group_urls.len());

    for (i, url) in group_urls.iter().enumerate() {
        info_time!(label: "Fetching", "({}/{}) {}", i + 1, group_urls.len(), url);
        fetch_and_save(fetcher, config, url, None, observer).await?;
    }
    Ok(group_urls.len())
}

/// Walks the cached group pages in id order, fetching the description pages each one links to.
async fn fetch_description_pages<F: Fetch>(
    fetcher: &F,
    config: &Config,
    observer: &dyn FetchObserver,
) -> Result<usize> {
    let group_pages = cached_ids(config.group_dir())?;
    info_time!("Found {} group page files", group_pages.len());

    let mut total = 0;
    for (i, group_page) in group_pages.iter().enumerate() {
        let path = &group_page.path;
        info_time!(label: "Souping", "({}/{}) {}", i + 1, group_pages.len(), path.display());

        let desc_urls = description_links(&read_page(path)?, &config.index_url)?;
        info_time!("Found {} description URLs", desc_urls.len());
        for (j, url) in desc_urls.iter().enumerate() {
            info_time!(label: "Fetching", "({}/{}) {}", j + 1, desc_urls.len(), url);
            fetch_and_save(fetcher, config, url, None, observer).await?;
        }
        total += desc_urls.len();
    }
    Ok(total)
}

/// Parses every cached description page, in ascending id order, into one CSV row each.
/// The table at `config.compiled_path` is replaced. Returns the number of rows written.
pub fn compile_manual(config: &Config) -> Result<usize> {
    let start_time = Local::now();
    let src_dir = config.description_dir();
    let src_pages = cached_ids(&src_dir)?;
    info_time!(label: "Gathered", "{} files in {}", src_pages.len(), src_dir.display());

    if let Some(parent) = config.compiled_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut target = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&config.compiled_path)?;
    info_time!(label: "Writing to", "{}", config.compiled_path.display());
    target.write_record(COMPILED_HEADERS)?;

    let extractor = DescriptionExtractor::new()?;
    for (i, src_page) in src_pages.iter().enumerate() {
        let path = &src_page.path;
        let page = extractor.extract(&read_page(path)?)?;
        let record = page.into_record(&config.description_url(&src_page.stem)?);
        target.serialize(&record)?;

        if i % PROGRESS_EVERY == 0 {
            info_time!(label: "Parsing", "{} out of {} - {}", i, src_pages.len(), path.display());
        }
    }
    target.flush()?;
    info_time!(start_time, "Compiled {} records.", src_pages.len());

    Ok(src_pages.len())
}

/// Reads a cached page. The manual is served as ISO-8859-1, where every byte is its own code point.
fn read_page(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(bytes.into_iter().map(char::from).collect())
}
