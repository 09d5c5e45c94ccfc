#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use sic_manual::request::{Fetch, FetchObserver, Fetched};
use sic_manual::{Config, Result};
use url::Url;

pub const INDEX_URL: &str = "http://sic.test/pls/imis/sic_manual.html";

/// In-memory stand-in for the manual's site. Unknown urls answer 404.
#[derive(Default)]
pub struct MockSite {
    pages: HashMap<String, (u16, Vec<u8>)>,
    hits: Mutex<HashMap<String, usize>>,
}

impl MockSite {
    pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), (200, body.into().into_bytes()));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16, body: &str) -> Self {
        self.pages.insert(url.to_string(), (status, body.as_bytes().to_vec()));
        self
    }

    pub fn hits(&self, url: &str) -> usize {
        self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.hits.lock().unwrap().values().sum()
    }
}

impl Fetch for MockSite {
    async fn fetch(&self, url: &Url, observer: &dyn FetchObserver) -> Result<Fetched> {
        *self.hits.lock().unwrap().entry(url.to_string()).or_default() += 1;

        let (status, body) = self
            .pages
            .get(url.as_str())
            .cloned()
            .unwrap_or((404, b"Not Found".to_vec()));
        observer.started(url, Some(body.len() as u64));
        observer.advanced(body.len() as u64);
        observer.finished();

        Ok(Fetched { status, body })
    }
}

pub fn config(root: &std::path::Path) -> Config {
    Config::default()
        .with_data_dir(root)
        .with_index_url(Url::parse(INDEX_URL).unwrap())
}

pub fn display_url(id: u64, tab: &str) -> String {
    format!("http://sic.test/pls/imis/sic_manual.display?id={id}&tab={tab}")
}

pub fn index_page(group_ids: &[u64]) -> String {
    let links: String = group_ids
        .iter()
        .map(|id| format!(r#"<li><a href="sic_manual.display?id={id}&amp;tab=group">Major Group {id}</a></li>"#))
        .collect();
    format!("<html><body><ul>{links}</ul></body></html>")
}

pub fn group_page(description_ids: &[u64]) -> String {
    let links: String = description_ids
        .iter()
        .map(|id| format!(r#"<li><a href="/pls/imis/sic_manual.display?id={id}&amp;tab=description">{id}</a></li>"#))
        .collect();
    format!("<html><body><ul>{links}</ul></body></html>")
}

pub fn description_page(sic_code: &str, sic_name: &str) -> String {
    format!(
        r#"<html><body>
        <a href="sic_manual.display?id=1&amp;tab=division" title="Division A: Agriculture, Forestry, And Fishing">A</a>
        <a href="sic_manual.display?id=1&amp;tab=group" title="Major Group 01: Agricultural Production Crops">01</a>
        <h2>Description for {sic_code}: {sic_name}</h2>
        <div><span class="blueTen">Establishments primarily engaged in {sic_name}.</span></div>
        </body></html>"#
    )
}
