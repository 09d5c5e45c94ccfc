use std::path::{Path, PathBuf};

use url::Url;

use crate::page::PageKind;
use crate::{Result, COLLECTED_SUBDIR, COMPILED_FILE, DATA_DIR, MANUAL_DISPLAY_PAGE, MANUAL_INDEX_URL};

/// Where the manual lives and where its pages and the compiled table go on disk.
#[derive(Debug, Clone)]
pub struct Config {
    pub index_url: Url,
    pub collected_dir: PathBuf,
    pub compiled_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_url: Url::parse(MANUAL_INDEX_URL).expect("index url constant is valid"),
            collected_dir: Path::new(DATA_DIR).join(COLLECTED_SUBDIR),
            compiled_path: Path::new(DATA_DIR).join(COMPILED_FILE),
        }
    }
}

impl Config {
    /// Rebases the collected pages and the compiled table under `root`.
    pub fn with_data_dir(mut self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        self.collected_dir = root.join(COLLECTED_SUBDIR);
        self.compiled_path = root.join(COMPILED_FILE);
        self
    }

    pub fn with_index_url(mut self, index_url: Url) -> Self {
        self.index_url = index_url;
        self
    }

    pub fn group_dir(&self) -> PathBuf {
        self.collected_dir.join(PageKind::Group.as_str())
    }

    pub fn description_dir(&self) -> PathBuf {
        self.collected_dir.join(PageKind::Description.as_str())
    }

    /// Source url of a description page, built from its id as it appears in the file name.
    pub fn description_url(&self, id: &str) -> Result<Url> {
        let tab = PageKind::Description.as_str();
        Ok(self
            .index_url
            .join(&format!("{MANUAL_DISPLAY_PAGE}?id={id}&tab={tab}"))?)
    }
}
