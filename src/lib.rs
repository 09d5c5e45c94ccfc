//! Scrapes the SIC manual into a local page cache, then compiles the cached
//! description pages into a single CSV table.

pub mod cli;
mod config;
mod error;
mod macros;
pub mod page;
pub mod parse;
pub mod process;
pub mod query;
pub mod request;

pub use config::Config;
pub use error::{Error, Result};

const MANUAL_INDEX_URL: &str = "https://www.osha.gov/pls/imis/sic_manual.html";
/// Relative to the index url.
const MANUAL_DISPLAY_PAGE: &str = "sic_manual.display";
const DATA_DIR: &str = "data";
const COLLECTED_SUBDIR: &str = "collected/sic_manual";
const COMPILED_FILE: &str = "compiled/sic_manual.csv";
const PROGRESS_EVERY: usize = 50;

pub const COMPILED_HEADERS: [&str; 9] = [
    "sic_code",
    "sic_name",
    "group_code",
    "group_name",
    "division_code",
    "division_name",
    "url",
    "sic_description",
    "sic_examples",
];

/// Installs the fmt subscriber used by every binary. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}
