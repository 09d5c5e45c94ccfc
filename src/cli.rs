use std::path::PathBuf;

use clap::Parser;

use crate::{Config, DATA_DIR};

/// Every flag is optional; a bare run uses the default `data/` layout.
#[derive(Debug, Parser)]
#[command(about = "Mirror the SIC manual and compile it to CSV")]
pub struct Args {
    /// Root of the `collected/` and `compiled/` directories
    #[arg(long, default_value = DATA_DIR)]
    pub data_dir: PathBuf,
}

impl Args {
    pub fn config(&self) -> Config {
        Config::default().with_data_dir(&self.data_dir)
    }
}
