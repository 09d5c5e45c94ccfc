use chrono::Local;
use clap::Parser;
use sic_manual::cli::Args;
use sic_manual::process::compile_manual;
use sic_manual::{info_time, init_tracing, Result};

fn main() -> Result<()> {
    init_tracing();
    let config = Args::parse().config();
    let start_time = Local::now();

    let written = compile_manual(&config)?;
    info_time!(start_time, "Wrote {} rows to {}", written, config.compiled_path.display());

    Ok(())
}
