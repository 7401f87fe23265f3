//! Generate lookup tables for sensor firmware
//!
//! ```text
//! build_tables --preset cmc-lookup -o lookup.c
//! build_tables --formula inverse-square -a 1 --format q32 --name dist
//! build_tables --config tables.json -o tables.c -v
//! ```
//!
//! Every table is generated and checked before the output is touched; on any
//! error nothing is written and the exit status is non-zero.

use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use tempfile::NamedTempFile;

mod cli;
mod config;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let manifest = cli.manifest()?;
    let header = manifest.build()?;
    let text = header.render();

    match &cli.output {
        Some(path) => {
            write_output(path, &text, cli.append)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} table(s) to {}", header.arrays().len(), path.display());
        }
        None => io::stdout().lock().write_all(text.as_bytes())?,
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

/// Replace `path` atomically, or append to it
fn write_output(path: &Path, text: &str, append: bool) -> io::Result<()> {
    if append {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        return file.write_all(text.as_bytes());
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(text.as_bytes())?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
