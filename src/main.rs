mod analyze_cmd;
mod cli;
mod config;
mod convert;
mod extract_cmd;
mod logging;
mod map_cmd;
mod mesh_cmd;
mod pv_cmd;

use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::SreToml;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Extract(args) => extract_cmd::run(args),
        Command::Analyze(args) => analyze_cmd::run(args),
        Command::Map(args) => map_cmd::run(args),
        Command::Pv(args) => pv_cmd::run(args),
        Command::Mesh(args) => mesh_cmd::run(args),
    }
}

/// Reads and parses the project TOML.
pub(crate) fn load_config(path: &Path) -> Result<SreToml> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

/// Creates the parent directory of `path` if it has one.
pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}
