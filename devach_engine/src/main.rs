#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** devach **
//! Unlock coding achievements by writing Python.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::info;

use devach_engine::data_paths::resolve_store_path;
use devach_engine::view::{render_index, render_progress, render_unlocks};
use devach_engine::{DEVACH_VERSION, UnlockStore, check_file, index_source, load_graph};

#[derive(Parser)]
#[command(author, version, about = "Unlock coding achievements by writing Python.")]
struct Cli {
    /// Unlock store to use instead of ~/.dev_achievements/store.json.
    #[arg(long, global = true, value_name = "PATH")]
    store: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a Python file and report newly unlocked achievements.
    Check {
        /// Python source file to analyze.
        file: PathBuf,
    },
    /// List every achievement with its state and prerequisites.
    Progress,
    /// Print the syntax node counts of a Python file.
    Inspect {
        /// Python source file to inspect.
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    info!("devach {DEVACH_VERSION} starting");

    match cli.command {
        Commands::Check { file } => run_check(&file, cli.store.as_deref()),
        Commands::Progress => run_progress(cli.store.as_deref()),
        Commands::Inspect { file } => run_inspect(&file),
    }
}

fn open_store(explicit: Option<&Path>) -> Result<UnlockStore> {
    let path = resolve_store_path(explicit)?;
    info!("using achievement store {}", path.display());
    UnlockStore::open(path)
}

fn run_check(file: &Path, store: Option<&Path>) -> Result<()> {
    let mut store = open_store(store)?;
    let report = check_file(file, &mut store)?;
    if report.is_empty() {
        println!("{}", "No new achievements this time.".dimmed());
    } else {
        println!("{}", render_unlocks(&report.unlocked));
    }
    Ok(())
}

fn run_progress(store: Option<&Path>) -> Result<()> {
    let store = open_store(store)?;
    let graph = load_graph(&store)?;
    print!("{}", render_progress(&graph));
    Ok(())
}

fn run_inspect(file: &Path) -> Result<()> {
    let source = fs::read_to_string(file).with_context(|| format!("reading source file {}", file.display()))?;
    let index = index_source(&source).with_context(|| format!("while parsing {}", file.display()))?;
    print!("{}", render_index(&index));
    Ok(())
}
