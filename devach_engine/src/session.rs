//! Session helpers that tie parsing, the unlock graph and the store together.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::engine::{UnlockEngine, UnlockReport};
use crate::graph::AchievementGraph;
use crate::store::UnlockStore;
use crate::syntax::index_source;

/// Build the catalog graph with unlock state seeded from `store`.
///
/// # Errors
/// - if the built-in catalog is not a valid registry
pub fn load_graph(store: &UnlockStore) -> Result<AchievementGraph> {
    let graph = AchievementGraph::from_catalog(&store.unlocked_ids())?;
    info!(
        "loaded {} achievements ({} already unlocked)",
        graph.len(),
        graph.unlocked_ids().len()
    );
    Ok(graph)
}

/// Analyze `source` and record every new unlock in `store` as it happens.
///
/// Source that does not parse never reaches the engine, and the store is left untouched.
///
/// # Errors
/// - if `source` is not valid Python
/// - if the catalog is invalid or the store cannot be written
pub fn check_source(source: &str, store: &mut UnlockStore) -> Result<UnlockReport> {
    let index = index_source(source).context("while parsing source")?;
    let mut graph = load_graph(store)?;
    UnlockEngine::new(&index).run(&mut graph, |achievement| store.record_unlock(achievement.id()))
}

/// Read the file at `path` and run [`check_source`] on its contents.
///
/// # Errors
/// - if the file cannot be read, plus everything [`check_source`] reports
pub fn check_file(path: &Path, store: &mut UnlockStore) -> Result<UnlockReport> {
    let source = fs::read_to_string(path).with_context(|| format!("reading source file {}", path.display()))?;
    info!("checking {}", path.display());
    check_source(&source, store).with_context(|| format!("while checking {}", path.display()))
}
