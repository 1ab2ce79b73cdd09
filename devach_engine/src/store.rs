//! Unlock store --
//!
//! Reads and writes the JSON record of unlocked achievements. The store is read
//! once when a run starts and rewritten on every single unlock.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use devach_data::{AchievementId, StoreDef};
use log::{info, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// The persisted unlock record and where it lives.
#[derive(Debug, Clone)]
pub struct UnlockStore {
    path: PathBuf,
    data: StoreDef,
}

impl UnlockStore {
    /// Open the store at `path`. A missing file yields an empty store.
    ///
    /// # Errors
    /// - if the file exists but cannot be read or parsed
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = load_store(&path)?;
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &StoreDef {
        &self.data
    }

    /// Identifiers recorded as unlocked. Unknown names are reported and skipped.
    pub fn unlocked_ids(&self) -> BTreeSet<AchievementId> {
        let (known, unknown) = self.data.partition_ids();
        for name in unknown {
            warn!("ignoring unknown achievement '{name}' in {}", self.path.display());
        }
        known
    }

    /// Record `id` as unlocked and write the store immediately.
    ///
    /// # Errors
    /// - if the store cannot be written
    pub fn record_unlock(&mut self, id: AchievementId) -> Result<()> {
        if !self.data.push_unlocked(id) {
            return Ok(());
        }
        write_store(&self.path, &self.data)
    }
}

/// Load a store file, or an empty store when the file does not exist.
///
/// # Errors
/// - if the file exists but cannot be read or parsed
pub fn load_store(path: &Path) -> Result<StoreDef> {
    if !path.exists() {
        info!("no achievement store at {}, starting fresh", path.display());
        return Ok(StoreDef::default());
    }
    let raw = fs::read_to_string(path).with_context(|| format!("reading achievement store {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing achievement store {}", path.display()))
}

/// Write `data` to `path`, creating parent directories as needed.
///
/// # Errors
/// - if a directory or the file cannot be created or written
pub fn write_store(path: &Path, data: &StoreDef) -> Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir).with_context(|| format!("creating store directory {}", dir.display()))?;
    }

    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    data.serialize(&mut serializer)
        .context("serializing achievement store")?;
    fs::write(path, buf).with_context(|| format!("writing achievement store {}", path.display()))
}
