//! Resolution of the unlock store location.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Result, bail};

/// Environment variable that overrides the default store location.
pub const STORE_ENV_VAR: &str = "DEV_ACHIEVEMENTS_STORE";
/// Store directory, relative to the user's home directory.
pub const STORE_DIR: &str = ".dev_achievements";
pub const STORE_FILE: &str = "store.json";

/// Cached default store path under the home directory, if one can be determined.
static DEFAULT_STORE: LazyLock<Option<PathBuf>> =
    LazyLock::new(|| dirs::home_dir().map(|home| home.join(STORE_DIR).join(STORE_FILE)));

/// Default location of the unlock store: `~/.dev_achievements/store.json`.
pub fn default_store_path() -> Option<PathBuf> {
    DEFAULT_STORE.clone()
}

/// Resolve the store path: an explicit path wins, then the environment, then the default.
///
/// # Errors
/// - if no explicit path or override is given and the home directory is unknown
pub fn resolve_store_path(explicit: Option<&Path>) -> Result<PathBuf> {
    pick_store_path(explicit, env::var_os(STORE_ENV_VAR), default_store_path())
}

fn pick_store_path(explicit: Option<&Path>, from_env: Option<OsString>, default: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(raw) = from_env
        && !raw.is_empty()
    {
        return Ok(PathBuf::from(raw));
    }
    match default {
        Some(path) => Ok(path),
        None => bail!("cannot locate the home directory; pass --store or set {STORE_ENV_VAR}"),
    }
}
