//! The demonstration scenario pack compiled into the crate.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const SCENARIOS_TOML_NAME: &str = "scenarios.toml";
pub const SCENARIOS_TOML: &str = include_str!("../assets/scenarios.toml");

/// Copy the embedded pack to `dir/scenarios.toml` so it can be edited.
///
/// Returns the path written, or `None` when a pack already sits there. An existing file is
/// never overwritten.
pub fn write_default_scenarios(dir: impl AsRef<Path>) -> Result<Option<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)
        .with_context(|| format!("creating scenario directory {}", dir.display()))?;

    let target = dir.join(SCENARIOS_TOML_NAME);
    let mut file = match OpenOptions::new().write(true).create_new(true).open(&target) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("creating scenario pack {}", target.display()))
        }
    };
    file.write_all(SCENARIOS_TOML.as_bytes())
        .with_context(|| format!("writing scenario pack {}", target.display()))?;
    Ok(Some(target))
}
