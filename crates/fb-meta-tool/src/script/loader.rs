//! Locating and reading the script file of a scripts directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{MetaError, Result};

/// Find the script to run in `dir`: the first `*.sql` file by file name.
pub fn find_script(dir: &Path) -> Result<PathBuf> {
    let mut scripts: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("sql"))
        })
        .collect();
    scripts.sort();

    scripts
        .into_iter()
        .next()
        .ok_or_else(|| MetaError::ScriptNotFound(dir.to_path_buf()))
}

/// Read the script selected by [`find_script`].
pub fn load_script(dir: &Path) -> Result<(PathBuf, String)> {
    let path = find_script(dir)?;
    let content = std::fs::read_to_string(&path).map_err(|e| {
        MetaError::Io(std::io::Error::new(
            e.kind(),
            format!("could not read {}: {}", path.display(), e),
        ))
    })?;
    debug!("Loaded script {} ({} bytes)", path.display(), content.len());
    Ok((path, content))
}
