//! Locating native tools.

use std::path::{Path, PathBuf};

/// Finds `name` on `PATH`, falling back to well-known system locations.
///
/// `pkgutil` lives in `/usr/sbin`, which is missing from `PATH` in some
/// restricted shells.
pub fn locate_tool(name: &str, fallbacks: &[&str]) -> Result<PathBuf, String> {
    match which::which(name) {
        Ok(path) => {
            log::debug!("Found {} at: {}", name, path.display());
            Ok(path)
        }
        Err(e) => {
            if let Some(path) = fallbacks.iter().map(Path::new).find(|p| p.is_file()) {
                log::debug!("{} not in PATH, using {}", name, path.display());
                return Ok(path.to_path_buf());
            }
            log::debug!("{} not found in PATH: {}", name, e);
            Err(format!("{name} not found in PATH: {e}"))
        }
    }
}
