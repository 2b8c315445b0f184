//! On-disk settings file.

use crate::customizer::{Error, Result};
use std::path::{Path, PathBuf};

/// Optional overrides read from a TOML settings file.
///
/// Every field is optional; unset fields keep the builder defaults.
///
/// ```toml
/// signing_identity = "Developer ID Installer: Example University (ABCDE12345)"
/// brand_tag = "EXAMPLE"
/// overlay_directory = "ModifiedFiles"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// Signing identity for `productsign`.
    #[serde(default)]
    pub signing_identity: Option<String>,

    /// Tag appended to branded package names.
    #[serde(default)]
    pub brand_tag: Option<String>,

    /// Directory scanned for source packages.
    #[serde(default)]
    pub search_directory: Option<PathBuf>,

    /// Root holding expanded package trees.
    #[serde(default)]
    pub staging_root: Option<PathBuf>,

    /// Directory of override files.
    #[serde(default)]
    pub overlay_directory: Option<PathBuf>,

    /// Directory receiving the working copy and finished folder.
    #[serde(default)]
    pub work_directory: Option<PathBuf>,

    /// Overlay file gated behind `--settings`.
    #[serde(default)]
    pub settings_file_name: Option<String>,
}

impl SettingsFile {
    /// Parses settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Reads and parses a settings file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_toml(&text)
            .map_err(|e| Error::Config(format!("{} in {}", e, path.display())))
    }

    /// Reads a settings file if one exists at `path`.
    pub fn load_if_present(path: &Path) -> Result<Option<Self>> {
        if path.is_file() {
            log::debug!("Loading settings from {}", path.display());
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }
}
