//! Builder for constructing Settings.

use super::{
    DEFAULT_BRAND_TAG, DEFAULT_OVERLAY_DIRECTORY, DEFAULT_SCRIPTS_SUBPATH,
    DEFAULT_SETTINGS_FILE_NAME, DEFAULT_SIGNING_IDENTITY, DEFAULT_STAGING_ROOT, Settings,
    SettingsFile,
};
use crate::customizer::{Error, Result};
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Starts from the stock layout: packages and `ModifiedFiles/` in the current
/// directory, expanded trees under `ModifiedPackage/`.
#[derive(Debug)]
pub struct SettingsBuilder {
    signing_identity: Option<String>,
    brand_tag: String,
    search_directory: PathBuf,
    staging_root: PathBuf,
    overlay_directory: PathBuf,
    work_directory: PathBuf,
    settings_file_name: String,
    scripts_subpath: PathBuf,
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self {
            signing_identity: Some(DEFAULT_SIGNING_IDENTITY.to_string()),
            brand_tag: DEFAULT_BRAND_TAG.to_string(),
            search_directory: PathBuf::from("."),
            staging_root: PathBuf::from(DEFAULT_STAGING_ROOT),
            overlay_directory: PathBuf::from(DEFAULT_OVERLAY_DIRECTORY),
            work_directory: PathBuf::from("."),
            settings_file_name: DEFAULT_SETTINGS_FILE_NAME.to_string(),
            scripts_subpath: PathBuf::from(DEFAULT_SCRIPTS_SUBPATH),
        }
    }
}

impl SettingsBuilder {
    /// Creates a builder with the stock defaults.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the signing identity.
    pub fn signing_identity(mut self, identity: impl Into<String>) -> Self {
        self.signing_identity = Some(identity.into());
        self
    }

    /// Sets the brand tag appended to package names.
    pub fn brand_tag(mut self, tag: impl Into<String>) -> Self {
        self.brand_tag = tag.into();
        self
    }

    /// Sets the directory scanned for source packages.
    pub fn search_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_directory = path.as_ref().to_path_buf();
        self
    }

    /// Sets the staging root for expanded trees.
    pub fn staging_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.staging_root = path.as_ref().to_path_buf();
        self
    }

    /// Sets the overlay directory.
    pub fn overlay_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.overlay_directory = path.as_ref().to_path_buf();
        self
    }

    /// Sets the directory receiving working copies and finished packages.
    pub fn work_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.work_directory = path.as_ref().to_path_buf();
        self
    }

    /// Sets the overlay file gated behind the settings flag.
    pub fn settings_file_name(mut self, name: impl Into<String>) -> Self {
        self.settings_file_name = name.into();
        self
    }

    /// Applies every field present in a settings file.
    pub fn apply_file(mut self, file: SettingsFile) -> Self {
        if let Some(identity) = file.signing_identity {
            self.signing_identity = Some(identity);
        }
        if let Some(tag) = file.brand_tag {
            self.brand_tag = tag;
        }
        if let Some(path) = file.search_directory {
            self.search_directory = path;
        }
        if let Some(path) = file.staging_root {
            self.staging_root = path;
        }
        if let Some(path) = file.overlay_directory {
            self.overlay_directory = path;
        }
        if let Some(path) = file.work_directory {
            self.work_directory = path;
        }
        if let Some(name) = file.settings_file_name {
            self.settings_file_name = name;
        }
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the brand tag or settings file name is
    /// empty or would escape its directory.
    pub fn build(self) -> Result<Settings> {
        validate_component("brand_tag", &self.brand_tag)?;
        validate_component("settings_file_name", &self.settings_file_name)?;

        let signing_identity = self
            .signing_identity
            .map(|identity| identity.trim().to_string())
            .filter(|identity| !identity.is_empty());

        Ok(Settings::new(
            signing_identity,
            self.brand_tag,
            self.search_directory,
            self.staging_root,
            self.overlay_directory,
            self.work_directory,
            self.settings_file_name,
            self.scripts_subpath,
        ))
    }
}

fn validate_component(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{field} cannot be empty")));
    }
    if value.contains('/') || value == "." || value == ".." {
        return Err(Error::Config(format!(
            "{field} must be a plain name, got \"{value}\""
        )));
    }
    Ok(())
}
