//! Core Settings struct.

use std::path::{Path, PathBuf};

/// Settings for a customization run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Relative
/// directories resolve against the process working directory, matching the
/// layout operators keep next to the vendor package.
///
/// # Examples
///
/// ```no_run
/// use besagent_customizer::customizer::SettingsBuilder;
///
/// # fn example() -> besagent_customizer::customizer::Result<()> {
/// let settings = SettingsBuilder::new()
///     .brand_tag("LAB")
///     .signing_identity("Developer ID Installer: Example (ABCDE12345)")
///     .build()?;
/// assert_eq!(settings.brand_tag(), "LAB");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Identity passed to `productsign --sign`. None disables signing.
    signing_identity: Option<String>,

    /// Tag appended to the branded working folder and package name.
    brand_tag: String,

    /// Directory scanned for `BESAgent-*.pkg` candidates.
    search_directory: PathBuf,

    /// Root holding expanded package trees.
    staging_root: PathBuf,

    /// Directory of override files copied into the package scripts.
    overlay_directory: PathBuf,

    /// Directory receiving the branded working copy and finished folder.
    work_directory: PathBuf,

    /// Overlay file gated behind the settings flag.
    settings_file_name: String,

    /// Scripts directory relative to the expanded package root.
    scripts_subpath: PathBuf,
}

impl Settings {
    /// Returns the signing identity, if signing is configured.
    pub fn signing_identity(&self) -> Option<&str> {
        self.signing_identity.as_deref()
    }

    /// Returns the brand tag.
    pub fn brand_tag(&self) -> &str {
        &self.brand_tag
    }

    /// Returns the directory scanned for source packages.
    pub fn search_directory(&self) -> &Path {
        &self.search_directory
    }

    /// Returns the staging root for expanded trees.
    pub fn staging_root(&self) -> &Path {
        &self.staging_root
    }

    /// Returns the overlay directory.
    pub fn overlay_directory(&self) -> &Path {
        &self.overlay_directory
    }

    /// Returns the work directory.
    pub fn work_directory(&self) -> &Path {
        &self.work_directory
    }

    /// Returns the name of the gated settings file.
    pub fn settings_file_name(&self) -> &str {
        &self.settings_file_name
    }

    /// Returns the scripts directory inside a package tree rooted at `root`.
    pub fn scripts_directory(&self, root: &Path) -> PathBuf {
        root.join(&self.scripts_subpath)
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        signing_identity: Option<String>,
        brand_tag: String,
        search_directory: PathBuf,
        staging_root: PathBuf,
        overlay_directory: PathBuf,
        work_directory: PathBuf,
        settings_file_name: String,
        scripts_subpath: PathBuf,
    ) -> Self {
        Self {
            signing_identity,
            brand_tag,
            search_directory,
            staging_root,
            overlay_directory,
            work_directory,
            settings_file_name,
            scripts_subpath,
        }
    }
}
