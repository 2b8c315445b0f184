//! Configuration for customization runs.
//!
//! [`Settings`] replaces the process-wide constants a build used to depend on
//! (signing identity, brand tag, directory layout) so the pipeline and signer
//! can be driven from tests with temporary directories and fake tools.

mod builder;
mod core;
mod file;

pub use builder::SettingsBuilder;
pub use core::Settings;
pub use file::SettingsFile;

/// Default signing identity for `productsign`.
pub const DEFAULT_SIGNING_IDENTITY: &str = "Developer ID Installer: Company (CODE)";

/// Default tag appended to branded package names.
pub const DEFAULT_BRAND_TAG: &str = "CUSTOM";

/// Directory holding expanded package trees.
pub const DEFAULT_STAGING_ROOT: &str = "ModifiedPackage";

/// Directory holding override files.
pub const DEFAULT_OVERLAY_DIRECTORY: &str = "ModifiedFiles";

/// Overlay file that is only copied when settings are requested.
pub const DEFAULT_SETTINGS_FILE_NAME: &str = "clientsettings.cfg";

/// Location of the agent's install scripts inside an expanded package.
pub const DEFAULT_SCRIPTS_SUBPATH: &str = "besagent.pkg/Scripts";

/// Settings file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "besagent.toml";
