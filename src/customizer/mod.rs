//! BESAgent installer customization.
//!
//! Turns the vendor `BESAgent-<version>.pkg` into a branded installer with a
//! fixed install location and the site's override files:
//!
//! 1. Pick the package (explicit path or newest in the search directory)
//! 2. Expand it with `pkgutil --expand`
//! 3. Strip relocatable `pkg-ref` elements from `Distribution`
//! 4. Overlay `ModifiedFiles/` into `besagent.pkg/Scripts/`
//! 5. Copy the tree per brand, stamp `brand.txt`, flatten
//! 6. Remove intermediates and sign the result with `productsign`
//!
//! The native tools sit behind [`PackageTools`], so everything except the
//! tool invocations themselves runs on any host.
//!
//! # Example
//!
//! ```no_run
//! use besagent_customizer::customizer::{BuildOptions, Customizer, PkgUtil, SettingsBuilder};
//!
//! # async fn example() -> besagent_customizer::customizer::Result<()> {
//! let settings = SettingsBuilder::new().brand_tag("LAB").build()?;
//! let report = Customizer::new(settings, PkgUtil::new())
//!     .build(&BuildOptions {
//!         include_settings: true,
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("SHA256: {}", report.checksum);
//! # Ok(())
//! # }
//! ```

mod builder;
pub mod error;
pub mod package;
mod settings;
pub mod tools;
pub mod utils;

pub use builder::{
    BRAND_MARKER, Customizer, DISTRIBUTION_FILE, Signer, SourcePackage, calculate_sha256,
    unsigned_path,
};
pub use error::{Error, Result, SigningError};
pub use settings::{
    DEFAULT_BRAND_TAG, DEFAULT_CONFIG_FILE, DEFAULT_SETTINGS_FILE_NAME, DEFAULT_SIGNING_IDENTITY,
    Settings, SettingsBuilder, SettingsFile,
};
pub use tools::{PackageTools, PkgUtil};

use std::path::PathBuf;

/// Per-run choices, usually taken from the command line.
#[derive(Clone, Debug)]
pub struct BuildOptions {
    /// Explicit source package; None scans the search directory.
    pub package: Option<PathBuf>,
    /// Text written to `brand.txt`; None skips the marker.
    pub brand_text: Option<String>,
    /// Copy the client settings file from the overlay.
    pub include_settings: bool,
    /// Sign the finished package.
    pub sign: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            package: None,
            brand_text: None,
            include_settings: false,
            sign: true,
        }
    }
}

/// Result of a successful build.
#[derive(Clone, Debug)]
pub struct BuildReport {
    /// Path to the finished package.
    pub package: PathBuf,
    /// Whether the package was signed.
    pub signed: bool,
    /// Package size in bytes.
    pub size: u64,
    /// Hex-encoded SHA-256 of the package.
    pub checksum: String,
    /// Overlay files copied into the package scripts.
    pub copied_files: Vec<String>,
    /// Relocatable `pkg-ref` elements removed from the manifest.
    pub removed_pkg_refs: usize,
    /// Cleanup problems that did not fail the build.
    pub warnings: Vec<String>,
}
