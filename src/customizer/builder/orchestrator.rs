//! Build orchestration.
//!
//! This module provides the [`Customizer`] that turns a vendor package into a
//! branded, optionally signed installer.

use super::{
    checksum::calculate_sha256,
    signing::{Signer, unsigned_path},
};
use crate::customizer::{
    BuildOptions, BuildReport, Error, Result,
    error::{Context, ErrorExt},
    package::{
        PackageFileName, apply_overlay, name::FINISHED_SUFFIX, select_latest, strip_relocation,
    },
    settings::Settings,
    tools::PackageTools,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Manifest file at the root of an expanded package.
pub const DISTRIBUTION_FILE: &str = "Distribution";

/// Marker file written into the branded package scripts.
pub const BRAND_MARKER: &str = "brand.txt";

/// The package a build starts from, with the folder names derived from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourcePackage {
    /// Path to the vendor package.
    pub path: PathBuf,
    /// Name of the expanded tree and prefix of the branded package.
    pub working_folder: String,
    /// Directory receiving the finished package.
    pub finished_folder: String,
}

impl SourcePackage {
    /// Derives folder names from the package file name.
    ///
    /// Names outside the `BESAgent-<version>` grammar fall back to their file
    /// stem.
    pub fn from_path(path: PathBuf) -> Result<Self> {
        if let Some(name) = PackageFileName::from_path(&path) {
            return Ok(Self::from_parsed(path, &name));
        }

        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .with_context(|| format!("cannot derive a folder name from {}", path.display()))?
            .to_string();
        log::warn!(
            "{} does not follow the BESAgent-<version>.pkg naming; using \"{}\"",
            path.display(),
            stem
        );

        Ok(Self {
            finished_folder: format!("{stem}-{FINISHED_SUFFIX}"),
            working_folder: stem,
            path,
        })
    }

    fn from_parsed(path: PathBuf, name: &PackageFileName) -> Self {
        Self {
            working_folder: name.stem().to_string(),
            finished_folder: name.finished_folder_name(),
            path,
        }
    }
}

/// Output of the assembly steps, before signing.
struct Assembled {
    package: PathBuf,
    copied_files: Vec<String>,
    removed_pkg_refs: usize,
}

/// Main build orchestrator.
///
/// Runs the linear pipeline: expand, strip relocation, overlay, duplicate,
/// brand, flatten, clean up, sign.
///
/// # Examples
///
/// ```no_run
/// use besagent_customizer::customizer::{BuildOptions, Customizer, PkgUtil, SettingsBuilder};
///
/// # async fn example() -> besagent_customizer::customizer::Result<()> {
/// let settings = SettingsBuilder::new().build()?;
/// let customizer = Customizer::new(settings, PkgUtil::new());
///
/// let report = customizer
///     .build(&BuildOptions {
///         brand_text: Some("Engineering".into()),
///         ..Default::default()
///     })
///     .await?;
/// println!("Package completed: {}", report.package.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Customizer<T> {
    settings: Settings,
    tools: T,
}

impl<T: PackageTools> Customizer<T> {
    /// Creates a customizer driving `tools` with `settings`.
    pub fn new(settings: Settings, tools: T) -> Self {
        Self { settings, tools }
    }

    /// Returns the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolves the package to customize.
    ///
    /// Uses `explicit` when given, otherwise the newest package in the search
    /// directory.
    pub async fn resolve_source(&self, explicit: Option<&Path>) -> Result<SourcePackage> {
        match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(Error::PackageNotFound(path.to_path_buf()));
                }
                SourcePackage::from_path(path.to_path_buf())
            }
            None => {
                let discovered = select_latest(self.settings.search_directory()).await?;
                Ok(SourcePackage::from_parsed(discovered.path, &discovered.name))
            }
        }
    }

    /// Runs a complete build.
    ///
    /// Intermediate trees are removed whether or not the build succeeds;
    /// failures to remove them are returned as warnings in the report.
    pub async fn build(&self, options: &BuildOptions) -> Result<BuildReport> {
        let source = self.resolve_source(options.package.as_deref()).await?;
        log::info!("Using Package: {}", source.path.display());

        let branded_name = format!("{}-{}", source.working_folder, self.settings.brand_tag());
        let branded = self.settings.work_directory().join(&branded_name);
        if branded_name == source.finished_folder {
            // The branded copy is deleted after flattening; it must not be the output folder.
            return Err(Error::Config(format!(
                "brand tag \"{}\" makes the working copy {} the same folder as the finished output",
                self.settings.brand_tag(),
                branded.display()
            )));
        }

        let staging_root = self.settings.staging_root();
        fs::create_dir_all(staging_root).await?;

        // Every run starts from a fresh expansion.
        let expanded = staging_root.join(&source.working_folder);
        fs::remove_dir_all(&expanded).await?;

        let assembled = self
            .assemble(&source, &expanded, &branded, &branded_name, options)
            .await;
        let warnings = clean_up(&[&branded, &expanded]).await;
        let assembled = assembled?;

        let signed = match (options.sign, self.settings.signing_identity()) {
            (true, Some(identity)) => {
                Signer::new(&self.tools, identity)
                    .sign(&assembled.package)
                    .await?;
                true
            }
            (true, None) => {
                log::warn!("No signing identity configured; leaving package unsigned");
                false
            }
            (false, _) => false,
        };

        let size = tokio::fs::metadata(&assembled.package)
            .await
            .fs_context("reading package metadata", &assembled.package)?
            .len();
        let checksum = calculate_sha256(&assembled.package).await?;

        log::info!("Package completed: {}", branded_name);

        Ok(BuildReport {
            package: assembled.package,
            signed,
            size,
            checksum,
            copied_files: assembled.copied_files,
            removed_pkg_refs: assembled.removed_pkg_refs,
            warnings,
        })
    }

    async fn assemble(
        &self,
        source: &SourcePackage,
        expanded: &Path,
        branded: &Path,
        branded_name: &str,
        options: &BuildOptions,
    ) -> Result<Assembled> {
        log::info!("Expanding {} into {}", source.path.display(), expanded.display());
        self.tools.expand(&source.path, expanded).await?;

        let removed_pkg_refs = strip_relocation(&expanded.join(DISTRIBUTION_FILE)).await?;

        log::info!("Copying {}...", self.settings.overlay_directory().display());
        let copied_files = apply_overlay(
            self.settings.overlay_directory(),
            &self.settings.scripts_directory(expanded),
            options.include_settings,
            self.settings.settings_file_name(),
        )
        .await?;

        let finished_dir = self.settings.work_directory().join(&source.finished_folder);
        fs::create_dir_all(&finished_dir).await?;

        fs::remove_dir_all(branded).await?;
        fs::copy_dir(expanded, branded).await?;

        if let Some(text) = &options.brand_text {
            log::info!("Adding custom branding.");
            let marker = self.settings.scripts_directory(branded).join(BRAND_MARKER);
            fs::write_file(&marker, format!("{text}\n").as_bytes()).await?;
        }

        let package = finished_dir.join(format!("{branded_name}.pkg"));
        fs::remove_file(&package).await?;
        fs::remove_file(&unsigned_path(&package)).await?;
        log::info!("Flattening {} into {}", branded.display(), package.display());
        self.tools.flatten(branded, &package).await?;

        Ok(Assembled {
            package,
            copied_files,
            removed_pkg_refs,
        })
    }
}

/// Removes intermediate trees, returning a warning for each failure.
async fn clean_up(paths: &[&Path]) -> Vec<String> {
    let mut warnings = Vec::new();
    for path in paths {
        if let Err(e) = fs::remove_dir_all(path).await {
            log::warn!("Cleanup failed: {}", e);
            warnings.push(e.to_string());
        }
    }
    warnings
}
