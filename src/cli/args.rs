//! Command line argument parsing and validation.

use crate::customizer::{
    BuildOptions, DEFAULT_CONFIG_FILE, Result, Settings, SettingsBuilder, SettingsFile,
};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Build custom BESAgent installers
#[derive(Parser, Debug)]
#[command(
    name = "besagent_customizer",
    version,
    about = "Build custom BESAgent installers",
    long_about = "Builds a customized BESAgent installer package for macOS.

Expands the newest BESAgent-<version>.pkg in the current directory (or the one
given with --package), removes relocatable package references, copies the files
from ./ModifiedFiles/ into the agent scripts, then flattens and signs the result
into the <package>_Finished/ directory.

Usage:
  besagent_customizer
  besagent_customizer --brand \"Engineering\" --settings
  besagent_customizer --package BESAgent-10.0.7.52-BigFix_MacOS10.13.pkg --no-sign

Exit code 0 = signed package written, 1 = build failed, 2 = not running on macOS."
)]
pub struct Args {
    /// Add branding text to the BESAgent package (first value is used)
    #[arg(short = 'b', long = "brand", value_name = "TEXT")]
    pub brand: Vec<String>,

    /// Add the custom settings cfg to the BESAgent package
    #[arg(short = 's', long = "settings")]
    pub settings: bool,

    /// Specify the BESAgent package to use (first value is used)
    #[arg(short = 'p', long = "package", value_name = "PATH")]
    pub package: Vec<PathBuf>,

    /// Settings file (defaults to ./besagent.toml when present)
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Signing identity passed to productsign
    #[arg(long, value_name = "NAME", env = "BESAGENT_SIGNING_IDENTITY")]
    pub identity: Option<String>,

    /// Leave the finished package unsigned
    #[arg(long)]
    pub no_sign: bool,

    /// Print detailed progress
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Print warnings and errors only
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(brand) = self.brand.first() {
            if brand.trim().is_empty() {
                return Err("Branding text cannot be empty".to_string());
            }
        }
        if let Some(package) = self.package.first() {
            if package.as_os_str().is_empty() {
                return Err("Package path cannot be empty".to_string());
            }
        }
        Ok(())
    }

    /// Per-run options taken from the flags.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            package: self.package.first().cloned(),
            brand_text: self.brand.first().cloned(),
            include_settings: self.settings,
            sign: !self.no_sign,
        }
    }

    /// Settings from the defaults, the settings file, then the flags.
    pub fn load_settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => Some(SettingsFile::load(path)?),
            None => SettingsFile::load_if_present(Path::new(DEFAULT_CONFIG_FILE))?,
        };

        let mut builder = SettingsBuilder::new();
        if let Some(file) = file {
            builder = builder.apply_file(file);
        }
        if let Some(identity) = &self.identity {
            builder = builder.signing_identity(identity);
        }
        builder.build()
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}
