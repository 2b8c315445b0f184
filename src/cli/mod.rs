//! Command line interface for the BESAgent customizer.
//!
//! Parses arguments, checks the host platform, loads settings and drives a
//! single build, reporting progress through [`OutputManager`].

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::{
    customizer::{self, BuildReport, Customizer, PkgUtil},
    error::{CliError, Result},
};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let config = RuntimeConfig::from(&args);
    execute(&args, &config).await
}

/// Runs one build for already parsed arguments.
pub async fn execute(args: &Args, config: &RuntimeConfig) -> Result<i32> {
    ensure_supported_platform()?;

    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let customizer = Customizer::new(args.load_settings()?, PkgUtil::new());
    let settings = customizer.settings();
    let options = args.build_options();
    let output = config.output();

    output.section("Building custom BESAgent installer")?;
    match &options.package {
        Some(package) => output.progress(&format!("Using package {}", package.display()))?,
        None => output.progress(&format!(
            "Searching {} for BESAgent packages",
            settings.search_directory().display()
        ))?,
    }
    if options.include_settings {
        output.verbose(&format!("Including {}", settings.settings_file_name()))?;
    }
    if options.sign && settings.signing_identity().is_none() {
        output.warn("No signing identity configured; the package will be left unsigned")?;
    }

    let report = customizer.build(&options).await?;

    print_report(config, &report)?;
    Ok(0)
}

fn print_report(config: &RuntimeConfig, report: &BuildReport) -> Result<()> {
    let output = config.output();

    for warning in &report.warnings {
        output.warn(warning)?;
    }
    if report.removed_pkg_refs > 0 {
        output.indent(&format!(
            "Removed {} relocatable package reference(s)",
            report.removed_pkg_refs
        ))?;
    }
    for file in &report.copied_files {
        output.indent(&format!("Copied: {file}"))?;
    }
    output.verbose(&format!("Size: {} bytes", report.size))?;
    output.verbose(&format!("SHA256: {}", report.checksum))?;

    let status = if report.signed { "signed" } else { "unsigned" };
    output.success(&format!(
        "Package completed ({status}): {}",
        report.package.display()
    ))?;
    Ok(())
}

/// Refuses to run anywhere the native packaging tools do not exist.
fn ensure_supported_platform() -> std::result::Result<(), customizer::Error> {
    if cfg!(target_os = "macos") {
        Ok(())
    } else {
        Err(customizer::Error::UnsupportedPlatform(
            std::env::consts::OS.to_string(),
        ))
    }
}
