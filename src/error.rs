//! Top-level error types for the command line tool.
//!
//! This module defines the errors surfaced to operators, with exit codes and
//! recovery suggestions.

use crate::customizer::{
    self, SigningError,
    error::{DOWNLOAD_URL, IDENTITY_HINT},
};
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CustomizerError>;

/// Main error type for the command line tool
#[derive(Error, Debug)]
pub enum CustomizerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Customization errors
    #[error("{0}")]
    Customizer(#[from] customizer::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl CustomizerError {
    /// Process exit status for this error.
    ///
    /// 2 means the host platform is unsupported; every other failure is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Customizer(customizer::Error::UnsupportedPlatform(_)) => 2,
            _ => 1,
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            Self::Customizer(customizer::Error::Discovery { .. }) => vec![
                format!("Download the BESAgent package from {DOWNLOAD_URL}"),
                "Place it next to this tool, or pass it with --package".to_string(),
            ],
            Self::Customizer(customizer::Error::Signing(e)) => signing_suggestions(e),
            Self::Customizer(customizer::Error::OverlayMissing(path)) => vec![format!(
                "Create {} with the files to add to the package",
                path.display()
            )],
            Self::Customizer(customizer::Error::ToolNotFound { .. })
            | Self::Customizer(customizer::Error::UnsupportedPlatform(_)) => vec![
                "Run on macOS, where pkgutil and productsign are available".to_string(),
            ],
            Self::Customizer(customizer::Error::Config(_)) => vec![
                "Check the settings file for typos in key names".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

fn signing_suggestions(error: &SigningError) -> Vec<String> {
    let mut suggestions = vec![format!("Signing identity: {}", error.identity())];
    match error {
        SigningError::ToolNotFound { .. } | SigningError::Failed { .. } => {
            suggestions.push(format!("Can't find cert? Try: {IDENTITY_HINT}"));
        }
        SigningError::MissingOutput { .. } => {}
    }
    suggestions.push(
        "The unsigned package was kept next to the output with an -unsigned suffix".to_string(),
    );
    suggestions.push("Use --no-sign to skip signing".to_string());
    suggestions
}
