//! Error types for package customization.
//!
//! Every failure in the pipeline is fatal to the run except cleanup, which is
//! reported as a warning by the orchestrator and never surfaces here.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for customization operations
pub type Result<T> = std::result::Result<T, Error>;

/// Where operators can download the vendor package.
pub const DOWNLOAD_URL: &str = "https://support.bigfix.com/bes/release/";

/// Hint printed when the signing identity cannot be used.
pub const IDENTITY_HINT: &str = "security find-identity -v -p codesigning";

/// Errors raised while signing the finished package.
#[derive(Error, Debug)]
pub enum SigningError {
    /// The signing tool is missing or could not be launched.
    #[error("signing tool `{tool}` could not be launched for identity \"{identity}\": {reason}")]
    ToolNotFound {
        /// Tool that was looked up
        tool: String,
        /// Configured signing identity
        identity: String,
        /// Underlying reason
        reason: String,
    },

    /// The signing tool ran but reported failure.
    #[error("signing with identity \"{identity}\" failed (exit code {status:?}): {stderr}")]
    Failed {
        /// Configured signing identity
        identity: String,
        /// Exit code, if the process exited normally
        status: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// The signing tool claimed success but left no usable artifact.
    #[error("signing with identity \"{identity}\" produced no usable package at {}", .path.display())]
    MissingOutput {
        /// Configured signing identity
        identity: String,
        /// Where the signed package was expected
        path: PathBuf,
    },
}

impl SigningError {
    /// Identity the failed signing attempt used.
    pub fn identity(&self) -> &str {
        match self {
            Self::ToolNotFound { identity, .. }
            | Self::Failed { identity, .. }
            | Self::MissingOutput { identity, .. } => identity,
        }
    }
}

/// Main error type for customization operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No candidate BESAgent package could be found.
    #[error(
        "can't find any BESAgent packages in {}. Download the BESAgent package from https://support.bigfix.com/bes/release/ and place it next to this tool",
        .directory.display()
    )]
    Discovery {
        /// Directory that was scanned
        directory: PathBuf,
    },

    /// An explicitly requested package does not exist.
    #[error("package not found: {}", .0.display())]
    PackageNotFound(PathBuf),

    /// The host cannot run the native packaging tools.
    #[error("this tool currently requires macOS (running on {0})")]
    UnsupportedPlatform(String),

    /// The distribution manifest could not be parsed or rewritten.
    #[error("failed to process distribution manifest {}: {reason}", .path.display())]
    Manifest {
        /// Manifest path
        path: PathBuf,
        /// Parser or writer message
        reason: String,
    },

    /// The overlay directory is missing.
    #[error("overlay directory {} does not exist", .0.display())]
    OverlayMissing(PathBuf),

    /// Signing failed.
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// A packaging tool could not be located.
    #[error("`{tool}` could not be located: {reason}")]
    ToolNotFound {
        /// Tool name
        tool: String,
        /// Lookup failure
        reason: String,
    },

    /// A packaging tool exited unsuccessfully.
    #[error("`{tool}` failed (exit code {status:?}): {stderr}")]
    ToolFailed {
        /// Tool invocation
        tool: String,
        /// Exit code, if the process exited normally
        status: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// Filesystem operation failed on a known path.
    #[error("{context} {}: {source}", .path.display())]
    Fs {
        /// Operation being performed
        context: &'static str,
        /// Path the operation touched
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// IO error without path context.
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Directory traversal failed.
    #[error("directory traversal failed: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

/// Attaches an operation label and a path to IO errors.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Fs`].
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Adds a message to a missing value or a failed result.
pub trait Context<T> {
    /// Wraps the failure with a fixed message.
    fn context<C: Display>(self, context: C) -> Result<T>;

    /// Wraps the failure with a lazily built message.
    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

impl<T> Context<T> for Result<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{}: {e}", f())))
    }
}

/// Returns early with an [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::customizer::Error::GenericError(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_context_keeps_path_and_operation() {
        let err = Err::<(), _>(io::Error::new(io::ErrorKind::NotFound, "gone"))
            .fs_context("reading manifest", "/tmp/Distribution")
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("reading manifest"));
        assert!(message.contains("/tmp/Distribution"));
        assert!(message.contains("gone"));
    }

    #[test]
    fn discovery_error_points_at_download_page() {
        let err = Error::Discovery {
            directory: PathBuf::from("./"),
        };
        assert!(err.to_string().contains(DOWNLOAD_URL));
    }

    #[test]
    fn option_context_becomes_generic_error() {
        let err = None::<u8>.context("missing brand tag").unwrap_err();
        assert!(matches!(err, Error::GenericError(ref m) if m == "missing brand tag"));
    }
}
