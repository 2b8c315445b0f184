//! BESAgent installer customization library.
//!
//! This library rebuilds the vendor BESAgent macOS package with:
//! - fixed (non-relocatable) install locations
//! - site override files and optional client settings
//! - an optional brand marker
//! - a `productsign` signature
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod customizer;
pub mod error;

// Re-export commonly used types
pub use error::{CliError, CustomizerError, Result};
