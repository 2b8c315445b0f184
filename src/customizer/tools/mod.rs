//! External packaging tools.
//!
//! The pipeline only talks to the native tools through [`PackageTools`], so it
//! can run against fakes on hosts without `pkgutil` or `productsign`.

mod detection;
mod pkgutil;

pub use detection::locate_tool;
pub use pkgutil::PkgUtil;

use crate::customizer::{Result, SigningError};
use std::path::Path;

/// Capability interface over the expand, flatten and sign tools.
#[allow(async_fn_in_trait)]
pub trait PackageTools {
    /// Expands the flat package `package` into the directory `destination`.
    ///
    /// `destination` must not exist yet.
    async fn expand(&self, package: &Path, destination: &Path) -> Result<()>;

    /// Flattens the directory tree `source` into the package file `package`.
    async fn flatten(&self, source: &Path, package: &Path) -> Result<()>;

    /// Signs `unsigned` with `identity`, writing the signed package to `signed`.
    async fn sign(
        &self,
        identity: &str,
        unsigned: &Path,
        signed: &Path,
    ) -> std::result::Result<(), SigningError>;
}

impl<T: PackageTools> PackageTools for &T {
    async fn expand(&self, package: &Path, destination: &Path) -> Result<()> {
        (**self).expand(package, destination).await
    }

    async fn flatten(&self, source: &Path, package: &Path) -> Result<()> {
        (**self).flatten(source, package).await
    }

    async fn sign(
        &self,
        identity: &str,
        unsigned: &Path,
        signed: &Path,
    ) -> std::result::Result<(), SigningError> {
        (**self).sign(identity, unsigned, signed).await
    }
}
