//! Package signing.
//!
//! The unsigned package is moved aside to `<name>-unsigned.pkg`, the signing
//! tool writes the signed package back to the original path, and the unsigned
//! copy is only deleted once a non-empty signed package is in place.

use crate::customizer::{
    Result, SigningError,
    error::{ErrorExt, IDENTITY_HINT},
    tools::PackageTools,
};
use std::path::{Path, PathBuf};

/// Signs finished packages in place.
#[derive(Debug)]
pub struct Signer<'a, T> {
    tools: &'a T,
    identity: &'a str,
}

impl<'a, T: PackageTools> Signer<'a, T> {
    /// Creates a signer using `identity`.
    pub fn new(tools: &'a T, identity: &'a str) -> Self {
        Self { tools, identity }
    }

    /// Signs the package at `package`, replacing it with the signed version.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError`] when the tool is missing, fails, or leaves no
    /// signed package. In every failure case the unsigned package stays at
    /// [`unsigned_path`].
    pub async fn sign(&self, package: &Path) -> Result<()> {
        log::info!("Signing {} as \"{}\"", package.display(), self.identity);

        let unsigned = unsigned_path(package);
        tokio::fs::rename(package, &unsigned)
            .await
            .fs_context("moving unsigned package aside", package)?;

        if let Err(e) = self.tools.sign(self.identity, &unsigned, package).await {
            if matches!(e, SigningError::ToolNotFound { .. }) {
                log::error!("Can't find cert? Try: {}", IDENTITY_HINT);
            }
            log::error!("Unsigned package kept at {}", unsigned.display());
            return Err(e.into());
        }

        match tokio::fs::metadata(package).await {
            Ok(metadata) if metadata.is_file() && metadata.len() > 0 => {}
            _ => {
                log::error!("Unsigned package kept at {}", unsigned.display());
                return Err(SigningError::MissingOutput {
                    identity: self.identity.to_string(),
                    path: package.to_path_buf(),
                }
                .into());
            }
        }

        if let Err(e) = tokio::fs::remove_file(&unsigned).await {
            log::warn!(
                "Signed package is in place but {} could not be removed: {}",
                unsigned.display(),
                e
            );
        }

        log::info!("✓ Signed {}", package.display());
        Ok(())
    }
}

/// Sibling path holding the unsigned package while signing:
/// `Foo.pkg` becomes `Foo-unsigned.pkg`.
pub fn unsigned_path(package: &Path) -> PathBuf {
    let mut name = package.file_stem().unwrap_or_default().to_os_string();
    name.push("-unsigned");
    if let Some(extension) = package.extension() {
        name.push(".");
        name.push(extension);
    }
    package.with_file_name(name)
}
