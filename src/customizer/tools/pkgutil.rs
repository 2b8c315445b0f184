//! `pkgutil` and `productsign` backed tools.

use super::{PackageTools, detection::locate_tool};
use crate::customizer::{Error, Result, SigningError};
use std::{
    path::{Path, PathBuf},
    process::Output,
};

const PKGUTIL: &str = "pkgutil";
const PRODUCTSIGN: &str = "productsign";

/// Native macOS packaging tools.
///
/// Tools are looked up when first needed, so constructing this on a host
/// without them only fails once a build actually runs.
#[derive(Clone, Debug, Default)]
pub struct PkgUtil {
    pkgutil: Option<PathBuf>,
    productsign: Option<PathBuf>,
}

impl PkgUtil {
    /// Uses the tools found on `PATH` or in their system locations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses explicit tool paths.
    pub fn with_paths(pkgutil: impl Into<PathBuf>, productsign: impl Into<PathBuf>) -> Self {
        Self {
            pkgutil: Some(pkgutil.into()),
            productsign: Some(productsign.into()),
        }
    }

    fn pkgutil(&self) -> Result<PathBuf> {
        match &self.pkgutil {
            Some(path) => Ok(path.clone()),
            None => locate_tool(PKGUTIL, &["/usr/sbin/pkgutil"]).map_err(|reason| {
                Error::ToolNotFound {
                    tool: PKGUTIL.to_string(),
                    reason,
                }
            }),
        }
    }

    fn productsign(&self) -> std::result::Result<PathBuf, String> {
        match &self.productsign {
            Some(path) => Ok(path.clone()),
            None => locate_tool(PRODUCTSIGN, &["/usr/bin/productsign"]),
        }
    }

    async fn run_pkgutil(&self, mode: &str, from: &Path, to: &Path) -> Result<()> {
        let tool = self.pkgutil()?;
        let invocation = format!("{PKGUTIL} {mode}");
        log::debug!("Running {} {} {}", invocation, from.display(), to.display());

        let output = tokio::process::Command::new(&tool)
            .arg(mode)
            .args([from.as_os_str(), to.as_os_str()])
            .output()
            .await
            .map_err(|e| Error::ToolNotFound {
                tool: tool.display().to_string(),
                reason: e.to_string(),
            })?;

        check_status(&invocation, &output)
    }
}

fn check_status(invocation: &str, output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }
    Err(Error::ToolFailed {
        tool: invocation.to_string(),
        status: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

impl PackageTools for PkgUtil {
    async fn expand(&self, package: &Path, destination: &Path) -> Result<()> {
        self.run_pkgutil("--expand", package, destination).await?;
        if !destination.is_dir() {
            return Err(Error::ToolFailed {
                tool: format!("{PKGUTIL} --expand"),
                status: Some(0),
                stderr: format!("no expanded tree at {}", destination.display()),
            });
        }
        Ok(())
    }

    async fn flatten(&self, source: &Path, package: &Path) -> Result<()> {
        self.run_pkgutil("--flatten", source, package).await?;
        if !package.is_file() {
            return Err(Error::ToolFailed {
                tool: format!("{PKGUTIL} --flatten"),
                status: Some(0),
                stderr: format!("no package written at {}", package.display()),
            });
        }
        Ok(())
    }

    async fn sign(
        &self,
        identity: &str,
        unsigned: &Path,
        signed: &Path,
    ) -> std::result::Result<(), SigningError> {
        let tool = self
            .productsign()
            .map_err(|reason| SigningError::ToolNotFound {
                tool: PRODUCTSIGN.to_string(),
                identity: identity.to_string(),
                reason,
            })?;

        let output = tokio::process::Command::new(&tool)
            .arg("--sign")
            .arg(identity)
            .args([unsigned.as_os_str(), signed.as_os_str()])
            .output()
            .await
            .map_err(|e| SigningError::ToolNotFound {
                tool: tool.display().to_string(),
                identity: identity.to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(SigningError::Failed {
                identity: identity.to_string(),
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
