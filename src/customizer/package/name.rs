//! BESAgent package file name grammar.
//!
//! Vendor packages are named `BESAgent-<major>.<minor>.<patch>.<build>[<suffix>].pkg`,
//! where the suffix usually reads `-BigFix_MacOS10.13`. Folder names for a
//! build are derived from the parsed pieces instead of slicing characters.

use regex::Regex;
use std::{fmt, path::Path, sync::LazyLock};

/// File name prefix shared by all vendor packages.
pub const PACKAGE_PREFIX: &str = "BESAgent-";

/// Suffix of the finished-output directory name.
pub const FINISHED_SUFFIX: &str = "Finished";

static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^BESAgent-(?P<version>(\d+)\.(\d+)\.(\d+)\.(\d+))(?P<suffix>.*)\.pkg$")
        .expect("package name pattern is valid")
});

/// Four-part agent version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgentVersion(pub [u64; 4]);

impl fmt::Display for AgentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [major, minor, patch, build] = self.0;
        write!(f, "{major}.{minor}.{patch}.{build}")
    }
}

/// A parsed `BESAgent-*.pkg` file name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageFileName {
    stem: String,
    version: AgentVersion,
    suffix: Option<String>,
}

impl PackageFileName {
    /// Parses a bare file name. Returns None when it does not fit the grammar.
    pub fn parse(file_name: &str) -> Option<Self> {
        let captures = PACKAGE_NAME.captures(file_name)?;

        let mut parts = [0u64; 4];
        for (slot, index) in parts.iter_mut().zip(2..=5) {
            *slot = captures.get(index)?.as_str().parse().ok()?;
        }

        let suffix = captures
            .name("suffix")
            .map(|m| m.as_str().trim_start_matches('-'))
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let stem = file_name.strip_suffix(".pkg")?.to_string();

        Some(Self {
            stem,
            version: AgentVersion(parts),
            suffix,
        })
    }

    /// Parses the file name component of `path`.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(Self::parse)
    }

    /// Name without the `.pkg` extension; used as the working folder.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Parsed version.
    pub fn version(&self) -> AgentVersion {
        self.version
    }

    /// Text after the version, without its leading separator.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Name of the directory receiving finished packages.
    ///
    /// `BESAgent-10.0.7.52-BigFix_MacOS10.13` keeps everything through the last
    /// `_` and drops the platform token: `BESAgent-10.0.7.52-BigFix_Finished`.
    /// Names without a platform token get `-Finished` appended to the stem.
    pub fn finished_folder_name(&self) -> String {
        match self.suffix.as_deref().and_then(|_| self.stem.rfind('_')) {
            Some(index) => format!("{}{}", &self.stem[..=index], FINISHED_SUFFIX),
            None => format!("{}-{}", self.stem, FINISHED_SUFFIX),
        }
    }
}
