//! Source package discovery.
//!
//! Scans a directory for vendor packages and picks the newest one using a
//! natural ("human") ordering of file names, so `BESAgent-10.*` sorts after
//! `BESAgent-9.*`.

use super::name::PackageFileName;
use crate::customizer::{Error, Result, error::ErrorExt};
use std::{
    cmp::Ordering,
    path::{Path, PathBuf},
};

/// A package picked from a directory scan.
#[derive(Clone, Debug)]
pub struct DiscoveredPackage {
    /// Path to the package file.
    pub path: PathBuf,
    /// Parsed file name.
    pub name: PackageFileName,
}

/// One run of a natural sort key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Chunk {
    /// Digits with leading zeros removed.
    Number(String),
    /// Anything between digit runs.
    Text(String),
}

impl Ord for Chunk {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            // Arbitrary-length integers: longer is larger, then digit-wise.
            (Chunk::Number(a), Chunk::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Chunk::Text(a), Chunk::Text(b)) => a.cmp(b),
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Chunk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Splits `s` into alternating text and number chunks.
///
/// `"z23a"` becomes `[Text("z"), Number("23"), Text("a")]`.
pub fn natural_key(s: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut in_digits = false;

    for c in s.chars() {
        let is_digit = c.is_ascii_digit();
        if is_digit != in_digits && !current.is_empty() {
            chunks.push(make_chunk(std::mem::take(&mut current), in_digits));
        }
        in_digits = is_digit;
        current.push(c);
    }
    if !current.is_empty() {
        chunks.push(make_chunk(current, in_digits));
    }

    chunks
}

fn make_chunk(run: String, digits: bool) -> Chunk {
    if digits {
        Chunk::Number(run.trim_start_matches('0').to_string())
    } else {
        Chunk::Text(run)
    }
}

/// Sorts names the way humans expect.
pub fn sort_naturally<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by_cached_key(|name| natural_key(name.as_ref()));
}

/// Selects the newest `BESAgent-*.pkg` in `directory`.
///
/// Only regular files directly inside `directory` are considered.
///
/// # Errors
///
/// Returns [`Error::Discovery`] when no candidate matches.
pub async fn select_latest(directory: &Path) -> Result<DiscoveredPackage> {
    let mut entries = tokio::fs::read_dir(directory)
        .await
        .fs_context("scanning for packages in", directory)?;

    let mut candidates: Vec<(String, PackageFileName)> = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("scanning for packages in", directory)?
    {
        let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        let Some(parsed) = PackageFileName::parse(&file_name) else {
            continue;
        };
        // Follows symlinks, so a link to a package counts as a file.
        match tokio::fs::metadata(entry.path()).await {
            Ok(metadata) if metadata.is_file() => candidates.push((file_name, parsed)),
            Ok(_) => log::debug!("Skipping non-file entry {}", file_name),
            Err(e) => log::debug!("Skipping unreadable entry {}: {}", file_name, e),
        }
    }

    candidates.sort_by(|a, b| a.0.cmp(&b.0));
    for (file_name, parsed) in &candidates {
        log::info!("Found: {} (version {})", file_name, parsed.version());
    }

    if candidates.len() > 1 {
        log::info!("Found more than one package, choosing latest version.");
        candidates.sort_by_cached_key(|(file_name, _)| natural_key(file_name));
    }

    let (file_name, name) = candidates.pop().ok_or_else(|| Error::Discovery {
        directory: directory.to_path_buf(),
    })?;

    Ok(DiscoveredPackage {
        path: directory.join(file_name),
        name,
    })
}
