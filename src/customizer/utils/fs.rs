//! File system utilities for package customization.
//!
//! Idempotent directory helpers plus a symlink-preserving tree copy used to
//! duplicate expanded packages.

use crate::{
    bail,
    customizer::{Error, Result, error::ErrorExt},
};
use std::{io, path::Path};
use tokio::fs;

/// Creates `path` and any missing parents. Existing directories are fine.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes a directory tree; a missing tree is not an error.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Err(e) if e.kind() != io::ErrorKind::NotFound => {
            Err(e).fs_context("removing directory", path)
        }
        _ => Ok(()),
    }
}

/// Removes a file; a missing file is not an error.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e).fs_context("removing file", path),
        _ => Ok(()),
    }
}

/// Writes `contents` to `path`, creating parent directories as needed.
pub async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent).await?;
    }
    fs::write(path, contents).await.fs_context("writing file", path)
}

/// Recreates the symlink `original` at `link`, pointing at the same target.
#[cfg(unix)]
fn copy_symlink(original: &Path, link: &Path) -> Result<()> {
    let target = std::fs::read_link(original).fs_context("reading symlink", original)?;
    std::os::unix::fs::symlink(&target, link).fs_context("creating symlink", link)
}

#[cfg(windows)]
fn copy_symlink(original: &Path, link: &Path) -> Result<()> {
    let target = std::fs::read_link(original).fs_context("reading symlink", original)?;
    let linked = if original.is_dir() {
        std::os::windows::fs::symlink_dir(&target, link)
    } else {
        std::os::windows::fs::symlink_file(&target, link)
    };
    linked.fs_context("creating symlink", link)
}

/// Duplicates the tree at `from` into the new directory `to`.
///
/// Symlinks are recreated rather than followed, and file permissions carry
/// over with the copy. `to` must not exist yet.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        bail!("{} is not a directory", from.display());
    }
    if fs::symlink_metadata(to).await.is_ok() {
        bail!("{} already exists", to.display());
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    // walkdir is blocking
    tokio::task::spawn_blocking(move || -> Result<()> {
        for entry in walkdir::WalkDir::new(&from) {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(&from)
                .map_err(|e| Error::GenericError(e.to_string()))?;
            let target = to.join(relative);

            let file_type = entry.file_type();
            if file_type.is_symlink() {
                copy_symlink(entry.path(), &target)?;
            } else if file_type.is_dir() {
                std::fs::create_dir_all(&target).fs_context("creating directory", &target)?;
            } else {
                std::fs::copy(entry.path(), &target).fs_context("copying file", entry.path())?;
            }
        }
        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("directory copy task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn copy_dir_duplicates_tree() {
        let root = tempfile::tempdir().unwrap();
        let src = root.path().join("src");
        std::fs::create_dir_all(src.join("besagent.pkg/Scripts")).unwrap();
        std::fs::write(src.join("Distribution"), "<x/>").unwrap();
        std::fs::write(src.join("besagent.pkg/Scripts/postinstall"), "#!/bin/sh").unwrap();
        #[cfg(unix)]
        std::os::unix::fs::symlink("postinstall", src.join("besagent.pkg/Scripts/link")).unwrap();

        let dst = root.path().join("dst");
        copy_dir(&src, &dst).await.unwrap();

        assert_eq!(std::fs::read_to_string(dst.join("Distribution")).unwrap(), "<x/>");
        assert!(dst.join("besagent.pkg/Scripts/postinstall").is_file());
        #[cfg(unix)]
        assert_eq!(
            std::fs::read_link(dst.join("besagent.pkg/Scripts/link")).unwrap(),
            Path::new("postinstall")
        );
    }

    #[tokio::test]
    async fn copy_dir_refuses_existing_destination() {
        let root = tempfile::tempdir().unwrap();
        let err = copy_dir(root.path(), root.path()).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn removals_are_idempotent() {
        let root = tempfile::tempdir().unwrap();
        remove_dir_all(&root.path().join("absent")).await.unwrap();
        remove_file(&root.path().join("absent.pkg")).await.unwrap();

        let dir = root.path().join("stale");
        create_dir_all(&dir.join("nested")).await.unwrap();
        create_dir_all(&dir).await.unwrap();
        remove_dir_all(&dir).await.unwrap();
        assert!(!dir.exists());
    }
}
