//! Payload overlay.
//!
//! Copies the curated override files into the expanded package's scripts
//! directory. The client settings file is only copied on request.

use crate::customizer::{Error, Result, error::ErrorExt};
use std::path::Path;

/// Copies the regular files directly inside `overlay_dir` into `dest_dir`.
///
/// The file named `settings_file_name` is skipped unless `include_settings`
/// is set. Existing files are overwritten; content and permissions follow the
/// source. Returns the copied file names in sorted order.
///
/// # Errors
///
/// Returns [`Error::OverlayMissing`] when `overlay_dir` is not a directory.
pub async fn apply_overlay(
    overlay_dir: &Path,
    dest_dir: &Path,
    include_settings: bool,
    settings_file_name: &str,
) -> Result<Vec<String>> {
    if !overlay_dir.is_dir() {
        return Err(Error::OverlayMissing(overlay_dir.to_path_buf()));
    }

    let mut entries = tokio::fs::read_dir(overlay_dir)
        .await
        .fs_context("reading overlay directory", overlay_dir)?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("reading overlay directory", overlay_dir)?
    {
        let metadata = tokio::fs::metadata(entry.path())
            .await
            .fs_context("inspecting overlay file", entry.path())?;
        if metadata.is_file() {
            files.push(entry.file_name());
        }
    }
    files.sort();

    tokio::fs::create_dir_all(dest_dir)
        .await
        .fs_context("creating scripts directory", dest_dir)?;

    let mut copied = Vec::with_capacity(files.len());
    for file_name in files {
        let display_name = file_name.to_string_lossy().into_owned();
        if file_name == settings_file_name && !include_settings {
            log::debug!("Skipping {} (settings not requested)", display_name);
            continue;
        }

        let source = overlay_dir.join(&file_name);
        let destination = dest_dir.join(&file_name);
        tokio::fs::copy(&source, &destination)
            .await
            .fs_context("copying overlay file", &source)?;

        log::info!("    Copying: {}", display_name);
        copied.push(display_name);
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SETTINGS: &str = "clientsettings.cfg";

    fn overlay_fixture() -> (tempfile::TempDir, tempfile::TempDir) {
        let overlay = tempfile::tempdir().unwrap();
        fs::write(overlay.path().join("postinstall"), "#!/bin/sh\n").unwrap();
        fs::write(overlay.path().join("actionsite.afxm"), "masthead").unwrap();
        fs::write(overlay.path().join(SETTINGS), "_BESClient_Setting=1\n").unwrap();
        fs::create_dir(overlay.path().join("nested")).unwrap();
        fs::write(overlay.path().join("nested/ignored"), "x").unwrap();

        let dest = tempfile::tempdir().unwrap();
        (overlay, dest)
    }

    #[tokio::test]
    async fn settings_file_skipped_without_flag() {
        let (overlay, dest) = overlay_fixture();

        let copied = apply_overlay(overlay.path(), dest.path(), false, SETTINGS)
            .await
            .unwrap();

        assert_eq!(copied, vec!["actionsite.afxm", "postinstall"]);
        assert!(!dest.path().join(SETTINGS).exists());
        assert!(!dest.path().join("nested").exists());
    }

    #[tokio::test]
    async fn settings_file_copied_with_flag() {
        let (overlay, dest) = overlay_fixture();

        let copied = apply_overlay(overlay.path(), dest.path(), true, SETTINGS)
            .await
            .unwrap();

        assert_eq!(copied.len(), 3);
        assert_eq!(
            fs::read_to_string(dest.path().join(SETTINGS)).unwrap(),
            "_BESClient_Setting=1\n"
        );
    }

    #[tokio::test]
    async fn overwrites_existing_files() {
        let (overlay, dest) = overlay_fixture();
        fs::write(dest.path().join("postinstall"), "vendor script").unwrap();

        apply_overlay(overlay.path(), dest.path(), false, SETTINGS)
            .await
            .unwrap();

        assert_eq!(
            fs::read_to_string(dest.path().join("postinstall")).unwrap(),
            "#!/bin/sh\n"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn preserves_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (overlay, dest) = overlay_fixture();
        let script = overlay.path().join("postinstall");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        apply_overlay(overlay.path(), dest.path(), false, SETTINGS)
            .await
            .unwrap();

        let mode = fs::metadata(dest.path().join("postinstall"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[tokio::test]
    async fn missing_overlay_directory_is_an_error() {
        let dest = tempfile::tempdir().unwrap();
        let err = apply_overlay(&dest.path().join("absent"), dest.path(), false, SETTINGS)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::OverlayMissing(_)));
    }
}
