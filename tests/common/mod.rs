//! Shared fixtures for integration tests.
//!
//! `FakeTools` stands in for pkgutil/productsign: expand writes a synthetic
//! package tree, flatten writes a text listing of the tree, sign copies the
//! listing and appends a signature line.

#![allow(dead_code)]

use besagent_customizer::customizer::{
    Error, PackageTools, Result, Settings, SettingsBuilder, SigningError,
};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Mutex,
};
use tempfile::TempDir;

pub const DISTRIBUTION: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<installer-gui-script minSpecVersion="1">
    <title>BigFix Agent</title>
    <pkg-ref id="com.bigfix.besagent">
        <relocate search-id="pkmktoken">
            <bundle id="com.bigfix.BESAgent"/>
        </relocate>
    </pkg-ref>
    <pkg-ref id="com.bigfix.besagent" version="10.0.7.52" onConclusion="none">#besagent.pkg</pkg-ref>
    <choices-outline>
        <line choice="default"/>
    </choices-outline>
</installer-gui-script>
"#;

pub const SIGNATURE_LINE: &str = "signature\tDeveloper ID Installer: Company (CODE)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignMode {
    Copy,
    ToolMissing,
}

pub struct FakeTools {
    sign_mode: SignMode,
    fail_flatten: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeTools {
    pub fn new() -> Self {
        Self {
            sign_mode: SignMode::Copy,
            fail_flatten: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_sign_mode(mut self, mode: SignMode) -> Self {
        self.sign_mode = mode;
        self
    }

    pub fn failing_flatten(mut self) -> Self {
        self.fail_flatten = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

impl PackageTools for FakeTools {
    async fn expand(&self, package: &Path, destination: &Path) -> Result<()> {
        self.record(format!("expand {}", file_name(package)));
        if destination.exists() {
            return Err(Error::ToolFailed {
                tool: "pkgutil --expand".into(),
                status: Some(1),
                stderr: format!("{} already exists", destination.display()),
            });
        }

        let scripts = destination.join("besagent.pkg/Scripts");
        std::fs::create_dir_all(&scripts)?;
        std::fs::write(destination.join("Distribution"), DISTRIBUTION)?;
        std::fs::write(scripts.join("postinstall"), "vendor postinstall")?;
        std::fs::write(
            destination.join("besagent.pkg/PackageInfo"),
            std::fs::read(package)?,
        )?;
        Ok(())
    }

    async fn flatten(&self, source: &Path, package: &Path) -> Result<()> {
        self.record(format!("flatten {}", file_name(package)));
        if self.fail_flatten {
            return Err(Error::ToolFailed {
                tool: "pkgutil --flatten".into(),
                status: Some(1),
                stderr: "Could not flatten".into(),
            });
        }

        let mut lines = Vec::new();
        for entry in walkdir::WalkDir::new(source).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(source).unwrap();
            let contents = std::fs::read_to_string(entry.path())?;
            lines.push(format!(
                "{}\t{}",
                relative.to_string_lossy(),
                contents.replace('\n', "\\n")
            ));
        }
        std::fs::write(package, lines.join("\n"))?;
        Ok(())
    }

    async fn sign(
        &self,
        identity: &str,
        unsigned: &Path,
        signed: &Path,
    ) -> std::result::Result<(), SigningError> {
        self.record(format!("sign {}", file_name(unsigned)));
        match self.sign_mode {
            SignMode::Copy => {
                let mut listing = std::fs::read_to_string(unsigned).unwrap();
                listing.push_str(&format!("\nsignature\t{identity}"));
                std::fs::write(signed, listing).unwrap();
                Ok(())
            }
            SignMode::ToolMissing => Err(SigningError::ToolNotFound {
                tool: "productsign".into(),
                identity: identity.into(),
                reason: "productsign not found in PATH".into(),
            }),
        }
    }
}

/// A directory laid out like an operator's working folder.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let workspace = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        let overlay = workspace.overlay_dir();
        std::fs::create_dir_all(&overlay).unwrap();
        std::fs::write(overlay.join("postinstall"), "#!/bin/sh\nsite postinstall\n").unwrap();
        std::fs::write(overlay.join("actionsite.afxm"), "masthead").unwrap();
        std::fs::write(overlay.join("clientsettings.cfg"), "_BESClient_Setting=1\n").unwrap();
        workspace
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn overlay_dir(&self) -> PathBuf {
        self.root().join("ModifiedFiles")
    }

    pub fn staging_root(&self) -> PathBuf {
        self.root().join("ModifiedPackage")
    }

    pub fn add_package(&self, name: &str) -> PathBuf {
        let path = self.root().join(name);
        std::fs::write(&path, format!("vendor payload {name}")).unwrap();
        path
    }

    /// Settings rooted in this workspace, open for further overrides.
    pub fn settings_builder(&self) -> SettingsBuilder {
        SettingsBuilder::new()
            .search_directory(self.root())
            .staging_root(self.staging_root())
            .overlay_directory(self.overlay_dir())
            .work_directory(self.root())
    }

    pub fn settings(&self) -> Settings {
        self.settings_builder().build().unwrap()
    }

    /// Names of the `.pkg` files in `dir`.
    pub fn packages_in(&self, dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".pkg"))
            .collect();
        names.sort();
        names
    }
}

/// Parses a listing written by `FakeTools::flatten` into path -> contents.
pub fn archive_entries(package: &Path) -> BTreeMap<String, String> {
    std::fs::read_to_string(package)
        .unwrap()
        .lines()
        .filter_map(|line| line.split_once('\t'))
        .map(|(path, contents)| (path.to_string(), contents.replace("\\n", "\n")))
        .collect()
}
