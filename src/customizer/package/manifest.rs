//! Distribution manifest editing.
//!
//! Removes every top-level `pkg-ref` that carries a `relocate` child, which
//! forces the installer to place the agent at its fixed location.
//!
//! The document is streamed through an XML event reader. Top-level `pkg-ref`
//! subtrees are buffered whole and only written out once it is known they do
//! not offer relocation; everything else passes through untouched, except a
//! `<!DOCTYPE>` declaration, which the event reader does not hand back and is
//! therefore dropped. Installer manifests do not carry one.

use crate::customizer::{Error, Result, error::ErrorExt};
use std::{io::Write, path::Path};
use xml::{
    EmitterConfig,
    reader::{EventReader, ParserConfig, XmlEvent},
    writer::EventWriter,
};

const PKG_REF: &str = "pkg-ref";
const RELOCATE: &str = "relocate";

/// A top-level `pkg-ref` held back until its end tag is seen.
#[derive(Default)]
struct BufferedRef {
    events: Vec<XmlEvent>,
    relocatable: bool,
}

/// Strips relocatable package references from the manifest at `manifest_path`.
///
/// The rewritten document replaces the original through a rename, so a crash
/// never leaves a half-written manifest behind. Returns how many `pkg-ref`
/// elements were removed; running again on the result removes none.
///
/// # Errors
///
/// Returns [`Error::Manifest`] naming the path when the document cannot be
/// parsed, and [`Error::Fs`] when it cannot be read or replaced.
pub async fn strip_relocation(manifest_path: &Path) -> Result<usize> {
    let original = tokio::fs::read(manifest_path)
        .await
        .fs_context("reading distribution manifest", manifest_path)?;

    let (stripped, removed) = strip_relocation_from(&original).map_err(|reason| Error::Manifest {
        path: manifest_path.to_path_buf(),
        reason,
    })?;

    let mut staged = manifest_path.as_os_str().to_owned();
    staged.push(".tmp");
    let staged = std::path::PathBuf::from(staged);

    tokio::fs::write(&staged, &stripped)
        .await
        .fs_context("writing distribution manifest", &staged)?;
    tokio::fs::rename(&staged, manifest_path)
        .await
        .fs_context("replacing distribution manifest", manifest_path)?;

    if removed > 0 {
        log::info!(
            "Removed {} relocatable {} element(s) from {}",
            removed,
            PKG_REF,
            manifest_path.display()
        );
    } else {
        log::debug!("No relocatable {} elements in {}", PKG_REF, manifest_path.display());
    }

    Ok(removed)
}

/// Strips relocatable package references from an in-memory document.
///
/// Returns the rewritten document and the number of removed elements.
pub fn strip_relocation_from(document: &[u8]) -> std::result::Result<(Vec<u8>, usize), String> {
    let config = ParserConfig::new()
        .trim_whitespace(false)
        .whitespace_to_characters(false)
        .cdata_to_characters(false)
        .ignore_comments(false)
        .coalesce_characters(false);
    let reader = EventReader::new_with_config(document, config);

    let mut writer = EmitterConfig::new()
        .perform_indent(false)
        .write_document_declaration(true)
        .autopad_comments(false)
        .create_writer(Vec::with_capacity(document.len()));

    let mut depth = 0usize;
    let mut pending: Option<BufferedRef> = None;
    let mut removed = 0usize;
    let mut saw_root = false;

    for event in reader {
        let event = event.map_err(|e| e.to_string())?;

        let closes_ref = match &event {
            XmlEvent::StartElement { name, .. } => {
                depth += 1;
                saw_root = true;
                if depth == 2 && name.local_name == PKG_REF {
                    pending = Some(BufferedRef::default());
                } else if depth == 3 && name.local_name == RELOCATE {
                    if let Some(buffered) = pending.as_mut() {
                        buffered.relocatable = true;
                    }
                }
                false
            }
            XmlEvent::EndElement { .. } => {
                depth = depth.saturating_sub(1);
                depth == 1 && pending.is_some()
            }
            XmlEvent::EndDocument => break,
            _ => false,
        };

        match pending.as_mut() {
            Some(buffered) => buffered.events.push(event),
            None => emit(&mut writer, &event)?,
        }

        if closes_ref {
            if let Some(buffered) = pending.take() {
                if buffered.relocatable {
                    removed += 1;
                } else {
                    for event in &buffered.events {
                        emit(&mut writer, event)?;
                    }
                }
            }
        }
    }

    if !saw_root {
        return Err("document has no root element".to_string());
    }

    Ok((writer.into_inner(), removed))
}

fn emit<W: Write>(writer: &mut EventWriter<W>, event: &XmlEvent) -> std::result::Result<(), String> {
    if let Some(event) = event.as_writer_event() {
        writer.write(event).map_err(|e| e.to_string())?;
    }
    Ok(())
}
