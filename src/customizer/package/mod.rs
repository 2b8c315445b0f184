//! Operations on the vendor package and its expanded tree.
//!
//! - [`name`] - file name grammar and derived folder names
//! - [`discovery`] - picking the newest package from a directory
//! - [`manifest`] - stripping relocatable references from `Distribution`
//! - [`overlay`] - copying override files into the package scripts

pub mod discovery;
pub mod manifest;
pub mod name;
pub mod overlay;

pub use discovery::{DiscoveredPackage, select_latest, sort_naturally};
pub use manifest::strip_relocation;
pub use name::{AgentVersion, PackageFileName};
pub use overlay::apply_overlay;
