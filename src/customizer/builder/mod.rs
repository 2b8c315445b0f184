//! Build orchestration and signing.
//!
//! - [`checksum`] - SHA-256 of the finished package
//! - [`orchestrator`] - the [`Customizer`] pipeline
//! - [`signing`] - in-place package signing

mod checksum;
mod orchestrator;
mod signing;

pub use checksum::calculate_sha256;
pub use orchestrator::{BRAND_MARKER, Customizer, DISTRIBUTION_FILE, SourcePackage};
pub use signing::{Signer, unsigned_path};
