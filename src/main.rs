//! BESAgent Customizer - builds branded, signed BESAgent installers.
//!
//! This binary expands the vendor package, applies site customizations and
//! writes a finished installer, exiting non-zero with a diagnostic on failure.

use besagent_customizer::cli;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging; build steps are reported at info level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            let output = cli::OutputManager::new(false, false);
            let _ = output.error(&e.to_string());
            for suggestion in e.recovery_suggestions() {
                let _ = output.indent(&suggestion);
            }
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
