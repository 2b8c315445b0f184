//! Styled terminal output for operators.

use console::style;
use std::io::{self, Write};

/// Writes progress, results and problems to the terminal.
///
/// Quiet mode keeps warnings and errors only; verbose mode adds detail lines.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Whether detail lines are printed.
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Prints a section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "{}", style(title).bold().cyan())
    }

    /// Prints a progress line.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "{} {}", style("→").blue(), message)
    }

    /// Prints an indented detail line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "    {}", message)
    }

    /// Prints a detail line in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.is_verbose() {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "    {}", style(message).dim())
    }

    /// Prints a success line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "{} {}", style("✓").green().bold(), message)
    }

    /// Prints a warning to stderr.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        writeln!(
            io::stderr().lock(),
            "{} {}",
            style("warning:").yellow().bold(),
            message
        )
    }

    /// Prints an error to stderr. Never suppressed.
    pub fn error(&self, message: &str) -> io::Result<()> {
        writeln!(
            io::stderr().lock(),
            "{} {}",
            style("error:").red().bold(),
            message
        )
    }
}
