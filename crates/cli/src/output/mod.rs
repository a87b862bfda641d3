//! Violation output formatting.
//!
//! Text mode streams one line per violation as hooks run; JSON mode
//! collects everything and emits a single report document at the end.

mod json;
mod text;

pub use json::RunReport;
pub use text::TextWriter;

use std::io;

use termcolor::ColorChoice;

use crate::cli::OutputFormat;
use crate::error::ExitCode;
use crate::violation::Violation;

/// Resolve the color choice from the --color/--no-color flags.
pub fn color_choice(force: bool, disable: bool) -> ColorChoice {
    if disable {
        ColorChoice::Never
    } else if force {
        ColorChoice::Always
    } else {
        ColorChoice::Auto
    }
}

/// Sink for violations, shared by every hook.
pub struct Reporter {
    format: OutputFormat,
    text: TextWriter,
    collected: Vec<Violation>,
    count: usize,
}

impl Reporter {
    pub fn new(format: OutputFormat, color: ColorChoice) -> Self {
        Self {
            format,
            text: TextWriter::new(color),
            collected: Vec::new(),
            count: 0,
        }
    }

    /// Report a batch of violations from one file.
    pub fn report(&mut self, violations: &[Violation]) -> io::Result<()> {
        self.count += violations.len();
        match self.format {
            OutputFormat::Text => {
                for v in violations {
                    self.text.write_violation(v)?;
                }
                Ok(())
            }
            OutputFormat::Json => {
                self.collected.extend(violations.iter().cloned());
                Ok(())
            }
        }
    }

    /// Number of violations reported so far.
    pub fn violations_reported(&self) -> usize {
        self.count
    }

    /// Finish the run: JSON mode writes the report document here.
    pub fn finish(self, code: ExitCode) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => Ok(()),
            OutputFormat::Json => {
                json::write_report(io::stdout().lock(), &self.collected, code == ExitCode::Clean)
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
