//! Text output formatter.
//!
//! One line per violation:
//! ```text
//! <file>:<line>:<column>: <message>
//!     <suggestion, when present>
//! ```
//! File-level violations omit the position segments.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::violation::Violation;

/// Streaming text writer with color support.
pub struct TextWriter {
    stdout: StandardStream,
}

impl TextWriter {
    pub fn new(color: ColorChoice) -> Self {
        Self {
            stdout: StandardStream::stdout(color),
        }
    }

    /// Write a single violation line (plus indented suggestion).
    pub fn write_violation(&mut self, v: &Violation) -> std::io::Result<()> {
        write_violation_to(&mut self.stdout, v)
    }
}

/// Core formatting, generic over the sink so tests can capture it.
pub fn write_violation_to(out: &mut impl WriteColor, v: &Violation) -> std::io::Result<()> {
    out.set_color(&path_color())?;
    write!(out, "{}", v.file.display())?;
    out.reset()?;

    if let Some(line) = v.line {
        write!(out, ":")?;
        out.set_color(&line_color())?;
        write!(out, "{line}")?;
        out.reset()?;

        if let Some(column) = v.column {
            write!(out, ":{column}")?;
        }
    }
    writeln!(out, ": {}", v.message)?;

    if let Some(ref suggestion) = v.suggestion {
        for line in suggestion.lines() {
            writeln!(out, "    {line}")?;
        }
    }

    Ok(())
}

fn path_color() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Cyan));
    spec
}

fn line_color() -> ColorSpec {
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(Color::Yellow));
    spec
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
