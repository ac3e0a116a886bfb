//! Subcommand implementations.

use std::io::Write;

use crate::error::ClientResult;

pub mod config;
pub mod holidays;

/// Writes `text` and a newline to stdout. A closed stdout is an IO error.
pub(crate) fn emit(text: &str) -> ClientResult<()> {
    emit_to(&mut std::io::stdout().lock(), text)
}

fn emit_to(out: &mut impl Write, text: &str) -> ClientResult<()> {
    writeln!(out, "{}", text)?;
    out.flush()?;
    Ok(())
}
