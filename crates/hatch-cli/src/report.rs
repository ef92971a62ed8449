//! Failure diagnostics printed before hatch-su exits.

use std::io::{self, Write};

use colored::Colorize;

use hatch_runtime::Rejection;

/// Prints the one-line diagnostic for a refused invocation to stdout.
///
/// Write errors are ignored: a caller that closed stdout still gets the
/// failure status.
pub fn failure(rejection: &Rejection) {
    let mut out = io::stdout().lock();
    let _ = writeln!(out, "{}", render(rejection));
    let _ = out.flush();
}

fn render(rejection: &Rejection) -> String {
    format!("{} hatch-su: {}", "✗".red().bold(), rejection)
}
