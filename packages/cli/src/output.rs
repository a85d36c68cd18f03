// ABOUTME: User-facing terminal output for great-scott commands
// ABOUTME: Progress lines, transient line replacement and the single failure line format

use colored::*;
use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

/// Prefix of the one line printed when a command fails
pub const FAILURE_MARKER: &str = "☠️";

/// Moves the cursor up one line and clears it
const CLEAR_PREVIOUS_LINE: &str = "\x1b[1A\x1b[2K";

/// Progress output never aborts a command; a closed stdout (e.g. inside a hook) is ignored
pub fn info(message: impl Display) {
    let _ = write_line(&mut io::stdout().lock(), message, false);
}

/// Overwrite the previous status line when stdout is a terminal, otherwise just print
pub fn replace_line(message: impl Display) {
    let mut stdout = io::stdout().lock();
    let clear = stdout.is_terminal();
    let _ = write_line(&mut stdout, message, clear);
}

pub(crate) fn write_line(
    out: &mut impl Write,
    message: impl Display,
    clear_previous: bool,
) -> io::Result<()> {
    if clear_previous {
        write!(out, "{}", CLEAR_PREVIOUS_LINE)?;
    }
    writeln!(out, "{}", message)?;
    out.flush()
}

pub fn failure_line(error: &impl Display) -> String {
    format!("{} {}", FAILURE_MARKER, error)
}

pub fn fail(error: &impl Display) {
    eprintln!("{}", failure_line(error).red());
}

pub fn scanning_line(branch: &str) -> String {
    format!(
        "👀 Looking for migrations to reverse on {}...",
        branch.underline()
    )
}

pub fn reversing_line(app: &str, target: &str) -> String {
    format!("⚠️ reversing migrations for {} (up to {})", app.bold(), target)
}

/// Closing line of a reversal run
pub fn summary_line(reversed: usize) -> String {
    match reversed {
        0 => "Great Scott! No migrations to reverse!".to_string(),
        1 => "I have reversed migrations for 1 app!".to_string(),
        n => format!("I have reversed migrations for {} apps!", n),
    }
}
