use crate::output::{
    failure_line, reversing_line, scanning_line, summary_line, write_line, FAILURE_MARKER,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::{self, Write};

struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }
}

fn without_color<T>(f: impl FnOnce() -> T) -> T {
    colored::control::set_override(false);
    let result = f();
    colored::control::unset_override();
    result
}

#[rstest]
#[case(0, "Great Scott! No migrations to reverse!")]
#[case(1, "I have reversed migrations for 1 app!")]
#[case(3, "I have reversed migrations for 3 apps!")]
fn test_summary_line(#[case] reversed: usize, #[case] expected: &str) {
    assert_eq!(summary_line(reversed), expected);
}

#[test]
fn test_failure_line_has_single_marker() {
    let line = failure_line(&"Django not found, won't reverse any migrations 🤷");

    assert!(line.starts_with(FAILURE_MARKER));
    assert_eq!(line.matches(FAILURE_MARKER).count(), 1);
    assert!(!line.contains('\n'));
}

#[test]
fn test_progress_lines() {
    let (scanning, reversing) =
        without_color(|| (scanning_line("feature/x"), reversing_line("blog", "0002")));

    assert_eq!(scanning, "👀 Looking for migrations to reverse on feature/x...");
    assert_eq!(reversing, "⚠️ reversing migrations for blog (up to 0002)");
}

#[rstest]
#[case(false, "git hooks installed!\n")]
#[case(true, "\x1b[1A\x1b[2Kgit hooks installed!\n")]
fn test_write_line_clears_only_when_asked(#[case] clear: bool, #[case] expected: &str) {
    let mut out = Vec::new();

    write_line(&mut out, "git hooks installed!", clear).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[rstest]
#[case(false)]
#[case(true)]
fn test_write_line_reports_closed_pipe_instead_of_panicking(#[case] clear: bool) {
    let error = write_line(&mut ClosedPipe, "Installing git hooks...", clear).unwrap_err();

    assert_eq!(error.kind(), io::ErrorKind::BrokenPipe);
}
