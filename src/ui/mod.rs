//! Terminal output for the report.

pub mod table;
pub mod theme;
pub mod widgets;

use std::io::{self, IsTerminal, Write};

use crate::report::ReportRow;

/// Print the report to stdout.
///
/// A terminal gets colors and a table no wider than the window; anything
/// else (pipes, files) gets plain text at full width.
pub fn print_report(title: &str, rows: &[ReportRow]) -> io::Result<()> {
    let stdout = io::stdout();
    let styled = stdout.is_terminal();
    let max_width = if styled {
        crossterm::terminal::size().ok().map(|(cols, _)| cols)
    } else {
        None
    };

    let buf = table::render(title, rows, max_width);
    let mut out = stdout.lock();

    if styled {
        table::write_styled(&buf, &mut out)
    } else {
        for line in table::plain_lines(&buf) {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }
}
