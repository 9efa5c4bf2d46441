//! Appending reports to a log file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::report::ReportRow;
use crate::ui::table;

/// Append the plain-text table to `path`, preceded by a timestamp line.
pub fn append_report(path: &Path, title: &str, rows: &[ReportRow]) -> Result<()> {
    let buf = table::render(title, rows, None);

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "# {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    for line in table::plain_lines(&buf) {
        writeln!(file, "{}", line)?;
    }
    writeln!(file)?;

    Ok(())
}
