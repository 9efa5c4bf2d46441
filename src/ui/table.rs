//! The report table: a [`Card`] holding a two-column ratatui [`Table`].
//!
//! The table is rendered into an off-screen [`Buffer`] sized to its content,
//! then written to the terminal line by line (styled) or as plain text.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use ratatui::{
    backend::IntoCrossterm,
    buffer::Buffer,
    layout::{Constraint, Margin, Rect},
    style::{Color, Modifier},
    text::Span,
    widgets::{Cell, Row, Table, Widget},
};

use crate::report::ReportRow;
use crate::ui::theme::styles;
use crate::ui::widgets::Card;

const HEADER: [&str; 2] = ["Description", "Details"];
const COLUMN_SPACING: u16 = 3;

/// Widget drawing the report rows inside a titled card.
pub struct ReportTable<'a> {
    title: &'a str,
    rows: &'a [ReportRow],
}

impl<'a> ReportTable<'a> {
    pub fn new(title: &'a str, rows: &'a [ReportRow]) -> Self {
        Self { title, rows }
    }

    fn label_width(&self) -> u16 {
        self.rows
            .iter()
            .map(|row| row.label)
            .chain([HEADER[0]])
            .map(text_width)
            .max()
            .unwrap_or(0)
    }

    fn value_width(&self) -> u16 {
        self.rows
            .iter()
            .map(|row| row.value.as_str())
            .chain([HEADER[1]])
            .map(text_width)
            .max()
            .unwrap_or(0)
    }

    /// Width and height needed to show everything without truncation.
    pub fn size(&self) -> (u16, u16) {
        // Border plus one cell of padding on each side
        let content = self.label_width() + COLUMN_SPACING + self.value_width();
        let title = text_width(self.title) + 2;
        let width = content.max(title) + 4;
        // Border, header, one line per row
        let height = self.rows.len() as u16 + 3;
        (width, height)
    }
}

impl Widget for ReportTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_width = self.label_width();

        Card::new(Span::styled(self.title, styles::title())).render(area, buf);
        let inner = Card::inner(area).inner(Margin::new(1, 0));

        let header = Row::new(HEADER).style(styles::header());
        let rows = self.rows.iter().map(|row| {
            let value_style = if row.available {
                styles::value()
            } else {
                styles::unavailable()
            };
            Row::new([
                Cell::from(Span::styled(row.label, styles::label())),
                Cell::from(Span::styled(row.value.as_str(), value_style)),
            ])
        });

        let table = Table::new(rows, [Constraint::Length(label_width), Constraint::Fill(1)])
            .header(header)
            .column_spacing(COLUMN_SPACING);

        Widget::render(table, inner, buf);
    }
}

fn text_width(text: &str) -> u16 {
    text.chars().count().min(u16::MAX as usize) as u16
}

/// Render the table into a buffer, optionally no wider than `max_width`.
pub fn render(title: &str, rows: &[ReportRow], max_width: Option<u16>) -> Buffer {
    let table = ReportTable::new(title, rows);
    let (width, height) = table.size();
    let width = max_width.map_or(width, |max| width.min(max));

    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    table.render(area, &mut buf);
    buf
}

/// Buffer contents as text, one string per line, trailing blanks removed.
pub fn plain_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            let line: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            line.trim_end().to_string()
        })
        .collect()
}

/// Write the buffer with colors and bold, resetting at each line end.
pub fn write_styled(buf: &Buffer, out: &mut impl Write) -> io::Result<()> {
    let area = buf.area;
    for y in area.top()..area.bottom() {
        let mut current: Option<(Color, bool)> = None;
        for x in area.left()..area.right() {
            let cell = &buf[(x, y)];
            let style = (cell.fg, cell.modifier.contains(Modifier::BOLD));
            if current != Some(style) {
                queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
                if style.0 != Color::Reset {
                    queue!(out, SetForegroundColor(style.0.into_crossterm()))?;
                }
                if style.1 {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }
                current = Some(style);
            }
            queue!(out, Print(cell.symbol()))?;
        }
        queue!(out, SetAttribute(Attribute::Reset), ResetColor, Print("\n"))?;
    }
    out.flush()
}
