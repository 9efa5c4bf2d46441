//! Card widget with rounded corners.
//!
//! Draws a box with rounded corners (╭╮╰╯) and an optional title in the
//! top border. Content is rendered separately into [`Card::inner`].

use ratatui::{
    buffer::Buffer,
    layout::{Margin, Rect},
    style::Style,
    text::Span,
    widgets::Widget,
};

use crate::ui::theme::{borders, styles};

/// A card widget with rounded corners.
pub struct Card<'a> {
    /// Title displayed in the top border.
    title: Option<Span<'a>>,
    /// Border style.
    border_style: Style,
}

impl<'a> Card<'a> {
    /// Create a simple card with a title.
    pub fn new(title: impl Into<Span<'a>>) -> Self {
        Self {
            title: Some(title.into()),
            border_style: styles::border(),
        }
    }

    /// Area left for content inside the border.
    pub fn inner(area: Rect) -> Rect {
        area.inner(Margin::new(1, 1))
    }
}

impl Widget for Card<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 2 || area.height < 2 {
            return;
        }

        let border_style = self.border_style;
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;

        // Corners
        buf.set_string(area.x, area.y, borders::TOP_LEFT, border_style);
        buf.set_string(right, area.y, borders::TOP_RIGHT, border_style);
        buf.set_string(area.x, bottom, borders::BOTTOM_LEFT, border_style);
        buf.set_string(right, bottom, borders::BOTTOM_RIGHT, border_style);

        for x in (area.x + 1)..right {
            buf.set_string(x, area.y, borders::HORIZONTAL, border_style);
            buf.set_string(x, bottom, borders::HORIZONTAL, border_style);
        }

        for y in (area.y + 1)..bottom {
            buf.set_string(area.x, y, borders::VERTICAL, border_style);
            buf.set_string(right, y, borders::VERTICAL, border_style);
        }

        if let Some(title) = self.title {
            let title_str = format!(" {} ", title.content);
            let title_width = title_str.chars().count() as u16;

            // Leave at least one border cell on each side of the title.
            if title_width + 2 <= area.width {
                buf.set_string(area.x + 1, area.y, &title_str, title.style);
            }
        }
    }
}
