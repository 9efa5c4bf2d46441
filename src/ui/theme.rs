//! Centralized theme definitions for the report table.

/// Border character set for rounded boxes.
pub mod borders {
    pub const TOP_LEFT: &str = "\u{256d}"; // ╭
    pub const TOP_RIGHT: &str = "\u{256e}"; // ╮
    pub const BOTTOM_LEFT: &str = "\u{2570}"; // ╰
    pub const BOTTOM_RIGHT: &str = "\u{256f}"; // ╯
    pub const HORIZONTAL: &str = "\u{2500}"; // ─
    pub const VERTICAL: &str = "\u{2502}"; // │
}

/// Color palette for the application.
pub mod colors {
    use ratatui::style::Color;

    /// Default border color.
    pub const BORDER_DEFAULT: Color = Color::Blue;

    /// Secondary/muted text color.
    pub const TEXT_SECONDARY: Color = Color::DarkGray;

    /// Label column color.
    pub const LABEL: Color = Color::Green;
    /// Value column color.
    pub const VALUE: Color = Color::Yellow;
    /// Error color.
    pub const ERROR: Color = Color::Red;
    /// Accent color (title).
    pub const ACCENT: Color = Color::Cyan;
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::colors;
    use ratatui::style::{Modifier, Style};

    /// Style for the table title.
    pub fn title() -> Style {
        Style::default()
            .fg(colors::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the card border.
    pub fn border() -> Style {
        Style::default().fg(colors::BORDER_DEFAULT)
    }

    /// Style for the column header row.
    pub fn header() -> Style {
        Style::default()
            .fg(colors::TEXT_SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn label() -> Style {
        Style::default()
            .fg(colors::LABEL)
            .add_modifier(Modifier::BOLD)
    }

    pub fn value() -> Style {
        Style::default().fg(colors::VALUE)
    }

    /// Style for values of failed lookups.
    pub fn unavailable() -> Style {
        Style::default().fg(colors::ERROR)
    }
}
