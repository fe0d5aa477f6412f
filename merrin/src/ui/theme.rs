//! Shared UI theme constants.

use ratatui::style::{Color, Modifier, Style};

/// Values start at this column; labels are padded to it.
pub const VALUE_COL: usize = 17;

pub const UNAVAILABLE: &str = "Unavailable";

pub fn label() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

// terminal default colors
pub fn normal() -> Style {
    Style::default()
}

pub fn warning() -> Style {
    Style::default().fg(Color::Red)
}

pub fn hint() -> Style {
    Style::default().fg(Color::DarkGray)
}
