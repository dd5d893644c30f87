//! Style tokens — neon accents on a dark terminal background.

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(59, 130, 246);
const POSITIVE: Color = Color::Rgb(52, 211, 153);
const NEGATIVE: Color = Color::Rgb(251, 113, 133);
const WARNING: Color = Color::Rgb(250, 204, 21);
const MUTED: Color = Color::Rgb(100, 116, 139);
const GOLD: Color = Color::Rgb(234, 179, 8);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn star() -> Style {
    Style::default().fg(GOLD)
}

pub fn panel_border() -> Style {
    Style::default().fg(MUTED)
}

pub fn panel_title() -> Style {
    accent_bold()
}

/// Green for gains, pink for losses.
pub fn change_color(pct: f64) -> Style {
    if pct >= 0.0 {
        positive()
    } else {
        negative()
    }
}
