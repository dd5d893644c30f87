//! Top-level UI layout — catalog grid with a status bar, detail overlay on top.

pub mod detail_overlay;
pub mod grid_panel;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border())
        .title(" Coindeck — Market Dashboard ")
        .title_style(theme::panel_title());
    let inner = block.inner(main_area);
    f.render_widget(block, main_area);

    grid_panel::render(f, inner, app);
    status_bar::render(f, status_area, app);

    // The detail overlay sits on top while a selection is open.
    if app.selection.is_open() {
        detail_overlay::render(f, main_area, app);
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Price formatting that keeps sub-dollar assets legible.
pub(crate) fn fmt_price(price: f64) -> String {
    if price >= 1.0 {
        format!("{price:.2}")
    } else {
        format!("{price:.6}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_formatting() {
        assert_eq!(fmt_price(64123.456), "64123.46");
        assert_eq!(fmt_price(0.00012345), "0.000123");
    }
}
