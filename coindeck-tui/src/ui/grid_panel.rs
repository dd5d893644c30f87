//! Catalog grid — search header, asset rows with favorite stars and 24h change.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, CatalogState};
use crate::theme;
use crate::ui::fmt_price;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    // Search header.
    let watchlist_label = if app.query.watchlist_only { "★ ON" } else { "☆ off" };
    lines.push(Line::from(vec![
        Span::styled("Search: ", theme::muted()),
        Span::styled(app.query.text.as_str(), theme::accent_bold()),
        Span::styled("_", theme::accent()),
        Span::styled("   Watchlist only: ", theme::muted()),
        Span::styled(watchlist_label, theme::star()),
        Span::styled(
            format!("   ({} favorited)", app.watchlist.len()),
            theme::muted(),
        ),
    ]));
    lines.push(Line::from(""));

    match &app.catalog {
        CatalogState::Loading => {
            lines.push(Line::from(Span::styled(
                "Loading market data...",
                theme::warning(),
            )));
        }
        CatalogState::Failed(_) => {
            lines.push(Line::from(Span::styled(
                "Market data unavailable. The catalog could not be loaded this session.",
                theme::negative(),
            )));
        }
        CatalogState::Ready(_) => {
            render_rows(&mut lines, area, app);
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_rows(lines: &mut Vec<Line>, area: Rect, app: &AppState) {
    let visible = app.visible_assets();
    if visible.is_empty() {
        lines.push(Line::from(Span::styled("No assets match.", theme::muted())));
        return;
    }

    // Keep the cursor row inside the viewport (2 header lines already used).
    let viewport = (area.height as usize).saturating_sub(2).max(1);
    let start = app.cursor.saturating_sub(viewport.saturating_sub(1));
    let end = (start + viewport).min(visible.len());

    for (i, asset) in visible.iter().enumerate().take(end).skip(start) {
        let is_cursor = i == app.cursor;
        let is_fav = app.watchlist.contains(&asset.id);

        let star = if is_fav { "★ " } else { "  " };
        let change = asset.price_change_percentage_24h;
        let arrow = if change >= 0.0 { "▲" } else { "▼" };

        let name_style = if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            theme::accent()
        };

        lines.push(Line::from(vec![
            Span::styled(star, theme::star()),
            Span::styled(format!("#{:<4}", asset.market_cap_rank), theme::muted()),
            Span::styled(
                format!("{:<24}", truncate(&asset.name, 24)),
                name_style,
            ),
            Span::styled(
                format!("{:<6}", asset.symbol.to_uppercase()),
                theme::muted(),
            ),
            Span::styled(format!("{:>14}  ", fmt_price(asset.current_price)), name_style),
            Span::styled(
                format!("{arrow} {:.2}%", change.abs()),
                theme::change_color(change),
            ),
        ]));
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
