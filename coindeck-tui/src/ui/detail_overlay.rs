//! Detail overlay — price chart, trend forecast, and per-asset stats.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use coindeck_core::forecast::ForecastResult;
use coindeck_core::market::{AssetSnapshot, PriceSample};

use crate::app::{AppState, Selection};
use crate::theme;
use crate::ui::{centered_rect, fmt_price};

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let title = match &app.selection {
        Selection::None => return,
        Selection::Loading { asset } | Selection::Ready { asset, .. } | Selection::Failed { asset } => {
            format!(" {} — Trend Analysis [Esc]close ", asset.name)
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(title)
        .title_style(theme::accent_bold());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    match &app.selection {
        Selection::Loading { .. } => {
            let text = vec![
                Line::from(""),
                Line::from(Span::styled("Analyzing market trend...", theme::warning())),
            ];
            f.render_widget(Paragraph::new(text), inner);
        }
        Selection::Failed { asset } => {
            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled("Analysis unavailable.", theme::muted())),
                Line::from(""),
            ];
            stat_lines(&mut lines, asset, app);
            f.render_widget(Paragraph::new(lines), inner);
        }
        Selection::Ready {
            asset,
            series,
            forecast,
        } => render_ready(f, inner, app, asset, series, forecast),
        Selection::None => {}
    }
}

fn render_ready(
    f: &mut Frame,
    area: Rect,
    app: &AppState,
    asset: &AssetSnapshot,
    series: &[PriceSample],
    forecast: &ForecastResult,
) {
    // Forecast header + chart + stats.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(6),
        ])
        .split(area);

    render_forecast_header(f, chunks[0], app, forecast);
    render_chart(f, chunks[1], series);

    let mut lines = Vec::new();
    stat_lines(&mut lines, asset, app);
    f.render_widget(Paragraph::new(lines), chunks[2]);
}

fn render_forecast_header(f: &mut Frame, area: Rect, app: &AppState, forecast: &ForecastResult) {
    let arrow = if forecast.slope >= 0.0 { "▲" } else { "▼" };
    let quote = app.config.quote_currency.to_uppercase();
    let lines = vec![
        Line::from(vec![
            Span::styled("Trend forecast (next period): ", theme::muted()),
            Span::styled(
                format!("{} {}", fmt_price(forecast.estimate), quote),
                theme::accent_bold(),
            ),
            Span::raw("  "),
            Span::styled(arrow, theme::change_color(forecast.slope)),
        ]),
        Line::from(Span::styled(
            format!(
                "Least-squares fit over the last {} days of daily closes.",
                app.config.lookback_days
            ),
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_chart(f: &mut Frame, area: Rect, series: &[PriceSample]) {
    let data: Vec<(f64, f64)> = series
        .iter()
        .map(|s| (s.index as f64, s.price))
        .collect();

    let min_y = data.iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
    let max_y = data
        .iter()
        .map(|(_, y)| *y)
        .fold(f64::NEG_INFINITY, f64::max);
    let padding = (max_y - min_y).abs() * 0.05;
    let y_min = min_y - padding;
    let y_max = max_y + padding;
    let x_max = data.len().saturating_sub(1) as f64;

    let first_date = series.first().map(|s| s.date.format("%m-%d").to_string());
    let last_date = series.last().map(|s| s.date.format("%m-%d").to_string());

    let dataset = Dataset::default()
        .name("price")
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::ACCENT))
        .graph_type(GraphType::Line)
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(first_date.unwrap_or_default(), theme::muted()),
                    Span::styled(last_date.unwrap_or_default(), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(fmt_price(y_min), theme::muted()),
                    Span::styled(fmt_price(y_max), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

fn stat_lines(lines: &mut Vec<Line<'_>>, asset: &AssetSnapshot, app: &AppState) {
    let quote = app.config.quote_currency.to_uppercase();
    stat_line(lines, "Market Cap Rank", format!("#{}", asset.market_cap_rank));
    stat_line(
        lines,
        "Market Cap",
        format!("{:.2}B {quote}", asset.market_cap / 1e9),
    );
    stat_line(lines, "24h High", opt_price(asset.high_24h));
    stat_line(lines, "24h Low", opt_price(asset.low_24h));
    stat_line(
        lines,
        "24h Change",
        format!("{:+.2}%", asset.price_change_percentage_24h),
    );
}

fn stat_line(lines: &mut Vec<Line<'_>>, label: &str, value: String) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {label:>16}: "), theme::muted()),
        Span::styled(value, theme::accent()),
    ]));
}

fn opt_price(value: Option<f64>) -> String {
    match value {
        Some(v) => fmt_price(v),
        None => "—".to_string(),
    }
}
