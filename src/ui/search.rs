//! Search bar with the unit indicator

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::TemperatureUnit;

/// Renders the city input box and the °C/°F indicator
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(13)])
        .split(area);

    let border_color = if app.is_loading() {
        Color::Yellow
    } else {
        Color::Cyan
    };
    let input_block = Block::default()
        .title(" City ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let input_line = if app.input.is_empty() {
        Line::from(Span::styled(
            "e.g. Lisbon",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(app.input.as_str())
    };
    frame.render_widget(Paragraph::new(input_line).block(input_block), chunks[0]);

    if !app.show_help {
        let width = u16::try_from(app.input.chars().count()).unwrap_or(u16::MAX);
        let max_x = chunks[0]
            .x
            .saturating_add(chunks[0].width.saturating_sub(2));
        let cursor_x = chunks[0].x.saturating_add(1).saturating_add(width).min(max_x);
        frame.set_cursor_position((cursor_x, chunks[0].y.saturating_add(1)));
    }

    let unit_block = Block::default()
        .title(" Tab ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(
        Paragraph::new(unit_indicator(app.unit)).block(unit_block),
        chunks[1],
    );
}

/// `°C | °F` with the active unit highlighted
fn unit_indicator(active: TemperatureUnit) -> Line<'static> {
    let style_for = |unit: TemperatureUnit| {
        if unit == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    Line::from(vec![
        Span::raw(" "),
        Span::styled(
            TemperatureUnit::Celsius.symbol(),
            style_for(TemperatureUnit::Celsius),
        ),
        Span::raw(" | "),
        Span::styled(
            TemperatureUnit::Fahrenheit.symbol(),
            style_for(TemperatureUnit::Fahrenheit),
        ),
    ])
}
