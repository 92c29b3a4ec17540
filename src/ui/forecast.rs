//! Daily forecast cards
//!
//! One card per [`DailyRecord`], left to right in chronological order.
//! Temperatures are converted for display only.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::temperature_color;
use crate::data::{DailyRecord, ForecastSet, TemperatureUnit};
use crate::report::forecast_title;

/// Renders the card row with the forecast title
pub fn render(
    frame: &mut Frame,
    forecast: &ForecastSet,
    query: &str,
    unit: TemperatureUnit,
    area: Rect,
) {
    let block = Block::default()
        .title(format!(" {} ", forecast_title(forecast, query)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let days = forecast.days();
    if days.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = days
        .iter()
        .map(|_| Constraint::Ratio(1, days.len() as u32))
        .collect();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    for (day, card_area) in days.iter().zip(cards.iter()) {
        frame.render_widget(card(day, unit), *card_area);
    }
}

/// Builds a single day card
fn card(day: &DailyRecord, unit: TemperatureUnit) -> Paragraph<'_> {
    let lines = vec![
        Line::from(Span::styled(
            day.date(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(day.icon()),
        Line::from(Span::styled(
            unit.format(day.temperature_celsius()),
            Style::default()
                .fg(temperature_color(day.temperature_celsius()))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            day.description(),
            Style::default().fg(Color::Gray),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block)
}
