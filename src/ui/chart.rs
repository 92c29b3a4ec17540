//! Temperature line chart
//!
//! The x axis is the position of each day in the forecast, never a parsed
//! date; the y axis is in the selected display unit.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::data::{ForecastSet, TemperatureUnit};

/// Padding added above and below the temperature range
const Y_PADDING: f64 = 2.0;

/// Chart points as `(index, display temperature)`
pub fn chart_points(forecast: &ForecastSet, unit: TemperatureUnit) -> Vec<(f64, f64)> {
    forecast
        .days()
        .iter()
        .enumerate()
        .map(|(i, day)| (i as f64, f64::from(unit.display_value(day.temperature_celsius()))))
        .collect()
}

/// Y axis bounds covering every day with some headroom
fn y_bounds(forecast: &ForecastSet, unit: TemperatureUnit) -> [f64; 2] {
    match forecast.temperature_range() {
        Some((min, max)) => [
            f64::from(unit.display_value(min)) - Y_PADDING,
            f64::from(unit.display_value(max)) + Y_PADDING,
        ],
        None => [0.0, 1.0],
    }
}

/// Renders the line chart
pub fn render(frame: &mut Frame, forecast: &ForecastSet, unit: TemperatureUnit, area: Rect) {
    let points = chart_points(forecast, unit);
    let block = Block::default()
        .title(format!(" Temperature ({}) ", unit.symbol()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let days = forecast.days();
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;
    let x_labels: Vec<Span> = match (days.first(), days.last()) {
        (Some(first), Some(last)) if days.len() > 1 => {
            vec![Span::raw(first.date()), Span::raw(last.date())]
        }
        (Some(only), _) => vec![Span::raw(only.date())],
        _ => Vec::new(),
    };

    let [y_min, y_max] = y_bounds(forecast, unit);
    let y_labels = vec![
        Span::raw(format!("{:.0}{}", y_min, unit.symbol())),
        Span::raw(format!("{:.0}{}", (y_min + y_max) / 2.0, unit.symbol())),
        Span::raw(format!("{:.0}{}", y_max, unit.symbol())),
    ];

    let datasets = vec![Dataset::default()
        .name("daily")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Yellow))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}
