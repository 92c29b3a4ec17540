//! Location panel: world map centred on the forecast city
//!
//! The city is drawn as a labelled marker. Each forecast day gets its own
//! marker near the city, spread on a golden-angle spiral so the layout is the
//! same on every draw.

use std::f64::consts::PI;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::data::{CityLocation, ForecastSet};
use crate::report::format_coordinates;

/// Largest distance of a day marker from the city, in degrees per axis
pub const MAX_MARKER_OFFSET: f64 = 0.05;

/// Degrees of longitude shown across the panel
const MAP_SPAN_LON: f64 = 60.0;
/// Degrees of latitude shown down the panel
const MAP_SPAN_LAT: f64 = 30.0;

/// Offset `(d_lon, d_lat)` of the marker for day `index`
///
/// Both components stay within ±[`MAX_MARKER_OFFSET`].
pub fn marker_offset(index: usize) -> (f64, f64) {
    let golden_angle = PI * (3.0 - 5f64.sqrt());
    let angle = index as f64 * golden_angle;
    // Radius grows with index and wraps every eight markers
    let radius = MAX_MARKER_OFFSET * (((index % 8) + 1) as f64 / 8.0).sqrt();
    (radius * angle.cos(), radius * angle.sin())
}

/// Map coordinates `(lon, lat)` of every day marker
pub fn day_markers(city: &CityLocation, days: usize) -> Vec<(f64, f64)> {
    (0..days)
        .map(|i| {
            let (d_lon, d_lat) = marker_offset(i);
            (city.longitude + d_lon, city.latitude + d_lat)
        })
        .collect()
}

/// Renders the location panel
pub fn render(frame: &mut Frame, forecast: &ForecastSet, area: Rect) {
    let Some(city) = forecast.city() else {
        let block = Block::default()
            .title(" Location ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new("Location unavailable")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let title = if city.display_name.is_empty() {
        format!(" Location: {} ", format_coordinates(city))
    } else {
        format!(" Location: {} ({}) ", city.display_name, format_coordinates(city))
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let markers = day_markers(city, forecast.len());
    let label = if city.display_name.is_empty() {
        "●".to_string()
    } else {
        format!("● {}", city.display_name)
    };

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([
            city.longitude - MAP_SPAN_LON / 2.0,
            city.longitude + MAP_SPAN_LON / 2.0,
        ])
        .y_bounds([
            city.latitude - MAP_SPAN_LAT / 2.0,
            city.latitude + MAP_SPAN_LAT / 2.0,
        ])
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::Green,
                resolution: MapResolution::High,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &markers,
                color: Color::Yellow,
            });
            ctx.print(
                city.longitude,
                city.latitude,
                Span::styled(label.clone(), Style::default().fg(Color::Red)),
            );
        });

    frame.render_widget(canvas, area);
}
