//! UI rendering module for City Forecast
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod chart;
pub mod forecast;
pub mod help_overlay;
pub mod location;
pub mod search;

pub use help_overlay::render as render_help_overlay;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState};
use crate::data::{ForecastError, ForecastSet};

/// Renders the whole screen for the current application state
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(8),    // Main panel
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    search::render(frame, app, chunks[0]);

    match (&app.state, &app.forecast) {
        (AppState::Forecast(query), Some(forecast)) => {
            render_forecast(frame, app, forecast, query, chunks[1]);
        }
        _ => render_status(frame, app, chunks[1]),
    }

    render_footer(frame, chunks[2]);

    if app.show_help {
        render_help_overlay(frame);
    }
}

fn render_forecast(frame: &mut Frame, app: &App, forecast: &ForecastSet, query: &str, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(5)])
        .split(area);

    forecast::render(frame, forecast, query, app.unit, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    chart::render(frame, forecast, app.unit, columns[0]);
    location::render(frame, forecast, columns[1]);
}

/// Message panel for every state without a forecast to show
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match &app.state {
        AppState::Search | AppState::Forecast(_) if !app.is_configured() => (
            ForecastError::NotConfigured.user_message(),
            Style::default().fg(Color::Yellow),
        ),
        AppState::Search | AppState::Forecast(_) => (
            "Type a city name and press Enter".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        AppState::Loading(city) => (
            format!("Loading forecast for {}...", city),
            Style::default().fg(Color::Cyan),
        ),
        AppState::Error(message) => (
            message.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Center the message vertically
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Min(2),
            Constraint::Percentage(40),
        ])
        .split(inner);

    let paragraph = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, rows[1]);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let hint = Style::default().fg(Color::DarkGray);
    let line = Line::from(vec![
        Span::styled("Enter", key),
        Span::styled(" search  ", hint),
        Span::styled("Tab", key),
        Span::styled(" °C/°F  ", hint),
        Span::styled("F1", key),
        Span::styled(" help  ", hint),
        Span::styled("Esc", key),
        Span::styled(" quit", hint),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Color for temperature (warmer = more red, cooler = more blue)
pub fn temperature_color(celsius: i32) -> Color {
    match celsius {
        t if t >= 30 => Color::Red,
        t if t >= 25 => Color::LightRed,
        t if t >= 20 => Color::Yellow,
        t if t >= 15 => Color::Green,
        t if t >= 10 => Color::Cyan,
        _ => Color::Blue,
    }
}
