//! Application state management for City Forecast
//!
//! This module contains the interactive application state: the search input,
//! the unit toggle, and the single outstanding forecast request. Fetches run
//! on a background task and report back over a channel; each request carries
//! a sequence number so results for a superseded city are dropped.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::data::{ForecastError, ForecastSet, NormalizeOptions, OpenWeatherClient, TemperatureUnit};

/// Application state enum representing what the main panel shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Nothing searched yet
    Search,
    /// Waiting for the forecast of the given city
    Loading(String),
    /// Showing the forecast for the given city
    Forecast(String),
    /// Last request failed; holds the user-facing message
    Error(String),
}

/// Result of one background fetch
#[derive(Debug)]
pub struct FetchOutcome {
    /// Sequence number of the request that produced this outcome
    pub seq: u64,
    pub city: String,
    pub result: Result<ForecastSet, ForecastError>,
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Text typed into the search bar
    pub input: String,
    /// Forecast for the current city, if the last request succeeded
    pub forecast: Option<ForecastSet>,
    /// Display unit; stored temperatures stay in Celsius
    pub unit: TemperatureUnit,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    client: OpenWeatherClient,
    options: NormalizeOptions,
    results_tx: mpsc::Sender<FetchOutcome>,
    results_rx: mpsc::Receiver<FetchOutcome>,
    in_flight: Option<JoinHandle<()>>,
    request_seq: u64,
}

impl App {
    /// Creates a new App in the search state
    ///
    /// # Arguments
    /// * `client` - Gateway used for every search
    /// * `options` - Normalization settings (locale, timezone policy)
    /// * `unit` - Initial display unit
    pub fn new(client: OpenWeatherClient, options: NormalizeOptions, unit: TemperatureUnit) -> Self {
        let (results_tx, results_rx) = mpsc::channel(8);
        Self {
            state: AppState::Search,
            input: String::new(),
            forecast: None,
            unit,
            should_quit: false,
            show_help: false,
            client,
            options,
            results_tx,
            results_rx,
            in_flight: None,
            request_seq: 0,
        }
    }

    /// Whether searches can reach the provider at all
    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    /// Whether a request is currently outstanding
    pub fn is_loading(&self) -> bool {
        matches!(self.state, AppState::Loading(_))
    }

    /// Fills the search bar with `city` and submits it
    pub fn search(&mut self, city: &str) {
        self.input = city.to_string();
        self.submit();
    }

    /// Submits the search input
    ///
    /// Blank input is ignored. Any in-flight request is aborted and the
    /// current forecast is discarded before the new fetch is spawned.
    pub fn submit(&mut self) {
        let city = self.input.trim().to_string();
        if city.is_empty() {
            return;
        }

        if let Some(handle) = self.in_flight.take() {
            handle.abort();
            tracing::debug!(seq = self.request_seq, "aborted stale request");
        }

        self.request_seq += 1;
        let seq = self.request_seq;
        self.forecast = None;
        self.state = AppState::Loading(city.clone());
        tracing::info!(seq, city = %city, "searching");

        let client = self.client.clone();
        let options = self.options.clone();
        let tx = self.results_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = client.fetch_forecast(&city, &options).await;
            let _ = tx.send(FetchOutcome { seq, city, result }).await;
        }));
    }

    /// Applies any finished fetches without blocking
    ///
    /// # Returns
    /// `true` if the state changed and the UI should redraw
    pub fn poll_results(&mut self) -> bool {
        let mut changed = false;
        while let Ok(outcome) = self.results_rx.try_recv() {
            changed |= self.apply_outcome(outcome);
        }
        changed
    }

    /// Applies one fetch outcome, ignoring superseded requests
    fn apply_outcome(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.seq != self.request_seq {
            tracing::debug!(
                seq = outcome.seq,
                current = self.request_seq,
                "dropping stale result"
            );
            return false;
        }

        self.in_flight = None;
        match outcome.result {
            Ok(forecast) => {
                self.forecast = Some(forecast);
                self.state = AppState::Forecast(outcome.city);
            }
            Err(e) => {
                tracing::warn!(city = %outcome.city, error = %e, "search failed");
                self.forecast = None;
                self.state = AppState::Error(error_message(&e));
            }
        }
        true
    }

    /// Switches between Celsius and Fahrenheit display
    pub fn toggle_unit(&mut self) {
        self.unit = self.unit.toggled();
    }

    /// Handles keyboard input
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key_event.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(key_event.code, KeyCode::Esc | KeyCode::F(1)) {
                self.show_help = false;
            }
            return;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::F(1) => {
                self.show_help = true;
            }
            KeyCode::Tab => {
                self.toggle_unit();
            }
            KeyCode::Enter => {
                self.submit();
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
            }
            _ => {}
        }
    }
}

/// Error panel text, with a retry hint when another search may succeed
fn error_message(error: &ForecastError) -> String {
    if error.is_retryable() {
        format!(
            "{} Edit the city and press Enter to retry.",
            error.user_message()
        )
    } else {
        error.user_message()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
