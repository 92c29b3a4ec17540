//! City Forecast - 5-day weather forecast lookup by city name
//!
//! Runs a terminal UI by default. `--plain` and `--json` print a single
//! forecast and exit.

use std::io;
use std::panic;
use std::process;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};

use cityforecast::app::App;
use cityforecast::cli::{Cli, OutputMode};
use cityforecast::config::Settings;
use cityforecast::data::OpenWeatherClient;
use cityforecast::logging::{self, LogTarget};
use cityforecast::{report, ui};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Prints a message to stderr and exits with `code`
fn fail(message: impl std::fmt::Display, code: i32) -> ! {
    eprintln!("Error: {}", message);
    process::exit(code);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mode = cli.output_mode().unwrap_or_else(|e| fail(e, 2));
    let settings = Settings::load(&cli).unwrap_or_else(|e| fail(e, 1));

    let (target, default_filter) = if mode.is_interactive() {
        (LogTarget::default_file(), "info")
    } else {
        (LogTarget::Stderr, "warn")
    };
    if let Err(e) = logging::init(target, default_filter) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let client = OpenWeatherClient::new(&settings.gateway_config())
        .unwrap_or_else(|e| fail(e.user_message(), 1));

    match mode {
        OutputMode::Plain { city } => run_once(&client, &settings, &city, false).await,
        OutputMode::Json { city } => run_once(&client, &settings, &city, true).await,
        OutputMode::Interactive { initial_city } => {
            run_interactive(client, &settings, initial_city)
        }
    }
}

/// Fetches one forecast and prints it as text or JSON
async fn run_once(
    client: &OpenWeatherClient,
    settings: &Settings,
    city: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let forecast = match client
        .fetch_forecast(city, &settings.normalize_options())
        .await
    {
        Ok(forecast) => forecast,
        Err(e) => {
            tracing::error!(city, error = %e, "lookup failed");
            fail(e.user_message(), 1);
        }
    };

    if json {
        println!("{}", report::render_json(&forecast, city, settings.unit)?);
    } else {
        print!("{}", report::render_plain(&forecast, city, settings.unit));
    }
    Ok(())
}

fn run_interactive(
    client: OpenWeatherClient,
    settings: &Settings,
    initial_city: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client, settings.normalize_options(), settings.unit);
    if let Some(city) = initial_city {
        app.search(&city);
    }

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map_err(Into::into)
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        // Render UI
        terminal.draw(|f| ui::render(f, app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Apply finished fetches
        app.poll_results();

        // Check if we should quit
        if app.should_quit {
            return Ok(());
        }
    }
}
