mod app;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod ui;

use app::{App, WeatherView};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use error::{Result, SkyglanceError};
use logic::{icon_for, ForecastService};
use models::round_temperature;
use chrono::TimeZone;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, IsTerminal};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::components::day_strip::format_range;
use ui::screens::ForecastScreen;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Run `skyglance init` or pass --config <PATH>");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let service = ForecastService::new(&config)?;

    match cli.command {
        Some(Commands::Check) => return run_check(&service).await,
        Some(Commands::Show { day }) => return run_show(&config, &service, day).await,
        Some(Commands::Init) | None => {}
    }

    let mut app = App::new(config.forecast.units);
    app.request_refresh();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &service).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    if matches!(cli.command, Some(Commands::Init)) {
        return Config::setup_interactive(cli.config.clone()).map(|(config, _)| config);
    }

    if cli.config.is_none() && !Config::exists(None) && io::stdin().is_terminal() {
        println!("No configuration found.");
        return Config::setup_interactive(None).map(|(config, _)| config);
    }

    Config::load(cli.config.clone())
}

async fn run_check(service: &ForecastService) -> Result<()> {
    println!("Config: OK");

    let location = match service.resolve_location().await {
        Ok(location) => {
            println!(
                "Location: OK ({} at {:.2}, {:.2})",
                location.city, location.latitude, location.longitude
            );
            location
        }
        Err(e) => {
            println!("Location: FAILED ({})", e);
            return Err(e);
        }
    };

    match service.fetch_for(&location).await {
        Ok(forecast) => {
            println!("Forecast: OK ({} samples)", forecast.samples.len());
            Ok(())
        }
        Err(e) => {
            println!("Forecast: FAILED ({})", e);
            Err(e)
        }
    }
}

/// `day` is range-checked by clap before any request is made
async fn run_show(config: &Config, service: &ForecastService, day: u8) -> Result<()> {
    let mut app = App::new(config.forecast.units);

    match service.refresh().await {
        Ok(forecast) => app.fetch_succeeded(forecast),
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Err(e);
        }
    }

    if let Err(e) = select_requested_day(&mut app, day) {
        eprintln!("{}", e);
        return Err(e);
    }

    print!("{}", render_text(&app.view()));
    Ok(())
}

/// Select the 1-based `day`, failing when the forecast has fewer days
fn select_requested_day<Tz: TimeZone>(app: &mut App<Tz>, day: u8) -> Result<()> {
    let available = app.view().days.len();
    let index = usize::from(day)
        .checked_sub(1)
        .filter(|i| *i < available)
        .ok_or_else(|| {
            SkyglanceError::Config(format!(
                "--day {} is out of range: the forecast covers {} days",
                day, available
            ))
        })?;
    app.select_day_at(index);
    Ok(())
}

/// Plain-text rendering of a view, used by `skyglance show`
fn render_text(view: &WeatherView<'_>) -> String {
    let mut out = String::new();
    let units = view.units;
    let temp = units.temperature_suffix();

    if let Some(current) = view.current_weather {
        let icon = icon_for(&current.condition_description);
        out.push_str(&format!(
            "{} - {}{} {} ({} {})\n",
            view.geo_city,
            round_temperature(current.temperature),
            temp,
            current.condition_description,
            icon.symbol(),
            icon
        ));
        out.push_str(&format!(
            "Feels like {}{}  Humidity {:.0}%  Wind {:.1} {}\n",
            round_temperature(current.feels_like),
            temp,
            current.humidity,
            current.wind_speed,
            units.speed_suffix()
        ));
    }

    if let Some(key) = view.selected {
        out.push_str(&format!("\nHourly - {}\n", key));
        for entry in &view.hourly {
            out.push_str(&format!(
                "  {:>5}  {:>4}{}  {}\n",
                format!("{}:00", entry.hour),
                round_temperature(entry.sample.temperature),
                temp,
                entry.sample.condition_description
            ));
        }
    }

    if !view.days.is_empty() {
        out.push_str("\nDays\n");
        for (i, day) in view.days.iter().enumerate() {
            let marker = if view.selected == Some(day.key) { '>' } else { ' ' };
            out.push_str(&format!(
                "{} {}. {:<14} {}\n",
                marker,
                i + 1,
                day.key.to_string(),
                format_range(day, units)
            ));
        }
    }

    out
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    service: &ForecastService,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| {
            let area = f.area();
            let view = app.view();
            let screen = ForecastScreen::new(&view).with_status(app.status_message.as_deref());
            f.render_widget(screen, area);
        })?;

        // Handle refresh request; the frame above already shows the status
        if app.needs_refresh {
            app.needs_refresh = false;
            match service.refresh().await {
                Ok(forecast) => {
                    app.fetch_succeeded(forecast);
                    app.set_status("Forecast updated");
                }
                Err(e) => {
                    app.fetch_failed(e.user_message());
                    app.clear_status();
                }
            }
            continue;
        }

        // Handle input with timeout for async operations
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.quit();
                    }
                    _ => handle_input(app, key.code),
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('r') => app.request_refresh(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => app.select_prev_day(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => app.select_next_day(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(n) = c.to_digit(10) {
                app.select_day_at(n as usize - 1);
            }
        }
        _ => {}
    }
}
