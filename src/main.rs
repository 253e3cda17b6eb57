use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind};

use sandbox_chart::config::Config;
use sandbox_chart::controller::{Controller, SessionSettings};
use sandbox_chart::error::AppError;
use sandbox_chart::gate::StaticGate;
use sandbox_chart::input::{parse_focus_command, parse_main_command, parse_pointer};
use sandbox_chart::sim::clock::SystemClock;
use sandbox_chart::ui;
use sandbox_chart::ui::AppState;

fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Set SANDBOX_CHART_CONFIG or run from the directory holding config/default.toml");
            std::process::exit(1);
        }
    };

    // Log to file so it doesn't interfere with the TUI
    let log_file = std::fs::File::create("sandbox-chart.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.logging.level.as_str())
            }),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .json()
        .init();

    tracing::info!(
        base_price = config.simulation.base_price,
        volatility = config.simulation.volatility,
        speed = config.simulation.speed,
        trend = %config.simulation.trend,
        "Starting sandbox-chart"
    );

    let gate = StaticGate::new(config.access.controls_unlocked);
    let controller = Controller::new(
        SessionSettings::from(&config),
        Box::new(SystemClock),
        Box::new(gate.clone()),
    );
    let mut app_state = AppState::new(controller, gate, config.portfolio.default_quantity);
    app_state.push_log("sandbox-chart started | press Space to play".to_string());

    let mut terminal = ratatui::init();
    crossterm::execute!(std::io::stdout(), EnableMouseCapture)
        .map_err(|e| AppError::Terminal(e.to_string()))?;

    let started = Instant::now();
    let result = run(&mut terminal, &mut app_state, &config, started);

    if let Err(e) = crossterm::execute!(std::io::stdout(), DisableMouseCapture) {
        tracing::warn!(error = %e, "Failed to release mouse capture");
    }
    ratatui::restore();
    result?;

    tracing::info!(
        ticks = app_state.tick_count,
        trades = app_state.trade_count,
        "Shutdown complete"
    );
    println!("Goodbye! Check sandbox-chart.log for details.");
    Ok(())
}

fn run(
    terminal: &mut ratatui::DefaultTerminal,
    app_state: &mut AppState,
    config: &Config,
    started: Instant,
) -> Result<()> {
    let poll_interval = Duration::from_millis(config.ui.refresh_rate_ms.max(1));
    loop {
        terminal.draw(|frame| ui::render(frame, app_state))?;

        if crossterm::event::poll(poll_interval)? {
            match crossterm::event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) {
                        tracing::info!("User quit");
                        break;
                    }
                    if app_state.focus_mode {
                        if let Some(cmd) = parse_focus_command(&key.code) {
                            app_state.dispatch_focus(cmd);
                            continue;
                        }
                    }
                    if let Some(cmd) = parse_main_command(&key.code, key.modifiers) {
                        app_state.dispatch(cmd);
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) = parse_pointer(&mouse) {
                        let size = terminal.size()?;
                        let screen = ratatui::layout::Rect::new(0, 0, size.width, size.height);
                        app_state.pointer(action, screen);
                    }
                }
                _ => {}
            }
        }

        app_state.frame(started.elapsed().as_secs_f64());
    }
    Ok(())
}
