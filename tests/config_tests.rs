use std::io::Write;

use sandbox_chart::chart::ChartType;
use sandbox_chart::config::Config;
use sandbox_chart::controller::{Controller, SessionSettings};
use sandbox_chart::gate::StaticGate;
use sandbox_chart::model::trend::Trend;
use sandbox_chart::sim::clock::ManualClock;

#[test]
fn parse_default_toml() {
    let toml_str = r#"
[simulation]
base_price = 100.0
volatility = 30.0
speed = 1.0
trend = "bull"
capacity = 120
seed_ticks = 40
seed_spacing_ms = 1000
rng_seed = 7

[chart]
width = 800.0
height = 320.0
show_grid = false
chart_type = "line"

[portfolio]
starting_cash = 100000.0
default_quantity = 10

[ui]
refresh_rate_ms = 16

[logging]
level = "debug"

[access]
controls_unlocked = false
"#;
    let config = Config::from_toml_str(toml_str).unwrap();
    assert_eq!(config.simulation.trend, Trend::Bull);
    assert_eq!(config.simulation.rng_seed, Some(7));
    assert!(!config.chart.show_grid);
    assert_eq!(config.chart.chart_type, ChartType::Line);
    assert_eq!(config.portfolio.default_quantity, 10);
    assert_eq!(config.ui.refresh_rate_ms, 16);
    assert_eq!(config.logging.level, "debug");
    assert!(!config.access.controls_unlocked);
}

#[test]
fn shipped_default_file_parses() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config/default.toml");
    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.simulation.capacity, 120);
    assert_eq!(config.simulation.seed_ticks, 40);
    assert_eq!(config.simulation.rng_seed, None);
    assert_eq!(config.portfolio.starting_cash, 100_000.0);
}

#[test]
fn partial_file_uses_defaults() {
    let config = Config::from_toml_str("[simulation]\nvolatility = 5.0\n").unwrap();
    assert_eq!(config.simulation.volatility, 5.0);
    assert_eq!(config.simulation.capacity, 120);
    assert_eq!(config.simulation.speed, 1.0);
    assert!(config.chart.show_grid);
    assert!(config.access.controls_unlocked);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn empty_file_is_valid() {
    assert!(Config::from_toml_str("").is_ok());
}

#[test]
fn rejects_invalid_values() {
    assert!(Config::from_toml_str("[simulation]\nspeed = 0.0\n").is_err());
    assert!(Config::from_toml_str("[simulation]\nvolatility = -1.0\n").is_err());
    assert!(Config::from_toml_str("[simulation]\nbase_price = 0.0\n").is_err());
    assert!(Config::from_toml_str("[simulation]\ncapacity = 1\nseed_ticks = 1\n").is_err());
    assert!(Config::from_toml_str("[simulation]\nseed_ticks = 200\n").is_err());
    assert!(Config::from_toml_str("[simulation]\nseed_ticks = 0\n").is_err());
    assert!(Config::from_toml_str("[chart]\nheight = 50.0\n").is_err());
    assert!(Config::from_toml_str("[simulation]\ntrend = \"sideways\"\n").is_err());
    assert!(Config::from_toml_str("[chart]\nchart_type = \"candles\"\n").is_err());
}

#[test]
fn validation_error_names_the_key() {
    let err = Config::from_toml_str("[simulation]\nspeed = -2.0\n").unwrap_err();
    assert!(err.to_string().contains("simulation.speed"));
}

#[test]
fn load_from_adds_path_context() {
    let dir = std::env::temp_dir().join(format!("sandbox-chart-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bad.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[simulation]\nspeed = \"fast\"").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("failed to parse"));
    assert!(Config::load_from(&dir.join("missing.toml")).is_err());
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn session_settings_follow_config() {
    let config = Config::from_toml_str(
        "[simulation]\nbase_price = 250.0\ntrend = \"volatile\"\n[chart]\nwidth = 1000.0\n[portfolio]\nstarting_cash = 5000.0\n",
    )
    .unwrap();
    let settings = SessionSettings::from(&config);
    assert_eq!(settings.base_price, 250.0);
    assert_eq!(settings.simulation.trend, Trend::Volatile);
    assert_eq!(settings.viewport.width, 1_000.0);
    assert_eq!(settings.starting_cash, 5_000.0);
}

#[test]
fn single_seed_tick_is_accepted() {
    let config = Config::from_toml_str("[simulation]\nseed_ticks = 1\n").unwrap();
    let controller = Controller::new(
        SessionSettings::from(&config),
        Box::new(ManualClock::new(0)),
        Box::new(StaticGate::default()),
    );
    assert_eq!(controller.series().len(), 1);
}

#[test]
fn configured_chart_width_is_clamped_to_supported_range() {
    let narrow = Config::from_toml_str("[chart]\nwidth = 300.0\nheight = 400.0\n").unwrap();
    let controller = Controller::new(
        SessionSettings::from(&narrow),
        Box::new(ManualClock::new(0)),
        Box::new(StaticGate::default()),
    );
    assert_eq!(controller.scene().viewport.width, 600.0);
    assert_eq!(controller.scene().viewport.height, 400.0);

    let wide = Config::from_toml_str("[chart]\nwidth = 2000.0\n").unwrap();
    assert_eq!(SessionSettings::from(&wide).viewport.width, 1_200.0);
}
