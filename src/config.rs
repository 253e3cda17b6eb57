use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::chart::{ChartType, PAD};
use crate::error::AppError;
use crate::ledger::DEFAULT_STARTING_CASH;
use crate::model::series::{DEFAULT_CAPACITY, DEFAULT_SEED_SPACING_MS, DEFAULT_SEED_TICKS};
use crate::model::trend::Trend;
use crate::sim::stepper::DEFAULT_BASE_PRICE;
use crate::sim::{DEFAULT_SPEED, DEFAULT_VOLATILITY};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const CONFIG_PATH_ENV: &str = "SANDBOX_CHART_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationSettings,
    pub chart: ChartSettings,
    pub portfolio: PortfolioSettings,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
    pub access: AccessConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    pub base_price: f64,
    pub volatility: f64,
    pub speed: f64,
    pub trend: Trend,
    pub capacity: usize,
    pub seed_ticks: usize,
    pub seed_spacing_ms: i64,
    pub rng_seed: Option<u64>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            base_price: DEFAULT_BASE_PRICE,
            volatility: DEFAULT_VOLATILITY,
            speed: DEFAULT_SPEED,
            trend: Trend::Flat,
            capacity: DEFAULT_CAPACITY,
            seed_ticks: DEFAULT_SEED_TICKS,
            seed_spacing_ms: DEFAULT_SEED_SPACING_MS,
            rng_seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: f64,
    pub height: f64,
    pub show_grid: bool,
    pub chart_type: ChartType,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: crate::chart::DEFAULT_WIDTH,
            height: crate::chart::DEFAULT_HEIGHT,
            show_grid: true,
            chart_type: ChartType::Line,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortfolioSettings {
    pub starting_cash: f64,
    pub default_quantity: u64,
}

impl Default for PortfolioSettings {
    fn default() -> Self {
        Self {
            starting_cash: DEFAULT_STARTING_CASH,
            default_quantity: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            refresh_rate_ms: 16,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    pub controls_unlocked: bool,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            controls_unlocked: true,
        }
    }
}

impl Config {
    /// Load from `$SANDBOX_CHART_CONFIG` (after reading `.env`), falling back
    /// to `config/default.toml`.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        Self::from_toml_str(&config_str)
            .with_context(|| format!("failed to parse {}", config_path.display()))
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, AppError> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let sim = &self.simulation;
        if !(sim.base_price.is_finite() && sim.base_price > 0.0) {
            return Err(AppError::Config(format!(
                "simulation.base_price must be > 0, got {}",
                sim.base_price
            )));
        }
        if !(sim.volatility.is_finite() && sim.volatility >= 0.0) {
            return Err(AppError::Config(format!(
                "simulation.volatility must be >= 0, got {}",
                sim.volatility
            )));
        }
        if !(sim.speed.is_finite() && sim.speed > 0.0) {
            return Err(AppError::Config(format!(
                "simulation.speed must be > 0, got {}",
                sim.speed
            )));
        }
        if sim.capacity < 2 {
            return Err(AppError::Config(format!(
                "simulation.capacity must be >= 2, got {}",
                sim.capacity
            )));
        }
        if sim.seed_ticks < 1 {
            return Err(AppError::Config(
                "simulation.seed_ticks must be >= 1, got 0".to_string(),
            ));
        }
        if sim.seed_ticks > sim.capacity {
            return Err(AppError::Config(format!(
                "simulation.seed_ticks ({}) exceeds simulation.capacity ({})",
                sim.seed_ticks, sim.capacity
            )));
        }
        if self.chart.width <= 2.0 * PAD || self.chart.height <= 2.0 * PAD {
            return Err(AppError::Config(format!(
                "chart.width/height must exceed {} pixels, got {}x{}",
                2.0 * PAD,
                self.chart.width,
                self.chart.height
            )));
        }
        if !(self.portfolio.starting_cash.is_finite() && self.portfolio.starting_cash >= 0.0) {
            return Err(AppError::Config(format!(
                "portfolio.starting_cash must be >= 0, got {}",
                self.portfolio.starting_cash
            )));
        }
        Ok(())
    }
}

