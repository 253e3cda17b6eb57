pub mod bias;
pub mod clock;
pub mod run_loop;
pub mod sampler;
pub mod stepper;

use crate::model::trend::Trend;

pub const DEFAULT_VOLATILITY: f64 = 30.0;
pub const DEFAULT_SPEED: f64 = 1.0;

/// Knobs read by the stepper and the run loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub volatility: f64,
    pub speed: f64,
    pub trend: Trend,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            volatility: DEFAULT_VOLATILITY,
            speed: DEFAULT_SPEED,
            trend: Trend::Flat,
        }
    }
}
