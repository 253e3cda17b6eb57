use rand::Rng;

use crate::model::series::SeriesBuffer;
use crate::model::tick::{round2, Tick};
use crate::sim::bias::apply_bias;
use crate::sim::sampler::NormalSampler;
use crate::sim::SimulationConfig;

pub const DEFAULT_BASE_PRICE: f64 = 100.0;
pub const PRICE_FLOOR: f64 = 0.1;

const MIN_VOL_FACTOR: f64 = 0.01;
const VOL_DIVISOR: f64 = 20.0;

/// Produces the next tick of the biased random walk. This is the only
/// producer of new ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stepper {
    base_price: f64,
}

impl Default for Stepper {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_PRICE)
    }
}

impl Stepper {
    pub fn new(base_price: f64) -> Self {
        Self { base_price }
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    /// Volatility scaling applied to the first-stage deviate.
    pub fn vol_factor(volatility: f64) -> f64 {
        (volatility / VOL_DIVISOR).max(MIN_VOL_FACTOR)
    }

    /// Percentage move to price: `last * (1 + delta/100)`, rounded to cents
    /// and floored at 0.1.
    pub fn next_price(last: f64, delta: f64) -> f64 {
        round2(last * (1.0 + delta / 100.0)).max(PRICE_FLOOR)
    }

    /// Compute and append one tick stamped `now_ms`, returning it.
    pub fn step<R: Rng>(
        &self,
        buffer: &mut SeriesBuffer,
        config: &SimulationConfig,
        sampler: &mut NormalSampler<R>,
        dt: f64,
        now_ms: i64,
    ) -> Tick {
        let last = buffer.last_price_or(self.base_price);
        let raw_delta = sampler.sample() * Self::vol_factor(config.volatility) * dt;
        let delta = apply_bias(raw_delta, config.trend, sampler);
        let tick = Tick::new(now_ms, Self::next_price(last, delta));
        buffer.push(tick);
        tick
    }
}
