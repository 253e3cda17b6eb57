use rand::Rng;

use crate::model::trend::Trend;
use crate::sim::sampler::NormalSampler;

const DIRECTIONAL_PUSH: f64 = 0.5;
const VOLATILE_NOISE: f64 = 1.2;
const FLAT_NOISE: f64 = 0.5;

/// Second-stage perturbation: `raw_delta` is already a scaled deviate, and
/// this folds in a fresh, independent draw shaped by the trend.
pub fn apply_bias<R: Rng>(raw_delta: f64, trend: Trend, sampler: &mut NormalSampler<R>) -> f64 {
    match trend {
        Trend::Bull => raw_delta + sampler.sample().abs() * DIRECTIONAL_PUSH,
        Trend::Bear => raw_delta - sampler.sample().abs() * DIRECTIONAL_PUSH,
        Trend::Volatile => raw_delta + sampler.sample() * VOLATILE_NOISE,
        Trend::Flat => raw_delta + sampler.sample() * FLAT_NOISE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bull_never_pushes_down_and_bear_never_pushes_up() {
        let mut sampler = NormalSampler::seeded(3);
        for _ in 0..1_000 {
            assert!(apply_bias(0.0, Trend::Bull, &mut sampler) >= 0.0);
            assert!(apply_bias(0.0, Trend::Bear, &mut sampler) <= 0.0);
        }
    }

    #[test]
    fn volatile_spreads_wider_than_flat() {
        let mut sampler = NormalSampler::seeded(5);
        let n = 20_000;
        let var = |trend: Trend, sampler: &mut NormalSampler| {
            (0..n)
                .map(|_| apply_bias(0.0, trend, sampler).powi(2))
                .sum::<f64>()
                / n as f64
        };
        let flat = var(Trend::Flat, &mut sampler);
        let volatile = var(Trend::Volatile, &mut sampler);
        assert!((flat - 0.25).abs() < 0.03, "flat variance {flat}");
        assert!((volatile - 1.44).abs() < 0.1, "volatile variance {volatile}");
    }
}
