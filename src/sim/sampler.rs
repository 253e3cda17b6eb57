use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Standard-normal deviates via the Box-Muller transform.
#[derive(Debug, Clone)]
pub struct NormalSampler<R = StdRng> {
    rng: R,
}

impl NormalSampler<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible sampler, used by tests and `simulation.rng_seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> NormalSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Draw one deviate with mean 0 and variance 1.
    pub fn sample(&mut self) -> f64 {
        let u = self.open_unit();
        let v = self.open_unit();
        (-2.0 * u.ln()).sqrt() * (2.0 * PI * v).cos()
    }

    // `gen` yields [0, 1); zero is redrawn so ln(u) stays finite.
    fn open_unit(&mut self) -> f64 {
        loop {
            let x: f64 = self.rng.gen();
            if x != 0.0 {
                return x;
            }
        }
    }
}
