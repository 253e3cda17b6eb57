/// One simulated price observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub timestamp_ms: i64,
    pub price: f64,
}

impl Tick {
    pub fn new(timestamp_ms: i64, price: f64) -> Self {
        Self {
            timestamp_ms,
            price,
        }
    }
}

/// Round to cents, the precision every stored price carries.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_keeps_two_decimals() {
        assert_eq!(round2(101.234), 101.23);
        assert_eq!(round2(101.235_1), 101.24);
        assert_eq!(round2(75.0), 75.0);
        assert_eq!(round2(-0.004), -0.0);
    }
}
