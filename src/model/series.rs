use std::collections::VecDeque;

use rand::Rng;

use crate::model::tick::{round2, Tick};
use crate::sim::sampler::NormalSampler;

pub const DEFAULT_CAPACITY: usize = 120;
pub const DEFAULT_SEED_TICKS: usize = 40;
pub const DEFAULT_SEED_SPACING_MS: i64 = 1_000;

/// Relative scale of the noise used for the synthetic warm-up history.
const SEED_NOISE: f64 = 0.02;
const PRICE_FLOOR: f64 = 0.1;

/// Bounded, insertion-ordered window of ticks. Oldest ticks are evicted first.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBuffer {
    ticks: VecDeque<Tick>,
    capacity: usize,
}

impl Default for SeriesBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl SeriesBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            ticks: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Build a buffer from existing ticks, keeping only the newest `capacity`.
    pub fn from_ticks(capacity: usize, ticks: impl IntoIterator<Item = Tick>) -> Self {
        let mut buffer = Self::new(capacity);
        for tick in ticks {
            buffer.push(tick);
        }
        buffer
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tick> {
        self.ticks.get(index)
    }

    pub fn last(&self) -> Option<&Tick> {
        self.ticks.back()
    }

    pub fn last_price(&self) -> Option<f64> {
        self.ticks.back().map(|t| t.price)
    }

    /// Latest price, or `fallback` while the window is empty.
    pub fn last_price_or(&self, fallback: f64) -> f64 {
        self.last_price().unwrap_or(fallback)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tick> + '_ {
        self.ticks.iter()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.ticks.iter().map(|t| t.price).collect()
    }

    /// Append a tick, returning the evicted oldest tick when over capacity.
    pub fn push(&mut self, tick: Tick) -> Option<Tick> {
        self.ticks.push_back(tick);
        if self.ticks.len() > self.capacity {
            self.ticks.pop_front()
        } else {
            None
        }
    }

    /// Overwrite the price of one tick in place. Returns false for an
    /// out-of-range index.
    pub fn set_price(&mut self, index: usize, price: f64) -> bool {
        match self.ticks.get_mut(index) {
            Some(tick) => {
                tick.price = price;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.ticks.clear();
    }

    /// Replace the contents with `count` synthetic ticks ending one spacing
    /// before `now_ms`, random-walking from `base_price`.
    pub fn seed<R: Rng>(
        &mut self,
        sampler: &mut NormalSampler<R>,
        base_price: f64,
        count: usize,
        spacing_ms: i64,
        now_ms: i64,
    ) {
        self.ticks.clear();
        let count = count.min(self.capacity);
        let mut price = base_price;
        for i in 0..count {
            price = round2(price * (1.0 + sampler.sample() * SEED_NOISE)).max(PRICE_FLOOR);
            let back = (count - i) as i64;
            self.ticks.push_back(Tick::new(now_ms - back * spacing_ms, price));
        }
    }
}

impl std::ops::Index<usize> for SeriesBuffer {
    type Output = Tick;

    fn index(&self, index: usize) -> &Tick {
        &self.ticks[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_evicts_oldest_beyond_capacity() {
        let mut buffer = SeriesBuffer::new(3);
        for i in 0..3 {
            assert!(buffer.push(Tick::new(i, 100.0 + i as f64)).is_none());
        }
        let evicted = buffer.push(Tick::new(3, 103.0)).unwrap();
        assert_eq!(evicted.timestamp_ms, 0);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer[0].timestamp_ms, 1);
        assert_eq!(buffer.last_price(), Some(103.0));
    }

    #[test]
    fn seed_spaces_timestamps_before_now() {
        let mut sampler = NormalSampler::seeded(7);
        let mut buffer = SeriesBuffer::default();
        buffer.seed(&mut sampler, 100.0, 40, 1_000, 1_000_000);
        assert_eq!(buffer.len(), 40);
        assert_eq!(buffer[0].timestamp_ms, 1_000_000 - 40_000);
        assert_eq!(buffer[39].timestamp_ms, 1_000_000 - 1_000);
        assert!(buffer.iter().all(|t| t.price > 0.0));
    }

    #[test]
    fn set_price_rejects_out_of_range() {
        let mut buffer = SeriesBuffer::from_ticks(5, [Tick::new(0, 1.0)]);
        assert!(!buffer.set_price(1, 2.0));
        assert!(buffer.set_price(0, 2.0));
        assert_eq!(buffer[0].price, 2.0);
    }
}
