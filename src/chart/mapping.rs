use crate::chart::{Viewport, PAD};
use crate::model::tick::round2;

const LOWER_BAND: f64 = 0.98;
const UPPER_BAND: f64 = 1.02;

/// Index/price to pixel mapping for one rendered frame, and its inverse for
/// the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotMapping {
    pub min_price: f64,
    pub max_price: f64,
    pub count: usize,
    pub viewport: Viewport,
}

impl PlotMapping {
    /// `None` when fewer than two prices are available.
    pub fn from_prices(prices: &[f64], viewport: Viewport) -> Option<Self> {
        if prices.len() < 2 {
            return None;
        }
        let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            min_price: min * LOWER_BAND,
            max_price: max * UPPER_BAND,
            count: prices.len(),
            viewport,
        })
    }

    fn span(&self) -> f64 {
        let span = self.max_price - self.min_price;
        if span == 0.0 {
            1.0
        } else {
            span
        }
    }

    pub fn x(&self, index: usize) -> f64 {
        PAD + index as f64 * (self.viewport.plot_width() / (self.count - 1) as f64)
    }

    pub fn y(&self, price: f64) -> f64 {
        PAD + self.viewport.plot_height() * (1.0 - (price - self.min_price) / self.span())
    }

    pub fn plot_top(&self) -> f64 {
        PAD
    }

    pub fn plot_bottom(&self) -> f64 {
        self.viewport.height - PAD
    }

    /// Invert a vertical pixel position to a price. `y` is clamped into the
    /// plot band first and the result is rounded to cents.
    pub fn price_at(&self, y: f64) -> f64 {
        let clamped = y.clamp(self.plot_top(), self.plot_bottom());
        let ratio = 1.0 - (clamped - PAD) / self.viewport.plot_height();
        round2(self.min_price + ratio * (self.max_price - self.min_price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_is_padded_two_percent() {
        let m = PlotMapping::from_prices(&[100.0, 200.0], Viewport::default()).unwrap();
        assert!((m.min_price - 98.0).abs() < 1e-9);
        assert!((m.max_price - 204.0).abs() < 1e-9);
    }

    #[test]
    fn x_spans_plot_width() {
        let m = PlotMapping::from_prices(&[1.0, 2.0, 3.0], Viewport::new(800.0, 320.0)).unwrap();
        assert_eq!(m.x(0), 40.0);
        assert_eq!(m.x(1), 400.0);
        assert_eq!(m.x(2), 760.0);
    }

    #[test]
    fn price_at_clamps_to_band() {
        let m = PlotMapping::from_prices(&[100.0, 200.0], Viewport::default()).unwrap();
        assert_eq!(m.price_at(-500.0), round2(m.max_price));
        assert_eq!(m.price_at(10_000.0), round2(m.min_price));
    }

    #[test]
    fn single_price_has_no_mapping() {
        assert!(PlotMapping::from_prices(&[100.0], Viewport::default()).is_none());
    }
}
