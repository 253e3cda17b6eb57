use proptest::prelude::*;

use sandbox_chart::model::series::SeriesBuffer;
use sandbox_chart::model::tick::Tick;
use sandbox_chart::model::trend::Trend;
use sandbox_chart::sim::bias::apply_bias;
use sandbox_chart::sim::sampler::NormalSampler;
use sandbox_chart::sim::stepper::{Stepper, PRICE_FLOOR};
use sandbox_chart::sim::SimulationConfig;

fn arb_trend() -> impl Strategy<Value = Trend> {
    prop_oneof![
        Just(Trend::Flat),
        Just(Trend::Bull),
        Just(Trend::Bear),
        Just(Trend::Volatile),
    ]
}

#[test]
fn single_tick_flat_step_stays_in_sanity_band() {
    let stepper = Stepper::default();
    let config = SimulationConfig {
        volatility: 30.0,
        speed: 1.0,
        trend: Trend::Flat,
    };
    for seed in 0..200 {
        let mut buffer = SeriesBuffer::from_ticks(120, [Tick::new(0, 100.0)]);
        let mut sampler = NormalSampler::seeded(seed);
        let tick = stepper.step(&mut buffer, &config, &mut sampler, 1.0, 1_000);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer[1], tick);
        assert!(tick.price > 50.0 && tick.price < 150.0, "price {}", tick.price);
        assert!(tick.price > PRICE_FLOOR);
    }
}

#[test]
fn step_composes_two_independent_draws() {
    let stepper = Stepper::default();
    let config = SimulationConfig {
        volatility: 40.0,
        speed: 1.0,
        trend: Trend::Bull,
    };
    let mut buffer = SeriesBuffer::from_ticks(120, [Tick::new(0, 200.0)]);
    let mut sampler = NormalSampler::seeded(99);
    let tick = stepper.step(&mut buffer, &config, &mut sampler, 1.0, 5);

    let mut reference = NormalSampler::seeded(99);
    let raw = reference.sample() * Stepper::vol_factor(40.0);
    let delta = apply_bias(raw, Trend::Bull, &mut reference);
    assert_eq!(tick.price, Stepper::next_price(200.0, delta));
    assert_eq!(tick.timestamp_ms, 5);
}

#[test]
fn dt_scales_only_the_first_draw() {
    let stepper = Stepper::default();
    let config = SimulationConfig::default();
    let mut buffer = SeriesBuffer::from_ticks(120, [Tick::new(0, 100.0)]);
    let mut sampler = NormalSampler::seeded(4);
    let tick = stepper.step(&mut buffer, &config, &mut sampler, 0.0, 1);

    let mut reference = NormalSampler::seeded(4);
    let _ = reference.sample();
    let delta = apply_bias(0.0, Trend::Flat, &mut reference);
    assert_eq!(tick.price, Stepper::next_price(100.0, delta));
}

#[test]
fn step_evicts_at_capacity() {
    let stepper = Stepper::default();
    let mut buffer = SeriesBuffer::from_ticks(3, (0..3).map(|i| Tick::new(i, 100.0)));
    let mut sampler = NormalSampler::seeded(6);
    stepper.step(&mut buffer, &SimulationConfig::default(), &mut sampler, 1.0, 3);
    assert_eq!(buffer.len(), 3);
    assert_eq!(buffer[0].timestamp_ms, 1);
}

proptest! {
    /// Prices stay strictly positive however hard the walk is pushed down.
    #[test]
    fn price_never_reaches_zero(
        seed in any::<u64>(),
        start in 0.1..1_000.0_f64,
        volatility in 0.0..400.0_f64,
        trend in arb_trend(),
        steps in 1usize..150,
    ) {
        let stepper = Stepper::default();
        let config = SimulationConfig { volatility, speed: 1.0, trend };
        let mut buffer = SeriesBuffer::from_ticks(120, [Tick::new(0, start)]);
        let mut sampler = NormalSampler::seeded(seed);
        for i in 0..steps {
            let tick = stepper.step(&mut buffer, &config, &mut sampler, 1.0, i as i64);
            prop_assert!(tick.price >= PRICE_FLOOR);
        }
        prop_assert!(buffer.len() <= 120);
    }
}
