use sandbox_chart::model::trend::Trend;
use sandbox_chart::sim::bias::apply_bias;
use sandbox_chart::sim::sampler::NormalSampler;

#[test]
fn hundred_thousand_draws_are_standard_normal() {
    let mut sampler = NormalSampler::seeded(2024);
    let n = 100_000;
    let draws: Vec<f64> = (0..n).map(|_| sampler.sample()).collect();
    let mean = draws.iter().sum::<f64>() / n as f64;
    let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    assert!(mean.abs() < 0.05, "mean {mean}");
    assert!((var.sqrt() - 1.0).abs() < 0.05, "std {}", var.sqrt());
}

#[test]
fn draws_are_finite() {
    let mut sampler = NormalSampler::from_entropy();
    assert!((0..10_000).all(|_| sampler.sample().is_finite()));
}

#[test]
fn bias_consumes_one_fresh_draw() {
    let mut biased = NormalSampler::seeded(77);
    let mut reference = NormalSampler::seeded(77);
    let out = apply_bias(1.0, Trend::Volatile, &mut biased);
    assert_eq!(out, 1.0 + reference.sample() * 1.2);
    // Both samplers are now at the same position in the stream.
    assert_eq!(biased.sample(), reference.sample());
}

#[test]
fn bull_and_bear_push_by_half_sigma_magnitude() {
    let mut bull = NormalSampler::seeded(8);
    let mut reference = NormalSampler::seeded(8);
    let draw = reference.sample();
    assert_eq!(apply_bias(0.25, Trend::Bull, &mut bull), 0.25 + draw.abs() * 0.5);

    let mut bear = NormalSampler::seeded(8);
    assert_eq!(apply_bias(0.25, Trend::Bear, &mut bear), 0.25 - draw.abs() * 0.5);
}
