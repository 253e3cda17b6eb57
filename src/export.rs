//! Headless export: seed a session, step it and write the scene as SVG.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};

use crate::chart::svg::to_svg;
use crate::chart::{ChartType, Viewport};
use crate::config::Config;
use crate::controller::{Command, Controller, SessionSettings};
use crate::error::AppError;
use crate::gate::StaticGate;
use crate::model::trend::Trend;
use crate::sim::clock::SystemClock;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportOptions {
    pub steps: usize,
    pub trend: Option<Trend>,
    pub chart_type: Option<ChartType>,
    pub seed: Option<u64>,
    pub width: Option<f64>,
    pub out: Option<PathBuf>,
}

/// `None` means help was requested.
pub fn parse_args(args: &[String]) -> Result<Option<ExportOptions>> {
    let mut opts = ExportOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "help" | "--help" | "-h" => return Ok(None),
            "--trend" => {
                let value = iter.next().ok_or_else(|| anyhow!("`--trend` requires a value"))?;
                opts.trend = Some(value.parse::<Trend>().map_err(|e| anyhow!(e))?);
            }
            "--chart-type" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("`--chart-type` requires a value"))?;
                opts.chart_type = Some(value.parse::<ChartType>().map_err(|e| anyhow!(e))?);
            }
            "--seed" => {
                let value = iter.next().ok_or_else(|| anyhow!("`--seed` requires a value"))?;
                opts.seed = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid seed `{}`", value))?,
                );
            }
            "--width" => {
                let value = iter.next().ok_or_else(|| anyhow!("`--width` requires a value"))?;
                opts.width = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid width `{}`", value))?,
                );
            }
            "--out" | "-o" => {
                let value = iter.next().ok_or_else(|| anyhow!("`--out` requires a path"))?;
                opts.out = Some(PathBuf::from(value));
            }
            other if other.starts_with('-') => bail!("unknown flag `{}`", other),
            steps => {
                opts.steps = steps
                    .parse()
                    .with_context(|| format!("invalid step count `{}`", steps))?;
            }
        }
    }
    Ok(Some(opts))
}

pub fn print_usage() {
    let trends: Vec<&str> = Trend::ALL.iter().map(|t| t.as_str()).collect();
    eprintln!(
        "usage: chart-svg [STEPS] [--trend {}] [--chart-type line] [--seed N] [--width W] [--out PATH]",
        trends.join("|")
    );
}

/// Seed a fresh session from `config`, apply the options, step and serialize.
pub fn render_svg(config: &Config, opts: &ExportOptions) -> String {
    let mut settings = SessionSettings::from(config);
    if let Some(seed) = opts.seed {
        settings.rng_seed = Some(seed);
    }
    if let Some(trend) = opts.trend {
        settings.simulation.trend = trend;
    }
    if let Some(chart_type) = opts.chart_type {
        settings.render.chart_type = chart_type;
    }
    if let Some(width) = opts.width {
        settings.viewport = Viewport::clamped(width);
    }

    let mut controller = Controller::new(
        settings,
        Box::new(SystemClock),
        Box::new(StaticGate::default()),
    );
    for _ in 0..opts.steps {
        controller.apply(Command::Step);
    }
    controller.drain_events();
    tracing::info!(
        steps = opts.steps,
        ticks = controller.series().len(),
        last_price = controller.latest_price(),
        "Rendered export scene"
    );
    to_svg(controller.scene())
}

pub fn write_output(svg: &str, out: Option<&Path>) -> Result<(), AppError> {
    match out {
        Some(path) => std::fs::write(path, svg)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(svg.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

pub fn run_cli(args: &[String]) -> Result<()> {
    let Some(opts) = parse_args(args)? else {
        print_usage();
        return Ok(());
    };
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = ?e, "Config unavailable, using defaults");
            Config::default()
        }
    };
    let svg = render_svg(&config, &opts);
    write_output(&svg, opts.out.as_deref())?;
    if let Some(path) = &opts.out {
        tracing::info!(path = %path.display(), "SVG written");
    }
    Ok(())
}
