pub mod mapping;
pub mod renderer;
pub mod scene;
pub mod svg;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Inset between the viewport edge and the plot band, in scene pixels.
pub const PAD: f64 = 40.0;
pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 320.0;
pub const MIN_WIDTH: f64 = 600.0;
pub const MAX_WIDTH: f64 = 1200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Connected polyline with a marker per tick. The only geometry drawn.
    #[default]
    Line,
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartType::Line => f.write_str("line"),
        }
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(ChartType::Line),
            other => Err(format!("unsupported chart type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub show_grid: bool,
    pub chart_type: ChartType,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            show_grid: true,
            chart_type: ChartType::Line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Host-measured width clamped to the supported range at default height.
    /// A zero or non-finite measurement falls back to the default width.
    pub fn clamped(measured_width: f64) -> Self {
        let width = if measured_width.is_finite() && measured_width > 0.0 {
            measured_width
        } else {
            DEFAULT_WIDTH
        };
        Self {
            width: width.clamp(MIN_WIDTH, MAX_WIDTH),
            height: DEFAULT_HEIGHT,
        }
    }

    /// Same width clamp as [`Viewport::clamped`], keeping `height`.
    pub fn clamped_with_height(measured_width: f64, height: f64) -> Self {
        Self {
            height,
            ..Self::clamped(measured_width)
        }
    }

    pub fn plot_width(&self) -> f64 {
        self.width - 2.0 * PAD
    }

    pub fn plot_height(&self) -> f64 {
        self.height - 2.0 * PAD
    }
}
