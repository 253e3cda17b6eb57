use std::fmt::Write;

use crate::chart::mapping::PlotMapping;
use crate::chart::Viewport;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Decorative horizontal gridline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
}

impl PathCommand {
    pub fn point(&self) -> Point {
        match self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => *p,
        }
    }
}

/// Focusable marker for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub index: usize,
    pub center: Point,
    pub price: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    MaxPrice,
    MinPrice,
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub kind: LabelKind,
    pub at: Point,
    pub anchor: TextAnchor,
    pub text: String,
}

/// Immutable description of one rendered chart frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub viewport: Viewport,
    pub mapping: Option<PlotMapping>,
    pub grid: Vec<GridLine>,
    pub path: Vec<PathCommand>,
    pub markers: Vec<Marker>,
    pub labels: Vec<Label>,
}

impl Scene {
    pub fn empty(viewport: Viewport) -> Self {
        Self {
            viewport,
            mapping: None,
            grid: Vec::new(),
            path: Vec::new(),
            markers: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.mapping.is_none()
    }

    pub fn label(&self, kind: LabelKind) -> Option<&Label> {
        self.labels.iter().find(|l| l.kind == kind)
    }

    pub fn marker(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    /// Path in SVG `d` syntax: `M x y L x y ...`.
    pub fn path_data(&self) -> String {
        let mut out = String::new();
        for (i, cmd) in self.path.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let (op, p) = match cmd {
                PathCommand::MoveTo(p) => ('M', p),
                PathCommand::LineTo(p) => ('L', p),
            };
            let _ = write!(out, "{} {} {}", op, p.x, p.y);
        }
        out
    }

    /// Nearest marker whose center lies within `radius` of `(x, y)`.
    pub fn marker_at(&self, x: f64, y: f64, radius: f64) -> Option<usize> {
        self.markers
            .iter()
            .map(|m| (m.index, (m.center.x - x).hypot(m.center.y - y)))
            .filter(|(_, d)| *d <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}
