use crate::chart::mapping::PlotMapping;
use crate::chart::scene::{
    GridLine, Label, LabelKind, Marker, PathCommand, Point, Scene, TextAnchor,
};
use crate::chart::{ChartType, RenderConfig, Viewport, PAD};
use crate::model::series::SeriesBuffer;

pub const GRID_LINES: usize = 5;
pub const PLACEHOLDER_TEXT: &str = "No data \u{2014} press Play";

const LABEL_X: f64 = 10.0;
const MIN_LABEL_DROP: f64 = 6.0;

/// Screen-reader text carried by the marker of tick `index` (0-based).
pub fn marker_label(index: usize, price: f64) -> String {
    format!("Point {} price {} dollars", index + 1, price)
}

/// Build the full scene for the current window. Pure: identical inputs give
/// an identical scene.
pub fn render(buffer: &SeriesBuffer, config: &RenderConfig, viewport: Viewport) -> Scene {
    let prices = buffer.prices();
    let Some(mapping) = PlotMapping::from_prices(&prices, viewport) else {
        return placeholder(viewport);
    };

    let mut scene = Scene::empty(viewport);
    scene.mapping = Some(mapping);

    if config.show_grid {
        let step = viewport.plot_height() / (GRID_LINES - 1) as f64;
        scene.grid = (0..GRID_LINES)
            .map(|i| {
                let gy = PAD + i as f64 * step;
                GridLine {
                    from: Point::new(PAD, gy),
                    to: Point::new(viewport.width - PAD, gy),
                }
            })
            .collect();
    }

    match config.chart_type {
        ChartType::Line => {
            let points: Vec<Point> = prices
                .iter()
                .enumerate()
                .map(|(i, &p)| Point::new(mapping.x(i), mapping.y(p)))
                .collect();
            scene.path = points
                .iter()
                .enumerate()
                .map(|(i, &p)| {
                    if i == 0 {
                        PathCommand::MoveTo(p)
                    } else {
                        PathCommand::LineTo(p)
                    }
                })
                .collect();
            scene.markers = points
                .iter()
                .zip(prices.iter())
                .enumerate()
                .map(|(index, (&center, &price))| Marker {
                    index,
                    center,
                    price,
                    label: marker_label(index, price),
                })
                .collect();
        }
    }

    scene.labels = vec![
        Label {
            kind: LabelKind::MaxPrice,
            at: Point::new(LABEL_X, PAD),
            anchor: TextAnchor::Start,
            text: format!("${:.2}", mapping.max_price),
        },
        Label {
            kind: LabelKind::MinPrice,
            at: Point::new(LABEL_X, viewport.height - PAD + MIN_LABEL_DROP),
            anchor: TextAnchor::Start,
            text: format!("${:.2}", mapping.min_price),
        },
    ];
    scene
}

fn placeholder(viewport: Viewport) -> Scene {
    let mut scene = Scene::empty(viewport);
    scene.labels.push(Label {
        kind: LabelKind::Placeholder,
        at: Point::new(viewport.width / 2.0, viewport.height / 2.0),
        anchor: TextAnchor::Middle,
        text: PLACEHOLDER_TEXT.to_string(),
    });
    scene
}
