use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::canvas::{Canvas, Line as CanvasLine, Points},
    widgets::{Block, Borders, Widget},
};

use crate::chart::scene::{LabelKind, Point, Scene};
use crate::chart::Viewport;

/// Terminal presenter for a [`Scene`]. Scene y grows downward, canvas y grows
/// upward, so every y is flipped against the viewport height.
pub struct PriceChart<'a> {
    scene: &'a Scene,
    title: String,
    focused: Option<usize>,
    dragging: Option<usize>,
}

impl<'a> PriceChart<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            title: " Price ".to_string(),
            focused: None,
            dragging: None,
        }
    }

    pub fn title(mut self, title: String) -> Self {
        self.title = title;
        self
    }

    pub fn focused(mut self, index: Option<usize>) -> Self {
        self.focused = index;
        self
    }

    pub fn dragging(mut self, index: Option<usize>) -> Self {
        self.dragging = index;
        self
    }
}

/// Scene-pixel position under terminal cell `(column, row)` of the chart's
/// inner area, or `None` outside it.
pub fn cell_to_scene(inner: Rect, viewport: Viewport, column: u16, row: u16) -> Option<Point> {
    if inner.width == 0 || inner.height == 0 {
        return None;
    }
    if column < inner.x
        || column >= inner.x + inner.width
        || row < inner.y
        || row >= inner.y + inner.height
    {
        return None;
    }
    let x = (f64::from(column - inner.x) + 0.5) * viewport.width / f64::from(inner.width);
    let y = (f64::from(row - inner.y) + 0.5) * viewport.height / f64::from(inner.height);
    Some(Point::new(x, y))
}

/// Size of one terminal cell in scene pixels; the larger side is used as the
/// pointer hit radius.
pub fn cell_radius(inner: Rect, viewport: Viewport) -> f64 {
    if inner.width == 0 || inner.height == 0 {
        return 0.0;
    }
    let cell_w = viewport.width / f64::from(inner.width);
    let cell_h = viewport.height / f64::from(inner.height);
    cell_w.max(cell_h)
}

/// Inner drawing area of the bordered chart block.
pub fn chart_inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

impl Widget for PriceChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title.clone())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let vp = self.scene.viewport;
        let flip = |p: Point| (p.x, vp.height - p.y);

        let path: Vec<((f64, f64), (f64, f64))> = self
            .scene
            .path
            .windows(2)
            .map(|w| (flip(w[0].point()), flip(w[1].point())))
            .collect();
        let markers: Vec<(f64, f64)> = self.scene.markers.iter().map(|m| flip(m.center)).collect();
        let highlight: Vec<(f64, f64)> = [self.focused, self.dragging]
            .iter()
            .flatten()
            .filter_map(|&i| self.scene.marker(i))
            .map(|m| flip(m.center))
            .collect();

        let canvas = Canvas::default()
            .block(block)
            .marker(symbols::Marker::Braille)
            .x_bounds([0.0, vp.width])
            .y_bounds([0.0, vp.height])
            .paint(|ctx| {
                for line in &self.scene.grid {
                    let (x1, y1) = flip(line.from);
                    let (x2, y2) = flip(line.to);
                    ctx.draw(&CanvasLine::new(x1, y1, x2, y2, Color::DarkGray));
                }
                ctx.layer();
                for &((x1, y1), (x2, y2)) in &path {
                    ctx.draw(&CanvasLine::new(x1, y1, x2, y2, Color::Cyan));
                }
                ctx.draw(&Points {
                    coords: &markers,
                    color: Color::White,
                });
                if !highlight.is_empty() {
                    ctx.layer();
                    ctx.draw(&Points {
                        coords: &highlight,
                        color: Color::Yellow,
                    });
                }
                for label in &self.scene.labels {
                    let (x, y) = flip(label.at);
                    let color = match label.kind {
                        LabelKind::Placeholder => Color::Gray,
                        LabelKind::MaxPrice | LabelKind::MinPrice => Color::DarkGray,
                    };
                    ctx.print(x, y, Span::styled(label.text.clone(), Style::default().fg(color)));
                }
            });
        canvas.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_to_scene_maps_corners_into_viewport() {
        let inner = Rect::new(1, 1, 80, 20);
        let vp = Viewport::new(800.0, 320.0);
        let top_left = cell_to_scene(inner, vp, 1, 1).unwrap();
        assert!((top_left.x - 5.0).abs() < 1e-9);
        assert!((top_left.y - 8.0).abs() < 1e-9);
        assert!(cell_to_scene(inner, vp, 0, 5).is_none());
        assert!(cell_to_scene(inner, vp, 81, 5).is_none());
    }
}
