//! Pointer and keyboard editing of individual chart points.
//!
//! A drag captures the plot mapping of the scene it started on, so the price
//! band does not shift under the pointer while the dragged point moves.

use crate::chart::mapping::PlotMapping;
use crate::chart::scene::Scene;
use crate::model::series::SeriesBuffer;

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    index: usize,
    mapping: PlotMapping,
}

/// Result of one drag move applied to the buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointEdit {
    pub index: usize,
    pub price: f64,
}

impl PointEdit {
    pub fn announcement(&self) -> String {
        format!("Adjusted point {} to {} dollars", self.index + 1, self.price)
    }
}

pub fn focus_announcement(index: usize, price: f64) -> String {
    format!("Focused price {} dollars at index {}", price, index + 1)
}

pub fn select_announcement(index: usize, price: f64) -> String {
    format!("Selected price {} dollars at index {}", price, index + 1)
}

#[derive(Debug, Clone, Default)]
pub struct PointEditor {
    focused: Option<usize>,
    drag: Option<DragSession>,
}

impl PointEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn dragging(&self) -> Option<usize> {
        self.drag.map(|d| d.index)
    }

    /// Capture the pointer on marker `index`. Fails on a placeholder scene or
    /// an index without a marker.
    pub fn begin_drag(&mut self, index: usize, scene: &Scene) -> bool {
        let Some(mapping) = scene.mapping else {
            return false;
        };
        if scene.marker(index).is_none() {
            return false;
        }
        self.drag = Some(DragSession { index, mapping });
        true
    }

    /// Move the captured point to vertical pixel `y`, overwriting its price.
    /// Returns `None` when no drag is active or the point has left the window.
    pub fn drag_to(&mut self, buffer: &mut SeriesBuffer, y: f64) -> Option<PointEdit> {
        let session = self.drag?;
        let price = session.mapping.price_at(y);
        if !buffer.set_price(session.index, price) {
            self.drag = None;
            return None;
        }
        Some(PointEdit {
            index: session.index,
            price,
        })
    }

    /// Release the pointer. Returns the index that was being dragged.
    pub fn end_drag(&mut self) -> Option<usize> {
        self.drag.take().map(|d| d.index)
    }

    /// Focus marker `index`, clamped into `0..len`.
    pub fn focus(&mut self, index: usize, len: usize) -> Option<usize> {
        if len == 0 {
            self.focused = None;
            return None;
        }
        let index = index.min(len - 1);
        self.focused = Some(index);
        self.focused
    }

    /// Move focus by `delta` markers without wrapping. With nothing focused the
    /// move starts from the first marker.
    pub fn navigate(&mut self, delta: isize, len: usize) -> Option<usize> {
        let current = self.focused.unwrap_or(0) as isize;
        let target = current.saturating_add(delta).max(0) as usize;
        self.focus(target, len)
    }

    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    /// Keep focus and drag on the same tick after the oldest tick is evicted.
    /// A drag on the evicted tick itself is dropped.
    pub fn shift_after_eviction(&mut self) {
        if let Some(i) = self.focused {
            self.focused = Some(i.saturating_sub(1));
        }
        self.drag = match self.drag {
            Some(session) if session.index > 0 => Some(DragSession {
                index: session.index - 1,
                ..session
            }),
            _ => None,
        };
    }

    pub fn reset(&mut self) {
        self.focused = None;
        self.drag = None;
    }
}
