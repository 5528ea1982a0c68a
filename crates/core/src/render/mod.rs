//! Render surface contract and the draw calls nodes emit into it.
//!
//! The engine never rasterizes anything itself. Each frame it hands fully
//! resolved [`DrawCall`]s to a [`Surface`] supplied by the host, which owns
//! clearing, compositing and presentation.

pub mod svg;

use serde::{Deserialize, Serialize};

use crate::keyframe::Rgba;

/// Pixel dimensions of a render surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Geometry of a draw call in surface pixels, before rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Circle {
        center: Point,
        radius: f32,
    },
    Rect {
        top_left: Point,
        size: Size,
        corner_radius: f32,
    },
    /// Vertices in apex, bottom-left, bottom-right order.
    Triangle { vertices: [Point; 3] },
}

/// One fully resolved shape ready to be painted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCall {
    /// Name of the node that emitted the call.
    pub node: String,
    pub shape: Shape,
    /// Point the shape is rotated about.
    pub pivot: Point,
    /// Clockwise rotation in degrees.
    pub rotation: f32,
    pub fill: Rgba,
    /// Opacity in `(0.0, 1.0]`, applied on top of the fill alpha.
    pub opacity: f32,
}

/// Host-provided drawing target.
pub trait Surface {
    fn size(&self) -> Size;

    fn draw(&mut self, call: DrawCall);
}

/// Surface that records draw calls instead of painting them.
///
/// Used by the recorder and the SVG exporter, and handy in tests.
#[derive(Debug, Clone)]
pub struct DisplayList {
    size: Size,
    calls: Vec<DrawCall>,
}

impl DisplayList {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Drops recorded calls, keeping the surface size.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }
}

impl Surface for DisplayList {
    fn size(&self) -> Size {
        self.size
    }

    fn draw(&mut self, call: DrawCall) {
        self.calls.push(call);
    }
}
