//! Geometry resolution: off-canvas offsets, edge offsets, proportional
//! distances and duration subdivision. Everything here is pure.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box of the animated object in document units.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ObjectGeometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> [f64; 2] {
        [self.x + self.width * 0.5, self.y + self.height * 0.5]
    }

    /// Same box moved by `offset`.
    pub fn translated(&self, offset: [f64; 2]) -> Self {
        Self {
            x: self.x + offset[0],
            y: self.y + offset[1],
            ..*self
        }
    }

    /// True when no part of the box lies strictly inside the document.
    pub fn is_outside(&self, doc: &DocumentBounds) -> bool {
        self.x + self.width <= 0.0
            || self.x >= doc.width
            || self.y + self.height <= 0.0
            || self.y >= doc.height
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentBounds {
    pub width: f64,
    pub height: f64,
}

impl DocumentBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Placement of an origin along one axis.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AxisOrigin {
    Before,
    Centered,
    After,
}

/// 8-way compass subtype (`from-top-left` ... `from-bottom-right`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Compass {
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Compass {
    pub fn horizontal(self) -> AxisOrigin {
        match self {
            Compass::TopLeft | Compass::Left | Compass::BottomLeft => AxisOrigin::Before,
            Compass::TopRight | Compass::Right | Compass::BottomRight => AxisOrigin::After,
            Compass::Top | Compass::Bottom => AxisOrigin::Centered,
        }
    }

    pub fn vertical(self) -> AxisOrigin {
        match self {
            Compass::TopLeft | Compass::Top | Compass::TopRight => AxisOrigin::Before,
            Compass::BottomLeft | Compass::Bottom | Compass::BottomRight => AxisOrigin::After,
            Compass::Left | Compass::Right => AxisOrigin::Centered,
        }
    }
}

/// Object-local edge subtype (`from-top`, `from-left`, ...).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Left,
    Right,
    Bottom,
}

fn axis_offset(origin: AxisOrigin, pos: f64, extent: f64, doc_extent: f64) -> f64 {
    match origin {
        AxisOrigin::Before => -(pos + extent),
        AxisOrigin::After => doc_extent - pos,
        AxisOrigin::Centered => 0.0,
    }
}

/// Translation that puts the object just off the document on the named
/// edge(s). Each axis resolves independently.
pub fn compass_offset(dir: Compass, obj: &ObjectGeometry, doc: &DocumentBounds) -> [f64; 2] {
    [
        axis_offset(dir.horizontal(), obj.x, obj.width, doc.width),
        axis_offset(dir.vertical(), obj.y, obj.height, doc.height),
    ]
}

/// Translation by the object's own extent towards `edge`. Peek and stretch
/// are local effects, so the document size plays no part.
pub fn edge_offset(edge: Edge, obj: &ObjectGeometry) -> [f64; 2] {
    match edge {
        Edge::Top => [0.0, -obj.height],
        Edge::Left => [-obj.width, 0.0],
        Edge::Bottom => [0.0, obj.height],
        Edge::Right => [obj.width, 0.0],
    }
}

/// Point on the object's border that stays fixed while stretching from `edge`.
pub fn edge_anchor(edge: Edge, obj: &ObjectGeometry) -> [f64; 2] {
    let [cx, cy] = obj.center();
    match edge {
        Edge::Top => [cx, obj.y],
        Edge::Left => [obj.x, cy],
        Edge::Bottom => [cx, obj.y + obj.height],
        Edge::Right => [obj.x + obj.width, cy],
    }
}

#[inline]
pub fn proportional(fraction: f64, extent: f64) -> f64 {
    fraction * extent
}

/// Translation that keeps `anchor` fixed under `scale` applied after it
/// (`translate(t) scale(s)`): `t = anchor * (1 - s)`.
#[inline]
pub fn anchored_scale_offset(anchor: [f64; 2], scale: [f64; 2]) -> [f64; 2] {
    [anchor[0] * (1.0 - scale[0]), anchor[1] * (1.0 - scale[1])]
}

/// Length of one of `steps` equal steps.
#[inline]
pub fn subdivide(total: f64, steps: usize) -> f64 {
    if steps == 0 {
        total
    } else {
        total / steps as f64
    }
}

/// Step length as a tuned fraction of the total.
#[inline]
pub fn step_duration(total: f64, fraction: f64) -> f64 {
    total * fraction
}
