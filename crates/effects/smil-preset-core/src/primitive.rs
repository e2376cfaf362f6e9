//! The synthesized output: assignments, interpolations, reveal masks and
//! motion along a path. Primitives are declarative; begin expressions are
//! resolved by the player, or by [`crate::sampling`] for inspection.

use serde::{Deserialize, Serialize};

use crate::ids::PrimitiveId;
use crate::interp::KeySpline;
use crate::motion_path::MotionPath;
use crate::timing::Begin;
use crate::value::{AttrValue, Attribute};

/// Discrete assignment (`set`). The value holds after `begin` unless
/// `scope` limits it, after which the attribute reverts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assign {
    pub id: Option<PrimitiveId>,
    pub attribute: Attribute,
    pub value: AttrValue,
    pub begin: Begin,
    pub scope: Option<f64>,
}

impl Assign {
    pub fn new(attribute: Attribute, value: AttrValue, begin: Begin) -> Self {
        Self {
            id: None,
            attribute,
            value,
            begin,
            scope: None,
        }
    }

    pub fn with_id(mut self, id: Option<PrimitiveId>) -> Self {
        self.id = id;
        self
    }

    pub fn scoped(mut self, duration: f64) -> Self {
        self.scope = Some(duration);
        self
    }
}

/// Continuous interpolation (`animate` / `animateTransform`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interpolate {
    pub id: Option<PrimitiveId>,
    pub attribute: Attribute,
    pub from: AttrValue,
    pub to: AttrValue,
    pub begin: Begin,
    pub duration: f64,
    /// Final value persists after the interval. Always set by this crate.
    pub fill_hold: bool,
    pub spline: Option<KeySpline>,
}

impl Interpolate {
    pub fn new(attribute: Attribute, from: AttrValue, to: AttrValue, begin: Begin, duration: f64) -> Self {
        Self {
            id: None,
            attribute,
            from,
            to,
            begin,
            duration,
            fill_hold: true,
            spline: None,
        }
    }

    pub fn with_id(mut self, id: Option<PrimitiveId>) -> Self {
        self.id = id;
        self
    }

    pub fn with_spline(mut self, spline: Option<KeySpline>) -> Self {
        self.spline = spline;
        self
    }
}

/// Static outline of a mask shape in object-bounding-box units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeGeometry {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Polygon {
        points: Vec<[f64; 2]>,
    },
}

impl ShapeGeometry {
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        ShapeGeometry::Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn polygon(points: &[[f64; 2]]) -> Self {
        ShapeGeometry::Polygon {
            points: points.to_vec(),
        }
    }

    /// Overwrite the geometric attribute `attribute`. Attributes the shape
    /// does not have (and transforms) are ignored.
    pub fn apply(&mut self, attribute: Attribute, value: &AttrValue) {
        match (self, attribute, value) {
            (ShapeGeometry::Rect { x, .. }, Attribute::X, AttrValue::Number(v)) => *x = *v,
            (ShapeGeometry::Rect { y, .. }, Attribute::Y, AttrValue::Number(v)) => *y = *v,
            (ShapeGeometry::Rect { width, .. }, Attribute::Width, AttrValue::Number(v)) => *width = *v,
            (ShapeGeometry::Rect { height, .. }, Attribute::Height, AttrValue::Number(v)) => {
                *height = *v
            }
            (ShapeGeometry::Circle { r, .. }, Attribute::Radius, AttrValue::Number(v)) => *r = *v,
            (ShapeGeometry::Ellipse { rx, .. }, Attribute::RadiusX, AttrValue::Number(v)) => *rx = *v,
            (ShapeGeometry::Ellipse { ry, .. }, Attribute::RadiusY, AttrValue::Number(v)) => *ry = *v,
            (ShapeGeometry::Polygon { points }, Attribute::Points, AttrValue::Points(v)) => {
                points.clone_from(v)
            }
            _ => {}
        }
    }

    /// Whether `p` lies inside the outline. Polygons use the even-odd rule;
    /// zero-area outlines contain nothing.
    pub fn contains(&self, [px, py]: [f64; 2]) -> bool {
        match self {
            ShapeGeometry::Rect {
                x,
                y,
                width,
                height,
            } => {
                *width > 0.0
                    && *height > 0.0
                    && px >= *x
                    && px < x + width
                    && py >= *y
                    && py < y + height
            }
            ShapeGeometry::Circle { cx, cy, r } => {
                let (dx, dy) = (px - cx, py - cy);
                dx * dx + dy * dy < r * r
            }
            ShapeGeometry::Ellipse { cx, cy, rx, ry } => {
                if *rx <= 0.0 || *ry <= 0.0 {
                    return false;
                }
                let (dx, dy) = ((px - cx) / rx, (py - cy) / ry);
                dx * dx + dy * dy < 1.0
            }
            ShapeGeometry::Polygon { points } => {
                let n = points.len();
                let mut inside = false;
                for i in 0..n {
                    let [xi, yi] = points[i];
                    let [xj, yj] = points[(i + n - 1) % n];
                    if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
                        inside = !inside;
                    }
                }
                inside
            }
        }
    }
}

/// Mask luminance: white reveals the object, black conceals it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskFill {
    Reveal,
    Conceal,
}

/// Timed change nested inside a mask shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeAnimation {
    Assign(Assign),
    Interpolate(Interpolate),
}

impl ShapeAnimation {
    pub fn id(&self) -> Option<&PrimitiveId> {
        match self {
            ShapeAnimation::Assign(a) => a.id.as_ref(),
            ShapeAnimation::Interpolate(i) => i.id.as_ref(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaskShape {
    pub geometry: ShapeGeometry,
    pub fill: MaskFill,
    pub initially_hidden: bool,
    pub animations: Vec<ShapeAnimation>,
}

/// Sibling mask element referenced from the object as `url(#<mask_id>)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealMask {
    pub mask_id: PrimitiveId,
    pub shapes: Vec<MaskShape>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionAlongPath {
    pub id: PrimitiveId,
    pub path: MotionPath,
    pub begin: Begin,
    pub duration: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Assign(Assign),
    Interpolate(Interpolate),
    RevealMask(RevealMask),
    MotionAlongPath(MotionAlongPath),
}

impl Primitive {
    /// Id carried by the primitive itself (masks report their mask id).
    pub fn id(&self) -> Option<&PrimitiveId> {
        match self {
            Primitive::Assign(a) => a.id.as_ref(),
            Primitive::Interpolate(i) => i.id.as_ref(),
            Primitive::RevealMask(m) => Some(&m.mask_id),
            Primitive::MotionAlongPath(m) => Some(&m.id),
        }
    }

    /// Every id defined by this primitive, nested shape animations included.
    pub fn defined_ids(&self) -> Vec<&PrimitiveId> {
        let mut out: Vec<&PrimitiveId> = self.id().into_iter().collect();
        if let Primitive::RevealMask(mask) = self {
            for shape in &mask.shapes {
                out.extend(shape.animations.iter().filter_map(ShapeAnimation::id));
            }
        }
        out
    }

    pub fn attribute(&self) -> Option<Attribute> {
        match self {
            Primitive::Assign(a) => Some(a.attribute),
            Primitive::Interpolate(i) => Some(i.attribute),
            _ => None,
        }
    }

    pub fn as_mask(&self) -> Option<&RevealMask> {
        match self {
            Primitive::RevealMask(m) => Some(m),
            _ => None,
        }
    }
}

impl From<Assign> for Primitive {
    fn from(a: Assign) -> Self {
        Primitive::Assign(a)
    }
}

impl From<Interpolate> for Primitive {
    fn from(i: Interpolate) -> Self {
        Primitive::Interpolate(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_updates_matching_attributes_only() {
        let mut rect = ShapeGeometry::rect(0.0, 0.0, 1.0, 0.0);
        rect.apply(Attribute::Height, &AttrValue::Number(0.5));
        rect.apply(Attribute::Radius, &AttrValue::Number(9.0));
        assert_eq!(rect, ShapeGeometry::rect(0.0, 0.0, 1.0, 0.5));
    }

    #[test]
    fn containment_ignores_collapsed_outlines() {
        let square = ShapeGeometry::polygon(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        assert!(square.contains([0.5, 0.5]));
        assert!(!square.contains([1.5, 0.5]));

        let collapsed = ShapeGeometry::polygon(&[[0.0, 0.0], [0.0, 0.0], [0.0, 1.0], [0.0, 1.0]]);
        assert!(!collapsed.contains([0.25, 0.5]));
        assert!(!ShapeGeometry::rect(0.2, 0.0, 0.0, 1.0).contains([0.2, 0.5]));
        assert!(!ShapeGeometry::Circle { cx: 0.5, cy: 0.5, r: 0.0 }.contains([0.5, 0.5]));

        let oval = ShapeGeometry::Ellipse {
            cx: 0.5,
            cy: 0.5,
            rx: 0.71,
            ry: 1.42,
        };
        assert!(oval.contains([0.01, 0.01]));
        assert!(!oval.contains([1.3, 0.5]));
    }

    #[test]
    fn defined_ids_include_nested_steps() {
        let root = PrimitiveId::primary(0);
        let step = Interpolate::new(
            Attribute::Points,
            AttrValue::points(&[[0.0, 0.0]]),
            AttrValue::points(&[[1.0, 1.0]]),
            Begin::with_begin_of(&root),
            1.0,
        )
        .with_id(Some(root.numbered_step(1)));
        let mask = Primitive::RevealMask(RevealMask {
            mask_id: root.mask(),
            shapes: vec![MaskShape {
                geometry: ShapeGeometry::polygon(&[[0.0, 0.0]]),
                fill: MaskFill::Reveal,
                initially_hidden: false,
                animations: vec![ShapeAnimation::Interpolate(step)],
            }],
        });
        let ids: Vec<&str> = mask.defined_ids().into_iter().map(|i| i.as_str()).collect();
        assert_eq!(ids, vec!["a_0_mask", "a_0_01"]);
    }
}
