//! Attribute vocabulary and values in renderer syntax.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::PrimitiveId;
use crate::interp::{lerp_f64, lerp_pair};

/// Attributes a primitive may target. Object-level effects use the first
/// five; mask shapes use the geometric ones (and `Translate`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Visibility,
    Opacity,
    Translate,
    Scale,
    MaskRef,
    Points,
    X,
    Y,
    Width,
    Height,
    Radius,
    RadiusX,
    RadiusY,
}

impl Attribute {
    /// Attribute name as the renderer spells it. Translate and scale are
    /// both written to `transform`; see [`Attribute::transform_type`].
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Visibility => "visibility",
            Attribute::Opacity => "opacity",
            Attribute::Translate | Attribute::Scale => "transform",
            Attribute::MaskRef => "mask",
            Attribute::Points => "points",
            Attribute::X => "x",
            Attribute::Y => "y",
            Attribute::Width => "width",
            Attribute::Height => "height",
            Attribute::Radius => "r",
            Attribute::RadiusX => "rx",
            Attribute::RadiusY => "ry",
        }
    }

    pub fn transform_type(self) -> Option<&'static str> {
        match self {
            Attribute::Translate => Some("translate"),
            Attribute::Scale => Some("scale"),
            _ => None,
        }
    }

    /// Fixed position inside quick bundles; visibility always comes last.
    pub(crate) fn quick_rank(self) -> u8 {
        match self {
            Attribute::Translate => 0,
            Attribute::Scale => 1,
            Attribute::Opacity => 2,
            Attribute::Visibility => 4,
            _ => 3,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    Hidden,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Visibility::Visible => "visible",
            Visibility::Hidden => "hidden",
        })
    }
}

/// Value carried by an assignment or interpolation endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AttrValue {
    Visibility(Visibility),
    Number(f64),
    Pair([f64; 2]),
    Points(Vec<[f64; 2]>),
    MaskUrl(PrimitiveId),
}

impl AttrValue {
    pub const VISIBLE: AttrValue = AttrValue::Visibility(Visibility::Visible);
    pub const HIDDEN: AttrValue = AttrValue::Visibility(Visibility::Hidden);

    pub fn points(pts: &[[f64; 2]]) -> Self {
        AttrValue::Points(pts.to_vec())
    }

    /// Blend towards `to` at eased progress `t`. Discrete values and
    /// mismatched kinds hold `self` until the interval completes.
    pub fn lerp(&self, to: &AttrValue, t: f64) -> AttrValue {
        if t >= 1.0 {
            return to.clone();
        }
        match (self, to) {
            (AttrValue::Number(a), AttrValue::Number(b)) => AttrValue::Number(lerp_f64(*a, *b, t)),
            (AttrValue::Pair(a), AttrValue::Pair(b)) => AttrValue::Pair(lerp_pair(*a, *b, t)),
            (AttrValue::Points(a), AttrValue::Points(b)) if a.len() == b.len() => AttrValue::Points(
                a.iter()
                    .zip(b.iter())
                    .map(|(p, q)| lerp_pair(*p, *q, t))
                    .collect(),
            ),
            _ => self.clone(),
        }
    }

    pub fn vertex_count(&self) -> Option<usize> {
        match self {
            AttrValue::Points(p) => Some(p.len()),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Visibility(v) => write!(f, "{v}"),
            AttrValue::Number(n) => f.write_str(&fmt_number(*n)),
            AttrValue::Pair([x, y]) => write!(f, "{} {}", fmt_number(*x), fmt_number(*y)),
            AttrValue::Points(pts) => f.write_str(&fmt_points(pts)),
            AttrValue::MaskUrl(id) => write!(f, "url(#{id})"),
        }
    }
}

/// Shortest decimal rendering with at most six fractional digits.
pub fn fmt_number(v: f64) -> String {
    fmt_fixed(v, 6)
}

/// Clock offsets keep nanosecond resolution so closely spaced partition
/// offsets stay distinct.
pub fn fmt_seconds(v: f64) -> String {
    fmt_fixed(v, 9)
}

fn fmt_fixed(v: f64, digits: usize) -> String {
    let mut s = format!("{v:.digits$}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// `x,y x,y ...` vertex list syntax.
pub fn fmt_points(pts: &[[f64; 2]]) -> String {
    pts.iter()
        .map(|[x, y]| format!("{},{}", fmt_number(*x), fmt_number(*y)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_render_without_noise() {
        assert_eq!(fmt_number(0.0), "0");
        assert_eq!(fmt_number(-0.0), "0");
        assert_eq!(fmt_number(-7.0), "-7");
        assert_eq!(fmt_number(0.1 * 3.0), "0.3");
        assert_eq!(fmt_number(1.0 / 3.0), "0.333333");
    }

    #[test]
    fn seconds_keep_sub_microsecond_steps() {
        assert_eq!(fmt_seconds(3.0 * 0.1), "0.3");
        assert_eq!(fmt_seconds(0.001 / 50.0), "0.00002");
        assert_eq!(fmt_seconds(0.0000004), "0.0000004");
        assert_ne!(fmt_seconds(0.0000002), fmt_seconds(0.0000004));
        assert_eq!(fmt_seconds(-0.0), "0");
    }

    #[test]
    fn values_render_in_renderer_syntax() {
        assert_eq!(AttrValue::Pair([-7.0, 0.0]).to_string(), "-7 0");
        assert_eq!(
            AttrValue::points(&[[0.5, 0.5], [1.0, 0.0]]).to_string(),
            "0.5,0.5 1,0"
        );
        assert_eq!(AttrValue::HIDDEN.to_string(), "hidden");
        let mask = AttrValue::MaskUrl(PrimitiveId::primary(3).mask());
        assert_eq!(mask.to_string(), "url(#a_3_mask)");
    }

    #[test]
    fn lerp_points_componentwise() {
        let a = AttrValue::points(&[[0.0, 0.0], [1.0, 1.0]]);
        let b = AttrValue::points(&[[1.0, 0.0], [1.0, 3.0]]);
        assert_eq!(a.lerp(&b, 0.5), AttrValue::points(&[[0.5, 0.0], [1.0, 2.0]]));
        assert_eq!(a.lerp(&b, 1.0), b);
    }

    #[test]
    fn discrete_values_hold_until_end() {
        let a = AttrValue::HIDDEN;
        let b = AttrValue::VISIBLE;
        assert_eq!(a.lerp(&b, 0.99), a);
        assert_eq!(a.lerp(&b, 1.0), b);
    }
}
