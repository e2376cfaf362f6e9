//! Per-family effect generators.
//!
//! Generators write into an [`EffectBuilder`]; dispatch picks the family,
//! the builder handles ids, begin expressions and quick-bundle tracks.

pub(crate) mod directional;
pub(crate) mod masks;
pub(crate) mod motion;
pub(crate) mod partitioned;
pub(crate) mod swept;
pub(crate) mod transform;
pub(crate) mod visibility;

use crate::builder::EffectBuilder;
use crate::interp::KeySpline;
use crate::quick::Polarity;
use crate::value::{AttrValue, Attribute};

const IDENTITY_TRANSLATE: [f64; 2] = [0.0, 0.0];
const IDENTITY_SCALE: [f64; 2] = [1.0, 1.0];

/// Off-stage pose of a continuous effect. Entrances animate from this pose
/// to the resting pose, exits the other way round.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Displacement {
    pub translate: Option<[f64; 2]>,
    pub scale: Option<[f64; 2]>,
    /// Fade between transparent and opaque.
    pub fade: bool,
    /// Spline for the geometric tracks; opacity is always linear.
    pub spline: Option<KeySpline>,
}

impl Displacement {
    pub fn translate(offset: [f64; 2]) -> Self {
        Self {
            translate: Some(offset),
            ..Self::default()
        }
    }

    pub fn fade() -> Self {
        Self {
            fade: true,
            ..Self::default()
        }
    }

    pub fn with_fade(mut self) -> Self {
        self.fade = true;
        self
    }

    pub fn with_scale(mut self, scale: [f64; 2], translate: [f64; 2]) -> Self {
        self.scale = Some(scale);
        self.translate = Some(translate);
        self
    }

    pub fn with_spline(mut self, spline: KeySpline) -> Self {
        self.spline = Some(spline);
        self
    }
}

/// Show the object, then animate it from `pose` into place.
pub(crate) fn enter(b: &mut EffectBuilder<'_>, pose: &Displacement) {
    b.show();
    run(b, pose, Polarity::Entrance);
}

/// Animate the object from its place into `pose`, then hide it.
pub(crate) fn leave(b: &mut EffectBuilder<'_>, pose: &Displacement) {
    run(b, pose, Polarity::Exit);
    let end = b.duration;
    b.hide_after(end);
}

fn run(b: &mut EffectBuilder<'_>, pose: &Displacement, polarity: Polarity) {
    let ends = |off: AttrValue, rest: AttrValue| match polarity {
        Polarity::Exit => (rest, off),
        Polarity::Entrance | Polarity::Flash => (off, rest),
    };
    if let Some(t) = pose.translate {
        let (from, to) = ends(AttrValue::Pair(t), AttrValue::Pair(IDENTITY_TRANSLATE));
        b.animate(Attribute::Translate, from, to, pose.spline);
    }
    if let Some(s) = pose.scale {
        let (from, to) = ends(AttrValue::Pair(s), AttrValue::Pair(IDENTITY_SCALE));
        b.animate(Attribute::Scale, from, to, pose.spline);
    }
    if pose.fade {
        let (from, to) = ends(AttrValue::Number(0.0), AttrValue::Number(1.0));
        b.animate(Attribute::Opacity, from, to, None);
    }
}
