//! Scale and opacity families. Scales are applied about a fixed anchor by
//! pairing them with a compensating translate.

use super::{enter, leave, Displacement};
use crate::builder::EffectBuilder;
use crate::geometry::{anchored_scale_offset, edge_anchor, Edge, ObjectGeometry};
use crate::quick::Polarity;
use crate::subtype::Stretch;

const ZOOM_SCALE: f64 = 0.3;
const EXPAND_SCALE: f64 = 0.7;

pub(crate) fn fade(b: &mut EffectBuilder<'_>, polarity: Polarity) {
    play(b, &Displacement::fade(), polarity);
}

/// Fade while zooming about the centre.
pub(crate) fn fade_and_zoom(b: &mut EffectBuilder<'_>, polarity: Polarity) {
    let pose = centred_scale(&b.target, ZOOM_SCALE).with_fade();
    play(b, &pose, polarity);
}

/// Expand (entrance) or compress (exit): a milder centred zoom.
pub(crate) fn expand(b: &mut EffectBuilder<'_>, polarity: Polarity) {
    let pose = centred_scale(&b.target, EXPAND_SCALE).with_fade();
    play(b, &pose, polarity);
}

/// Grow from nothing along one axis, anchored at the centre or an edge.
pub(crate) fn stretchy(b: &mut EffectBuilder<'_>, stretch: Stretch, polarity: Polarity) {
    let obj = b.target;
    let (scale, anchor) = match stretch {
        Stretch::Across => ([0.0, 1.0], obj.center()),
        Stretch::FromLeft => ([0.0, 1.0], edge_anchor(Edge::Left, &obj)),
        Stretch::FromRight => ([0.0, 1.0], edge_anchor(Edge::Right, &obj)),
        Stretch::FromTop => ([1.0, 0.0], edge_anchor(Edge::Top, &obj)),
        Stretch::FromBottom => ([1.0, 0.0], edge_anchor(Edge::Bottom, &obj)),
    };
    let pose = Displacement::default().with_scale(scale, anchored_scale_offset(anchor, scale));
    play(b, &pose, polarity);
}

fn centred_scale(obj: &ObjectGeometry, factor: f64) -> Displacement {
    let scale = [factor, factor];
    Displacement::default().with_scale(scale, anchored_scale_offset(obj.center(), scale))
}

fn play(b: &mut EffectBuilder<'_>, pose: &Displacement, polarity: Polarity) {
    match polarity {
        Polarity::Exit => leave(b, pose),
        Polarity::Entrance | Polarity::Flash => enter(b, pose),
    }
}
