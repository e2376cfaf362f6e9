//! Translate-driven families: fly, crawl, ease, ascend/descend and the
//! two-segment rise-up / sink-down.
//!
//! Flying is a global effect (offsets come from the document bounds);
//! ascend and descend travel a fraction of the object's own height.

use super::{enter, leave, Displacement};
use crate::builder::EffectBuilder;
use crate::geometry::{compass_offset, proportional, Compass, Edge};
use crate::interp::KeySpline;
use crate::primitive::Interpolate;
use crate::timing::Begin;
use crate::value::{AttrValue, Attribute};

/// Ease in/out travel as a fraction of the document height.
const EASE_TRAVEL: f64 = 0.1;
/// Rise-up / sink-down travel as a fraction of the document height.
const RISE_TRAVEL: f64 = 0.2;
/// Overshoot past the resting point before settling.
const RISE_OVERSHOOT: f64 = 0.02;
/// Share of the duration spent in the first (travel) segment.
const FIRST_SEGMENT: f64 = 0.9;
/// Ascend/descend travel as a fraction of the object height.
const CLIMB_TRAVEL: f64 = 0.3;

pub(crate) fn fly_in(b: &mut EffectBuilder<'_>, dir: Compass, smooth: bool) {
    let mut pose = Displacement::translate(compass_offset(dir, &b.target, &b.document));
    if smooth {
        pose = pose.with_spline(KeySpline::SMOOTH);
    }
    enter(b, &pose);
}

pub(crate) fn fly_out(b: &mut EffectBuilder<'_>, dir: Compass) {
    let pose = Displacement::translate(compass_offset(dir, &b.target, &b.document))
        .with_spline(KeySpline::SMOOTH);
    leave(b, &pose);
}

/// Slow linear exit towards a document edge.
pub(crate) fn crawl_out(b: &mut EffectBuilder<'_>, edge: Edge) {
    let pose = Displacement::translate(compass_offset(edge.as_compass(), &b.target, &b.document));
    leave(b, &pose);
}

/// Fade in while drifting up from below.
pub(crate) fn ease_in(b: &mut EffectBuilder<'_>) {
    let dy = proportional(EASE_TRAVEL, b.document.height);
    let pose = Displacement::translate([0.0, dy])
        .with_fade()
        .with_spline(KeySpline::DECELERATE);
    enter(b, &pose);
}

/// Fade out while drifting upwards.
pub(crate) fn ease_out(b: &mut EffectBuilder<'_>) {
    let dy = proportional(EASE_TRAVEL, b.document.height);
    let pose = Displacement::translate([0.0, -dy])
        .with_fade()
        .with_spline(KeySpline::DECELERATE);
    leave(b, &pose);
}

/// Fade in while climbing into place from below.
pub(crate) fn ascend_in(b: &mut EffectBuilder<'_>) {
    let dy = proportional(CLIMB_TRAVEL, b.target.height);
    enter(b, &Displacement::translate([0.0, dy]).with_fade());
}

/// Fade in while dropping into place from above.
pub(crate) fn descend_in(b: &mut EffectBuilder<'_>) {
    let dy = proportional(CLIMB_TRAVEL, b.target.height);
    enter(b, &Displacement::translate([0.0, -dy]).with_fade());
}

pub(crate) fn ascend_out(b: &mut EffectBuilder<'_>) {
    let dy = proportional(CLIMB_TRAVEL, b.target.height);
    leave(b, &Displacement::translate([0.0, -dy]).with_fade());
}

pub(crate) fn descend_out(b: &mut EffectBuilder<'_>) {
    let dy = proportional(CLIMB_TRAVEL, b.target.height);
    leave(b, &Displacement::translate([0.0, dy]).with_fade());
}

/// Rise from below, overshoot slightly, settle.
pub(crate) fn rise_up(b: &mut EffectBuilder<'_>) {
    let h = b.document.height;
    let start = [0.0, proportional(RISE_TRAVEL, h)];
    let overshoot = [0.0, -proportional(RISE_OVERSHOOT, h)];
    b.show();
    two_segments(b, start, overshoot, [0.0, 0.0]);
    b.animate(
        Attribute::Opacity,
        AttrValue::Number(0.0),
        AttrValue::Number(1.0),
        None,
    );
}

/// Sink past the resting depth, settle back to it, fading out throughout.
pub(crate) fn sink_down(b: &mut EffectBuilder<'_>) {
    let h = b.document.height;
    let overshoot = [0.0, proportional(RISE_TRAVEL + RISE_OVERSHOOT, h)];
    let end = [0.0, proportional(RISE_TRAVEL, h)];
    // the fade carries the primary id; the segments key off its begin
    b.animate(
        Attribute::Opacity,
        AttrValue::Number(1.0),
        AttrValue::Number(0.0),
        None,
    );
    two_segments(b, [0.0, 0.0], overshoot, end);
    let duration = b.duration;
    b.hide_after(duration);
}

/// Translate `from -> via` over the first segment (decelerating), then
/// `via -> to` over the rest (smooth), chained on the first segment's end.
/// The primary must already be claimed.
fn two_segments(b: &mut EffectBuilder<'_>, from: [f64; 2], via: [f64; 2], to: [f64; 2]) {
    let first = b.primary().lettered_step('s', 1);
    let second = b.primary().lettered_step('s', 2);
    let d1 = b.duration * FIRST_SEGMENT;
    let d2 = b.duration - d1;
    let begin = b.at_start();

    b.track(
        Attribute::Translate,
        AttrValue::Pair(from),
        AttrValue::Pair(to),
    );
    b.push(
        Interpolate::new(
            Attribute::Translate,
            AttrValue::Pair(from),
            AttrValue::Pair(via),
            begin,
            d1,
        )
        .with_id(Some(first.clone()))
        .with_spline(Some(KeySpline::DECELERATE)),
    );
    b.push(
        Interpolate::new(
            Attribute::Translate,
            AttrValue::Pair(via),
            AttrValue::Pair(to),
            Begin::after_end_of(&first),
            d2,
        )
        .with_id(Some(second))
        .with_spline(Some(KeySpline::SMOOTH)),
    );
}
