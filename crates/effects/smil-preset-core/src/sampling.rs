//! Offline evaluation of synthesized primitives.
//!
//! Resolves begin expressions into absolute times and samples object (or
//! mask shape) attribute state at a given time, the way a SMIL player
//! would: among active primitives on the same attribute the one that began
//! last wins, ties going to the later one in emission order. Interpolations
//! hold their final value; scoped assignments revert when their scope ends.
//!
//! `indefinite` and events of primitives outside the sampled list resolve
//! to `t = 0`.

use hashbrown::HashMap;
use serde::Serialize;

use crate::ids::PrimitiveId;
use crate::primitive::{
    Assign, Interpolate, MaskFill, MaskShape, Primitive, RevealMask, ShapeAnimation, ShapeGeometry,
};
use crate::quick::QuickBundle;
use crate::timing::{Begin, EventEdge};
use crate::value::{AttrValue, Attribute, Visibility};

/// Absolute interval of one primitive.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Span {
    pub begin: f64,
    pub end: f64,
}

/// Anything that carries a begin expression and occupies time.
struct Timed<'a> {
    id: Option<&'a PrimitiveId>,
    begin: &'a Begin,
    length: f64,
}

fn assign_timed(a: &Assign) -> Timed<'_> {
    Timed {
        id: a.id.as_ref(),
        begin: &a.begin,
        length: a.scope.unwrap_or(0.0),
    }
}

fn interpolate_timed(i: &Interpolate) -> Timed<'_> {
    Timed {
        id: i.id.as_ref(),
        begin: &i.begin,
        length: i.duration,
    }
}

fn timed(primitives: &[Primitive]) -> Vec<Timed<'_>> {
    let mut out = Vec::new();
    for p in primitives {
        match p {
            Primitive::Assign(a) => out.push(assign_timed(a)),
            Primitive::Interpolate(i) => out.push(interpolate_timed(i)),
            Primitive::MotionAlongPath(m) => out.push(Timed {
                id: Some(&m.id),
                begin: &m.begin,
                length: m.duration,
            }),
            Primitive::RevealMask(mask) => {
                for anim in mask.shapes.iter().flat_map(|s| s.animations.iter()) {
                    out.push(match anim {
                        ShapeAnimation::Assign(a) => assign_timed(a),
                        ShapeAnimation::Interpolate(i) => interpolate_timed(i),
                    });
                }
            }
        }
    }
    out
}

/// Resolved begin and end times of every id in a primitive list.
#[derive(Clone, Debug, Default)]
pub struct Schedule {
    events: HashMap<PrimitiveId, Span>,
    settle: f64,
}

impl Schedule {
    pub fn resolve(primitives: &[Primitive]) -> Self {
        let entries = timed(primitives);
        let mut schedule = Schedule::default();
        // references normally point backwards; extra passes cover the rest
        for _ in 0..=entries.len() {
            let mut changed = false;
            for entry in &entries {
                let Some(id) = entry.id else { continue };
                let begin = schedule.time_of(entry.begin);
                let span = Span {
                    begin,
                    end: begin + entry.length,
                };
                if schedule.events.get(id) != Some(&span) {
                    schedule.events.insert(id.clone(), span);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        schedule.settle = entries
            .iter()
            .map(|e| schedule.time_of(e.begin) + e.length)
            .fold(0.0, f64::max);
        schedule
    }

    /// Absolute time of a begin expression.
    pub fn time_of(&self, begin: &Begin) -> f64 {
        match begin {
            Begin::Indefinite => 0.0,
            Begin::Event { event, offset } => {
                let base = self.events.get(&event.id).map_or(0.0, |span| match event.edge {
                    EventEdge::Begin => span.begin,
                    EventEdge::End => span.end,
                });
                base + offset
            }
        }
    }

    pub fn span(&self, id: &PrimitiveId) -> Option<Span> {
        self.events.get(id).copied()
    }

    /// Time at which every primitive has completed.
    pub fn settle_time(&self) -> f64 {
        self.settle
    }
}

/// Attribute values of the animated object at one instant. Attributes no
/// primitive has written (or whose scoped write has lapsed) are absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ObjectState {
    values: HashMap<Attribute, AttrValue>,
}

impl ObjectState {
    pub fn get(&self, attribute: Attribute) -> Option<&AttrValue> {
        self.values.get(&attribute)
    }

    pub fn visibility(&self) -> Option<Visibility> {
        match self.values.get(&Attribute::Visibility) {
            Some(AttrValue::Visibility(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&Attribute, &AttrValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Value an interpolation contributes at `t`, or `None` before it begins.
fn interpolated(i: &Interpolate, begin: f64, t: f64) -> Option<AttrValue> {
    if t < begin {
        return None;
    }
    if i.duration <= 0.0 || t >= begin + i.duration {
        return Some(i.to.clone());
    }
    let progress = (t - begin) / i.duration;
    let eased = i.spline.map_or(progress, |s| s.ease(progress));
    Some(i.from.lerp(&i.to, eased))
}

fn assigned(a: &Assign, begin: f64, t: f64) -> Option<AttrValue> {
    if t < begin {
        return None;
    }
    match a.scope {
        Some(scope) if t >= begin + scope => None,
        _ => Some(a.value.clone()),
    }
}

/// Object attribute state at `t`. Mask contents and motion paths are not
/// object attributes and are skipped.
pub fn sample_object(primitives: &[Primitive], t: f64) -> ObjectState {
    let schedule = Schedule::resolve(primitives);
    sample_with(&schedule, primitives, t)
}

fn sample_with(schedule: &Schedule, primitives: &[Primitive], t: f64) -> ObjectState {
    let mut active: Vec<(f64, usize, Attribute, AttrValue)> = primitives
        .iter()
        .enumerate()
        .filter_map(|(idx, p)| match p {
            Primitive::Assign(a) => {
                let begin = schedule.time_of(&a.begin);
                assigned(a, begin, t).map(|v| (begin, idx, a.attribute, v))
            }
            Primitive::Interpolate(i) => {
                let begin = schedule.time_of(&i.begin);
                interpolated(i, begin, t).map(|v| (begin, idx, i.attribute, v))
            }
            Primitive::RevealMask(_) | Primitive::MotionAlongPath(_) => None,
        })
        .collect();
    active.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut state = ObjectState::default();
    for (_, _, attribute, value) in active {
        state.values.insert(attribute, value);
    }
    state
}

/// Settle time of a primitive list.
pub fn settle_time(primitives: &[Primitive]) -> f64 {
    Schedule::resolve(primitives).settle_time()
}

/// State the primitives leave the object in once they have all completed.
pub fn final_state(primitives: &[Primitive]) -> ObjectState {
    let schedule = Schedule::resolve(primitives);
    sample_with(&schedule, primitives, schedule.settle_time())
}

/// State a quick bundle snaps the object to; `None` when unresolved.
pub fn apply_bundle(bundle: &QuickBundle) -> Option<ObjectState> {
    bundle.primitives().map(final_state)
}

/// Mask shape geometry at one instant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShapeState {
    pub geometry: ShapeGeometry,
    pub fill: MaskFill,
    pub translate: [f64; 2],
    pub visible: bool,
}

impl ShapeState {
    /// Whether the shape paints `point` (object-box units).
    pub fn covers(&self, [x, y]: [f64; 2]) -> bool {
        self.visible
            && self
                .geometry
                .contains([x - self.translate[0], y - self.translate[1]])
    }
}

/// State of one mask shape at `t`, with begin times taken from `schedule`
/// (resolved over the primitive list that contains the mask).
pub fn sample_shape(schedule: &Schedule, shape: &MaskShape, t: f64) -> ShapeState {
    let mut active: Vec<(f64, usize, Attribute, AttrValue)> = shape
        .animations
        .iter()
        .enumerate()
        .filter_map(|(idx, anim)| match anim {
            ShapeAnimation::Assign(a) => {
                let begin = schedule.time_of(&a.begin);
                assigned(a, begin, t).map(|v| (begin, idx, a.attribute, v))
            }
            ShapeAnimation::Interpolate(i) => {
                let begin = schedule.time_of(&i.begin);
                interpolated(i, begin, t).map(|v| (begin, idx, i.attribute, v))
            }
        })
        .collect();
    active.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut state = ShapeState {
        geometry: shape.geometry.clone(),
        fill: shape.fill,
        translate: [0.0, 0.0],
        visible: !shape.initially_hidden,
    };
    for (_, _, attribute, value) in active {
        match (attribute, value) {
            (Attribute::Visibility, AttrValue::Visibility(v)) => {
                state.visible = v == Visibility::Visible;
            }
            (Attribute::Translate, AttrValue::Pair(p)) => state.translate = p,
            (attribute, value) => state.geometry.apply(attribute, &value),
        }
    }
    state
}

/// Every shape of `mask` at `t`, in paint order.
pub fn sample_mask(schedule: &Schedule, mask: &RevealMask, t: f64) -> Vec<ShapeState> {
    mask.shapes
        .iter()
        .map(|shape| sample_shape(schedule, shape, t))
        .collect()
}

/// Whether the topmost shape painting `point` reveals it. Points no shape
/// paints stay concealed.
pub fn reveals(shapes: &[ShapeState], point: [f64; 2]) -> bool {
    shapes
        .iter()
        .rev()
        .find(|s| s.covers(point))
        .is_some_and(|s| s.fill == MaskFill::Reveal)
}

/// Share of the object box a mask reveals, sampled at the centres of a
/// `resolution × resolution` grid.
pub fn revealed_fraction(shapes: &[ShapeState], resolution: usize) -> f64 {
    if resolution == 0 {
        return 0.0;
    }
    let step = 1.0 / resolution as f64;
    let mut revealed = 0usize;
    for row in 0..resolution {
        for col in 0..resolution {
            let point = [(col as f64 + 0.5) * step, (row as f64 + 0.5) * step];
            if reveals(shapes, point) {
                revealed += 1;
            }
        }
    }
    revealed as f64 / (resolution * resolution) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::KeySpline;

    fn approx(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
    }

    fn chained() -> Vec<Primitive> {
        let root = PrimitiveId::primary(0);
        let step = root.lettered_step('s', 1);
        vec![
            Assign::new(Attribute::Visibility, AttrValue::VISIBLE, Begin::Indefinite)
                .with_id(Some(root.clone()))
                .into(),
            Interpolate::new(
                Attribute::Opacity,
                AttrValue::Number(0.0),
                AttrValue::Number(1.0),
                Begin::with_begin_of(&root),
                2.0,
            )
            .with_id(Some(step.clone()))
            .into(),
            Interpolate::new(
                Attribute::Opacity,
                AttrValue::Number(1.0),
                AttrValue::Number(0.5),
                Begin::after_end_of(&step),
                1.0,
            )
            .with_spline(Some(KeySpline::SMOOTH))
            .into(),
        ]
    }

    #[test]
    fn events_chain_through_ends() {
        let prims = chained();
        let schedule = Schedule::resolve(&prims);
        assert_eq!(
            schedule.span(&PrimitiveId::primary(0).lettered_step('s', 1)),
            Some(Span { begin: 0.0, end: 2.0 })
        );
        approx(schedule.settle_time(), 3.0, 1e-12);
    }

    #[test]
    fn later_begin_wins_and_holds() {
        let prims = chained();
        match sample_object(&prims, 1.0).get(Attribute::Opacity) {
            Some(AttrValue::Number(v)) => approx(*v, 0.5, 1e-12),
            other => panic!("unexpected {other:?}"),
        }
        match sample_object(&prims, 2.5).get(Attribute::Opacity) {
            Some(AttrValue::Number(v)) => approx(*v, 0.75, 1e-6),
            other => panic!("unexpected {other:?}"),
        }
        let settled = final_state(&prims);
        assert_eq!(settled.get(Attribute::Opacity), Some(&AttrValue::Number(0.5)));
        assert_eq!(settled.visibility(), Some(Visibility::Visible));
    }

    #[test]
    fn scoped_assign_lapses() {
        let root = PrimitiveId::primary(1);
        let prims: Vec<Primitive> = vec![Assign::new(
            Attribute::MaskRef,
            AttrValue::MaskUrl(root.mask()),
            Begin::Indefinite,
        )
        .with_id(Some(root))
        .scoped(1.5)
        .into()];
        assert!(sample_object(&prims, 1.0).get(Attribute::MaskRef).is_some());
        assert!(final_state(&prims).is_empty());
    }

    #[test]
    fn external_events_resolve_to_zero() {
        let other = PrimitiveId::from_raw("a_99");
        let prims: Vec<Primitive> = vec![Assign::new(
            Attribute::Visibility,
            AttrValue::HIDDEN,
            Begin::offset_from_begin(&other, 0.5),
        )
        .into()];
        assert!(sample_object(&prims, 0.4).is_empty());
        assert_eq!(
            sample_object(&prims, 0.5).visibility(),
            Some(Visibility::Hidden)
        );
    }

    #[test]
    fn topmost_shape_decides_coverage() {
        let root = PrimitiveId::primary(0);
        let shrink = Interpolate::new(
            Attribute::Width,
            AttrValue::Number(1.0),
            AttrValue::Number(0.0),
            Begin::with_begin_of(&root),
            2.0,
        );
        let prims: Vec<Primitive> = vec![
            Assign::new(Attribute::Visibility, AttrValue::VISIBLE, Begin::Indefinite)
                .with_id(Some(root.clone()))
                .into(),
            Primitive::RevealMask(RevealMask {
                mask_id: root.mask(),
                shapes: vec![
                    MaskShape {
                        geometry: ShapeGeometry::rect(0.0, 0.0, 1.0, 1.0),
                        fill: MaskFill::Reveal,
                        initially_hidden: false,
                        animations: Vec::new(),
                    },
                    MaskShape {
                        geometry: ShapeGeometry::rect(0.0, 0.0, 1.0, 1.0),
                        fill: MaskFill::Conceal,
                        initially_hidden: false,
                        animations: vec![ShapeAnimation::Interpolate(shrink)],
                    },
                ],
            }),
        ];
        let schedule = Schedule::resolve(&prims);
        let mask = prims[1].as_mask().unwrap();

        let half = sample_mask(&schedule, mask, 1.0);
        assert_eq!(half[1].geometry, ShapeGeometry::rect(0.0, 0.0, 0.5, 1.0));
        assert!(!reveals(&half, [0.25, 0.5]));
        assert!(reveals(&half, [0.75, 0.5]));
        approx(revealed_fraction(&half, 10), 0.5, 1e-12);

        approx(revealed_fraction(&sample_mask(&schedule, mask, 0.0), 10), 0.0, 1e-12);
        approx(revealed_fraction(&sample_mask(&schedule, mask, 2.0), 10), 1.0, 1e-12);
        assert!(!reveals(&[], [0.5, 0.5]));
    }
}
