//! Reveal-mask families.
//!
//! Each family is first described as a [`MaskPlan`]: shapes in
//! object-bounding-box units plus the motions that reveal the object. The
//! exit twin of a family plays the same plan backwards. Emission turns a
//! plan into [`MaskShape`]s whose animations all key off the primary's
//! begin event, so multi-shape masks move in lockstep.

use rand::Rng;

use super::{partitioned, swept};
use crate::builder::EffectBuilder;
use crate::geometry::{edge_offset, Edge};
use crate::ids::PrimitiveId;
use crate::primitive::{Assign, Interpolate, MaskFill, MaskShape, ShapeAnimation, ShapeGeometry};
use crate::subtype::{CheckerDirection, Diagonal, InOut, Orientation, Split};
use crate::sweep::Spokes;
use crate::timing::Begin;
use crate::value::{AttrValue, Attribute, Visibility};

const CENTER_QUAD: [[f64; 2]; 4] = [[0.5, 0.5]; 4];
const FULL_QUAD: [[f64; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
/// Slightly oversized box so no hairline survives at the border.
const BLEED_QUAD: [[f64; 2]; 4] = [[-0.01, -0.01], [1.01, -0.01], [1.01, 1.01], [-0.01, 1.01]];
const DIAMOND: [[f64; 2]; 4] = [[0.5, -0.5], [1.5, 0.5], [0.5, 1.5], [-0.5, 0.5]];
const PLUS_BLEED: [[f64; 2]; 12] = [
    [-0.01, -0.01],
    [-0.01, -0.01],
    [-0.01, -0.01],
    [1.01, -0.01],
    [1.01, -0.01],
    [1.01, -0.01],
    [1.01, 1.01],
    [1.01, 1.01],
    [1.01, 1.01],
    [-0.01, 1.01],
    [-0.01, 1.01],
    [-0.01, 1.01],
];
const PLUS_CROSS: [[f64; 2]; 12] = [
    [0.0, 0.5],
    [0.5, 0.5],
    [0.5, 0.0],
    [0.5, 0.0],
    [0.5, 0.5],
    [1.0, 0.5],
    [1.0, 0.5],
    [0.5, 0.5],
    [0.5, 1.0],
    [0.5, 1.0],
    [0.5, 0.5],
    [0.0, 0.5],
];
/// Staircase edge swept across the box by diagonal squares.
const STAIR_STEPS: usize = 10;
const STAIR_TRAVEL: f64 = 2.0;

const CIRCLE_R: f64 = 0.71;
const OVAL_RX: f64 = 0.71;
const OVAL_RY: f64 = 1.42;
/// Checkerboard rows (or columns) and the (start, length) pairs of the two
/// alternating row phases.
const CHECKER_ROWS: usize = 10;
const CHECKER_ROW_HEIGHT: f64 = 0.11;
const CHECKER_PHASES: [&[[f64; 2]]; 2] = [
    &[[-0.1, 0.21], [0.1, 0.21], [0.3, 0.21], [0.5, 0.21], [0.7, 0.21], [0.9, 0.21]],
    &[[-0.01, 0.22], [0.2, 0.21], [0.4, 0.21], [0.6, 0.21], [0.8, 0.22]],
];
const SPLIT_OFF_BEFORE: f64 = -0.51;
const SPLIT_OFF_AFTER: f64 = 1.01;

/// Naming of chained sweep steps.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum StepNaming {
    /// `_<letter>1`, `_<letter>2`, ...
    Lettered(char),
    /// `_01`, `_02`, ...
    Numbered,
}

impl StepNaming {
    fn id(self, primary: &PrimitiveId, step: usize) -> PrimitiveId {
        match self {
            StepNaming::Lettered(c) => primary.lettered_step(c, step),
            StepNaming::Numbered => primary.numbered_step(step),
        }
    }
}

/// How one mask shape changes over the effect.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Motion {
    /// Interpolate over the whole duration.
    Tween {
        attribute: Attribute,
        from: AttrValue,
        to: AttrValue,
    },
    /// Switch from `from` to `to` at `offset` seconds into the effect.
    Snap {
        attribute: Attribute,
        from: AttrValue,
        to: AttrValue,
        offset: f64,
    },
    /// Chain of `points` interpolations, each `step` seconds long, every
    /// step begun on the previous step's end.
    Sweep {
        states: Vec<Vec<[f64; 2]>>,
        step: f64,
        naming: StepNaming,
    },
}

impl Motion {
    pub fn tween(attribute: Attribute, from: AttrValue, to: AttrValue) -> Self {
        Motion::Tween { attribute, from, to }
    }

    fn attribute(&self) -> Attribute {
        match self {
            Motion::Tween { attribute, .. } | Motion::Snap { attribute, .. } => *attribute,
            Motion::Sweep { .. } => Attribute::Points,
        }
    }

    fn final_value(&self) -> Option<AttrValue> {
        match self {
            Motion::Tween { to, .. } | Motion::Snap { to, .. } => Some(to.clone()),
            Motion::Sweep { states, .. } => states.last().map(|s| AttrValue::points(s)),
        }
    }

    fn reversed(&self) -> Self {
        match self {
            Motion::Tween { attribute, from, to } => Motion::Tween {
                attribute: *attribute,
                from: to.clone(),
                to: from.clone(),
            },
            Motion::Snap {
                attribute,
                from,
                to,
                offset,
            } => Motion::Snap {
                attribute: *attribute,
                from: to.clone(),
                to: from.clone(),
                offset: *offset,
            },
            Motion::Sweep {
                states,
                step,
                naming,
            } => Motion::Sweep {
                states: states.iter().rev().cloned().collect(),
                step: *step,
                naming: *naming,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ShapePlan {
    pub geometry: ShapeGeometry,
    pub fill: MaskFill,
    pub initially_hidden: bool,
    pub motions: Vec<Motion>,
}

impl ShapePlan {
    pub fn fixed(geometry: ShapeGeometry, fill: MaskFill) -> Self {
        Self {
            geometry,
            fill,
            initially_hidden: false,
            motions: Vec::new(),
        }
    }

    pub fn moving(geometry: ShapeGeometry, fill: MaskFill, motion: Motion) -> Self {
        Self {
            motions: vec![motion],
            ..Self::fixed(geometry, fill)
        }
    }

    /// Polygon morphing from `from` to `to`.
    pub fn morph(fill: MaskFill, from: &[[f64; 2]], to: &[[f64; 2]]) -> Self {
        Self::moving(
            ShapeGeometry::polygon(from),
            fill,
            Motion::tween(Attribute::Points, AttrValue::points(from), AttrValue::points(to)),
        )
    }

    /// The shape as it stands once every motion has completed, animated
    /// back to where it started.
    fn reversed(&self) -> Self {
        let mut geometry = self.geometry.clone();
        let mut initially_hidden = self.initially_hidden;
        for motion in &self.motions {
            match (motion.attribute(), motion.final_value()) {
                (Attribute::Visibility, Some(AttrValue::Visibility(v))) => {
                    initially_hidden = v == Visibility::Hidden;
                }
                (attribute, Some(value)) => geometry.apply(attribute, &value),
                (_, None) => {}
            }
        }
        Self {
            geometry,
            fill: self.fill,
            initially_hidden,
            motions: self.motions.iter().map(Motion::reversed).collect(),
        }
    }

    fn emit(&self, primary: &PrimitiveId, duration: f64) -> MaskShape {
        let mut animations = Vec::new();
        for motion in &self.motions {
            match motion {
                Motion::Tween { attribute, from, to } => {
                    animations.push(ShapeAnimation::Interpolate(Interpolate::new(
                        *attribute,
                        from.clone(),
                        to.clone(),
                        Begin::with_begin_of(primary),
                        duration,
                    )));
                }
                Motion::Snap {
                    attribute,
                    to,
                    offset,
                    ..
                } => {
                    animations.push(ShapeAnimation::Assign(Assign::new(
                        *attribute,
                        to.clone(),
                        Begin::offset_from_begin(primary, *offset),
                    )));
                }
                Motion::Sweep {
                    states,
                    step,
                    naming,
                } => {
                    let mut prev: Option<PrimitiveId> = None;
                    for (k, pair) in states.windows(2).enumerate() {
                        let id = naming.id(primary, k + 1);
                        let begin = match &prev {
                            None => Begin::with_begin_of(primary),
                            Some(p) => Begin::after_end_of(p),
                        };
                        animations.push(ShapeAnimation::Interpolate(
                            Interpolate::new(
                                Attribute::Points,
                                AttrValue::points(&pair[0]),
                                AttrValue::points(&pair[1]),
                                begin,
                                *step,
                            )
                            .with_id(Some(id.clone())),
                        ));
                        prev = Some(id);
                    }
                }
            }
        }
        MaskShape {
            geometry: self.geometry.clone(),
            fill: self.fill,
            initially_hidden: self.initially_hidden,
            animations,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct MaskPlan {
    pub shapes: Vec<ShapePlan>,
}

impl MaskPlan {
    pub fn new(shapes: Vec<ShapePlan>) -> Self {
        Self { shapes }
    }

    /// Full-box reveal backdrop under a concealing shape.
    pub fn over_backdrop(shape: ShapePlan) -> Self {
        Self::new(vec![
            ShapePlan::fixed(ShapeGeometry::rect(0.0, 0.0, 1.0, 1.0), MaskFill::Reveal),
            shape,
        ])
    }

    /// Same shapes, played from their final state back to their start.
    pub fn reversed(&self) -> Self {
        Self::new(self.shapes.iter().map(ShapePlan::reversed).collect())
    }

    pub fn into_shapes(self, primary: &PrimitiveId, duration: f64) -> Vec<MaskShape> {
        self.shapes.iter().map(|s| s.emit(primary, duration)).collect()
    }
}

/// Mask family with its subtype, shared by entrance and exit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum MaskEffect {
    VenetianBlinds(Orientation),
    Box(InOut),
    Checkerboard(CheckerDirection),
    Circle(InOut),
    Oval(InOut),
    Diamond(InOut),
    Dissolve,
    Peek(Edge),
    Plus(InOut),
    RandomBars(Orientation),
    Split(Split),
    DiagonalSquares(Diagonal),
    Wedge,
    Wheel(Spokes),
    Wipe(Edge),
}

/// Show the object and reveal it through the family's mask.
pub(crate) fn reveal<R: Rng + ?Sized>(b: &mut EffectBuilder<'_>, effect: MaskEffect, rng: &mut R) {
    b.show();
    let shapes = plan(b, effect, rng).into_shapes(b.primary(), b.duration);
    b.reveal(shapes);
    if let MaskEffect::Peek(edge) = effect {
        let offset = edge_offset(edge, &b.target);
        b.animate(
            Attribute::Translate,
            AttrValue::Pair(offset),
            AttrValue::Pair([0.0, 0.0]),
            None,
        );
    }
}

/// Cover the object by playing the family's mask backwards, then hide it.
pub(crate) fn conceal<R: Rng + ?Sized>(b: &mut EffectBuilder<'_>, effect: MaskEffect, rng: &mut R) {
    let shapes = plan(b, effect, rng)
        .reversed()
        .into_shapes(b.primary(), b.duration);
    b.reveal(shapes);
    if let MaskEffect::Peek(edge) = effect {
        let offset = edge_offset(edge, &b.target);
        b.animate(
            Attribute::Translate,
            AttrValue::Pair([0.0, 0.0]),
            AttrValue::Pair(offset),
            None,
        );
    }
    let end = b.duration;
    b.hide_after(end);
}

fn plan<R: Rng + ?Sized>(b: &EffectBuilder<'_>, effect: MaskEffect, rng: &mut R) -> MaskPlan {
    match effect {
        MaskEffect::VenetianBlinds(o) => venetian_blinds(o, b.cfg.venetian_slats),
        MaskEffect::Box(io) => quad_morph(io, &BLEED_QUAD, &CENTER_QUAD),
        MaskEffect::Checkerboard(dir) => checkerboard(dir),
        MaskEffect::Circle(io) => circle(io),
        MaskEffect::Oval(io) => oval(io),
        MaskEffect::Diamond(io) => quad_morph(io, &DIAMOND, &CENTER_QUAD),
        MaskEffect::Dissolve => {
            partitioned::dissolve(&b.target, b.duration, b.cfg.dissolve_cells_long_side, rng)
        }
        MaskEffect::Peek(edge) => peek(edge),
        MaskEffect::Plus(io) => quad_morph(io, &PLUS_BLEED, &PLUS_CROSS),
        MaskEffect::RandomBars(o) => partitioned::random_bars(o, b.duration, b.cfg.random_bar_count, rng),
        MaskEffect::Split(s) => split(s),
        MaskEffect::DiagonalSquares(d) => diagonal_squares(d),
        MaskEffect::Wedge => swept::wedge(b.duration),
        MaskEffect::Wheel(spokes) => swept::wheel(spokes, b.duration),
        MaskEffect::Wipe(edge) => wipe(edge),
    }
}

/// `in` shrinks a concealing outline away over a reveal backdrop; `out`
/// grows a revealing outline from its collapsed form.
fn quad_morph(io: InOut, outline: &[[f64; 2]], collapsed: &[[f64; 2]]) -> MaskPlan {
    match io {
        InOut::In => MaskPlan::over_backdrop(ShapePlan::morph(MaskFill::Conceal, outline, collapsed)),
        InOut::Out => MaskPlan::new(vec![ShapePlan::morph(MaskFill::Reveal, collapsed, outline)]),
    }
}

/// Slat boundaries at `ceil(i * 100 / n) / 100`.
fn slat_edge(i: usize, n: usize) -> f64 {
    ((i * 100) as f64 / n as f64).ceil() / 100.0
}

fn venetian_blinds(orientation: Orientation, slats: usize) -> MaskPlan {
    let shapes = (0..slats)
        .map(|i| {
            let cur = slat_edge(i, slats);
            let grown = slat_edge(i + 1, slats) - cur + 0.01;
            match orientation {
                Orientation::Horizontal => ShapePlan::moving(
                    ShapeGeometry::rect(0.0, cur, 1.0, 0.0),
                    MaskFill::Reveal,
                    Motion::tween(Attribute::Height, AttrValue::Number(0.0), AttrValue::Number(grown)),
                ),
                Orientation::Vertical => ShapePlan::moving(
                    ShapeGeometry::rect(cur, 0.0, 0.0, 1.0),
                    MaskFill::Reveal,
                    Motion::tween(Attribute::Width, AttrValue::Number(0.0), AttrValue::Number(grown)),
                ),
            }
        })
        .collect();
    MaskPlan::new(shapes)
}

/// Rows of tiles growing sideways (`across`) or columns growing downward,
/// alternating phase from one row to the next.
fn checkerboard(dir: CheckerDirection) -> MaskPlan {
    let mut shapes = Vec::new();
    for row in 0..CHECKER_ROWS {
        let band = row as f64 / CHECKER_ROWS as f64;
        let phase = match dir {
            CheckerDirection::Across => CHECKER_PHASES[row % 2],
            CheckerDirection::Downward => CHECKER_PHASES[(row + 1) % 2],
        };
        for &[start, length] in phase {
            let (geometry, attribute) = match dir {
                CheckerDirection::Across => (
                    ShapeGeometry::rect(start, band, 0.0, CHECKER_ROW_HEIGHT),
                    Attribute::Width,
                ),
                CheckerDirection::Downward => (
                    ShapeGeometry::rect(band, start, CHECKER_ROW_HEIGHT, 0.0),
                    Attribute::Height,
                ),
            };
            shapes.push(ShapePlan::moving(
                geometry,
                MaskFill::Reveal,
                Motion::tween(attribute, AttrValue::Number(0.0), AttrValue::Number(length)),
            ));
        }
    }
    MaskPlan::new(shapes)
}

fn circle(io: InOut) -> MaskPlan {
    let shape = |r: f64, fill: MaskFill, to: f64| {
        ShapePlan::moving(
            ShapeGeometry::Circle { cx: 0.5, cy: 0.5, r },
            fill,
            Motion::tween(Attribute::Radius, AttrValue::Number(r), AttrValue::Number(to)),
        )
    };
    match io {
        InOut::In => MaskPlan::over_backdrop(shape(CIRCLE_R, MaskFill::Conceal, 0.0)),
        InOut::Out => MaskPlan::new(vec![shape(0.0, MaskFill::Reveal, CIRCLE_R)]),
    }
}

fn oval(io: InOut) -> MaskPlan {
    let shape = |from: [f64; 2], to: [f64; 2], fill: MaskFill| ShapePlan {
        geometry: ShapeGeometry::Ellipse {
            cx: 0.5,
            cy: 0.5,
            rx: from[0],
            ry: from[1],
        },
        fill,
        initially_hidden: false,
        motions: vec![
            Motion::tween(Attribute::RadiusX, AttrValue::Number(from[0]), AttrValue::Number(to[0])),
            Motion::tween(Attribute::RadiusY, AttrValue::Number(from[1]), AttrValue::Number(to[1])),
        ],
    };
    match io {
        InOut::In => MaskPlan::over_backdrop(shape([OVAL_RX, OVAL_RY], [0.0, 0.0], MaskFill::Conceal)),
        InOut::Out => MaskPlan::new(vec![shape([0.0, 0.0], [OVAL_RX, OVAL_RY], MaskFill::Reveal)]),
    }
}

/// Revealing quad collapsed onto the edge opposite the one the object
/// slides in from, so the visible part grows as the object moves.
fn peek(edge: Edge) -> MaskPlan {
    let collapsed: [[f64; 2]; 4] = match edge {
        Edge::Top => [[0.0, 1.0], [1.0, 1.0], [1.0, 1.0], [0.0, 1.0]],
        Edge::Left => [[1.0, 0.0], [1.0, 0.0], [1.0, 1.0], [1.0, 1.0]],
        Edge::Bottom => [[0.0, 0.0], [1.0, 0.0], [1.0, 0.0], [0.0, 0.0]],
        Edge::Right => [[0.0, 0.0], [0.0, 0.0], [0.0, 1.0], [0.0, 1.0]],
    };
    MaskPlan::new(vec![ShapePlan::morph(MaskFill::Reveal, &collapsed, &FULL_QUAD)])
}

/// Revealing quad growing out of the named edge.
fn wipe(edge: Edge) -> MaskPlan {
    let collapsed: [[f64; 2]; 4] = match edge {
        Edge::Top => [[0.0, 0.0], [1.0, 0.0], [1.0, 0.0], [0.0, 0.0]],
        Edge::Left => [[0.0, 0.0], [0.0, 0.0], [0.0, 1.0], [0.0, 1.0]],
        Edge::Bottom => [[0.0, 1.0], [1.0, 1.0], [1.0, 1.0], [0.0, 1.0]],
        Edge::Right => [[1.0, 0.0], [1.0, 0.0], [1.0, 1.0], [1.0, 1.0]],
    };
    MaskPlan::new(vec![ShapePlan::morph(MaskFill::Reveal, &collapsed, &FULL_QUAD)])
}

fn split(kind: Split) -> MaskPlan {
    let half = |horizontal: bool, pos: f64, fill: MaskFill, from: f64, to: f64| {
        let (geometry, attribute) = if horizontal {
            (ShapeGeometry::rect(0.0, pos, 1.0, 0.5), Attribute::Y)
        } else {
            (ShapeGeometry::rect(pos, 0.0, 0.5, 1.0), Attribute::X)
        };
        ShapePlan::moving(
            geometry,
            fill,
            Motion::tween(attribute, AttrValue::Number(from), AttrValue::Number(to)),
        )
    };
    match kind {
        Split::HorizontalIn | Split::VerticalIn => {
            let h = kind == Split::HorizontalIn;
            MaskPlan::new(vec![
                half(h, SPLIT_OFF_BEFORE, MaskFill::Reveal, SPLIT_OFF_BEFORE, 0.0),
                half(h, SPLIT_OFF_AFTER, MaskFill::Reveal, SPLIT_OFF_AFTER, 0.5),
            ])
        }
        Split::HorizontalOut | Split::VerticalOut => {
            let h = kind == Split::HorizontalOut;
            let mut plan = MaskPlan::over_backdrop(half(h, 0.0, MaskFill::Conceal, 0.0, SPLIT_OFF_BEFORE));
            plan.shapes
                .push(half(h, 0.5, MaskFill::Conceal, 0.5, SPLIT_OFF_AFTER));
            plan
        }
    }
}

/// Staircase polygon parked beside the box and slid across it.
fn diagonal_squares(diag: Diagonal) -> MaskPlan {
    // (x of the first step, stair runs top-down, horizontal travel)
    let (x0, top_down, travel) = match diag {
        Diagonal::LeftToBottom => (1.0, true, -STAIR_TRAVEL),
        Diagonal::RightToTop => (-1.0, true, STAIR_TRAVEL),
        Diagonal::LeftToTop => (1.0, false, -STAIR_TRAVEL),
        Diagonal::RightToBottom => (-1.0, false, STAIR_TRAVEL),
    };
    let dx = 1.0 / STAIR_STEPS as f64;
    let y_at = |k: usize| {
        let y = k as f64 / STAIR_STEPS as f64;
        if top_down {
            y
        } else {
            1.0 - y
        }
    };
    let mut points = Vec::with_capacity(2 * STAIR_STEPS + 3);
    for k in 0..STAIR_STEPS {
        let x = x0 + dx * k as f64;
        points.push([x, y_at(k)]);
        points.push([x, y_at(k + 1)]);
    }
    let far = x0 + dx * STAIR_STEPS as f64;
    points.push([far, y_at(STAIR_STEPS)]);
    // close the polygon on the far side, away from the box
    let back = if travel < 0.0 { far + 1.0 } else { x0 - 1.0 };
    points.push([back, y_at(STAIR_STEPS)]);
    points.push([back, y_at(0)]);
    MaskPlan::new(vec![ShapePlan::moving(
        ShapeGeometry::Polygon { points },
        MaskFill::Reveal,
        Motion::tween(
            Attribute::Translate,
            AttrValue::Pair([0.0, 0.0]),
            AttrValue::Pair([travel, 0.0]),
        ),
    )])
}
