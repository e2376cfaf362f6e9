//! Quick reverse/forward synthesis.
//!
//! Given the ordered `(attribute, from, to)` tracks of an effect and its
//! visibility polarity, build two bundles of near-zero-duration primitives
//! that snap the object to its pre- or post-animation state. Players apply
//! only the last write per attribute per frame, so each attribute gets its
//! own primitive and the bundle is chained translate, scale, opacity,
//! visibility, each one begun off the previous one's begin.

use serde::{Deserialize, Serialize};

use crate::ids::PrimitiveId;
use crate::primitive::{Assign, Interpolate, Primitive};
use crate::timing::Begin;
use crate::value::{AttrValue, Attribute, Visibility};

/// Visibility behaviour of an effect.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Hidden before, visible after.
    Entrance,
    /// Visible before, hidden after.
    Exit,
    /// Hidden before and after (flash once).
    Flash,
}

impl Polarity {
    pub fn before(self) -> Visibility {
        match self {
            Polarity::Entrance | Polarity::Flash => Visibility::Hidden,
            Polarity::Exit => Visibility::Visible,
        }
    }

    pub fn after(self) -> Visibility {
        match self {
            Polarity::Entrance => Visibility::Visible,
            Polarity::Exit | Polarity::Flash => Visibility::Hidden,
        }
    }
}

/// Semantic endpoints of one animated object attribute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub attribute: Attribute,
    pub from: AttrValue,
    pub to: AttrValue,
}

impl Track {
    pub fn new(attribute: Attribute, from: AttrValue, to: AttrValue) -> Self {
        Self {
            attribute,
            from,
            to,
        }
    }
}

/// A quick bundle, or the reason none could be derived.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuickBundle {
    Ready { primitives: Vec<Primitive> },
    Unresolved { reason: String },
}

impl QuickBundle {
    pub fn primitives(&self) -> Option<&[Primitive]> {
        match self {
            QuickBundle::Ready { primitives } => Some(primitives),
            QuickBundle::Unresolved { .. } => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, QuickBundle::Ready { .. })
    }
}

#[derive(Copy, Clone)]
enum Direction {
    Reverse,
    Forward,
}

/// Build the reverse and forward bundles for `primary`.
///
/// Later tracks for the same attribute replace earlier ones.
pub fn synthesize(
    primary: &PrimitiveId,
    tracks: &[Track],
    polarity: Polarity,
    epsilon: f64,
) -> (QuickBundle, QuickBundle) {
    let mut ordered: Vec<&Track> = Vec::with_capacity(tracks.len());
    for track in tracks {
        if track.attribute == Attribute::Visibility {
            continue;
        }
        match ordered.iter().position(|t| t.attribute == track.attribute) {
            Some(i) => ordered[i] = track,
            None => ordered.push(track),
        }
    }
    ordered.sort_by_key(|t| t.attribute.quick_rank());

    let reverse = bundle(primary, &ordered, polarity, Direction::Reverse, epsilon);
    let forward = bundle(primary, &ordered, polarity, Direction::Forward, epsilon);
    (
        QuickBundle::Ready { primitives: reverse },
        QuickBundle::Ready { primitives: forward },
    )
}

fn bundle(
    primary: &PrimitiveId,
    tracks: &[&Track],
    polarity: Polarity,
    dir: Direction,
    epsilon: f64,
) -> Vec<Primitive> {
    let head = match dir {
        Direction::Reverse => primary.reverse(),
        Direction::Forward => primary.forward(),
    };
    let vis = match dir {
        Direction::Reverse => polarity.before(),
        Direction::Forward => polarity.after(),
    };

    let mut out = Vec::with_capacity(tracks.len() + 1);
    let mut prev: Option<PrimitiveId> = None;
    for step in 0..=tracks.len() {
        let id = if step == 0 {
            head.clone()
        } else {
            head.with_suffix(&format!("_{step}"))
        };
        let begin = match &prev {
            None => Begin::Indefinite,
            Some(p) => Begin::with_begin_of(p),
        };
        let primitive = match tracks.get(step) {
            Some(track) => {
                let value = match dir {
                    Direction::Reverse => track.from.clone(),
                    Direction::Forward => track.to.clone(),
                };
                Primitive::Interpolate(
                    Interpolate::new(track.attribute, value.clone(), value, begin, epsilon)
                        .with_id(Some(id.clone())),
                )
            }
            None => Primitive::Assign(
                Assign::new(Attribute::Visibility, AttrValue::Visibility(vis), begin)
                    .with_id(Some(id.clone())),
            ),
        };
        out.push(primitive);
        prev = Some(id);
    }
    out
}
