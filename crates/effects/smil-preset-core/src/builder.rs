//! Per-dispatch primitive builder.
//!
//! The first object-level primitive an effect emits becomes the primary:
//! it carries the allocated id and the driver's begin trigger. Everything
//! emitted afterwards is keyed off the primary's begin event.

use crate::geometry::{DocumentBounds, ObjectGeometry};
use crate::ids::{IdSource, PrimitiveId};
use crate::interp::KeySpline;
use crate::motion_path::MotionPath;
use crate::primitive::{Assign, Interpolate, MaskShape, MotionAlongPath, Primitive, RevealMask};
use crate::quick::{self, Polarity, QuickBundle, Track};
use crate::result::EffectResult;
use crate::timing::{Begin, BeginTrigger};
use crate::value::{AttrValue, Attribute};
use crate::Config;

pub(crate) struct EffectBuilder<'a> {
    pub cfg: &'a Config,
    pub target: ObjectGeometry,
    pub document: DocumentBounds,
    pub duration: f64,
    primary: PrimitiveId,
    trigger: Begin,
    claimed: bool,
    primitives: Vec<Primitive>,
    tracks: Vec<Track>,
}

impl<'a> EffectBuilder<'a> {
    pub fn new(
        cfg: &'a Config,
        ids: &mut impl IdSource,
        trigger: &BeginTrigger,
        target: ObjectGeometry,
        document: DocumentBounds,
        duration: f64,
    ) -> Self {
        Self {
            cfg,
            target,
            document,
            duration,
            primary: ids.next_id(),
            trigger: trigger.to_begin(),
            claimed: false,
            primitives: Vec::new(),
            tracks: Vec::new(),
        }
    }

    pub fn primary(&self) -> &PrimitiveId {
        &self.primary
    }

    /// Begin of everything synchronised with the primary.
    pub fn at_start(&self) -> Begin {
        Begin::with_begin_of(&self.primary)
    }

    pub fn at_offset(&self, offset: f64) -> Begin {
        Begin::offset_from_begin(&self.primary, offset)
    }

    /// Id and begin for the next object-level primitive.
    fn claim(&mut self) -> (Option<PrimitiveId>, Begin) {
        if self.claimed {
            (None, self.at_start())
        } else {
            self.claimed = true;
            (Some(self.primary.clone()), self.trigger.clone())
        }
    }

    pub fn push(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    pub fn assign(&mut self, attribute: Attribute, value: AttrValue) {
        let (id, begin) = self.claim();
        self.push(Assign::new(attribute, value, begin).with_id(id));
    }

    pub fn show(&mut self) {
        self.assign(Attribute::Visibility, AttrValue::VISIBLE);
    }

    /// Hide the object once the effect's full duration has elapsed.
    pub fn hide_after(&mut self, offset: f64) {
        let begin = self.at_offset(offset);
        self.push(Assign::new(Attribute::Visibility, AttrValue::HIDDEN, begin));
    }

    /// Interpolate an object attribute over the whole duration and record
    /// it as a quick-bundle track.
    pub fn animate(&mut self, attribute: Attribute, from: AttrValue, to: AttrValue, spline: Option<KeySpline>) {
        let (id, begin) = self.claim();
        self.tracks.push(Track::new(attribute, from.clone(), to.clone()));
        let duration = self.duration;
        self.push(
            Interpolate::new(attribute, from, to, begin, duration)
                .with_id(id)
                .with_spline(spline),
        );
    }

    /// Record a track without emitting (multi-stage effects emit their own
    /// segments).
    pub fn track(&mut self, attribute: Attribute, from: AttrValue, to: AttrValue) {
        self.tracks.push(Track::new(attribute, from, to));
    }

    /// Attach a reveal mask for the effect's duration, then emit it.
    pub fn reveal(&mut self, shapes: Vec<MaskShape>) {
        let mask_id = self.primary.mask();
        let (id, begin) = self.claim();
        let scope = self.duration;
        self.push(
            Assign::new(Attribute::MaskRef, AttrValue::MaskUrl(mask_id.clone()), begin)
                .with_id(id)
                .scoped(scope),
        );
        self.push(Primitive::RevealMask(RevealMask { mask_id, shapes }));
    }

    /// Move the object along `path` (already in document units).
    pub fn follow(&mut self, path: MotionPath) {
        let (id, begin) = self.claim();
        let id = id.unwrap_or_else(|| self.primary.with_suffix("_path"));
        let duration = self.duration;
        self.push(Primitive::MotionAlongPath(MotionAlongPath {
            id,
            path,
            begin,
            duration,
        }));
    }

    pub fn finish(self, effect_id: String, subtype: Option<String>, polarity: Polarity) -> EffectResult {
        let (reverse, forward) =
            quick::synthesize(&self.primary, &self.tracks, polarity, self.cfg.quick_duration);
        EffectResult {
            primary_id: self.primary,
            effect_id,
            subtype,
            polarity: Some(polarity),
            primitives: self.primitives,
            reverse,
            forward,
        }
    }

    /// Finish without quick bundles; both carry `reason`.
    pub fn finish_unresolved(self, effect_id: String, subtype: Option<String>, reason: &str) -> EffectResult {
        let unresolved = QuickBundle::Unresolved {
            reason: reason.to_string(),
        };
        EffectResult {
            primary_id: self.primary,
            effect_id,
            subtype,
            polarity: None,
            primitives: self.primitives,
            reverse: unresolved.clone(),
            forward: unresolved,
        }
    }
}
