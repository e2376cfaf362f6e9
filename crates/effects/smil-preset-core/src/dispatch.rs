//! Dispatch: resolve a request against the registry and run the matching
//! generator.
//!
//! A [`Synthesizer`] owns the configuration and the random source used by
//! the randomized families and the random delegate. The id sequence is
//! passed in by the caller so one sequence can span a whole conversion run.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::builder::EffectBuilder;
use crate::effects::masks::{self, MaskEffect};
use crate::effects::{directional, motion, transform, visibility};
use crate::error::{EffectError, Result};
use crate::geometry::{DocumentBounds, ObjectGeometry};
use crate::ids::IdSource;
use crate::motion_path::MotionPath;
use crate::quick::Polarity;
use crate::registry::{Effect, EffectClass, Entrance, Exit};
use crate::request::AnimationRequest;
use crate::result::EffectResult;
use crate::timing::{validate_duration, DurationKind, DurationSource, TimingNode};
use crate::Config;

const MOTION_PATH_UNRESOLVED: &str = "quick reverse/forward is not derived for motion paths";

pub struct Synthesizer<R = StdRng> {
    cfg: Config,
    rng: R,
}

impl Synthesizer<StdRng> {
    /// Entropy-seeded synthesizer.
    pub fn new(cfg: Config) -> Self {
        Self::with_rng(cfg, StdRng::from_entropy())
    }

    /// Reproducible synthesizer for tests and golden output.
    pub fn with_seed(cfg: Config, seed: u64) -> Self {
        Self::with_rng(cfg, StdRng::seed_from_u64(seed))
    }
}

impl Default for Synthesizer<StdRng> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<R: Rng> Synthesizer<R> {
    pub fn with_rng(cfg: Config, rng: R) -> Self {
        Self { cfg, rng }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Synthesize the primitives and quick bundles for one request.
    ///
    /// Fails without allocating an id when the effect is unknown, the
    /// duration is invalid or the motion path does not parse.
    pub fn dispatch(&mut self, ids: &mut impl IdSource, req: &AnimationRequest) -> Result<EffectResult> {
        let effect = Effect::resolve(&req.effect_id, req.subtype.as_deref())?;
        let duration = validate_duration(req.duration, &req.duration.to_string())?;
        let effect_id = effect.preset_id();
        let subtype = effect.subtype().map(str::to_string);

        match effect {
            Effect::RandomEntrance => self.delegate(ids, req, EffectClass::Entrance),
            Effect::RandomExit => self.delegate(ids, req, EffectClass::Exit),
            Effect::MotionPath(_) => {
                let path = MotionPath::parse(req.motion_path.as_deref().unwrap_or_default())?;
                let mut b = EffectBuilder::new(
                    &self.cfg,
                    ids,
                    &req.begin_trigger,
                    req.target,
                    req.document,
                    duration,
                );
                motion::along_path(&mut b, &path);
                log::warn!("{effect_id}: {MOTION_PATH_UNRESOLVED}");
                Ok(b.finish_unresolved(effect_id, None, MOTION_PATH_UNRESOLVED))
            }
            Effect::Entrance(entrance) => {
                let mut b = EffectBuilder::new(
                    &self.cfg,
                    ids,
                    &req.begin_trigger,
                    req.target,
                    req.document,
                    duration,
                );
                let polarity = play_entrance(&mut b, entrance, &mut self.rng);
                Ok(b.finish(effect_id, subtype, polarity))
            }
            Effect::Exit(exit) => {
                let mut b = EffectBuilder::new(
                    &self.cfg,
                    ids,
                    &req.begin_trigger,
                    req.target,
                    req.document,
                    duration,
                );
                play_exit(&mut b, exit, &mut self.rng);
                Ok(b.finish(effect_id, subtype, Polarity::Exit))
            }
        }
    }

    /// Dispatch an ingested timing node, resolving its duration carrier.
    pub fn dispatch_node(
        &mut self,
        ids: &mut impl IdSource,
        node: &TimingNode,
        target: ObjectGeometry,
        document: DocumentBounds,
    ) -> Result<EffectResult> {
        let req = node.clone().into_request(target, document)?;
        self.dispatch(ids, &req)
    }

    /// Like [`Synthesizer::dispatch`], but logs the failure and skips the
    /// step instead of returning it.
    pub fn dispatch_lenient(&mut self, ids: &mut impl IdSource, req: &AnimationRequest) -> Option<EffectResult> {
        match self.dispatch(ids, req) {
            Ok(result) => Some(result),
            Err(err) => {
                log::warn!(
                    "[{}] skipping {}: {err}",
                    err.category(),
                    req.effect_id
                );
                None
            }
        }
    }

    /// Pick a concrete effect and subtype of `class` uniformly, then
    /// re-dispatch with a minimal node carrying only the duration.
    fn delegate(
        &mut self,
        ids: &mut impl IdSource,
        req: &AnimationRequest,
        class: EffectClass,
    ) -> Result<EffectResult> {
        let Some(name) = class.names().choose(&mut self.rng) else {
            return Err(EffectError::UnsupportedEffect {
                effect_id: req.effect_id.clone(),
            });
        };
        let effect_id = format!("{}{name}", class.prefix());
        let effect = Effect::resolve(&effect_id, None)?;
        let subtype = effect.subtype_names().choose(&mut self.rng).copied();
        log::debug!(
            "{}: delegating to {effect_id} ({})",
            req.effect_id,
            subtype.unwrap_or("-")
        );

        let kind = effect.duration_kind().unwrap_or(DurationKind::PRIORITY[0]);
        let mut node = TimingNode::new(effect_id, DurationSource::new(kind, req.duration))
            .with_trigger(req.begin_trigger.clone());
        if let Some(subtype) = subtype {
            node = node.with_subtype(subtype);
        }
        self.dispatch_node(ids, &node, req.target, req.document)
    }
}

/// One-shot dispatch with the default configuration and an entropy-seeded
/// random source.
pub fn dispatch(ids: &mut impl IdSource, req: &AnimationRequest) -> Result<EffectResult> {
    Synthesizer::new(Config::default()).dispatch(ids, req)
}

fn play_entrance<R: Rng + ?Sized>(b: &mut EffectBuilder<'_>, entrance: Entrance, rng: &mut R) -> Polarity {
    match entrance {
        Entrance::Appear => visibility::appear(b),
        Entrance::FlashOnce => {
            visibility::flash_once(b);
            return Polarity::Flash;
        }
        Entrance::FlyIn(dir) => directional::fly_in(b, dir, true),
        Entrance::FlyInSlow(dir) => directional::fly_in(b, dir, false),
        Entrance::EaseIn => directional::ease_in(b),
        Entrance::RiseUp => directional::rise_up(b),
        Entrance::Ascend => directional::ascend_in(b),
        Entrance::Descend => directional::descend_in(b),
        Entrance::FadeIn => transform::fade(b, Polarity::Entrance),
        Entrance::FadeInAndZoom => transform::fade_and_zoom(b, Polarity::Entrance),
        Entrance::Expand => transform::expand(b, Polarity::Entrance),
        Entrance::Stretchy(s) => transform::stretchy(b, s, Polarity::Entrance),
        Entrance::VenetianBlinds(o) => masks::reveal(b, MaskEffect::VenetianBlinds(o), rng),
        Entrance::Box(io) => masks::reveal(b, MaskEffect::Box(io), rng),
        Entrance::Checkerboard(d) => masks::reveal(b, MaskEffect::Checkerboard(d), rng),
        Entrance::Circle(io) => masks::reveal(b, MaskEffect::Circle(io), rng),
        Entrance::Oval(io) => masks::reveal(b, MaskEffect::Oval(io), rng),
        Entrance::Diamond(io) => masks::reveal(b, MaskEffect::Diamond(io), rng),
        Entrance::DissolveIn => masks::reveal(b, MaskEffect::Dissolve, rng),
        Entrance::PeekIn(edge) => masks::reveal(b, MaskEffect::Peek(edge), rng),
        Entrance::Plus(io) => masks::reveal(b, MaskEffect::Plus(io), rng),
        Entrance::RandomBars(o) => masks::reveal(b, MaskEffect::RandomBars(o), rng),
        Entrance::Split(s) => masks::reveal(b, MaskEffect::Split(s), rng),
        Entrance::DiagonalSquares(d) => masks::reveal(b, MaskEffect::DiagonalSquares(d), rng),
        Entrance::Wedge => masks::reveal(b, MaskEffect::Wedge, rng),
        Entrance::Wheel(spokes) => masks::reveal(b, MaskEffect::Wheel(spokes), rng),
        Entrance::Wipe(edge) => masks::reveal(b, MaskEffect::Wipe(edge), rng),
    }
    Polarity::Entrance
}

fn play_exit<R: Rng + ?Sized>(b: &mut EffectBuilder<'_>, exit: Exit, rng: &mut R) {
    match exit {
        Exit::Disappear => visibility::disappear(b),
        Exit::FlyOut(dir) => directional::fly_out(b, dir),
        Exit::CrawlOut(edge) => directional::crawl_out(b, edge),
        Exit::EaseOut => directional::ease_out(b),
        Exit::SinkDown => directional::sink_down(b),
        Exit::Ascend => directional::ascend_out(b),
        Exit::Descend => directional::descend_out(b),
        Exit::FadeOut => transform::fade(b, Polarity::Exit),
        Exit::FadeOutAndZoom => transform::fade_and_zoom(b, Polarity::Exit),
        Exit::Compress => transform::expand(b, Polarity::Exit),
        Exit::Stretchy(s) => transform::stretchy(b, s, Polarity::Exit),
        Exit::VenetianBlinds(o) => masks::conceal(b, MaskEffect::VenetianBlinds(o), rng),
        Exit::Box(io) => masks::conceal(b, MaskEffect::Box(io), rng),
        Exit::Checkerboard(d) => masks::conceal(b, MaskEffect::Checkerboard(d), rng),
        Exit::Circle(io) => masks::conceal(b, MaskEffect::Circle(io), rng),
        Exit::Oval(io) => masks::conceal(b, MaskEffect::Oval(io), rng),
        Exit::Diamond(io) => masks::conceal(b, MaskEffect::Diamond(io), rng),
        Exit::Dissolve => masks::conceal(b, MaskEffect::Dissolve, rng),
        Exit::PeekOut(edge) => masks::conceal(b, MaskEffect::Peek(edge), rng),
        Exit::Plus(io) => masks::conceal(b, MaskEffect::Plus(io), rng),
        Exit::RandomBars(o) => masks::conceal(b, MaskEffect::RandomBars(o), rng),
        Exit::Split(s) => masks::conceal(b, MaskEffect::Split(s), rng),
        Exit::DiagonalSquares(d) => masks::conceal(b, MaskEffect::DiagonalSquares(d), rng),
        Exit::Wedge => masks::conceal(b, MaskEffect::Wedge, rng),
        Exit::Wheel(spokes) => masks::conceal(b, MaskEffect::Wheel(spokes), rng),
        Exit::Wipe(edge) => masks::conceal(b, MaskEffect::Wipe(edge), rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdAllocator;

    fn request(effect_id: &str) -> AnimationRequest {
        AnimationRequest::new(
            effect_id,
            1.0,
            ObjectGeometry::new(2.0, 3.0, 5.0, 4.0),
            DocumentBounds::new(28.0, 21.0),
        )
    }

    #[test]
    fn failures_do_not_consume_ids() {
        let mut synth = Synthesizer::with_seed(Config::default(), 1);
        let mut ids = IdAllocator::new();
        assert!(synth.dispatch(&mut ids, &request("ooo-entrance-spin")).is_err());
        let mut negative = request("ooo-entrance-appear");
        negative.duration = -1.0;
        assert!(synth.dispatch(&mut ids, &negative).is_err());
        let broken = request("ooo-motionpath-curvy").with_motion_path("L 0 0");
        assert!(synth.dispatch(&mut ids, &broken).is_err());
        assert_eq!(ids.issued(), 0);
    }

    #[test]
    fn lenient_dispatch_skips_unknown_effects() {
        let mut synth = Synthesizer::with_seed(Config::default(), 1);
        let mut ids = IdAllocator::new();
        assert!(synth
            .dispatch_lenient(&mut ids, &request("ooo-exit-bogus"))
            .is_none());
        assert!(synth
            .dispatch_lenient(&mut ids, &request("ooo-exit-disappear"))
            .is_some());
    }

    #[test]
    fn random_delegate_reports_concrete_effect() {
        let mut synth = Synthesizer::with_seed(Config::default(), 42);
        let mut ids = IdAllocator::new();
        for _ in 0..20 {
            let result = synth.dispatch(&mut ids, &request("ooo-exit-random")).unwrap();
            assert!(result.effect_id.starts_with("ooo-exit-"));
            assert_ne!(result.effect_id, "ooo-exit-random");
            assert_eq!(result.polarity, Some(Polarity::Exit));
        }
    }

    #[test]
    fn flash_once_is_hidden_on_both_sides() {
        let mut synth = Synthesizer::with_seed(Config::default(), 1);
        let mut ids = IdAllocator::new();
        let result = synth
            .dispatch(&mut ids, &request("ooo-entrance-flash-once"))
            .unwrap();
        assert_eq!(result.polarity, Some(Polarity::Flash));
        assert!(result.initially_hidden());
        assert_eq!(result.primitives.len(), 2);
    }
}
