//! Effect registry: the closed set of presets, their subtypes and the
//! timing carrier each one declares for its duration.
//!
//! Preset ids are namespaced (`ooo-entrance-fly-in`, `ooo-exit-box`,
//! `ooo-motionpath-circle`). Bare names resolve against the entrance table
//! first, then the exit table.

use serde::{Deserialize, Serialize};

use crate::error::{EffectError, Result};
use crate::geometry::{Compass, Edge};
use crate::subtype::{CheckerDirection, Diagonal, InOut, Orientation, Split, Stretch, Subtype};
use crate::sweep::Spokes;
use crate::timing::DurationKind;

pub const ENTRANCE_PREFIX: &str = "ooo-entrance-";
pub const EXIT_PREFIX: &str = "ooo-exit-";
pub const MOTION_PATH_PREFIX: &str = "ooo-motionpath-";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Entrance {
    Appear,
    FlyIn(Compass),
    VenetianBlinds(Orientation),
    Box(InOut),
    Checkerboard(CheckerDirection),
    Circle(InOut),
    Oval(InOut),
    FlyInSlow(Compass),
    Diamond(InOut),
    DissolveIn,
    FlashOnce,
    PeekIn(Edge),
    Plus(InOut),
    RandomBars(Orientation),
    Split(Split),
    DiagonalSquares(Diagonal),
    Wedge,
    Wheel(Spokes),
    Wipe(Edge),
    FadeIn,
    FadeInAndZoom,
    Expand,
    Stretchy(Stretch),
    EaseIn,
    RiseUp,
    Ascend,
    Descend,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Exit {
    Disappear,
    FlyOut(Compass),
    VenetianBlinds(Orientation),
    Box(InOut),
    Checkerboard(CheckerDirection),
    Circle(InOut),
    Oval(InOut),
    CrawlOut(Edge),
    Diamond(InOut),
    Dissolve,
    PeekOut(Edge),
    Plus(InOut),
    RandomBars(Orientation),
    Split(Split),
    DiagonalSquares(Diagonal),
    Wedge,
    Wheel(Spokes),
    Wipe(Edge),
    FadeOut,
    FadeOutAndZoom,
    Compress,
    Stretchy(Stretch),
    EaseOut,
    SinkDown,
    Ascend,
    Descend,
}

/// Entrance names in table order, `random` excluded.
pub const ENTRANCE_NAMES: &[&str] = &[
    "appear",
    "fly-in",
    "venetian-blinds",
    "box",
    "checkerboard",
    "circle",
    "oval",
    "fly-in-slow",
    "diamond",
    "dissolve-in",
    "flash-once",
    "peek-in",
    "plus",
    "random-bars",
    "split",
    "diagonal-squares",
    "wedge",
    "wheel",
    "wipe",
    "fade-in",
    "fade-in-and-zoom",
    "expand",
    "stretchy",
    "ease-in",
    "rise-up",
    "ascend",
    "descend",
];

/// Exit names in table order, `random` excluded.
pub const EXIT_NAMES: &[&str] = &[
    "disappear",
    "fly-out",
    "venetian-blinds",
    "box",
    "checkerboard",
    "circle",
    "oval",
    "crawl-out",
    "diamond",
    "dissolve",
    "peek-out",
    "plus",
    "random-bars",
    "split",
    "diagonal-squares",
    "wedge",
    "wheel",
    "wipe",
    "fade-out",
    "fade-out-and-zoom",
    "compress",
    "stretchy",
    "ease-out",
    "sink-down",
    "ascend",
    "descend",
];

/// Resolve `S` from a requested subtype, falling back to the first variant.
fn pick<S: Subtype>(name: &str, subtype: Option<&str>) -> S {
    S::resolve(name, subtype)
}

impl Entrance {
    /// Look up a bare entrance name.
    pub fn parse(name: &str, subtype: Option<&str>) -> Option<Self> {
        let s = subtype;
        Some(match name {
            "appear" => Entrance::Appear,
            "fly-in" => Entrance::FlyIn(pick(name, s)),
            "venetian-blinds" => Entrance::VenetianBlinds(pick(name, s)),
            "box" => Entrance::Box(pick(name, s)),
            "checkerboard" => Entrance::Checkerboard(pick(name, s)),
            "circle" => Entrance::Circle(pick(name, s)),
            "oval" => Entrance::Oval(pick(name, s)),
            "fly-in-slow" => Entrance::FlyInSlow(pick(name, s)),
            "diamond" => Entrance::Diamond(pick(name, s)),
            "dissolve-in" => Entrance::DissolveIn,
            "flash-once" => Entrance::FlashOnce,
            "peek-in" => Entrance::PeekIn(pick(name, s)),
            "plus" => Entrance::Plus(pick(name, s)),
            "random-bars" => Entrance::RandomBars(pick(name, s)),
            "split" => Entrance::Split(pick(name, s)),
            "diagonal-squares" => Entrance::DiagonalSquares(pick(name, s)),
            "wedge" => Entrance::Wedge,
            "wheel" => Entrance::Wheel(pick(name, s)),
            "wipe" => Entrance::Wipe(pick(name, s)),
            "fade-in" => Entrance::FadeIn,
            "fade-in-and-zoom" => Entrance::FadeInAndZoom,
            "expand" => Entrance::Expand,
            "stretchy" => Entrance::Stretchy(pick(name, s)),
            "ease-in" => Entrance::EaseIn,
            "rise-up" => Entrance::RiseUp,
            "ascend" => Entrance::Ascend,
            "descend" => Entrance::Descend,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Entrance::Appear => "appear",
            Entrance::FlyIn(_) => "fly-in",
            Entrance::VenetianBlinds(_) => "venetian-blinds",
            Entrance::Box(_) => "box",
            Entrance::Checkerboard(_) => "checkerboard",
            Entrance::Circle(_) => "circle",
            Entrance::Oval(_) => "oval",
            Entrance::FlyInSlow(_) => "fly-in-slow",
            Entrance::Diamond(_) => "diamond",
            Entrance::DissolveIn => "dissolve-in",
            Entrance::FlashOnce => "flash-once",
            Entrance::PeekIn(_) => "peek-in",
            Entrance::Plus(_) => "plus",
            Entrance::RandomBars(_) => "random-bars",
            Entrance::Split(_) => "split",
            Entrance::DiagonalSquares(_) => "diagonal-squares",
            Entrance::Wedge => "wedge",
            Entrance::Wheel(_) => "wheel",
            Entrance::Wipe(_) => "wipe",
            Entrance::FadeIn => "fade-in",
            Entrance::FadeInAndZoom => "fade-in-and-zoom",
            Entrance::Expand => "expand",
            Entrance::Stretchy(_) => "stretchy",
            Entrance::EaseIn => "ease-in",
            Entrance::RiseUp => "rise-up",
            Entrance::Ascend => "ascend",
            Entrance::Descend => "descend",
        }
    }

    pub fn subtype(&self) -> Option<&'static str> {
        match *self {
            Entrance::FlyIn(c) | Entrance::FlyInSlow(c) => Some(c.as_str()),
            Entrance::VenetianBlinds(o) | Entrance::RandomBars(o) => Some(o.as_str()),
            Entrance::Box(io)
            | Entrance::Circle(io)
            | Entrance::Oval(io)
            | Entrance::Diamond(io)
            | Entrance::Plus(io) => Some(io.as_str()),
            Entrance::Checkerboard(d) => Some(d.as_str()),
            Entrance::PeekIn(e) | Entrance::Wipe(e) => Some(e.as_str()),
            Entrance::Split(s) => Some(s.as_str()),
            Entrance::DiagonalSquares(d) => Some(d.as_str()),
            Entrance::Wheel(s) => Some(s.as_str()),
            Entrance::Stretchy(s) => Some(s.as_str()),
            Entrance::Appear
            | Entrance::DissolveIn
            | Entrance::FlashOnce
            | Entrance::Wedge
            | Entrance::FadeIn
            | Entrance::FadeInAndZoom
            | Entrance::Expand
            | Entrance::EaseIn
            | Entrance::RiseUp
            | Entrance::Ascend
            | Entrance::Descend => None,
        }
    }

    /// Valid subtype names for this entrance's family.
    pub fn subtype_names(&self) -> Vec<&'static str> {
        match self {
            Entrance::FlyIn(_) | Entrance::FlyInSlow(_) => Compass::names(),
            Entrance::VenetianBlinds(_) | Entrance::RandomBars(_) => Orientation::names(),
            Entrance::Box(_)
            | Entrance::Circle(_)
            | Entrance::Oval(_)
            | Entrance::Diamond(_)
            | Entrance::Plus(_) => InOut::names(),
            Entrance::Checkerboard(_) => CheckerDirection::names(),
            Entrance::PeekIn(_) | Entrance::Wipe(_) => Edge::names(),
            Entrance::Split(_) => Split::names(),
            Entrance::DiagonalSquares(_) => Diagonal::names(),
            Entrance::Wheel(_) => Spokes::names(),
            Entrance::Stretchy(_) => Stretch::names(),
            _ => Vec::new(),
        }
    }

    /// Carrier holding the duration in the source timing tree.
    pub fn duration_kind(&self) -> DurationKind {
        match self {
            Entrance::Appear | Entrance::FlashOnce => DurationKind::Set,
            Entrance::FlyIn(_)
            | Entrance::FlyInSlow(_)
            | Entrance::FadeIn
            | Entrance::FadeInAndZoom
            | Entrance::Expand
            | Entrance::Stretchy(_)
            | Entrance::EaseIn
            | Entrance::RiseUp
            | Entrance::Ascend
            | Entrance::Descend => DurationKind::Transform,
            Entrance::VenetianBlinds(_)
            | Entrance::Box(_)
            | Entrance::Checkerboard(_)
            | Entrance::Circle(_)
            | Entrance::Oval(_)
            | Entrance::Diamond(_)
            | Entrance::DissolveIn
            | Entrance::PeekIn(_)
            | Entrance::Plus(_)
            | Entrance::RandomBars(_)
            | Entrance::Split(_)
            | Entrance::DiagonalSquares(_)
            | Entrance::Wedge
            | Entrance::Wheel(_)
            | Entrance::Wipe(_) => DurationKind::Mask,
        }
    }
}

impl Exit {
    /// Look up a bare exit name.
    pub fn parse(name: &str, subtype: Option<&str>) -> Option<Self> {
        let s = subtype;
        Some(match name {
            "disappear" => Exit::Disappear,
            "fly-out" => Exit::FlyOut(pick(name, s)),
            "venetian-blinds" => Exit::VenetianBlinds(pick(name, s)),
            "box" => Exit::Box(pick(name, s)),
            "checkerboard" => Exit::Checkerboard(pick(name, s)),
            "circle" => Exit::Circle(pick(name, s)),
            "oval" => Exit::Oval(pick(name, s)),
            "crawl-out" => Exit::CrawlOut(pick(name, s)),
            "diamond" => Exit::Diamond(pick(name, s)),
            "dissolve" => Exit::Dissolve,
            "peek-out" => Exit::PeekOut(pick(name, s)),
            "plus" => Exit::Plus(pick(name, s)),
            "random-bars" => Exit::RandomBars(pick(name, s)),
            "split" => Exit::Split(pick(name, s)),
            "diagonal-squares" => Exit::DiagonalSquares(pick(name, s)),
            "wedge" => Exit::Wedge,
            "wheel" => Exit::Wheel(pick(name, s)),
            "wipe" => Exit::Wipe(pick(name, s)),
            "fade-out" => Exit::FadeOut,
            "fade-out-and-zoom" => Exit::FadeOutAndZoom,
            "compress" => Exit::Compress,
            "stretchy" => Exit::Stretchy(pick(name, s)),
            "ease-out" => Exit::EaseOut,
            "sink-down" => Exit::SinkDown,
            "ascend" => Exit::Ascend,
            "descend" => Exit::Descend,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Exit::Disappear => "disappear",
            Exit::FlyOut(_) => "fly-out",
            Exit::VenetianBlinds(_) => "venetian-blinds",
            Exit::Box(_) => "box",
            Exit::Checkerboard(_) => "checkerboard",
            Exit::Circle(_) => "circle",
            Exit::Oval(_) => "oval",
            Exit::CrawlOut(_) => "crawl-out",
            Exit::Diamond(_) => "diamond",
            Exit::Dissolve => "dissolve",
            Exit::PeekOut(_) => "peek-out",
            Exit::Plus(_) => "plus",
            Exit::RandomBars(_) => "random-bars",
            Exit::Split(_) => "split",
            Exit::DiagonalSquares(_) => "diagonal-squares",
            Exit::Wedge => "wedge",
            Exit::Wheel(_) => "wheel",
            Exit::Wipe(_) => "wipe",
            Exit::FadeOut => "fade-out",
            Exit::FadeOutAndZoom => "fade-out-and-zoom",
            Exit::Compress => "compress",
            Exit::Stretchy(_) => "stretchy",
            Exit::EaseOut => "ease-out",
            Exit::SinkDown => "sink-down",
            Exit::Ascend => "ascend",
            Exit::Descend => "descend",
        }
    }

    pub fn subtype(&self) -> Option<&'static str> {
        match *self {
            Exit::FlyOut(c) => Some(c.as_str()),
            Exit::VenetianBlinds(o) | Exit::RandomBars(o) => Some(o.as_str()),
            Exit::Box(io) | Exit::Circle(io) | Exit::Oval(io) | Exit::Diamond(io) | Exit::Plus(io) => {
                Some(io.as_str())
            }
            Exit::Checkerboard(d) => Some(d.as_str()),
            Exit::CrawlOut(e) | Exit::PeekOut(e) | Exit::Wipe(e) => Some(e.as_str()),
            Exit::Split(s) => Some(s.as_str()),
            Exit::DiagonalSquares(d) => Some(d.as_str()),
            Exit::Wheel(s) => Some(s.as_str()),
            Exit::Stretchy(s) => Some(s.as_str()),
            Exit::Disappear
            | Exit::Dissolve
            | Exit::Wedge
            | Exit::FadeOut
            | Exit::FadeOutAndZoom
            | Exit::Compress
            | Exit::EaseOut
            | Exit::SinkDown
            | Exit::Ascend
            | Exit::Descend => None,
        }
    }

    pub fn subtype_names(&self) -> Vec<&'static str> {
        match self {
            Exit::FlyOut(_) => Compass::names(),
            Exit::VenetianBlinds(_) | Exit::RandomBars(_) => Orientation::names(),
            Exit::Box(_) | Exit::Circle(_) | Exit::Oval(_) | Exit::Diamond(_) | Exit::Plus(_) => {
                InOut::names()
            }
            Exit::Checkerboard(_) => CheckerDirection::names(),
            Exit::CrawlOut(_) | Exit::PeekOut(_) | Exit::Wipe(_) => Edge::names(),
            Exit::Split(_) => Split::names(),
            Exit::DiagonalSquares(_) => Diagonal::names(),
            Exit::Wheel(_) => Spokes::names(),
            Exit::Stretchy(_) => Stretch::names(),
            _ => Vec::new(),
        }
    }

    pub fn duration_kind(&self) -> DurationKind {
        match self {
            Exit::Disappear => DurationKind::Set,
            Exit::FlyOut(_)
            | Exit::CrawlOut(_)
            | Exit::FadeOut
            | Exit::FadeOutAndZoom
            | Exit::Compress
            | Exit::Stretchy(_)
            | Exit::EaseOut
            | Exit::SinkDown
            | Exit::Ascend
            | Exit::Descend => DurationKind::Transform,
            Exit::VenetianBlinds(_)
            | Exit::Box(_)
            | Exit::Checkerboard(_)
            | Exit::Circle(_)
            | Exit::Oval(_)
            | Exit::Diamond(_)
            | Exit::Dissolve
            | Exit::PeekOut(_)
            | Exit::Plus(_)
            | Exit::RandomBars(_)
            | Exit::Split(_)
            | Exit::DiagonalSquares(_)
            | Exit::Wedge
            | Exit::Wheel(_)
            | Exit::Wipe(_) => DurationKind::Mask,
        }
    }
}

/// A resolved preset.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(tag = "class", content = "effect", rename_all = "snake_case")]
pub enum Effect {
    Entrance(Entrance),
    Exit(Exit),
    /// Uniform pick among the concrete entrances.
    RandomEntrance,
    /// Uniform pick among the concrete exits.
    RandomExit,
    /// Motion path preset; the path itself travels on the request.
    MotionPath(String),
}

/// Entrance or exit table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectClass {
    Entrance,
    Exit,
}

impl EffectClass {
    pub fn prefix(self) -> &'static str {
        match self {
            EffectClass::Entrance => ENTRANCE_PREFIX,
            EffectClass::Exit => EXIT_PREFIX,
        }
    }

    /// Concrete effect names of the table, `random` excluded.
    pub fn names(self) -> &'static [&'static str] {
        match self {
            EffectClass::Entrance => ENTRANCE_NAMES,
            EffectClass::Exit => EXIT_NAMES,
        }
    }
}

const RANDOM: &str = "random";

impl Effect {
    /// Resolve a preset id, namespaced or bare.
    pub fn resolve(effect_id: &str, subtype: Option<&str>) -> Result<Self> {
        let unsupported = || EffectError::UnsupportedEffect {
            effect_id: effect_id.to_string(),
        };
        if effect_id == RANDOM || effect_id.strip_prefix(ENTRANCE_PREFIX) == Some(RANDOM) {
            return Ok(Effect::RandomEntrance);
        }
        if effect_id.strip_prefix(EXIT_PREFIX) == Some(RANDOM) {
            return Ok(Effect::RandomExit);
        }
        if let Some(name) = effect_id.strip_prefix(ENTRANCE_PREFIX) {
            return Entrance::parse(name, subtype)
                .map(Effect::Entrance)
                .ok_or_else(unsupported);
        }
        if let Some(name) = effect_id.strip_prefix(EXIT_PREFIX) {
            return Exit::parse(name, subtype).map(Effect::Exit).ok_or_else(unsupported);
        }
        if let Some(name) = effect_id.strip_prefix(MOTION_PATH_PREFIX) {
            if name.is_empty() {
                return Err(unsupported());
            }
            return Ok(Effect::MotionPath(name.to_string()));
        }
        Entrance::parse(effect_id, subtype)
            .map(Effect::Entrance)
            .or_else(|| Exit::parse(effect_id, subtype).map(Effect::Exit))
            .ok_or_else(unsupported)
    }

    /// Namespaced preset id.
    pub fn preset_id(&self) -> String {
        match self {
            Effect::Entrance(e) => format!("{ENTRANCE_PREFIX}{}", e.name()),
            Effect::Exit(e) => format!("{EXIT_PREFIX}{}", e.name()),
            Effect::RandomEntrance => format!("{ENTRANCE_PREFIX}{RANDOM}"),
            Effect::RandomExit => format!("{EXIT_PREFIX}{RANDOM}"),
            Effect::MotionPath(name) => format!("{MOTION_PATH_PREFIX}{name}"),
        }
    }

    pub fn subtype(&self) -> Option<&'static str> {
        match self {
            Effect::Entrance(e) => e.subtype(),
            Effect::Exit(e) => e.subtype(),
            Effect::RandomEntrance | Effect::RandomExit | Effect::MotionPath(_) => None,
        }
    }

    /// `None` for the random meta-effects, whose carrier is unknown.
    pub fn duration_kind(&self) -> Option<DurationKind> {
        match self {
            Effect::Entrance(e) => Some(e.duration_kind()),
            Effect::Exit(e) => Some(e.duration_kind()),
            Effect::RandomEntrance | Effect::RandomExit => None,
            Effect::MotionPath(_) => Some(DurationKind::Transform),
        }
    }

    pub fn is_random(&self) -> bool {
        matches!(self, Effect::RandomEntrance | Effect::RandomExit)
    }

    /// Valid subtype names; empty for effects without subtypes.
    pub fn subtype_names(&self) -> Vec<&'static str> {
        match self {
            Effect::Entrance(e) => e.subtype_names(),
            Effect::Exit(e) => e.subtype_names(),
            Effect::RandomEntrance | Effect::RandomExit | Effect::MotionPath(_) => Vec::new(),
        }
    }
}

/// Every (preset id, subtype) pair the registry can produce, random
/// meta-effects and motion paths excluded.
pub fn all() -> Vec<(String, Option<&'static str>)> {
    let mut out = Vec::new();
    for class in [EffectClass::Entrance, EffectClass::Exit] {
        for name in class.names() {
            let id = format!("{}{name}", class.prefix());
            let subtypes = Effect::resolve(&id, None)
                .map(|e| e.subtype_names())
                .unwrap_or_default();
            if subtypes.is_empty() {
                out.push((id, None));
            } else {
                out.extend(subtypes.into_iter().map(|s| (id.clone(), Some(s))));
            }
        }
    }
    out
}
