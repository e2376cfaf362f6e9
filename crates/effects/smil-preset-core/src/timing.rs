//! Begin expressions, triggers and duration carriers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EffectError, Result};
use crate::ids::PrimitiveId;
use crate::value::fmt_seconds;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventEdge {
    Begin,
    End,
}

/// Start or end event of another primitive.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct EventRef {
    pub id: PrimitiveId,
    pub edge: EventEdge,
}

impl EventRef {
    pub fn begin_of(id: &PrimitiveId) -> Self {
        Self {
            id: id.clone(),
            edge: EventEdge::Begin,
        }
    }

    pub fn end_of(id: &PrimitiveId) -> Self {
        Self {
            id: id.clone(),
            edge: EventEdge::End,
        }
    }
}

impl fmt::Display for EventRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.edge {
            EventEdge::Begin => write!(f, "{}.begin", self.id),
            EventEdge::End => write!(f, "{}.end", self.id),
        }
    }
}

/// Begin expression of an emitted primitive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Begin {
    /// Unscheduled; started externally (click or scripted `beginElement`).
    Indefinite,
    Event { event: EventRef, offset: f64 },
}

impl Begin {
    pub fn with_begin_of(id: &PrimitiveId) -> Self {
        Begin::Event {
            event: EventRef::begin_of(id),
            offset: 0.0,
        }
    }

    pub fn after_end_of(id: &PrimitiveId) -> Self {
        Begin::Event {
            event: EventRef::end_of(id),
            offset: 0.0,
        }
    }

    pub fn offset_from_begin(id: &PrimitiveId, offset: f64) -> Self {
        Begin::Event {
            event: EventRef::begin_of(id),
            offset,
        }
    }

    /// Referenced event, if any.
    pub fn event(&self) -> Option<&EventRef> {
        match self {
            Begin::Indefinite => None,
            Begin::Event { event, .. } => Some(event),
        }
    }
}

impl fmt::Display for Begin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Begin::Indefinite => f.write_str("indefinite"),
            Begin::Event { event, offset } if *offset == 0.0 => write!(f, "{event}"),
            Begin::Event { event, offset } if *offset < 0.0 => {
                write!(f, "{event}-{}s", fmt_seconds(-offset))
            }
            Begin::Event { event, offset } => write!(f, "{event}+{}s", fmt_seconds(*offset)),
        }
    }
}

/// How the driver starts an effect's primary primitive.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BeginTrigger {
    /// First animation of a click group.
    #[default]
    ExternalClick,
    After { event: EventRef, offset: f64 },
}

impl BeginTrigger {
    pub fn to_begin(&self) -> Begin {
        match self {
            BeginTrigger::ExternalClick => Begin::Indefinite,
            BeginTrigger::After { event, offset } => Begin::Event {
                event: event.clone(),
                offset: *offset,
            },
        }
    }
}

/// Which timing sub-node carries an effect's duration.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationKind {
    /// Transition filter (mask-based effects).
    Mask,
    /// Animate / animateTransform / animateMotion.
    Transform,
    /// Plain set.
    Set,
}

impl DurationKind {
    /// Lookup order used when the declared carrier is absent.
    pub const PRIORITY: [DurationKind; 3] =
        [DurationKind::Mask, DurationKind::Transform, DurationKind::Set];
}

/// A duration found on one of the three carriers.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "carrier", content = "seconds", rename_all = "lowercase")]
pub enum DurationSource {
    Mask(f64),
    Transform(f64),
    Set(f64),
}

impl DurationSource {
    pub fn new(kind: DurationKind, seconds: f64) -> Self {
        match kind {
            DurationKind::Mask => DurationSource::Mask(seconds),
            DurationKind::Transform => DurationSource::Transform(seconds),
            DurationKind::Set => DurationSource::Set(seconds),
        }
    }

    /// Parse a clock value such as `"1.5s"` found on a carrier.
    pub fn parse(kind: DurationKind, raw: &str) -> Result<Self> {
        parse_clock_value(raw).map(|secs| Self::new(kind, secs))
    }

    pub fn kind(&self) -> DurationKind {
        match self {
            DurationSource::Mask(_) => DurationKind::Mask,
            DurationSource::Transform(_) => DurationKind::Transform,
            DurationSource::Set(_) => DurationKind::Set,
        }
    }

    pub fn seconds(&self) -> f64 {
        match self {
            DurationSource::Mask(s) | DurationSource::Transform(s) | DurationSource::Set(s) => *s,
        }
    }
}

/// Parse a clock value by dropping unit characters (`"0.5s"` -> 0.5).
pub fn parse_clock_value(raw: &str) -> Result<f64> {
    let digits: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    let secs: f64 = digits.parse().map_err(|_| EffectError::InvalidDuration {
        raw: raw.to_string(),
    })?;
    validate_duration(secs, raw)
}

pub(crate) fn validate_duration(secs: f64, raw: &str) -> Result<f64> {
    if secs.is_finite() && secs >= 0.0 {
        Ok(secs)
    } else {
        Err(EffectError::InvalidDuration {
            raw: raw.to_string(),
        })
    }
}

/// Timing node as handed over by the document ingestion layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimingNode {
    pub effect_id: String,
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub durations: Vec<DurationSource>,
    #[serde(default)]
    pub begin_trigger: BeginTrigger,
    /// Path data for motion-path presets.
    #[serde(default)]
    pub motion_path: Option<String>,
}

impl TimingNode {
    pub fn new(effect_id: impl Into<String>, duration: DurationSource) -> Self {
        Self {
            effect_id: effect_id.into(),
            subtype: None,
            durations: vec![duration],
            begin_trigger: BeginTrigger::ExternalClick,
            motion_path: None,
        }
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    pub fn with_trigger(mut self, trigger: BeginTrigger) -> Self {
        self.begin_trigger = trigger;
        self
    }

    /// First carrier of `kind`.
    pub fn carrier(&self, kind: DurationKind) -> Option<DurationSource> {
        self.durations.iter().copied().find(|d| d.kind() == kind)
    }

    /// Duration from the declared carrier, else the first present one in
    /// mask, transform, set order.
    pub fn duration(&self, declared: Option<DurationKind>) -> Result<f64> {
        if let Some(found) = declared.and_then(|kind| self.carrier(kind)) {
            return validate_duration(found.seconds(), &found.seconds().to_string());
        }
        for kind in DurationKind::PRIORITY {
            if let Some(found) = self.carrier(kind) {
                if declared.is_some() {
                    log::debug!(
                        "{}: declared duration carrier absent, using {:?}",
                        self.effect_id,
                        kind
                    );
                }
                return validate_duration(found.seconds(), &found.seconds().to_string());
            }
        }
        Err(EffectError::MissingDurationSource {
            effect_id: self.effect_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_expressions_render() {
        let id = PrimitiveId::primary(0);
        assert_eq!(Begin::Indefinite.to_string(), "indefinite");
        assert_eq!(Begin::with_begin_of(&id).to_string(), "a_0.begin");
        assert_eq!(Begin::after_end_of(&id).to_string(), "a_0.end");
        assert_eq!(
            Begin::offset_from_begin(&id, 0.1 * 3.0).to_string(),
            "a_0.begin+0.3s"
        );
        assert_eq!(Begin::offset_from_begin(&id, -0.5).to_string(), "a_0.begin-0.5s");
    }

    #[test]
    fn closely_spaced_offsets_render_distinct() {
        let id = PrimitiveId::primary(0);
        let step = 0.00001 / 50.0;
        let rendered: std::collections::HashSet<String> = (0..50)
            .map(|k| Begin::offset_from_begin(&id, k as f64 * step).to_string())
            .collect();
        assert_eq!(rendered.len(), 50);
    }

    #[test]
    fn clock_values_strip_units() {
        assert_eq!(parse_clock_value("0.5s").unwrap(), 0.5);
        assert_eq!(parse_clock_value("2").unwrap(), 2.0);
        assert!(matches!(
            parse_clock_value("abc"),
            Err(EffectError::InvalidDuration { .. })
        ));
        assert!(parse_clock_value("-1s").is_err());
    }

    #[test]
    fn duration_prefers_declared_then_priority() {
        let node = TimingNode {
            effect_id: "ooo-entrance-random".into(),
            subtype: None,
            durations: vec![DurationSource::Set(3.0), DurationSource::Transform(2.0)],
            begin_trigger: BeginTrigger::ExternalClick,
            motion_path: None,
        };
        assert_eq!(node.duration(Some(DurationKind::Set)).unwrap(), 3.0);
        assert_eq!(node.duration(Some(DurationKind::Mask)).unwrap(), 2.0);
        assert_eq!(node.duration(None).unwrap(), 2.0);
    }

    #[test]
    fn duration_missing_everywhere() {
        let mut node = TimingNode::new("ooo-entrance-box", DurationSource::Mask(1.0));
        node.durations.clear();
        assert_eq!(
            node.duration(Some(DurationKind::Mask)),
            Err(EffectError::MissingDurationSource {
                effect_id: "ooo-entrance-box".into()
            })
        );
    }
}
