//! Dispatch input.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{DocumentBounds, ObjectGeometry};
use crate::registry::Effect;
use crate::timing::{BeginTrigger, TimingNode};

/// One (object, click-step) pair to synthesize. Consumed by a single
/// dispatch call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationRequest {
    pub effect_id: String,
    #[serde(default)]
    pub subtype: Option<String>,
    /// Seconds.
    pub duration: f64,
    #[serde(default)]
    pub begin_trigger: BeginTrigger,
    pub target: ObjectGeometry,
    pub document: DocumentBounds,
    /// Path data in document-relative units, motion-path presets only.
    #[serde(default)]
    pub motion_path: Option<String>,
}

impl AnimationRequest {
    pub fn new(
        effect_id: impl Into<String>,
        duration: f64,
        target: ObjectGeometry,
        document: DocumentBounds,
    ) -> Self {
        Self {
            effect_id: effect_id.into(),
            subtype: None,
            duration,
            begin_trigger: BeginTrigger::ExternalClick,
            target,
            document,
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

    pub fn with_motion_path(mut self, path: impl Into<String>) -> Self {
        self.motion_path = Some(path.into());
        self
    }
}

impl TimingNode {
    /// Bind the node to its object, resolving the duration from the
    /// effect's declared carrier (or the priority order for effects that
    /// declare none).
    pub fn into_request(self, target: ObjectGeometry, document: DocumentBounds) -> Result<AnimationRequest> {
        let effect = Effect::resolve(&self.effect_id, self.subtype.as_deref())?;
        let duration = self.duration(effect.duration_kind())?;
        Ok(AnimationRequest {
            effect_id: self.effect_id,
            subtype: self.subtype,
            duration,
            begin_trigger: self.begin_trigger,
            target,
            document,
            motion_path: self.motion_path,
        })
    }
}

/// Decode a request from JSON.
pub fn parse_request_json(json: &str) -> Result<AnimationRequest> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EffectError;
    use crate::timing::DurationSource;

    #[test]
    fn request_json_defaults_optional_fields() {
        let req = parse_request_json(
            r#"{
                "effect_id": "ooo-entrance-appear",
                "duration": 0.5,
                "target": { "x": 1, "y": 2, "width": 3, "height": 4 },
                "document": { "width": 28, "height": 21 }
            }"#,
        )
        .unwrap();
        assert_eq!(req.subtype, None);
        assert_eq!(req.begin_trigger, BeginTrigger::ExternalClick);
        assert_eq!(req.target, ObjectGeometry::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = parse_request_json("{ \"effect_id\": ").unwrap_err();
        assert!(matches!(err, EffectError::SerializationError { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn node_uses_declared_carrier() {
        let node = TimingNode {
            effect_id: "ooo-entrance-box".into(),
            subtype: Some("in".into()),
            durations: vec![DurationSource::Transform(9.0), DurationSource::Mask(2.0)],
            begin_trigger: BeginTrigger::ExternalClick,
            motion_path: None,
        };
        let req = node
            .into_request(
                ObjectGeometry::new(0.0, 0.0, 1.0, 1.0),
                DocumentBounds::new(10.0, 10.0),
            )
            .unwrap();
        assert_eq!(req.duration, 2.0);
        assert_eq!(req.subtype.as_deref(), Some("in"));
    }

    #[test]
    fn unknown_node_effect_is_unsupported_before_duration() {
        let mut node = TimingNode::new("ooo-entrance-spin", DurationSource::Set(1.0));
        node.durations.clear();
        let err = node
            .into_request(
                ObjectGeometry::new(0.0, 0.0, 1.0, 1.0),
                DocumentBounds::new(10.0, 10.0),
            )
            .unwrap_err();
        assert_eq!(err.category(), "registry");
    }
}
