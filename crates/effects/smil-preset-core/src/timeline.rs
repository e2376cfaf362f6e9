//! Per-page click timeline consumed by the browser-side player.
//!
//! A page is a list of click groups. The first effect of a group that
//! dispatches successfully is started by the click (`indefinite`); every
//! later effect of the group begins relative to it. The serialized form is
//!
//! ```json
//! { "page_id": "page_0", "init_hidden": ["obj_1"], "init_visible": [],
//!   "animations": [ { "id": "a_0", "anim_order": ["a_0", "a_1"] } ] }
//! ```

use hashbrown::HashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dispatch::Synthesizer;
use crate::error::{EffectError, Result};
use crate::geometry::{DocumentBounds, ObjectGeometry};
use crate::ids::{IdSource, PrimitiveId};
use crate::result::EffectResult;
use crate::timing::{BeginTrigger, EventRef, TimingNode};

/// Resolves object ids to their bounding boxes.
pub trait ObjectRegistry {
    fn geometry(&self, object_id: &str) -> Option<ObjectGeometry>;

    fn lookup(&self, object_id: &str) -> Result<ObjectGeometry> {
        self.geometry(object_id).ok_or_else(|| EffectError::UnknownObject {
            object_id: object_id.to_string(),
        })
    }
}

impl ObjectRegistry for HashMap<String, ObjectGeometry> {
    fn geometry(&self, object_id: &str) -> Option<ObjectGeometry> {
        self.get(object_id).copied()
    }
}

/// One effect inside a click group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClickStep {
    pub object_id: String,
    /// Seconds after the click.
    #[serde(default)]
    pub delay: f64,
    pub node: TimingNode,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClickGroup {
    pub steps: Vec<ClickStep>,
}

/// Ingested page: its id and click groups in presentation order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSource {
    pub page_id: String,
    #[serde(default)]
    pub clicks: Vec<ClickGroup>,
}

impl PageSource {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Effects started by one click, primaries ordered by delay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClickAnimation {
    /// Primary started by the click.
    pub id: PrimitiveId,
    pub anim_order: Vec<PrimitiveId>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageTimeline {
    pub page_id: String,
    pub init_hidden: Vec<String>,
    pub init_visible: Vec<String>,
    pub animations: Vec<ClickAnimation>,
}

/// Dispatch output bound to the object it animates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlacedEffect {
    pub object_id: String,
    pub result: EffectResult,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageOutput {
    pub timeline: PageTimeline,
    pub effects: Vec<PlacedEffect>,
}

impl PageTimeline {
    /// Dispatch every step of `page`. Failing steps are logged and skipped;
    /// a click group whose steps all fail produces no animation.
    pub fn build<R: Rng>(
        page: &PageSource,
        objects: &impl ObjectRegistry,
        document: DocumentBounds,
        synth: &mut Synthesizer<R>,
        ids: &mut impl IdSource,
    ) -> PageOutput {
        let mut timeline = PageTimeline {
            page_id: page.page_id.clone(),
            ..PageTimeline::default()
        };
        let mut effects = Vec::new();

        for group in &page.clicks {
            let mut first: Option<PrimitiveId> = None;
            let mut ordered: Vec<(f64, PrimitiveId)> = Vec::new();
            for step in &group.steps {
                let trigger = match &first {
                    None => BeginTrigger::ExternalClick,
                    Some(id) => BeginTrigger::After {
                        event: EventRef::begin_of(id),
                        offset: step.delay,
                    },
                };
                let node = step.node.clone().with_trigger(trigger);
                let dispatched = objects
                    .lookup(&step.object_id)
                    .and_then(|target| synth.dispatch_node(ids, &node, target, document));
                let result = match dispatched {
                    Ok(result) => result,
                    Err(err) => {
                        log::warn!(
                            "{}: [{}] skipping {} on {}: {err}",
                            page.page_id,
                            err.category(),
                            step.node.effect_id,
                            step.object_id
                        );
                        continue;
                    }
                };
                if first.is_none() {
                    first = Some(result.primary_id.clone());
                }
                timeline.note_visibility(&step.object_id, result.initially_hidden());
                ordered.push((step.delay, result.primary_id.clone()));
                effects.push(PlacedEffect {
                    object_id: step.object_id.clone(),
                    result,
                });
            }
            if let Some(id) = first {
                ordered.sort_by(|a, b| a.0.total_cmp(&b.0));
                timeline.animations.push(ClickAnimation {
                    id,
                    anim_order: ordered.into_iter().map(|(_, id)| id).collect(),
                });
            }
        }
        PageOutput { timeline, effects }
    }

    /// The first effect that touches an object decides its initial state.
    fn note_visibility(&mut self, object_id: &str, hidden: bool) {
        let listed = |list: &[String]| list.iter().any(|o| o == object_id);
        if listed(&self.init_hidden) || listed(&self.init_visible) {
            return;
        }
        if hidden {
            self.init_hidden.push(object_id.to_string());
        } else {
            self.init_visible.push(object_id.to_string());
        }
    }

    /// Quick-bundle heads to begin, in order, to move the page from click
    /// position `from` to `to` (the number of clicks already played).
    /// Forward jumps replay `_fwd` bundles in order; backward jumps replay
    /// `_rev` bundles newest first.
    pub fn scrub(&self, from: usize, to: usize) -> Vec<PrimitiveId> {
        let to = to.min(self.animations.len());
        let from = from.min(self.animations.len());
        if to >= from {
            self.animations[from..to]
                .iter()
                .flat_map(|a| a.anim_order.iter().map(PrimitiveId::forward))
                .collect()
        } else {
            self.animations[to..from]
                .iter()
                .rev()
                .flat_map(|a| a.anim_order.iter().rev().map(PrimitiveId::reverse))
                .collect()
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Whole-presentation document: `{ "pages": [...] }`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PresentationTimeline {
    pub pages: Vec<PageTimeline>,
}

impl PresentationTimeline {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(groups: Vec<Vec<ClickStep>>) -> PageTimeline {
        PageTimeline {
            page_id: "page_0".into(),
            animations: groups
                .into_iter()
                .enumerate()
                .map(|(g, steps)| ClickAnimation {
                    id: PrimitiveId::primary(g as u32 * 10),
                    anim_order: (0..steps.len())
                        .map(|k| PrimitiveId::primary(g as u32 * 10 + k as u32))
                        .collect(),
                })
                .collect(),
            ..PageTimeline::default()
        }
    }

    fn step() -> ClickStep {
        ClickStep {
            object_id: "obj".into(),
            delay: 0.0,
            node: TimingNode::new("appear", crate::timing::DurationSource::Set(0.1)),
        }
    }

    #[test]
    fn scrub_forward_and_back() {
        let timeline = page(vec![vec![step(), step()], vec![step()]]);
        let fwd: Vec<String> = timeline.scrub(0, 2).iter().map(|i| i.to_string()).collect();
        assert_eq!(fwd, vec!["a_0_fwd", "a_1_fwd", "a_10_fwd"]);
        let rev: Vec<String> = timeline.scrub(2, 0).iter().map(|i| i.to_string()).collect();
        assert_eq!(rev, vec!["a_10_rev", "a_1_rev", "a_0_rev"]);
        assert!(timeline.scrub(1, 1).is_empty());
        assert_eq!(timeline.scrub(0, 99).len(), 3);
    }

    #[test]
    fn first_effect_decides_visibility() {
        let mut timeline = PageTimeline::default();
        timeline.note_visibility("a", true);
        timeline.note_visibility("a", false);
        timeline.note_visibility("b", false);
        timeline.note_visibility("b", true);
        assert_eq!(timeline.init_hidden, vec!["a"]);
        assert_eq!(timeline.init_visible, vec!["b"]);
    }

    #[test]
    fn missing_objects_are_reported() {
        let objects: HashMap<String, ObjectGeometry> = HashMap::new();
        assert_eq!(
            objects.lookup("obj_9"),
            Err(EffectError::UnknownObject {
                object_id: "obj_9".into()
            })
        );
    }
}
