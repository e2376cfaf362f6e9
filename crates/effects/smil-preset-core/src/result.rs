//! Output of one dispatch call.

use serde::{Deserialize, Serialize};

use crate::ids::PrimitiveId;
use crate::primitive::{Primitive, RevealMask};
use crate::quick::{Polarity, QuickBundle};

/// Primitives for one (object, click-step) pair, in dependency-respecting
/// emission order, plus the quick reverse/forward bundles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectResult {
    pub primary_id: PrimitiveId,
    /// Canonical preset id of the effect that ran (after random delegation).
    pub effect_id: String,
    pub subtype: Option<String>,
    /// `None` for effects that do not change visibility (motion paths).
    pub polarity: Option<Polarity>,
    pub primitives: Vec<Primitive>,
    pub reverse: QuickBundle,
    pub forward: QuickBundle,
}

impl EffectResult {
    /// Whether the object must start hidden on its page.
    pub fn initially_hidden(&self) -> bool {
        matches!(self.polarity, Some(Polarity::Entrance | Polarity::Flash))
    }

    pub fn masks(&self) -> impl Iterator<Item = &RevealMask> {
        self.primitives.iter().filter_map(Primitive::as_mask)
    }

    /// Every id defined by the primitives and both bundles.
    pub fn all_ids(&self) -> Vec<&PrimitiveId> {
        let bundles = [&self.reverse, &self.forward];
        self.primitives
            .iter()
            .chain(bundles.into_iter().flat_map(|b| b.primitives().unwrap_or(&[])))
            .flat_map(Primitive::defined_ids)
            .collect()
    }
}
