//! Pure visibility toggles: appear, disappear, flash once.

use crate::builder::EffectBuilder;
use crate::value::{AttrValue, Attribute};

pub(crate) fn appear(b: &mut EffectBuilder<'_>) {
    b.show();
}

pub(crate) fn disappear(b: &mut EffectBuilder<'_>) {
    b.assign(Attribute::Visibility, AttrValue::HIDDEN);
}

/// Visible for the effect's duration, hidden again afterwards.
pub(crate) fn flash_once(b: &mut EffectBuilder<'_>) {
    b.show();
    let end = b.duration;
    b.hide_after(end);
}
