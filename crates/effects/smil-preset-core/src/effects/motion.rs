//! Custom motion paths.

use crate::builder::EffectBuilder;
use crate::motion_path::MotionPath;

/// Follow `path`, given in document fractions, scaled to the document.
pub(crate) fn along_path(b: &mut EffectBuilder<'_>, path: &MotionPath) {
    let scaled = path.scaled(&b.document);
    b.follow(scaled);
}
