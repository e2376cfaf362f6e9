//! Dissolve and random bars: every cell or bar switches on exactly once, in
//! a random order spread evenly over the duration.

use rand::Rng;

use super::masks::{MaskPlan, Motion, ShapePlan};
use crate::geometry::ObjectGeometry;
use crate::partition::{partition, DissolveGrid};
use crate::primitive::{MaskFill, ShapeGeometry};
use crate::subtype::Orientation;
use crate::value::{AttrValue, Attribute};

/// Bars start just outside the box and snap into place.
const BAR_PARKED: f64 = 1.01;
/// Bar thickness relative to its slot; the overlap hides seams.
const BAR_OVERLAP: f64 = 1.15;

pub(crate) fn dissolve<R: Rng + ?Sized>(
    target: &ObjectGeometry,
    duration: f64,
    long_side: u32,
    rng: &mut R,
) -> MaskPlan {
    let grid = DissolveGrid::for_box(target.width, target.height, long_side);
    let shapes = partition(grid.cell_count(), duration, rng)
        .into_iter()
        .map(|slot| {
            let ([x, y], [w, h]) = grid.cell(slot.index);
            ShapePlan {
                geometry: ShapeGeometry::rect(x, y, w, h),
                fill: MaskFill::Reveal,
                initially_hidden: true,
                motions: vec![Motion::Snap {
                    attribute: Attribute::Visibility,
                    from: AttrValue::HIDDEN,
                    to: AttrValue::VISIBLE,
                    offset: slot.offset,
                }],
            }
        })
        .collect();
    MaskPlan::new(shapes)
}

pub(crate) fn random_bars<R: Rng + ?Sized>(
    orientation: Orientation,
    duration: f64,
    count: usize,
    rng: &mut R,
) -> MaskPlan {
    let thickness = BAR_OVERLAP / count.max(1) as f64;
    let shapes = partition(count, duration, rng)
        .into_iter()
        .map(|slot| {
            let at = slot.index as f64 / count as f64;
            let (geometry, attribute) = match orientation {
                Orientation::Vertical => (
                    ShapeGeometry::rect(BAR_PARKED, at, 1.0, thickness),
                    Attribute::X,
                ),
                Orientation::Horizontal => (
                    ShapeGeometry::rect(at, BAR_PARKED, thickness, 1.0),
                    Attribute::Y,
                ),
            };
            ShapePlan::moving(
                geometry,
                MaskFill::Reveal,
                Motion::Snap {
                    attribute,
                    from: AttrValue::Number(BAR_PARKED),
                    to: AttrValue::Number(0.0),
                    offset: slot.offset,
                },
            )
        })
        .collect();
    MaskPlan::new(shapes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn dissolve_cells_start_hidden_and_cover_the_grid() {
        let mut rng = StdRng::seed_from_u64(11);
        let target = ObjectGeometry::new(0.0, 0.0, 200.0, 100.0);
        let plan = dissolve(&target, 2.0, 16, &mut rng);
        assert_eq!(plan.shapes.len(), 128);
        assert!(plan.shapes.iter().all(|s| s.initially_hidden));
    }

    #[test]
    fn horizontal_bars_snap_y() {
        let mut rng = StdRng::seed_from_u64(5);
        let plan = random_bars(Orientation::Horizontal, 5.0, 50, &mut rng);
        assert_eq!(plan.shapes.len(), 50);
        let mut offsets: Vec<f64> = plan
            .shapes
            .iter()
            .map(|s| match &s.motions[0] {
                Motion::Snap {
                    attribute, offset, ..
                } => {
                    assert_eq!(*attribute, Attribute::Y);
                    *offset
                }
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        offsets.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for (k, off) in offsets.iter().enumerate() {
            assert!((off - k as f64 * 0.1).abs() < 1e-12);
        }
    }
}
