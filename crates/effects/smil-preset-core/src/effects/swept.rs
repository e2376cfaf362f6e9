//! Wedge and wheel: sector sweeps approximated by chained polygon steps.

use super::masks::{MaskPlan, Motion, ShapePlan, StepNaming};
use crate::geometry::{step_duration, subdivide};
use crate::primitive::{MaskFill, ShapeGeometry};
use crate::sweep::{wedge_states, wheel_states, Handedness, Spokes, WEDGE_STEPS};

fn sweep_shape(states: Vec<Vec<[f64; 2]>>, step: f64, naming: StepNaming) -> ShapePlan {
    let first = states.first().cloned().unwrap_or_default();
    ShapePlan::moving(
        ShapeGeometry::Polygon { points: first },
        MaskFill::Reveal,
        Motion::Sweep {
            states,
            step,
            naming,
        },
    )
}

/// Two halves opening from twelve o'clock, meeting at six.
pub(crate) fn wedge(duration: f64) -> MaskPlan {
    let step = subdivide(duration, WEDGE_STEPS);
    MaskPlan::new(vec![
        sweep_shape(
            wedge_states(Handedness::Clockwise),
            step,
            StepNaming::Lettered('r'),
        ),
        sweep_shape(
            wedge_states(Handedness::CounterClockwise),
            step,
            StepNaming::Lettered('l'),
        ),
    ])
}

/// All spokes sweep clockwise together inside one polygon.
pub(crate) fn wheel(spokes: Spokes, duration: f64) -> MaskPlan {
    let step = step_duration(duration, spokes.step_fraction());
    MaskPlan::new(vec![sweep_shape(
        wheel_states(spokes),
        step,
        StepNaming::Numbered,
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::PrimitiveId;
    use crate::primitive::ShapeAnimation;

    #[test]
    fn wedge_steps_chain_on_previous_end() {
        let primary = PrimitiveId::primary(2);
        let shapes = wedge(3.0).into_shapes(&primary, 3.0);
        assert_eq!(shapes.len(), 2);
        let right: Vec<String> = shapes[0]
            .animations
            .iter()
            .map(|a| match a {
                ShapeAnimation::Interpolate(i) => {
                    assert!((i.duration - 0.5).abs() < 1e-12);
                    i.begin.to_string()
                }
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(right.len(), WEDGE_STEPS);
        assert_eq!(right[0], "a_2.begin");
        assert_eq!(right[1], "a_2_r1.end");
        assert_eq!(right[5], "a_2_r5.end");
        assert_eq!(shapes[1].animations[5].id().map(|i| i.as_str()), Some("a_2_l6"));
    }

    #[test]
    fn wheel_uses_tuned_step_length() {
        let primary = PrimitiveId::primary(0);
        let shapes = wheel(Spokes::Four, 2.0).into_shapes(&primary, 2.0);
        assert_eq!(shapes[0].animations.len(), 3);
        match &shapes[0].animations[2] {
            ShapeAnimation::Interpolate(i) => {
                assert_eq!(i.id.as_ref().map(|i| i.as_str()), Some("a_0_03"));
                assert!((i.duration - 0.66).abs() < 1e-12);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
