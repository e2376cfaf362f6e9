use rand::rngs::StdRng;
use rand::SeedableRng;
use smil_preset_core::{
    compass_offset,
    partition::{partition, DissolveGrid},
    primitive::ShapeAnimation,
    subtype::Subtype,
    sweep::{wedge_states, wheel_states, Handedness, Spokes},
    AnimationRequest, AttrValue, Attribute, Compass, Config, DocumentBounds, IdAllocator,
    ObjectGeometry, Primitive, Synthesizer,
};

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn targets() -> Vec<ObjectGeometry> {
    vec![
        ObjectGeometry::new(3.0, 4.0, 6.0, 5.0),
        ObjectGeometry::new(0.0, 0.0, 28.0, 21.0),
        ObjectGeometry::new(26.5, 19.0, 1.5, 2.0),
        ObjectGeometry::new(-2.0, 10.0, 4.0, 4.0),
    ]
}

/// it should place the object fully off the document for every compass direction
#[test]
fn compass_offsets_clear_the_document() {
    let doc = DocumentBounds::new(28.0, 21.0);
    for obj in targets() {
        for dir in Compass::ALL {
            let offset = compass_offset(*dir, &obj, &doc);
            let moved = obj.translated(offset);
            assert!(
                moved.is_outside(&doc),
                "{dir:?} leaves {obj:?} inside at {moved:?}"
            );
        }
    }
}

/// it should start every fly-in where the compass offset puts it
#[test]
fn fly_in_starts_off_document() {
    let doc = DocumentBounds::new(28.0, 21.0);
    let mut synth = Synthesizer::with_seed(Config::default(), 11);
    let mut ids = IdAllocator::new();
    for obj in targets() {
        for name in Compass::names() {
            let req = AnimationRequest::new("ooo-entrance-fly-in", 1.0, obj, doc).with_subtype(name);
            let result = synth.dispatch(&mut ids, &req).unwrap();
            let from = result
                .primitives
                .iter()
                .find_map(|p| match p {
                    Primitive::Interpolate(i) if i.attribute == Attribute::Translate => {
                        Some(i.from.clone())
                    }
                    _ => None,
                })
                .expect("translate interpolation");
            let AttrValue::Pair(offset) = from else {
                panic!("translate must be a pair, got {from:?}");
            };
            assert!(obj.translated(offset).is_outside(&doc), "{name} {obj:?}");
        }
    }
}

/// it should draw every index exactly once with strictly growing offsets
#[test]
fn partition_is_an_exhaustive_permutation() {
    for seed in [0_u64, 1, 42, 4242] {
        let mut rng = StdRng::seed_from_u64(seed);
        for count in [1_usize, 7, 50, 144] {
            let duration = 2.5;
            let slots = partition(count, duration, &mut rng);
            assert_eq!(slots.len(), count);

            let mut indices: Vec<usize> = slots.iter().map(|s| s.index).collect();
            indices.sort_unstable();
            assert_eq!(indices, (0..count).collect::<Vec<_>>());

            for (k, slot) in slots.iter().enumerate() {
                assert_eq!(slot.rank, k);
                approx(slot.offset, k as f64 * duration / count as f64, 1e-12);
                assert!(slot.offset < duration);
            }
            assert!(slots.windows(2).all(|w| w[0].offset < w[1].offset));
        }
    }
}

/// it should keep dissolve cells square-ish with the long side cut into the configured count
#[test]
fn dissolve_grid_follows_the_long_side() {
    let wide = DissolveGrid::for_box(8.0, 2.0, 16);
    assert_eq!(wide.columns(), 16);
    assert_eq!(wide.rows(), 4);
    assert_eq!(wide.cell_count(), 64);

    let tall = DissolveGrid::for_box(3.0, 9.0, 12);
    assert_eq!(tall.rows(), 12);
    assert_eq!(tall.columns(), 4);
}

/// it should keep the vertex count constant across every sweep state
#[test]
fn sweep_states_keep_vertex_count() {
    for hand in [Handedness::Clockwise, Handedness::CounterClockwise] {
        let states = wedge_states(hand);
        let n = states[0].len();
        assert!(states.iter().all(|s| s.len() == n), "{hand:?}");
    }
    for spokes in Spokes::ALL {
        let states = wheel_states(*spokes);
        assert_eq!(states.len(), spokes.steps() + 1);
        let n = states[0].len();
        assert!(states.iter().all(|s| s.len() == n), "{spokes:?}");
    }
}

/// it should only ever morph polygons between equal vertex counts
#[test]
fn dispatched_polygon_morphs_keep_vertex_count() {
    let doc = DocumentBounds::new(28.0, 21.0);
    let obj = ObjectGeometry::new(3.0, 4.0, 6.0, 5.0);
    let mut synth = Synthesizer::with_seed(Config::default(), 3);
    let mut ids = IdAllocator::new();
    for (effect_id, subtype) in smil_preset_core::registry::all() {
        let mut req = AnimationRequest::new(effect_id.clone(), 1.5, obj, doc);
        req.subtype = subtype.map(str::to_string);
        let result = synth.dispatch(&mut ids, &req).unwrap();
        for mask in result.masks() {
            for shape in &mask.shapes {
                for anim in &shape.animations {
                    let ShapeAnimation::Interpolate(i) = anim else { continue };
                    if i.attribute != Attribute::Points {
                        continue;
                    }
                    assert_eq!(
                        i.from.vertex_count(),
                        i.to.vertex_count(),
                        "{effect_id} {subtype:?}"
                    );
                }
            }
        }
    }
}
