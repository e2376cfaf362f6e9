use smil_preset_core::{
    parse_request_json,
    primitive::{ShapeAnimation, ShapeGeometry},
    sampling::settle_time,
    AnimationRequest, AttrValue, Attribute, Begin, Config, EffectError, IdAllocator, KeySpline,
    Primitive, QuickBundle, Synthesizer,
};

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn request(name: &str) -> AnimationRequest {
    let json = smil_test_fixtures::requests::json(name).expect("load request fixture");
    parse_request_json(&json).expect("parse request fixture")
}

fn bundle(b: &QuickBundle) -> &[Primitive] {
    b.primitives().expect("bundle should be resolved")
}

/// it should emit a single indefinite visibility assignment for appear
#[test]
fn appear_is_a_single_toggle() {
    let mut synth = Synthesizer::with_seed(Config::default(), 7);
    let mut ids = IdAllocator::new();
    let result = synth.dispatch(&mut ids, &request("appear")).unwrap();

    assert_eq!(result.primary_id.as_str(), "a_0");
    assert_eq!(result.primitives.len(), 1);
    match &result.primitives[0] {
        Primitive::Assign(a) => {
            assert_eq!(a.attribute, Attribute::Visibility);
            assert_eq!(a.value, AttrValue::VISIBLE);
            assert_eq!(a.begin, Begin::Indefinite);
            assert_eq!(a.id.as_ref().map(|i| i.as_str()), Some("a_0"));
        }
        other => panic!("unexpected {other:?}"),
    }

    let rev = bundle(&result.reverse);
    let fwd = bundle(&result.forward);
    assert_eq!(rev.len(), 1);
    assert_eq!(fwd.len(), 1);
    assert!(matches!(&rev[0], Primitive::Assign(a) if a.value == AttrValue::HIDDEN));
    assert!(matches!(&fwd[0], Primitive::Assign(a) if a.value == AttrValue::VISIBLE));
    assert_eq!(rev[0].id().map(|i| i.as_str()), Some("a_0_rev"));
    assert_eq!(fwd[0].id().map(|i| i.as_str()), Some("a_0_fwd"));
}

/// it should fly in from just past the left document edge
#[test]
fn fly_in_from_left_starts_off_canvas() {
    let mut synth = Synthesizer::with_seed(Config::default(), 7);
    let mut ids = IdAllocator::new();
    let result = synth
        .dispatch(&mut ids, &request("fly-in-from-left"))
        .unwrap();

    assert_eq!(result.effect_id, "ooo-entrance-fly-in");
    assert_eq!(result.subtype.as_deref(), Some("from-left"));
    assert!(result.initially_hidden());
    assert_eq!(result.primitives.len(), 2);
    match &result.primitives[1] {
        Primitive::Interpolate(i) => {
            assert_eq!(i.attribute, Attribute::Translate);
            assert_eq!(i.from, AttrValue::Pair([-7.0, 0.0]));
            assert_eq!(i.to, AttrValue::Pair([0.0, 0.0]));
            assert_eq!(i.begin.to_string(), "a_0.begin");
            assert_eq!(i.spline, Some(KeySpline::SMOOTH));
            assert!(i.fill_hold);
            approx(i.duration, 1.0, 1e-12);
        }
        other => panic!("unexpected {other:?}"),
    }

    let fwd = bundle(&result.forward);
    assert_eq!(fwd.len(), 2);
    match &fwd[0] {
        Primitive::Interpolate(i) => {
            assert_eq!(i.from, AttrValue::Pair([0.0, 0.0]));
            assert_eq!(i.to, AttrValue::Pair([0.0, 0.0]));
            approx(i.duration, 0.001, 1e-12);
        }
        other => panic!("unexpected {other:?}"),
    }
    match &fwd[1] {
        Primitive::Assign(a) => {
            assert_eq!(a.value, AttrValue::VISIBLE);
            assert_eq!(a.begin.to_string(), "a_0_fwd.begin");
        }
        other => panic!("unexpected {other:?}"),
    }
}

/// it should switch fifty horizontal bars on at k * 0.1 s
#[test]
fn random_bars_cover_every_slot() {
    let mut synth = Synthesizer::with_seed(Config::default(), 99);
    let mut ids = IdAllocator::new();
    let result = synth
        .dispatch(&mut ids, &request("random-bars-horizontal"))
        .unwrap();

    let mask = result.masks().next().expect("reveal mask");
    assert_eq!(mask.mask_id.as_str(), "a_0_mask");
    assert_eq!(mask.shapes.len(), 50);

    let mut offsets: Vec<f64> = mask
        .shapes
        .iter()
        .map(|shape| match &shape.animations[..] {
            [ShapeAnimation::Assign(a)] => {
                assert_eq!(a.attribute, Attribute::Y);
                assert_eq!(a.value, AttrValue::Number(0.0));
                match &a.begin {
                    Begin::Event { event, offset } => {
                        assert_eq!(event.id.as_str(), "a_0");
                        *offset
                    }
                    Begin::Indefinite => panic!("bar snap must key off the primary"),
                }
            }
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    offsets.sort_by(f64::total_cmp);
    for (k, offset) in offsets.iter().enumerate() {
        approx(*offset, k as f64 * 0.1, 1e-9);
    }

    match &result.primitives[1] {
        Primitive::Assign(a) => {
            assert_eq!(a.attribute, Attribute::MaskRef);
            assert_eq!(a.value.to_string(), "url(#a_0_mask)");
            assert_eq!(a.scope, Some(5.0));
        }
        other => panic!("unexpected {other:?}"),
    }
}

/// it should morph a four-point concealing polygon over a reveal backdrop
#[test]
fn box_in_uses_two_shapes() {
    let mut synth = Synthesizer::with_seed(Config::default(), 7);
    let mut ids = IdAllocator::new();
    let result = synth.dispatch(&mut ids, &request("box-in")).unwrap();

    let mask = result.masks().next().expect("reveal mask");
    assert_eq!(mask.shapes.len(), 2);
    assert_eq!(
        mask.shapes[0].geometry,
        ShapeGeometry::rect(0.0, 0.0, 1.0, 1.0)
    );
    match &mask.shapes[1].geometry {
        ShapeGeometry::Polygon { points } => assert_eq!(points.len(), 4),
        other => panic!("unexpected {other:?}"),
    }
    match &mask.shapes[1].animations[..] {
        [ShapeAnimation::Interpolate(i)] => {
            assert_eq!(i.attribute, Attribute::Points);
            assert_eq!(i.from.vertex_count(), Some(4));
            assert_eq!(i.to.vertex_count(), Some(4));
            assert_eq!(i.begin.to_string(), "a_0.begin");
            approx(i.duration, 2.0, 1e-12);
        }
        other => panic!("unexpected {other:?}"),
    }
    approx(settle_time(&result.primitives), 2.0, 1e-9);
}

/// it should reject unknown effects without emitting anything
#[test]
fn bogus_effect_is_unsupported() {
    let mut synth = Synthesizer::with_seed(Config::default(), 7);
    let mut ids = IdAllocator::new();
    let err = synth
        .dispatch(&mut ids, &request("bogus-entrance"))
        .unwrap_err();
    assert_eq!(
        err,
        EffectError::UnsupportedEffect {
            effect_id: "ooo-entrance-bogus".into()
        }
    );
    assert!(err.is_recoverable());
    assert_eq!(ids.issued(), 0);
}

/// it should key an exit off the driver's trigger and chain wheel steps
#[test]
fn delayed_wheel_exit_threads_the_trigger() {
    let mut synth = Synthesizer::with_seed(Config::default(), 7);
    let mut ids = IdAllocator::starting_at(8);
    let result = synth
        .dispatch(&mut ids, &request("wheel-exit-delayed"))
        .unwrap();

    assert!(!result.initially_hidden());
    match &result.primitives[0] {
        Primitive::Assign(a) => {
            assert_eq!(a.attribute, Attribute::MaskRef);
            assert_eq!(a.begin.to_string(), "a_7.begin+0.5s");
            assert_eq!(a.id.as_ref().map(|i| i.as_str()), Some("a_8"));
        }
        other => panic!("unexpected {other:?}"),
    }
    let last = result.primitives.last().expect("hide");
    match last {
        Primitive::Assign(a) => {
            assert_eq!(a.value, AttrValue::HIDDEN);
            assert_eq!(a.begin.to_string(), "a_8.begin+2s");
        }
        other => panic!("unexpected {other:?}"),
    }

    let mask = result.masks().next().expect("reveal mask");
    let steps: Vec<String> = mask.shapes[0]
        .animations
        .iter()
        .map(|a| a.id().map(|i| i.to_string()).unwrap_or_default())
        .collect();
    assert_eq!(steps, vec!["a_8_01", "a_8_02", "a_8_03", "a_8_04"]);
}

/// it should decode every request fixture the same way through both loaders
#[test]
fn request_fixtures_decode() {
    for name in smil_test_fixtures::requests::keys() {
        let typed: AnimationRequest =
            smil_test_fixtures::requests::load(&name).expect("typed request fixture");
        assert_eq!(typed, request(&name), "{name}");
    }
}
