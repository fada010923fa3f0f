use std::f64::consts::FRAC_PI_2;

use super::*;
use crate::shape::Shape;

const EPS: f64 = 1e-3;

fn sample_points() -> Vec<Point> {
    let mut out = Vec::new();
    for y in (-4..44).step_by(3) {
        for x in (-4..44).step_by(3) {
            out.push(Point::new(f64::from(x) + 0.25, f64::from(y) - 0.5));
        }
    }
    out
}

fn circle(cx: f64, cy: f64, r: f64) -> ShapeRef {
    Shape::circle(cx, cy, r).into_ref()
}

fn capsule() -> ShapeRef {
    Shape::capsule(20.0, 10.0, 20.0, 30.0, 3.0).into_ref()
}

#[test]
fn boolean_operators_are_min_max() {
    let a = circle(10.0, 10.0, 6.0);
    let b = circle(18.0, 12.0, 5.0);
    let u = Operation::binary(Opcode::Union, a.clone(), b.clone()).unwrap();
    let i = Operation::binary(Opcode::Intersection, a.clone(), b.clone()).unwrap();
    let d = Operation::binary(Opcode::Difference, a.clone(), b.clone()).unwrap();
    for q in sample_points() {
        assert_eq!(u.sdf(q), a.sdf(q).min(b.sdf(q)));
        assert_eq!(i.sdf(q), a.sdf(q).max(b.sdf(q)));
        assert_eq!(d.sdf(q), a.sdf(q).max(-b.sdf(q)));
    }
}

#[test]
fn boolean_bounds_follow_box_algebra() {
    let a = circle(10.0, 10.0, 6.0);
    let b = circle(18.0, 12.0, 5.0);
    let u = Operation::Union(a.clone(), b.clone()).bounds();
    let i = Operation::Intersection(a.clone(), b.clone()).bounds();
    let d = Operation::Difference(a.clone(), b.clone()).bounds();
    assert!(u.contains_rect(&a.bounds()));
    assert!(u.contains_rect(&b.bounds()));
    assert!(a.bounds().contains_rect(&i));
    assert!(b.bounds().contains_rect(&i));
    assert_eq!(d, a.bounds());
}

#[test]
fn disjoint_intersection_has_empty_bounds() {
    let a = circle(5.0, 5.0, 2.0);
    let b = circle(50.0, 50.0, 2.0);
    assert!(Operation::Intersection(a, b).bounds().is_empty());
}

#[test]
fn difference_scenario_classifies_center_and_corner() {
    let rect = Shape::rectangle(0.0, 0.0, 10.0, 10.0).into_ref();
    let hole = circle(5.0, 5.0, 3.0);
    let d = Operation::binary(Opcode::Difference, rect, hole).unwrap();
    assert!(d.sdf(Point::new(5.0, 5.0)) > 0.0);
    assert!(d.sdf(Point::new(0.0, 0.0)).abs() < 1e-5);
}

#[test]
fn rotate_pivot_is_child_box_center() {
    let op = Operation::unary(Opcode::Rotate, capsule(), 0.5).unwrap();
    let Operation::Rotate(t) = &op else {
        panic!("expected rotate");
    };
    assert_eq!(t.pivot(), Point::new(20.0, 20.0));
    assert_eq!(t.param(), 0.5);
}

#[test]
fn odd_span_pivot_truncates_toward_top_left() {
    let square = Shape::rectangle(0.0, 0.0, 5.0, 5.0).into_ref();
    assert_eq!(square.bounds(), Rect::new(0, 0, 5, 5));
    let op = Operation::unary(Opcode::Rotate, square.clone(), 0.3).unwrap();
    let Operation::Rotate(t) = &op else {
        panic!("expected rotate");
    };
    assert_eq!(t.pivot(), Point::new(2.0, 2.0));
    let op = Operation::unary(Opcode::Scale, square, 3.0).unwrap();
    let Operation::Scale(t) = &op else {
        panic!("expected scale");
    };
    assert_eq!(t.pivot(), Point::new(2.0, 2.0));
    assert_eq!(op.bounds(), Rect::new(-4, -4, 11, 11));
}

#[test]
fn pivoted_affine_matches_kurbo_transform() {
    let op = Operation::unary(Opcode::Rotate, capsule(), 0.7).unwrap();
    let Operation::Rotate(t) = &op else {
        panic!("expected rotate");
    };
    let expected = Affine::rotate_about(0.7, Point::new(20.0, 20.0));
    let q = Point::new(23.0, 11.0);
    assert!((t.affine() * q - expected * q).hypot() < EPS);
    let mapped = op.map_point(q, MapDirection::FromChild);
    assert!((mapped - expected * q).hypot() < EPS);
    // The pivot is a fixed point in both directions.
    for dir in [MapDirection::FromChild, MapDirection::ToChild] {
        assert!((op.map_point(t.pivot(), dir) - t.pivot()).hypot() < EPS);
    }
}

#[test]
fn rotate_quarter_turn_swaps_axes() {
    let op = Operation::unary(Opcode::Rotate, capsule(), FRAC_PI_2).unwrap();
    // The vertical capsule becomes horizontal around (20, 20).
    assert!(op.sdf(Point::new(28.0, 20.0)) < 0.0);
    assert!(op.sdf(Point::new(20.0, 28.0)) > 0.0);
    let b = op.bounds();
    assert!(b.contains_rect(&Rect::new(7, 17, 33, 23)));
}

#[test]
fn map_point_directions_are_inverse() {
    let op = Operation::unary(Opcode::Rotate, capsule(), 0.7).unwrap();
    let q = Point::new(3.0, -8.0);
    let back = op.map_point(op.map_point(q, MapDirection::FromChild), MapDirection::ToChild);
    assert!((back - q).hypot() < EPS);

    let op = Operation::unary(Opcode::Scale, capsule(), 2.5).unwrap();
    let fwd = op.map_point(Point::new(22.0, 20.0), MapDirection::FromChild);
    assert!((fwd - Point::new(25.0, 20.0)).hypot() < EPS);
    let back = op.map_point(fwd, MapDirection::ToChild);
    assert!((back - Point::new(22.0, 20.0)).hypot() < EPS);
}

#[test]
fn rotate_then_inverse_rotate_roundtrips() {
    let base = capsule();
    let r1 = Shape::rotate(&base, 0.7).unwrap().into_ref();
    let r2 = Shape::rotate(&r1, -0.7).unwrap();
    for q in sample_points() {
        assert!((r2.sdf(q) - base.sdf(q)).abs() < EPS, "mismatch at {q:?}");
    }
}

#[test]
fn scale_then_inverse_scale_roundtrips() {
    let base = capsule();
    let s1 = Shape::scale(&base, 2.0).unwrap().into_ref();
    let s2 = Shape::scale(&s1, 0.5).unwrap();
    for q in sample_points() {
        assert!((s2.sdf(q) - base.sdf(q)).abs() < EPS, "mismatch at {q:?}");
    }
}

#[test]
fn scale_bounds_grow_about_pivot() {
    let s = Operation::unary(Opcode::Scale, capsule(), 2.0).unwrap();
    assert_eq!(s.bounds(), Rect::new(14, -6, 26, 46));
    let mirrored = Operation::unary(Opcode::Scale, capsule(), -1.0).unwrap();
    assert_eq!(mirrored.bounds(), capsule().bounds());
}

#[test]
fn rotated_bounds_cover_interior() {
    let base = Shape::rectangle(10.0, 10.0, 20.0, 6.0).into_ref();
    let op = Operation::unary(Opcode::Rotate, base, 0.9).unwrap();
    let b = op.bounds();
    for y in -10..50 {
        for x in -10..50 {
            if op.sdf(Point::new(f64::from(x), f64::from(y))) <= 0.0 {
                assert!(
                    x >= b.left && x <= b.right && y >= b.top && y <= b.bottom,
                    "interior pixel ({x}, {y}) outside {b:?}"
                );
            }
        }
    }
}

#[test]
fn round_offsets_distance_and_grows_bounds() {
    let base = Shape::rectangle(0.0, 0.0, 10.0, 10.0).into_ref();
    let op = Operation::unary(Opcode::Round, base.clone(), 2.0).unwrap();
    for q in sample_points() {
        assert!((op.sdf(q) - (base.sdf(q) - 2.0)).abs() < 1e-5);
    }
    assert_eq!(op.bounds(), Rect::new(-2, -2, 12, 12));
    assert!(op.sdf(Point::new(11.0, 5.0)) < 0.0);
}

#[test]
fn reserved_opcodes_fail_fast() {
    let c = circle(0.0, 0.0, 1.0);
    let err = Operation::unary(Opcode::Blur, c.clone(), 3.0).unwrap_err();
    assert!(matches!(err, CanvasError::Unsupported(_)));
    let err = Operation::unary(Opcode::OffsetY, c.clone(), 3.0).unwrap_err();
    assert!(err.to_string().contains("offset_y"));
}

#[test]
fn arity_mismatch_is_a_validation_error() {
    let c = circle(0.0, 0.0, 1.0);
    assert!(matches!(
        Operation::binary(Opcode::Rotate, c.clone(), c.clone()),
        Err(CanvasError::Validation(_))
    ));
    assert!(matches!(
        Operation::unary(Opcode::Union, c.clone(), 1.0),
        Err(CanvasError::Validation(_))
    ));
}

#[test]
fn degenerate_parameters_are_rejected() {
    let c = circle(0.0, 0.0, 1.0);
    assert!(Operation::unary(Opcode::Scale, c.clone(), 0.0).is_err());
    assert!(Operation::unary(Opcode::Scale, c.clone(), f64::INFINITY).is_err());
    assert!(Operation::unary(Opcode::Rotate, c.clone(), f64::NAN).is_err());
    assert!(Operation::unary(Opcode::Round, c.clone(), f64::NAN).is_err());
}

#[test]
fn opcode_names_parse() {
    assert_eq!("Union".parse::<Opcode>().unwrap(), Opcode::Union);
    assert_eq!("offset-y".parse::<Opcode>().unwrap(), Opcode::OffsetY);
    assert_eq!("OffsetY".parse::<Opcode>().unwrap(), Opcode::OffsetY);
    assert!("smooth_union".parse::<Opcode>().is_err());
    assert!(Opcode::Difference.is_binary());
    assert!(!Opcode::Blur.is_supported());
}
