use super::*;

#[test]
fn enclosing_floors_and_ceils() {
    let r = Rect::enclosing(1.5, -0.5, 3.2, 4.0);
    assert_eq!(r, Rect::new(1, -1, 4, 4));
    assert_eq!(r.width(), 4);
    assert_eq!(r.height(), 6);
}

#[test]
fn inverted_boxes_are_empty() {
    let r = Rect::new(5, 0, 4, 10);
    assert!(r.is_empty());
    assert_eq!(r.width(), 0);
    assert_eq!(r.height(), 0);
    assert!(Rect::new(0, 0, 0, 0).width() == 1);
}

#[test]
fn union_contains_both_and_intersection_is_contained() {
    let a = Rect::new(0, 0, 10, 10);
    let b = Rect::new(5, -3, 20, 7);
    let u = a.union(&b);
    assert!(u.contains_rect(&a));
    assert!(u.contains_rect(&b));
    let i = a.intersect(&b);
    assert_eq!(i, Rect::new(5, 0, 10, 7));
    assert!(a.contains_rect(&i));
    assert!(b.contains_rect(&i));
}

#[test]
fn clip_to_canvas_bounds() {
    let r = Rect::new(-4, -4, 20, 3);
    assert_eq!(r.clip_to(10, 10), Rect::new(0, 0, 9, 3));
    assert!(Rect::new(12, 0, 15, 5).clip_to(10, 10).is_empty());
    assert!(r.clip_to(0, 10).is_empty());
}

#[test]
fn center_truncates_toward_top_left() {
    assert_eq!(Rect::new(2, 2, 8, 10).center(), Point::new(5.0, 6.0));
    // Odd spans drop the half pixel.
    assert_eq!(Rect::new(0, 0, 5, 5).center(), Point::new(2.0, 2.0));
    assert_eq!(Rect::new(-7, -3, -2, 0).center(), Point::new(-5.0, -2.0));
}

#[test]
fn center_of_extreme_box_does_not_overflow() {
    let r = Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
    assert_eq!(r.center(), Point::new(-1.0, -1.0));
}

#[test]
fn enclosing_saturates_huge_extents() {
    let r = Rect::enclosing(-3.0e10, 0.0, 3.0e10, f64::NAN);
    assert_eq!(r, Rect::new(i32::MIN, 0, i32::MAX, 0));
}
