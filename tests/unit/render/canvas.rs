use std::sync::Mutex;

use super::*;
use crate::color::solid::SolidColor;
use crate::shape::Shape;

#[test]
fn new_canvas_defaults() {
    let c = Canvas::new(4, 3).unwrap();
    assert_eq!((c.width(), c.height()), (4, 3));
    assert_eq!(c.pixels().len(), 36);
    assert!(!c.anti_aliasing());
    assert!(c.shapes().is_empty());
    assert_eq!(c.background().representative(), SolidColor::rgb(0x000000));
}

#[test]
fn add_shape_returns_paint_index() {
    let mut c = Canvas::new(4, 4).unwrap();
    let a = Shape::circle(1.0, 1.0, 1.0).into_ref();
    assert_eq!(c.add_shape(a.clone()), 0);
    assert_eq!(c.add_shape(a), 1);
    c.clear_shapes();
    assert!(c.shapes().is_empty());
}

#[test]
fn redraw_paints_background_and_shapes() {
    let mut c = Canvas::new(5, 5).unwrap();
    c.set_background(SolidColor::rgb(0x203040));
    c.add_shape(
        Shape::rectangle(1.0, 1.0, 2.0, 2.0)
            .with_color(SolidColor::rgb(0xffffff))
            .into_ref(),
    );
    c.redraw().unwrap();
    assert_eq!(c.frame().pixel(0, 0), Some([0x20, 0x30, 0x40]));
    assert_eq!(c.frame().pixel(2, 2), Some([255, 255, 255]));
}

#[test]
fn set_size_reallocates() {
    let mut c = Canvas::new(2, 2).unwrap();
    c.set_background(SolidColor::rgb(0xffffff));
    c.redraw().unwrap();
    c.set_size(3, 1).unwrap();
    assert_eq!(c.pixels(), &[0u8; 9]);
    c.redraw().unwrap();
    assert!(c.pixels().iter().all(|&v| v == 255));
}

#[test]
fn recolor_only_touches_canvas_entry() {
    let shared = Shape::circle(2.0, 2.0, 1.0)
        .with_color(SolidColor::rgb(0x00ff00))
        .into_ref();
    let mut c = Canvas::new(4, 4).unwrap();
    c.add_shape(shared.clone());
    c.set_shape_color(0, SolidColor::rgb(0xff0000)).unwrap();
    assert_eq!(c.shapes()[0].color().representative(), SolidColor::rgb(0xff0000));
    assert_eq!(shared.color().representative(), SolidColor::rgb(0x00ff00));
}

#[test]
fn recolor_out_of_range_is_validation_error() {
    let mut c = Canvas::new(1, 1).unwrap();
    let err = c.set_shape_color(0, SolidColor::rgb(0)).unwrap_err();
    assert!(matches!(err, CanvasError::Validation(_)));
}

#[test]
fn redraw_with_progress_reports_done() {
    let seen = Arc::new(Mutex::new(Vec::<(String, f32)>::new()));
    let sink = {
        let seen = seen.clone();
        move |label: &str, pct: f32| seen.lock().unwrap().push((label.to_string(), pct))
    };
    let mut c = Canvas::new(8, 8).unwrap();
    c.set_progress_sink(Some(Arc::new(sink)));
    c.add_shape(Shape::circle(4.0, 4.0, 2.0).into_ref());
    c.redraw().unwrap();

    let seen = seen.lock().unwrap();
    let last = seen.last().unwrap();
    assert_eq!(last, &("total:".to_string(), 1.0));
    assert!(seen.iter().any(|(l, _)| l == "current: done"));
}

#[test]
fn progress_does_not_change_pixels() {
    let shape = Shape::circle(3.0, 3.0, 2.0)
        .with_color(SolidColor::rgb(0xabcdef))
        .into_ref();
    let mut plain = Canvas::new(6, 6).unwrap();
    plain.set_anti_aliasing(true);
    plain.add_shape(shape.clone());
    plain.redraw().unwrap();

    let mut watched = Canvas::new(6, 6).unwrap();
    watched.set_anti_aliasing(true);
    watched.add_shape(shape);
    watched.set_progress_sink(Some(Arc::new(|_: &str, _: f32| {})));
    watched.redraw().unwrap();

    assert_eq!(plain.pixels(), watched.pixels());
}
