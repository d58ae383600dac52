use super::*;
use crate::foundation::core::Canvas;

fn sprite(w: u32, h: u32) -> Canvas {
    Canvas {
        width: w,
        height: h,
    }
}

#[test]
fn equal_spans_fill_the_height_bound() {
    // span_x == span_y falls into the height-bound branch.
    let points = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(0.0, 10.0),
    ];
    let vp = fit_viewport(&points, sprite(20, 20), 600).unwrap();
    assert_eq!(vp.scale, 58.0);
    assert_eq!(vp.canvas, Canvas::new(600, 600).unwrap());
    assert_eq!(vp.offset, Vec2::ZERO);
}

#[test]
fn wide_layouts_fill_the_width_bound() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(20.0, 0.0),
        Point::new(0.0, 5.0),
    ];
    let vp = fit_viewport(&points, sprite(10, 10), 110).unwrap();
    assert_eq!(vp.scale, 5.0);
    assert_eq!(vp.canvas.width, 110);
    assert_eq!(vp.canvas.height, 35);
}

#[test]
fn shorter_axis_is_proportional_to_span_ratio() {
    let points = [Point::new(0.0, 0.0), Point::new(0.0, 40.0), Point::new(8.0, 0.0)];
    let vp = fit_viewport(&points, sprite(10, 10), 210).unwrap();
    // Taller than wide: height takes the bound, width = round(8 * scale) + 10.
    assert_eq!(vp.scale, 5.0);
    assert_eq!(vp.canvas.height, 210);
    assert_eq!(vp.canvas.width, 50);
}

#[test]
fn offset_moves_the_bounding_box_to_the_origin() {
    let points = [Point::new(-5.0, -3.0), Point::new(5.0, 7.0)];
    let vp = fit_viewport(&points, sprite(4, 4), 104).unwrap();
    assert_eq!(vp.offset, Vec2::new(5.0, 3.0));
}

#[test]
fn coincident_points_fall_back_to_unit_scale() {
    let points = [Point::new(3.0, 4.0), Point::new(3.0, 4.0)];
    let vp = fit_viewport(&points, sprite(16, 16), 600).unwrap();
    assert_eq!(vp.scale, 1.0);
    assert_eq!(vp.canvas, Canvas::new(16, 16).unwrap());
    assert_eq!(vp.offset, Vec2::new(-3.0, -4.0));
}

#[test]
fn empty_layout_is_rejected() {
    assert!(fit_viewport(&[], sprite(16, 16), 600).is_err());
}

#[test]
fn sprite_larger_than_bound_is_rejected() {
    let points = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
    assert!(fit_viewport(&points, sprite(600, 16), 600).is_err());
    assert!(fit_viewport(&points, sprite(16, 700), 600).is_err());
}

#[test]
fn non_finite_points_are_rejected() {
    let points = [Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)];
    assert!(fit_viewport(&points, sprite(4, 4), 100).is_err());
}

#[test]
fn project_flips_the_y_axis() {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(0.0, 10.0),
    ];
    let vp = fit_viewport(&points, sprite(20, 20), 600).unwrap();

    // Layout origin lands at the bottom of the canvas, top point at the top.
    assert_eq!(vp.project(Point::new(0.0, 0.0), 20), (0, 580));
    assert_eq!(vp.project(Point::new(0.0, 10.0), 20), (0, 0));
    assert_eq!(vp.project(Point::new(10.0, 0.0), 20), (580, 580));
}

#[test]
fn scale_is_positive_for_any_non_degenerate_layout() {
    let layouts: &[&[Point]] = &[
        &[Point::new(0.0, 0.0), Point::new(0.1, 0.0)],
        &[Point::new(-100.0, 50.0), Point::new(300.0, -20.0)],
        &[Point::new(0.0, -1.0), Point::new(0.0, 1.0)],
    ];
    for points in layouts {
        let vp = fit_viewport(points, sprite(8, 8), 400).unwrap();
        assert!(vp.scale > 0.0);
        assert!(vp.canvas.width == 400 || vp.canvas.height == 400);
    }
}
