#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn geometry(rect: SurfaceRect, w: u32, h: u32) -> SurfaceGeometry {
    SurfaceGeometry { rect, buffer: BufferSize::new(w, h) }
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_serializes_as_xy_object() {
    let json = serde_json::to_value(Point::new(1.5, -2.0)).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 1.5, "y": -2.0 }));
}

// --- SurfaceRect ---

#[test]
fn rect_with_positive_area_is_not_degenerate() {
    assert!(!SurfaceRect::new(0.0, 0.0, 10.0, 5.0).is_degenerate());
}

#[test]
fn rect_with_zero_or_bad_size_is_degenerate() {
    assert!(SurfaceRect::new(0.0, 0.0, 0.0, 5.0).is_degenerate());
    assert!(SurfaceRect::new(0.0, 0.0, 10.0, -1.0).is_degenerate());
    assert!(SurfaceRect::new(0.0, 0.0, f64::NAN, 5.0).is_degenerate());
    assert!(SurfaceRect::new(0.0, 0.0, f64::INFINITY, 5.0).is_degenerate());
}

// --- BufferSize ---

#[test]
fn buffer_default_matches_unsized_canvas() {
    assert_eq!(BufferSize::default(), BufferSize::new(300, 150));
}

#[test]
fn fit_caps_wide_containers() {
    assert_eq!(BufferSize::fit(1400.0, 2000.0), BufferSize::new(800, 500));
}

#[test]
fn fit_leaves_gutter_and_follows_aspect() {
    // width 632 - 32 = 600; height min(632 * 0.6, 1000 * 0.5) = 379.2
    assert_eq!(BufferSize::fit(632.0, 1000.0), BufferSize::new(600, 379));
}

#[test]
fn fit_limited_by_short_viewport() {
    assert_eq!(BufferSize::fit(832.0, 400.0), BufferSize::new(800, 200));
}

#[test]
fn fit_never_returns_zero() {
    assert_eq!(BufferSize::fit(10.0, 0.0), BufferSize::new(1, 1));
    assert_eq!(BufferSize::fit(-500.0, 1000.0), BufferSize::new(1, 1));
}

#[test]
fn fit_with_unbounded_viewport() {
    assert_eq!(BufferSize::fit(532.0, f64::INFINITY), BufferSize::new(500, 319));
}

// --- scale ---

#[test]
fn unscaled_geometry_has_unit_scale() {
    let g = SurfaceGeometry::unscaled(BufferSize::new(800, 500));
    assert_eq!(g.scale(), Some((1.0, 1.0)));
}

#[test]
fn scale_is_independent_per_axis() {
    let g = geometry(SurfaceRect::new(0.0, 0.0, 400.0, 100.0), 800, 500);
    assert_eq!(g.scale(), Some((2.0, 5.0)));
}

#[test]
fn degenerate_rect_has_no_scale() {
    let g = geometry(SurfaceRect::new(0.0, 0.0, 0.0, 0.0), 800, 500);
    assert_eq!(g.scale(), None);
}

#[test]
fn subnormal_rect_has_no_scale() {
    let g = geometry(SurfaceRect::new(0.0, 0.0, 1e-310, 1e-310), 800, 500);
    assert_eq!(g.scale(), None);
}

// --- client_to_local ---

#[test]
fn client_to_local_identity() {
    let g = SurfaceGeometry::unscaled(BufferSize::new(800, 500));
    let p = g.client_to_local(Point::new(50.0, 75.0)).unwrap();
    assert!(point_approx_eq(p, Point::new(50.0, 75.0)));
}

#[test]
fn client_to_local_subtracts_offset() {
    let g = geometry(SurfaceRect::new(100.0, 40.0, 800.0, 500.0), 800, 500);
    let p = g.client_to_local(Point::new(100.0, 40.0)).unwrap();
    assert!(point_approx_eq(p, Point::new(0.0, 0.0)));
}

#[test]
fn client_to_local_scales_after_offset() {
    // Displayed at half size: every CSS pixel is two buffer pixels.
    let g = geometry(SurfaceRect::new(10.0, 20.0, 400.0, 250.0), 800, 500);
    let p = g.client_to_local(Point::new(60.0, 70.0)).unwrap();
    assert!(point_approx_eq(p, Point::new(100.0, 100.0)));
}

#[test]
fn client_to_local_outside_surface_is_not_clamped() {
    let g = SurfaceGeometry::unscaled(BufferSize::new(100, 100));
    let p = g.client_to_local(Point::new(-10.0, 150.0)).unwrap();
    assert!(point_approx_eq(p, Point::new(-10.0, 150.0)));
}

#[test]
fn mapping_is_inverse_linear_in_displayed_size() {
    let device = Point::new(120.0, 90.0);
    let base = geometry(SurfaceRect::new(0.0, 0.0, 400.0, 300.0), 800, 600);
    let base_local = base.client_to_local(device).unwrap();
    for k in [0.5, 2.0, 3.0, 1.25] {
        let scaled = geometry(SurfaceRect::new(0.0, 0.0, 400.0 * k, 300.0 * k), 800, 600);
        let local = scaled.client_to_local(device).unwrap();
        assert!(point_approx_eq(local, Point::new(base_local.x / k, base_local.y / k)), "k = {k}");
    }
}

#[test]
fn client_to_local_degenerate_is_none() {
    let g = geometry(SurfaceRect::new(0.0, 0.0, 0.0, 100.0), 800, 500);
    assert!(g.client_to_local(Point::new(1.0, 1.0)).is_none());
}

#[test]
fn client_to_local_overflowing_coordinates_are_none() {
    // Scale is finite (8e302) but a large client offset overflows.
    let g = geometry(SurfaceRect::new(0.0, 0.0, 1e-300, 1e-300), 800, 800);
    assert!(g.scale().is_some());
    assert!(g.client_to_local(Point::new(0.0, 0.0)).is_some());
    assert!(g.client_to_local(Point::new(1e10, 0.0)).is_none());
    assert!(g.client_to_local(Point::new(0.0, -1e10)).is_none());
}

#[test]
fn client_to_local_non_finite_client_is_none() {
    let g = SurfaceGeometry::unscaled(BufferSize::new(100, 100));
    assert!(g.client_to_local(Point::new(f64::NAN, 1.0)).is_none());
    assert!(g.client_to_local(Point::new(1.0, f64::INFINITY)).is_none());
}

// --- map_to_local ---

#[test]
fn map_pointer_event() {
    let g = geometry(SurfaceRect::new(0.0, 0.0, 400.0, 250.0), 800, 500);
    let p = g.map_to_local(&PointerInput::Pointer(Point::new(50.0, 60.0))).unwrap();
    assert!(point_approx_eq(p, Point::new(100.0, 120.0)));
}

#[test]
fn map_touch_uses_first_contact() {
    let g = SurfaceGeometry::unscaled(BufferSize::new(800, 500));
    let input = PointerInput::Touch(vec![Point::new(5.0, 6.0), Point::new(300.0, 300.0)]);
    let p = g.map_to_local(&input).unwrap();
    assert!(point_approx_eq(p, Point::new(5.0, 6.0)));
}

#[test]
fn map_touch_without_contacts_is_none() {
    let g = SurfaceGeometry::unscaled(BufferSize::new(800, 500));
    assert!(g.map_to_local(&PointerInput::Touch(Vec::new())).is_none());
}

#[test]
fn map_after_rect_refresh_uses_new_rect() {
    let mut g = SurfaceGeometry::unscaled(BufferSize::new(800, 500));
    let input = PointerInput::Pointer(Point::new(200.0, 100.0));
    assert!(point_approx_eq(g.map_to_local(&input).unwrap(), Point::new(200.0, 100.0)));

    g.rect = SurfaceRect::new(0.0, 0.0, 400.0, 250.0);
    assert!(point_approx_eq(g.map_to_local(&input).unwrap(), Point::new(400.0, 200.0)));
}
