use approx::assert_abs_diff_eq;

use tilecut_core::geometry::Point;
use tilecut_core::viewport::{compute_scale, ViewportState, MAX_ZOOM, MIN_ZOOM};

#[test]
fn test_compute_scale_multiplies_fit_and_zoom() {
    let s = compute_scale([500.0, 400.0], [1000.0, 800.0], 2.0);
    assert_abs_diff_eq!(s, 1.0, epsilon = 1e-12);
}

#[test]
fn test_round_trip_within_one_pixel() {
    let mut vp = ViewportState::new([1280.0, 720.0], [4032.0, 3024.0]);
    let points = [
        Point::new(0.0, 0.0),
        Point::new(13.7, 999.1),
        Point::new(640.5, 360.25),
        Point::new(4000.0, 3000.0),
    ];

    let mut zoom = MIN_ZOOM;
    while zoom <= MAX_ZOOM {
        vp.set_zoom(zoom).unwrap();
        for &p in &points {
            let back = vp.to_display(vp.to_source(p));
            assert!((back.x - p.x).abs() < 1.0, "zoom {zoom}: {p:?} -> {back:?}");
            assert!((back.y - p.y).abs() < 1.0, "zoom {zoom}: {p:?} -> {back:?}");
        }
        zoom += 0.35;
    }
}

#[test]
fn test_zoom_out_of_range_rejected_unchanged() {
    let mut vp = ViewportState::new([800.0, 600.0], [1600.0, 1200.0]);
    vp.set_zoom(2.0).unwrap();

    assert!(vp.set_zoom(5.5).is_err());
    assert!(vp.set_zoom(0.05).is_err());
    assert!(vp.set_zoom(f64::NAN).is_err());
    assert_abs_diff_eq!(vp.zoom(), 2.0);
}

#[test]
fn test_zoom_steps_reach_bounds_exactly() {
    let mut vp = ViewportState::default();
    // 1.0 -> 0.1 in nine steps accumulates rounding error
    for _ in 0..9 {
        vp.zoom_by(-0.1).unwrap();
    }
    assert_abs_diff_eq!(vp.zoom(), MIN_ZOOM, epsilon = 1e-12);
    assert!(vp.zoom_by(-0.1).is_err());
    assert_abs_diff_eq!(vp.zoom(), MIN_ZOOM, epsilon = 1e-12);

    vp.set_zoom(4.9).unwrap();
    vp.zoom_by(0.1).unwrap();
    assert_abs_diff_eq!(vp.zoom(), MAX_ZOOM, epsilon = 1e-12);
    assert!(vp.zoom_by(0.1).is_err());
}

#[test]
fn test_refit_keeps_zoom() {
    let mut vp = ViewportState::new([500.0, 400.0], [1000.0, 800.0]);
    vp.set_zoom(3.0).unwrap();
    vp.refit([1000.0, 800.0], [1000.0, 800.0]);
    assert_abs_diff_eq!(vp.fit_scale(), 1.0);
    assert_abs_diff_eq!(vp.effective_scale(), 3.0);
}
