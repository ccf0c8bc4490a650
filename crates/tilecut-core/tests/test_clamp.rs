use tilecut_core::clamp::clamp_to_bounds;
use tilecut_core::geometry::PixelRect;

#[test]
fn test_clamp_top_left_overflow() {
    let out = clamp_to_bounds(PixelRect::new(-120, -120, 520, 520), 1000, 800);
    assert_eq!(out.rect, PixelRect::new(0, 0, 640, 640));
    assert_eq!((out.dx, out.dy), (120, 120));
    assert!(out.corrected());
}

#[test]
fn test_clamp_bottom_right_overflow() {
    let out = clamp_to_bounds(PixelRect::new(500, 300, 1140, 940), 1000, 800);
    assert_eq!(out.rect, PixelRect::new(360, 160, 1000, 800));
    assert!(out.fits(1000, 800));
}

#[test]
fn test_clamp_inside_is_untouched() {
    let rect = PixelRect::new(10, 20, 650, 660);
    let out = clamp_to_bounds(rect, 1000, 800);
    assert_eq!(out.rect, rect);
    assert!(!out.corrected());
}

#[test]
fn test_clamp_mixed_axes() {
    let out = clamp_to_bounds(PixelRect::new(-5, 700, 635, 1340), 1000, 800);
    assert_eq!(out.rect, PixelRect::new(0, 160, 640, 800));
}

#[test]
fn test_clamp_always_inside_when_box_fits() {
    let (w, h) = (900u32, 700u32);
    for cx in (-400..1400).step_by(37) {
        for cy in (-400..1200).step_by(41) {
            let rect = PixelRect::new(cx - 320, cy - 320, cx + 320, cy + 320);
            let out = clamp_to_bounds(rect, w, h);
            let r = out.rect;
            assert!(0 <= r.x1 && r.x1 < r.x2 && r.x2 <= i64::from(w), "{r:?}");
            assert!(0 <= r.y1 && r.y1 < r.y2 && r.y2 <= i64::from(h), "{r:?}");
            assert_eq!(r.width(), 640);
            assert_eq!(r.height(), 640);
        }
    }
}

#[test]
fn test_clamp_box_wider_than_image_only_fixes_leading_side() {
    // 640 wide box on a 500 wide image overflows both sides.
    let out = clamp_to_bounds(PixelRect::new(-70, 0, 570, 640), 500, 800);
    assert_eq!(out.rect, PixelRect::new(0, 0, 640, 640));
    assert!(!out.fits(500, 800));

    // Only the trailing side overflows: shifted left past zero.
    let out = clamp_to_bounds(PixelRect::new(0, 0, 640, 640), 500, 800);
    assert_eq!(out.rect, PixelRect::new(-140, 0, 500, 640));
    assert!(!out.fits(500, 800));
}
