//! Property tests: viewport transform.

use proptest::prelude::*;
use vc_core::{Point, Vec2, Viewport};

fn viewport_strategy() -> impl Strategy<Value = Viewport> {
    (-2000.0f64..2000.0, -2000.0f64..2000.0, 0.1f64..3.0).prop_map(|(ox, oy, target)| {
        let mut vp = Viewport::default();
        vp.pan_to(Vec2::new(ox, oy));
        vp.zoom_at(Point::ZERO, target / vp.scale());
        vp
    })
}

proptest! {
    /// The world point under the cursor stays under the cursor.
    #[test]
    fn prop_zoom_keeps_anchor_world_point(
        mut vp in viewport_strategy(),
        sx in 0.0f64..1920.0,
        sy in 0.0f64..1080.0,
        factor in prop_oneof![Just(0.8), Just(0.9), Just(1.1), Just(1.2), 0.05f64..20.0],
    ) {
        let anchor = Point::new(sx, sy);
        let before = vp.to_world(anchor);
        vp.zoom_at(anchor, factor);
        let after = vp.to_world(anchor);
        prop_assert!((after - before).hypot() < 1e-6, "{:?} drifted to {:?}", before, after);
    }

    /// Any sequence of zooms keeps the scale inside [0.1, 3.0].
    #[test]
    fn prop_scale_stays_clamped(
        factors in proptest::collection::vec(0.01f64..100.0, 1..60),
    ) {
        let mut vp = Viewport::default();
        for f in factors {
            vp.zoom_at(Point::new(400.0, 300.0), f);
            prop_assert!((0.1..=3.0).contains(&vp.scale()));
        }
    }

    #[test]
    fn prop_screen_world_inverse(
        vp in viewport_strategy(),
        wx in -10000.0f64..10000.0,
        wy in -10000.0f64..10000.0,
    ) {
        let world = Point::new(wx, wy);
        let back = vp.to_world(vp.to_screen(world));
        prop_assert!((back - world).hypot() < 1e-6);
    }
}

#[test]
fn repeated_wheel_out_bottoms_out() {
    let mut vp = Viewport::default();
    for _ in 0..500 {
        vp.zoom_at(Point::new(10.0, 10.0), 0.9);
    }
    assert_eq!(vp.scale(), 0.1);
    for _ in 0..500 {
        vp.zoom_at(Point::new(10.0, 10.0), 1.1);
    }
    assert_eq!(vp.scale(), 3.0);
}
