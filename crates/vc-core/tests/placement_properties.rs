//! Property tests: placement resolver.
//!
//! The resolver is a pure function of (desired position, siblings), so its
//! guarantees are checked over generated layouts.

use proptest::prelude::*;
use vc_core::config::PlacementConfig;
use vc_core::{Node, NodeId, NodeKind, PlacementResolver, Point};

const GRID: f64 = 80.0;

fn sibling(i: usize, p: Point) -> Node {
    Node::new(format!("sib-{i}").as_str(), NodeKind::Prop, "sibling").at(p.x, p.y)
}

fn point_strategy() -> impl Strategy<Value = Point> {
    (-4000.0f64..4000.0, -4000.0f64..4000.0).prop_map(|(x, y)| Point::new(x, y))
}

fn grid_point_strategy() -> impl Strategy<Value = Point> {
    (-50i32..50, -50i32..50).prop_map(|(gx, gy)| Point::new(f64::from(gx) * GRID, f64::from(gy) * GRID))
}

proptest! {
    /// A grid-aligned spot that is already clear is returned unchanged.
    #[test]
    fn prop_free_grid_position_is_fixed_point(
        desired in grid_point_strategy(),
        others in proptest::collection::vec(point_strategy(), 0..12),
    ) {
        let resolver = PlacementResolver::default();
        prop_assume!(others.iter().all(|&o| !resolver.collides(desired, o)));

        let siblings: Vec<Node> = others.iter().enumerate().map(|(i, &p)| sibling(i, p)).collect();
        let placed = resolver.resolve(desired, NodeId::intern("mover"), &siblings);
        prop_assert_eq!(placed, desired);
    }

    /// The search is bounded and returns a finite position even when every
    /// candidate in range is blocked.
    #[test]
    fn prop_resolver_terminates(
        desired in point_strategy(),
        others in proptest::collection::vec(point_strategy(), 0..40),
        rings in 0u32..25,
    ) {
        let config = PlacementConfig { max_rings: rings, ..PlacementConfig::default() };
        let resolver = PlacementResolver::new(&config);
        let placed = resolver.resolve_among(desired, &others);
        prop_assert!(placed.x.is_finite() && placed.y.is_finite());
        // Never further than the outermost ring from the snapped position.
        let reach = f64::from(rings.saturating_sub(1)) * GRID + 1e-6;
        prop_assert!((placed - resolver.snap(desired)).hypot() <= reach);
    }

    /// With a single fixed neighbour the resolver always finds a clear spot.
    #[test]
    fn prop_single_neighbour_never_overlaps(
        anchor in grid_point_strategy(),
        dx in -339.0f64..339.0,
        dy in -199.0f64..199.0,
    ) {
        let resolver = PlacementResolver::default();
        let fixed = sibling(0, anchor);
        let desired = Point::new(anchor.x + dx, anchor.y + dy);
        let placed = resolver.resolve(desired, NodeId::intern("mover"), std::slice::from_ref(&fixed));
        prop_assert!(!resolver.collides(placed, anchor), "{:?} still overlaps {:?}", placed, anchor);
    }
}

#[test]
fn overlapping_drop_clears_margin() {
    // margin 60, node 280×140, A at the origin, B requested at (50, 50).
    let resolver = PlacementResolver::default();
    let a = sibling(0, Point::ZERO);
    let b = resolver.resolve(Point::new(50.0, 50.0), NodeId::intern("b"), std::slice::from_ref(&a));
    assert!(
        b.x.abs() >= 340.0 || b.y.abs() >= 200.0,
        "B at {b:?} overlaps A's expanded box"
    );
}

#[test]
fn zero_rings_returns_snapped_position() {
    let config = PlacementConfig {
        max_rings: 0,
        ..PlacementConfig::default()
    };
    let resolver = PlacementResolver::new(&config);
    let placed = resolver.resolve_among(Point::new(50.0, 50.0), &[Point::ZERO]);
    assert_eq!(placed, Point::new(80.0, 80.0));
}
