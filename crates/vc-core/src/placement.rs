//! Grid snapping with collision avoidance.
//!
//! A dropped node is snapped to the grid, then, if that spot is taken, the
//! resolver walks outward in rings of eight compass directions until it
//! finds a spot that clears every sibling by the spacing margin. The walk is
//! bounded; when it runs out the last candidate is used even if it overlaps.

use crate::config::PlacementConfig;
use crate::id::NodeId;
use crate::model::Node;
use kurbo::{Point, Rect, Size, Vec2};
use std::f64::consts::FRAC_1_SQRT_2;

/// Unit steps at 0°, 45°, … 315°, y pointing down.
const RING_DIRECTIONS: [Vec2; 8] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    Vec2::new(0.0, 1.0),
    Vec2::new(-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    Vec2::new(-1.0, 0.0),
    Vec2::new(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    Vec2::new(0.0, -1.0),
    Vec2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementResolver {
    grid: f64,
    node_size: Size,
    spacing: f64,
    max_rings: u32,
}

impl Default for PlacementResolver {
    fn default() -> Self {
        Self::new(&PlacementConfig::default())
    }
}

impl PlacementResolver {
    pub fn new(config: &PlacementConfig) -> Self {
        Self {
            grid: config.grid_size,
            node_size: config.node_size(),
            spacing: config.spacing,
            max_rings: config.max_rings,
        }
    }

    pub fn node_size(&self) -> Size {
        self.node_size
    }

    /// Round each coordinate to the nearest grid line. Halfway values
    /// round towards positive infinity on both sides of zero.
    pub fn snap(&self, p: Point) -> Point {
        let snap_axis = |v: f64| (v / self.grid + 0.5).floor() * self.grid;
        Point::new(snap_axis(p.x), snap_axis(p.y))
    }

    /// Box used for overlap tests: the node's footprint grown by the
    /// spacing margin on the right and bottom edges.
    fn footprint(&self, origin: Point) -> Rect {
        Rect::from_origin_size(
            origin,
            Size::new(
                self.node_size.width + self.spacing,
                self.node_size.height + self.spacing,
            ),
        )
    }

    /// `true` if a node at `a` would crowd a node at `b`.
    pub fn collides(&self, a: Point, b: Point) -> bool {
        let ra = self.footprint(a);
        let rb = self.footprint(b);
        ra.x0 < rb.x1 && ra.x1 > rb.x0 && ra.y0 < rb.y1 && ra.y1 > rb.y0
    }

    fn collides_with_any(&self, candidate: Point, obstacles: &[Point]) -> bool {
        obstacles.iter().any(|&o| self.collides(candidate, o))
    }

    /// Nearest free grid-anchored position for `moving` among `siblings`.
    ///
    /// `moving` itself is ignored if it appears in `siblings`. Always
    /// returns a position; under heavy crowding it may still overlap.
    pub fn resolve<'a, I>(&self, desired: Point, moving: NodeId, siblings: I) -> Point
    where
        I: IntoIterator<Item = &'a Node>,
    {
        let obstacles: Vec<Point> = siblings
            .into_iter()
            .filter(|n| n.id != moving)
            .map(|n| n.position)
            .collect();
        self.resolve_among(desired, &obstacles)
    }

    /// Same search as [`PlacementResolver::resolve`] over bare positions.
    pub fn resolve_among(&self, desired: Point, obstacles: &[Point]) -> Point {
        let snapped = self.snap(desired);
        let mut candidate = snapped;

        for radius in 0..self.max_rings {
            let reach = f64::from(radius) * self.grid;
            for dir in RING_DIRECTIONS {
                candidate = snapped + dir * reach;
                if !self.collides_with_any(candidate, obstacles) {
                    return candidate;
                }
            }
        }

        log::debug!(
            "placement search exhausted after {} rings around ({}, {}); using ({}, {})",
            self.max_rings,
            snapped.x,
            snapped.y,
            candidate.x,
            candidate.y
        );
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeKind;
    use pretty_assertions::assert_eq;

    fn node(id: &str, x: f64, y: f64) -> Node {
        Node::new(id, NodeKind::Prop, id).at(x, y)
    }

    #[test]
    fn snap_rounds_to_nearest_multiple() {
        let r = PlacementResolver::default();
        assert_eq!(r.snap(Point::new(39.0, 41.0)), Point::new(0.0, 80.0));
        assert_eq!(r.snap(Point::new(-41.0, 119.0)), Point::new(-80.0, 80.0));
    }

    #[test]
    fn snap_halfway_rounds_up() {
        let r = PlacementResolver::default();
        assert_eq!(r.snap(Point::new(-40.0, -120.0)), Point::new(0.0, -80.0));
        assert_eq!(r.snap(Point::new(40.0, 120.0)), Point::new(80.0, 160.0));
    }

    #[test]
    fn collision_uses_spacing_margin() {
        let r = PlacementResolver::default();
        // 280 + 60 = 340 wide, 140 + 60 = 200 tall.
        assert!(r.collides(Point::ZERO, Point::new(339.0, 0.0)));
        assert!(!r.collides(Point::ZERO, Point::new(340.0, 0.0)));
        assert!(r.collides(Point::ZERO, Point::new(0.0, 199.0)));
        assert!(!r.collides(Point::ZERO, Point::new(0.0, 200.0)));
        assert!(r.collides(Point::new(339.0, 0.0), Point::ZERO));
    }

    #[test]
    fn free_grid_position_is_kept() {
        let r = PlacementResolver::default();
        let siblings = [node("a", 0.0, 0.0)];
        let p = Point::new(800.0, 400.0);
        assert_eq!(r.resolve(p, NodeId::intern("b"), &siblings), p);
    }

    #[test]
    fn moving_node_is_not_its_own_obstacle() {
        let r = PlacementResolver::default();
        let siblings = [node("self", 160.0, 160.0)];
        let p = Point::new(160.0, 160.0);
        assert_eq!(r.resolve(p, NodeId::intern("self"), &siblings), p);
    }

    #[test]
    fn crowded_drop_moves_down_first_free_ring() {
        let r = PlacementResolver::default();
        let siblings = [node("a", 0.0, 0.0)];
        // Snaps to (80, 80); ring 1 all collide, ring 2 at 90° lands at (80, 240).
        let p = r.resolve(Point::new(50.0, 50.0), NodeId::intern("b"), &siblings);
        assert!((p.x - 80.0).abs() < 1e-9 && (p.y - 240.0).abs() < 1e-9, "{p:?}");
        assert!(!r.collides(p, Point::ZERO));
    }

    #[test]
    fn exhausted_search_returns_last_candidate() {
        let config = PlacementConfig {
            max_rings: 2,
            ..PlacementConfig::default()
        };
        let r = PlacementResolver::new(&config);
        // A wall of siblings covering everything within two rings.
        let mut wall = Vec::new();
        for gx in -4..=4 {
            for gy in -4..=4 {
                wall.push(Point::new(f64::from(gx) * 80.0, f64::from(gy) * 80.0));
            }
        }
        let p = r.resolve_among(Point::ZERO, &wall);
        let last = Point::ZERO + RING_DIRECTIONS[7] * 80.0;
        assert!((p - last).hypot() < 1e-9, "{p:?}");
    }
}
