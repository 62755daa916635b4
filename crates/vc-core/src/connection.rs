//! Edge geometry between nodes.
//!
//! An edge leaves the right-centre of its source and enters the left-centre
//! of its target as a horizontal S-curve. Control points are pushed out
//! horizontally by a fraction of the horizontal gap, capped.

use crate::config::ConnectionConfig;
use crate::id::NodeId;
use crate::model::NodeKind;
use crate::store::NodeStore;
use kurbo::{BezPath, CubicBez, Point, Rect, Vec2};
use serde::Serialize;

/// Stroke emphasis of an edge, chosen by what it feeds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeTone {
    /// Edge into the timeline.
    Primary,
    /// Edge into a final-cut node.
    Accent,
    Muted,
}

impl EdgeTone {
    pub fn for_target(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Timeline => EdgeTone::Primary,
            NodeKind::Finalcut => EdgeTone::Accent,
            _ => EdgeTone::Muted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
    pub curve: CubicBez,
    pub tone: EdgeTone,
}

impl Connection {
    /// SVG path data (`M … C …`) for the curve.
    pub fn to_svg_path(&self) -> String {
        let mut path = BezPath::new();
        path.move_to(self.curve.p0);
        path.curve_to(self.curve.p1, self.curve.p2, self.curve.p3);
        path.to_svg()
    }
}

/// Curve from the right-centre of `source` to the left-centre of `target`.
pub fn connection_curve(source: Rect, target: Rect, config: &ConnectionConfig) -> CubicBez {
    let start = Point::new(source.x1, source.center().y);
    let end = Point::new(target.x0, target.center().y);
    let reach = ((end.x - start.x).abs() * config.curvature).min(config.max_control_offset);
    let bend = Vec2::new(reach, 0.0);
    CubicBez::new(start, start + bend, end - bend, end)
}

/// Every drawable edge in the store, in paint order.
///
/// Connections whose target id is not in the store are skipped.
pub fn route_connections(store: &NodeStore, config: &ConnectionConfig) -> Vec<Connection> {
    let mut out = Vec::new();
    for node in store.nodes() {
        let Some(source) = store.world_rect(node.id) else {
            continue;
        };
        for &target_id in &node.connections {
            let (Some(target), Some(target_rect)) =
                (store.node(target_id), store.world_rect(target_id))
            else {
                log::trace!("skipping dangling connection {} -> {}", node.id, target_id);
                continue;
            };
            out.push(Connection {
                from: node.id,
                to: target_id,
                curve: connection_curve(source, target_rect, config),
                tone: EdgeTone::for_target(target.kind),
            });
        }
    }
    out
}
