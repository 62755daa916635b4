//! Hit testing: world point → node lookup.
//!
//! Walks the store in reverse paint order so the last painted node wins.

use crate::controller::PointerTarget;
use vc_core::{NodeId, NodeStore, Point};

/// Topmost node whose world rectangle contains `world`.
pub fn hit_test(store: &NodeStore, world: Point) -> Option<NodeId> {
    store
        .nodes()
        .rev()
        .find(|node| {
            store
                .world_rect(node.id)
                .is_some_and(|bounds| bounds.contains(world))
        })
        .map(|node| node.id)
}

/// Classify what a press at `world` lands on.
pub fn pointer_target(store: &NodeStore, world: Point) -> PointerTarget {
    match hit_test(store, world) {
        None => PointerTarget::Canvas,
        Some(id) if store.is_pinned(id) => PointerTarget::Pinned { id },
        Some(id) => match store.node(id) {
            Some(node) => PointerTarget::Node {
                id,
                position: node.position,
            },
            None => PointerTarget::Canvas,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vc_core::{CanvasConfig, Node, NodeKind, Scene};

    fn store() -> NodeStore {
        let mut scene = Scene::new("s", "S", 60);
        scene.position = Point::new(150.0, 150.0); // origin at (0, 0)
        scene.nodes = vec![
            Node::new("under", NodeKind::Script, "under").at(0.0, 0.0),
            Node::new("over", NodeKind::Image, "over").at(100.0, 50.0),
        ];
        let timeline = Node::new("tl", NodeKind::Timeline, "tl").at(1000.0, 0.0);
        NodeStore::new(vec![scene], vec![timeline], &CanvasConfig::default())
    }

    #[test]
    fn later_nodes_are_on_top() {
        let s = store();
        assert_eq!(hit_test(&s, Point::new(150.0, 100.0)), Some(NodeId::intern("over")));
        assert_eq!(hit_test(&s, Point::new(10.0, 10.0)), Some(NodeId::intern("under")));
    }

    #[test]
    fn background_misses() {
        let s = store();
        assert_eq!(hit_test(&s, Point::new(-5.0, -5.0)), None);
        assert_eq!(pointer_target(&s, Point::new(900.0, 500.0)), PointerTarget::Canvas);
    }

    #[test]
    fn free_nodes_are_pinned_targets() {
        let s = store();
        assert_eq!(
            pointer_target(&s, Point::new(1010.0, 10.0)),
            PointerTarget::Pinned {
                id: NodeId::intern("tl")
            }
        );
        assert_eq!(
            pointer_target(&s, Point::new(10.0, 10.0)),
            PointerTarget::Node {
                id: NodeId::intern("under"),
                position: Point::ZERO,
            }
        );
    }
}
