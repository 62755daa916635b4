//! Integration tests: seeded store → placement → connection routing.

use pretty_assertions::assert_eq;
use vc_core::seed::{MASTER_TIMELINE_ID, demo_store};
use vc_core::timeline::{format_runtime, timeline_segments, total_runtime};
use vc_core::{CanvasConfig, EdgeTone, NodeId, PlacementResolver, Point, route_connections};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn demo_edges_all_resolve() {
    init_logging();
    let config = CanvasConfig::default();
    let store = demo_store(&config);
    let edges = route_connections(&store, &config.connection);

    let declared: usize = store.nodes().map(|n| n.connections.len()).sum();
    assert_eq!(edges.len(), declared, "demo data has no dangling ids");
    assert!(edges.iter().all(|e| e.tone == EdgeTone::Muted));
}

#[test]
fn edges_follow_a_dragged_node() {
    init_logging();
    let config = CanvasConfig::default();
    let mut store = demo_store(&config);
    let resolver = PlacementResolver::new(&config.placement);
    let style = NodeId::intern("style1-1");

    let before = route_connections(&store, &config.connection);
    let placed = store
        .move_node(style, Point::new(1200.0, 640.0), &resolver)
        .expect("style node is movable");
    assert_eq!(placed, Point::new(1200.0, 640.0));

    let after = route_connections(&store, &config.connection);
    let into_style = |edges: &[vc_core::Connection]| {
        edges
            .iter()
            .find(|e| e.to == style)
            .map(|e| e.curve.p3)
            .expect("edge into style1-1")
    };
    let moved = into_style(&after);
    assert!((moved.y - into_style(&before).y - 390.0).abs() < 1e-9);

    // Moved endpoint sits on the left-centre of the node's world rect.
    let rect = store.world_rect(style).unwrap();
    assert_eq!(moved, Point::new(rect.x0, rect.center().y));
}

#[test]
fn dropping_onto_a_sibling_is_deflected() {
    init_logging();
    let config = CanvasConfig::default();
    let mut store = demo_store(&config);
    let resolver = PlacementResolver::new(&config.placement);
    let vid = NodeId::intern("vid1-1");
    let img_pos = store.node(NodeId::intern("img1-1")).unwrap().position;

    let placed = store.move_node(vid, img_pos, &resolver).unwrap();
    for sibling in store.siblings(vid) {
        assert!(
            !resolver.collides(placed, sibling.position),
            "vid1-1 at {placed:?} overlaps {}",
            sibling.id
        );
    }
}

#[test]
fn timeline_node_is_pinned() {
    let config = CanvasConfig::default();
    let mut store = demo_store(&config);
    let resolver = PlacementResolver::new(&config.placement);
    let id = NodeId::intern(MASTER_TIMELINE_ID);
    assert_eq!(store.move_node(id, Point::ZERO, &resolver), None);
}

#[test]
fn demo_runtime() {
    let store = demo_store(&CanvasConfig::default());
    assert_eq!(total_runtime(&store), 180);
    assert_eq!(format_runtime(total_runtime(&store)), "3:00");
    assert_eq!(timeline_segments(&store)[0].scene_id, "scene1");
}
