//! The node store: scenes, their nodes, and free-standing nodes.
//!
//! Scene nodes move only through the placement resolver, so siblings in a
//! scene never overlap after a move. Free nodes (the master timeline) sit
//! outside every scene and are pinned.

use crate::config::CanvasConfig;
use crate::id::NodeId;
use crate::metadata::MetadataMap;
use crate::model::{Node, NodeUpdate, Scene};
use crate::placement::PlacementResolver;
use kurbo::{Point, Rect, Size};
use std::collections::HashMap;

/// Where a node lives inside the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Scene { scene: usize, node: usize },
    Free(usize),
}

#[derive(Debug, Clone)]
pub struct NodeStore {
    scenes: Vec<Scene>,
    free_nodes: Vec<Node>,
    /// Index from NodeId → slot for fast lookup.
    index: HashMap<NodeId, Slot>,
    node_size: Size,
    container_padding: f64,
}

impl NodeStore {
    pub fn new(scenes: Vec<Scene>, free_nodes: Vec<Node>, config: &CanvasConfig) -> Self {
        let mut store = Self {
            scenes,
            free_nodes,
            index: HashMap::new(),
            node_size: config.placement.node_size(),
            container_padding: config.scene.container_padding,
        };
        store.rebuild_index();
        store
    }

    /// Recompute the id index. Later duplicates of an id shadow earlier ones.
    fn rebuild_index(&mut self) {
        self.index.clear();
        for (si, scene) in self.scenes.iter().enumerate() {
            for (ni, node) in scene.nodes.iter().enumerate() {
                if self
                    .index
                    .insert(node.id, Slot::Scene { scene: si, node: ni })
                    .is_some()
                {
                    log::warn!("duplicate node id {}", node.id);
                }
            }
        }
        for (fi, node) in self.free_nodes.iter().enumerate() {
            if self.index.insert(node.id, Slot::Free(fi)).is_some() {
                log::warn!("duplicate node id {}", node.id);
            }
        }
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn free_nodes(&self) -> &[Node] {
        &self.free_nodes
    }

    /// All nodes in paint order: scenes first, in order, then free nodes.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &Node> {
        self.scenes
            .iter()
            .flat_map(|s| s.nodes.iter())
            .chain(self.free_nodes.iter())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        match *self.index.get(&id)? {
            Slot::Scene { scene, node } => self.scenes.get(scene)?.nodes.get(node),
            Slot::Free(i) => self.free_nodes.get(i),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        match *self.index.get(&id)? {
            Slot::Scene { scene, node } => self.scenes.get_mut(scene)?.nodes.get_mut(node),
            Slot::Free(i) => self.free_nodes.get_mut(i),
        }
    }

    /// The scene owning `id`, if any.
    pub fn scene_of(&self, id: NodeId) -> Option<&Scene> {
        match *self.index.get(&id)? {
            Slot::Scene { scene, .. } => self.scenes.get(scene),
            Slot::Free(_) => None,
        }
    }

    /// Free nodes cannot be dragged.
    pub fn is_pinned(&self, id: NodeId) -> bool {
        matches!(self.index.get(&id), Some(Slot::Free(_)))
    }

    /// Other nodes in the same scene as `id`. Empty for free or unknown nodes.
    pub fn siblings(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self.scene_of(id)
            .into_iter()
            .flat_map(|s| s.nodes.iter())
            .filter(move |n| n.id != id)
    }

    pub fn node_size(&self) -> Size {
        self.node_size
    }

    /// World-space offset applied to the node's scene-local position.
    pub fn origin_of(&self, id: NodeId) -> Point {
        self.scene_of(id)
            .map(|s| s.origin(self.container_padding))
            .unwrap_or(Point::ZERO)
    }

    /// World-space bounds of the node as drawn.
    pub fn world_rect(&self, id: NodeId) -> Option<Rect> {
        let node = self.node(id)?;
        let origin = self.origin_of(id) + node.position.to_vec2();
        Some(Rect::from_origin_size(origin, self.node_size))
    }

    /// Move `id` towards `candidate` (scene-local), letting the resolver pick
    /// the final spot among its siblings.
    ///
    /// Returns the position written, or `None` for unknown or pinned nodes.
    pub fn move_node(
        &mut self,
        id: NodeId,
        candidate: Point,
        resolver: &PlacementResolver,
    ) -> Option<Point> {
        if self.is_pinned(id) {
            log::debug!("ignoring move of pinned node {id}");
            return None;
        }
        let resolved = resolver.resolve(candidate, id, self.siblings(id));
        let node = self.node_mut(id)?;
        node.position = resolved;
        Some(resolved)
    }

    /// Apply a settings-panel edit. Returns `true` if the node changed.
    pub fn update_node(&mut self, id: NodeId, update: &NodeUpdate) -> bool {
        self.node_mut(id).is_some_and(|n| n.apply(update))
    }

    /// Merge a partial metadata object into the node's settings. Returns
    /// `true` if the node changed.
    pub fn update_metadata(&mut self, id: NodeId, patch: &MetadataMap) -> bool {
        self.node_mut(id)
            .is_some_and(|n| n.metadata.apply_patch(patch))
    }
}
