//! Production-graph data model.
//!
//! A canvas holds ordered `Scene`s, each exclusively owning its `Node`s,
//! plus a handful of free-standing nodes (the master timeline). Nodes point
//! at each other through `connections`; targets are not required to exist.
//! Positions are scene-local: a node is drawn at its scene's origin plus
//! `position`.

use crate::id::NodeId;
use crate::metadata::NodeMetadata;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ─── Node kinds ──────────────────────────────────────────────────────────

/// Closed set of node categories. A display/grouping tag only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Script,
    Character,
    Style,
    Lighting,
    Background,
    Location,
    Camera,
    Prop,
    Wardrobe,
    Image,
    Video,
    Music,
    Sfx,
    Voiceover,
    Timeline,
    Weather,
    Finalcut,
}

impl NodeKind {
    pub const ALL: [NodeKind; 17] = [
        NodeKind::Script,
        NodeKind::Character,
        NodeKind::Style,
        NodeKind::Lighting,
        NodeKind::Background,
        NodeKind::Location,
        NodeKind::Camera,
        NodeKind::Prop,
        NodeKind::Wardrobe,
        NodeKind::Image,
        NodeKind::Video,
        NodeKind::Music,
        NodeKind::Sfx,
        NodeKind::Voiceover,
        NodeKind::Timeline,
        NodeKind::Weather,
        NodeKind::Finalcut,
    ];

    /// Wire name, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Script => "script",
            NodeKind::Character => "character",
            NodeKind::Style => "style",
            NodeKind::Lighting => "lighting",
            NodeKind::Background => "background",
            NodeKind::Location => "location",
            NodeKind::Camera => "camera",
            NodeKind::Prop => "prop",
            NodeKind::Wardrobe => "wardrobe",
            NodeKind::Image => "image",
            NodeKind::Video => "video",
            NodeKind::Music => "music",
            NodeKind::Sfx => "sfx",
            NodeKind::Voiceover => "voiceover",
            NodeKind::Timeline => "timeline",
            NodeKind::Weather => "weather",
            NodeKind::Finalcut => "finalcut",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Theme color token used for the node's icon, border and tint.
    pub fn accent(self) -> &'static str {
        match self {
            NodeKind::Script => "slate-400",
            NodeKind::Character => "purple-400",
            NodeKind::Style => "fuchsia-400",
            NodeKind::Lighting => "amber-400",
            NodeKind::Background => "blue-400",
            NodeKind::Location => "teal-400",
            NodeKind::Camera => "cyan-400",
            NodeKind::Prop => "orange-400",
            NodeKind::Wardrobe => "pink-400",
            NodeKind::Image => "emerald-400",
            NodeKind::Video => "red-400",
            NodeKind::Music | NodeKind::Sfx | NodeKind::Voiceover => "yellow-400",
            NodeKind::Timeline => "primary",
            NodeKind::Weather => "indigo-400",
            NodeKind::Finalcut => "accent",
        }
    }
}

/// Generation status shown on the node card. Never interpreted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    #[default]
    Idle,
    Processing,
    Complete,
    Error,
}

// ─── Node ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    pub title: String,
    pub description: String,

    /// Scene-local top-left corner. Mutated only through placement.
    pub position: Point,

    /// Outgoing edges in draw order. May contain ids that do not exist.
    #[serde(default)]
    pub connections: SmallVec<[NodeId; 4]>,

    #[serde(default)]
    pub status: NodeStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    pub metadata: NodeMetadata,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, kind: NodeKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            description: String::new(),
            position: Point::ZERO,
            connections: SmallVec::new(),
            status: NodeStatus::Idle,
            thumbnail: None,
            metadata: NodeMetadata::for_kind(kind),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }

    pub fn connect(mut self, targets: &[&str]) -> Self {
        self.connections
            .extend(targets.iter().map(|t| NodeId::intern(t)));
        self
    }

    pub fn with_status(mut self, status: NodeStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Apply the non-positional fields of an update. Returns `true` if any
    /// field changed.
    pub fn apply(&mut self, update: &NodeUpdate) -> bool {
        let mut changed = false;
        if let Some(title) = &update.title
            && *title != self.title
        {
            self.title.clone_from(title);
            changed = true;
        }
        if let Some(description) = &update.description
            && *description != self.description
        {
            self.description.clone_from(description);
            changed = true;
        }
        if let Some(status) = update.status
            && status != self.status
        {
            self.status = status;
            changed = true;
        }
        if let Some(thumbnail) = &update.thumbnail
            && self.thumbnail.as_ref() != Some(thumbnail)
        {
            self.thumbnail = Some(thumbnail.clone());
            changed = true;
        }
        changed
    }
}

/// Partial edit written back by the settings panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<NodeStatus>,
    pub thumbnail: Option<String>,
}

// ─── Scene ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: String,
    pub title: String,
    /// Length in seconds.
    pub duration: u32,
    /// Theme color token of the scene container.
    pub color: String,
    pub position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    pub nodes: Vec<Node>,
}

impl Scene {
    pub fn new(id: impl Into<String>, title: impl Into<String>, duration: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration,
            color: String::new(),
            position: Point::ZERO,
            preview: None,
            nodes: Vec::new(),
        }
    }

    /// World-space origin of the scene container; contained nodes are
    /// drawn relative to it.
    pub fn origin(&self, container_padding: f64) -> Point {
        self.position - Vec2::new(container_padding, container_padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kind_names_match_serde() {
        for kind in NodeKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(NodeKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(NodeKind::from_name("hologram"), None);
    }

    #[test]
    fn node_builder() {
        let node = Node::new("char1-1", NodeKind::Character, "Alira Chen")
            .describe("Corporate Executive")
            .at(800.0, 150.0)
            .connect(&["style1-1"])
            .with_status(NodeStatus::Complete);
        assert_eq!(node.position, Point::new(800.0, 150.0));
        assert_eq!(node.connections.as_slice(), &[NodeId::intern("style1-1")]);
        assert!(matches!(node.metadata, NodeMetadata::Character(_)));
    }

    #[test]
    fn apply_update_reports_changes() {
        let mut node = Node::new("vid1-1", NodeKind::Video, "Act I Complete");
        let same = NodeUpdate {
            title: Some("Act I Complete".into()),
            ..Default::default()
        };
        assert!(!node.apply(&same));

        let edit = NodeUpdate {
            description: Some("Full corporate sequence".into()),
            status: Some(NodeStatus::Processing),
            ..Default::default()
        };
        assert!(node.apply(&edit));
        assert_eq!(node.description, "Full corporate sequence");
        assert_eq!(node.status, NodeStatus::Processing);
        assert_eq!(node.title, "Act I Complete");
    }

    #[test]
    fn scene_origin_subtracts_padding() {
        let mut scene = Scene::new("scene1", "Act I", 180);
        scene.position = Point::new(200.0, 1400.0);
        assert_eq!(scene.origin(150.0), Point::new(50.0, 1250.0));
    }

    #[test]
    fn node_json_uses_type_key() {
        let node = Node::new("img1-1", NodeKind::Image, "Boardroom Sequence");
        let v = serde_json::to_value(&node).unwrap();
        assert_eq!(v["type"], "image");
        assert_eq!(v["status"], "idle");
        assert!(v.get("thumbnail").is_none());
    }
}
