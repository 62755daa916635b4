//! Canvas session: the single owner of store, viewport and controller.
//!
//! Every input goes through [`Canvas::handle_input`], which runs the
//! interaction controller, applies the resulting actions (through the
//! placement resolver for node moves) and reports what changed as
//! [`CanvasEvent`]s for the presentation layer.

use crate::controller::{Action, InteractionController, InteractionState, PointerTarget};
use crate::hit::{hit_test, pointer_target};
use crate::input::InputEvent;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use serde::Serialize;
use vc_core::metadata::{MetadataMap, parse_patch};
use vc_core::seed::demo_store;
use vc_core::timeline::{TimelineSegment, timeline_segments};
use vc_core::{
    CanvasConfig, Connection, NodeId, NodeStore, NodeUpdate, PlacementResolver, Point, Size,
    VcResult, Viewport, route_connections,
};

/// Presentation signal produced by the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CanvasEvent {
    /// A node landed at a resolved scene-local position.
    NodeMove { id: NodeId, x: f64, y: f64 },
    NodeSelect { id: NodeId },
    NodeOpenDetails { id: NodeId },
    SelectionCleared,
    ViewportChange {
        #[serde(rename = "offsetX")]
        offset_x: f64,
        #[serde(rename = "offsetY")]
        offset_y: f64,
        scale: f64,
    },
}

pub struct Canvas {
    store: NodeStore,
    viewport: Viewport,
    controller: InteractionController,
    resolver: PlacementResolver,
    config: CanvasConfig,
    /// Canvas element size in screen pixels.
    size: Size,
    selected: Option<NodeId>,
}

impl Canvas {
    pub fn new(store: NodeStore, config: CanvasConfig, size: Size) -> Self {
        Self {
            store,
            viewport: Viewport::new(config.viewport),
            controller: InteractionController::new(config.interaction),
            resolver: PlacementResolver::new(&config.placement),
            config,
            size,
            selected: None,
        }
    }

    /// The demo production with the canonical configuration.
    pub fn demo(size: Size) -> Self {
        let config = CanvasConfig::default();
        Self::new(demo_store(&config), config, size)
    }

    /// The demo production with configuration overrides loaded from JSON.
    pub fn demo_with_config(config_json: &str, size: Size) -> VcResult<Self> {
        let config = CanvasConfig::from_json(config_json)?;
        Ok(Self::new(demo_store(&config), config, size))
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.controller.state()
    }

    /// Topmost node under a screen point.
    pub fn node_at(&self, screen: Point) -> Option<NodeId> {
        hit_test(&self.store, self.viewport.to_world(screen))
    }

    // ─── Input ───────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &InputEvent) -> Vec<CanvasEvent> {
        match event {
            InputEvent::Key { key, modifiers } => match ShortcutMap::resolve(key, *modifiers) {
                Some(action) => self.dispatch_shortcut(action),
                None => Vec::new(),
            },
            InputEvent::PointerDown { x, y, .. } => {
                let world = self.viewport.to_world(Point::new(*x, *y));
                let target = pointer_target(&self.store, world);
                let actions = self.controller.handle(event, target, &self.viewport);
                self.apply(&actions)
            }
            _ => {
                let actions = self
                    .controller
                    .handle(event, PointerTarget::Canvas, &self.viewport);
                self.apply(&actions)
            }
        }
    }

    fn dispatch_shortcut(&mut self, action: ShortcutAction) -> Vec<CanvasEvent> {
        log::trace!("shortcut {}", action.name());
        match action {
            ShortcutAction::ZoomIn => self.zoom_in(),
            ShortcutAction::ZoomOut => self.zoom_out(),
            ShortcutAction::ResetView => self.reset_view(),
            ShortcutAction::Deselect => self.apply(&[Action::ClearSelection]),
            ShortcutAction::OpenDetails => match self.selected {
                Some(id) => self.apply(&[Action::OpenDetails { id }]),
                None => Vec::new(),
            },
        }
    }

    fn apply(&mut self, actions: &[Action]) -> Vec<CanvasEvent> {
        let mut events = Vec::new();
        for &action in actions {
            match action {
                Action::Pan { offset } => {
                    if self.viewport.pan_to(offset) {
                        events.push(self.viewport_event());
                    }
                }
                Action::MoveNode { id, candidate } => {
                    let before = self.store.node(id).map(|n| n.position);
                    if let Some(placed) = self.store.move_node(id, candidate, &self.resolver)
                        && before != Some(placed)
                    {
                        events.push(CanvasEvent::NodeMove {
                            id,
                            x: placed.x,
                            y: placed.y,
                        });
                    }
                }
                Action::Select { id } => {
                    self.selected = Some(id);
                    events.push(CanvasEvent::NodeSelect { id });
                }
                Action::ClearSelection => {
                    if self.selected.take().is_some() {
                        events.push(CanvasEvent::SelectionCleared);
                    }
                }
                Action::OpenDetails { id } => {
                    self.selected = Some(id);
                    events.push(CanvasEvent::NodeOpenDetails { id });
                }
                Action::ZoomAt { anchor, factor } => {
                    if self.viewport.zoom_at(anchor, factor) {
                        events.push(self.viewport_event());
                    }
                }
            }
        }
        events
    }

    // ─── View ────────────────────────────────────────────────────────────

    fn centre(&self) -> Point {
        Point::new(self.size.width / 2.0, self.size.height / 2.0)
    }

    /// Button zoom, anchored at the canvas centre.
    pub fn zoom_in(&mut self) -> Vec<CanvasEvent> {
        let factor = self.viewport.config().button_zoom_in;
        self.apply(&[Action::ZoomAt {
            anchor: self.centre(),
            factor,
        }])
    }

    pub fn zoom_out(&mut self) -> Vec<CanvasEvent> {
        let factor = self.viewport.config().button_zoom_out;
        self.apply(&[Action::ZoomAt {
            anchor: self.centre(),
            factor,
        }])
    }

    pub fn reset_view(&mut self) -> Vec<CanvasEvent> {
        if self.viewport.reset() {
            vec![self.viewport_event()]
        } else {
            Vec::new()
        }
    }

    /// Track the canvas element size. Negative or non-finite sizes count
    /// as zero.
    pub fn resize(&mut self, size: Size) {
        let clean = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        self.size = Size::new(clean(size.width), clean(size.height));
    }

    /// Current transform as a signal.
    pub fn viewport_event(&self) -> CanvasEvent {
        let offset = self.viewport.offset();
        CanvasEvent::ViewportChange {
            offset_x: offset.x,
            offset_y: offset.y,
            scale: self.viewport.scale(),
        }
    }

    // ─── Edits ───────────────────────────────────────────────────────────

    pub fn update_node(&mut self, id: NodeId, update: &NodeUpdate) -> bool {
        self.store.update_node(id, update)
    }

    pub fn update_node_metadata(&mut self, id: NodeId, patch: &MetadataMap) -> bool {
        self.store.update_metadata(id, patch)
    }

    /// Merge a metadata patch given as a JSON object.
    ///
    /// # Errors
    /// Returns an error if `patch` is not a JSON object.
    pub fn update_node_metadata_json(&mut self, id: NodeId, patch: &str) -> VcResult<bool> {
        let patch = parse_patch(patch)?;
        Ok(self.store.update_metadata(id, &patch))
    }

    // ─── Derived views ───────────────────────────────────────────────────

    pub fn connections(&self) -> Vec<Connection> {
        route_connections(&self.store, &self.config.connection)
    }

    pub fn timeline(&self) -> Vec<TimelineSegment> {
        timeline_segments(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn events_serialize_with_type_tags() {
        let move_event = CanvasEvent::NodeMove {
            id: NodeId::intern("char1-1"),
            x: 880.0,
            y: 160.0,
        };
        assert_eq!(
            serde_json::to_value(&move_event).unwrap(),
            json!({ "type": "nodeMove", "id": "char1-1", "x": 880.0, "y": 160.0 })
        );
        let vp = CanvasEvent::ViewportChange {
            offset_x: 1.0,
            offset_y: 2.0,
            scale: 0.6,
        };
        assert_eq!(
            serde_json::to_value(&vp).unwrap(),
            json!({ "type": "viewportChange", "offsetX": 1.0, "offsetY": 2.0, "scale": 0.6 })
        );
        assert_eq!(
            serde_json::to_value(CanvasEvent::SelectionCleared).unwrap(),
            json!({ "type": "selectionCleared" })
        );
    }

    #[test]
    fn zoom_buttons_anchor_at_centre() {
        let mut canvas = Canvas::demo(Size::new(1000.0, 600.0));
        let centre = Point::new(500.0, 300.0);
        let before = canvas.viewport().to_world(centre);
        let events = canvas.zoom_in();
        assert_eq!(events.len(), 1);
        assert!((canvas.viewport().scale() - 0.72).abs() < 1e-9);
        assert!((canvas.viewport().to_world(centre) - before).hypot() < 1e-9);
    }

    #[test]
    fn reset_view_is_quiet_when_already_reset() {
        let mut canvas = Canvas::demo(Size::new(800.0, 600.0));
        assert!(canvas.reset_view().is_empty());
        canvas.zoom_out();
        assert_eq!(canvas.reset_view(), vec![canvas.viewport_event()]);
        assert_eq!(canvas.viewport().scale(), 0.6);
    }

    #[test]
    fn resize_sanitizes() {
        let mut canvas = Canvas::demo(Size::new(800.0, 600.0));
        canvas.resize(Size::new(-1.0, f64::NAN));
        assert_eq!(canvas.size(), Size::ZERO);
    }

    #[test]
    fn metadata_json_rejects_non_objects() {
        let mut canvas = Canvas::demo(Size::new(800.0, 600.0));
        let id = NodeId::intern("img1-1");
        assert!(canvas.update_node_metadata_json(id, "[1, 2]").is_err());
        assert!(
            canvas
                .update_node_metadata_json(id, r#"{ "prompt": "neon rain" }"#)
                .unwrap()
        );
    }

    #[test]
    fn config_overrides_apply() {
        let canvas =
            Canvas::demo_with_config(r#"{ "viewport": { "defaultScale": 1.0 } }"#, Size::ZERO)
                .unwrap();
        assert_eq!(canvas.viewport().scale(), 1.0);
        assert!(Canvas::demo_with_config("{", Size::ZERO).is_err());
    }
}
