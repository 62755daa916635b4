//! WASM bridge for VirtuCast: exposes the canvas session to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page forwards mouse,
//! wheel and keyboard events here and renders from the JSON views. Every
//! input method returns the resulting signals as a JSON array, e.g.
//! `[{"type":"nodeMove","id":"char1-1","x":800,"y":80}]`.
//!
//! Pointer move/up listeners belong on `window`, so a drag that leaves the
//! canvas element still ends.

use serde::Serialize;
use vc_core::timeline::{TimelineSegment, format_runtime, total_runtime};
use vc_core::{Connection, EdgeTone, Node, NodeId, NodeUpdate, Point, Scene, Size};
use vc_editor::{Canvas, CanvasEvent, InputEvent, Modifiers};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct VirtuCanvas {
    canvas: Canvas,
}

#[wasm_bindgen]
impl VirtuCanvas {
    /// Create a canvas holding the demo production.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        console_error_panic_hook_setup();
        Self {
            canvas: Canvas::demo(Size::new(width, height)),
        }
    }

    /// Like `new`, with configuration overrides as JSON. Falls back to the
    /// canonical configuration if the overrides are rejected.
    pub fn with_config(width: f64, height: f64, config_json: &str) -> Self {
        console_error_panic_hook_setup();
        let size = Size::new(width, height);
        let canvas = match Canvas::demo_with_config(config_json, size) {
            Ok(canvas) => canvas,
            Err(err) => {
                log::warn!("{err}; using default configuration");
                Canvas::demo(size)
            }
        };
        Self { canvas }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.canvas.resize(Size::new(width, height));
    }

    // ─── Pointer & wheel ─────────────────────────────────────────────────

    /// `time_ms` is `event.timeStamp`; it drives double-click detection.
    pub fn handle_pointer_down(&mut self, x: f64, y: f64, time_ms: f64) -> String {
        self.dispatch(&InputEvent::pointer_down(x, y, time_ms))
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> String {
        self.dispatch(&InputEvent::pointer_move(x, y))
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> String {
        self.dispatch(&InputEvent::pointer_up(x, y))
    }

    /// Zoom at `(x, y)` (canvas-relative) and suppress the page scroll.
    pub fn handle_wheel(&mut self, event: &web_sys::WheelEvent, x: f64, y: f64) -> String {
        event.prevent_default();
        self.handle_wheel_delta(x, y, event.delta_y())
    }

    pub fn handle_wheel_delta(&mut self, x: f64, y: f64, delta_y: f64) -> String {
        self.dispatch(&InputEvent::wheel(x, y, delta_y))
    }

    // ─── Keyboard & buttons ──────────────────────────────────────────────

    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        self.dispatch(&InputEvent::key(key, modifiers))
    }

    pub fn zoom_in(&mut self) -> String {
        signals_json(&self.canvas.zoom_in())
    }

    pub fn zoom_out(&mut self) -> String {
        signals_json(&self.canvas.zoom_out())
    }

    pub fn reset_view(&mut self) -> String {
        signals_json(&self.canvas.reset_view())
    }

    // ─── Edits ───────────────────────────────────────────────────────────

    /// Apply `{"title"?, "description"?, "status"?, "thumbnail"?}`.
    /// Returns `true` if the node changed.
    pub fn update_node(&mut self, node_id: &str, json: &str) -> bool {
        match serde_json::from_str::<NodeUpdate>(json) {
            Ok(update) => self.canvas.update_node(NodeId::intern(node_id), &update),
            Err(err) => {
                log::warn!("bad node update for {node_id}: {err}");
                false
            }
        }
    }

    /// Merge a partial settings object into the node's metadata.
    /// Returns `true` if the node changed.
    pub fn update_node_metadata(&mut self, node_id: &str, json: &str) -> bool {
        self.canvas
            .update_node_metadata_json(NodeId::intern(node_id), json)
            .unwrap_or_else(|err| {
                log::warn!("bad metadata patch for {node_id}: {err}");
                false
            })
    }

    // ─── Views ───────────────────────────────────────────────────────────

    /// Id of the topmost node under a canvas-relative point, or `""`.
    pub fn node_at(&self, x: f64, y: f64) -> String {
        self.canvas
            .node_at(Point::new(x, y))
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    pub fn selected_id(&self) -> String {
        self.canvas
            .selected()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    /// `{"scenes":[…], "freeNodes":[…], "selected":id|null}`. Every node
    /// carries its kind's `accent` color token.
    pub fn nodes_json(&self) -> String {
        let store = self.canvas.store();
        to_json(
            &NodesView {
                scenes: store.scenes().iter().map(SceneView::from).collect(),
                free_nodes: store.free_nodes().iter().map(NodeView::from).collect(),
                selected: self.canvas.selected(),
                node_width: store.node_size().width,
                node_height: store.node_size().height,
                container_padding: self.canvas.config().scene.container_padding,
            },
            "{}",
        )
    }

    /// World-space curves, in paint order, with SVG path data.
    pub fn connections_json(&self) -> String {
        let views: Vec<ConnectionView> = self
            .canvas
            .connections()
            .iter()
            .map(ConnectionView::from)
            .collect();
        to_json(&views, "[]")
    }

    pub fn timeline_json(&self) -> String {
        let total = total_runtime(self.canvas.store());
        to_json(
            &TimelineView {
                segments: self.canvas.timeline(),
                total_runtime: total,
                formatted: format_runtime(total),
            },
            "{}",
        )
    }

    pub fn viewport_json(&self) -> String {
        let vp = self.canvas.viewport();
        to_json(
            &ViewportView {
                offset_x: vp.offset().x,
                offset_y: vp.offset().y,
                scale: vp.scale(),
                scale_percent: vp.scale_percent(),
            },
            "{}",
        )
    }
}

impl VirtuCanvas {
    fn dispatch(&mut self, event: &InputEvent) -> String {
        signals_json(&self.canvas.handle_input(event))
    }
}

// ─── JSON views ──────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NodesView<'a> {
    scenes: Vec<SceneView<'a>>,
    free_nodes: Vec<NodeView<'a>>,
    selected: Option<NodeId>,
    node_width: f64,
    node_height: f64,
    container_padding: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SceneView<'a> {
    id: &'a str,
    title: &'a str,
    duration: u32,
    color: &'a str,
    position: Point,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<&'a str>,
    nodes: Vec<NodeView<'a>>,
}

impl<'a> From<&'a Scene> for SceneView<'a> {
    fn from(scene: &'a Scene) -> Self {
        Self {
            id: &scene.id,
            title: &scene.title,
            duration: scene.duration,
            color: &scene.color,
            position: scene.position,
            preview: scene.preview.as_deref(),
            nodes: scene.nodes.iter().map(NodeView::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct NodeView<'a> {
    #[serde(flatten)]
    node: &'a Node,
    accent: &'static str,
}

impl<'a> From<&'a Node> for NodeView<'a> {
    fn from(node: &'a Node) -> Self {
        Self {
            node,
            accent: node.kind.accent(),
        }
    }
}

#[derive(Serialize)]
struct ConnectionView {
    from: NodeId,
    to: NodeId,
    tone: EdgeTone,
    path: String,
}

impl From<&Connection> for ConnectionView {
    fn from(c: &Connection) -> Self {
        Self {
            from: c.from,
            to: c.to,
            tone: c.tone,
            path: c.to_svg_path(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimelineView {
    segments: Vec<TimelineSegment>,
    total_runtime: u32,
    formatted: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewportView {
    offset_x: f64,
    offset_y: f64,
    scale: f64,
    scale_percent: u32,
}

fn to_json<T: Serialize>(value: &T, fallback: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| fallback.to_string())
}

fn signals_json(events: &[CanvasEvent]) -> String {
    to_json(&events, "[]")
}

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("VirtuCast WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
