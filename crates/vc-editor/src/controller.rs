//! Pointer interaction state machine.
//!
//! ```text
//!            down(canvas)                 down(node)
//!   Idle ───────────────▶ Panning   Idle ───────────▶ DraggingNode
//!    ▲                      │        ▲                     │
//!    └──────── up ──────────┘        └──────── up ─────────┘
//! ```
//!
//! Transitions are pure functions of the current [`InteractionState`] that
//! return the next state plus the [`Action`]s the canvas session must apply.
//! [`InteractionController`] owns the current state and the last click, and
//! adds double-click detection and wheel zoom on top.

use crate::input::InputEvent;
use smallvec::{SmallVec, smallvec};
use vc_core::config::{InteractionConfig, ViewportConfig};
use vc_core::{NodeId, Point, Vec2, Viewport};

pub type Actions = SmallVec<[Action; 2]>;

/// What lies under the pointer when it goes down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerTarget {
    /// Empty canvas or a scene container background.
    Canvas,
    /// A movable node, with its current scene-local position.
    Node { id: NodeId, position: Point },
    /// A node that cannot be dragged. It is still selectable.
    Pinned { id: NodeId },
}

impl PointerTarget {
    pub fn node_id(&self) -> Option<NodeId> {
        match *self {
            Self::Canvas => None,
            Self::Node { id, .. } | Self::Pinned { id } => Some(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Panning {
        /// Screen point where the pan started.
        start: Point,
        start_offset: Vec2,
    },
    DraggingNode {
        id: NodeId,
        /// Screen point where the drag started.
        start: Point,
        /// Scene-local position of the node when the drag started.
        node_start: Point,
    },
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Set the viewport translation.
    Pan { offset: Vec2 },
    /// Move a node towards a scene-local candidate; the placement resolver
    /// decides where it lands.
    MoveNode { id: NodeId, candidate: Point },
    Select { id: NodeId },
    ClearSelection,
    OpenDetails { id: NodeId },
    ZoomAt { anchor: Point, factor: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: InteractionState,
    pub actions: Actions,
}

impl Transition {
    fn to(next: InteractionState) -> Self {
        Self {
            next,
            actions: SmallVec::new(),
        }
    }

    fn with(next: InteractionState, actions: Actions) -> Self {
        Self { next, actions }
    }
}

// ─── Pure transitions ────────────────────────────────────────────────────

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Start a gesture. Any gesture still in progress is abandoned first.
    pub fn on_pointer_down(self, screen: Point, target: PointerTarget, offset: Vec2) -> Transition {
        match target {
            PointerTarget::Canvas => Transition::with(
                Self::Panning {
                    start: screen,
                    start_offset: offset,
                },
                smallvec![Action::ClearSelection],
            ),
            PointerTarget::Node { id, position } => Transition::with(
                Self::DraggingNode {
                    id,
                    start: screen,
                    node_start: position,
                },
                smallvec![Action::Select { id }],
            ),
            PointerTarget::Pinned { id } => {
                Transition::with(Self::Idle, smallvec![Action::Select { id }])
            }
        }
    }

    /// Pan deltas are in screen pixels; drag deltas are divided by `scale`
    /// to get world units.
    pub fn on_pointer_move(self, screen: Point, scale: f64) -> Transition {
        match self {
            Self::Idle => Transition::to(self),
            Self::Panning {
                start,
                start_offset,
            } => Transition::with(
                self,
                smallvec![Action::Pan {
                    offset: start_offset + (screen - start),
                }],
            ),
            Self::DraggingNode {
                id,
                start,
                node_start,
            } => Transition::with(
                self,
                smallvec![Action::MoveNode {
                    id,
                    candidate: node_start + (screen - start) / scale,
                }],
            ),
        }
    }

    pub fn on_pointer_up(self) -> Transition {
        Transition::to(Self::Idle)
    }

    /// Wheel zoom is legal in every state and never changes it.
    pub fn on_wheel(self, anchor: Point, delta_y: f64, config: &ViewportConfig) -> Transition {
        match wheel_factor(delta_y, config) {
            Some(factor) => Transition::with(self, smallvec![Action::ZoomAt { anchor, factor }]),
            None => Transition::to(self),
        }
    }
}

/// Wheel zoom factor for a scroll delta. `None` for a zero or NaN delta.
pub fn wheel_factor(delta_y: f64, config: &ViewportConfig) -> Option<f64> {
    if delta_y > 0.0 {
        Some(config.wheel_zoom_out)
    } else if delta_y < 0.0 {
        Some(config.wheel_zoom_in)
    } else {
        None
    }
}

// ─── Controller ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
struct LastClick {
    id: NodeId,
    time_ms: f64,
}

#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: InteractionState,
    last_click: Option<LastClick>,
    config: InteractionConfig,
}

impl InteractionController {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            state: InteractionState::Idle,
            last_click: None,
            config,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Feed one input event. `target` is only consulted for pointer-down.
    /// Key events are not handled here.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        target: PointerTarget,
        viewport: &Viewport,
    ) -> Actions {
        match *event {
            InputEvent::PointerDown { x, y, time_ms, .. } => {
                self.pointer_down(Point::new(x, y), time_ms, target, viewport.offset())
            }
            InputEvent::PointerMove { x, y, .. } => {
                self.step(self.state.on_pointer_move(Point::new(x, y), viewport.scale()))
            }
            InputEvent::PointerUp { .. } => self.step(self.state.on_pointer_up()),
            InputEvent::Wheel { x, y, delta_y } => self.step(self.state.on_wheel(
                Point::new(x, y),
                delta_y,
                viewport.config(),
            )),
            InputEvent::Key { .. } => SmallVec::new(),
        }
    }

    fn pointer_down(
        &mut self,
        screen: Point,
        time_ms: f64,
        target: PointerTarget,
        offset: Vec2,
    ) -> Actions {
        if !self.state.is_idle() {
            log::debug!("pointer down during {:?}; ending stale gesture", self.state);
            self.state = InteractionState::Idle;
        }

        let Some(id) = target.node_id() else {
            self.last_click = None;
            return self.step(self.state.on_pointer_down(screen, target, offset));
        };

        if let Some(last) = self.last_click
            && last.id == id
            && (0.0..=self.config.double_click_ms).contains(&(time_ms - last.time_ms))
        {
            self.last_click = None;
            log::trace!("double click on {id}");
            return smallvec![Action::OpenDetails { id }];
        }

        self.last_click = Some(LastClick { id, time_ms });
        self.step(self.state.on_pointer_down(screen, target, offset))
    }

    fn step(&mut self, transition: Transition) -> Actions {
        self.state = transition.next;
        transition.actions
    }
}
