//! Input abstraction layer.
//!
//! Normalizes browser mouse, wheel and keyboard events into a unified
//! `InputEvent` consumed by the canvas session. Coordinates are screen
//! pixels relative to the canvas element.

use vc_core::Point;

/// Keyboard modifier state at the time of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// ⌘ on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Button pressed. `time_ms` is a monotonic host timestamp used for
    /// double-click detection.
    PointerDown {
        x: f64,
        y: f64,
        time_ms: f64,
        modifiers: Modifiers,
    },

    PointerMove {
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },

    /// Button released, anywhere in the window.
    PointerUp { x: f64, y: f64 },

    /// Wheel tick. Positive `delta_y` scrolls away from the user.
    Wheel { x: f64, y: f64, delta_y: f64 },

    /// `key` is the `KeyboardEvent.key` value.
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64, time_ms: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            time_ms,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn wheel(x: f64, y: f64, delta_y: f64) -> Self {
        Self::Wheel { x, y, delta_y }
    }

    pub fn key(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self::Key {
            key: key.into(),
            modifiers,
        }
    }

    /// Screen position, if this event has one.
    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y }
            | Self::Wheel { x, y, .. } => Some(Point::new(x, y)),
            Self::Key { .. } => None,
        }
    }
}
