pub mod canvas;
pub mod controller;
pub mod hit;
pub mod input;
pub mod shortcuts;

pub use canvas::{Canvas, CanvasEvent};
pub use controller::{Action, InteractionController, InteractionState, PointerTarget, Transition};
pub use input::{InputEvent, Modifiers};
pub use shortcuts::{ShortcutAction, ShortcutMap};
