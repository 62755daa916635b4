//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. On macOS
//! `meta` is ⌘; elsewhere `ctrl` plays the same role.

use crate::input::Modifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    ZoomIn,
    ZoomOut,
    ResetView,
    Deselect,
    /// Open the details panel of the selected node.
    OpenDetails,
}

impl ShortcutAction {
    pub fn name(self) -> &'static str {
        match self {
            Self::ZoomIn => "zoomIn",
            Self::ZoomOut => "zoomOut",
            Self::ResetView => "resetView",
            Self::Deselect => "deselect",
            Self::OpenDetails => "openDetails",
        }
    }
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action. `key` is the `KeyboardEvent.key`
    /// value. Returns `None` if the combo has no binding.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        if modifiers.command() {
            return match key {
                "=" | "+" => Some(ShortcutAction::ZoomIn),
                "-" | "_" => Some(ShortcutAction::ZoomOut),
                "0" => Some(ShortcutAction::ResetView),
                _ => None,
            };
        }

        match key {
            "Escape" => Some(ShortcutAction::Deselect),
            "Enter" => Some(ShortcutAction::OpenDetails),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CMD: Modifiers = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };
    const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    #[test]
    fn resolve_zoom() {
        assert_eq!(ShortcutMap::resolve("=", CMD), Some(ShortcutAction::ZoomIn));
        assert_eq!(ShortcutMap::resolve("+", CTRL), Some(ShortcutAction::ZoomIn));
        assert_eq!(ShortcutMap::resolve("-", CMD), Some(ShortcutAction::ZoomOut));
        assert_eq!(ShortcutMap::resolve("0", CTRL), Some(ShortcutAction::ResetView));
    }

    #[test]
    fn zoom_keys_need_command() {
        assert_eq!(ShortcutMap::resolve("=", Modifiers::NONE), None);
        assert_eq!(ShortcutMap::resolve("0", Modifiers::NONE), None);
    }

    #[test]
    fn resolve_escape_and_enter() {
        assert_eq!(
            ShortcutMap::resolve("Escape", Modifiers::NONE),
            Some(ShortcutAction::Deselect)
        );
        assert_eq!(
            ShortcutMap::resolve("Enter", Modifiers::NONE),
            Some(ShortcutAction::OpenDetails)
        );
        assert_eq!(ShortcutMap::resolve("Escape", CMD), None);
    }

    #[test]
    fn resolve_unknown_key() {
        assert_eq!(ShortcutMap::resolve("q", Modifiers::NONE), None);
        assert_eq!(ShortcutMap::resolve("z", CMD), None);
    }
}
