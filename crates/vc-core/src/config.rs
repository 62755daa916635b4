//! Canvas configuration.
//!
//! `CanvasConfig::default()` is the canonical configuration. Hosts may
//! override any subset of it from JSON.

use crate::error::{VcError, VcResult};
use kurbo::Size;
use serde::{Deserialize, Serialize};

// ─── Sections ─────────────────────────────────────────────────────────────

/// Zoom range, default zoom, and per-gesture zoom factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    /// Scale restored by `Viewport::reset`. Default: **0.6**.
    pub default_scale: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Factor applied per wheel tick towards the user (zoom in).
    pub wheel_zoom_in: f64,
    /// Factor applied per wheel tick away from the user (zoom out).
    pub wheel_zoom_out: f64,
    pub button_zoom_in: f64,
    pub button_zoom_out: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            default_scale: 0.6,
            min_scale: 0.1,
            max_scale: 3.0,
            wheel_zoom_in: 1.1,
            wheel_zoom_out: 0.9,
            button_zoom_in: 1.2,
            button_zoom_out: 0.8,
        }
    }
}

/// Grid snapping and collision avoidance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlacementConfig {
    pub grid_size: f64,
    pub node_width: f64,
    pub node_height: f64,
    /// Clearance added to a node's box when testing for overlap. Default: **60**.
    pub spacing: f64,
    /// Number of rings searched around the snapped position.
    pub max_rings: u32,
}

impl PlacementConfig {
    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            grid_size: 80.0,
            node_width: 280.0,
            node_height: 140.0,
            spacing: 60.0,
            max_rings: 20,
        }
    }
}

/// Shape of the S-curve drawn between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionConfig {
    /// Fraction of the horizontal distance used as control-point offset.
    pub curvature: f64,
    /// Upper bound on the control-point offset.
    pub max_control_offset: f64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            curvature: 0.3,
            max_control_offset: 120.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InteractionConfig {
    /// Two presses on the same node within this window open its details.
    pub double_click_ms: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            double_click_ms: 400.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
    /// Inset between a scene's `position` and its container's origin.
    pub container_padding: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            container_padding: 150.0,
        }
    }
}

// ─── Root ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub viewport: ViewportConfig,
    pub placement: PlacementConfig,
    pub connection: ConnectionConfig,
    pub interaction: InteractionConfig,
    pub scene: SceneConfig,
}

impl CanvasConfig {
    /// Load a configuration from JSON. Missing sections and fields keep
    /// their canonical defaults.
    ///
    /// # Errors
    /// Returns `VcError::Json` for malformed JSON and `VcError::Config` when
    /// the values are inconsistent (see [`CanvasConfig::validate`]).
    pub fn from_json(text: &str) -> VcResult<Self> {
        let config: CanvasConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> VcResult<()> {
        let v = &self.viewport;
        if !(v.min_scale > 0.0 && v.min_scale <= v.max_scale) {
            return Err(VcError::config(format!(
                "scale range [{}, {}] is empty or non-positive",
                v.min_scale, v.max_scale
            )));
        }
        if !(v.min_scale..=v.max_scale).contains(&v.default_scale) {
            return Err(VcError::config(format!(
                "default scale {} lies outside [{}, {}]",
                v.default_scale, v.min_scale, v.max_scale
            )));
        }
        let zoom_pairs = [
            ("wheel", v.wheel_zoom_in, v.wheel_zoom_out),
            ("button", v.button_zoom_in, v.button_zoom_out),
        ];
        for (source, zoom_in, zoom_out) in zoom_pairs {
            if !(zoom_in > 1.0 && zoom_out > 0.0 && zoom_out < 1.0) {
                return Err(VcError::config(format!(
                    "{source} zoom factors need in > 1 > out > 0, got in {zoom_in}, out {zoom_out}"
                )));
            }
        }
        let p = &self.placement;
        if p.grid_size <= 0.0 {
            return Err(VcError::config("grid size must be positive"));
        }
        if p.node_width <= 0.0 || p.node_height <= 0.0 {
            return Err(VcError::config("node size must be positive"));
        }
        if p.spacing < 0.0 {
            return Err(VcError::config("spacing must not be negative"));
        }
        let c = &self.connection;
        if !(c.curvature >= 0.0) {
            return Err(VcError::config("connection curvature must not be negative"));
        }
        if !(c.max_control_offset >= 0.0) {
            return Err(VcError::config("connection control offset cap must not be negative"));
        }
        if !(self.interaction.double_click_ms >= 0.0) {
            return Err(VcError::config("double-click window must not be negative"));
        }
        Ok(())
    }
}
