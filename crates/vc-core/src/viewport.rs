//! Pan/zoom transform between screen pixels and world coordinates.
//!
//! `screen = world * scale + offset`. Scale is clamped to the configured
//! range; requests outside it are absorbed silently.

use crate::config::ViewportConfig;
use kurbo::{Point, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    offset: Vec2,
    scale: f64,
    config: ViewportConfig,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl Viewport {
    /// A viewport at the origin with the configured default scale.
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: config.default_scale.clamp(config.min_scale, config.max_scale),
            config,
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Zoom level as a whole percentage, for the zoom readout.
    pub fn scale_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    pub fn to_world(&self, screen: Point) -> Point {
        ((screen.to_vec2() - self.offset) / self.scale).to_point()
    }

    pub fn to_screen(&self, world: Point) -> Point {
        (world.to_vec2() * self.scale + self.offset).to_point()
    }

    /// Multiply the scale by `factor` while keeping the world point under
    /// `anchor` fixed on screen. Returns `true` if the transform changed.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) -> bool {
        let new_scale = self.clamp_scale(self.scale * factor);
        if new_scale == self.scale {
            return false;
        }
        let ratio = new_scale / self.scale;
        let anchor = anchor.to_vec2();
        self.offset = anchor - (anchor - self.offset) * ratio;
        self.scale = new_scale;
        log::trace!(
            "zoom x{factor} at ({}, {}) -> scale {:.3}",
            anchor.x,
            anchor.y,
            self.scale
        );
        true
    }

    /// Set the pan translation directly. Returns `true` if it changed.
    pub fn pan_to(&mut self, offset: Vec2) -> bool {
        if offset == self.offset {
            return false;
        }
        self.offset = offset;
        true
    }

    /// Back to the origin at the configured default scale.
    pub fn reset(&mut self) -> bool {
        let before = (self.offset, self.scale);
        self.offset = Vec2::ZERO;
        self.scale = self.clamp_scale(self.config.default_scale);
        before != (self.offset, self.scale)
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.scale;
        }
        scale.clamp(self.config.min_scale, self.config.max_scale)
    }
}
