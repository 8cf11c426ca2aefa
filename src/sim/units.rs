//! Pixel <-> meter conversion
//!
//! One tile is exactly one meter: the scale factor is fixed to the tileset's
//! pixel tile size when the level is built and never changes afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Fixed pixels-per-meter scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Units {
    pixels_per_meter: f32,
}

impl Units {
    pub fn new(pixels_per_meter: f32) -> Self {
        Self { pixels_per_meter }
    }

    #[inline]
    pub fn pixels_per_meter(&self) -> f32 {
        self.pixels_per_meter
    }

    #[inline]
    pub fn pixels_to_meters(&self, pixels: f32) -> f32 {
        pixels / self.pixels_per_meter
    }

    #[inline]
    pub fn meters_to_pixels(&self, meters: f32) -> f32 {
        meters * self.pixels_per_meter
    }

    /// Convert a point in pixel space to meters
    #[inline]
    pub fn pixels_to_meters_vec(&self, pixels: Vec2) -> Vec2 {
        pixels / self.pixels_per_meter
    }

    /// Convert a point in meters to pixel space
    #[inline]
    pub fn meters_to_pixels_vec(&self, meters: Vec2) -> Vec2 {
        meters * self.pixels_per_meter
    }
}
