//! Level-to-screen fitting
//!
//! A `Viewport` is computed once per render pass and handed explicitly to
//! any later pass (player overlay, click mapping) that must line up with it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Units;

/// Target drawing rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Uniform scale plus screen origin of the level's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub origin: Vec2,
    pub scale: f32,
    /// Unscaled level size in pixels
    pub level_size: Vec2,
}

impl Viewport {
    /// Fit a level of `level_size` pixels into `target`, preserving aspect ratio.
    ///
    /// Slack on either axis is split evenly on both sides of that axis.
    pub fn fit(target: Rect, level_size: Vec2) -> Self {
        let scale = (target.width / level_size.x).min(target.height / level_size.y);
        let scaled = level_size * scale;

        let mut origin = Vec2::new(target.x, target.y);
        if target.height > scaled.y {
            origin.y += (target.height - scaled.y) / 2.0;
        }
        if target.width > scaled.x {
            origin.x += (target.width - scaled.x) / 2.0;
        }

        Self {
            origin,
            scale,
            level_size,
        }
    }

    /// Level drawn at natural size with its corner at the screen origin
    pub fn identity(level_size: Vec2) -> Self {
        Self {
            origin: Vec2::ZERO,
            scale: 1.0,
            level_size,
        }
    }

    /// Level size on screen
    pub fn scaled_size(&self) -> Vec2 {
        self.level_size * self.scale
    }

    /// Screen pixel -> unscaled level pixel
    pub fn screen_to_level(&self, screen: Vec2) -> Vec2 {
        (screen - self.origin) / self.scale
    }

    /// Unscaled level pixel -> screen pixel
    pub fn level_to_screen(&self, level: Vec2) -> Vec2 {
        self.origin + level * self.scale
    }

    /// Screen pixel -> world meters
    pub fn screen_to_world(&self, screen: Vec2, units: &Units) -> Vec2 {
        units.pixels_to_meters_vec(self.screen_to_level(screen))
    }

    /// Whether a screen pixel lands on the level
    pub fn contains(&self, screen: Vec2) -> bool {
        let p = self.screen_to_level(screen);
        p.x >= 0.0 && p.y >= 0.0 && p.x < self.level_size.x && p.y < self.level_size.y
    }
}
