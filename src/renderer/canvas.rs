//! Drawing seam between the level and whatever puts pixels on screen
//!
//! The level only ever translates, scales, resets and fills. Fonts and other
//! loaded resources come from a `Resources` provider keyed by name.

use std::ops::{Deref, DerefMut};

use glam::Vec2;

use super::viewport::Viewport;

/// 2D drawing target with a current affine transform
pub trait Canvas {
    /// Post-multiply a translation onto the current transform
    fn translate(&mut self, offset: Vec2);
    /// Post-multiply a uniform scale onto the current transform
    fn scale(&mut self, factor: f32);
    /// Back to the identity transform
    fn reset_transform(&mut self);
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: [f32; 4]);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]);
}

/// Text drawing and measurement
pub trait Font {
    /// Width of `text` in unscaled pixels
    fn text_width(&self, text: &str) -> f32;
    /// Line height in unscaled pixels
    fn line_height(&self) -> f32;
    /// Draw `text` with its top-left corner at `position`
    fn draw_text(&self, canvas: &mut dyn Canvas, position: Vec2, text: &str, color: [f32; 4]);
}

/// Loaded resources looked up by well-known key
pub trait Resources {
    fn font(&self, key: &str) -> Option<&dyn Font>;
}

/// Applies a viewport transform for as long as it lives.
///
/// Dropping the scope resets the canvas transform, including during unwinding.
pub struct TransformScope<'a> {
    canvas: &'a mut dyn Canvas,
}

impl<'a> TransformScope<'a> {
    pub fn apply(canvas: &'a mut dyn Canvas, viewport: &Viewport) -> Self {
        canvas.translate(viewport.origin);
        canvas.scale(viewport.scale);
        Self { canvas }
    }
}

impl<'a> Deref for TransformScope<'a> {
    type Target = dyn Canvas + 'a;

    fn deref(&self) -> &Self::Target {
        self.canvas
    }
}

impl DerefMut for TransformScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.canvas
    }
}

impl Drop for TransformScope<'_> {
    fn drop(&mut self) {
        self.canvas.reset_transform();
    }
}
