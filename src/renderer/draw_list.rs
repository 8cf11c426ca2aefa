//! Headless canvas that batches everything into a triangle list
//!
//! The resulting vertices are in screen pixels and can be uploaded to a GPU
//! vertex buffer as-is (`as_bytes`).

use glam::{Affine2, Vec2};

use super::canvas::Canvas;
use super::shapes;
use super::vertex::Vertex;

/// Segments used for circles
const CIRCLE_SEGMENTS: u32 = 16;

/// Triangle-list recorder with a current transform
#[derive(Debug, Clone)]
pub struct DrawList {
    vertices: Vec<Vertex>,
    transform: Affine2,
    shapes: usize,
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            transform: Affine2::IDENTITY,
            shapes: 0,
        }
    }

    /// Drop recorded geometry, keep the allocation
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.shapes = 0;
        self.transform = Affine2::IDENTITY;
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Number of shapes drawn since the last clear
    pub fn shape_count(&self) -> usize {
        self.shapes
    }

    pub fn transform(&self) -> Affine2 {
        self.transform
    }
}

impl Canvas for DrawList {
    fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform * Affine2::from_translation(offset);
    }

    fn scale(&mut self, factor: f32) {
        self.transform = self.transform * Affine2::from_scale(Vec2::splat(factor));
    }

    fn reset_transform(&mut self) {
        self.transform = Affine2::IDENTITY;
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: [f32; 4]) {
        self.vertices
            .extend_from_slice(&shapes::quad(&self.transform, min, size, color));
        self.shapes += 1;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.vertices.extend(shapes::circle(
            &self.transform,
            center,
            radius,
            color,
            CIRCLE_SEGMENTS,
        ));
        self.shapes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_then_scale() {
        let mut list = DrawList::new();
        list.translate(Vec2::new(100.0, 50.0));
        list.scale(2.0);
        list.fill_rect(Vec2::new(10.0, 10.0), Vec2::new(5.0, 5.0), [1.0; 4]);

        // Scale applies first, then the translation
        assert_eq!(list.vertices()[0].pos(), Vec2::new(120.0, 70.0));
        assert_eq!(list.vertices()[5].pos(), Vec2::new(130.0, 80.0));

        list.reset_transform();
        list.fill_rect(Vec2::ZERO, Vec2::ONE, [1.0; 4]);
        assert_eq!(list.vertices()[6].pos(), Vec2::ZERO);
        assert_eq!(list.shape_count(), 2);
    }

    #[test]
    fn test_as_bytes_len() {
        let mut list = DrawList::new();
        list.fill_circle(Vec2::ZERO, 4.0, [1.0; 4]);
        assert_eq!(list.as_bytes().len(), list.vertices().len() * Vertex::STRIDE);
        list.clear();
        assert!(list.as_bytes().is_empty());
    }
}
