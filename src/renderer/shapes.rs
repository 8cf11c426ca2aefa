//! Shape generation for 2D primitives

use glam::{Affine2, Vec2};
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Two triangles covering an axis-aligned rectangle, mapped through `transform`
pub fn quad(transform: &Affine2, min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let p = |x: f32, y: f32| Vertex::at(transform.transform_point2(Vec2::new(x, y)), color);
    let max = min + size;
    [
        p(min.x, min.y),
        p(max.x, min.y),
        p(min.x, max.y),
        p(min.x, max.y),
        p(max.x, min.y),
        p(max.x, max.y),
    ]
}

/// Generate vertices for a filled circle, mapped through `transform`
pub fn circle(
    transform: &Affine2,
    center: Vec2,
    radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let c = transform.transform_point2(center);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        let e1 = center + radius * Vec2::new(theta1.cos(), theta1.sin());
        let e2 = center + radius * Vec2::new(theta2.cos(), theta2.sin());
        vertices.push(Vertex::at(c, color));
        vertices.push(Vertex::at(transform.transform_point2(e1), color));
        vertices.push(Vertex::at(transform.transform_point2(e2), color));
    }

    vertices
}
