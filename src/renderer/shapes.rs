//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use super::surface::Rgba;
use super::vertex::Vertex;
use crate::polar_to_cartesian;

/// Points on a circle, closed: the first point is repeated at the end.
///
/// Returns `segments + 1` points, or nothing for zero segments.
pub fn circle_points(center: Vec2, radius: f32, segments: u32) -> Vec<Vec2> {
    if segments == 0 {
        return Vec::new();
    }

    (0..=segments)
        .map(|i| {
            // Wrap the last point back onto the first so the outline closes exactly
            let theta = (i % segments) as f32 / segments as f32 * TAU;
            center + polar_to_cartesian(radius, theta)
        })
        .collect()
}

/// Two line-list vertices for a segment, already in clip space
#[inline]
pub fn line(from: [f32; 2], to: [f32; 2], color: Rgba) -> [Vertex; 2] {
    [Vertex::new(from, color), Vertex::new(to, color)]
}
