//! 2D vector helpers and the ray/circle intersection test
//!
//! Everything here is pure: no state, no logging, no rendering.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::HIT_EPSILON;

/// A position or direction in scene space (pixels, +y down)
pub type Point2D = Vec2;

#[inline]
pub fn add(a: Point2D, b: Point2D) -> Point2D {
    a + b
}

#[inline]
pub fn sub(a: Point2D, b: Point2D) -> Point2D {
    a - b
}

#[inline]
pub fn scale(a: Point2D, s: f32) -> Point2D {
    a * s
}

#[inline]
pub fn length(v: Point2D) -> f32 {
    v.length()
}

/// Unit vector in the direction of `v`.
///
/// A zero-length input is returned unchanged instead of dividing by zero,
/// so callers may see a zero vector come back.
#[inline]
pub fn normalize(v: Point2D) -> Point2D {
    let len = length(v);
    if len > 0.0 { v / len } else { v }
}

/// Circular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2D,
    pub radius: f32,
}

impl Circle {
    /// Negative radii are clamped to zero
    pub fn new(center: Point2D, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Strictly inside (boundary excluded)
    pub fn contains_point(&self, p: Point2D) -> bool {
        length(sub(p, self.center)) < self.radius
    }
}

/// Which root of the ray/circle quadratic is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RootPolicy {
    /// Only the near root `(-b - sqrt(disc)) / 2a`. An origin inside the
    /// circle yields a negative near root and therefore no hit.
    #[default]
    NearOnly,
    /// Near root, falling back to the far root when the near one is
    /// rejected. An origin inside the circle then reports its exit point.
    NearThenFar,
}

/// Distance along `direction` from `origin` to the circle's boundary.
///
/// Returns `None` when the discriminant is negative or the near root is not
/// strictly greater than [`HIT_EPSILON`].
pub fn intersect_ray_circle(origin: Point2D, direction: Point2D, circle: &Circle) -> Option<f32> {
    intersect_ray_circle_with(origin, direction, circle, HIT_EPSILON, RootPolicy::NearOnly)
}

/// [`intersect_ray_circle`] with an explicit epsilon and root policy.
///
/// `direction` is expected to be unit length, but `a = dot(d, d)` is computed
/// rather than assumed, so non-unit directions give `t` in units of
/// `|direction|`. A zero direction produces NaN roots, which never pass the
/// epsilon check.
pub fn intersect_ray_circle_with(
    origin: Point2D,
    direction: Point2D,
    circle: &Circle,
    epsilon: f32,
    policy: RootPolicy,
) -> Option<f32> {
    let oc = sub(origin, circle.center);
    let a = direction.dot(direction);
    let b = 2.0 * oc.dot(direction);
    let c = oc.dot(oc) - circle.radius * circle.radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let near = (-b - sqrt_disc) / (2.0 * a);
    if near > epsilon {
        return Some(near);
    }

    match policy {
        RootPolicy::NearOnly => None,
        RootPolicy::NearThenFar => {
            let far = (-b + sqrt_disc) / (2.0 * a);
            (far > epsilon).then_some(far)
        }
    }
}
