//! Ray fan generation and per-ray resolution against the obstacle

use glam::Vec2;
use std::f32::consts::TAU;

use super::geometry::{Circle, Point2D, RootPolicy, add, intersect_ray_circle_with, normalize, scale};
use crate::consts::{HIT_EPSILON, MAX_RAY_LENGTH, RAY_COUNT};
use crate::polar_to_cartesian;

/// Outcome of casting one ray at the obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RayOutcome {
    /// Blocked at this distance along the ray
    Hit(f32),
    /// Unobstructed
    Miss,
}

impl RayOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, RayOutcome::Hit(_))
    }
}

/// A ray with unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point2D,
    pub direction: Point2D,
}

impl Ray {
    /// Normalizes `direction`; a zero direction is kept as-is and never hits
    pub fn new(origin: Point2D, direction: Point2D) -> Self {
        Self {
            origin,
            direction: normalize(direction),
        }
    }

    /// Point at distance `t` along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Point2D {
        add(self.origin, scale(self.direction, t))
    }

    pub fn cast(&self, circle: &Circle, config: &FanConfig) -> RayOutcome {
        match intersect_ray_circle_with(
            self.origin,
            self.direction,
            circle,
            config.epsilon,
            config.root_policy,
        ) {
            Some(t) => RayOutcome::Hit(t),
            None => RayOutcome::Miss,
        }
    }
}

/// How the fan is sampled and resolved
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanConfig {
    pub ray_count: u32,
    /// Length drawn for rays that miss
    pub max_length: f32,
    pub epsilon: f32,
    pub root_policy: RootPolicy,
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            ray_count: RAY_COUNT,
            max_length: MAX_RAY_LENGTH,
            epsilon: HIT_EPSILON,
            root_policy: RootPolicy::NearOnly,
        }
    }
}

/// A resolved ray, ready to be drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySegment {
    pub start: Point2D,
    pub end: Point2D,
    pub outcome: RayOutcome,
}

/// Direction of sample `i` out of `n`, evenly spaced over the full turn
#[inline]
pub fn fan_direction(i: u32, n: u32) -> Vec2 {
    let angle = TAU * i as f32 / n as f32;
    polar_to_cartesian(1.0, angle)
}

/// Cast the whole fan from `origin`, one segment per sampled direction.
///
/// Hits end on the circle; misses end `max_length` away.
pub fn cast_fan(origin: Point2D, circle: &Circle, config: &FanConfig) -> Vec<RaySegment> {
    (0..config.ray_count)
        .map(|i| {
            let ray = Ray::new(origin, fan_direction(i, config.ray_count));
            let outcome = ray.cast(circle, config);
            let end = match outcome {
                RayOutcome::Hit(t) => ray.at(t),
                RayOutcome::Miss => ray.at(config.max_length),
            };
            RaySegment {
                start: origin,
                end,
                outcome,
            }
        })
        .collect()
}

/// Hit/miss counts for one cast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanStats {
    pub hits: usize,
    pub misses: usize,
}

impl FanStats {
    pub fn from_segments(segments: &[RaySegment]) -> Self {
        let hits = segments.iter().filter(|s| s.outcome.is_hit()).count();
        Self {
            hits,
            misses: segments.len() - hits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle() -> Circle {
        Circle::new(Vec2::new(400.0, 300.0), 50.0)
    }

    #[test]
    fn test_fan_direction_is_unit_and_ordered() {
        let n = 360;
        for i in 0..n {
            let d = fan_direction(i, n);
            assert!((d.length() - 1.0).abs() < 1e-5);
        }
        assert!((fan_direction(0, n) - Vec2::X).length() < 1e-6);
        assert!((fan_direction(90, n) - Vec2::Y).length() < 1e-5);
        assert!((fan_direction(180, n) + Vec2::X).length() < 1e-5);
    }

    #[test]
    fn test_ray_new_normalizes() {
        let ray = Ray::new(Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        assert!((ray.at(5.0) - Vec2::new(3.0, 4.0)).length() < 1e-5);
    }

    #[test]
    fn test_cast_fan_produces_one_segment_per_ray() {
        let segments = cast_fan(Vec2::ZERO, &obstacle(), &FanConfig::default());
        assert_eq!(segments.len(), 360);
        assert!(segments.iter().all(|s| s.start == Vec2::ZERO));
    }

    #[test]
    fn test_misses_extend_to_max_length() {
        let config = FanConfig::default();
        let segments = cast_fan(Vec2::ZERO, &obstacle(), &config);
        for s in segments.iter().filter(|s| !s.outcome.is_hit()) {
            assert!(((s.end - s.start).length() - config.max_length).abs() < 0.01);
        }
    }

    #[test]
    fn test_hits_end_on_the_circle() {
        let circle = obstacle();
        let segments = cast_fan(Vec2::ZERO, &circle, &FanConfig::default());
        let hits: Vec<_> = segments.iter().filter(|s| s.outcome.is_hit()).collect();
        assert!(!hits.is_empty());
        for s in hits {
            let r = (s.end - circle.center).length();
            assert!((r - circle.radius).abs() < 0.05, "r = {r}");
        }
    }

    #[test]
    fn test_light_at_origin_has_narrow_hit_cone() {
        // Circle subtends asin(50/500) ~ 5.7 degrees either side of the center line
        let segments = cast_fan(Vec2::ZERO, &obstacle(), &FanConfig::default());
        let stats = FanStats::from_segments(&segments);
        assert!(stats.hits >= 10 && stats.hits <= 13, "hits = {}", stats.hits);
        assert_eq!(stats.hits + stats.misses, 360);

        // Ray 37 (~37 degrees) points almost straight at (400, 300)
        match segments[37].outcome {
            RayOutcome::Hit(t) => assert!((t - 450.0).abs() < 1.0, "t = {t}"),
            RayOutcome::Miss => panic!("ray toward the circle should hit"),
        }
        // Ray 217 points away from it
        assert_eq!(segments[217].outcome, RayOutcome::Miss);
    }

    #[test]
    fn test_light_at_center_near_only_all_miss() {
        let circle = obstacle();
        let segments = cast_fan(circle.center, &circle, &FanConfig::default());
        assert_eq!(FanStats::from_segments(&segments).hits, 0);
    }

    #[test]
    fn test_light_at_center_near_then_far_all_hit_at_radius() {
        let circle = obstacle();
        let config = FanConfig {
            root_policy: RootPolicy::NearThenFar,
            ..FanConfig::default()
        };
        let segments = cast_fan(circle.center, &circle, &config);
        assert_eq!(segments.len(), 360);
        for s in &segments {
            match s.outcome {
                RayOutcome::Hit(t) => assert!((t - 50.0).abs() < 1e-3, "t = {t}"),
                RayOutcome::Miss => panic!("every ray leaves the circle at its radius"),
            }
        }
    }

    #[test]
    fn test_zero_ray_count_is_empty() {
        let config = FanConfig {
            ray_count: 0,
            ..FanConfig::default()
        };
        assert!(cast_fan(Vec2::ZERO, &obstacle(), &config).is_empty());
    }
}
