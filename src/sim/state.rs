//! Scene state: the fixed obstacle and the draggable light
//!
//! Nothing here survives a restart; the light always comes back at its
//! default position.

use super::geometry::{Circle, Point2D, length, sub};
use crate::consts::*;

/// The draggable light the ray fan is cast from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    pub pos: Point2D,
    /// Set while the pointer holds the light
    pub dragging: bool,
}

impl LightSource {
    pub fn new(pos: Point2D) -> Self {
        Self {
            pos,
            dragging: false,
        }
    }

    /// Whether a pointer at `p` is close enough to grab the light
    pub fn is_grabbable(&self, p: Point2D, pick_radius: f32) -> bool {
        length(sub(p, self.pos)) < pick_radius
    }
}

/// Everything the frame loop mutates or reads between frames
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    pub light: LightSource,
    /// Never moves after construction
    pub circle: Circle,
    pub pick_radius: f32,
}

impl SceneState {
    pub fn new(circle: Circle, light_pos: Point2D, pick_radius: f32) -> Self {
        Self {
            light: LightSource::new(light_pos),
            circle,
            pick_radius,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.light.dragging
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(
            Circle::new(OBSTACLE_CENTER, OBSTACLE_RADIUS),
            LIGHT_START,
            PICK_RADIUS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_default_scene() {
        let scene = SceneState::default();
        assert_eq!(scene.light.pos, Vec2::new(400.0, 300.0));
        assert!(!scene.is_dragging());
        assert_eq!(scene.circle.center, Vec2::new(400.0, 300.0));
        assert_eq!(scene.circle.radius, 50.0);
        assert_eq!(scene.pick_radius, 20.0);
    }

    #[test]
    fn test_grab_radius_is_strict() {
        let light = LightSource::new(Vec2::new(100.0, 100.0));
        assert!(light.is_grabbable(Vec2::new(110.0, 100.0), 20.0));
        assert!(light.is_grabbable(Vec2::new(119.9, 100.0), 20.0));
        assert!(!light.is_grabbable(Vec2::new(120.0, 100.0), 20.0));
        assert!(!light.is_grabbable(Vec2::new(100.0, 130.0), 20.0));
    }
}
