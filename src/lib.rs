//! Ray Fan - interactive ray/circle intersection demo
//!
//! Core modules:
//! - `sim`: Geometry kernel, ray fan casting and scene state (no rendering)
//! - `renderer`: Rendering surface abstraction and the wgpu implementation
//! - `frame`: One frame of the scene loop (input, cast, draw, present)
//! - `settings`: Tunables and their defaults

pub mod frame;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use frame::step_frame;
pub use sim::Flow;
pub use settings::Settings;

use glam::Vec2;

/// Scene configuration constants
pub mod consts {
    use glam::Vec2;

    /// Window dimensions (logical pixels)
    pub const WINDOW_WIDTH: u32 = 800;
    pub const WINDOW_HEIGHT: u32 = 600;
    pub const WINDOW_TITLE: &str = "Interactive Raytracer";

    /// Obstacle: fixed for the whole session
    pub const OBSTACLE_CENTER: Vec2 = Vec2::new(400.0, 300.0);
    pub const OBSTACLE_RADIUS: f32 = 50.0;

    /// Light starts on top of the obstacle center
    pub const LIGHT_START: Vec2 = Vec2::new(400.0, 300.0);
    /// Pointer must land closer than this to grab the light
    pub const PICK_RADIUS: f32 = 20.0;
    pub const LIGHT_MARKER_RADIUS: f32 = 20.0;

    /// One ray per degree
    pub const RAY_COUNT: u32 = 360;
    /// Length of unobstructed rays; reaches past the window edge
    pub const MAX_RAY_LENGTH: f32 = 1000.0;
    /// Hits at or below this distance are rejected (self-intersection, roots behind origin)
    pub const HIT_EPSILON: f32 = 0.001;

    /// Polyline resolution for outlined circles
    pub const CIRCLE_SEGMENTS: u32 = 32;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_polar_to_cartesian_axes() {
        let p = polar_to_cartesian(2.0, 0.0);
        assert!((p - Vec2::new(2.0, 0.0)).length() < 1e-6);

        let p = polar_to_cartesian(3.0, PI / 2.0);
        assert!((p - Vec2::new(0.0, 3.0)).length() < 1e-5);
    }
}
