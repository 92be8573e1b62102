//! Scene simulation module
//!
//! Geometry, ray casting and input integration live here. This module must
//! stay free of rendering and platform dependencies:
//! - Pure geometry kernel
//! - Explicit scene state passed by reference
//! - Every frame recasts the whole fan

pub mod geometry;
pub mod ray;
pub mod state;
pub mod tick;

pub use geometry::{
    Circle, Point2D, RootPolicy, add, intersect_ray_circle, intersect_ray_circle_with, length,
    normalize, scale, sub,
};
pub use ray::{FanConfig, FanStats, Ray, RayOutcome, RaySegment, cast_fan, fan_direction};
pub use state::{LightSource, SceneState};
pub use tick::{Flow, InputEvent, SceneEvent, apply_input, integrate_input};
