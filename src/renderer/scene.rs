//! Maps scene state and a cast fan onto draw calls

use super::surface::{BlendMode, RenderSurface, Rgb, Rgba, rgb8, rgba8};
use crate::consts::{CIRCLE_SEGMENTS, LIGHT_MARKER_RADIUS};
use crate::sim::{RayOutcome, RaySegment, SceneState};

/// Colors for scene elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePalette {
    pub background: Rgb,
    pub obstacle: Rgba,
    /// Rays stopped by the obstacle
    pub hit_ray: Rgba,
    /// Unobstructed rays; fainter than hits
    pub miss_ray: Rgba,
    pub light: Rgba,
}

impl Default for ScenePalette {
    fn default() -> Self {
        Self {
            background: rgb8(30, 30, 30),
            obstacle: rgba8(0, 120, 200, 255),
            hit_ray: rgba8(255, 255, 0, 100),
            miss_ray: rgba8(255, 255, 0, 50),
            light: rgba8(255, 255, 0, 255),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    pub palette: ScenePalette,
    pub circle_segments: u32,
    pub light_marker_radius: f32,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            palette: ScenePalette::default(),
            circle_segments: CIRCLE_SEGMENTS,
            light_marker_radius: LIGHT_MARKER_RADIUS,
        }
    }
}

/// Draw one frame's worth of scene, without presenting it.
///
/// Order is fixed: obstacle, then rays, then the light marker on top.
pub fn draw_scene<S>(surface: &mut S, state: &SceneState, rays: &[RaySegment], style: &SceneStyle)
where
    S: RenderSurface + ?Sized,
{
    let palette = &style.palette;

    surface.set_blend_mode(BlendMode::Alpha);
    surface.clear(palette.background);

    surface.draw_circle_outline(
        state.circle.center,
        state.circle.radius,
        palette.obstacle,
        style.circle_segments,
    );

    for ray in rays {
        let color = match ray.outcome {
            RayOutcome::Hit(_) => palette.hit_ray,
            RayOutcome::Miss => palette.miss_ray,
        };
        surface.draw_line(ray.start, ray.end, color);
    }

    surface.draw_circle_outline(
        state.light.pos,
        style.light_marker_radius,
        palette.light,
        style.circle_segments,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, FrameRecorder};
    use crate::sim::{FanConfig, cast_fan};
    use glam::Vec2;

    #[test]
    fn test_draw_order_obstacle_rays_light() {
        let mut scene = SceneState::default();
        scene.light.pos = Vec2::ZERO;
        let rays = cast_fan(scene.light.pos, &scene.circle, &FanConfig::default());
        let style = SceneStyle::default();

        let mut rec = FrameRecorder::new();
        draw_scene(&mut rec, &scene, &rays, &style);

        assert_eq!(rec.commands[0], DrawCommand::SetBlendMode(BlendMode::Alpha));
        assert_eq!(rec.commands[1], DrawCommand::Clear(style.palette.background));

        let lines: Vec<_> = rec.lines().collect();
        assert_eq!(lines.len(), 32 + 360 + 32);

        let (obstacle, rest) = lines.split_at(32);
        let (ray_lines, light) = rest.split_at(360);
        assert!(obstacle.iter().all(|l| l.2 == style.palette.obstacle));
        assert!(light.iter().all(|l| l.2 == style.palette.light));
        assert!(ray_lines.iter().all(|l| l.0 == Vec2::ZERO));
    }

    #[test]
    fn test_hits_drawn_brighter_than_misses() {
        let mut scene = SceneState::default();
        scene.light.pos = Vec2::ZERO;
        let rays = cast_fan(scene.light.pos, &scene.circle, &FanConfig::default());
        let style = SceneStyle::default();

        let mut rec = FrameRecorder::new();
        draw_scene(&mut rec, &scene, &rays, &style);

        let ray_lines: Vec<_> = rec.lines().skip(32).take(360).collect();
        for (ray, line) in rays.iter().zip(&ray_lines) {
            let expected = if ray.outcome.is_hit() {
                style.palette.hit_ray
            } else {
                style.palette.miss_ray
            };
            assert_eq!(line.2, expected);
            assert_eq!(line.1, ray.end);
        }
        assert!(style.palette.hit_ray[3] > style.palette.miss_ray[3]);
    }

    #[test]
    fn test_no_present_inside_draw_scene() {
        let scene = SceneState::default();
        let mut rec = FrameRecorder::new();
        draw_scene(&mut rec, &scene, &[], &SceneStyle::default());
        assert!(!rec.commands.contains(&DrawCommand::Present));
    }
}
