//! Rendering surface contract used by the scene loop

use glam::Vec2;

use super::RenderResult;
use super::shapes::circle_points;

/// Linear 0..1 color without alpha
pub type Rgb = [f32; 3];
/// Linear 0..1 color with alpha
pub type Rgba = [f32; 4];

/// Color from 8-bit channels
pub const fn rgb8(r: u8, g: u8, b: u8) -> Rgb {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

/// Color from 8-bit channels with alpha
pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Rgba {
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ]
}

/// How draws combine with what is already in the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Source overwrites destination, alpha ignored
    #[default]
    Replace,
    /// `src * a + dst * (1 - a)`
    Alpha,
}

/// Something the scene can draw a frame onto.
///
/// Draw calls between two `present` calls make up one frame, composited in
/// call order.
pub trait RenderSurface {
    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Start a frame filled with `color`, dropping anything drawn since the last present
    fn clear(&mut self, color: Rgb);

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgba);

    /// Flush the frame to the display
    fn present(&mut self) -> RenderResult<()>;

    /// Outline a circle as a closed polyline of `segments` lines
    fn draw_circle_outline(&mut self, center: Vec2, radius: f32, color: Rgba, segments: u32) {
        let points = circle_points(center, radius, segments);
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1], color);
        }
    }
}
