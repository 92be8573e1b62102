//! In-memory rendering surface: records draw calls instead of drawing

use glam::Vec2;

use super::RenderResult;
use super::surface::{BlendMode, RenderSurface, Rgb, Rgba};

/// One call made on a [`FrameRecorder`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    SetBlendMode(BlendMode),
    Clear(Rgb),
    Line { from: Vec2, to: Vec2, color: Rgba },
    Present,
}

/// Keeps every call since the last [`FrameRecorder::take`]
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pub commands: Vec<DrawCommand>,
    pub frames_presented: usize,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand back the recorded calls and start over
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Recorded lines, in call order
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, Rgba)> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Line { from, to, color } => Some((from, to, color)),
            _ => None,
        })
    }
}

impl RenderSurface for FrameRecorder {
    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.commands.push(DrawCommand::SetBlendMode(mode));
    }

    fn clear(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn present(&mut self) -> RenderResult<()> {
        self.commands.push(DrawCommand::Present);
        self.frames_presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_outline_is_closed_polyline() {
        let mut rec = FrameRecorder::new();
        rec.draw_circle_outline(Vec2::new(10.0, 10.0), 5.0, [1.0; 4], 8);

        let lines: Vec<_> = rec.lines().collect();
        assert_eq!(lines.len(), 8);
        for pair in lines.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        assert_eq!(lines[7].1, lines[0].0);
    }

    #[test]
    fn test_take_resets() {
        let mut rec = FrameRecorder::new();
        rec.clear([0.0; 3]);
        rec.present().expect("recorder never fails");
        assert_eq!(rec.take().len(), 2);
        assert!(rec.commands.is_empty());
        assert_eq!(rec.frames_presented, 1);
    }
}
