//! One pass of the scene loop

use crate::renderer::{RenderResult, RenderSurface, SceneStyle, draw_scene};
use crate::sim::{FanConfig, FanStats, Flow, InputEvent, SceneState, cast_fan, integrate_input};

/// Integrate `events`, recast the fan from the light, draw and present.
///
/// Returns [`Flow::Exit`] without drawing when a close event arrives.
pub fn step_frame<S, I>(
    state: &mut SceneState,
    events: I,
    fan: &FanConfig,
    style: &SceneStyle,
    surface: &mut S,
) -> RenderResult<Flow>
where
    S: RenderSurface + ?Sized,
    I: IntoIterator<Item = InputEvent>,
{
    if integrate_input(state, events) == Flow::Exit {
        return Ok(Flow::Exit);
    }

    let rays = cast_fan(state.light.pos, &state.circle, fan);
    if log::log_enabled!(log::Level::Trace) {
        let stats = FanStats::from_segments(&rays);
        log::trace!(
            "Light at {:?}: {} hits, {} misses",
            state.light.pos,
            stats.hits,
            stats.misses
        );
    }

    draw_scene(surface, state, &rays, style);
    surface.present()?;
    Ok(Flow::Continue)
}
