//! Input integration: pointer events mutate the light, close ends the loop

use super::geometry::Point2D;
use super::state::SceneState;

/// Polled input, in scene coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Window close requested
    Close,
    PointerDown(Point2D),
    PointerUp,
    PointerMove(Point2D),
}

/// What an input event did to the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    DragStarted,
    DragEnded,
    LightMoved(Point2D),
}

/// Whether the frame loop keeps running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Apply one pointer event to the scene
pub fn apply_input(state: &mut SceneState, event: &InputEvent) -> Option<SceneEvent> {
    match *event {
        InputEvent::Close => None,
        InputEvent::PointerDown(p) => {
            if state.light.is_grabbable(p, state.pick_radius) && !state.light.dragging {
                state.light.dragging = true;
                Some(SceneEvent::DragStarted)
            } else {
                None
            }
        }
        InputEvent::PointerUp => {
            // Released anywhere ends the drag
            let was_dragging = std::mem::replace(&mut state.light.dragging, false);
            was_dragging.then_some(SceneEvent::DragEnded)
        }
        InputEvent::PointerMove(p) => {
            if state.light.dragging {
                state.light.pos = p;
                Some(SceneEvent::LightMoved(p))
            } else {
                None
            }
        }
    }
}

/// Drain a batch of events in order.
///
/// Stops at the first `Close`; later events in the batch are dropped.
pub fn integrate_input<I>(state: &mut SceneState, events: I) -> Flow
where
    I: IntoIterator<Item = InputEvent>,
{
    for event in events {
        if event == InputEvent::Close {
            return Flow::Exit;
        }
        match apply_input(state, &event) {
            Some(SceneEvent::DragStarted) => log::debug!("Light grabbed at {:?}", state.light.pos),
            Some(SceneEvent::DragEnded) => log::debug!("Light released at {:?}", state.light.pos),
            Some(SceneEvent::LightMoved(_)) | None => {}
        }
    }
    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_press_near_light_starts_drag() {
        let mut scene = SceneState::default();
        let ev = apply_input(&mut scene, &InputEvent::PointerDown(Vec2::new(410.0, 305.0)));
        assert_eq!(ev, Some(SceneEvent::DragStarted));
        assert!(scene.is_dragging());
    }

    #[test]
    fn test_drag_moves_light_exactly_then_release_clears() {
        let mut scene = SceneState::default();
        let flow = integrate_input(
            &mut scene,
            [
                InputEvent::PointerDown(Vec2::new(395.0, 290.0)),
                InputEvent::PointerMove(Vec2::new(123.0, 456.0)),
            ],
        );
        assert_eq!(flow, Flow::Continue);
        assert!(scene.is_dragging());
        assert_eq!(scene.light.pos, Vec2::new(123.0, 456.0));

        // Release far from the light still ends the drag
        integrate_input(&mut scene, [InputEvent::PointerUp]);
        assert!(!scene.is_dragging());

        integrate_input(&mut scene, [InputEvent::PointerMove(Vec2::new(10.0, 10.0))]);
        assert_eq!(scene.light.pos, Vec2::new(123.0, 456.0));
    }

    #[test]
    fn test_press_far_from_light_does_nothing() {
        let mut scene = SceneState::default();
        let start = scene.light.pos;
        integrate_input(
            &mut scene,
            [
                InputEvent::PointerDown(Vec2::new(430.0, 300.0)),
                InputEvent::PointerMove(Vec2::new(10.0, 20.0)),
            ],
        );
        assert!(!scene.is_dragging());
        assert_eq!(scene.light.pos, start);
    }

    #[test]
    fn test_release_without_drag_reports_nothing() {
        let mut scene = SceneState::default();
        assert_eq!(apply_input(&mut scene, &InputEvent::PointerUp), None);
        assert!(!scene.is_dragging());
    }

    #[test]
    fn test_close_stops_integration() {
        let mut scene = SceneState::default();
        let grab = scene.light.pos;
        let flow = integrate_input(
            &mut scene,
            [
                InputEvent::PointerDown(grab),
                InputEvent::Close,
                InputEvent::PointerMove(Vec2::new(1.0, 1.0)),
            ],
        );
        assert_eq!(flow, Flow::Exit);
        assert_eq!(scene.light.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_obstacle_never_moves() {
        let mut scene = SceneState::default();
        let circle = scene.circle;
        let grab = scene.light.pos;
        integrate_input(
            &mut scene,
            [
                InputEvent::PointerDown(grab),
                InputEvent::PointerMove(Vec2::new(0.0, 0.0)),
                InputEvent::PointerUp,
            ],
        );
        assert_eq!(scene.circle, circle);
    }
}
