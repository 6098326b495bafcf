//! Hand tool: pan the camera by dragging.

use super::{ToolArgs, HAND, HAND_DRAGGING};
use crate::input::CursorStyle;
use crate::machine::{State, Transition};
use crate::viewport::Viewport;
use kurbo::{Point, Vec2};

/// Idle hand tool: waits for a press to start panning.
pub struct HandState;

impl State<Viewport, ToolArgs> for HandState {
    fn handle_entered(&mut self, ctx: &mut Viewport, _args: Option<ToolArgs>) {
        ctx.cursor = CursorStyle::Grab;
    }

    fn execute(&mut self, ctx: &mut Viewport) -> Option<Transition<ToolArgs>> {
        if ctx.pointer.is_down {
            return Some(Transition::with(
                HAND_DRAGGING,
                ToolArgs::PanStart {
                    camera_origin: ctx.camera.scroll,
                    drag_origin: ctx.pointer.position,
                },
            ));
        }
        None
    }
}

/// Active pan: scroll follows the pointer relative to the captured origins.
#[derive(Default)]
pub struct HandDraggingState {
    camera_origin: Vec2,
    drag_origin: Point,
}

impl State<Viewport, ToolArgs> for HandDraggingState {
    fn handle_entered(&mut self, ctx: &mut Viewport, args: Option<ToolArgs>) {
        match args {
            Some(ToolArgs::PanStart { camera_origin, drag_origin }) => {
                self.camera_origin = camera_origin;
                self.drag_origin = drag_origin;
            }
            other => unreachable!("hand_dragging entered with {other:?}"),
        }
        ctx.cursor = CursorStyle::Grabbing;
    }

    fn handle_exited(&mut self, _ctx: &mut Viewport) {
        // Capture data lives only for the duration of the drag.
        *self = Self::default();
    }

    fn execute(&mut self, ctx: &mut Viewport) -> Option<Transition<ToolArgs>> {
        if !ctx.pointer.is_down {
            return Some(Transition::to(HAND));
        }

        // Scroll is a pure function of the captured origins and the live
        // pointer, so repeated ticks accumulate no error.
        let pointer = ctx.pointer.position;
        ctx.camera.set_scroll(Vec2::new(
            self.camera_origin.x + (self.drag_origin.x - pointer.x),
            self.camera_origin.y + (self.drag_origin.y - pointer.y),
        ));
        None
    }
}
