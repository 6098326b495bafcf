//! Select tool: hit-test, focus and drag scene objects.

use super::{ToolArgs, SELECT, SELECT_DRAGGING};
use crate::input::CursorStyle;
use crate::machine::{State, Transition};
use crate::objects::ObjectId;
use crate::store::Intent;
use crate::viewport::Viewport;
use kurbo::Vec2;

/// Idle select tool: waits for a press, then picks the frontmost object
/// under the pointer.
pub struct SelectState;

impl State<Viewport, ToolArgs> for SelectState {
    fn handle_entered(&mut self, ctx: &mut Viewport, _args: Option<ToolArgs>) {
        ctx.cursor = CursorStyle::Default;
    }

    fn execute(&mut self, ctx: &mut Viewport) -> Option<Transition<ToolArgs>> {
        if !ctx.pointer.is_down {
            return None;
        }

        let world = ctx.world_pointer();
        let hit = ctx
            .stage()
            .node_at(world)
            .map(|node| (node.id, node.origin()));

        match hit {
            Some((id, origin)) => {
                ctx.emit(Intent::SelectObject(id));
                Some(Transition::with(
                    SELECT_DRAGGING,
                    ToolArgs::ObjectDrag {
                        target: id,
                        grab_offset: world - origin,
                    },
                ))
            }
            None => {
                // Clearing focus is only worth an intent when it isn't
                // already on the scene.
                if !ctx.stage().focus().is_scene() {
                    ctx.emit(Intent::FocusScene);
                }
                None
            }
        }
    }
}

/// Active object drag: emits move intents preserving the pointer-to-object
/// offset captured at drag start.
#[derive(Default)]
pub struct SelectDraggingState {
    target: Option<ObjectId>,
    grab_offset: Vec2,
    last_move: u64,
}

impl State<Viewport, ToolArgs> for SelectDraggingState {
    fn handle_entered(&mut self, ctx: &mut Viewport, args: Option<ToolArgs>) {
        match args {
            Some(ToolArgs::ObjectDrag { target, grab_offset }) => {
                self.target = Some(target);
                self.grab_offset = grab_offset;
                // Swallow the press itself; only subsequent movement emits.
                self.last_move = ctx.pointer.move_count;
            }
            other => unreachable!("select_dragging entered with {other:?}"),
        }
    }

    fn handle_exited(&mut self, _ctx: &mut Viewport) {
        *self = Self::default();
    }

    fn execute(&mut self, ctx: &mut Viewport) -> Option<Transition<ToolArgs>> {
        if !ctx.pointer.is_down {
            return Some(Transition::to(SELECT));
        }
        let Some(target) = self.target else {
            return Some(Transition::to(SELECT));
        };

        // Gate on the pointer's move counter rather than coordinate
        // equality, matching the input layer's own idea of "moved".
        if ctx.pointer.move_count != self.last_move {
            self.last_move = ctx.pointer.move_count;
            let world = ctx.world_pointer();
            ctx.emit(Intent::MoveObject {
                id: target,
                x: (world.x - self.grab_offset.x).floor(),
                y: (world.y - self.grab_offset.y).floor(),
            });
        }
        None
    }
}
