//! Pointer-driven tool modes atop the state controller.
//!
//! Two independent state pairs share one machine: hand / hand-dragging for
//! camera panning, select / select-dragging for picking and moving objects.
//! Switching tools re-enters the machine at the new tool's base state.

mod hand;
mod select;

pub use hand::{HandDraggingState, HandState};
pub use select::{SelectDraggingState, SelectState};

use crate::machine::{State, StateMachine};
use crate::objects::ObjectId;
use crate::viewport::Viewport;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// State names registered with the controller.
pub const HAND: &str = "hand";
pub const HAND_DRAGGING: &str = "hand_dragging";
pub const SELECT: &str = "select";
pub const SELECT_DRAGGING: &str = "select_dragging";

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Hand,
    Select,
}

impl ToolKind {
    /// Base controller state this tool starts in.
    pub fn base_state(self) -> &'static str {
        match self {
            ToolKind::Hand => HAND,
            ToolKind::Select => SELECT,
        }
    }
}

/// Transition payloads carried into the dragging states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolArgs {
    /// Captured at pointer-down in the hand tool.
    PanStart {
        camera_origin: Vec2,
        drag_origin: Point,
    },
    /// Captured at pointer-down on a hit object in the select tool.
    ObjectDrag {
        target: ObjectId,
        grab_offset: Vec2,
    },
}

/// The controller type used by the editor.
pub type ToolMachine = StateMachine<Viewport, ToolArgs>;

/// Build a controller with all four tool states registered, entering at the
/// given tool's base state.
pub fn tool_machine(initial: ToolKind) -> ToolMachine {
    StateMachine::new(
        initial.base_state(),
        vec![
            (HAND, Box::new(HandState) as Box<dyn State<Viewport, ToolArgs>>),
            (HAND_DRAGGING, Box::new(HandDraggingState::default())),
            (SELECT, Box::new(SelectState)),
            (SELECT_DRAGGING, Box::new(SelectDraggingState::default())),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::CursorStyle;
    use crate::objects::{handler, ObjectKind, SceneObject};
    use crate::stage::Stage;
    use crate::store::{EditorFocus, Intent, SceneProperties};
    use crate::sync::reconcile;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Rig {
        machine: ToolMachine,
        viewport: Viewport,
        stage: Rc<RefCell<Stage>>,
        objects: Vec<SceneObject>,
    }

    impl Rig {
        fn new(tool: ToolKind) -> Self {
            let stage = Rc::new(RefCell::new(Stage::new()));
            Self {
                machine: tool_machine(tool),
                viewport: Viewport::new(Rc::clone(&stage)),
                stage,
                objects: Vec::new(),
            }
        }

        fn add_rectangle_at(&mut self, x: f64, y: f64) -> ObjectId {
            let mut object = handler(ObjectKind::Rectangle).create(&self.objects);
            object.set_position(x, y);
            let id = object.id();
            self.objects.push(object);
            self.sync(EditorFocus::Scene);
            id
        }

        fn sync(&mut self, focus: EditorFocus) {
            reconcile(
                &mut self.stage.borrow_mut(),
                &self.objects,
                SceneProperties::default(),
                focus,
            );
        }

        fn step(&mut self) -> Vec<Intent> {
            self.machine.step(&mut self.viewport);
            self.viewport.take_intents()
        }
    }

    #[test]
    fn test_hand_pan_is_pure_in_captured_origins() {
        let mut rig = Rig::new(ToolKind::Hand);
        rig.viewport.pointer.moved_to(Point::new(100.0, 100.0));
        rig.step();
        assert_eq!(rig.viewport.cursor, CursorStyle::Grab);

        rig.viewport.pointer.press();
        rig.step();
        assert_eq!(rig.machine.current(), Some(HAND_DRAGGING));
        assert_eq!(rig.viewport.cursor, CursorStyle::Grabbing);

        // Drag left/up moves the scroll right/down by the same amount.
        rig.viewport.pointer.moved_to(Point::new(90.0, 80.0));
        rig.step();
        assert!((rig.viewport.camera.scroll.x - 10.0).abs() < f64::EPSILON);
        assert!((rig.viewport.camera.scroll.y - 20.0).abs() < f64::EPSILON);

        // Ticking again without movement recomputes the same scroll; no
        // accumulation from repeated deltas.
        rig.step();
        assert!((rig.viewport.camera.scroll.x - 10.0).abs() < f64::EPSILON);

        rig.viewport.pointer.release();
        rig.step();
        assert_eq!(rig.machine.current(), Some(HAND));
        assert_eq!(rig.viewport.cursor, CursorStyle::Grab);
    }

    #[test]
    fn test_select_hit_emits_select_and_starts_drag() {
        let mut rig = Rig::new(ToolKind::Select);
        let id = rig.add_rectangle_at(10.0, 10.0);

        rig.viewport.pointer.moved_to(Point::new(50.0, 50.0));
        rig.viewport.pointer.press();
        let intents = rig.step();

        assert_eq!(intents, vec![Intent::SelectObject(id)]);
        assert_eq!(rig.machine.current(), Some(SELECT_DRAGGING));
    }

    #[test]
    fn test_drag_preserves_grab_offset() {
        let mut rig = Rig::new(ToolKind::Select);
        let id = rig.add_rectangle_at(10.0, 10.0);

        rig.viewport.pointer.moved_to(Point::new(50.0, 50.0));
        rig.viewport.pointer.press();
        rig.step();

        rig.viewport.pointer.moved_to(Point::new(60.0, 70.0));
        let intents = rig.step();
        assert_eq!(intents, vec![Intent::MoveObject { id, x: 20.0, y: 30.0 }]);
    }

    #[test]
    fn test_drag_moves_gated_on_move_counter() {
        let mut rig = Rig::new(ToolKind::Select);
        rig.add_rectangle_at(0.0, 0.0);

        rig.viewport.pointer.moved_to(Point::new(50.0, 50.0));
        rig.viewport.pointer.press();
        rig.step();

        // Stationary pointer: repeated ticks emit nothing.
        assert!(rig.step().is_empty());
        assert!(rig.step().is_empty());

        // A reported move, even back to the same coordinates, fires once.
        rig.viewport.pointer.moved_to(Point::new(50.0, 50.0));
        assert_eq!(rig.step().len(), 1);
        assert!(rig.step().is_empty());
    }

    #[test]
    fn test_miss_clears_focus_once() {
        let mut rig = Rig::new(ToolKind::Select);
        let id = rig.add_rectangle_at(0.0, 0.0);
        rig.sync(EditorFocus::Object(id));

        // Press far away from the object.
        rig.viewport.pointer.moved_to(Point::new(500.0, 500.0));
        rig.viewport.pointer.press();
        let intents = rig.step();
        assert_eq!(intents, vec![Intent::FocusScene]);
        assert_eq!(rig.machine.current(), Some(SELECT));

        // Focus now on the scene: further misses are not re-emitted.
        rig.sync(EditorFocus::Scene);
        assert!(rig.step().is_empty());
    }

    #[test]
    fn test_hit_test_uses_world_coordinates() {
        let mut rig = Rig::new(ToolKind::Select);
        let id = rig.add_rectangle_at(200.0, 200.0);
        rig.viewport.camera.set_scroll(Vec2::new(180.0, 180.0));

        // Screen (40, 40) is world (220, 220), inside the object.
        rig.viewport.pointer.moved_to(Point::new(40.0, 40.0));
        rig.viewport.pointer.press();
        let intents = rig.step();
        assert_eq!(intents, vec![Intent::SelectObject(id)]);
    }

    #[test]
    fn test_frontmost_object_wins_selection() {
        let mut rig = Rig::new(ToolKind::Select);
        let _back = rig.add_rectangle_at(0.0, 0.0);
        let front = rig.add_rectangle_at(50.0, 50.0);

        // Both cover (75, 75); the most recently added wins.
        rig.viewport.pointer.moved_to(Point::new(75.0, 75.0));
        rig.viewport.pointer.press();
        let intents = rig.step();
        assert_eq!(intents, vec![Intent::SelectObject(front)]);
    }
}
