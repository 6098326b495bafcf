//! Shared context the tool states operate on.

use crate::camera::Camera;
use crate::input::{CursorStyle, PointerState};
use crate::stage::Stage;
use crate::store::Intent;
use kurbo::Point;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Render-side state threaded through the tool state machine each tick:
/// the pointer snapshot, the camera, the cursor request, read access to the
/// stage for hit-testing, and the outgoing intent queue.
///
/// Tool states never mutate the store or the stage; they pan the camera,
/// set the cursor, and queue intents for the editor to apply after the
/// transition loop settles.
pub struct Viewport {
    pub pointer: PointerState,
    pub cursor: CursorStyle,
    pub camera: Camera,
    stage: Rc<RefCell<Stage>>,
    intents: Vec<Intent>,
}

impl Viewport {
    pub fn new(stage: Rc<RefCell<Stage>>) -> Self {
        Self {
            pointer: PointerState::new(),
            cursor: CursorStyle::Default,
            camera: Camera::new(),
            stage,
            intents: Vec::new(),
        }
    }

    /// Read access to the stage for hit-testing.
    pub fn stage(&self) -> Ref<'_, Stage> {
        self.stage.borrow()
    }

    /// Queue an intent for the store.
    pub fn emit(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    /// Drain the queued intents.
    pub fn take_intents(&mut self) -> Vec<Intent> {
        std::mem::take(&mut self.intents)
    }

    /// Pointer position in world coordinates.
    pub fn world_pointer(&self) -> Point {
        self.camera.screen_to_world(self.pointer.position)
    }
}
