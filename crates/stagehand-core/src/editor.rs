//! Top-level editor wiring.
//!
//! [`Editor`] owns the store, the stage, the viewport and the tool
//! controller, and connects them: a store subscription reconciles the stage
//! after every mutation, and intents queued by the tool states during a tick
//! are applied to the store once the transition loop has settled.

use crate::camera::Camera;
use crate::input::{CursorStyle, PointerState};
use crate::machine::StateId;
use crate::objects::{FieldValue, ObjectId, ObjectKind};
use crate::stage::Stage;
use crate::store::{SceneProperty, Store, StoreError};
use crate::sync;
use crate::tools::{self, ToolKind, ToolMachine};
use crate::viewport::Viewport;
use kurbo::Size;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// The assembled editor.
pub struct Editor {
    store: Store,
    stage: Rc<RefCell<Stage>>,
    viewport: Viewport,
    machine: ToolMachine,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        let stage = Rc::new(RefCell::new(Stage::new()));
        let mut store = Store::new();

        // The subscription fires once immediately, so the stage reflects the
        // (empty) store before the first tick.
        let sync_stage = Rc::clone(&stage);
        store.subscribe(Box::new(move |store| {
            sync::reconcile(
                &mut sync_stage.borrow_mut(),
                store.scene_objects(),
                store.scene_properties(),
                store.editor_focus(),
            );
        }));

        let machine = tools::tool_machine(store.active_tool());
        Self {
            viewport: Viewport::new(Rc::clone(&stage)),
            store,
            stage,
            machine,
        }
    }

    /// Advance the editor by one render tick with the latest pointer state.
    ///
    /// Intents queued by the tool states are applied to the store only after
    /// the controller settles, so store mutations (and the reconcile they
    /// trigger) never run inside the transition loop.
    pub fn tick(&mut self, pointer: PointerState) {
        self.viewport.pointer = pointer;
        self.machine.step(&mut self.viewport);
        for intent in self.viewport.take_intents() {
            self.store.apply(intent);
        }
    }

    /// Switch the active tool, re-entering the controller at the new tool's
    /// base state. A drag in progress is cut short through the normal exit
    /// hook, so its captured data is discarded and the cursor is reset.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.store.set_tool(tool);
        self.machine
            .transition(tool.base_state(), None, &mut self.viewport);
    }

    /// Scroll the camera so the scene backdrop is centered in a viewport of
    /// the given size.
    pub fn center_scene(&mut self, viewport: Size) {
        let center = self.stage.borrow().backdrop.bounds().center();
        self.viewport.camera.center_on(center, viewport);
    }

    // Panel entrypoints; each mutation reconciles the stage before returning.

    pub fn add_object(&mut self, kind: ObjectKind) -> ObjectId {
        self.store.add_object(kind)
    }

    pub fn remove_object(&mut self, id: ObjectId) -> Result<(), StoreError> {
        self.store.remove_object(id)
    }

    pub fn set_object_property(
        &mut self,
        id: ObjectId,
        field: &str,
        value: FieldValue,
    ) -> Result<(), StoreError> {
        self.store.set_object_property(id, field, value)
    }

    pub fn set_scene_property(
        &mut self,
        property: SceneProperty,
        value: f64,
    ) -> Result<(), StoreError> {
        self.store.set_scene_property(property, value)
    }

    pub fn focus_scene(&mut self) {
        self.store.focus_scene();
    }

    pub fn focus_object(&mut self, id: ObjectId) -> Result<(), StoreError> {
        self.store.focus_object(id)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn stage(&self) -> Ref<'_, Stage> {
        self.stage.borrow()
    }

    pub fn cursor(&self) -> CursorStyle {
        self.viewport.cursor
    }

    pub fn camera(&self) -> &Camera {
        &self.viewport.camera
    }

    /// Name of the controller's current state, for panels that display it.
    pub fn current_state(&self) -> Option<StateId> {
        self.machine.current()
    }
}
