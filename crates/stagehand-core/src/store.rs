//! The canonical editor state and its mutation entrypoints.
//!
//! The store is the single owner of the scene-object list; everything else
//! (panels, tool states, the render tree) either reads it or sends intents
//! back into it. Observers are notified synchronously after every mutation,
//! which is how the stage reconciler runs: event-driven, once per mutation.

use crate::objects::{self, FieldError, FieldValue, ObjectId, ObjectKind, SceneObject};
use crate::tools::ToolKind;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the editor panels are currently inspecting.
///
/// An `Object` focus is a weak reference: the object may have been deleted
/// since, so it is re-validated against the live list at every use site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorFocus {
    #[default]
    Scene,
    Object(ObjectId),
}

impl EditorFocus {
    pub fn is_scene(&self) -> bool {
        matches!(self, EditorFocus::Scene)
    }
}

/// Scene-wide properties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneProperties {
    pub width: f64,
    pub height: f64,
}

impl Default for SceneProperties {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 400.0,
        }
    }
}

/// Editable scene property keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneProperty {
    Width,
    Height,
}

/// One-way message from interaction logic back to the canonical state.
/// Intents are the only channel by which pointer input affects the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    SelectObject(ObjectId),
    MoveObject { id: ObjectId, x: f64, y: f64 },
    FocusScene,
}

/// Recoverable store mutation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("no scene object with id {0}")]
    UnknownObject(ObjectId),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("scene {0:?} must be a positive finite number, got {1}")]
    InvalidSceneProperty(SceneProperty, f64),
}

type Observer = Box<dyn FnMut(&Store)>;

/// The canonical editor state.
pub struct Store {
    scene_objects: Vec<SceneObject>,
    scene_properties: SceneProperties,
    editor_focus: EditorFocus,
    active_tool: ToolKind,
    observers: Vec<Observer>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self {
            scene_objects: Vec::new(),
            scene_properties: SceneProperties::default(),
            editor_focus: EditorFocus::Scene,
            active_tool: ToolKind::default(),
            observers: Vec::new(),
        }
    }

    pub fn scene_objects(&self) -> &[SceneObject] {
        &self.scene_objects
    }

    pub fn scene_properties(&self) -> SceneProperties {
        self.scene_properties
    }

    pub fn editor_focus(&self) -> EditorFocus {
        self.editor_focus
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.scene_objects.iter().find(|o| o.id() == id)
    }

    /// Register an observer called after every mutation. The observer is
    /// invoked once immediately so it starts in sync with the current state.
    pub fn subscribe(&mut self, mut observer: Observer) {
        observer(self);
        self.observers.push(observer);
    }

    fn notify(&mut self) {
        // Observers only get `&Store`, so nothing can re-enter a mutation
        // (and thus re-trigger notification) from inside this loop.
        let mut observers = std::mem::take(&mut self.observers);
        for observer in &mut observers {
            observer(self);
        }
        self.observers = observers;
    }

    /// Create a scene object of the given kind, focus it, and return its id.
    pub fn add_object(&mut self, kind: ObjectKind) -> ObjectId {
        let object = objects::handler(kind).create(&self.scene_objects);
        let id = object.id();
        debug!("added scene object {} ({id})", object.name());
        self.scene_objects.push(object);
        self.editor_focus = EditorFocus::Object(id);
        self.notify();
        id
    }

    /// Delete a scene object.
    ///
    /// Focus is left untouched: a stale `Object` focus is valid state and
    /// resolves to "no highlight" on the next reconcile.
    pub fn remove_object(&mut self, id: ObjectId) -> Result<(), StoreError> {
        let index = self
            .scene_objects
            .iter()
            .position(|o| o.id() == id)
            .ok_or(StoreError::UnknownObject(id))?;
        let removed = self.scene_objects.remove(index);
        debug!("removed scene object {} ({id})", removed.name());
        self.notify();
        Ok(())
    }

    /// Write one editable field of a scene object via its variant handler.
    pub fn set_object_property(
        &mut self,
        id: ObjectId,
        field: &str,
        value: FieldValue,
    ) -> Result<(), StoreError> {
        let object = self
            .scene_objects
            .iter_mut()
            .find(|o| o.id() == id)
            .ok_or(StoreError::UnknownObject(id))?;
        objects::handler(object.kind()).set_field(object, field, value)?;
        self.notify();
        Ok(())
    }

    pub fn set_scene_property(
        &mut self,
        property: SceneProperty,
        value: f64,
    ) -> Result<(), StoreError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(StoreError::InvalidSceneProperty(property, value));
        }
        match property {
            SceneProperty::Width => self.scene_properties.width = value,
            SceneProperty::Height => self.scene_properties.height = value,
        }
        self.notify();
        Ok(())
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.active_tool != tool {
            self.active_tool = tool;
            self.notify();
        }
    }

    pub fn focus_scene(&mut self) {
        self.editor_focus = EditorFocus::Scene;
        self.notify();
    }

    /// Focus an object from a panel; the id must be live.
    pub fn focus_object(&mut self, id: ObjectId) -> Result<(), StoreError> {
        if self.object(id).is_none() {
            return Err(StoreError::UnknownObject(id));
        }
        self.editor_focus = EditorFocus::Object(id);
        self.notify();
        Ok(())
    }

    /// Apply an intent emitted by the tool states.
    ///
    /// Intents referencing objects deleted since the intent was captured are
    /// dropped silently: an in-flight drag racing a deletion is an expected,
    /// recoverable condition.
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::SelectObject(id) => {
                if self.object(id).is_some() {
                    self.editor_focus = EditorFocus::Object(id);
                    self.notify();
                } else {
                    debug!("dropping select intent for deleted object {id}");
                }
            }
            Intent::MoveObject { id, x, y } => {
                match self.scene_objects.iter_mut().find(|o| o.id() == id) {
                    Some(object) => {
                        object.set_position(x, y);
                        self.notify();
                    }
                    None => debug!("dropping move intent for deleted object {id}"),
                }
            }
            Intent::FocusScene => self.focus_scene(),
        }
    }
}
