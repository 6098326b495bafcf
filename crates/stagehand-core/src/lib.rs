//! Stagehand Core Library
//!
//! Platform-agnostic interaction core for the Stagehand scene editor: the
//! canonical scene store, the pointer-driven tool state machine, and the
//! reconciler that mirrors scene objects onto the live render tree. Panel
//! widgets and actual drawing live elsewhere; they talk to this crate through
//! the [`Editor`] entrypoints and read back the [`Stage`].

pub mod camera;
pub mod editor;
pub mod input;
pub mod machine;
pub mod objects;
pub mod stage;
pub mod store;
pub mod sync;
pub mod tools;
pub mod viewport;

pub use camera::Camera;
pub use editor::Editor;
pub use input::{CursorStyle, PointerState};
pub use machine::{State, StateId, StateMachine, Transition};
pub use objects::{FieldKind, FieldSpec, FieldValue, ObjectId, ObjectKind, SceneObject};
pub use stage::{FocusOverlay, NodeVisual, RenderNode, Stage};
pub use store::{EditorFocus, Intent, SceneProperties, SceneProperty, Store, StoreError};
pub use sync::reconcile;
pub use tools::{ToolArgs, ToolKind};
pub use viewport::Viewport;
