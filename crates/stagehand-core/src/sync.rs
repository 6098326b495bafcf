//! Declarative-to-imperative scene synchronization.
//!
//! [`reconcile`] diffs the canonical object list against the live render
//! tree: create-if-missing, update-if-present, destroy-if-orphaned, then
//! recompute the focus overlay. It runs event-driven, once per store
//! mutation, never on a fixed schedule.

use crate::objects::{self, ObjectId, SceneObject};
use crate::stage::Stage;
use crate::store::{EditorFocus, SceneProperties};
use log::trace;

/// Reconcile the render tree against the desired object list.
///
/// After this returns, the set of node ids equals the set of ids in
/// `desired` exactly, and the overlay reflects `focus` against that fresh
/// node set: focusing an object deleted in this same pass hides the overlay
/// immediately.
pub fn reconcile(
    stage: &mut Stage,
    desired: &[SceneObject],
    scene: SceneProperties,
    focus: EditorFocus,
) {
    stage.backdrop.width = scene.width;
    stage.backdrop.height = scene.height;

    // Create missing nodes, refresh existing ones in place. Existing nodes
    // are never replaced wholesale: their identity must survive for
    // references held elsewhere, e.g. an in-flight drag.
    for object in desired {
        let handler = objects::handler(object.kind());
        match stage.node_mut(object.id()) {
            Some(node) => handler.sync_node(object, node),
            None => {
                trace!("spawning node for {} ({})", object.name(), object.id());
                stage.insert(handler.spawn_node(object));
            }
        }
    }

    // Destroy nodes whose object is gone. Order is irrelevant; nodes have
    // no dependencies on each other.
    let orphans: Vec<ObjectId> = stage
        .ids()
        .filter(|id| !desired.iter().any(|o| o.id() == *id))
        .collect();
    for id in orphans {
        trace!("destroying orphaned node {id}");
        stage.remove(id);
    }

    stage.refresh_overlay(focus);
}
