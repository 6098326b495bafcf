//! Live render tree mirroring the canonical scene-object list.

use crate::objects::ObjectId;
use crate::store::EditorFocus;
use kurbo::{Point, Rect};
use std::collections::HashMap;

/// Fill color of the scene backdrop.
pub const BACKDROP_FILL: u32 = 0xcccccc;

/// Visual payload of a render node, one case per scene-object variant.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeVisual {
    Rectangle {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill_color: u32,
        fill_alpha: f64,
    },
}

/// Canvas-side projection of one scene object.
///
/// Tagged with the object's id as a back-reference; deleting the object
/// deletes the node, never the reverse. Apart from render depth, a node
/// holds no state its object doesn't already own.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    pub id: ObjectId,
    /// Render depth; nodes draw back-to-front by ascending depth.
    pub depth: i32,
    pub visual: NodeVisual,
}

impl RenderNode {
    pub fn new(id: ObjectId, visual: NodeVisual) -> Self {
        Self { id, depth: 0, visual }
    }

    /// Display bounds in world coordinates.
    pub fn bounds(&self) -> Rect {
        match self.visual {
            NodeVisual::Rectangle { x, y, width, height, .. } => {
                Rect::new(x, y, x + width, y + height)
            }
        }
    }

    /// Top-left corner of the display bounds.
    pub fn origin(&self) -> Point {
        let bounds = self.bounds();
        Point::new(bounds.x0, bounds.y0)
    }

    /// Whether a world-coordinate point falls inside the display bounds.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }
}

/// Highlight frame drawn around the focused object's node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FocusOverlay {
    pub visible: bool,
    /// Matches the focused node's bounds while visible.
    pub frame: Rect,
}

/// The scene-sized background rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    pub width: f64,
    pub height: f64,
    pub fill_color: u32,
}

impl Backdrop {
    /// Backdrop bounds; the scene's top-left corner is the world origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// The live set of render nodes plus the backdrop and focus overlay.
///
/// Nodes are indexed by object id for O(1) lookup; the display list keeps
/// insertion order (back to front) for depth tie-breaking.
#[derive(Debug, Clone)]
pub struct Stage {
    nodes: HashMap<ObjectId, RenderNode>,
    display_list: Vec<ObjectId>,
    pub backdrop: Backdrop,
    pub overlay: FocusOverlay,
    focus: EditorFocus,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage {
    /// Create an empty stage. Backdrop size is set by the first reconcile.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            display_list: Vec::new(),
            backdrop: Backdrop {
                width: 0.0,
                height: 0.0,
                fill_color: BACKDROP_FILL,
            },
            overlay: FocusOverlay::default(),
            focus: EditorFocus::Scene,
        }
    }

    /// Add a node at the front of the display list.
    pub fn insert(&mut self, node: RenderNode) {
        debug_assert!(
            !self.nodes.contains_key(&node.id),
            "duplicate render node for {}",
            node.id
        );
        self.display_list.push(node.id);
        self.nodes.insert(node.id, node);
    }

    /// Destroy a node.
    pub fn remove(&mut self, id: ObjectId) -> Option<RenderNode> {
        self.display_list.retain(|&node_id| node_id != id);
        self.nodes.remove(&id)
    }

    pub fn node(&self, id: ObjectId) -> Option<&RenderNode> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: ObjectId) -> Option<&mut RenderNode> {
        self.nodes.get_mut(&id)
    }

    pub fn contains_node(&self, id: ObjectId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Ids of all live nodes, in display-list order.
    pub fn ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.display_list.iter().copied()
    }

    /// Nodes in display-list order (back to front).
    pub fn nodes_ordered(&self) -> impl Iterator<Item = &RenderNode> {
        self.display_list.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Front-to-back hit test on display bounds.
    ///
    /// Higher depth wins; among equal depths the most recently added node
    /// wins, matching the back-to-front draw order.
    pub fn node_at(&self, point: Point) -> Option<&RenderNode> {
        self.display_list
            .iter()
            .enumerate()
            .filter_map(|(index, id)| self.nodes.get(id).map(|node| (index, node)))
            .filter(|(_, node)| node.contains(point))
            .max_by_key(|&(index, node)| (node.depth, index))
            .map(|(_, node)| node)
    }

    /// Set a node's render depth. Returns false if the node doesn't exist.
    pub fn set_depth(&mut self, id: ObjectId, depth: i32) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.depth = depth;
                true
            }
            None => false,
        }
    }

    /// The focus the stage was last reconciled against.
    pub fn focus(&self) -> EditorFocus {
        self.focus
    }

    /// Recompute the focus overlay against the current node set.
    ///
    /// Hidden when focus is on the scene or on an object whose node no
    /// longer exists (stale reference); otherwise framed to the focused
    /// node's bounds.
    pub fn refresh_overlay(&mut self, focus: EditorFocus) {
        self.focus = focus;
        match focus {
            EditorFocus::Scene => self.overlay.visible = false,
            EditorFocus::Object(id) => match self.nodes.get(&id) {
                Some(node) => {
                    self.overlay.frame = node.bounds();
                    self.overlay.visible = true;
                }
                None => self.overlay.visible = false,
            },
        }
    }
}
