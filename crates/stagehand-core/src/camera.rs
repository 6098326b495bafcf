//! Camera module for the canvas pan transform.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform for the canvas.
///
/// Panning only: the scroll offset is the world coordinate sitting at the
/// viewport's top-left corner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Camera {
    /// Current scroll offset.
    pub scroll: Vec2,
}

impl Camera {
    /// Create a new camera at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scroll offset directly.
    pub fn set_scroll(&mut self, scroll: Vec2) {
        self.scroll = scroll;
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.scroll += delta;
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen: Point) -> Point {
        screen + self.scroll
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        world - self.scroll
    }

    /// Scroll so `target` (world coordinates) sits at the viewport center.
    pub fn center_on(&mut self, target: Point, viewport: Size) {
        self.scroll = Vec2::new(
            target.x - viewport.width / 2.0,
            target.y - viewport.height / 2.0,
        );
    }
}
