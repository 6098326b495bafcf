//! Pointer snapshot and cursor styles.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Cursor requested by the active tool state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorStyle {
    #[default]
    Default,
    Grab,
    Grabbing,
}

/// Read-only snapshot of the pointer for one tick.
///
/// `move_count` increases monotonically every time the pointer reports a
/// move. Drag states compare it instead of comparing coordinates, so a
/// stationary pointer that keeps reporting the same position never re-fires
/// a move, while a pointer that moves away and back still does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    /// Position in screen coordinates.
    pub position: Point,
    /// Whether the primary button is held.
    pub is_down: bool,
    /// Monotonic move counter.
    pub move_count: u64,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            is_down: false,
            move_count: 0,
        }
    }
}

impl PointerState {
    /// Create a released pointer at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer move.
    pub fn moved_to(&mut self, position: Point) {
        self.position = position;
        self.move_count += 1;
    }

    /// Press the primary button.
    pub fn press(&mut self) {
        self.is_down = true;
    }

    /// Release the primary button.
    pub fn release(&mut self) {
        self.is_down = false;
    }
}
