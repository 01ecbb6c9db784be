// Clamping rules applied to every geometry change. Nothing here rejects a
// request: whatever comes in, a valid window comes out.
use log::trace;

use super::{Position, Screen, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryPolicy {
    pub min_width: i32,
    pub min_height: i32,
    /// How much of a window has to stay on screen when dragged off an edge.
    pub min_visible_margin: i32,
}

impl Default for GeometryPolicy {
    fn default() -> Self {
        Self {
            min_width: 300,
            min_height: 200,
            min_visible_margin: 50,
        }
    }
}

// lower bound wins when the range is inverted (screen smaller than the margin)
fn clamp(value: i32, low: i32, high: i32) -> i32 {
    value.min(high).max(low)
}

impl GeometryPolicy {
    pub fn clamp_size(&self, size: Size) -> Size {
        Size {
            width: size.width.max(self.min_width),
            height: size.height.max(self.min_height),
        }
    }

    /// Horizontally a window may hang off either side as long as
    /// `min_visible_margin` pixels remain. Vertically the top edge is a hard
    /// limit at 0 and only the bottom may drift off screen.
    pub fn clamp_position(&self, position: Position, size: Size, screen: &Screen) -> Position {
        let margin = self.min_visible_margin;
        let clamped = Position {
            x: clamp(
                position.x,
                margin.saturating_sub(size.width),
                screen.width.saturating_sub(margin),
            ),
            y: clamp(position.y, 0, screen.height.saturating_sub(margin)),
        };
        if clamped != position {
            trace!("clamped position {:?} to {:?}", position, clamped);
        }
        clamped
    }

    /// Size first, then position against the clamped size.
    pub fn clamp_geometry(&self, position: Position, size: Size, screen: &Screen) -> (Position, Size) {
        let size = self.clamp_size(size);
        (self.clamp_position(position, size, screen), size)
    }
}
