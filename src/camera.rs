//! Viewport that follows the player and never shows past the map edge.

use crate::entities::{Camera, Rect};

/// Centre the viewport on `target`, clamped to
/// `[0, map - screen]` on each axis (or 0 when the map is smaller).
pub fn follow(target: &Rect, map_size: (f32, f32), screen_size: (f32, f32)) -> Camera {
    let (map_width, map_height) = map_size;
    let (screen_width, screen_height) = screen_size;

    let x = target.center_x() - screen_width / 2.0;
    let y = target.center_y() - screen_height / 2.0;

    Camera {
        x: x.min(map_width - screen_width).max(0.0),
        y: y.min(map_height - screen_height).max(0.0),
    }
}

impl Camera {
    /// Translate a level-space rectangle into screen space.
    pub fn to_screen(&self, rect: &Rect) -> Rect {
        rect.offset(-self.x, -self.y)
    }
}
