//! Viewport follow and clamp

use glam::Vec2;

use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};
use crate::sim::{Body, Level};

/// Top-left corner of the visible window into the level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(VIEW_WIDTH, VIEW_HEIGHT)
    }
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    /// Center horizontally on `target`, keeping the view inside the level.
    /// Vertical scrolling is locked; `y` is only clamped.
    pub fn follow(&mut self, target: &Body, level: &Level) {
        self.x = target.pos.x - self.width / 2.0 + target.width() / 2.0;

        // A level smaller than the view pins the camera at the origin
        self.x = self.x.min(level.width - self.width).max(0.0);
        self.y = self.y.min(level.height - self.height).max(0.0);
    }

    /// Translation that maps world space to screen space
    pub fn offset(&self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level() -> Level {
        Level::flat(3000.0, 600.0, 500.0)
    }

    #[test]
    fn test_centers_on_target() {
        let mut camera = Camera::default();
        let body = Body::new(1000.0, 436.0, 32.0, 64.0);
        camera.follow(&body, &level());
        assert_eq!(camera.x, 1000.0 - 400.0 + 16.0);
        assert_eq!(camera.y, 0.0);
        assert_eq!(camera.offset(), Vec2::new(-616.0, 0.0));
    }

    #[test]
    fn test_clamped_at_level_edges() {
        let mut camera = Camera::default();
        camera.follow(&Body::new(10.0, 436.0, 32.0, 64.0), &level());
        assert_eq!(camera.x, 0.0);

        camera.follow(&Body::new(2990.0, 436.0, 32.0, 64.0), &level());
        assert_eq!(camera.x, 2200.0);
    }

    #[test]
    fn test_narrow_level_pins_to_origin() {
        let mut camera = Camera::default();
        let narrow = Level::flat(500.0, 600.0, 500.0);
        camera.follow(&Body::new(400.0, 436.0, 32.0, 64.0), &narrow);
        assert_eq!(camera.x, 0.0);
    }
}
