/*
 * Camera Module
 *
 * This module describes the viewport the backdrop fills and the orthographic
 * projection that maps simulation space (centered at the origin, y up, one
 * unit per pixel) onto it. It provides the coordinate transformations between
 * screen space (top-left origin, y down) and simulation space.
 */

use glam::{Vec2, Vec3};

// Size of the drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    // Convert a point from screen space to simulation space
    pub fn screen_to_sim(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x - self.half_width(), -(point.y - self.half_height()))
    }

    // Convert a point from simulation space to screen space
    pub fn sim_to_screen(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x + self.half_width(), self.half_height() - point.y)
    }

    /// Box the flock must stay inside for this viewport.
    pub fn bounds(&self, depth: f32) -> Bounds {
        Bounds::new(self.half_width(), self.half_height(), depth)
    }
}

/// Axis-aligned box centered at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    half_extents: Vec3,
}

impl Bounds {
    pub fn new(half_width: f32, half_height: f32, half_depth: f32) -> Self {
        Self {
            half_extents: Vec3::new(half_width, half_height, half_depth),
        }
    }

    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.abs().cmple(self.half_extents).all()
    }
}

/// Orthographic projection bounds matching the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub const NEAR: f32 = 1.0;
    pub const FAR: f32 = 1000.0;

    pub fn for_viewport(viewport: Viewport) -> Self {
        Self {
            left: -viewport.half_width(),
            right: viewport.half_width(),
            bottom: -viewport.half_height(),
            top: viewport.half_height(),
            near: Self::NEAR,
            far: Self::FAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_center_is_sim_origin() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(viewport.screen_to_sim(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn screen_y_is_flipped() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(viewport.screen_to_sim(Vec2::new(0.0, 0.0)), Vec2::new(-400.0, 300.0));
        assert_eq!(viewport.screen_to_sim(Vec2::new(800.0, 600.0)), Vec2::new(400.0, -300.0));
    }

    #[test]
    fn sim_to_screen_inverts_screen_to_sim() {
        let viewport = Viewport::new(1024.0, 768.0);
        let point = Vec2::new(17.0, 533.0);
        assert_eq!(viewport.sim_to_screen(viewport.screen_to_sim(point)), point);
    }

    #[test]
    fn projection_tracks_viewport() {
        let projection = Projection::for_viewport(Viewport::new(1280.0, 720.0));
        assert_eq!((projection.left, projection.right), (-640.0, 640.0));
        assert_eq!((projection.bottom, projection.top), (-360.0, 360.0));
    }
}
