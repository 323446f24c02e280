/*
 * Renderer Module
 *
 * This module draws the backdrop with nannou: the starfield onto the frame
 * (converted from screen space into nannou's centered, y-up coordinates)
 * and every fish clone in the scene as an indexed triangle mesh.
 */

use nannou::prelude::*;
use tracing::warn;

use crate::app::Model;
use crate::camera::Viewport;
use crate::scene::{MeshScene, SceneComposer};
use crate::starfield::StarSurface;
use crate::ui;

// Deep water behind the stars
const BACKGROUND: (f32, f32, f32) = (0.01, 0.02, 0.06);

/// Star surface backed by a nannou `Draw`.
pub struct DrawSurface<'a> {
    draw: &'a Draw,
    viewport: Viewport,
}

impl<'a> DrawSurface<'a> {
    pub fn new(draw: &'a Draw, viewport: Viewport) -> Self {
        Self { draw, viewport }
    }
}

impl StarSurface for DrawSurface<'_> {
    fn clear(&mut self) {
        let (r, g, b) = BACKGROUND;
        self.draw.background().color(rgb(r, g, b));
    }

    fn fill_circle(&mut self, center: ::glam::Vec2, radius: f32, alpha: f32) {
        let centered = self.viewport.screen_to_sim(center);
        self.draw
            .ellipse()
            .x_y(centered.x, centered.y)
            .radius(radius)
            .color(rgba(1.0, 1.0, 1.0, alpha));
    }
}

// Draw each fish clone with its model matrix
pub fn draw_scene(draw: &Draw, scene: &MeshScene, window_rect: Rect) {
    // Stretch the projection's extent over the actual window
    let projection = scene.projection();
    let span_x = projection.right - projection.left;
    let span_y = projection.top - projection.bottom;
    if span_x <= 0.0 || span_y <= 0.0 {
        return;
    }
    let fit = ::glam::Mat4::from_scale(::glam::Vec3::new(
        window_rect.w() / span_x,
        window_rect.h() / span_y,
        1.0,
    ));

    for (_, instance) in scene.instances() {
        let model = fit * instance.model_matrix();
        let transform = Mat4::from_cols_array(&model.to_cols_array());
        let c = instance.color;

        draw.transform(transform)
            .mesh()
            .indexed(
                instance.vertices.iter().map(|v| vec3(v.x, v.y, v.z)),
                instance.indices.iter().copied(),
            )
            .color(rgb(c.r, c.g, c.b));
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();

    if model.driver.is_running() {
        let mut surface = DrawSurface::new(&draw, model.inputs.viewport());
        model.driver.render_stars(Some(&mut surface));
        draw_scene(&draw, model.driver.composer(), app.window_rect());
    } else {
        let (r, g, b) = BACKGROUND;
        draw.background().color(rgb(r, g, b));
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!(error = ?err, "failed to render backdrop frame");
    }

    if model.show_debug {
        ui::draw_overlay(&model.egui, &frame);
    }
}
