/*
 * Input Module
 *
 * This module handles window events for the backdrop. Handlers only record
 * the latest pointer position and window size; the frame driver samples them
 * at the start of its next tick.
 *
 * Keys:
 * - D toggles the debug overlay
 * - Escape tears the backdrop down and quits
 */

use nannou::prelude::*;
use tracing::info;

use crate::app::Model;
use crate::camera::Viewport;

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    // nannou reports centered, y-up coordinates; the driver wants screen space
    let viewport = model.inputs.viewport();
    let screen = viewport.sim_to_screen(::glam::Vec2::new(pos.x, pos.y));
    model.inputs.set_pointer(screen);
}

// Window resized event handler
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.inputs.set_viewport(Viewport::new(size.x, size.y));
}

pub fn key_pressed(app: &App, model: &mut Model, key: Key) {
    match key {
        Key::D => {
            model.show_debug = !model.show_debug;
        }
        Key::Escape => {
            info!("teardown requested");
            model.teardown();
            app.quit();
        }
        _ => {}
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
