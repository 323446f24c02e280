/*
 * UI Module
 *
 * A small read-only egui window with frame statistics, toggled with `D`.
 * The backdrop has no runtime controls; everything tunable lives in the
 * configuration file.
 */

use nannou::frame::Frame;
use nannou_egui::{egui, Egui};
use tracing::warn;

use crate::debug::DebugInfo;

// Build this frame's overlay. Hidden overlays still run an empty egui frame.
pub fn update_overlay(egui: &mut Egui, debug_info: &DebugInfo, visible: bool) {
    let ctx = egui.begin_frame();
    if !visible {
        return;
    }

    egui::Window::new("Backdrop")
        .default_pos([10.0, 10.0])
        .resizable(false)
        .show(&ctx, |ui| {
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
            ui.label(format!("Ticks: {}", debug_info.ticks));
            ui.separator();
            ui.label(format!("Fish: {}", debug_info.fish_count));
            if debug_info.mesh_pending {
                ui.label("Fish mesh loading...");
            }
            ui.label(format!("Stars: {}", debug_info.star_count));
            ui.label(format!(
                "Pointer: ({:.0}, {:.0})",
                debug_info.pointer.x, debug_info.pointer.y
            ));
            ui.label(format!("Driver: {:?}", debug_info.driver_state));
        });
}

pub fn draw_overlay(egui: &Egui, frame: &Frame) {
    if let Err(err) = egui.draw_to_frame(frame) {
        warn!(error = ?err, "failed to draw debug overlay");
    }
}
