/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct shown in the overlay.
 *
 * Includes metrics for:
 * - FPS (frames per second) and frame time
 * - Ticks run by the frame driver
 * - Fish and star counts
 * - Pointer position in simulation space
 */

use std::time::Duration;

use glam::Vec2;

use crate::driver::DriverState;

pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks: u64,
    pub fish_count: usize,
    pub star_count: usize,
    pub pointer: Vec2,
    pub driver_state: DriverState,
    pub mesh_pending: bool,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            ticks: 0,
            fish_count: 0,
            star_count: 0,
            pointer: Vec2::ZERO,
            driver_state: DriverState::Idle,
            mesh_pending: true,
        }
    }
}
