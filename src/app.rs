/*
 * Application Module
 *
 * This module defines the nannou application model for the backdrop. It
 * builds the window, wires event handlers, starts the fish mesh loading and
 * hands each nannou update to the frame driver.
 */

use std::sync::OnceLock;

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{info, warn};

use crate::asset::AssetLoader;
use crate::camera::Viewport;
use crate::debug::DebugInfo;
use crate::driver::{FrameDriver, InputState, SimulationState};
use crate::input::{key_pressed, mouse_moved, raw_window_event, resized};
use crate::params::BackdropConfig;
use crate::renderer::view;
use crate::scene::MeshScene;
use crate::ui;

// nannou's model function takes no arguments, so the config is parked here
static CONFIG: OnceLock<BackdropConfig> = OnceLock::new();

// Main model for the application
pub struct Model {
    pub driver: FrameDriver<MeshScene>,
    pub inputs: InputState,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub show_debug: bool,
}

impl Model {
    /// Stop the driver, release the scene and hide the overlay. Safe to repeat.
    pub fn teardown(&mut self) {
        self.driver.cancel();
        self.show_debug = false;
    }
}

/// Run the backdrop until the window closes or Escape is pressed.
pub fn run(config: BackdropConfig) {
    if CONFIG.set(config).is_err() {
        warn!("backdrop already configured; keeping the first configuration");
    }
    nannou::app(model).update(update).exit(exit).run();
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let config = CONFIG.get().cloned().unwrap_or_default();

    let window_id = app
        .new_window()
        .title("Fish Backdrop")
        .size(1280, 800)
        .view(view)
        .mouse_moved(mouse_moved)
        .resized(resized)
        .key_pressed(key_pressed)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to build backdrop window");

    let window = app.window(window_id).expect("backdrop window missing after build");
    let rect = window.rect();
    let viewport = Viewport::new(rect.w(), rect.h());
    let egui = Egui::from_window(&window);

    info!(
        width = viewport.width,
        height = viewport.height,
        fish = config.flock.num_fish,
        stars = config.starfield.num_stars,
        seed = ?config.rng_seed,
        "starting backdrop"
    );

    let loader = AssetLoader::spawn(config.asset_path.clone());
    let scene = MeshScene::new(viewport, config.flock.fish_scale);
    let simulation = SimulationState::new(config, viewport);

    let mut driver = FrameDriver::new(simulation, scene, loader);
    driver.start();

    Model {
        driver,
        inputs: InputState::new(viewport),
        egui,
        debug_info: DebugInfo::default(),
        show_debug: false,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.egui.set_elapsed_time(update.since_start);

    let inputs = model.inputs.sample();
    model.driver.tick(inputs);

    let simulation = model.driver.simulation();
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.debug_info.ticks = model.driver.ticks();
    model.debug_info.fish_count = simulation.flock.len();
    model.debug_info.star_count = simulation.stars.len();
    model.debug_info.pointer = inputs.viewport.screen_to_sim(inputs.pointer);
    model.debug_info.driver_state = model.driver.state();
    model.debug_info.mesh_pending = model.driver.mesh_pending();

    ui::update_overlay(&mut model.egui, &model.debug_info, model.show_debug);
}

// Closing the window tears down the same way Escape does
pub fn exit(_app: &App, mut model: Model) {
    model.teardown();
}
