/*
 * Fish Backdrop - Module Definitions
 *
 * This file defines the module structure for the backdrop. The simulation
 * side (fish, physics, starfield, driver) only depends on glam and rand;
 * the nannou side (app, renderer, input, ui) wires it to a window.
 */

// Re-export key components for easier access
pub use asset::{AssetError, AssetLoader, MeshAsset};
pub use camera::{Bounds, Projection, Viewport};
pub use debug::DebugInfo;
pub use driver::{DriverState, FrameDriver, FrameInputs, InputState, SimulationState};
pub use fish::{Fish, FishColor, FishId, FishTransform};
pub use params::{BackdropConfig, ConfigError, FlockParams, StarfieldParams};
pub use scene::{MeshScene, SceneComposer};
pub use starfield::{Star, StarSurface};

// Define modules
pub mod app;
pub mod asset;
pub mod camera;
pub mod debug;
pub mod driver;
pub mod fish;
pub mod input;
pub mod params;
pub mod physics;
pub mod renderer;
pub mod scene;
pub mod starfield;
pub mod ui;

// Constants
pub const FISH_COUNT: usize = 32;
pub const STAR_COUNT: usize = 80;
pub const DEPTH_BOUND: f32 = 100.0;
