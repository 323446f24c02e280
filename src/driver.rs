/*
 * Frame Driver Module
 *
 * One tick per displayed frame, always in the same order:
 * sample inputs, pick up the fish mesh if it just arrived, twinkle the
 * stars, step the flock, then push the new transforms into the scene.
 * The host's view callback renders the stars and then the scene.
 *
 * The host owns the refresh schedule and keeps calling `tick`; the driver
 * decides whether a tick does anything. `cancel` is the only way out.
 */

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::asset::{AssetLoader, MeshAsset};
use crate::camera::{Projection, Viewport};
use crate::fish::Fish;
use crate::params::BackdropConfig;
use crate::physics;
use crate::scene::SceneComposer;
use crate::starfield::{self, Star, StarSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    Cancelled,
}

/// Inputs as they stood when a tick began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    // Screen space, top-left origin
    pub pointer: Vec2,
    pub viewport: Viewport,
}

/// Latest pointer and viewport, written by event handlers between ticks.
#[derive(Debug, Clone)]
pub struct InputState {
    pointer: Vec2,
    viewport: Viewport,
}

impl InputState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            // Screen center until the first pointer event
            pointer: Vec2::new(viewport.half_width(), viewport.half_height()),
            viewport,
        }
    }

    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn sample(&self) -> FrameInputs {
        FrameInputs {
            pointer: self.pointer,
            viewport: self.viewport,
        }
    }
}

/// Everything the simulation mutates from frame to frame.
pub struct SimulationState {
    pub config: BackdropConfig,
    pub flock: Vec<Fish>,
    pub stars: Vec<Star>,
    rng: SmallRng,
}

impl SimulationState {
    pub fn new(config: BackdropConfig, viewport: Viewport) -> Self {
        let mut rng = match config.rng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let stars = starfield::initialize(
            config.starfield.num_stars,
            viewport.width,
            viewport.height,
            &config.starfield,
            &mut rng,
        );

        Self {
            config,
            flock: Vec::new(),
            stars,
            rng,
        }
    }

    fn spawn_flock(&mut self, viewport: Viewport) {
        self.flock = physics::spawn_flock(&self.config.flock, viewport, &mut self.rng);
    }

    fn advance(&mut self, inputs: FrameInputs) {
        starfield::advance(
            &mut self.stars,
            self.config.starfield.twinkle_step,
            self.config.starfield.twinkle_amplitude,
        );
        physics::step(
            &mut self.flock,
            inputs.pointer,
            inputs.viewport,
            &self.config.flock,
            &mut self.rng,
        );
    }
}

pub struct FrameDriver<C: SceneComposer> {
    state: DriverState,
    simulation: SimulationState,
    composer: C,
    loader: Option<AssetLoader>,
    viewport: Option<Viewport>,
    ticks: u64,
}

impl<C: SceneComposer> FrameDriver<C> {
    pub fn new(simulation: SimulationState, composer: C, loader: AssetLoader) -> Self {
        Self {
            state: DriverState::Idle,
            simulation,
            composer,
            loader: Some(loader),
            viewport: None,
            ticks: 0,
        }
    }

    pub fn start(&mut self) {
        if self.state == DriverState::Idle {
            info!(
                stars = self.simulation.stars.len(),
                "frame driver started"
            );
            self.state = DriverState::Running;
        }
    }

    /// Stop ticking and drop every scene clone. Repeated calls do nothing.
    pub fn cancel(&mut self) {
        if self.state == DriverState::Cancelled {
            return;
        }
        self.state = DriverState::Cancelled;
        self.loader = None;
        self.composer.release();
        info!(ticks = self.ticks, "frame driver cancelled");
    }

    /// Run one frame. Returns false when the driver is not running.
    pub fn tick(&mut self, inputs: FrameInputs) -> bool {
        if self.state != DriverState::Running {
            return false;
        }

        if self.viewport != Some(inputs.viewport) {
            debug!(
                width = inputs.viewport.width,
                height = inputs.viewport.height,
                "viewport changed"
            );
            self.composer.set_projection(Projection::for_viewport(inputs.viewport));
            self.viewport = Some(inputs.viewport);
        }

        self.poll_asset(inputs.viewport);
        self.simulation.advance(inputs);

        for transform in physics::transforms(&self.simulation.flock) {
            self.composer.set_transform(transform);
        }

        self.ticks += 1;
        true
    }

    /// Clear the surface and paint the stars. Nothing is drawn unless running.
    pub fn render_stars<S: StarSurface + ?Sized>(&self, surface: Option<&mut S>) {
        if self.state != DriverState::Running {
            return;
        }
        starfield::render(surface, &self.simulation.stars, self.simulation.config.starfield.star_radius);
    }

    fn poll_asset(&mut self, viewport: Viewport) {
        let Some(loader) = self.loader.as_mut() else {
            return;
        };
        let Some(result) = loader.poll() else {
            return;
        };
        self.loader = None;

        match result {
            Ok(mesh) => self.populate(&mesh, viewport),
            // The flock stays empty; the stars carry on
            Err(err) => warn!(error = %err, "fish mesh failed to load"),
        }
    }

    fn populate(&mut self, mesh: &MeshAsset, viewport: Viewport) {
        self.simulation.spawn_flock(viewport);
        for fish in &self.simulation.flock {
            self.composer.instantiate(fish.id(), fish.color(), mesh);
        }
        info!(
            fish = self.simulation.flock.len(),
            vertices = mesh.vertices.len(),
            triangles = mesh.triangle_count(),
            "flock populated"
        );
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// True while the fish mesh is still on its way.
    pub fn mesh_pending(&self) -> bool {
        self.loader.as_ref().map_or(false, AssetLoader::is_pending)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn simulation(&self) -> &SimulationState {
        &self.simulation
    }

    pub fn composer(&self) -> &C {
        &self.composer
    }
}
