//! The single authoritative owner of the cube.
//!
//! `Simulation` bundles the cube with everything a tick needs (display
//! layout, physics mode, parameters, RNG). It is ticked exactly once per
//! fixed step; render surfaces only read it.

use bevy::log::{debug, info};
use bevy::prelude::Resource;

use crate::cube::Cube;
use crate::integrator::{step, StepParams, StepReport};
use crate::region::{physics_bounds, Bounds, DisplayRegion, PhysicsMode};
use crate::rng::CubeRng;

/// Cube state plus the inputs of the integrator.
#[derive(Resource)]
pub struct Simulation {
    cube: Option<Cube>,
    regions: Vec<DisplayRegion>,
    mode: PhysicsMode,
    params: StepParams,
    rng: Box<dyn CubeRng + Send + Sync>,
    ticks: u64,
    corner_hits: u64,
}

impl Simulation {
    /// Create a simulation and spawn the cube if any region exists.
    pub fn new(
        regions: Vec<DisplayRegion>,
        mode: PhysicsMode,
        params: StepParams,
        rng: Box<dyn CubeRng + Send + Sync>,
    ) -> Self {
        let mut simulation = Self {
            cube: None,
            regions: Vec::new(),
            mode,
            params,
            rng,
            ticks: 0,
            corner_hits: 0,
        };
        simulation.set_regions(regions);
        simulation
    }

    /// Replace the display layout and respawn the cube.
    pub fn set_regions(&mut self, regions: Vec<DisplayRegion>) {
        self.regions = regions;
        self.cube = Cube::spawn(&self.regions, self.rng.as_mut());
        if let Some(cube) = &self.cube {
            info!(
                "Cube spawned at ({:.0}, {:.0}) across {} display(s), bounds {:?}",
                cube.position.x,
                cube.position.y,
                self.regions.len(),
                self.physics_bounds()
            );
        }
    }

    /// Advance one tick. `None` when there is no cube yet.
    pub fn tick(&mut self) -> Option<StepReport> {
        let bounds = self.physics_bounds()?;
        let cube = self.cube.as_mut()?;

        let report = step(cube, &bounds, &self.params, self.rng.as_mut());
        self.ticks += 1;

        if report.corner_hit {
            self.corner_hits += 1;
            debug!(
                "Corner hit #{} at tick {} ({:?}/{:?})",
                self.corner_hits, self.ticks, report.x_wall, report.y_wall
            );
        }
        if report.celebration_started {
            debug!("Celebration started at tick {}", self.ticks);
        }

        Some(report)
    }

    pub fn cube(&self) -> Option<&Cube> {
        self.cube.as_ref()
    }

    pub fn regions(&self) -> &[DisplayRegion] {
        &self.regions
    }

    pub fn mode(&self) -> PhysicsMode {
        self.mode
    }

    pub fn params(&self) -> &StepParams {
        &self.params
    }

    /// Change size or celebration toggle without respawning.
    pub fn set_params(&mut self, params: StepParams) {
        self.params = params;
    }

    pub fn physics_bounds(&self) -> Option<Bounds> {
        physics_bounds(&self.regions, self.mode)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn corner_hits(&self) -> u64 {
        self.corner_hits
    }
}
