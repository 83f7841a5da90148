//! Simulation core for the bouncing cube.
//!
//! This crate provides:
//! - `Cube` state and its spawn rules
//! - The per-tick integrator (movement, spin, wall bounces, celebration)
//! - 4×4 rotation matrix math
//! - Display-region geometry and physics-bounds selection
//! - An injectable, seedable RNG
//! - `CubeSimulationPlugin`, which ticks the `Simulation` resource on a
//!   fixed 16 ms step

use bevy::prelude::*;
use std::time::Duration;

pub mod cube;
pub mod integrator;
pub mod region;
pub mod rng;
pub mod rotation;
pub mod simulation;

pub use cube::{
    random_axis, random_rotation_speed, Cube, CubeColor, CELEBRATION_DURATION, SPEED_MULTIPLIER,
};
pub use integrator::{step, StepParams, StepReport, Wall, MAX_BOUNCE_PERTURBATION};
pub use region::{physics_bounds, primary_region, union_bounds, Bounds, DisplayRegion, PhysicsMode};
pub use rng::{CubeRng, SequenceRng, StdRandom};
pub use rotation::RotationMatrix;
pub use simulation::Simulation;

/// Nominal tick length.
pub const TICK: Duration = Duration::from_millis(16);

/// Ticks the [`Simulation`] resource once per fixed step.
///
/// The resource itself is inserted by whoever knows the display layout.
pub struct CubeSimulationPlugin {
    pub tick: Duration,
}

impl Default for CubeSimulationPlugin {
    fn default() -> Self {
        Self { tick: TICK }
    }
}

impl Plugin for CubeSimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_duration(self.tick))
            .add_systems(FixedUpdate, tick_simulation);
    }
}

fn tick_simulation(simulation: Option<ResMut<Simulation>>) {
    if let Some(mut simulation) = simulation {
        simulation.tick();
    }
}
