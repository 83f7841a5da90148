//! Kinematic and visual state of the bouncing cube.

use bevy::math::{Vec2, Vec3};

use crate::region::{primary_region, DisplayRegion};
use crate::rng::CubeRng;
use crate::rotation::RotationMatrix;

/// Multiplier applied to the initial speed.
pub const SPEED_MULTIPLIER: f32 = 1.0;

/// Initial speed range in pixels per tick.
pub const SPAWN_SPEED_MIN: f32 = 2.0;
pub const SPAWN_SPEED_MAX: f32 = 5.0;

/// Rotation speed range at spawn, degrees per tick.
pub const SPAWN_SPIN_MIN: f32 = 0.5;
pub const SPAWN_SPIN_MAX: f32 = 2.5;

/// Rotation speed range after a bounce, degrees per tick.
pub const BOUNCE_SPIN_MIN: f32 = 0.5;
pub const BOUNCE_SPIN_MAX: f32 = 3.5;

/// Ticks a corner celebration lasts (~1 s at 16 ms per tick).
pub const CELEBRATION_DURATION: u32 = 60;

/// Axis samples shorter than this are redrawn.
const MIN_AXIS_SAMPLE_LENGTH: f32 = 1e-4;
const MAX_AXIS_SAMPLE_ATTEMPTS: usize = 16;

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl CubeColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Each channel uniform in 128..=255.
    pub fn random_pastel(rng: &mut dyn CubeRng) -> Self {
        let mut channel = || 128 + ((rng.next_f32() * 128.0) as u32).min(127) as u8;
        Self::new(channel(), channel(), channel())
    }

    /// Channels as floats in [0, 1].
    pub fn to_unit_rgb(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// The single cube.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    /// Centre in virtual-desktop pixels.
    pub position: Vec2,
    /// Pixels per tick.
    pub velocity: Vec2,
    pub rotation: RotationMatrix,
    /// Unit axis driving the per-tick rotation increment.
    pub rotation_axis: Vec3,
    /// Degrees per tick; the sign picks the spin direction.
    pub rotation_speed: f32,
    pub color: CubeColor,
    pub celebrating_corner: bool,
    pub celebration_timer: u32,
    pub active: bool,
}

impl Cube {
    /// Spawn at the centre of the primary region with random motion.
    ///
    /// Returns `None` when there are no regions.
    pub fn spawn(regions: &[DisplayRegion], rng: &mut dyn CubeRng) -> Option<Self> {
        let primary = primary_region(regions)?;

        let angle = rng.next_f32() * std::f32::consts::TAU;
        let speed = rng.range_f32(SPAWN_SPEED_MIN, SPAWN_SPEED_MAX) * SPEED_MULTIPLIER;
        let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;

        let rotation_axis = random_axis(rng);
        let rotation_speed = random_rotation_speed(rng, SPAWN_SPIN_MIN, SPAWN_SPIN_MAX);
        let color = CubeColor::random_pastel(rng);

        Some(Self {
            position: primary.bounds.center(),
            velocity,
            rotation: RotationMatrix::IDENTITY,
            rotation_axis,
            rotation_speed,
            color,
            celebrating_corner: false,
            celebration_timer: 0,
            active: true,
        })
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Draw a fresh spin axis and speed (after a bounce).
    pub fn randomize_spin(&mut self, rng: &mut dyn CubeRng) {
        self.rotation_axis = random_axis(rng);
        self.rotation_speed = random_rotation_speed(rng, BOUNCE_SPIN_MIN, BOUNCE_SPIN_MAX);
    }

    /// `(sin(timer * 0.3) + 1) / 2` while celebrating, 0 otherwise.
    pub fn celebration_pulse(&self) -> f32 {
        if self.celebrating_corner {
            ((self.celebration_timer as f32 * 0.3).sin() + 1.0) * 0.5
        } else {
            0.0
        }
    }
}

/// Uniform point in [-1, 1]³, normalized.
///
/// Near-zero samples are redrawn; after repeated failures the axis falls
/// back to +Z.
pub fn random_axis(rng: &mut dyn CubeRng) -> Vec3 {
    for _ in 0..MAX_AXIS_SAMPLE_ATTEMPTS {
        let sample = Vec3::new(
            rng.range_f32(-1.0, 1.0),
            rng.range_f32(-1.0, 1.0),
            rng.range_f32(-1.0, 1.0),
        );
        let length = sample.length();
        if length > MIN_AXIS_SAMPLE_LENGTH {
            return sample / length;
        }
    }
    Vec3::Z
}

/// Random sign times a magnitude in [min, max).
pub fn random_rotation_speed(rng: &mut dyn CubeRng, min: f32, max: f32) -> f32 {
    let sign = rng.next_sign();
    sign * rng.range_f32(min, max)
}
