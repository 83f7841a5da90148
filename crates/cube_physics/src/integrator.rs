//! Per-tick update of the cube.
//!
//! One call advances the cube by exactly one tick:
//!
//! 1. Euler step of the position (`position += velocity`)
//! 2. Compose the spin increment onto the orientation
//! 3. Resolve X then Y wall collisions (clamp, reflect, perturb, re-spin)
//! 4. Start / count down the corner celebration
//!
//! There is no delta time: a tick is one ~16 ms frame.

use bevy::math::Vec2;

use crate::cube::{Cube, CELEBRATION_DURATION};
use crate::region::Bounds;
use crate::rng::CubeRng;
use crate::rotation::RotationMatrix;

/// Largest bounce-angle perturbation, ~3 degrees in radians.
pub const MAX_BOUNCE_PERTURBATION: f32 = 0.052;

/// A wall hit counts as a corner hit when the cube is within this many
/// half-sizes of the perpendicular wall.
pub const CORNER_THRESHOLD_HALF_SIZES: f32 = 2.0;

/// Per-tick parameters that come from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepParams {
    /// Half the cube's edge length in pixels.
    pub half_size: f32,
    pub celebration_enabled: bool,
}

/// Which wall was hit on an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub x_wall: Option<Wall>,
    pub y_wall: Option<Wall>,
    pub corner_hit: bool,
    pub celebration_started: bool,
    pub celebration_ended: bool,
}

impl StepReport {
    pub fn collided(&self) -> bool {
        self.x_wall.is_some() || self.y_wall.is_some()
    }
}

/// Advance `cube` by one tick inside `bounds`.
pub fn step(
    cube: &mut Cube,
    bounds: &Bounds,
    params: &StepParams,
    rng: &mut dyn CubeRng,
) -> StepReport {
    let mut report = StepReport::default();
    if !cube.active {
        return report;
    }

    cube.position += cube.velocity;

    let increment =
        RotationMatrix::from_axis_angle_degrees(cube.rotation_axis, cube.rotation_speed);
    cube.rotation = increment * cube.rotation;

    let h = params.half_size;
    let corner_threshold = h * CORNER_THRESHOLD_HALF_SIZES;

    if cube.position.x - h <= bounds.left {
        cube.position.x = bounds.left + h;
        report.x_wall = Some(Wall::Left);
    } else if cube.position.x + h >= bounds.right {
        cube.position.x = bounds.right - h;
        report.x_wall = Some(Wall::Right);
    }
    if report.x_wall.is_some() {
        cube.velocity.x = -cube.velocity.x;
        cube.velocity = perturb_heading(cube.velocity, Axis::X, rng);
        cube.randomize_spin(rng);
        if (cube.position.y - bounds.top).abs() < corner_threshold
            || (cube.position.y - bounds.bottom).abs() < corner_threshold
        {
            report.corner_hit = true;
        }
    }

    if cube.position.y - h <= bounds.top {
        cube.position.y = bounds.top + h;
        report.y_wall = Some(Wall::Top);
    } else if cube.position.y + h >= bounds.bottom {
        cube.position.y = bounds.bottom - h;
        report.y_wall = Some(Wall::Bottom);
    }
    if report.y_wall.is_some() {
        cube.velocity.y = -cube.velocity.y;
        cube.velocity = perturb_heading(cube.velocity, Axis::Y, rng);
        cube.randomize_spin(rng);
        if (cube.position.x - bounds.left).abs() < corner_threshold
            || (cube.position.x - bounds.right).abs() < corner_threshold
        {
            report.corner_hit = true;
        }
    }

    if report.corner_hit && !cube.celebrating_corner && params.celebration_enabled {
        cube.celebrating_corner = true;
        cube.celebration_timer = CELEBRATION_DURATION;
        report.celebration_started = true;
    }

    if cube.celebrating_corner {
        cube.celebration_timer = cube.celebration_timer.saturating_sub(1);
        if cube.celebration_timer == 0 {
            cube.celebrating_corner = false;
            report.celebration_ended = true;
        }
    }

    report
}

/// Axis whose velocity component was just reflected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Rotate the (already reflected) velocity by up to
/// [`MAX_BOUNCE_PERTURBATION`] without changing its length.
///
/// The sign is chosen so the component running along the wall shrinks,
/// steering the cube away from the corner it was heading for. Rotating by
/// `δ` changes `vy` by `vx·δ` and `vx` by `-vy·δ`, so for an X-wall the
/// sign is `-sign(vx·vy)` and for a Y-wall `+sign(vx·vy)`. With no
/// tangential motion the offset stays positive.
///
/// The offset never exceeds the angle between the velocity and the wall
/// normal, so a small tangential component drops to zero instead of
/// flipping sign and growing.
fn perturb_heading(velocity: Vec2, reflected: Axis, rng: &mut dyn CubeRng) -> Vec2 {
    let speed = velocity.length();
    if speed == 0.0 {
        return velocity;
    }

    let (normal, tangential) = match reflected {
        Axis::X => (velocity.x, velocity.y),
        Axis::Y => (velocity.y, velocity.x),
    };
    let mut magnitude = rng.next_f32() * MAX_BOUNCE_PERTURBATION;
    if tangential != 0.0 {
        magnitude = magnitude.min(tangential.abs().atan2(normal.abs()));
    }

    let cross = velocity.x * velocity.y;
    let sign = match reflected {
        Axis::X if cross > 0.0 => -1.0,
        Axis::Y if cross < 0.0 => -1.0,
        _ => 1.0,
    };

    let angle = velocity.y.atan2(velocity.x) + sign * magnitude;
    Vec2::new(angle.cos(), angle.sin()) * speed
}
