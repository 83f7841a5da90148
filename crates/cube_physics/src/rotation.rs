//! Fixed-size 4×4 rotation matrices for the cube's orientation.
//!
//! The matrix is stored as 16 floats in row-major order and multiplied with
//! the row-major convention:
//!
//! ```text
//! result[i*4 + j] = Σk a[i*4 + k] * b[k*4 + j]
//! ```
//!
//! The renderer hands the same 16 floats to Bevy as a column-major [`Mat4`],
//! which is how a fixed-function `glMultMatrixf` would read them.

use bevy::math::{Mat4, Quat, Vec3};
use std::ops::Mul;

/// A 4×4 homogeneous rotation matrix (no translation, no projection).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix(pub [f32; 16]);

impl RotationMatrix {
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    /// Angle-axis rotation (Rodrigues) with the angle in degrees.
    ///
    /// `axis` is expected to be unit length; it is not re-normalized here.
    pub fn from_axis_angle_degrees(axis: Vec3, angle_degrees: f32) -> Self {
        let angle = angle_degrees.to_radians();
        let (s, c) = angle.sin_cos();
        let ic = 1.0 - c;
        let Vec3 { x, y, z } = axis;

        Self([
            c + x * x * ic,
            x * y * ic - z * s,
            x * z * ic + y * s,
            0.0,
            y * x * ic + z * s,
            c + y * y * ic,
            y * z * ic - x * s,
            0.0,
            z * x * ic - y * s,
            z * y * ic + x * s,
            c + z * z * ic,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// Element at `row`, `col` (row-major).
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.0[row * 4 + col]
    }

    /// Row-major product `self × rhs`.
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut result = [0.0f32; 16];
        for i in 0..4 {
            for j in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.0[i * 4 + k] * rhs.0[k * 4 + j];
                }
                result[i * 4 + j] = sum;
            }
        }
        Self(result)
    }

    /// Apply the upper-left 3×3 block to a column vector (`R · v`).
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.at(0, 0) * v.x + self.at(0, 1) * v.y + self.at(0, 2) * v.z,
            self.at(1, 0) * v.x + self.at(1, 1) * v.y + self.at(1, 2) * v.z,
            self.at(2, 0) * v.x + self.at(2, 1) * v.y + self.at(2, 2) * v.z,
        )
    }

    /// Reinterpret the storage as a column-major Bevy matrix.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_cols_array(&self.0)
    }

    /// Orientation as a quaternion, for driving a `Transform`.
    pub fn to_quat(&self) -> Quat {
        Quat::from_mat4(&self.to_mat4()).normalize()
    }

    /// Largest deviation of `Rᵀ·R` from the identity.
    ///
    /// Zero for a perfect rotation; grows slowly as float error accumulates.
    pub fn orthonormality_error(&self) -> f32 {
        let mut worst = 0.0f32;
        for i in 0..3 {
            for j in 0..3 {
                let dot: f32 = (0..3).map(|k| self.at(k, i) * self.at(k, j)).sum();
                let expected = if i == j { 1.0 } else { 0.0 };
                worst = worst.max((dot - expected).abs());
            }
        }
        worst
    }
}

impl Default for RotationMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for RotationMatrix {
    type Output = RotationMatrix;

    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}
