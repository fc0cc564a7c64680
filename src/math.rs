//! Mathematical utilities and nalgebra extensions for the DCM AHRS library

use nalgebra::{ComplexField, Matrix3, Vector3};

/// Mathematical constants
pub const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
pub const RAD_TO_DEG: f32 = 180.0 / core::f32::consts::PI;

/// Inverse sine with the argument clamped to [-1, 1]
///
/// Integration and renormalization error can push a rotation matrix entry a
/// hair past ±1, where `asin` is undefined.
#[inline]
pub fn clamped_asin(x: f32) -> f32 {
    ComplexField::asin(x.clamp(-1.0, 1.0))
}

/// Extension trait for Vector3 operations
pub trait Vector3Ext {
    /// Scale towards unit length using the first-order approximation
    /// `0.5 * (3 - |v|²)` of `1 / |v|`
    ///
    /// Only valid close to unit length; the error is second order in the
    /// deviation.
    fn renormalize(&self) -> Vector3<f32>;

    /// Convert degrees to radians
    fn deg_to_rad(&self) -> Vector3<f32>;

    /// Convert radians to degrees
    fn rad_to_deg(&self) -> Vector3<f32>;
}

impl Vector3Ext for Vector3<f32> {
    fn renormalize(&self) -> Vector3<f32> {
        *self * (0.5 * (3.0 - self.dot(self)))
    }

    fn deg_to_rad(&self) -> Vector3<f32> {
        *self * DEG_TO_RAD
    }

    fn rad_to_deg(&self) -> Vector3<f32> {
        *self * RAD_TO_DEG
    }
}

/// Extension trait for treating a Matrix3 as three row vectors
pub trait Matrix3Ext {
    /// Row `i` as a column vector
    fn row_vector(&self, i: usize) -> Vector3<f32>;

    /// Overwrite row `i`
    fn set_row_vector(&mut self, i: usize, row: &Vector3<f32>);

    /// Largest deviation from orthonormality over all row pairs and row lengths
    fn orthonormality_error(&self) -> f32;

    /// Largest component of `row2 - row0 × row1`
    fn handedness_error(&self) -> f32;
}

impl Matrix3Ext for Matrix3<f32> {
    #[inline]
    fn row_vector(&self, i: usize) -> Vector3<f32> {
        self.row(i).transpose()
    }

    #[inline]
    fn set_row_vector(&mut self, i: usize, row: &Vector3<f32>) {
        self.set_row(i, &row.transpose());
    }

    fn orthonormality_error(&self) -> f32 {
        let rows = [self.row_vector(0), self.row_vector(1), self.row_vector(2)];
        let mut worst = 0.0f32;
        for i in 0..3 {
            worst = worst.max((rows[i].dot(&rows[i]) - 1.0).abs());
            for j in (i + 1)..3 {
                worst = worst.max(rows[i].dot(&rows[j]).abs());
            }
        }
        worst
    }

    fn handedness_error(&self) -> f32 {
        let expected = self.row_vector(0).cross(&self.row_vector(1));
        (self.row_vector(2) - expected).amax()
    }
}
