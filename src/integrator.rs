//! Gyro-rate integration of the direction cosine matrix

use nalgebra::{Matrix3, Vector3};

use crate::drift::Feedback;
use crate::math::Matrix3Ext;

/// Measured rate plus the drift-correction feedback of the previous cycle
///
/// The correction always lags one cycle: `feedback` must be the value the
/// drift corrector left behind at the end of the last cycle.
#[inline]
pub fn effective_rate(gyroscope: Vector3<f32>, feedback: &Feedback) -> Vector3<f32> {
    gyroscope + feedback.proportional + feedback.integral
}

/// Advance rows 0 and 1 of `dcm` by one small-angle step
///
/// Each row moves by `dt * (row × ω)`, the skew-symmetric first-order term of
/// the rotation increment. Row 2 is never integrated here: it is always
/// rebuilt from the other two by [`orthonormalize`](crate::orthonormalize),
/// and integrating it as well would count the rotation twice.
///
/// The matrix is left slightly non-orthonormal on purpose.
pub fn integrate(dcm: &mut Matrix3<f32>, rate: Vector3<f32>, delta_time: f32) {
    for i in 0..2 {
        let row = dcm.row_vector(i);
        let updated = row + row.cross(&rate) * delta_time;
        dcm.set_row_vector(i, &updated);
    }
}
