//! Drift correction: the proportional + integral half of the complementary filter
//!
//! The accelerometer is the gravity reference for roll and pitch. It is only
//! trusted in proportion to how close its magnitude is to 1 g, since any
//! extra magnitude comes from the vehicle accelerating.
//!
//! # Known limitation: yaw
//!
//! No magnetic heading is wired in. The yaw error is formed from the rotation
//! matrix and a heading reference that nothing ever sets, so it carries no
//! independent information about yaw and, with the reference at zero,
//! contributes nothing. Yaw is therefore pure gyro integration and will drift.

use nalgebra::{Matrix3, Vector3};

use crate::math::Matrix3Ext;
use crate::types::Gains;

/// Feedback produced at the end of one cycle and consumed by the next
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Feedback {
    /// Proportional term (rad/s), rewritten every cycle
    pub proportional: Vector3<f32>,
    /// Integral term (rad/s), accumulated and never reset by the filter
    pub integral: Vector3<f32>,
}

/// Per-cycle error vectors, kept for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriftErrors {
    /// Measured down axis crossed with the estimated one
    pub roll_pitch: Vector3<f32>,
    /// Row 2 scaled by the heading course error
    pub yaw: Vector3<f32>,
    /// Accelerometer trust weight used this cycle
    pub accelerometer_weight: f32,
}

/// Heading reference components for the yaw path
///
/// These would come from a tilt-compensated compass heading as
/// `(cos(heading), sin(heading))`. No magnetometer feeds them, so they stay
/// at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeadingReference {
    /// Cosine of the reference heading
    pub x: f32,
    /// Sine of the reference heading
    pub y: f32,
}

/// How far an accelerometer reading can be trusted as a gravity reference
///
/// Triangular weight on the magnitude relative to `gravity`: 1 at exactly
/// 1 g, falling to 0 at 0.5 g and 1.5 g and clamped at 0 beyond.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use dcm_ahrs::accelerometer_weight;
///
/// assert_eq!(accelerometer_weight(&Vector3::new(0.0, 0.0, 1.0), 1.0), 1.0);
/// assert_eq!(accelerometer_weight(&Vector3::new(0.0, 0.0, 2.0), 1.0), 0.0);
/// ```
pub fn accelerometer_weight(accelerometer: &Vector3<f32>, gravity: f32) -> f32 {
    let magnitude = accelerometer.norm() / gravity;
    (1.0 - 2.0 * (1.0 - magnitude).abs()).clamp(0.0, 1.0)
}

/// Compute this cycle's errors and update `feedback` for the next cycle
///
/// `dcm` must be the freshly orthonormalized matrix. The accelerometer is
/// divided by `gravity` first, so the loop gain does not depend on the
/// accelerometer units. The roll/pitch
/// proportional term overwrites `feedback.proportional`; everything else is
/// added on top, so roll/pitch and yaw share the same feedback vectors.
pub fn correct(
    feedback: &mut Feedback,
    dcm: &Matrix3<f32>,
    accelerometer: &Vector3<f32>,
    heading: &HeadingReference,
    gains: &Gains,
    gravity: f32,
) -> DriftErrors {
    let down = dcm.row_vector(2);

    // Roll and pitch
    let weight = accelerometer_weight(accelerometer, gravity);
    let roll_pitch = (accelerometer / gravity).cross(&down);

    feedback.proportional = roll_pitch * (gains.roll_pitch_p * weight);
    feedback.integral += roll_pitch * (gains.roll_pitch_i * weight);

    // Yaw
    let course = dcm[(0, 0)] * heading.y - dcm[(1, 0)] * heading.x;
    let yaw = down * course;

    feedback.proportional += yaw * gains.yaw_p;
    feedback.integral += yaw * gains.yaw_i;

    DriftErrors {
        roll_pitch,
        yaw,
        accelerometer_weight: weight,
    }
}
