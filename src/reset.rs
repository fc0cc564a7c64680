//! Accelerometer-only attitude used to seed and reseed the filter

use nalgebra::{ComplexField, Matrix3, RealField, Rotation3, Vector3};

/// Pitch and roll (radians) implied by a static accelerometer reading
///
/// Pitch is the elevation of the X axis out of the gravity plane. Roll is
/// taken from gravity projected onto the body Y-Z plane, obtained with a
/// double cross product against the X axis so the pitch component drops out.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use dcm_ahrs::accelerometer_attitude;
///
/// let (pitch, roll) = accelerometer_attitude(&Vector3::new(0.0, 0.0, 1.0));
/// assert_eq!((pitch, roll), (0.0, 0.0));
/// ```
pub fn accelerometer_attitude(accelerometer: &Vector3<f32>) -> (f32, f32) {
    let a = accelerometer;
    let pitch = -RealField::atan2(a.x, ComplexField::sqrt(a.y * a.y + a.z * a.z));

    let x_axis = Vector3::x();
    let across = a.cross(&x_axis);
    let projected = x_axis.cross(&across);
    let roll = RealField::atan2(projected.y, projected.z);

    (pitch, roll)
}

/// Rotation matrix for intrinsic Z-Y'-X'' Euler angles (yaw, then pitch, then roll)
pub fn rotation_from_euler(yaw: f32, pitch: f32, roll: f32) -> Matrix3<f32> {
    Rotation3::from_euler_angles(roll, pitch, yaw).into_inner()
}
