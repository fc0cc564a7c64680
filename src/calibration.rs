//! Raw-to-physical scaling of inertial sensor samples
//!
//! The filter works in rad/s and g. Sensor drivers hand over raw integer
//! counts; the conversion factors depend on the part and its configured range
//! and are supplied by the caller.

use nalgebra::Vector3;

/// One raw gyroscope and accelerometer sample, in sensor counts
///
/// Axis signs are expected to already match the body frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawSample {
    /// Angular rate counts
    pub gyroscope: Vector3<i16>,
    /// Acceleration counts
    pub accelerometer: Vector3<i16>,
}

/// Per-axis offset and sensitivity for one sensor
///
/// Applied as `(raw - offset) * sensitivity`.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use dcm_ahrs::InertialScale;
///
/// // ±2000 deg/s gyro: 16.4 LSB per deg/s
/// let gyro = InertialScale::uniform((1.0_f32 / 16.4).to_radians());
/// let rate = gyro.apply(Vector3::new(164, 0, -164));
/// assert!((rate.x - 10.0_f32.to_radians()).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertialScale {
    /// Multiplier from counts to physical units
    pub sensitivity: Vector3<f32>,
    /// Zero-rate / zero-g offset in counts
    pub offset: Vector3<f32>,
}

impl InertialScale {
    /// Same sensitivity on every axis, no offset
    pub fn uniform(sensitivity: f32) -> Self {
        Self {
            sensitivity: Vector3::repeat(sensitivity),
            offset: Vector3::zeros(),
        }
    }

    /// Convert a raw sample to physical units
    pub fn apply(&self, raw: Vector3<i16>) -> Vector3<f32> {
        (raw.cast::<f32>() - self.offset).component_mul(&self.sensitivity)
    }
}

impl Default for InertialScale {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// Scaling for a gyroscope (to rad/s) and accelerometer (to g) pair
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImuScaling {
    /// Counts to rad/s
    pub gyroscope: InertialScale,
    /// Counts to g
    pub accelerometer: InertialScale,
}

impl ImuScaling {
    /// Convert a raw sample into (angular rate, acceleration)
    pub fn apply(&self, raw: &RawSample) -> (Vector3<f32>, Vector3<f32>) {
        (
            self.gyroscope.apply(raw.gyroscope),
            self.accelerometer.apply(raw.accelerometer),
        )
    }
}
