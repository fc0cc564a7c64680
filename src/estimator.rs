//! Control loop tying the cycle timer, sensor scaling and DCM filter together

use crate::calibration::{ImuScaling, RawSample};
use crate::dcm::Dcm;
use crate::timer::{CycleTimer, TickSource};
use crate::types::{DcmSettings, EulerAngles, TimerSettings};

/// Source of raw inertial samples
///
/// Implemented by the sensor driver. Reads are assumed to always succeed;
/// bus errors are the driver's problem.
pub trait InertialSource {
    /// Read one gyroscope and accelerometer sample
    fn read_raw(&mut self) -> RawSample;
}

impl<F: FnMut() -> RawSample> InertialSource for F {
    fn read_raw(&mut self) -> RawSample {
        self()
    }
}

/// Fixed-rate attitude estimation loop
///
/// Owns the only [`Dcm`] instance and runs one complete cycle per call to
/// [`cycle`](Self::cycle): wait for the sample period, read and scale the
/// sensors, update the filter.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use dcm_ahrs::{DcmSettings, Estimator, ImuScaling, InertialScale, MockTicks, RawSample, TimerSettings};
///
/// let scaling = ImuScaling {
///     gyroscope: InertialScale::uniform(0.001),
///     accelerometer: InertialScale::uniform(1.0 / 16384.0),
/// };
/// let mut estimator = Estimator::new(
///     MockTicks::new(1_000_000, 1_000),
///     TimerSettings { sample_rate: 50 },
///     DcmSettings::default(),
///     scaling,
/// );
///
/// let mut imu = || RawSample {
///     gyroscope: Vector3::zeros(),
///     accelerometer: Vector3::new(0, 0, 16384),
/// };
///
/// estimator.full_reset(&mut imu);
/// for _ in 0..10 {
///     estimator.cycle(&mut imu);
/// }
/// assert!(estimator.euler_angles().pitch.abs() < 1e-6);
/// ```
#[derive(Debug)]
pub struct Estimator<C> {
    timer: CycleTimer<C>,
    dcm: Dcm,
    scaling: ImuScaling,
}

impl<C: TickSource> Estimator<C> {
    /// Create an estimator; call [`full_reset`](Self::full_reset) before the
    /// first cycle to seed the attitude
    pub fn new(
        clock: C,
        timer_settings: TimerSettings,
        settings: DcmSettings,
        scaling: ImuScaling,
    ) -> Self {
        Self {
            timer: CycleTimer::new(clock, timer_settings),
            dcm: Dcm::with_settings(settings),
            scaling,
        }
    }

    /// Seed the filter from a fresh accelerometer reading and restart timing
    ///
    /// The next cycle reports zero elapsed time.
    pub fn full_reset<S: InertialSource>(&mut self, sensors: &mut S) {
        let (_, accelerometer) = self.scaling.apply(&sensors.read_raw());
        self.dcm.full_reset(&accelerometer);
        self.timer.restart();
    }

    /// Reseed pitch and roll outputs only, keeping the rotation matrix
    pub fn partial_reset<S: InertialSource>(&mut self, sensors: &mut S) {
        let (_, accelerometer) = self.scaling.apply(&sensors.read_raw());
        self.dcm.partial_reset(&accelerometer);
    }

    /// Run one cycle: wait, read, scale, update
    ///
    /// Blocks until the sample period has elapsed.
    pub fn cycle<S: InertialSource>(&mut self, sensors: &mut S) -> EulerAngles {
        let delta_time = self.timer.advance_time();
        let (gyroscope, accelerometer) = self.scaling.apply(&sensors.read_raw());
        self.dcm.update(gyroscope, accelerometer, delta_time)
    }

    /// Latest yaw, pitch and roll in radians
    pub fn euler_angles(&self) -> EulerAngles {
        self.dcm.euler_angles()
    }

    /// The filter
    pub fn dcm(&self) -> &Dcm {
        &self.dcm
    }

    /// Mutable access to the filter, e.g. to change conventions
    pub fn dcm_mut(&mut self) -> &mut Dcm {
        &mut self.dcm
    }

    /// The cycle timer
    pub fn timer(&self) -> &CycleTimer<C> {
        &self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::InertialScale;
    use crate::timer::MockTicks;
    use nalgebra::{Matrix3, Vector3};

    fn estimator() -> Estimator<MockTicks> {
        Estimator::new(
            MockTicks::new(1_000, 1),
            TimerSettings { sample_rate: 99 },
            DcmSettings::default(),
            ImuScaling {
                gyroscope: InertialScale::uniform(0.01),
                accelerometer: InertialScale::uniform(0.001),
            },
        )
    }

    fn still() -> RawSample {
        RawSample {
            gyroscope: Vector3::zeros(),
            accelerometer: Vector3::new(0, 0, 1000),
        }
    }

    #[test]
    fn test_first_cycle_after_reset_has_zero_dt() {
        let mut estimator = estimator();
        let mut spinning = || RawSample {
            gyroscope: Vector3::new(0, 0, 100),
            accelerometer: Vector3::new(0, 0, 1000),
        };

        estimator.full_reset(&mut spinning);
        estimator.timer().clock().advance(10_000);
        estimator.cycle(&mut spinning);

        assert_eq!(estimator.timer().elapsed_seconds(), 0.0);
        assert_eq!(estimator.dcm().rotation_matrix(), Matrix3::identity());
    }

    #[test]
    fn test_cycle_integrates_scaled_rate() {
        let mut estimator = estimator();
        let mut spinning = || RawSample {
            gyroscope: Vector3::new(0, 0, 100),
            accelerometer: Vector3::new(0, 0, 1000),
        };

        estimator.full_reset(&mut spinning);
        for _ in 0..101 {
            estimator.cycle(&mut spinning);
        }

        // 1 rad/s for 100 periods of 10 ms
        let yaw = estimator.euler_angles().yaw;
        assert!((yaw - 1.0).abs() < 0.01, "yaw = {}", yaw);
        assert!(estimator.dcm().gyroscope().z > 0.99);
    }

    #[test]
    fn test_partial_reset_reads_sensors() {
        let mut estimator = estimator();
        let mut sensors = still;
        estimator.full_reset(&mut sensors);

        let mut tilted = || RawSample {
            gyroscope: Vector3::zeros(),
            accelerometer: Vector3::new(0, 500, 866),
        };
        estimator.partial_reset(&mut tilted);

        assert!((estimator.euler_angles().roll - 30.0f32.to_radians()).abs() < 1e-3);
        assert_eq!(estimator.dcm().rotation_matrix(), Matrix3::identity());
    }
}
