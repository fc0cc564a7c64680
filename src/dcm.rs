//! Direction cosine matrix filter for the DCM AHRS library

use nalgebra::{Matrix3, Vector3};

use crate::drift::{self, DriftErrors, Feedback, HeadingReference};
use crate::error::ConventionError;
use crate::euler;
use crate::integrator::{effective_rate, integrate};
use crate::orthonormal::orthonormalize;
use crate::reset::{accelerometer_attitude, rotation_from_euler};
use crate::types::{
    Conventions, DcmInternalStates, DcmSettings, EulerAngles, PitchOrientation, RollOrientation,
};

/// Direction cosine matrix attitude filter
///
/// Integrates gyroscope rates into a body-to-reference rotation matrix and
/// corrects its roll/pitch drift against the accelerometer with a
/// proportional + integral feedback loop. All filter state lives here; the
/// control loop owns one instance and calls [`update`](Self::update) once per
/// cycle.
///
/// Every cycle runs the stages in a fixed order: integrate, orthonormalize,
/// drift-correct, extract. The feedback produced by the drift corrector is
/// only consumed by the *next* call to `update`.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use dcm_ahrs::Dcm;
///
/// let mut dcm = Dcm::new();
/// dcm.full_reset(&Vector3::new(0.0, 0.0, 1.0));
///
/// for _ in 0..100 {
///     let gyroscope = Vector3::new(0.0, 0.0, 0.1); // rad/s
///     let accelerometer = Vector3::new(0.0, 0.0, 1.0); // g
///     dcm.update(gyroscope, accelerometer, 0.02);
/// }
///
/// let angles = dcm.euler_angles().to_degrees();
/// assert!((angles.yaw - 11.46).abs() < 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct Dcm {
    /// Algorithm settings
    settings: DcmSettings,
    /// Body-to-reference rotation; rows kept orthonormal after every cycle
    dcm: Matrix3<f32>,
    /// Feedback left by the last drift correction, consumed by the next cycle
    feedback: Feedback,
    /// Errors from the last drift correction
    errors: DriftErrors,
    /// Compass heading components for the yaw path (never set)
    heading: HeadingReference,
    /// Last scaled gyroscope reading (rad/s)
    gyroscope: Vector3<f32>,
    /// Last scaled accelerometer reading (g)
    accelerometer: Vector3<f32>,
    /// Latest orientation output
    angles: EulerAngles,
}

impl Dcm {
    /// Create a filter with default settings, level and pointing at yaw 0
    pub fn new() -> Self {
        Self::with_settings(DcmSettings::default())
    }

    /// Create a filter with the specified settings
    pub fn with_settings(settings: DcmSettings) -> Self {
        Dcm {
            settings,
            dcm: Matrix3::identity(),
            feedback: Feedback::default(),
            errors: DriftErrors::default(),
            heading: HeadingReference::default(),
            gyroscope: Vector3::zeros(),
            accelerometer: Vector3::zeros(),
            angles: EulerAngles::default(),
        }
    }

    /// Reseed the whole filter from an accelerometer reading
    ///
    /// Pitch and roll come from gravity alone and yaw is set to zero. The
    /// rotation matrix is rebuilt from those angles and the accumulated
    /// feedback is discarded.
    pub fn full_reset(&mut self, accelerometer: &Vector3<f32>) {
        let (pitch, roll) = accelerometer_attitude(accelerometer);
        let yaw = 0.0;

        self.dcm = rotation_from_euler(yaw, pitch, roll);
        self.feedback = Feedback::default();
        self.errors = DriftErrors::default();
        self.accelerometer = *accelerometer;
        self.gyroscope = Vector3::zeros();
        self.angles = EulerAngles { yaw, pitch, roll };

        log::debug!("full reset: pitch = {} rad, roll = {} rad", pitch, roll);
    }

    /// Recompute only the pitch and roll outputs from an accelerometer reading
    ///
    /// The rotation matrix, feedback and yaw are left untouched, so the
    /// accumulated orientation and drift estimate survive.
    pub fn partial_reset(&mut self, accelerometer: &Vector3<f32>) {
        let (pitch, roll) = accelerometer_attitude(accelerometer);
        self.angles.pitch = pitch;
        self.angles.roll = roll;

        log::debug!("partial reset: pitch = {} rad, roll = {} rad", pitch, roll);
    }

    /// Run one filter cycle
    ///
    /// # Arguments
    /// * `gyroscope` - Angular rate in rad/s
    /// * `accelerometer` - Acceleration in g
    /// * `delta_time` - Time since the previous cycle in seconds
    pub fn update(
        &mut self,
        gyroscope: Vector3<f32>,
        accelerometer: Vector3<f32>,
        delta_time: f32,
    ) -> EulerAngles {
        self.gyroscope = gyroscope;
        self.accelerometer = accelerometer;

        let rate = effective_rate(gyroscope, &self.feedback);
        integrate(&mut self.dcm, rate, delta_time);
        orthonormalize(&mut self.dcm);

        self.errors = drift::correct(
            &mut self.feedback,
            &self.dcm,
            &accelerometer,
            &self.heading,
            &self.settings.gains,
            self.settings.gravity,
        );

        self.angles = self.extract_angles();
        self.angles
    }

    /// Latest yaw, pitch and roll in radians
    pub fn euler_angles(&self) -> EulerAngles {
        self.angles
    }

    /// Current rotation matrix
    pub fn rotation_matrix(&self) -> Matrix3<f32> {
        self.dcm
    }

    /// Replace the rotation matrix
    ///
    /// The matrix must already be orthonormal; the per-cycle correction only
    /// repairs small deviations. Outputs are re-extracted immediately.
    pub fn set_rotation_matrix(&mut self, dcm: Matrix3<f32>) {
        self.dcm = dcm;
        self.angles = self.extract_angles();
    }

    /// Feedback that the next cycle will apply
    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    /// Last scaled gyroscope reading (rad/s)
    pub fn gyroscope(&self) -> Vector3<f32> {
        self.gyroscope
    }

    /// Last scaled accelerometer reading (g)
    pub fn accelerometer(&self) -> Vector3<f32> {
        self.accelerometer
    }

    /// Get internal algorithm states
    pub fn internal_states(&self) -> DcmInternalStates {
        DcmInternalStates {
            roll_pitch_error: self.errors.roll_pitch,
            yaw_error: self.errors.yaw,
            accelerometer_weight: self.errors.accelerometer_weight,
            proportional_feedback: self.feedback.proportional,
            integral_feedback: self.feedback.integral,
        }
    }

    /// Get current algorithm settings
    pub fn settings(&self) -> DcmSettings {
        self.settings
    }

    /// Update algorithm settings
    ///
    /// Takes effect from the next cycle. Feedback state is kept.
    pub fn set_settings(&mut self, settings: DcmSettings) {
        self.settings = settings;
    }

    /// Switch Euler extraction conventions
    ///
    /// Only the outputs change; follow with
    /// [`partial_reset`](Self::partial_reset) to reseed pitch and roll
    /// without waiting for the next cycle.
    pub fn set_conventions(&mut self, conventions: Conventions) {
        self.settings.conventions = conventions;
        log::debug!(
            "conventions set: pitch {:?}, roll {:?}",
            conventions.pitch,
            conventions.roll
        );
    }

    /// Switch conventions from raw numeric selectors
    ///
    /// Pitch selectors are 1..=3 and roll selectors 1..=6. If either selector
    /// is out of range nothing changes and the previous conventions stay in
    /// effect.
    pub fn select_conventions(&mut self, pitch: u8, roll: u8) -> Result<(), ConventionError> {
        let parsed = PitchOrientation::try_from(pitch)
            .and_then(|pitch| RollOrientation::try_from(roll).map(|roll| (pitch, roll)));

        match parsed {
            Ok((pitch, roll)) => {
                self.set_conventions(Conventions {
                    pitch,
                    roll,
                    ..self.settings.conventions
                });
                Ok(())
            }
            Err(error) => {
                log::warn!("{}; keeping previous conventions", error);
                Err(error)
            }
        }
    }

    fn extract_angles(&self) -> EulerAngles {
        let conventions = &self.settings.conventions;
        EulerAngles {
            yaw: euler::yaw(&self.dcm),
            pitch: euler::pitch(&self.dcm, conventions),
            roll: euler::roll(&self.dcm, conventions),
        }
    }
}

impl Default for Dcm {
    fn default() -> Self {
        Self::new()
    }
}
