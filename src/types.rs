//! Core types, settings and axis conventions for the DCM AHRS library

use nalgebra::Vector3;

use crate::error::ConventionError;
use crate::math::RAD_TO_DEG;

/// Sign polarity applied to an extracted angle or reference axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Multiply by +1
    #[default]
    Positive,
    /// Multiply by -1
    Negative,
}

impl Polarity {
    /// Polarity as a multiplier
    #[inline]
    pub fn factor(self) -> f32 {
        match self {
            Polarity::Positive => 1.0,
            Polarity::Negative => -1.0,
        }
    }
}

/// Body axis whose tilt is reported as pitch
///
/// Pitch is read from the row 2 ("down" axis) entry of the rotation matrix in
/// the column of the selected body axis. Pick the axis pointing towards the
/// vehicle's nose in the mounted sensor frame.
///
/// # Example
/// ```
/// use dcm_ahrs::PitchOrientation;
///
/// let orientation = PitchOrientation::try_from(2).unwrap();
/// assert_eq!(orientation, PitchOrientation::Y);
/// assert!(PitchOrientation::try_from(4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PitchOrientation {
    /// Nose along sensor X
    #[default]
    X,
    /// Nose along sensor Y
    Y,
    /// Nose along sensor Z
    Z,
}

impl PitchOrientation {
    /// All orientations, in selector order
    pub const ALL: [PitchOrientation; 3] =
        [PitchOrientation::X, PitchOrientation::Y, PitchOrientation::Z];
}

impl TryFrom<u8> for PitchOrientation {
    type Error = ConventionError;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        match selector {
            1 => Ok(PitchOrientation::X),
            2 => Ok(PitchOrientation::Y),
            3 => Ok(PitchOrientation::Z),
            other => Err(ConventionError::UnknownPitchOrientation(other)),
        }
    }
}

/// Pair of body axes whose gravity components are reported as roll
///
/// The variant name lists the `atan2` numerator axis first and the
/// denominator (reference) axis second, e.g. `YZ` computes
/// `atan2(down.y, down.z)`. The axis not named is the matching pitch axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollOrientation {
    /// `atan2(y, z)`, pitch about X
    #[default]
    YZ,
    /// `atan2(z, y)`, pitch about X
    ZY,
    /// `atan2(x, z)`, pitch about Y
    XZ,
    /// `atan2(z, x)`, pitch about Y
    ZX,
    /// `atan2(x, y)`, pitch about Z
    XY,
    /// `atan2(y, x)`, pitch about Z
    YX,
}

impl RollOrientation {
    /// All orientations, in selector order
    pub const ALL: [RollOrientation; 6] = [
        RollOrientation::YZ,
        RollOrientation::ZY,
        RollOrientation::XZ,
        RollOrientation::ZX,
        RollOrientation::XY,
        RollOrientation::YX,
    ];

    /// Pitch orientation sharing this orientation's body frame
    pub fn pitch_orientation(self) -> PitchOrientation {
        match self {
            RollOrientation::YZ | RollOrientation::ZY => PitchOrientation::X,
            RollOrientation::XZ | RollOrientation::ZX => PitchOrientation::Y,
            RollOrientation::XY | RollOrientation::YX => PitchOrientation::Z,
        }
    }
}

impl TryFrom<u8> for RollOrientation {
    type Error = ConventionError;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        match selector {
            1 => Ok(RollOrientation::YZ),
            2 => Ok(RollOrientation::ZY),
            3 => Ok(RollOrientation::XZ),
            4 => Ok(RollOrientation::ZX),
            5 => Ok(RollOrientation::XY),
            6 => Ok(RollOrientation::YX),
            other => Err(ConventionError::UnknownRollOrientation(other)),
        }
    }
}

/// Axis conventions used when extracting Euler angles
///
/// # Example
/// ```
/// use dcm_ahrs::{Conventions, PitchOrientation, Polarity, RollOrientation};
///
/// let conventions = Conventions {
///     pitch: PitchOrientation::Y,
///     roll: RollOrientation::ZX,
///     pitch_polarity: Polarity::Positive,
///     roll_reference: Polarity::Positive,
/// };
/// assert_eq!(conventions.roll.pitch_orientation(), conventions.pitch);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Conventions {
    /// Which body axis pitch is measured about
    pub pitch: PitchOrientation,
    /// Which pair of body axes roll is measured from
    pub roll: RollOrientation,
    /// Sign applied to the extracted pitch
    pub pitch_polarity: Polarity,
    /// Sign of the roll reference (denominator) axis, negative for a sensor
    /// mounted upside down
    pub roll_reference: Polarity,
}

/// Proportional and integral gains of the drift-correction filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gains {
    /// Proportional gain applied to the roll/pitch error
    pub roll_pitch_p: f32,
    /// Integral gain applied to the roll/pitch error
    pub roll_pitch_i: f32,
    /// Proportional gain applied to the yaw error
    pub yaw_p: f32,
    /// Integral gain applied to the yaw error
    pub yaw_i: f32,
}

impl Default for Gains {
    fn default() -> Self {
        Self {
            roll_pitch_p: 0.02,
            roll_pitch_i: 0.000_02,
            yaw_p: 1.2,
            yaw_i: 0.000_02,
        }
    }
}

/// DCM algorithm settings
///
/// # Example
/// ```
/// use dcm_ahrs::{Dcm, DcmSettings, Gains};
///
/// let settings = DcmSettings {
///     gains: Gains { roll_pitch_p: 0.05, ..Default::default() },
///     ..Default::default()
/// };
/// let dcm = Dcm::with_settings(settings);
/// assert_eq!(dcm.settings().gains.roll_pitch_p, 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DcmSettings {
    /// Drift-correction gains
    pub gains: Gains,
    /// Euler extraction conventions
    pub conventions: Conventions,
    /// Accelerometer magnitude of 1 g, in accelerometer units
    ///
    /// The accelerometer trust weight peaks when the measured magnitude
    /// equals this value.
    pub gravity: f32,
}

impl Default for DcmSettings {
    fn default() -> Self {
        Self {
            gains: Gains::default(),
            conventions: Conventions::default(),
            gravity: 1.0,
        }
    }
}

/// Cycle timer settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerSettings {
    /// Target control cycle rate in Hz
    pub sample_rate: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self { sample_rate: 50 }
    }
}

/// Orientation output in radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    /// Heading, unconstrained modulo 2π
    pub yaw: f32,
    /// Elevation, within [-π/2, π/2]
    pub pitch: f32,
    /// Bank, within [-π, π]
    pub roll: f32,
}

impl EulerAngles {
    /// Same angles in degrees
    pub fn to_degrees(self) -> EulerAngles {
        EulerAngles {
            yaw: self.yaw * RAD_TO_DEG,
            pitch: self.pitch * RAD_TO_DEG,
            roll: self.roll * RAD_TO_DEG,
        }
    }
}

/// DCM algorithm internal states
///
/// Snapshot of the last completed drift-correction step. Useful for tuning
/// gains and for spotting periods of accelerometer distrust.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DcmInternalStates {
    /// Accelerometer vector crossed with the estimated down axis
    pub roll_pitch_error: Vector3<f32>,
    /// Yaw error vector folded into the feedback
    pub yaw_error: Vector3<f32>,
    /// Accelerometer trust weight in [0, 1]
    pub accelerometer_weight: f32,
    /// Proportional feedback consumed by the next cycle (rad/s)
    pub proportional_feedback: Vector3<f32>,
    /// Integral feedback consumed by the next cycle (rad/s)
    pub integral_feedback: Vector3<f32>,
}
