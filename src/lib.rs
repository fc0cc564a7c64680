#![cfg_attr(not(test), no_std)]

//! DCM AHRS - a direction cosine matrix attitude and heading estimator
//!
//! The filter integrates gyroscope rates into a rotation matrix, keeps that
//! matrix orthonormal with a cheap linearized correction, and removes roll
//! and pitch drift with a proportional + integral feedback loop referenced to
//! gravity. The accelerometer is trusted less the further its magnitude is
//! from 1 g, so vehicle acceleration does not drag the attitude around.
//!
//! It is meant to run once per fixed control cycle on a small processor:
//! `#![no_std]`, no allocation, and a busy-wait [`CycleTimer`] over any
//! free-running counter.
//!
//! # Features
//!
//! - Small-angle rate integration with implicit third-row reconstruction
//! - Linearized Gram-Schmidt orthonormalization, no square roots
//! - Accelerometer trust weighting for dynamic manoeuvres
//! - Three pitch and six roll extraction conventions for different mountings
//! - Full and partial reset from an accelerometer-only attitude
//! - Synthetic tick source for host testing
//!
//! # Limitations
//!
//! There is no magnetometer heading correction. Yaw is integrated from the
//! gyroscope only and drifts.
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::Vector3;
//! use dcm_ahrs::Dcm;
//!
//! let mut dcm = Dcm::new();
//!
//! // Sensor readings
//! let gyroscope = Vector3::new(0.01, 0.02, 0.03);   // rad/s
//! let accelerometer = Vector3::new(0.0, 0.0, 1.0); // g
//!
//! // Seed from gravity, then update once per cycle
//! dcm.full_reset(&accelerometer);
//! dcm.update(gyroscope, accelerometer, 0.02); // 20 ms
//!
//! // Get orientation
//! let angles = dcm.euler_angles();
//! println!("yaw {} pitch {} roll {}", angles.yaw, angles.pitch, angles.roll);
//! ```

mod calibration;
mod dcm;
mod drift;
mod error;
pub mod euler;
mod estimator;
mod integrator;
mod math;
mod orthonormal;
mod reset;
mod timer;
mod types;

// Re-export all public types and functions
pub use calibration::{ImuScaling, InertialScale, RawSample};
pub use dcm::Dcm;
pub use drift::{Feedback, accelerometer_weight};
pub use error::ConventionError;
pub use estimator::{Estimator, InertialSource};
pub use math::{DEG_TO_RAD, Matrix3Ext, RAD_TO_DEG, Vector3Ext, clamped_asin};
pub use orthonormal::orthonormalize;
pub use reset::{accelerometer_attitude, rotation_from_euler};
pub use timer::{CycleTimer, MockTicks, TickSource};
pub use types::*;
