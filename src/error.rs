//! Error types for the DCM AHRS library
//!
//! The numeric pipeline itself cannot fail. The only fallible operation is
//! turning a raw numeric selector (for example one read from a parameter
//! store) into an axis convention.

use thiserror::Error;

/// Rejected axis convention selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConventionError {
    /// Pitch selector outside the three supported orientations
    #[error("unknown pitch orientation selector {0} (expected 1..=3)")]
    UnknownPitchOrientation(u8),
    /// Roll selector outside the six supported orientations
    #[error("unknown roll orientation selector {0} (expected 1..=6)")]
    UnknownRollOrientation(u8),
}
