//! Euler angle extraction under configurable axis conventions
//!
//! Pitch and roll are read from row 2 of the matrix (the reference "down"
//! axis expressed in body coordinates). Which columns are used, and with which
//! sign, is looked up in a small table per convention so every convention
//! shares the same formula.

use nalgebra::{Matrix3, RealField};

use crate::math::clamped_asin;
use crate::types::{Conventions, PitchOrientation, RollOrientation};

/// Matrix cell read for one pitch convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PitchCell {
    row: usize,
    col: usize,
}

/// Matrix cells and sign for one roll convention
#[derive(Debug, Clone, Copy, PartialEq)]
struct RollCells {
    numerator: (usize, usize),
    denominator: (usize, usize),
    sign: f32,
}

const fn pitch_cell(orientation: PitchOrientation) -> PitchCell {
    match orientation {
        PitchOrientation::X => PitchCell { row: 2, col: 0 },
        PitchOrientation::Y => PitchCell { row: 2, col: 1 },
        PitchOrientation::Z => PitchCell { row: 2, col: 2 },
    }
}

// Odd axis permutations flip the numerator so the mounted frame stays
// right-handed.
const fn roll_cells(orientation: RollOrientation) -> RollCells {
    let (numerator, denominator, sign) = match orientation {
        RollOrientation::YZ => ((2, 1), (2, 2), 1.0),
        RollOrientation::ZY => ((2, 2), (2, 1), -1.0),
        RollOrientation::XZ => ((2, 0), (2, 2), -1.0),
        RollOrientation::ZX => ((2, 2), (2, 0), 1.0),
        RollOrientation::XY => ((2, 0), (2, 1), 1.0),
        RollOrientation::YX => ((2, 1), (2, 0), -1.0),
    };
    RollCells {
        numerator,
        denominator,
        sign,
    }
}

/// Pitch in radians, within [-π/2, π/2]
pub fn pitch(dcm: &Matrix3<f32>, conventions: &Conventions) -> f32 {
    let cell = pitch_cell(conventions.pitch);
    -conventions.pitch_polarity.factor() * clamped_asin(dcm[(cell.row, cell.col)])
}

/// Roll in radians, within [-π, π]
pub fn roll(dcm: &Matrix3<f32>, conventions: &Conventions) -> f32 {
    let cells = roll_cells(conventions.roll);
    let reference = conventions.roll_reference.factor() * dcm[cells.denominator];
    cells.sign * RealField::atan2(dcm[cells.numerator], reference)
}

/// Yaw in radians; this one is not configurable
pub fn yaw(dcm: &Matrix3<f32>) -> f32 {
    RealField::atan2(dcm[(1, 0)], dcm[(0, 0)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Polarity;
    use nalgebra::Rotation3;

    #[test]
    fn test_identity_is_zero() {
        let conventions = Conventions::default();
        let dcm = Matrix3::identity();
        assert_eq!(pitch(&dcm, &conventions), 0.0);
        assert_eq!(roll(&dcm, &conventions), 0.0);
        assert_eq!(yaw(&dcm), 0.0);
    }

    #[test]
    fn test_default_convention_matches_zyx() {
        let dcm = Rotation3::from_euler_angles(0.4f32, -0.3, 1.1).into_inner();
        let conventions = Conventions::default();

        assert!((roll(&dcm, &conventions) - 0.4).abs() < 1e-5);
        assert!((pitch(&dcm, &conventions) + 0.3).abs() < 1e-5);
        assert!((yaw(&dcm) - 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_pitch_overshoot_is_clamped() {
        let mut dcm = Matrix3::identity();
        dcm[(2, 0)] = -1.000_3;

        let value = pitch(&dcm, &Conventions::default());
        assert!(!value.is_nan());
        assert!((value - core::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_polarities() {
        let dcm = Rotation3::from_euler_angles(0.4f32, -0.3, 0.0).into_inner();
        let flipped = Conventions {
            pitch_polarity: Polarity::Negative,
            ..Default::default()
        };
        assert!((pitch(&dcm, &flipped) - 0.3).abs() < 1e-5);

        // Upside-down reference axis reads roll from the other half plane
        let upside_down = Conventions {
            roll_reference: Polarity::Negative,
            ..Default::default()
        };
        let expected = core::f32::consts::PI - 0.4;
        assert!((roll(&dcm, &upside_down) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_every_roll_cell_avoids_its_pitch_column() {
        for orientation in RollOrientation::ALL {
            let cells = roll_cells(orientation);
            let pitch = pitch_cell(orientation.pitch_orientation());
            assert_ne!(cells.numerator.1, pitch.col);
            assert_ne!(cells.denominator.1, pitch.col);
            assert_ne!(cells.numerator, cells.denominator);
        }
    }
}
