//! Re-orthonormalization of the direction cosine matrix
//!
//! Linear integration leaves the rows slightly skewed and off unit length.
//! The correction here is a linearized Gram-Schmidt step followed by the cheap
//! renormalization from [`Vector3Ext::renormalize`]. Both are only accurate
//! close to an orthonormal matrix, so the correction has to run after every
//! integration step.

use nalgebra::Matrix3;

use crate::math::{Matrix3Ext, Vector3Ext};

/// Restore orthonormality of `dcm` in place
///
/// Half of the row 0/row 1 dot product is pushed back into each row, row 2 is
/// rebuilt as `row0 × row1` (which restores right-handedness exactly), and
/// every row is scaled back towards unit length.
pub fn orthonormalize(dcm: &mut Matrix3<f32>) {
    let row0 = dcm.row_vector(0);
    let row1 = dcm.row_vector(1);

    let error = -0.5 * row0.dot(&row1);

    let x = row0 + row1 * error;
    let y = row1 + row0 * error;
    let z = x.cross(&y);

    dcm.set_row_vector(0, &x.renormalize());
    dcm.set_row_vector(1, &y.renormalize());
    dcm.set_row_vector(2, &z.renormalize());
}
