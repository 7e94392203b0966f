//! Row-major 4x4 transform matrix.
//!
//! Conventions:
//! - `m[row][col]`, translation in the last column.
//! - Composition is right-to-left: `global = parent * local`.
//! - Affine products keep the bottom row `[0, 0, 0, 1]`; nothing stops a
//!   caller from building a general linear map by hand.

use serde::{Deserialize, Serialize};

use crate::error::DegenerateMatrixError;
use crate::quat::Quat;
use crate::vec3::Vec3;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    #[inline]
    pub const fn from_rows(m: [[f32; 4]; 4]) -> Self {
        Self { m }
    }

    /// Scale transform with implicit identity elsewhere.
    pub fn from_scale(sx: f32, sy: f32, sz: f32) -> Self {
        Self::from_rows([
            [sx, 0.0, 0.0, 0.0],
            [0.0, sy, 0.0, 0.0],
            [0.0, 0.0, sz, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Translation transform with implicit identity elsewhere.
    pub fn from_translation(x: f32, y: f32, z: f32) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Orthonormal camera/orientation basis from a forward and an up vector.
    ///
    /// Both inputs are normalized; `right = up x forward`,
    /// `true_up = forward x right`. Rows of the result are
    /// `right, true_up, forward`, translation zero.
    pub fn from_basis(forward: Vec3, up: Vec3) -> Self {
        let n = forward.normalized();
        let u = up.normalized().cross(n);
        let v = n.cross(u);
        Self::from_rows([
            [u.x, u.y, u.z, 0.0],
            [v.x, v.y, v.z, 0.0],
            [n.x, n.y, n.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation matrix from a unit quaternion (x, y, z, w).
    pub fn from_quat(q: Quat) -> Self {
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, yy, zz) = (x * x2, y * y2, z * z2);
        let (xy, xz, yz) = (x * y2, x * z2, y * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);
        Self::from_rows([
            [1.0 - (yy + zz), xy - wz, xz + wy, 0.0],
            [xy + wz, 1.0 - (xx + zz), yz - wx, 0.0],
            [xz - wy, yz + wx, 1.0 - (xx + yy), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Transform a point (implicit w = 1).
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z + m[0][3],
            m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z + m[1][3],
            m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z + m[2][3],
        )
    }

    /// Closed-form determinant by cofactor expansion over all 24 permutation
    /// terms. Pure; no tolerance is applied.
    #[rustfmt::skip]
    pub fn determinant(&self) -> f32 {
        let m = &self.m;
        m[0][0]*m[1][1]*m[2][2]*m[3][3] - m[0][0]*m[1][1]*m[2][3]*m[3][2] + m[0][0]*m[1][2]*m[2][3]*m[3][1] - m[0][0]*m[1][2]*m[2][1]*m[3][3]
            + m[0][0]*m[1][3]*m[2][1]*m[3][2] - m[0][0]*m[1][3]*m[2][2]*m[3][1] - m[0][1]*m[1][2]*m[2][3]*m[3][0] + m[0][1]*m[1][2]*m[2][0]*m[3][3]
            - m[0][1]*m[1][3]*m[2][0]*m[3][2] + m[0][1]*m[1][3]*m[2][2]*m[3][0] - m[0][1]*m[1][0]*m[2][2]*m[3][3] + m[0][1]*m[1][0]*m[2][3]*m[3][2]
            + m[0][2]*m[1][3]*m[2][0]*m[3][1] - m[0][2]*m[1][3]*m[2][1]*m[3][0] + m[0][2]*m[1][0]*m[2][1]*m[3][3] - m[0][2]*m[1][0]*m[2][3]*m[3][1]
            + m[0][2]*m[1][1]*m[2][3]*m[3][0] - m[0][2]*m[1][1]*m[2][0]*m[3][3] - m[0][3]*m[1][0]*m[2][1]*m[3][2] + m[0][3]*m[1][0]*m[2][2]*m[3][1]
            - m[0][3]*m[1][1]*m[2][2]*m[3][0] + m[0][3]*m[1][1]*m[2][0]*m[3][2] - m[0][3]*m[1][2]*m[2][0]*m[3][1] + m[0][3]*m[1][2]*m[2][1]*m[3][0]
    }

    /// Exact inverse via the adjugate scaled by `1/det`.
    ///
    /// Zero determinant is reported as [`DegenerateMatrixError`]; the matrix
    /// is left untouched in that case.
    #[rustfmt::skip]
    pub fn inverse(&self) -> Result<Mat4, DegenerateMatrixError> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(DegenerateMatrixError);
        }
        let invdet = det.recip();
        let m = &self.m;

        let mut r = [[0.0f32; 4]; 4];
        r[0][0] =  invdet * (m[1][1] * (m[2][2] * m[3][3] - m[2][3] * m[3][2]) + m[1][2] * (m[2][3] * m[3][1] - m[2][1] * m[3][3]) + m[1][3] * (m[2][1] * m[3][2] - m[2][2] * m[3][1]));
        r[0][1] = -invdet * (m[0][1] * (m[2][2] * m[3][3] - m[2][3] * m[3][2]) + m[0][2] * (m[2][3] * m[3][1] - m[2][1] * m[3][3]) + m[0][3] * (m[2][1] * m[3][2] - m[2][2] * m[3][1]));
        r[0][2] =  invdet * (m[0][1] * (m[1][2] * m[3][3] - m[1][3] * m[3][2]) + m[0][2] * (m[1][3] * m[3][1] - m[1][1] * m[3][3]) + m[0][3] * (m[1][1] * m[3][2] - m[1][2] * m[3][1]));
        r[0][3] = -invdet * (m[0][1] * (m[1][2] * m[2][3] - m[1][3] * m[2][2]) + m[0][2] * (m[1][3] * m[2][1] - m[1][1] * m[2][3]) + m[0][3] * (m[1][1] * m[2][2] - m[1][2] * m[2][1]));
        r[1][0] = -invdet * (m[1][0] * (m[2][2] * m[3][3] - m[2][3] * m[3][2]) + m[1][2] * (m[2][3] * m[3][0] - m[2][0] * m[3][3]) + m[1][3] * (m[2][0] * m[3][2] - m[2][2] * m[3][0]));
        r[1][1] =  invdet * (m[0][0] * (m[2][2] * m[3][3] - m[2][3] * m[3][2]) + m[0][2] * (m[2][3] * m[3][0] - m[2][0] * m[3][3]) + m[0][3] * (m[2][0] * m[3][2] - m[2][2] * m[3][0]));
        r[1][2] = -invdet * (m[0][0] * (m[1][2] * m[3][3] - m[1][3] * m[3][2]) + m[0][2] * (m[1][3] * m[3][0] - m[1][0] * m[3][3]) + m[0][3] * (m[1][0] * m[3][2] - m[1][2] * m[3][0]));
        r[1][3] =  invdet * (m[0][0] * (m[1][2] * m[2][3] - m[1][3] * m[2][2]) + m[0][2] * (m[1][3] * m[2][0] - m[1][0] * m[2][3]) + m[0][3] * (m[1][0] * m[2][2] - m[1][2] * m[2][0]));
        r[2][0] =  invdet * (m[1][0] * (m[2][1] * m[3][3] - m[2][3] * m[3][1]) + m[1][1] * (m[2][3] * m[3][0] - m[2][0] * m[3][3]) + m[1][3] * (m[2][0] * m[3][1] - m[2][1] * m[3][0]));
        r[2][1] = -invdet * (m[0][0] * (m[2][1] * m[3][3] - m[2][3] * m[3][1]) + m[0][1] * (m[2][3] * m[3][0] - m[2][0] * m[3][3]) + m[0][3] * (m[2][0] * m[3][1] - m[2][1] * m[3][0]));
        r[2][2] =  invdet * (m[0][0] * (m[1][1] * m[3][3] - m[1][3] * m[3][1]) + m[0][1] * (m[1][3] * m[3][0] - m[1][0] * m[3][3]) + m[0][3] * (m[1][0] * m[3][1] - m[1][1] * m[3][0]));
        r[2][3] = -invdet * (m[0][0] * (m[1][1] * m[2][3] - m[1][3] * m[2][1]) + m[0][1] * (m[1][3] * m[2][0] - m[1][0] * m[2][3]) + m[0][3] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]));
        r[3][0] = -invdet * (m[1][0] * (m[2][1] * m[3][2] - m[2][2] * m[3][1]) + m[1][1] * (m[2][2] * m[3][0] - m[2][0] * m[3][2]) + m[1][2] * (m[2][0] * m[3][1] - m[2][1] * m[3][0]));
        r[3][1] =  invdet * (m[0][0] * (m[2][1] * m[3][2] - m[2][2] * m[3][1]) + m[0][1] * (m[2][2] * m[3][0] - m[2][0] * m[3][2]) + m[0][2] * (m[2][0] * m[3][1] - m[2][1] * m[3][0]));
        r[3][2] = -invdet * (m[0][0] * (m[1][1] * m[3][2] - m[1][2] * m[3][1]) + m[0][1] * (m[1][2] * m[3][0] - m[1][0] * m[3][2]) + m[0][2] * (m[1][0] * m[3][1] - m[1][1] * m[3][0]));
        r[3][3] =  invdet * (m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1]) + m[0][1] * (m[1][2] * m[2][0] - m[1][0] * m[2][2]) + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0]));

        Ok(Mat4::from_rows(r))
    }

    /// In-place variant of [`Mat4::inverse`].
    pub fn invert(&mut self) -> Result<(), DegenerateMatrixError> {
        *self = self.inverse()?;
        Ok(())
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [[0.0f32; 4]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.m[i][0] * rhs.m[0][j]
                    + self.m[i][1] * rhs.m[1][j]
                    + self.m[i][2] * rhs.m[2][j]
                    + self.m[i][3] * rhs.m[3][j];
            }
        }
        Mat4::from_rows(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_identity(m: &Mat4, eps: f32) {
        for i in 0..4 {
            for j in 0..4 {
                let want = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (m.m[i][j] - want).abs() <= eps,
                    "m[{i}][{j}] = {} (want {want})",
                    m.m[i][j]
                );
            }
        }
    }

    #[test]
    fn determinant_identity_is_one() {
        assert_eq!(Mat4::IDENTITY.determinant(), 1.0);
    }

    #[test]
    fn determinant_of_scale_is_product() {
        let s = Mat4::from_scale(2.0, 3.0, 4.0);
        assert_eq!(s.determinant(), 24.0);
    }

    #[test]
    fn inverse_round_trips_to_identity() {
        let m = Mat4::from_translation(1.0, -2.0, 3.5)
            * Mat4::from_quat(Quat::from_axis_angle(
                Vec3::new(0.0, 1.0, 0.0),
                std::f32::consts::FRAC_PI_3,
            ))
            * Mat4::from_scale(2.0, 0.5, 1.25);
        let inv = m.inverse().unwrap();
        approx_identity(&(m * inv), 1e-4);
    }

    #[test]
    fn inverse_of_singular_is_an_error() {
        let singular = Mat4::from_scale(1.0, 0.0, 1.0);
        assert_eq!(singular.inverse(), Err(DegenerateMatrixError));
        // In-place variant must leave the matrix untouched.
        let mut m = singular;
        assert!(m.invert().is_err());
        assert_eq!(m, singular);
    }

    #[test]
    fn translation_composes_additively() {
        let a = Mat4::from_translation(1.0, 0.0, 0.0);
        let b = Mat4::from_translation(2.0, 0.0, 0.0);
        let p = (a * b).transform_point(Vec3::ZERO);
        assert_eq!(p, Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn basis_rows_are_orthonormal() {
        let m = Mat4::from_basis(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 1.0, 0.0));
        // forward normalizes to +z; right = up x forward = +x; true_up = +y
        approx_identity(&m, 1e-6);
    }

    #[test]
    fn affine_product_keeps_bottom_row() {
        let m = Mat4::from_translation(4.0, 5.0, 6.0) * Mat4::from_scale(2.0, 2.0, 2.0);
        assert_eq!(m.m[3], [0.0, 0.0, 0.0, 1.0]);
    }
}
