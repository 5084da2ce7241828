#![warn(missing_docs)]

//! Math types for pathplace.
//!
//! Thin wrappers around nalgebra providing the point, vector and transform
//! types used when laying repeated objects out along a path, plus the
//! tolerance constants and heading helpers shared by the other crates.

use nalgebra::{Matrix4, Unit, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Rotation about the vertical (Z) axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Model transform for an object standing at `position` and turned
    /// `heading_degrees` about the vertical axis.
    ///
    /// The object is rotated about its own origin first, then moved.
    pub fn placement(position: &Point3, heading_degrees: f64) -> Self {
        Self::translation(position.x, position.y, position.z)
            .then(&Self::rotation_z(heading_degrees.to_radians()))
    }

    /// Compose: `self` then `other` (self * other).
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Column-major copy of the matrix, the layout scene engines expect.
    pub fn to_cols_array(&self) -> [f64; 16] {
        let mut out = [0.0; 16];
        out.copy_from_slice(self.matrix.as_slice());
        out
    }
}

/// Planar heading in degrees of the horizontal displacement `(dx, dy)`.
///
/// Measured counter-clockwise from the +X axis, in `(-180, 180]`. Any vertical
/// component of the displacement is irrelevant to the result.
pub fn heading_degrees(dx: f64, dy: f64) -> f64 {
    dy.atan2(dx).to_degrees()
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in the unit being compared.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-9 linear).
    pub const DEFAULT: Self = Self { linear: 1e-9 };

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn apply(t: &Transform, p: Point3) -> Point3 {
        t.matrix.transform_point(&p)
    }

    #[test]
    fn test_translation() {
        let t = Transform::translation(10.0, 20.0, 30.0);
        let result = apply(&t, Point3::new(1.0, 2.0, 3.0));
        assert!((result.x - 11.0).abs() < 1e-12);
        assert!((result.y - 22.0).abs() < 1e-12);
        assert!((result.z - 33.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_z_90() {
        let t = Transform::rotation_z(PI / 2.0);
        let result = apply(&t, Point3::new(1.0, 0.0, 0.0));
        assert!(result.x.abs() < 1e-12);
        assert!((result.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_placement_rotates_then_translates() {
        let t = Transform::placement(&Point3::new(5.0, 5.0, 2.0), 90.0);
        // the object's local +X axis ends up pointing along world +Y
        let tip = apply(&t, Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(tip.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(tip.y, 6.0, epsilon = 1e-12);
        assert_relative_eq!(tip.z, 2.0, epsilon = 1e-12);

        let origin = apply(&t, Point3::origin());
        assert_relative_eq!(origin, Point3::new(5.0, 5.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn test_cols_array_is_column_major() {
        let t = Transform::translation(1.0, 2.0, 3.0);
        let cols = t.to_cols_array();
        assert_eq!(&cols[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(cols[15], 1.0);
    }

    #[test]
    fn test_heading_quadrants() {
        assert_relative_eq!(heading_degrees(1.0, 0.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(heading_degrees(0.0, 1.0), 90.0, epsilon = 1e-12);
        assert_relative_eq!(heading_degrees(-1.0, 0.0), 180.0, epsilon = 1e-12);
        assert_relative_eq!(heading_degrees(0.0, -1.0), -90.0, epsilon = 1e-12);
        assert_relative_eq!(heading_degrees(1.0, 1.0), 45.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tolerance_is_zero() {
        let tol = Tolerance::DEFAULT;
        assert!(tol.is_zero(0.0));
        assert!(tol.is_zero(-1e-12));
        assert!(!tol.is_zero(1e-6));
    }
}
