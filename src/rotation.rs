//! The rotation capability that [`Rigid3`](crate::Rigid3) is generic over.
//!
//! [`Rigid3`](crate::Rigid3) never reaches into the internals of its rotation. Everything it
//! needs (composition, inversion, rotating a vector, and conversion to and from a 3×3 matrix) is
//! described by [`UnitRotation`], so the transform works the same whether the rotation is stored
//! as a [unit quaternion](nalgebra::UnitQuaternion) (the default, see [`Rigid3d`](crate::Rigid3d))
//! or as a [rotation matrix](nalgebra::Rotation3).

use crate::{Matrix3, Vector3};
use nalgebra::{Rotation3, Unit, UnitQuaternion};
use std::fmt::Debug;
use uom::si::angle::radian;
use uom::si::f64::Angle;

/// A proper rotation in three dimensions.
///
/// Implementors must represent rotations with unit norm (ie, no scaling and no reflection).
/// Composition follows the usual operator convention: `a.compose(&b)` is the rotation that first
/// applies `b` and then `a`.
pub trait UnitRotation: Copy + PartialEq + Debug {
    /// The rotation that maps every vector onto itself.
    fn identity() -> Self;

    /// Returns `self ∘ rhs`, ie, the rotation that applies `rhs` first and `self` second.
    #[must_use]
    fn compose(&self, rhs: &Self) -> Self;

    /// Returns the equal-but-opposite rotation.
    #[must_use]
    fn inverse(&self) -> Self;

    /// Rotates `v`.
    #[must_use]
    fn rotate(&self, v: &Vector3) -> Vector3;

    /// Returns the equivalent 3×3 rotation matrix.
    #[must_use]
    fn to_rotation_matrix(&self) -> Matrix3;

    /// Constructs the rotation closest to the given 3×3 matrix.
    ///
    /// The matrix does not have to be perfectly orthonormal; it is projected onto the nearest
    /// valid rotation.
    fn from_rotation_matrix(matrix: &Matrix3) -> Self;

    /// Returns the unit quaternion coefficients of this rotation in `[x, y, z, w]` order.
    #[must_use]
    fn coeffs_xyzw(&self) -> [f64; 4];

    /// Returns the coefficients exactly as this representation stores them.
    ///
    /// Two rotations with equal stored coefficients are the same value; the converse does not
    /// hold (eg, `q` and `-q` store different coefficients for the same rotation).
    fn stored_coeffs(&self) -> &[f64];

    /// Constructs a rotation by `angle` about `axis`.
    ///
    /// To determine the direction of rotation, use the [right-hand rule for rotations][rhrot]:
    /// with your thumb along the positive direction of `axis`, positive angles rotate in the
    /// direction your fingers curl.
    ///
    /// [rhrot]: https://en.wikipedia.org/wiki/Right-hand_rule#Rotations
    fn about_axis(axis: &Unit<Vector3>, angle: impl Into<Angle>) -> Self;
}

/// Projects `matrix` onto the closest rotation.
///
/// The iterative projection is seeded with the direct conversion of `matrix`; seeded with the
/// identity it stalls on half-turns.
fn nearest_rotation(matrix: &Matrix3) -> Rotation3<f64> {
    let direct = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(*matrix));
    let seed = UnitQuaternion::new_normalize(direct.into_inner()).to_rotation_matrix();
    Rotation3::from_matrix_eps(matrix, f64::EPSILON, 64, seed)
}

impl UnitRotation for UnitQuaternion<f64> {
    fn identity() -> Self {
        UnitQuaternion::identity()
    }

    fn compose(&self, rhs: &Self) -> Self {
        // long chains of products drift off the unit sphere, so pull the result back onto it
        let mut product = self * rhs;
        product.renormalize();
        product
    }

    fn inverse(&self) -> Self {
        UnitQuaternion::inverse(self)
    }

    fn rotate(&self, v: &Vector3) -> Vector3 {
        self.transform_vector(v)
    }

    fn to_rotation_matrix(&self) -> Matrix3 {
        UnitQuaternion::to_rotation_matrix(*self).into_inner()
    }

    fn from_rotation_matrix(matrix: &Matrix3) -> Self {
        UnitQuaternion::from_rotation_matrix(&nearest_rotation(matrix))
    }

    fn coeffs_xyzw(&self) -> [f64; 4] {
        let q = self.quaternion();
        [q.i, q.j, q.k, q.w]
    }

    fn stored_coeffs(&self) -> &[f64] {
        self.coords.as_slice()
    }

    fn about_axis(axis: &Unit<Vector3>, angle: impl Into<Angle>) -> Self {
        UnitQuaternion::from_axis_angle(axis, angle.into().get::<radian>())
    }
}

impl UnitRotation for Rotation3<f64> {
    fn identity() -> Self {
        Rotation3::identity()
    }

    fn compose(&self, rhs: &Self) -> Self {
        self * rhs
    }

    fn inverse(&self) -> Self {
        Rotation3::inverse(self)
    }

    fn rotate(&self, v: &Vector3) -> Vector3 {
        self.transform_vector(v)
    }

    fn to_rotation_matrix(&self) -> Matrix3 {
        *self.matrix()
    }

    fn from_rotation_matrix(matrix: &Matrix3) -> Self {
        nearest_rotation(matrix)
    }

    fn coeffs_xyzw(&self) -> [f64; 4] {
        UnitQuaternion::from_rotation_matrix(self).coeffs_xyzw()
    }

    fn stored_coeffs(&self) -> &[f64] {
        self.matrix().as_slice()
    }

    fn about_axis(axis: &Unit<Vector3>, angle: impl Into<Angle>) -> Self {
        Rotation3::from_axis_angle(axis, angle.into().get::<radian>())
    }
}

#[cfg(test)]
mod tests {
    use crate::rotation::UnitRotation;
    use crate::{Matrix3, Vector3};
    use approx::assert_relative_eq;
    use nalgebra::{Rotation3, UnitQuaternion};
    use rstest::rstest;
    use uom::si::angle::degree;
    use uom::si::f64::Angle;

    fn d(degrees: f64) -> Angle {
        Angle::new::<degree>(degrees)
    }

    #[test]
    fn identity_coefficients_are_xyzw() {
        assert_eq!(
            <UnitQuaternion<f64> as UnitRotation>::identity().coeffs_xyzw(),
            [0., 0., 0., 1.]
        );
        assert_eq!(
            <Rotation3<f64> as UnitRotation>::identity().coeffs_xyzw(),
            [0., 0., 0., 1.]
        );
    }

    #[rstest]
    // right-hand rule: +90° about X takes Y to Z and Z to -Y
    #[case(Vector3::x_axis(), Vector3::new(0., 1., 0.), Vector3::new(0., 0., 1.))]
    #[case(Vector3::x_axis(), Vector3::new(0., 0., 1.), Vector3::new(0., -1., 0.))]
    #[case(Vector3::y_axis(), Vector3::new(0., 0., 1.), Vector3::new(1., 0., 0.))]
    #[case(Vector3::z_axis(), Vector3::new(1., 0., 0.), Vector3::new(0., 1., 0.))]
    fn quarter_turns_follow_right_hand_rule(
        #[case] axis: nalgebra::Unit<Vector3>,
        #[case] input: Vector3,
        #[case] expected: Vector3,
    ) {
        let q = <UnitQuaternion<f64> as UnitRotation>::about_axis(&axis, d(90.));
        let r = <Rotation3<f64> as UnitRotation>::about_axis(&axis, d(90.));
        assert_relative_eq!(q.rotate(&input), expected, epsilon = 1e-12);
        assert_relative_eq!(r.rotate(&input), expected, epsilon = 1e-12);
    }

    #[test]
    fn compose_applies_right_hand_side_first() {
        let about_x = <UnitQuaternion<f64> as UnitRotation>::about_axis(&Vector3::x_axis(), d(90.));
        let about_z = <UnitQuaternion<f64> as UnitRotation>::about_axis(&Vector3::z_axis(), d(90.));

        // X first: (1, 0, 0) stays put, then Z takes it to (0, 1, 0)
        let v = Vector3::new(1., 0., 0.);
        assert_relative_eq!(
            about_z.compose(&about_x).rotate(&v),
            about_z.rotate(&about_x.rotate(&v)),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            about_z.compose(&about_x).rotate(&v),
            Vector3::new(0., 1., 0.),
            epsilon = 1e-12
        );
    }

    #[test]
    fn composed_quaternion_stays_unit() {
        let step = <UnitQuaternion<f64> as UnitRotation>::about_axis(
            &nalgebra::Unit::new_normalize(Vector3::new(1., 2., 3.)),
            d(0.7),
        );
        let mut acc = <UnitQuaternion<f64> as UnitRotation>::identity();
        for _ in 0..10_000 {
            acc = acc.compose(&step);
        }
        assert_relative_eq!(acc.quaternion().norm(), 1., epsilon = 1e-12);
    }

    #[test]
    fn inverse_undoes_rotation() {
        let r = <UnitQuaternion<f64> as UnitRotation>::about_axis(
            &nalgebra::Unit::new_normalize(Vector3::new(-1., 0.5, 2.)),
            d(123.),
        );
        let v = Vector3::new(0.3, -0.2, 0.9);
        assert_relative_eq!(r.inverse().rotate(&r.rotate(&v)), v, epsilon = 1e-12);
    }

    #[test]
    fn matrix_roundtrip_matches_both_representations() {
        let axis = nalgebra::Unit::new_normalize(Vector3::new(0.2, -0.4, 1.));
        let q = <UnitQuaternion<f64> as UnitRotation>::about_axis(&axis, d(-64.));
        let r = <Rotation3<f64> as UnitRotation>::about_axis(&axis, d(-64.));

        assert_relative_eq!(
            UnitRotation::to_rotation_matrix(&q),
            UnitRotation::to_rotation_matrix(&r),
            epsilon = 1e-12
        );

        let q2 = <UnitQuaternion<f64> as UnitRotation>::from_rotation_matrix(
            &UnitRotation::to_rotation_matrix(&q),
        );
        let v = Vector3::new(1., 2., 3.);
        assert_relative_eq!(q2.rotate(&v), q.rotate(&v), epsilon = 1e-9);
    }

    #[rstest]
    #[case(Vector3::x_axis())]
    #[case(Vector3::y_axis())]
    #[case(Vector3::z_axis())]
    fn half_turns_survive_matrix_roundtrip(#[case] axis: nalgebra::Unit<Vector3>) {
        let q = <UnitQuaternion<f64> as UnitRotation>::about_axis(&axis, d(180.));
        let q2 = <UnitQuaternion<f64> as UnitRotation>::from_rotation_matrix(
            &UnitRotation::to_rotation_matrix(&q),
        );
        let v = Vector3::new(0.5, -1., 2.);
        assert_relative_eq!(q2.rotate(&v), q.rotate(&v), epsilon = 1e-9);
    }

    #[test]
    fn from_rotation_matrix_projects_onto_rotations() {
        // slightly scaled and sheared rotation about Z
        let noisy = Matrix3::new(0.0, -1.01, 0.0, 0.99, 0.01, 0.0, 0.0, 0.0, 1.02);
        let r = <Rotation3<f64> as UnitRotation>::from_rotation_matrix(&noisy);
        let m = UnitRotation::to_rotation_matrix(&r);
        assert_relative_eq!(m * m.transpose(), Matrix3::identity(), epsilon = 1e-9);
        assert_relative_eq!(m.determinant(), 1., epsilon = 1e-9);
        assert_relative_eq!(
            r.rotate(&Vector3::new(1., 0., 0.)),
            Vector3::new(0., 1., 0.),
            epsilon = 5e-2
        );
    }
}
