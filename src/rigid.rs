//! Rigid body transforms between two coordinate frames.
//!
//! The main type provided by this module is [`Rigid3`], which describes the isometry (ie,
//! rotation and translation) that takes points expressed in a source frame `A` to the same
//! points expressed in a destination frame `B`:
//!
//! ```text
//! x_in_b = rotation * x_in_a + translation
//! ```
//!
//! Transforms are plain values. They can be multiplied with points to apply them, multiplied
//! with each other to chain them, and inverted to go the other way. Naming variables after the
//! frames they connect (`b_from_a`, `c_from_b`, ...) makes chains easy to check by eye, since
//! adjacent frame names cancel out:
//!
//! ```text
//! c_from_a = c_from_b * b_from_a
//! ```

use crate::rotation::UnitRotation;
use crate::{Matrix3x4, Matrix4, Matrix6, Point3, Vector3};
use nalgebra::UnitQuaternion;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::{Mul, Neg};

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rigid body transform (element of SE(3)) using a unit quaternion for its rotation.
pub type Rigid3d = Rigid3<UnitQuaternion<f64>>;

/// Defines a [rigid body transform] from a source frame `A` into a destination frame `B`.
///
/// The transform is stored as the `rotation` and `translation` that must be applied, in that
/// order, to a point in `A` to obtain the same point in `B`. Both fields are public and are
/// stored exactly as given; in particular, nothing renormalizes `rotation` on construction.
///
/// The rotation representation is pluggable through [`UnitRotation`]. Most code will want
/// [`Rigid3d`], which uses a unit quaternion.
///
/// ```
/// use nalgebra::{UnitQuaternion, Vector3};
/// use rigid3::{Rigid3d, UnitRotation};
/// use uom::si::{angle::degree, f64::Angle};
///
/// let b_from_a = Rigid3d::new(
///     UnitQuaternion::<f64>::about_axis(&Vector3::z_axis(), Angle::new::<degree>(90.)),
///     Vector3::new(0., 0., 1.),
/// );
/// let c_from_b = Rigid3d::from_translation(Vector3::new(1., 0., 0.));
///
/// let x_in_a = Vector3::new(1., 0., 0.);
/// let c_from_a = c_from_b * b_from_a;
/// assert!((c_from_a * x_in_a - c_from_b * (b_from_a * x_in_a)).norm() < 1e-12);
/// assert!((c_from_a * x_in_a - Vector3::new(1., 1., 1.)).norm() < 1e-12);
/// ```
///
/// <div class="warning">
///
/// `==` compares the stored representation exactly and without tolerance, so two transforms
/// with the same effect on points need not compare equal (a quaternion `q` and its negation
/// `-q` are the same rotation, for example). Use the [`approx`] traits or compare the effect on
/// points when a tolerance is wanted.
///
/// </div>
///
/// [rigid body transform]: https://en.wikipedia.org/wiki/Rigid_transformation
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rigid3<R = UnitQuaternion<f64>> {
    pub rotation: R,
    pub translation: Vector3,
}

impl<R: UnitRotation> Default for Rigid3<R> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<R: UnitRotation> Rigid3<R> {
    /// Constructs a transform from its rotation and translation.
    ///
    /// The rotation is applied first, so points map as `rotation * x + translation`.
    #[must_use]
    pub fn new(rotation: R, translation: Vector3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Returns the transform that maps every point onto itself.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(R::identity(), Vector3::zeros())
    }

    /// Constructs a transform that only rotates.
    #[must_use]
    pub fn from_rotation(rotation: R) -> Self {
        Self::new(rotation, Vector3::zeros())
    }

    /// Constructs a transform that only translates.
    #[must_use]
    pub fn from_translation(translation: Vector3) -> Self {
        Self::new(R::identity(), translation)
    }

    /// Constructs a transform from the 3×4 matrix `[R | t]`.
    ///
    /// The leading 3×3 block is projected onto the nearest rotation, so the result acts on
    /// points like the matrix does even if the block has accumulated some numerical noise, but
    /// its rotation need not be bit-identical to the one the matrix was produced from.
    ///
    /// See [`Rigid3::try_from_matrix`] for a variant that rejects matrices without a meaningful
    /// rotation block.
    #[must_use]
    pub fn from_matrix(matrix: &Matrix3x4) -> Self {
        let rotation = R::from_rotation_matrix(&matrix.fixed_view::<3, 3>(0, 0).into_owned());
        let translation = matrix.fixed_view::<3, 1>(0, 3).into_owned();
        Self::new(rotation, translation)
    }

    /// Like [`Rigid3::from_matrix`], but returns `None` if `matrix` contains non-finite entries
    /// or if its leading 3×3 block does not preserve orientation (ie, has a non-positive
    /// determinant), in which case there is no sensible rotation to project onto.
    #[must_use]
    pub fn try_from_matrix(matrix: &Matrix3x4) -> Option<Self> {
        if !matrix.iter().all(|v| v.is_finite()) {
            return None;
        }
        if matrix.fixed_view::<3, 3>(0, 0).into_owned().determinant() <= 0. {
            return None;
        }
        Some(Self::from_matrix(matrix))
    }

    /// Returns the 3×4 matrix `[R | t]`.
    ///
    /// Multiplying this matrix with a point in homogeneous coordinates (ie, with a `1` appended)
    /// is equivalent to applying the transform to the point.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix3x4 {
        let mut matrix = Matrix3x4::zeros();
        matrix
            .fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&self.rotation.to_rotation_matrix());
        matrix.set_column(3, &self.translation);
        matrix
    }

    /// Returns the 4×4 homogeneous matrix, ie, [`Rigid3::to_matrix`] with a `[0, 0, 0, 1]` row
    /// appended.
    #[must_use]
    pub fn to_homogeneous(&self) -> Matrix4 {
        let mut matrix = Matrix4::identity();
        matrix
            .fixed_view_mut::<3, 4>(0, 0)
            .copy_from(&self.to_matrix());
        matrix
    }

    /// Returns the equal-but-opposite transform to this one.
    ///
    /// That is, for `b_from_a`, returns `a_from_b`.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self::new(rotation, -rotation.rotate(&self.translation))
    }

    /// Chains two transforms to produce a new transform that goes directly from this transform's
    /// source frame to `rhs`'s destination frame.
    ///
    /// This is `rhs * self`, written in the order the transforms are applied:
    ///
    /// ```
    /// use nalgebra::Vector3;
    /// use rigid3::Rigid3d;
    ///
    /// let b_from_a = Rigid3d::from_translation(Vector3::new(1., 0., 0.));
    /// let c_from_b = Rigid3d::from_translation(Vector3::new(0., 2., 0.));
    ///
    /// assert_eq!(b_from_a.and_then(c_from_b), c_from_b * b_from_a);
    /// ```
    #[must_use]
    pub fn and_then(self, rhs: Self) -> Self {
        rhs * self
    }

    /// Transforms a point from the source frame into the destination frame.
    ///
    /// This is exactly `self * x`.
    #[doc(alias = "apply")]
    pub fn transform<T>(&self, x: T) -> <Self as Mul<T>>::Output
    where
        Self: Mul<T>,
    {
        *self * x
    }

    /// Transforms a point from the destination frame back into the source frame.
    ///
    /// This is equivalent to (but cheaper than) first inverting the transform with
    /// [`Rigid3::inverse`] and then applying it.
    #[doc(alias = "undo")]
    #[must_use]
    pub fn inverse_transform(&self, x: &Vector3) -> Vector3 {
        self.rotation.inverse().rotate(&(x - self.translation))
    }

    /// Returns the origin of the destination frame expressed in the source frame.
    ///
    /// For a camera pose `cam_from_world`, this is the camera center in world coordinates.
    #[must_use]
    pub fn target_origin_in_source(&self) -> Vector3 {
        self.inverse_transform(&Vector3::zeros())
    }

    /// Returns the adjoint of this transform.
    ///
    /// The adjoint maps a tangent-space perturbation applied on the right of the transform to
    /// the equivalent perturbation applied on the left, ie, `T · Exp(δ) = Exp(Ad_T δ) · T`.
    /// Tangent vectors use rotation-first order `[ω, v]`, which gives
    ///
    /// ```text
    /// Ad_T = | R      0 |
    ///        | [t]ₓR  R |
    /// ```
    ///
    /// where `[t]ₓ` is the cross-product matrix of the translation.
    #[must_use]
    pub fn adjoint(&self) -> Matrix6 {
        let rotation = self.rotation.to_rotation_matrix();
        let mut adjoint = Matrix6::zeros();
        adjoint.fixed_view_mut::<3, 3>(0, 0).copy_from(&rotation);
        adjoint
            .fixed_view_mut::<3, 3>(3, 0)
            .copy_from(&(self.translation.cross_matrix() * rotation));
        adjoint.fixed_view_mut::<3, 3>(3, 3).copy_from(&rotation);
        adjoint
    }

    /// Returns the inverse of [`Rigid3::adjoint`], which is also the adjoint of
    /// [`Rigid3::inverse`]:
    ///
    /// ```text
    /// Ad_T⁻¹ = | Rᵀ         0  |
    ///          | -Rᵀ[t]ₓ    Rᵀ |
    /// ```
    #[must_use]
    pub fn adjoint_inverse(&self) -> Matrix6 {
        let rotation_t = self.rotation.to_rotation_matrix().transpose();
        let mut adjoint = Matrix6::zeros();
        adjoint.fixed_view_mut::<3, 3>(0, 0).copy_from(&rotation_t);
        adjoint
            .fixed_view_mut::<3, 3>(3, 0)
            .copy_from(&(-rotation_t * self.translation.cross_matrix()));
        adjoint.fixed_view_mut::<3, 3>(3, 3).copy_from(&rotation_t);
        adjoint
    }
}

impl<R: UnitRotation> PartialEq<Self> for Rigid3<R> {
    fn eq(&self, other: &Self) -> bool {
        self.rotation.stored_coeffs() == other.rotation.stored_coeffs()
            && self.translation == other.translation
    }
}

impl<R: UnitRotation> Display for Rigid3<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let [x, y, z, w] = self.rotation.coeffs_xyzw();
        let t = &self.translation;
        write!(
            f,
            "Rigid3d(rotation_xyzw=[{x}, {y}, {z}, {w}], translation=[{}, {}, {}])",
            t.x, t.y, t.z
        )
    }
}

impl<R: UnitRotation> Neg for Rigid3<R> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.inverse()
    }
}

// Rigid3 (b_from_a) * Vector3 (x_in_a) -> Vector3 (x_in_b)
//
// the vector is treated as a point, ie, it is subjected to the translation as well.
impl<R: UnitRotation> Mul<Vector3> for Rigid3<R> {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Self::Output {
        self.rotation.rotate(&rhs) + self.translation
    }
}

impl<R: UnitRotation> Mul<Point3> for Rigid3<R> {
    type Output = Point3;

    fn mul(self, rhs: Point3) -> Self::Output {
        Point3::from(self * rhs.coords)
    }
}

// Rigid3 (c_from_b) * Rigid3 (b_from_a) -> Rigid3 (c_from_a)
//
// x_in_c = R_cb (R_ba x_in_a + t_ba) + t_cb = (R_cb R_ba) x_in_a + (R_cb t_ba + t_cb)
impl<R: UnitRotation> Mul<Rigid3<R>> for Rigid3<R> {
    type Output = Rigid3<R>;

    fn mul(self, rhs: Rigid3<R>) -> Self::Output {
        Rigid3::new(
            self.rotation.compose(&rhs.rotation),
            self.rotation.rotate(&rhs.translation) + self.translation,
        )
    }
}

#[cfg(any(test, feature = "approx"))]
impl<R> AbsDiffEq<Self> for Rigid3<R>
where
    R: UnitRotation + AbsDiffEq<Epsilon = f64>,
{
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        R::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.rotation.abs_diff_eq(&other.rotation, epsilon)
            && self.translation.abs_diff_eq(&other.translation, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl<R> RelativeEq for Rigid3<R>
where
    R: UnitRotation + RelativeEq<Epsilon = f64>,
{
    fn default_max_relative() -> Self::Epsilon {
        R::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.rotation.relative_eq(&other.rotation, epsilon, max_relative)
            && self
                .translation
                .relative_eq(&other.translation, epsilon, max_relative)
    }
}
