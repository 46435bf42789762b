//! First-order propagation of pose uncertainty.
//!
//! Uncertainty of a [`Rigid3`] is described by a 6×6 covariance over a small perturbation `δ`
//! in the tangent space of the transform group, applied on the right of the transform:
//!
//! ```text
//! T̃ = T · Exp(δ),   δ = [ω, v] ~ N(0, Σ)
//! ```
//!
//! The layout is rotation-first: rows and columns `0..3` hold the rotational perturbation `ω`
//! and `3..6` the translational perturbation `v`. Callers with translation-first covariances
//! must permute the blocks before and after propagation.
//!
//! Tangent-space perturbations compose linearly, so pushing a covariance through a group
//! operation only requires the operation's Jacobian `J` and the usual congruence `J · Σ · Jᵀ`.

use crate::rigid::Rigid3;
use crate::rotation::UnitRotation;
use crate::Matrix6;

/// Applies the first-order uncertainty propagation law `J · Σ · Jᵀ`.
///
/// The result is symmetric whenever `covariance` is. No check is made that `covariance` is
/// symmetric or positive semi-definite.
#[must_use]
pub fn propagate(jacobian: &Matrix6, covariance: &Matrix6) -> Matrix6 {
    jacobian * covariance * jacobian.transpose()
}

/// Given the covariance of `b_from_a`, returns the covariance of `a_from_b`, ie, of
/// [`b_from_a.inverse()`](Rigid3::inverse).
///
/// With right perturbations, `(T · Exp(δ))⁻¹ = T⁻¹ · Exp(-Ad_T δ)`, so the Jacobian of the
/// inversion is `-Ad_T` (see [`Rigid3::adjoint`]); the sign cancels in the congruence. Both
/// covariances use the rotation-first layout described in the [module docs](self).
///
/// Propagating the result once more through `a_from_b` gives back the original covariance:
///
/// ```
/// use nalgebra::{Matrix6, UnitQuaternion, Vector3};
/// use rigid3::{covariance_for_inverse, Rigid3d};
///
/// let b_from_a = Rigid3d::new(
///     UnitQuaternion::from_euler_angles(0.1, -0.4, 1.2),
///     Vector3::new(0.5, -1., 2.),
/// );
/// let cov_b_from_a = Matrix6::from_diagonal_element(0.01);
///
/// let cov_a_from_b = covariance_for_inverse(&b_from_a, &cov_b_from_a);
/// let cov_b_from_a_again = covariance_for_inverse(&b_from_a.inverse(), &cov_a_from_b);
/// assert!((cov_b_from_a_again - cov_b_from_a).norm() < 1e-12);
/// ```
#[must_use]
pub fn covariance_for_inverse<R: UnitRotation>(
    b_from_a: &Rigid3<R>,
    cov_b_from_a: &Matrix6,
) -> Matrix6 {
    propagate(&b_from_a.adjoint(), cov_b_from_a)
}
