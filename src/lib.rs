//! This library provides rigid body transforms in three dimensions (the group SE(3) of rotations
//! plus translations) for pose estimation and 3D reconstruction code.
//!
//! The main type is [`Rigid3`] (usually used through the [`Rigid3d`] alias), which describes
//! how to take a point expressed in one coordinate frame to the same point expressed in another.
//! Transforms can be applied to points, chained, inverted, and converted to and from the
//! classical `[R | t]` matrix form. The rotation representation is pluggable through the
//! [`UnitRotation`] trait, which is implemented for [`nalgebra`]'s unit quaternions and rotation
//! matrices.
//!
//! Pose uncertainty can be carried along as a 6×6 covariance in the tangent space of the group.
//! See [`covariance`] for the conventions, and [`covariance_for_inverse`] to obtain the
//! covariance of an inverted transform.
//!
//! # Examples
//!
//! A camera sits one unit above the world origin and looks along the world's X axis, which
//! (with a 90° turn about Z) makes world X its own Y.
//!
//! ```
//! use nalgebra::{Matrix6, UnitQuaternion, Vector3};
//! use rigid3::{covariance_for_inverse, Rigid3d, UnitRotation};
//! use uom::si::{angle::degree, f64::Angle};
//!
//! let world_from_cam = Rigid3d::new(
//!     UnitQuaternion::<f64>::about_axis(&Vector3::z_axis(), Angle::new::<degree>(-90.)),
//!     Vector3::new(0., 0., 1.),
//! );
//!
//! // what the camera sees, we can express in world coordinates
//! let x_in_cam = Vector3::new(0., 2., 0.);
//! let x_in_world = world_from_cam * x_in_cam;
//! assert!((x_in_world - Vector3::new(2., 0., 1.)).norm() < 1e-12);
//!
//! // and the other way around
//! let cam_from_world = world_from_cam.inverse();
//! assert!((cam_from_world * x_in_world - x_in_cam).norm() < 1e-12);
//!
//! // the camera center in world coordinates
//! let center = cam_from_world.target_origin_in_source();
//! assert!((center - Vector3::new(0., 0., 1.)).norm() < 1e-12);
//!
//! // the same transform as a classical 3×4 matrix
//! let matrix = world_from_cam.to_matrix();
//! assert!((matrix * x_in_cam.push(1.) - x_in_world).norm() < 1e-12);
//!
//! // if we know how uncertain `world_from_cam` is, we also know how uncertain
//! // `cam_from_world` is
//! let cov_world_from_cam = Matrix6::from_diagonal_element(1e-4);
//! let cov_cam_from_world = covariance_for_inverse(&world_from_cam, &cov_world_from_cam);
//! assert!((cov_cam_from_world - cov_cam_from_world.transpose()).norm() < 1e-12);
//! ```

pub mod covariance;
mod rigid;
mod rotation;

pub(crate) type Vector3 = nalgebra::Vector3<f64>;
pub(crate) type Point3 = nalgebra::Point3<f64>;
pub(crate) type Matrix3 = nalgebra::Matrix3<f64>;
pub(crate) type Matrix3x4 = nalgebra::Matrix3x4<f64>;
pub(crate) type Matrix4 = nalgebra::Matrix4<f64>;
pub(crate) type Matrix6 = nalgebra::Matrix6<f64>;

pub use covariance::covariance_for_inverse;
pub use rigid::{Rigid3, Rigid3d};
pub use rotation::UnitRotation;
