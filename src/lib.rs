/*!
breach
========

**breach** is a 2 and 3-dimensional contact-penetration detection library
written with the rust programming language.

Given two designated boundary surfaces of a discretized domain (a *master*
surface and a *slave* surface), it determines for every slave-surface node
whether it has penetrated the master surface, and if so computes the
penetration distance, the outward surface normal, and the geometric closest
point on the master surface.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.

#[cfg(all(feature = "dim2", feature = "dim3"))]
std::compile_error!("The `dim2` and `dim3` features are mutually exclusive.");
#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod detection;
pub mod element;
pub mod mesh;
pub mod query;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub type Real = f64;

    /// The scalar type used throughout this crate.
    #[cfg(feature = "f32")]
    pub type Real = f32;
}

/// Compilation flags dependent aliases for mathematical types.
#[cfg(feature = "dim3")]
pub mod math {
    pub use super::real::Real;
    use na::{Matrix2, Matrix3, Point2, Point3, UnitVector3, Vector2, Vector3};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The parametric dimension of a boundary side.
    pub const SIDE_DIM: usize = DIM - 1;

    /// The number of distinct second parametric derivatives of a side.
    pub const SIDE_HESS: usize = SIDE_DIM * (SIDE_DIM + 1) / 2;

    /// The largest node count of a supported side family.
    pub const MAX_SIDE_NODES: usize = 9;

    /// The point type.
    pub type Point = Point3<Real>;

    /// The vector type.
    pub type Vector = Vector3<Real>;

    /// The unit vector type.
    pub type UnitVector = UnitVector3<Real>;

    /// The matrix type.
    pub type Matrix = Matrix3<Real>;

    /// A point in the reference (parametric) coordinate system of a side.
    pub type RefPoint = Point2<Real>;

    /// An increment in the reference coordinate system of a side.
    pub type RefVector = Vector2<Real>;

    /// The Jacobian type of the closest-point Newton system.
    pub type RefMatrix = Matrix2<Real>;
}

/// Compilation flags dependent aliases for mathematical types.
#[cfg(feature = "dim2")]
pub mod math {
    pub use super::real::Real;
    use na::{Matrix1, Matrix2, Point1, Point2, UnitVector2, Vector1, Vector2};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 2;

    /// The parametric dimension of a boundary side.
    pub const SIDE_DIM: usize = DIM - 1;

    /// The number of distinct second parametric derivatives of a side.
    pub const SIDE_HESS: usize = SIDE_DIM * (SIDE_DIM + 1) / 2;

    /// The largest node count of a supported side family.
    pub const MAX_SIDE_NODES: usize = 3;

    /// The point type.
    pub type Point = Point2<Real>;

    /// The vector type.
    pub type Vector = Vector2<Real>;

    /// The unit vector type.
    pub type UnitVector = UnitVector2<Real>;

    /// The matrix type.
    pub type Matrix = Matrix2<Real>;

    /// A point in the reference (parametric) coordinate system of a side.
    pub type RefPoint = Point1<Real>;

    /// An increment in the reference coordinate system of a side.
    pub type RefVector = Vector1<Real>;

    /// The Jacobian type of the closest-point Newton system.
    pub type RefMatrix = Matrix1<Real>;
}
