//! Shape-function evaluation for boundary side families.
//!
//! Every supported side family exposes the same capability interface
//! ([`SideShape`]): shape-function values and first/second parametric
//! derivatives at a reference coordinate, plus its reference-domain geometry.
//! The concrete family is selected by the [`SideKind`] tag carried by the
//! mesh topology.

pub use self::side_shape::SideShape;

#[cfg(feature = "dim2")]
pub use self::edge::{Edge2, Edge3};
#[cfg(feature = "dim3")]
pub use self::quad::{Quad4, Quad9};
#[cfg(feature = "dim3")]
pub use self::triangle::{Tri3, Tri6};

#[cfg(feature = "dim2")]
mod edge;
#[cfg(feature = "dim3")]
mod quad;
mod side_shape;
#[cfg(feature = "dim3")]
mod triangle;

/// Interpolation order of a side family.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Order {
    /// Linear interpolation.
    First,
    /// Quadratic interpolation.
    Second,
}

/// Tag identifying the geometric family of a boundary side.
#[cfg(feature = "dim2")]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SideKind {
    /// Two-node linear edge.
    Edge2,
    /// Three-node quadratic edge.
    Edge3,
}

/// Tag identifying the geometric family of a boundary side.
#[cfg(feature = "dim3")]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SideKind {
    /// Three-node linear triangle.
    Tri3,
    /// Six-node quadratic triangle.
    Tri6,
    /// Four-node bilinear quadrilateral.
    Quad4,
    /// Nine-node biquadratic quadrilateral.
    Quad9,
}

#[cfg(feature = "dim2")]
impl SideKind {
    /// The shape-function evaluator of this side family.
    pub fn shape(self) -> &'static dyn SideShape {
        match self {
            SideKind::Edge2 => &Edge2,
            SideKind::Edge3 => &Edge3,
        }
    }

    /// The interpolation order of this side family.
    pub fn order(self) -> Order {
        match self {
            SideKind::Edge2 => Order::First,
            SideKind::Edge3 => Order::Second,
        }
    }

    /// The number of nodes of this side family.
    pub fn num_nodes(self) -> usize {
        match self {
            SideKind::Edge2 => 2,
            SideKind::Edge3 => 3,
        }
    }
}

#[cfg(feature = "dim3")]
impl SideKind {
    /// The shape-function evaluator of this side family.
    pub fn shape(self) -> &'static dyn SideShape {
        match self {
            SideKind::Tri3 => &Tri3,
            SideKind::Tri6 => &Tri6,
            SideKind::Quad4 => &Quad4,
            SideKind::Quad9 => &Quad9,
        }
    }

    /// The interpolation order of this side family.
    pub fn order(self) -> Order {
        match self {
            SideKind::Tri3 | SideKind::Quad4 => Order::First,
            SideKind::Tri6 | SideKind::Quad9 => Order::Second,
        }
    }

    /// The number of nodes of this side family.
    pub fn num_nodes(self) -> usize {
        match self {
            SideKind::Tri3 => 3,
            SideKind::Tri6 => 6,
            SideKind::Quad4 => 4,
            SideKind::Quad9 => 9,
        }
    }
}
