//! Minimal mesh topology consumed by the detection pipeline.
//!
//! The detection engine does not own a full volumetric mesh; it only needs
//! node positions, the boundary sides of the designated contact surfaces,
//! and boundary membership. [`SurfaceMesh`] stores exactly that.

pub use self::surface_mesh::{BoundarySide, MeshError, SurfaceMesh};

mod surface_mesh;

/// The index of a mesh node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub u32);

/// The index of a mesh element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElementId(pub u32);

/// The index of a boundary side within a [`SurfaceMesh`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SideId(pub u32);

/// The identifier of a designated boundary surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundaryId(pub u32);
