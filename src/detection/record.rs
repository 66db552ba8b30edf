use arrayvec::ArrayVec;

use crate::math::{Point, Real, RefPoint, UnitVector, Vector, MAX_SIDE_NODES, SIDE_DIM, SIDE_HESS};
use crate::mesh::{BoundarySide, ElementId, NodeId, SideId};
use crate::query::SideProjection;

/// Penetration data of one slave node against the master surface.
///
/// At most one record exists per slave node at any time; records are owned
/// exclusively by the [`PenetrationStore`](crate::detection::PenetrationStore)
/// and replaced wholesale when a new projection supersedes an old one.
///
/// The interpolation data cached at the closest point (`side_phi`,
/// `tangents`, `curvatures`) lets the next detection pass warm-start the
/// closest-point iteration instead of recomputing from scratch.
#[derive(Clone, Debug)]
pub struct PenetrationRecord {
    /// The slave node this record belongs to.
    pub node: NodeId,
    /// The master element whose side carries the closest point.
    pub element: ElementId,
    /// The boundary side carrying the closest point.
    pub side: SideId,
    /// The local index of that side within `element`.
    pub side_index: u32,
    /// The outward unit normal of the master surface at the closest point.
    pub normal: UnitVector,
    /// Signed distance from the closest point to the node, along `normal`.
    /// Non-positive (up to the driver's contact tolerance) while in contact.
    pub distance: Real,
    /// The closest point in physical coordinates.
    pub closest_point: Point,
    /// The closest point in the side's reference coordinate system.
    pub closest_point_ref: RefPoint,
    /// Shape-function values of the side at the closest point.
    pub side_phi: ArrayVec<Real, MAX_SIDE_NODES>,
    /// First parametric derivatives of the side position at the closest point.
    pub tangents: [Vector; SIDE_DIM],
    /// Distinct second parametric derivatives of the side position at the
    /// closest point.
    pub curvatures: [Vector; SIDE_HESS],
}

impl PenetrationRecord {
    /// Builds a record from a converged projection onto the side `side_id`.
    pub fn from_projection(
        node: NodeId,
        side_id: SideId,
        side: &BoundarySide,
        proj: SideProjection,
    ) -> Self {
        PenetrationRecord {
            node,
            element: side.element,
            side: side_id,
            side_index: side.side_index,
            normal: proj.normal,
            distance: proj.distance,
            closest_point: proj.point,
            closest_point_ref: proj.reference,
            side_phi: proj.phi,
            tangents: proj.tangents,
            curvatures: proj.curvatures,
        }
    }
}

impl PartialEq for PenetrationRecord {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
            && self.element == other.element
            && self.side == other.side
            && self.side_index == other.side_index
            && self.normal.as_ref() == other.normal.as_ref()
            && self.distance == other.distance
            && self.closest_point == other.closest_point
            && self.closest_point_ref == other.closest_point_ref
            && self.side_phi == other.side_phi
            && self.tangents == other.tangents
            && self.curvatures == other.curvatures
    }
}
