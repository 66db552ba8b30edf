use arrayvec::ArrayVec;
use smallvec::SmallVec;

use crate::element::SideKind;
use crate::math::{Point, MAX_SIDE_NODES};
use crate::mesh::{BoundaryId, ElementId, NodeId, SideId};
use crate::utils::hashmap::HashMap;

/// One boundary side of a mesh element.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundarySide {
    /// The element this side belongs to.
    pub element: ElementId,
    /// The local index of this side within its element.
    pub side_index: u32,
    /// The geometric family of this side.
    pub kind: SideKind,
    /// The nodes of this side, in the family's reference ordering.
    pub nodes: SmallVec<[NodeId; MAX_SIDE_NODES]>,
}

/// Error raised when building an inconsistent [`SurfaceMesh`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    /// A side references a node index outside the mesh's node array.
    #[error("node index {node:?} is out of bounds (the mesh has {num_points} points)")]
    NodeOutOfBounds {
        /// The offending node index.
        node: NodeId,
        /// The number of points of the mesh.
        num_points: usize,
    },
    /// A side was given a node count inconsistent with its family.
    #[error("side of kind {kind:?} expects {expected} nodes but {found} were given")]
    SideNodeCountMismatch {
        /// The side family.
        kind: SideKind,
        /// The node count the family requires.
        expected: usize,
        /// The node count actually provided.
        found: usize,
    },
}

/// Node positions and boundary sides of the contact surfaces.
///
/// Node positions may be updated between detection passes
/// ([`SurfaceMesh::set_point`]); the topology (sides, boundary membership)
/// must not change once a `PenetrationLocator` was constructed from it.
///
/// # Orientation convention
/// Side node orderings are counterclockwise around the element interior: in
/// 2D the interior lies to the left of the edge tangent, in 3D `∂x/∂ξ × ∂x/∂η`
/// points out of the element. All outward normals reported by this crate
/// derive from this convention.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SurfaceMesh {
    points: Vec<Point>,
    sides: Vec<BoundarySide>,
    boundaries: HashMap<BoundaryId, Vec<SideId>>,
}

impl SurfaceMesh {
    /// Creates a mesh from its node positions, with no boundary sides yet.
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            sides: Vec::new(),
            boundaries: HashMap::default(),
        }
    }

    /// Registers one boundary side on the boundary `boundary`.
    ///
    /// `nodes` follows the reference node ordering of `kind` and the
    /// orientation convention documented on [`SurfaceMesh`].
    pub fn push_side(
        &mut self,
        boundary: BoundaryId,
        element: ElementId,
        side_index: u32,
        kind: SideKind,
        nodes: &[NodeId],
    ) -> Result<SideId, MeshError> {
        if nodes.len() != kind.num_nodes() {
            return Err(MeshError::SideNodeCountMismatch {
                kind,
                expected: kind.num_nodes(),
                found: nodes.len(),
            });
        }

        for node in nodes {
            if node.0 as usize >= self.points.len() {
                return Err(MeshError::NodeOutOfBounds {
                    node: *node,
                    num_points: self.points.len(),
                });
            }
        }

        let id = SideId(self.sides.len() as u32);
        self.sides.push(BoundarySide {
            element,
            side_index,
            kind,
            nodes: nodes.iter().copied().collect(),
        });
        self.boundaries.entry(boundary).or_default().push(id);
        Ok(id)
    }

    /// The number of points of this mesh.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The number of boundary sides of this mesh.
    pub fn num_sides(&self) -> usize {
        self.sides.len()
    }

    /// The position of the node `node`.
    ///
    /// Panics if the index is out of bounds.
    pub fn point(&self, node: NodeId) -> Point {
        self.points[node.0 as usize]
    }

    /// Moves the node `node` to `point`.
    ///
    /// Panics if the index is out of bounds.
    pub fn set_point(&mut self, node: NodeId, point: Point) {
        self.points[node.0 as usize] = point;
    }

    /// The boundary side `side`.
    ///
    /// Panics if the index is out of bounds.
    pub fn side(&self, side: SideId) -> &BoundarySide {
        &self.sides[side.0 as usize]
    }

    /// Does this mesh know the boundary `boundary`?
    pub fn contains_boundary(&self, boundary: BoundaryId) -> bool {
        self.boundaries.contains_key(&boundary)
    }

    /// The sides registered on the boundary `boundary` (empty if unknown).
    pub fn boundary_sides(&self, boundary: BoundaryId) -> &[SideId] {
        self.boundaries
            .get(&boundary)
            .map(|s| &s[..])
            .unwrap_or(&[])
    }

    /// The sorted, deduplicated nodes of the boundary `boundary`.
    pub fn boundary_nodes(&self, boundary: BoundaryId) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self
            .boundary_sides(boundary)
            .iter()
            .flat_map(|s| self.side(*s).nodes.iter().copied())
            .collect();
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }

    /// Gathers the node positions of the side `side`.
    pub fn side_points(&self, side: SideId) -> ArrayVec<Point, MAX_SIDE_NODES> {
        self.side(side)
            .nodes
            .iter()
            .map(|n| self.points[n.0 as usize])
            .collect()
    }
}
