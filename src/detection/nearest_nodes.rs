use crate::mesh::{BoundaryId, NodeId, SurfaceMesh};

/// Source of ranked nearby master nodes for a slave node.
///
/// This is the seam toward the spatial index: the detection driver only
/// consumes an ordered candidate sequence and never builds the index itself.
/// Implementations must be readable concurrently from multiple detection
/// workers, hence the `Sync` bound.
pub trait NearestNodeLocator: Sync {
    /// Writes the master nodes closest to the slave node `slave` into `out`,
    /// closest first. `out` is cleared by the callee.
    fn candidates(&self, mesh: &SurfaceMesh, slave: NodeId, out: &mut Vec<NodeId>);
}

/// Brute-force nearest-node locator.
///
/// Ranks every master-boundary node by distance on each query. Quadratic in
/// mesh size, intended for tests and small problems; production meshes
/// should plug a real spatial index behind [`NearestNodeLocator`].
#[derive(Clone, Debug)]
pub struct LinearScanLocator {
    master_nodes: Vec<NodeId>,
    max_candidates: usize,
}

impl LinearScanLocator {
    /// Creates a locator over the nodes of the boundary `master`.
    pub fn new(mesh: &SurfaceMesh, master: BoundaryId, max_candidates: usize) -> Self {
        LinearScanLocator {
            master_nodes: mesh.boundary_nodes(master),
            max_candidates,
        }
    }
}

impl NearestNodeLocator for LinearScanLocator {
    fn candidates(&self, mesh: &SurfaceMesh, slave: NodeId, out: &mut Vec<NodeId>) {
        let p = mesh.point(slave);

        out.clear();
        out.extend_from_slice(&self.master_nodes);
        // Distance ties fall back to the node id so the ranking is reproducible.
        out.sort_unstable_by(|a, b| {
            let da = (mesh.point(*a) - p).norm_squared();
            let db = (mesh.point(*b) - p).norm_squared();
            da.partial_cmp(&db)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.cmp(b))
        });
        out.truncate(self.max_candidates);
    }
}
