use smallvec::SmallVec;

use crate::detection::{NearestNodeLocator, PenetrationRecord, PenetrationStore};
use crate::element::Order;
use crate::math::{Point, Real, UnitVector};
use crate::mesh::{BoundaryId, BoundarySide, ElementId, NodeId, SideId, SurfaceMesh};
use crate::query::{project_point_onto_side, SideProjection};
use crate::utils::hashmap::{HashMap, HashSet};

/// Fatal error raised when a [`PenetrationLocator`] is built from an
/// inconsistent configuration. No detection can meaningfully proceed past
/// any of these.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    /// The designated boundary is not known to the mesh.
    #[error("unknown boundary {0:?}")]
    UnknownBoundary(BoundaryId),
    /// A master side's interpolation order disagrees with the order the
    /// locator was configured with.
    #[error("side {side_index} of element {element:?} has order {found:?}, expected {expected:?}")]
    OrderMismatch {
        /// The element owning the offending side.
        element: ElementId,
        /// The local side index within the element.
        side_index: u32,
        /// The order the locator was configured with.
        expected: Order,
        /// The order of the offending side's family.
        found: Order,
    },
}

/// Detects, for every node of the slave boundary, penetration into the
/// master boundary.
///
/// One call to [`PenetrationLocator::detect_penetration`] is one detection
/// pass: candidate master sides are proposed by an external
/// [`NearestNodeLocator`], projected onto with
/// [`project_point_onto_side`], and the best valid result per node is
/// written into the owned [`PenetrationStore`]. A pass is atomic: readers of
/// `&self` observe either the previous pass's complete state or the new one.
///
/// Per-node state is tracked across passes for the lifetime of the locator:
/// `has_penetrated` ratchets true on the first contact and never resets,
/// while `locked_this_step`/`unlocked_this_step` describe the transitions of
/// the latest pass only.
#[derive(Debug)]
pub struct PenetrationLocator {
    master: BoundaryId,
    slave: BoundaryId,
    order: Order,
    contact_tolerance: Real,
    // Reuse the previous pass's reference coordinate as a warm start before
    // falling back to a full candidate search.
    update_location: bool,
    slave_nodes: Vec<NodeId>,
    // Master sides touching each master node, ordered by (element, side index).
    node_to_master_sides: HashMap<NodeId, SmallVec<[SideId; 4]>>,
    store: PenetrationStore,
    has_penetrated: HashSet<NodeId>,
    locked_this_step: HashSet<NodeId>,
    unlocked_this_step: HashSet<NodeId>,
}

impl PenetrationLocator {
    /// Creates a locator detecting penetration of the nodes of `slave` into
    /// the sides of `master`.
    ///
    /// The interpolation `order` is fixed here; every master side must belong
    /// to a family of that order. The mesh topology must not change for the
    /// lifetime of the locator (node positions may).
    pub fn new(
        mesh: &SurfaceMesh,
        master: BoundaryId,
        slave: BoundaryId,
        order: Order,
    ) -> Result<Self, ConstructionError> {
        if !mesh.contains_boundary(master) {
            return Err(ConstructionError::UnknownBoundary(master));
        }
        if !mesh.contains_boundary(slave) {
            return Err(ConstructionError::UnknownBoundary(slave));
        }

        let mut master_sides = mesh.boundary_sides(master).to_vec();
        master_sides.sort_unstable_by_key(|&sid| {
            let side = mesh.side(sid);
            (side.element, side.side_index, sid)
        });

        let mut node_to_master_sides: HashMap<NodeId, SmallVec<[SideId; 4]>> = HashMap::default();
        for &sid in &master_sides {
            let side = mesh.side(sid);
            if side.kind.order() != order {
                return Err(ConstructionError::OrderMismatch {
                    element: side.element,
                    side_index: side.side_index,
                    expected: order,
                    found: side.kind.order(),
                });
            }
            for &node in &side.nodes {
                node_to_master_sides.entry(node).or_default().push(sid);
            }
        }

        Ok(PenetrationLocator {
            master,
            slave,
            order,
            contact_tolerance: 0.0,
            update_location: false,
            slave_nodes: mesh.boundary_nodes(slave),
            node_to_master_sides,
            store: PenetrationStore::new(),
            has_penetrated: HashSet::default(),
            locked_this_step: HashSet::default(),
            unlocked_this_step: HashSet::default(),
        })
    }

    /// Runs one detection pass.
    ///
    /// Per-node work is independent and side-effect free; with the
    /// `parallel` feature it runs on the rayon thread pool. Outcomes are
    /// applied to the record store serially afterwards, so a pass never
    /// exposes partial results.
    pub fn detect_penetration<L: NearestNodeLocator>(&mut self, mesh: &SurfaceMesh, nearest: &L) {
        #[cfg(feature = "parallel")]
        let outcomes: Vec<_> = {
            use rayon::prelude::*;
            self.slave_nodes
                .par_iter()
                .map(|&node| (node, self.evaluate_node(mesh, nearest, node)))
                .collect()
        };
        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<_> = self
            .slave_nodes
            .iter()
            .map(|&node| (node, self.evaluate_node(mesh, nearest, node)))
            .collect();

        self.locked_this_step.clear();
        self.unlocked_this_step.clear();

        for (node, outcome) in outcomes {
            let was_locked = self.store.contains(node);

            match outcome {
                Some(record) => {
                    self.store.upsert(record);

                    if !was_locked {
                        let _ = self.locked_this_step.insert(node);
                        let _ = self.has_penetrated.insert(node);
                        log::debug!("slave node {:?} locked onto the master surface", node);
                    }
                }
                None => {
                    if was_locked {
                        let _ = self.store.remove(node);
                        let _ = self.unlocked_this_step.insert(node);
                        log::debug!("slave node {:?} released from the master surface", node);
                    }
                }
            }
        }
    }

    // Computes the contact outcome of one slave node without touching any
    // shared state.
    fn evaluate_node<L: NearestNodeLocator>(
        &self,
        mesh: &SurfaceMesh,
        nearest: &L,
        node: NodeId,
    ) -> Option<PenetrationRecord> {
        let p = mesh.point(node);

        if self.update_location {
            if let Some(prev) = self.store.get(node) {
                if let Some(record) = self.retry_previous(mesh, node, &p, prev) {
                    return Some(record);
                }
                // Cached coordinate no longer valid: forced full re-search.
            }
        }

        self.full_search(mesh, nearest, node, &p)
    }

    // Warm-started retry of the side recorded on a previous pass.
    fn retry_previous(
        &self,
        mesh: &SurfaceMesh,
        node: NodeId,
        p: &Point,
        prev: &PenetrationRecord,
    ) -> Option<PenetrationRecord> {
        let side = mesh.side(prev.side);
        let shape = side.kind.shape();
        let points = mesh.side_points(prev.side);

        match project_point_onto_side(&points, shape, p, &prev.closest_point_ref) {
            Ok(proj) if proj.distance <= self.contact_tolerance => Some(
                PenetrationRecord::from_projection(node, prev.side, side, proj),
            ),
            _ => None,
        }
    }

    fn full_search<L: NearestNodeLocator>(
        &self,
        mesh: &SurfaceMesh,
        nearest: &L,
        node: NodeId,
        p: &Point,
    ) -> Option<PenetrationRecord> {
        let mut candidates = Vec::new();
        nearest.candidates(mesh, node, &mut candidates);

        let mut visited: SmallVec<[SideId; 16]> = SmallVec::new();
        let mut best: Option<PenetrationRecord> = None;
        let mut best_residual = Real::MAX;

        for cand in candidates {
            let sides = match self.node_to_master_sides.get(&cand) {
                Some(sides) => sides,
                None => continue,
            };

            for &side_id in sides {
                if visited.contains(&side_id) {
                    continue;
                }
                visited.push(side_id);

                let side = mesh.side(side_id);
                let shape = side.kind.shape();
                let seed = side
                    .nodes
                    .iter()
                    .position(|&n| n == cand)
                    .map(|local| shape.node_reference_coord(local))
                    .unwrap_or_else(|| shape.reference_centroid());
                let points = mesh.side_points(side_id);

                let proj = match project_point_onto_side(&points, shape, p, &seed) {
                    Ok(proj) => proj,
                    Err(rejection) => {
                        log::debug!(
                            "projection of slave node {:?} onto side {:?} rejected: {}",
                            node,
                            side_id,
                            rejection
                        );
                        continue;
                    }
                };

                if proj.distance > self.contact_tolerance {
                    continue;
                }

                if self.improves(mesh, &best, best_residual, side, &proj) {
                    best_residual = proj.residual;
                    best = Some(PenetrationRecord::from_projection(node, side_id, side, proj));
                }
            }
        }

        best
    }

    // Deterministic candidate selection: smallest |distance|, ties by
    // smallest scaled residual, then lowest (element, side index) pair.
    fn improves(
        &self,
        mesh: &SurfaceMesh,
        best: &Option<PenetrationRecord>,
        best_residual: Real,
        side: &BoundarySide,
        proj: &SideProjection,
    ) -> bool {
        let incumbent = match best {
            Some(incumbent) => incumbent,
            None => return true,
        };

        let da = proj.distance.abs();
        let db = incumbent.distance.abs();
        if da != db {
            return da < db;
        }

        // Collinearly overlapping linear sides describe the same geometric
        // contact twice (duplicated or degenerate meshes): keep the incumbent.
        #[cfg(feature = "dim2")]
        if self.is_duplicate_contact(mesh, incumbent, side) {
            return false;
        }
        #[cfg(not(feature = "dim2"))]
        let _ = mesh;

        if proj.residual != best_residual {
            return proj.residual < best_residual;
        }

        (side.element, side.side_index) < (incumbent.element, incumbent.side_index)
    }

    #[cfg(feature = "dim2")]
    fn is_duplicate_contact(
        &self,
        mesh: &SurfaceMesh,
        incumbent: &PenetrationRecord,
        side: &BoundarySide,
    ) -> bool {
        use crate::utils::{segments_intersection2d, SegmentsIntersection};

        let cur = mesh.side(incumbent.side);
        if side.nodes.len() != 2 || cur.nodes.len() != 2 {
            return false;
        }

        let a = mesh.point(cur.nodes[0]);
        let b = mesh.point(cur.nodes[1]);
        let c = mesh.point(side.nodes[0]);
        let d = mesh.point(side.nodes[1]);

        matches!(
            segments_intersection2d(&a, &b, &c, &d, crate::query::DOMAIN_TOL),
            Ok(Some(SegmentsIntersection::Overlap { .. }))
        )
    }

    /// The master boundary this locator was built with.
    pub fn master_boundary(&self) -> BoundaryId {
        self.master
    }

    /// The slave boundary this locator was built with.
    pub fn slave_boundary(&self) -> BoundaryId {
        self.slave
    }

    /// The interpolation order this locator was built with.
    pub fn order(&self) -> Order {
        self.order
    }

    /// Enables or disables incremental updates for subsequent passes.
    ///
    /// When enabled, a node tracked on the previous pass retries its recorded
    /// side with a warm-started iteration before any full candidate search.
    pub fn set_update(&mut self, update: bool) {
        self.update_location = update;
    }

    /// Is incremental updating enabled?
    pub fn update(&self) -> bool {
        self.update_location
    }

    /// Sets the signed-distance threshold below which a node counts as being
    /// in contact (defaults to `0.0`).
    pub fn set_contact_tolerance(&mut self, tol: Real) {
        self.contact_tolerance = tol;
    }

    /// The signed-distance threshold below which a node counts as in contact.
    pub fn contact_tolerance(&self) -> Real {
        self.contact_tolerance
    }

    /// The sorted nodes of the slave boundary.
    pub fn slave_nodes(&self) -> &[NodeId] {
        &self.slave_nodes
    }

    /// The penetration records of the latest pass, keyed by slave node.
    pub fn store(&self) -> &PenetrationStore {
        &self.store
    }

    /// Iterates over the records of the latest pass.
    pub fn records(&self) -> impl Iterator<Item = (NodeId, &PenetrationRecord)> {
        self.store.iter()
    }

    /// The record of the node `node`, if it is currently in contact.
    pub fn record(&self, node: NodeId) -> Option<&PenetrationRecord> {
        self.store.get(node)
    }

    /// The signed penetration distance of the node `node`, or `None` if it is
    /// not in contact.
    pub fn penetration_distance(&self, node: NodeId) -> Option<Real> {
        self.store.get(node).map(|rec| rec.distance)
    }

    /// The outward master-surface normal at the node's closest point, or
    /// `None` if the node is not in contact.
    pub fn penetration_normal(&self, node: NodeId) -> Option<UnitVector> {
        self.store.get(node).map(|rec| rec.normal)
    }

    /// Has this node ever been found in contact during the locator's
    /// lifetime? Ratchets true, never resets.
    pub fn has_penetrated(&self, node: NodeId) -> bool {
        self.has_penetrated.contains(&node)
    }

    /// Did the latest pass newly establish contact for this node?
    pub fn locked_this_step(&self, node: NodeId) -> bool {
        self.locked_this_step.contains(&node)
    }

    /// Did the latest pass lose a previously established contact for this
    /// node?
    pub fn unlocked_this_step(&self, node: NodeId) -> bool {
        self.unlocked_this_step.contains(&node)
    }
}
