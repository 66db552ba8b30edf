//! Linear and quadratic triangular sides (3D meshes).

use crate::element::{SideKind, SideShape};
use crate::math::{Real, RefPoint, RefVector, SIDE_HESS};

/// Three-node linear triangle with reference domain `ξ, η ≥ 0, ξ + η ≤ 1`.
///
/// Node ordering is counterclockwise: `(0,0), (1,0), (0,1)`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Tri3;

/// Six-node quadratic triangle with reference domain `ξ, η ≥ 0, ξ + η ≤ 1`.
///
/// Node ordering: the three vertices counterclockwise, then the mid-edge
/// nodes of edges `01`, `12`, `20`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Tri6;

const TRI3_NODES: [[Real; 2]; 3] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];

const TRI6_NODES: [[Real; 2]; 6] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [0.0, 1.0],
    [0.5, 0.0],
    [0.5, 0.5],
    [0.0, 0.5],
];

fn tri_domain_contains(pt: &RefPoint, tol: Real) -> bool {
    pt.x >= -tol && pt.y >= -tol && pt.x + pt.y <= 1.0 + tol
}

impl SideShape for Tri3 {
    fn kind(&self) -> SideKind {
        SideKind::Tri3
    }

    fn num_nodes(&self) -> usize {
        3
    }

    fn reference_centroid(&self) -> RefPoint {
        RefPoint::new(1.0 / 3.0, 1.0 / 3.0)
    }

    fn node_reference_coord(&self, local: usize) -> RefPoint {
        let [xi, eta] = TRI3_NODES[local];
        RefPoint::new(xi, eta)
    }

    fn domain_contains(&self, pt: &RefPoint, tol: Real) -> bool {
        tri_domain_contains(pt, tol)
    }

    fn phi(&self, pt: &RefPoint, out: &mut [Real]) {
        out[0] = 1.0 - pt.x - pt.y;
        out[1] = pt.x;
        out[2] = pt.y;
    }

    fn grad_phi(&self, _pt: &RefPoint, out: &mut [RefVector]) {
        out[0] = RefVector::new(-1.0, -1.0);
        out[1] = RefVector::new(1.0, 0.0);
        out[2] = RefVector::new(0.0, 1.0);
    }

    fn hess_phi(&self, _pt: &RefPoint, out: &mut [[Real; SIDE_HESS]]) {
        for o in out.iter_mut().take(3) {
            *o = [0.0; SIDE_HESS];
        }
    }
}

impl SideShape for Tri6 {
    fn kind(&self) -> SideKind {
        SideKind::Tri6
    }

    fn num_nodes(&self) -> usize {
        6
    }

    fn reference_centroid(&self) -> RefPoint {
        RefPoint::new(1.0 / 3.0, 1.0 / 3.0)
    }

    fn node_reference_coord(&self, local: usize) -> RefPoint {
        let [xi, eta] = TRI6_NODES[local];
        RefPoint::new(xi, eta)
    }

    fn domain_contains(&self, pt: &RefPoint, tol: Real) -> bool {
        tri_domain_contains(pt, tol)
    }

    fn phi(&self, pt: &RefPoint, out: &mut [Real]) {
        let l0 = 1.0 - pt.x - pt.y;
        let l1 = pt.x;
        let l2 = pt.y;
        out[0] = l0 * (2.0 * l0 - 1.0);
        out[1] = l1 * (2.0 * l1 - 1.0);
        out[2] = l2 * (2.0 * l2 - 1.0);
        out[3] = 4.0 * l0 * l1;
        out[4] = 4.0 * l1 * l2;
        out[5] = 4.0 * l2 * l0;
    }

    fn grad_phi(&self, pt: &RefPoint, out: &mut [RefVector]) {
        let l0 = 1.0 - pt.x - pt.y;
        let l1 = pt.x;
        let l2 = pt.y;
        out[0] = RefVector::new(1.0 - 4.0 * l0, 1.0 - 4.0 * l0);
        out[1] = RefVector::new(4.0 * l1 - 1.0, 0.0);
        out[2] = RefVector::new(0.0, 4.0 * l2 - 1.0);
        out[3] = RefVector::new(4.0 * (l0 - l1), -4.0 * l1);
        out[4] = RefVector::new(4.0 * l2, 4.0 * l1);
        out[5] = RefVector::new(-4.0 * l2, 4.0 * (l0 - l2));
    }

    fn hess_phi(&self, _pt: &RefPoint, out: &mut [[Real; SIDE_HESS]]) {
        out[0] = [4.0, 4.0, 4.0];
        out[1] = [4.0, 0.0, 0.0];
        out[2] = [0.0, 0.0, 4.0];
        out[3] = [-8.0, -4.0, 0.0];
        out[4] = [0.0, 4.0, 0.0];
        out[5] = [0.0, -4.0, -8.0];
    }
}
