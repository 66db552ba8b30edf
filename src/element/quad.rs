//! Bilinear and biquadratic quadrilateral sides (3D meshes).

use crate::element::{SideKind, SideShape};
use crate::math::{Real, RefPoint, RefVector, SIDE_HESS};

/// Four-node bilinear quadrilateral with reference domain `(ξ, η) ∈ [-1, 1]²`.
///
/// Node ordering is counterclockwise: `(-1,-1), (1,-1), (1,1), (-1,1)`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Quad4;

/// Nine-node biquadratic quadrilateral with reference domain `(ξ, η) ∈ [-1, 1]²`.
///
/// Node ordering: the four corners counterclockwise, the four mid-edge nodes
/// counterclockwise starting from the bottom edge, then the center node.
#[derive(Copy, Clone, Debug, Default)]
pub struct Quad9;

const QUAD4_NODES: [[Real; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];

const QUAD9_NODES: [[Real; 2]; 9] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
    [0.0, -1.0],
    [1.0, 0.0],
    [0.0, 1.0],
    [-1.0, 0.0],
    [0.0, 0.0],
];

// Value and first/second derivative of the 1D quadratic Lagrange basis
// attached to the node at `c ∈ {-1, 0, 1}`.
fn lagrange3(c: Real, x: Real) -> (Real, Real, Real) {
    if c < -0.5 {
        (0.5 * x * (x - 1.0), x - 0.5, 1.0)
    } else if c > 0.5 {
        (0.5 * x * (x + 1.0), x + 0.5, 1.0)
    } else {
        (1.0 - x * x, -2.0 * x, -2.0)
    }
}

impl SideShape for Quad4 {
    fn kind(&self) -> SideKind {
        SideKind::Quad4
    }

    fn num_nodes(&self) -> usize {
        4
    }

    fn reference_centroid(&self) -> RefPoint {
        RefPoint::new(0.0, 0.0)
    }

    fn node_reference_coord(&self, local: usize) -> RefPoint {
        let [xi, eta] = QUAD4_NODES[local];
        RefPoint::new(xi, eta)
    }

    fn domain_contains(&self, pt: &RefPoint, tol: Real) -> bool {
        pt.x.abs() <= 1.0 + tol && pt.y.abs() <= 1.0 + tol
    }

    fn phi(&self, pt: &RefPoint, out: &mut [Real]) {
        for (i, [xi_i, eta_i]) in QUAD4_NODES.iter().enumerate() {
            out[i] = 0.25 * (1.0 + xi_i * pt.x) * (1.0 + eta_i * pt.y);
        }
    }

    fn grad_phi(&self, pt: &RefPoint, out: &mut [RefVector]) {
        for (i, [xi_i, eta_i]) in QUAD4_NODES.iter().enumerate() {
            out[i] = RefVector::new(
                0.25 * xi_i * (1.0 + eta_i * pt.y),
                0.25 * eta_i * (1.0 + xi_i * pt.x),
            );
        }
    }

    fn hess_phi(&self, _pt: &RefPoint, out: &mut [[Real; SIDE_HESS]]) {
        for (i, [xi_i, eta_i]) in QUAD4_NODES.iter().enumerate() {
            out[i] = [0.0, 0.25 * xi_i * eta_i, 0.0];
        }
    }
}

impl SideShape for Quad9 {
    fn kind(&self) -> SideKind {
        SideKind::Quad9
    }

    fn num_nodes(&self) -> usize {
        9
    }

    fn reference_centroid(&self) -> RefPoint {
        RefPoint::new(0.0, 0.0)
    }

    fn node_reference_coord(&self, local: usize) -> RefPoint {
        let [xi, eta] = QUAD9_NODES[local];
        RefPoint::new(xi, eta)
    }

    fn domain_contains(&self, pt: &RefPoint, tol: Real) -> bool {
        pt.x.abs() <= 1.0 + tol && pt.y.abs() <= 1.0 + tol
    }

    fn phi(&self, pt: &RefPoint, out: &mut [Real]) {
        for (i, [a, b]) in QUAD9_NODES.iter().enumerate() {
            let (u, _, _) = lagrange3(*a, pt.x);
            let (v, _, _) = lagrange3(*b, pt.y);
            out[i] = u * v;
        }
    }

    fn grad_phi(&self, pt: &RefPoint, out: &mut [RefVector]) {
        for (i, [a, b]) in QUAD9_NODES.iter().enumerate() {
            let (u, du, _) = lagrange3(*a, pt.x);
            let (v, dv, _) = lagrange3(*b, pt.y);
            out[i] = RefVector::new(du * v, u * dv);
        }
    }

    fn hess_phi(&self, pt: &RefPoint, out: &mut [[Real; SIDE_HESS]]) {
        for (i, [a, b]) in QUAD9_NODES.iter().enumerate() {
            let (u, du, ddu) = lagrange3(*a, pt.x);
            let (v, dv, ddv) = lagrange3(*b, pt.y);
            out[i] = [ddu * v, du * dv, u * ddv];
        }
    }
}
