//! Linear and quadratic edge sides (2D meshes).

use crate::element::{SideKind, SideShape};
use crate::math::{Real, RefPoint, RefVector, SIDE_HESS};

/// Two-node linear edge with reference domain `ξ ∈ [-1, 1]`.
///
/// Node ordering: `ξ = -1, +1`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Edge2;

/// Three-node quadratic edge with reference domain `ξ ∈ [-1, 1]`.
///
/// Node ordering: vertices first (`ξ = -1, +1`), then the mid-edge node
/// (`ξ = 0`).
#[derive(Copy, Clone, Debug, Default)]
pub struct Edge3;

impl SideShape for Edge2 {
    fn kind(&self) -> SideKind {
        SideKind::Edge2
    }

    fn num_nodes(&self) -> usize {
        2
    }

    fn reference_centroid(&self) -> RefPoint {
        RefPoint::new(0.0)
    }

    fn node_reference_coord(&self, local: usize) -> RefPoint {
        RefPoint::new([-1.0, 1.0][local])
    }

    fn domain_contains(&self, pt: &RefPoint, tol: Real) -> bool {
        pt.x.abs() <= 1.0 + tol
    }

    fn phi(&self, pt: &RefPoint, out: &mut [Real]) {
        let xi = pt.x;
        out[0] = 0.5 * (1.0 - xi);
        out[1] = 0.5 * (1.0 + xi);
    }

    fn grad_phi(&self, _pt: &RefPoint, out: &mut [RefVector]) {
        out[0] = RefVector::new(-0.5);
        out[1] = RefVector::new(0.5);
    }

    fn hess_phi(&self, _pt: &RefPoint, out: &mut [[Real; SIDE_HESS]]) {
        out[0] = [0.0];
        out[1] = [0.0];
    }
}

impl SideShape for Edge3 {
    fn kind(&self) -> SideKind {
        SideKind::Edge3
    }

    fn num_nodes(&self) -> usize {
        3
    }

    fn reference_centroid(&self) -> RefPoint {
        RefPoint::new(0.0)
    }

    fn node_reference_coord(&self, local: usize) -> RefPoint {
        RefPoint::new([-1.0, 1.0, 0.0][local])
    }

    fn domain_contains(&self, pt: &RefPoint, tol: Real) -> bool {
        pt.x.abs() <= 1.0 + tol
    }

    fn phi(&self, pt: &RefPoint, out: &mut [Real]) {
        let xi = pt.x;
        out[0] = 0.5 * xi * (xi - 1.0);
        out[1] = 0.5 * xi * (xi + 1.0);
        out[2] = 1.0 - xi * xi;
    }

    fn grad_phi(&self, pt: &RefPoint, out: &mut [RefVector]) {
        let xi = pt.x;
        out[0] = RefVector::new(xi - 0.5);
        out[1] = RefVector::new(xi + 0.5);
        out[2] = RefVector::new(-2.0 * xi);
    }

    fn hess_phi(&self, _pt: &RefPoint, out: &mut [[Real; SIDE_HESS]]) {
        out[0] = [1.0];
        out[1] = [1.0];
        out[2] = [-2.0];
    }
}
