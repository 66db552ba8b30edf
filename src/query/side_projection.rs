use arrayvec::ArrayVec;
use na::Unit;
use num::Zero;

use crate::element::SideShape;
use crate::math::{
    Point, Real, RefMatrix, RefPoint, RefVector, UnitVector, Vector, DEFAULT_EPSILON,
    MAX_SIDE_NODES, SIDE_DIM, SIDE_HESS,
};

/// The iteration bound of the closest-point Newton solver.
pub const MAX_NEWTON_ITERS: usize = 30;

/// Boundary-inclusive tolerance for the reference-domain membership test.
pub const DOMAIN_TOL: Real = 1.0e3 * DEFAULT_EPSILON;

// Convergence tolerance on the scaled Newton residual.
const NEWTON_TOL: Real = 100.0 * DEFAULT_EPSILON;
// Reference-coordinate magnitude past which the iteration is considered divergent.
const DIVERGENCE_BOUND: Real = 1.0e3;

/// A converged closest-point projection onto one boundary side.
///
/// Besides the geometric result, this carries the interpolation data
/// (shape-function values, parametric tangents and curvatures) evaluated at
/// the closest point so that a later detection pass can warm-start from it.
#[derive(Clone, Debug)]
pub struct SideProjection {
    /// The closest point in the side's reference coordinate system.
    pub reference: RefPoint,
    /// The closest point in physical coordinates.
    pub point: Point,
    /// The outward unit normal at the closest point.
    pub normal: UnitVector,
    /// Signed distance from the closest point to the queried point, along
    /// `normal`. Negative means the queried point lies behind the surface.
    pub distance: Real,
    /// The scaled Newton residual at convergence (`0` for the exact linear path).
    pub residual: Real,
    /// Shape-function values at the closest point.
    pub phi: ArrayVec<Real, MAX_SIDE_NODES>,
    /// First parametric derivatives of the physical position at the closest point.
    pub tangents: [Vector; SIDE_DIM],
    /// Distinct second parametric derivatives of the physical position at the
    /// closest point, in the ordering of [`SideShape::hess_phi`].
    pub curvatures: [Vector; SIDE_HESS],
}

/// Reasons for which a projection attempt onto one side candidate is rejected.
///
/// Rejections are local to a single candidate and never abort a detection
/// pass; the driver simply moves on to the next candidate.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum ProjectionRejection {
    /// The Newton iteration did not converge within [`MAX_NEWTON_ITERS`].
    #[error("closest-point iteration did not converge (scaled residual: {residual:.2e})")]
    NoConvergence {
        /// The scaled residual at the last iterate.
        residual: Real,
    },
    /// The iteration converged outside the side's reference domain: the true
    /// closest feature is an edge or vertex owned by a neighboring side.
    #[error("closest point lies outside the side's reference domain")]
    OutsideDomain,
    /// The side is geometrically degenerate (collapsed nodes, zero-length
    /// tangent) and cannot carry a projection.
    #[error("degenerate side geometry")]
    DegenerateSide,
}

struct SideEval {
    x: Point,
    phi: [Real; MAX_SIDE_NODES],
    tangents: [Vector; SIDE_DIM],
    curvatures: [Vector; SIDE_HESS],
}

fn evaluate(side_points: &[Point], shape: &dyn SideShape, xi: &RefPoint) -> SideEval {
    let n = shape.num_nodes();
    let mut phi = [0.0; MAX_SIDE_NODES];
    let mut grad = [RefVector::zero(); MAX_SIDE_NODES];
    let mut hess = [[0.0; SIDE_HESS]; MAX_SIDE_NODES];
    shape.phi(xi, &mut phi[..n]);
    shape.grad_phi(xi, &mut grad[..n]);
    shape.hess_phi(xi, &mut hess[..n]);

    let mut x = Point::origin();
    let mut tangents = [Vector::zero(); SIDE_DIM];
    let mut curvatures = [Vector::zero(); SIDE_HESS];

    for i in 0..n {
        let pi = side_points[i].coords;
        x += pi * phi[i];
        for k in 0..SIDE_DIM {
            tangents[k] += pi * grad[i][k];
        }
        for m in 0..SIDE_HESS {
            curvatures[m] += pi * hess[i][m];
        }
    }

    SideEval {
        x,
        phi,
        tangents,
        curvatures,
    }
}

// Index of the (k, l) second derivative in the symmetric ordering of
// `SideShape::hess_phi`. Assumes k <= l.
fn sym_index(k: usize, l: usize) -> usize {
    k + l
}

#[cfg(feature = "dim3")]
fn outward_normal(tangents: &[Vector; SIDE_DIM]) -> Option<UnitVector> {
    Unit::try_new(tangents[0].cross(&tangents[1]), DEFAULT_EPSILON)
}

#[cfg(feature = "dim2")]
fn outward_normal(tangents: &[Vector; SIDE_DIM]) -> Option<UnitVector> {
    // Interior on the left of the tangent => outward is the tangent rotated by -90°.
    let t = tangents[0];
    Unit::try_new(Vector::new(t.y, -t.x), DEFAULT_EPSILON)
}

/// Computes the closest point on a boundary side to `point`.
///
/// The side's physical position is the parametric surface
/// `x(ξ) = Σᵢ φᵢ(ξ) xᵢ` with `xᵢ = side_points[i]`. The reference coordinate
/// minimizing `‖x(ξ) − point‖` is found by Newton iteration on the
/// gradient-of-squared-distance equations, seeded at `seed` (a warm start
/// from a previous pass, the candidate node's own reference coordinate, or
/// the side centroid). Two-node linear edges take a closed-form path instead.
///
/// A result is returned only if the iteration converges *and* the converged
/// coordinate lies inside the side's reference domain (within [`DOMAIN_TOL`],
/// boundary-inclusive); everything else is a [`ProjectionRejection`].
pub fn project_point_onto_side(
    side_points: &[Point],
    shape: &dyn SideShape,
    point: &Point,
    seed: &RefPoint,
) -> Result<SideProjection, ProjectionRejection> {
    debug_assert_eq!(side_points.len(), shape.num_nodes());

    // Squared length scale of the side, making the tolerances dimensionless.
    let scale_sq = side_points
        .iter()
        .map(|p| (p - side_points[0]).norm_squared())
        .fold(0.0, Real::max);

    if scale_sq <= DEFAULT_EPSILON * DEFAULT_EPSILON {
        return Err(ProjectionRejection::DegenerateSide);
    }

    // Exact path for linear segments; the Newton iteration is unnecessary
    // (and fragile near parallel/degenerate configurations) there.
    #[cfg(feature = "dim2")]
    if shape.num_nodes() == 2 {
        let a = side_points[0];
        let b = side_points[1];
        let ab = b - a;
        let u = (point - a).dot(&ab) / ab.norm_squared();
        let xi = RefPoint::new(2.0 * u - 1.0);

        if !shape.domain_contains(&xi, DOMAIN_TOL) {
            return Err(ProjectionRejection::OutsideDomain);
        }

        return finish(side_points, shape, point, &xi, 0.0);
    }

    let mut xi = *seed;
    let mut residual = Real::MAX;

    for _ in 0..MAX_NEWTON_ITERS {
        let eval = evaluate(side_points, shape, &xi);
        let delta = eval.x - point;

        let mut r = RefVector::zero();
        for k in 0..SIDE_DIM {
            r[k] = eval.tangents[k].dot(&delta);
        }

        residual = r.norm() / scale_sq;
        if residual <= NEWTON_TOL {
            if !shape.domain_contains(&xi, DOMAIN_TOL) {
                return Err(ProjectionRejection::OutsideDomain);
            }
            return finish(side_points, shape, point, &xi, residual);
        }

        let mut jac = RefMatrix::zero();
        for k in 0..SIDE_DIM {
            for l in k..SIDE_DIM {
                let v = eval.tangents[k].dot(&eval.tangents[l])
                    + delta.dot(&eval.curvatures[sym_index(k, l)]);
                jac[(k, l)] = v;
                jac[(l, k)] = v;
            }
        }

        match jac.try_inverse() {
            Some(inv) => xi += inv * (-r),
            // Singular Jacobian: the iteration cannot proceed.
            None => return Err(ProjectionRejection::NoConvergence { residual }),
        }

        if xi.coords.amax() > DIVERGENCE_BOUND {
            return Err(ProjectionRejection::NoConvergence { residual });
        }
    }

    Err(ProjectionRejection::NoConvergence { residual })
}

fn finish(
    side_points: &[Point],
    shape: &dyn SideShape,
    point: &Point,
    xi: &RefPoint,
    residual: Real,
) -> Result<SideProjection, ProjectionRejection> {
    let eval = evaluate(side_points, shape, xi);
    let normal = outward_normal(&eval.tangents).ok_or(ProjectionRejection::DegenerateSide)?;
    let distance = (point - eval.x).dot(&normal);

    Ok(SideProjection {
        reference: *xi,
        point: eval.x,
        normal,
        distance,
        residual,
        phi: eval.phi[..shape.num_nodes()].iter().copied().collect(),
        tangents: eval.tangents,
        curvatures: eval.curvatures,
    })
}
