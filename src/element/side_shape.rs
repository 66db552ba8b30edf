use crate::element::SideKind;
use crate::math::{Real, RefPoint, RefVector, SIDE_HESS};

/// Shape-function evaluation capability of a boundary side family.
///
/// Implementations are stateless and re-entrant: evaluation is a pure
/// function of the reference coordinate, and all outputs are written into
/// caller-provided buffers sized to [`SideShape::num_nodes`].
///
/// The physical position of a side is `x(ξ) = Σᵢ φᵢ(ξ) xᵢ` where `xᵢ` are its
/// node positions; the parametric tangents and curvatures follow from the
/// first and second derivatives of `φ`.
pub trait SideShape: Sync {
    /// The tag of this side family.
    fn kind(&self) -> SideKind;

    /// The number of nodes (and shape functions) of this family.
    fn num_nodes(&self) -> usize;

    /// The centroid of the reference domain, used as a default Newton seed.
    fn reference_centroid(&self) -> RefPoint;

    /// The reference coordinate of the `local`-th node of the side.
    fn node_reference_coord(&self, local: usize) -> RefPoint;

    /// Tests whether `pt` lies within the reference domain, boundary-inclusive
    /// within `tol`.
    fn domain_contains(&self, pt: &RefPoint, tol: Real) -> bool;

    /// Evaluates the shape-function values at `pt` into `out[..num_nodes]`.
    fn phi(&self, pt: &RefPoint, out: &mut [Real]);

    /// Evaluates the first parametric derivatives of the shape functions.
    fn grad_phi(&self, pt: &RefPoint, out: &mut [RefVector]);

    /// Evaluates the distinct second parametric derivatives of the shape
    /// functions, ordered `[∂²/∂ξ²]` in 2D and `[∂²/∂ξ², ∂²/∂ξ∂η, ∂²/∂η²]`
    /// in 3D.
    fn hess_phi(&self, pt: &RefPoint, out: &mut [[Real; SIDE_HESS]]);
}
