use na::Point2;

use crate::math::Real;

/// Error returned when a zero-length segment is given to an intersection test.
///
/// The closed-form predicates divide by segment lengths, so degenerate inputs
/// are rejected up-front instead of producing a spurious point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("zero-length segment given to a segment intersection test")]
pub struct DegenerateSegment;

/// Intersection between two segments.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SegmentsIntersection {
    /// Single point of intersection.
    Point {
        /// The intersection point.
        point: Point2<Real>,
        /// Parameters of the intersection point along the first and second segment,
        /// both in `[0, 1]`.
        params: [Real; 2],
    },
    /// Intersection along a segment (when both segments are collinear).
    Overlap {
        /// First bounding point of the overlap, on the first segment.
        start: Point2<Real>,
        /// Second bounding point of the overlap, on the first segment.
        end: Point2<Real>,
    },
}

/// Computes the intersection between the segments `[a, b]` and `[c, d]`.
///
/// `epsilon` is the relative tolerance deciding parallelism and collinearity.
/// Zero-length input segments are rejected with [`DegenerateSegment`].
pub fn segments_intersection2d(
    a: &Point2<Real>,
    b: &Point2<Real>,
    c: &Point2<Real>,
    d: &Point2<Real>,
    epsilon: Real,
) -> Result<Option<SegmentsIntersection>, DegenerateSegment> {
    let r1 = b - a;
    let r2 = d - c;
    let len1 = r1.norm();
    let len2 = r2.norm();

    if len1 <= epsilon || len2 <= epsilon {
        return Err(DegenerateSegment);
    }

    let denom = r1.perp(&r2);

    // If denom is zero, then segments are parallel: handle separately.
    if denom.abs() < epsilon * len1 * len2 || ulps_eq!(denom, 0.0) {
        return Ok(parallel_intersection(a, b, c, d, epsilon));
    }

    let ac = c - a;
    let s = ac.perp(&r2) / denom;
    let t = ac.perp(&r1) / denom;

    if 0.0 > s || s > 1.0 || 0.0 > t || t > 1.0 {
        Ok(None)
    } else {
        Ok(Some(SegmentsIntersection::Point {
            point: a + r1 * s,
            params: [s, t],
        }))
    }
}

/// Containment parameter of a point known to be collinear with the segment `[a, b]`.
///
/// Returns the parameter `t ∈ [0, 1]` such that `p = a + t * (b - a)` if the
/// point lies within the segment bounds (within `epsilon`), `None` otherwise.
/// A zero-length segment is rejected with [`DegenerateSegment`].
pub fn point_on_segment2d(
    p: &Point2<Real>,
    a: &Point2<Real>,
    b: &Point2<Real>,
    epsilon: Real,
) -> Result<Option<Real>, DegenerateSegment> {
    let ab = b - a;
    let len_sq = ab.norm_squared();

    if len_sq <= epsilon * epsilon {
        return Err(DegenerateSegment);
    }

    let t = (p - a).dot(&ab) / len_sq;
    if t < -epsilon || t > 1.0 + epsilon {
        Ok(None)
    } else {
        Ok(Some(t.clamp(0.0, 1.0)))
    }
}

fn parallel_intersection(
    a: &Point2<Real>,
    b: &Point2<Real>,
    c: &Point2<Real>,
    d: &Point2<Real>,
    epsilon: Real,
) -> Option<SegmentsIntersection> {
    let r1 = b - a;
    let len1_sq = r1.norm_squared();

    // Parallel but not collinear: disjoint lines.
    if (c - a).perp(&r1).abs() > epsilon * len1_sq {
        return None;
    }

    let tc = (c - a).dot(&r1) / len1_sq;
    let td = (d - a).dot(&r1) / len1_sq;
    let (lo, hi) = if tc <= td { (tc, td) } else { (td, tc) };
    let lo = lo.max(0.0);
    let hi = hi.min(1.0);

    if lo > hi {
        return None;
    }

    let start = a + r1 * lo;
    let end = a + r1 * hi;

    if (hi - lo) * len1_sq.sqrt() <= epsilon {
        // The overlap collapses to a single shared point.
        let t = (start - c).dot(&(d - c)) / (d - c).norm_squared();
        Some(SegmentsIntersection::Point {
            point: start,
            params: [lo, t],
        })
    } else {
        Some(SegmentsIntersection::Overlap { start, end })
    }
}
