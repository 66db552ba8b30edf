//! Various geometrical and logical helpers.

pub use self::segments_intersection::{
    point_on_segment2d, segments_intersection2d, DegenerateSegment, SegmentsIntersection,
};

pub mod hashmap;
mod segments_intersection;
