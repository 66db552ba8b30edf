//! Geometric closest-point queries on boundary sides.

pub use self::side_projection::{
    project_point_onto_side, ProjectionRejection, SideProjection, DOMAIN_TOL, MAX_NEWTON_ITERS,
};

mod side_projection;
