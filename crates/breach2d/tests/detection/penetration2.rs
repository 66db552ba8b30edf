use approx::assert_relative_eq;
use breach2d::detection::{ConstructionError, LinearScanLocator, PenetrationLocator};
use breach2d::element::{Order, SideKind};
use breach2d::math::{Point, Vector};
use breach2d::mesh::{BoundaryId, ElementId, NodeId, SurfaceMesh};

const MASTER: BoundaryId = BoundaryId(0);
const SLAVE: BoundaryId = BoundaryId(1);

// One master edge along y = 0 with its interior below (outward normal +y),
// one slave edge whose first node sits slightly inside the master body.
fn two_body_mesh() -> SurfaceMesh {
    let points = vec![
        Point::new(1.0, 0.0),   // 0: master
        Point::new(-1.0, 0.0),  // 1: master
        Point::new(0.0, -0.01), // 2: slave, penetrating
        Point::new(0.4, 0.05),  // 3: slave, separated
    ];
    let mut mesh = SurfaceMesh::new(points);
    mesh.push_side(
        MASTER,
        ElementId(0),
        0,
        SideKind::Edge2,
        &[NodeId(0), NodeId(1)],
    )
    .unwrap();
    mesh.push_side(
        SLAVE,
        ElementId(1),
        0,
        SideKind::Edge2,
        &[NodeId(2), NodeId(3)],
    )
    .unwrap();
    mesh
}

#[test]
fn detects_initial_penetration() {
    let mesh = two_body_mesh();
    let nearest = LinearScanLocator::new(&mesh, MASTER, 4);
    let mut locator = PenetrationLocator::new(&mesh, MASTER, SLAVE, Order::First).unwrap();

    locator.detect_penetration(&mesh, &nearest);

    let rec = locator.record(NodeId(2)).unwrap();
    assert_relative_eq!(rec.distance, -0.01, epsilon = 1.0e-6);
    assert_relative_eq!(rec.normal.into_inner(), Vector::new(0.0, 1.0), epsilon = 1.0e-6);
    assert_relative_eq!(rec.closest_point, Point::new(0.0, 0.0), epsilon = 1.0e-6);
    assert_eq!(rec.element, ElementId(0));
    assert_relative_eq!(rec.side_phi.iter().sum::<f32>(), 1.0, epsilon = 1.0e-6);

    assert!(locator.locked_this_step(NodeId(2)));
    assert!(locator.has_penetrated(NodeId(2)));
    assert!(!locator.unlocked_this_step(NodeId(2)));

    // The separated slave node is left untracked.
    assert!(locator.record(NodeId(3)).is_none());
    assert!(!locator.has_penetrated(NodeId(3)));
    assert_eq!(locator.store().len(), 1);
}

#[test]
fn repeated_pass_is_idempotent() {
    let mesh = two_body_mesh();
    let nearest = LinearScanLocator::new(&mesh, MASTER, 4);
    let mut locator = PenetrationLocator::new(&mesh, MASTER, SLAVE, Order::First).unwrap();

    locator.detect_penetration(&mesh, &nearest);
    let first = locator.record(NodeId(2)).unwrap().clone();

    locator.detect_penetration(&mesh, &nearest);
    assert_eq!(locator.record(NodeId(2)), Some(&first));

    // The transition flags describe the latest pass only.
    assert!(!locator.locked_this_step(NodeId(2)));
    assert!(!locator.unlocked_this_step(NodeId(2)));
    assert!(locator.has_penetrated(NodeId(2)));
}

#[test]
fn unlocks_on_separation_and_relocks() {
    let mut mesh = two_body_mesh();
    let nearest = LinearScanLocator::new(&mesh, MASTER, 4);
    let mut locator = PenetrationLocator::new(&mesh, MASTER, SLAVE, Order::First).unwrap();

    locator.detect_penetration(&mesh, &nearest);
    assert!(locator.locked_this_step(NodeId(2)));

    // The slave node backs out of the master body.
    mesh.set_point(NodeId(2), Point::new(0.0, 0.02));
    locator.detect_penetration(&mesh, &nearest);
    assert!(locator.record(NodeId(2)).is_none());
    assert!(locator.unlocked_this_step(NodeId(2)));
    assert!(!locator.locked_this_step(NodeId(2)));
    // `has_penetrated` ratchets: separation does not reset it.
    assert!(locator.has_penetrated(NodeId(2)));

    // One more pass without movement: the unlock transition is gone.
    locator.detect_penetration(&mesh, &nearest);
    assert!(!locator.unlocked_this_step(NodeId(2)));

    // And back in, deeper than before.
    mesh.set_point(NodeId(2), Point::new(0.0, -0.03));
    locator.detect_penetration(&mesh, &nearest);
    let rec = locator.record(NodeId(2)).unwrap();
    assert_relative_eq!(rec.distance, -0.03, epsilon = 1.0e-6);
    assert!(locator.locked_this_step(NodeId(2)));
}

#[test]
fn distance_follows_penetration_depth() {
    let mut mesh = two_body_mesh();
    let nearest = LinearScanLocator::new(&mesh, MASTER, 4);
    let mut locator = PenetrationLocator::new(&mesh, MASTER, SLAVE, Order::First).unwrap();

    let mut previous = 0.0;
    for depth in [0.01, 0.02, 0.05, 0.1] {
        mesh.set_point(NodeId(2), Point::new(0.2, -depth));
        locator.detect_penetration(&mesh, &nearest);

        let dist = locator.penetration_distance(NodeId(2)).unwrap();
        assert_relative_eq!(dist, -depth, epsilon = 1.0e-6);
        assert!(dist < previous);
        previous = dist;
    }
}

#[test]
fn warm_start_matches_full_search() {
    let mut mesh = two_body_mesh();
    let nearest = LinearScanLocator::new(&mesh, MASTER, 4);
    let mut incremental = PenetrationLocator::new(&mesh, MASTER, SLAVE, Order::First).unwrap();
    incremental.set_update(true);
    let mut reference = PenetrationLocator::new(&mesh, MASTER, SLAVE, Order::First).unwrap();

    incremental.detect_penetration(&mesh, &nearest);
    reference.detect_penetration(&mesh, &nearest);

    // Slide the slave node along the master edge between passes.
    mesh.set_point(NodeId(2), Point::new(0.3, -0.02));
    incremental.detect_penetration(&mesh, &nearest);
    reference.detect_penetration(&mesh, &nearest);

    assert_eq!(
        incremental.record(NodeId(2)).unwrap(),
        reference.record(NodeId(2)).unwrap()
    );
}

#[test]
fn contact_tolerance_admits_near_contact() {
    let mut mesh = two_body_mesh();
    mesh.set_point(NodeId(2), Point::new(0.0, 0.005));
    let nearest = LinearScanLocator::new(&mesh, MASTER, 4);

    let mut strict = PenetrationLocator::new(&mesh, MASTER, SLAVE, Order::First).unwrap();
    strict.detect_penetration(&mesh, &nearest);
    assert!(strict.record(NodeId(2)).is_none());

    let mut lenient = PenetrationLocator::new(&mesh, MASTER, SLAVE, Order::First).unwrap();
    lenient.set_contact_tolerance(0.01);
    lenient.detect_penetration(&mesh, &nearest);
    let rec = lenient.record(NodeId(2)).unwrap();
    assert_relative_eq!(rec.distance, 0.005, epsilon = 1.0e-6);
}

#[test]
fn duplicated_master_side_yields_one_deterministic_record() {
    let points = vec![
        Point::new(1.0, 0.0),
        Point::new(-1.0, 0.0),
        Point::new(0.0, -0.01),
        Point::new(0.4, 0.05),
    ];
    let mut mesh = SurfaceMesh::new(points);
    // The same edge registered twice, as happens with doubled-up sidesets.
    mesh.push_side(
        MASTER,
        ElementId(0),
        0,
        SideKind::Edge2,
        &[NodeId(0), NodeId(1)],
    )
    .unwrap();
    mesh.push_side(
        MASTER,
        ElementId(5),
        1,
        SideKind::Edge2,
        &[NodeId(0), NodeId(1)],
    )
    .unwrap();
    mesh.push_side(
        SLAVE,
        ElementId(1),
        0,
        SideKind::Edge2,
        &[NodeId(2), NodeId(3)],
    )
    .unwrap();

    let nearest = LinearScanLocator::new(&mesh, MASTER, 4);
    let mut locator = PenetrationLocator::new(&mesh, MASTER, SLAVE, Order::First).unwrap();
    locator.detect_penetration(&mesh, &nearest);

    let rec = locator.record(NodeId(2)).unwrap();
    assert_eq!(rec.element, ElementId(0));
    assert_eq!(rec.side_index, 0);
    assert_eq!(locator.store().len(), 1);
}

#[test]
fn shared_vertex_tie_picks_lowest_element() {
    let points = vec![
        Point::new(1.0, 0.0),
        Point::new(0.0, 0.0),
        Point::new(-1.0, 0.0),
        Point::new(0.0, -0.01), // slave, under the shared vertex
        Point::new(0.6, 0.1),
    ];
    let mut mesh = SurfaceMesh::new(points);
    mesh.push_side(
        MASTER,
        ElementId(0),
        0,
        SideKind::Edge2,
        &[NodeId(0), NodeId(1)],
    )
    .unwrap();
    mesh.push_side(
        MASTER,
        ElementId(1),
        0,
        SideKind::Edge2,
        &[NodeId(1), NodeId(2)],
    )
    .unwrap();
    mesh.push_side(
        SLAVE,
        ElementId(2),
        0,
        SideKind::Edge2,
        &[NodeId(3), NodeId(4)],
    )
    .unwrap();

    let nearest = LinearScanLocator::new(&mesh, MASTER, 8);
    let mut locator = PenetrationLocator::new(&mesh, MASTER, SLAVE, Order::First).unwrap();
    locator.detect_penetration(&mesh, &nearest);

    // Both edges carry the closest point at the shared vertex; the lowest
    // (element, side index) pair wins.
    let rec = locator.record(NodeId(3)).unwrap();
    assert_eq!(rec.element, ElementId(0));
    assert_relative_eq!(rec.closest_point, Point::new(0.0, 0.0), epsilon = 1.0e-6);
    assert_relative_eq!(rec.distance, -0.01, epsilon = 1.0e-6);
}

#[test]
fn quadratic_edge_end_to_end() {
    let points = vec![
        Point::new(1.0, 0.0),    // 0: master, xi = -1
        Point::new(-1.0, 0.0),   // 1: master, xi = +1
        Point::new(0.0, 0.0),    // 2: master, xi = 0
        Point::new(0.3, -0.02),  // 3: slave, penetrating
        Point::new(0.3, 0.2),    // 4: slave, separated
        Point::new(0.3, 0.09),   // 5: slave, mid node
    ];
    let mut mesh = SurfaceMesh::new(points);
    mesh.push_side(
        MASTER,
        ElementId(0),
        0,
        SideKind::Edge3,
        &[NodeId(0), NodeId(1), NodeId(2)],
    )
    .unwrap();
    mesh.push_side(
        SLAVE,
        ElementId(1),
        0,
        SideKind::Edge3,
        &[NodeId(3), NodeId(4), NodeId(5)],
    )
    .unwrap();

    let nearest = LinearScanLocator::new(&mesh, MASTER, 4);
    let mut locator = PenetrationLocator::new(&mesh, MASTER, SLAVE, Order::Second).unwrap();
    locator.detect_penetration(&mesh, &nearest);

    let rec = locator.record(NodeId(3)).unwrap();
    assert_relative_eq!(rec.closest_point, Point::new(0.3, 0.0), epsilon = 1.0e-4);
    assert_relative_eq!(rec.distance, -0.02, epsilon = 1.0e-4);
    assert_relative_eq!(rec.normal.into_inner(), Vector::new(0.0, 1.0), epsilon = 1.0e-4);
}

#[test]
fn construction_rejects_bad_configurations() {
    let mesh = two_body_mesh();

    assert_eq!(
        PenetrationLocator::new(&mesh, BoundaryId(9), SLAVE, Order::First).unwrap_err(),
        ConstructionError::UnknownBoundary(BoundaryId(9))
    );
    assert_eq!(
        PenetrationLocator::new(&mesh, MASTER, BoundaryId(9), Order::First).unwrap_err(),
        ConstructionError::UnknownBoundary(BoundaryId(9))
    );
    assert_eq!(
        PenetrationLocator::new(&mesh, MASTER, SLAVE, Order::Second).unwrap_err(),
        ConstructionError::OrderMismatch {
            element: ElementId(0),
            side_index: 0,
            expected: Order::Second,
            found: Order::First,
        }
    );
}
