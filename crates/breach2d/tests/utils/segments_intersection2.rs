use approx::assert_relative_eq;
use breach2d::math::Point;
use breach2d::utils::{self, SegmentsIntersection};

#[test]
fn crossing_segments_intersect_at_a_point() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(2.0, 0.0);
    let c = Point::new(1.0, -1.0);
    let d = Point::new(1.0, 1.0);

    match utils::segments_intersection2d(&a, &b, &c, &d, 1.0e-6).unwrap() {
        Some(SegmentsIntersection::Point { point, params }) => {
            assert_relative_eq!(point, Point::new(1.0, 0.0), epsilon = 1.0e-6);
            assert_relative_eq!(params[0], 0.5, epsilon = 1.0e-6);
            assert_relative_eq!(params[1], 0.5, epsilon = 1.0e-6);
        }
        other => panic!("expected a point intersection, got {:?}", other),
    }
}

#[test]
fn separated_segments_do_not_intersect() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(1.0, 0.0);
    let c = Point::new(0.0, 1.0);
    let d = Point::new(1.0, 2.0);

    assert!(utils::segments_intersection2d(&a, &b, &c, &d, 1.0e-6)
        .unwrap()
        .is_none());
}

#[test]
fn point_on_segment_reports_its_parameter() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(4.0, 0.0);

    let u = utils::point_on_segment2d(&Point::new(1.0, 0.0), &a, &b, 1.0e-6)
        .unwrap()
        .unwrap();
    assert_relative_eq!(u, 0.25, epsilon = 1.0e-6);

    assert!(utils::point_on_segment2d(&Point::new(5.0, 0.0), &a, &b, 1.0e-6)
        .unwrap()
        .is_none());
}
