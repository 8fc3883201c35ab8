//! Integration tests of the geometry primitives and hit testing.

mod support;

use std::f64::consts::{FRAC_PI_3, FRAC_PI_6};
use support::{equator, init_logging, unit};
use tectonic_sphere::geometry::GeometryOnSphere;
use tectonic_sphere::is_within_tolerance;
use tectonic_sphere::proximity::layer::{sort_by_index, test_proximity};
use tectonic_sphere::proximity::ProximityCriteria;
use tectonic_sphere::sphere::arc::{calculate_angle_between_arcs, tessellate, GreatCircleArc};
use tectonic_sphere::sphere::polygon::PolygonOnSphere;
use tectonic_sphere::sphere::small_circle::SmallCircle;
use tectonic_sphere::sphere::{Point, PointOnSphere};
use tectonic_sphere::trig::{Degrees, Radians};
use tectonic_sphere::GeometryError;

#[test]
fn test_concentric_small_circles() {
    init_logging();

    let centre = Point::new(0.0, 0.0, 1.0);
    let first = SmallCircle::create(&centre, &PointOnSphere::from_degrees(60.0, 0.0)).unwrap();
    let copy = first;
    assert!(is_within_tolerance(0.5236, first.colatitude().0, 1e-4));
    assert!(is_within_tolerance(FRAC_PI_6, first.colatitude().0, 1e-12));

    let second = SmallCircle::create(&centre, &PointOnSphere::from_degrees(30.0, 45.0)).unwrap();
    assert!(is_within_tolerance(1.0472, second.colatitude().0, 1e-4));
    assert!(is_within_tolerance(FRAC_PI_3, second.colatitude().0, 1e-12));

    assert_eq!(copy, first);
    assert!(is_within_tolerance(
        30.0,
        Degrees::from(first.colatitude()).0,
        1e-12
    ));
}

#[test]
fn test_antipodal_arcs_are_rejected() {
    for lat in [-90.0, -45.0, 0.0, 30.0, 89.0] {
        for lon in [-180.0, -60.0, 0.0, 75.0, 135.0] {
            let p = PointOnSphere::from_degrees(lat, lon);
            assert_eq!(
                Err(GeometryError::AntipodalPoints),
                GreatCircleArc::create(&p, &-p)
            );
        }
    }
}

#[test]
fn test_arc_tessellation() {
    let start = PointOnSphere::from_degrees(-20.0, 30.0);
    let end = PointOnSphere::from_degrees(40.0, 70.0);
    let arc = GreatCircleArc::create(&start, &end).unwrap();
    let reverse = GreatCircleArc::create(&end, &start).unwrap();
    assert_eq!(arc.arc_angle(), reverse.arc_angle());

    let step = Radians::from(Degrees(2.3));
    let mut points = Vec::new();
    tessellate(&mut points, &arc, step);
    assert_eq!(Some(&start), points.first());
    assert_eq!(Some(&end), points.last());
    for pair in points.windows(2) {
        assert!(pair[0].gc_distance(&pair[1]).0 <= step.0);
    }

    // tessellating again gives the same points
    let again: Vec<_> = arc.tessellate(step).collect();
    assert_eq!(points, again);

    let zero = GreatCircleArc::create(&start, &start).unwrap();
    assert!(zero.is_zero_length());
    assert_eq!(0.0, zero.arc_angle().0);
    let mut points = Vec::new();
    tessellate(&mut points, &zero, step);
    assert_eq!(vec![start], points);
}

#[test]
fn test_angle_between_arcs_wraps() {
    let prev = GreatCircleArc::create(&unit(0.0, -1.0, 0.0), &unit(1.0, 0.0, 0.0)).unwrap();
    let next = GreatCircleArc::create(&unit(1.0, 0.0, 0.0), &unit(0.0, 0.0, -1.0)).unwrap();
    let angle = calculate_angle_between_arcs(&prev, &next).unwrap();
    assert!(is_within_tolerance(-90.0, angle.0, 1e-12));
}

#[test]
fn test_polygon_minimum_points() {
    assert_eq!(
        Err(GeometryError::InsufficientPoints {
            required: 3,
            actual: 2
        }),
        PolygonOnSphere::create(vec![equator(0.0), equator(10.0)])
    );

    let polygon =
        PolygonOnSphere::create(vec![equator(0.0), equator(10.0), PointOnSphere::from_degrees(10.0, 5.0)])
            .unwrap();
    assert_eq!(3, polygon.number_of_vertices());
    assert_eq!(3, polygon.number_of_segments());
    assert!(polygon.contains(&PointOnSphere::from_degrees(3.0, 5.0)));
    assert!(!polygon.contains(&PointOnSphere::from_degrees(-3.0, 5.0)));

    assert_eq!(
        Err(GeometryError::DegenerateSegment { index: 2 }),
        PolygonOnSphere::create(vec![equator(0.0), equator(10.0), equator(0.0)])
    );
}

#[test]
fn test_proximity_ranking_and_threshold() {
    init_logging();

    let query = equator(0.0);
    let candidates: Vec<_> = [0.9_f64, 0.99, 0.5]
        .iter()
        .map(|closeness| GeometryOnSphere::from(equator(libm::acos(*closeness).to_degrees())))
        .collect();

    let hits = test_proximity(&ProximityCriteria::new(query, 0.0), &candidates);
    let indices: Vec<_> = hits.iter().map(|hit| hit.geometry_index).collect();
    assert_eq!(vec![1, 0, 2], indices);
    for (hit, expected) in hits.iter().zip([0.99, 0.9, 0.5]) {
        assert!(is_within_tolerance(expected, hit.detail.closeness(), 1e-12));
    }

    let hits = test_proximity(&ProximityCriteria::new(query, 0.95), &candidates);
    assert_eq!(1, hits.len());
    assert_eq!(1, hits[0].geometry_index);

    let mut hits = test_proximity(&ProximityCriteria::new(query, 0.0), &candidates);
    sort_by_index(&mut hits);
    let indices: Vec<_> = hits.iter().map(|hit| hit.geometry_index).collect();
    assert_eq!(vec![0, 1, 2], indices);

    assert!(test_proximity(&ProximityCriteria::new(query, 0.0), &[]).is_empty());
}
