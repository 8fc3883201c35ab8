//! Shared helpers for the integration tests.

#![allow(dead_code)]

use tectonic_sphere::sphere::{Point, PointOnSphere};

/// Initialise logging once per test binary, output is captured by the
/// test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A point on the equator at a longitude in degrees.
pub fn equator(lon: f64) -> PointOnSphere {
    PointOnSphere::from_degrees(0.0, lon)
}

pub fn unit(x: f64, y: f64, z: f64) -> PointOnSphere {
    PointOnSphere::from_unit_vector(Point::new(x, y, z)).unwrap()
}
