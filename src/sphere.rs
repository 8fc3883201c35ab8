// Copyright (c) 2020-2024 Via Technology Ltd. All Rights Reserved.

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The sphere module contains the geometry primitives on the surface of a
//! unit sphere.
//!
//! A `PointOnSphere` is a unit vector in Earth Centred Earth Fixed
//! coordinates. The sub-modules build arcs, rotations, small circles and
//! the point sequence geometries from it.

pub mod arc;
pub mod great_circle;
pub mod multi_point;
pub mod polygon;
pub mod polyline;
pub mod rotation;
pub mod small_circle;

extern crate nalgebra as na;
use crate::error::GeometryError;
use crate::latlong::LatLong;
use crate::trig;
use crate::trig::{Angle, Radians, UnitNegRange};
use crate::Validate;
use contracts::{debug_ensures, debug_requires};
use std::ops::Neg;

/// A Point is a nalgebra Vector3.
pub type Point = na::Vector3<f64>;

/// The minimum length of a vector to normalize.
pub const MIN_LENGTH: f64 = 16384.0 * std::f64::EPSILON;

/// Create a Point from latitude and longitude
/// @pre |lat| <= 90.0 degrees.
/// * `lat` - the latitude.
/// * `lon` - the longitude.
///
/// returns a Point on the unit sphere.
#[debug_requires(lat.is_valid_latitude())]
#[debug_ensures(is_unit(&ret))]
#[must_use]
pub fn to_sphere(lat: Angle, lon: Angle) -> Point {
    Point::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// Determine whether a Point is a unit vector.
///
/// returns true if Point is a unit vector, false otherwise.
#[must_use]
pub fn is_unit(a: &Point) -> bool {
    const MIN_POINT_LENGTH: f64 = 1.0 - 12.0 * std::f64::EPSILON;
    const MAX_POINT_LENGTH: f64 = 1.0 + 12.0 * std::f64::EPSILON;

    (MIN_POINT_LENGTH..=MAX_POINT_LENGTH).contains(&(a.norm()))
}

impl Validate for Point {
    /// Test whether a Point is valid.
    /// I.e. whether the Point is a unit vector.
    fn is_valid(&self) -> bool {
        is_unit(self)
    }
}

/// Determine whether two Points are orthogonal (perpendicular).
///
/// returns true if a and b are orthogonal, false otherwise.
#[must_use]
pub fn are_orthogonal(a: &Point, b: &Point) -> bool {
    const MAX_LENGTH: f64 = 4.0 * std::f64::EPSILON;

    (-MAX_LENGTH..=MAX_LENGTH).contains(&(a.dot(b)))
}

/// Determine whether two unit vectors are coincident, i.e. whether the
/// great circle through them is undefined and they lie on the same side
/// of the sphere.
#[must_use]
pub fn are_coincident(a: &Point, b: &Point) -> bool {
    a.cross(b).norm() < MIN_LENGTH && 0.0 < a.dot(b)
}

/// Determine whether two unit vectors are antipodal, i.e. whether the
/// great circle through them is undefined and they lie on opposite sides
/// of the sphere.
#[must_use]
pub fn are_antipodal(a: &Point, b: &Point) -> bool {
    a.cross(b).norm() < MIN_LENGTH && a.dot(b) < 0.0
}

/// Calculate the Great Circle distance (in radians) between two points.
/// It uses the vector cross and dot products, so it is accurate for both
/// small and large distances.
#[debug_requires(is_unit(a) && is_unit(b))]
#[debug_ensures((0.0..=std::f64::consts::PI).contains(&ret.0))]
#[must_use]
pub fn gc_distance(a: &Point, b: &Point) -> Radians {
    Radians(libm::atan2(a.cross(b).norm(), a.dot(b)))
}

/// A location on the surface of the unit sphere.
///
/// The invariant of a `PointOnSphere` is that its position vector is a
/// unit vector. Points are immutable values: rotations and projections
/// create new points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointOnSphere(Point);

impl Validate for PointOnSphere {
    fn is_valid(&self) -> bool {
        is_unit(&self.0)
    }
}

impl PointOnSphere {
    /// Construct a `PointOnSphere` from a unit vector.
    /// # Errors
    /// `GeometryError::InvalidUnitVector` if the vector is not of unit length.
    /// # Examples
    /// ```
    /// use tectonic_sphere::sphere::{Point, PointOnSphere};
    /// use tectonic_sphere::GeometryError;
    ///
    /// assert!(PointOnSphere::from_unit_vector(Point::new(0.0, 0.6, 0.8)).is_ok());
    /// assert!(matches!(
    ///     PointOnSphere::from_unit_vector(Point::new(0.0, 1.0, 1.0)),
    ///     Err(GeometryError::InvalidUnitVector { .. })
    /// ));
    /// ```
    pub fn from_unit_vector(v: Point) -> Result<Self, GeometryError> {
        if is_unit(&v) {
            Ok(Self(v))
        } else {
            Err(GeometryError::InvalidUnitVector { norm: v.norm() })
        }
    }

    /// Construct a `PointOnSphere` from a latitude and longitude in degrees.
    #[debug_ensures(ret.is_valid())]
    #[must_use]
    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        Self::from(&LatLong::from_degrees(lat, lon))
    }

    /// Construct a `PointOnSphere` from the result of a calculation which
    /// should be a unit vector, removing any accumulated round-off.
    #[debug_requires(MIN_LENGTH < v.norm())]
    #[debug_ensures(ret.is_valid())]
    pub(crate) fn from_normalised(v: &Point) -> Self {
        Self(v.normalize())
    }

    /// The North pole: (0, 0, 1).
    #[must_use]
    pub fn north_pole() -> Self {
        Self(Point::new(0.0, 0.0, 1.0))
    }

    /// The South pole: (0, 0, -1).
    #[must_use]
    pub fn south_pole() -> Self {
        Self(Point::new(0.0, 0.0, -1.0))
    }

    /// The position vector of the point.
    #[must_use]
    pub const fn position_vector(&self) -> &Point {
        &self.0
    }

    /// The x component of the position vector.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    /// The y component of the position vector.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    /// The z component of the position vector.
    #[must_use]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    /// The dot product of the position vectors of two points.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.0.dot(&other.0)
    }

    /// The closeness of another point to this point: the cosine of the
    /// angle between them. 1.0 is coincident, -1.0 is antipodal.
    #[debug_ensures((-1.0..=1.0).contains(&ret))]
    #[must_use]
    pub fn closeness(&self, other: &Self) -> f64 {
        UnitNegRange::clamp(self.dot(other)).0
    }

    /// The Great Circle distance between two points.
    #[must_use]
    pub fn gc_distance(&self, other: &Self) -> Radians {
        gc_distance(&self.0, &other.0)
    }

    /// The point on the opposite side of the sphere.
    #[must_use]
    pub fn antipode(&self) -> Self {
        Self(-self.0)
    }

    /// Whether another point is coincident with this point.
    #[must_use]
    pub fn is_coincident(&self, other: &Self) -> bool {
        are_coincident(&self.0, &other.0)
    }

    /// Whether another point is antipodal to this point.
    #[must_use]
    pub fn is_antipodal(&self, other: &Self) -> bool {
        are_antipodal(&self.0, &other.0)
    }

    /// The latitude of the point.
    #[debug_ensures(ret.is_valid_latitude())]
    #[must_use]
    pub fn latitude(&self) -> Angle {
        let sin_a = UnitNegRange::clamp(self.0.z);
        Angle::new(sin_a, trig::swap_sin_cos(sin_a))
    }

    /// The longitude of the point.
    /// Note: the poles do not have a longitude, it is zero.
    #[must_use]
    pub fn longitude(&self) -> Angle {
        Angle::from_y_x(self.0.y, self.0.x)
    }

    /// The latitude and longitude of the point.
    #[must_use]
    pub fn to_lat_long(&self) -> LatLong {
        LatLong::from(self)
    }
}

impl Neg for PointOnSphere {
    type Output = Self;

    fn neg(self) -> Self {
        self.antipode()
    }
}

impl From<&LatLong> for PointOnSphere {
    /// Convert a `LatLong` to a point on the unit sphere.
    fn from(value: &LatLong) -> Self {
        Self(to_sphere(value.lat(), value.lon()))
    }
}

impl From<&PointOnSphere> for LatLong {
    /// Convert a point on the unit sphere to a `LatLong`.
    fn from(value: &PointOnSphere) -> Self {
        Self::new(value.latitude(), value.longitude())
    }
}

impl TryFrom<Point> for PointOnSphere {
    type Error = GeometryError;

    fn try_from(value: Point) -> Result<Self, Self::Error> {
        Self::from_unit_vector(value)
    }
}

/// Check that a sequence of points forms a valid polyline or polygon ring:
/// it has at least `minimum` points and no consecutive points are
/// coincident or antipodal.
/// * `points` the points.
/// * `minimum` the minimum number of points.
/// * `closed` whether the last point is joined to the first.
///
/// # Errors
/// `InsufficientPoints`, `DegenerateSegment` or `AntipodalPoints`.
pub(crate) fn validate_sequence(
    points: &[PointOnSphere],
    minimum: usize,
    closed: bool,
) -> Result<(), GeometryError> {
    if points.len() < minimum {
        return Err(GeometryError::InsufficientPoints {
            required: minimum,
            actual: points.len(),
        });
    }

    let closing = if closed {
        points.last().zip(points.first())
    } else {
        None
    };
    let segments = points
        .windows(2)
        .map(|pair| (&pair[0], &pair[1]))
        .chain(closing);
    for (index, (a, b)) in segments.enumerate() {
        if a.is_coincident(b) {
            return Err(GeometryError::DegenerateSegment { index });
        }
        if a.is_antipodal(b) {
            return Err(GeometryError::AntipodalPoints);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_within_tolerance;
    use crate::trig::Degrees;

    #[test]
    fn test_point_lat_longs() {
        let south_pole = PointOnSphere::from_degrees(-90.0, 180.0);
        assert!(south_pole.is_valid());
        let result = LatLong::from(&south_pole);
        assert_eq!(-90.0, Degrees::from(result.lat()).0);
        // Note: longitude is now zero, since the poles do not have a longitude
        assert_eq!(0.0, Degrees::from(result.lon()).0);

        let greenwich = PointOnSphere::from_degrees(0.0, 0.0);
        assert_eq!(Point::new(1.0, 0.0, 0.0), *greenwich.position_vector());

        let point = PointOnSphere::from_degrees(-30.0, 120.0);
        let result = LatLong::from(&point);
        assert!(is_within_tolerance(
            -30.0,
            Degrees::from(result.lat()).0,
            64.0 * std::f64::EPSILON
        ));
        assert!(is_within_tolerance(
            120.0,
            Degrees::from(result.lon()).0,
            128.0 * std::f64::EPSILON
        ));
    }

    #[test]
    fn test_from_unit_vector() {
        let point = PointOnSphere::from_unit_vector(Point::new(0.6, 0.0, 0.8)).unwrap();
        assert!(point.is_valid());

        let result = PointOnSphere::from_unit_vector(Point::new(0.0, 0.0, 1.001));
        assert!(matches!(
            result,
            Err(GeometryError::InvalidUnitVector { .. })
        ));

        let result = PointOnSphere::try_from(Point::new(0.0, 0.0, 0.0));
        assert_eq!(Err(GeometryError::InvalidUnitVector { norm: 0.0 }), result);
    }

    #[test]
    fn test_unit_vector_invariant() {
        for lat in (-90..=90).step_by(15) {
            for lon in (-180..=180).step_by(20) {
                let point = PointOnSphere::from_degrees(f64::from(lat), f64::from(lon));
                assert!(libm::fabs(point.position_vector().norm() - 1.0) < 12.0 * std::f64::EPSILON);
            }
        }
    }

    #[test]
    fn test_coincident_and_antipodal() {
        let a = PointOnSphere::from_degrees(10.0, 20.0);
        let b = PointOnSphere::from_degrees(10.0, 20.000001);

        assert!(a.is_coincident(&a));
        assert!(!a.is_coincident(&b));
        assert!(!a.is_antipodal(&a));
        assert!(a.is_antipodal(&-a));
        assert!(!a.is_coincident(&a.antipode()));
    }

    #[test]
    fn test_point_gc_distance() {
        let north_pole = PointOnSphere::north_pole();
        let south_pole = PointOnSphere::south_pole();

        assert_eq!(0.0, north_pole.gc_distance(&north_pole).0);
        assert_eq!(std::f64::consts::PI, north_pole.gc_distance(&south_pole).0);

        let equator = PointOnSphere::from_degrees(0.0, 45.0);
        assert!(is_within_tolerance(
            std::f64::consts::FRAC_PI_2,
            north_pole.gc_distance(&equator).0,
            std::f64::EPSILON
        ));
        assert!(is_within_tolerance(
            0.0,
            north_pole.closeness(&equator),
            std::f64::EPSILON
        ));
        assert_eq!(-1.0, north_pole.closeness(&south_pole));
    }

    #[test]
    fn test_validate_sequence() {
        let a = PointOnSphere::from_degrees(0.0, 0.0);
        let b = PointOnSphere::from_degrees(0.0, 10.0);
        let c = PointOnSphere::from_degrees(10.0, 10.0);

        assert!(validate_sequence(&[a, b, c], 2, false).is_ok());
        assert!(validate_sequence(&[a, b, c], 3, true).is_ok());
        assert_eq!(
            Err(GeometryError::InsufficientPoints {
                required: 3,
                actual: 2
            }),
            validate_sequence(&[a, b], 3, true)
        );
        assert_eq!(
            Err(GeometryError::DegenerateSegment { index: 1 }),
            validate_sequence(&[a, b, b, c], 2, false)
        );
        // the closing segment of a ring
        assert_eq!(
            Err(GeometryError::DegenerateSegment { index: 3 }),
            validate_sequence(&[a, b, c, a], 3, true)
        );
        assert_eq!(
            Err(GeometryError::AntipodalPoints),
            validate_sequence(&[a, -a], 2, false)
        );
    }
}
