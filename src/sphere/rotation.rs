// Copyright (c) 2024 Via Technology Ltd. All Rights Reserved.

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

//! The rotation module contains the `Rotation` type: a finite rotation of
//! the sphere about an axis through its centre, aka an Euler pole.

extern crate nalgebra as na;
use super::multi_point::MultiPointOnSphere;
use super::polygon::PolygonOnSphere;
use super::polyline::PolylineOnSphere;
use super::{Point, PointOnSphere, MIN_LENGTH};
use crate::geometry::GeometryOnSphere;
use crate::latlong::LatLong;
use crate::trig::{Degrees, Radians};
use contracts::debug_ensures;

/// A rotation about an axis through the centre of the sphere.
/// Positive angles rotate anticlockwise looking down the axis towards the
/// centre of the sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    axis: PointOnSphere,
    angle: Radians,
    quaternion: na::UnitQuaternion<f64>,
}

impl Rotation {
    /// Construct a `Rotation` about an axis by an angle.
    /// * `axis` - the rotation axis.
    /// * `angle` - the rotation angle.
    #[must_use]
    pub fn create(axis: &PointOnSphere, angle: Radians) -> Self {
        let unit_axis = na::Unit::new_unchecked(*axis.position_vector());
        Self {
            axis: *axis,
            angle,
            quaternion: na::UnitQuaternion::from_axis_angle(&unit_axis, angle.0),
        }
    }

    /// The identity rotation: zero degrees about the North pole.
    #[must_use]
    pub fn identity() -> Self {
        Self::create(&PointOnSphere::north_pole(), Radians(0.0))
    }

    /// Construct a `Rotation` from an Euler pole position and an angle in
    /// degrees, the way plate rotations are tabulated.
    #[must_use]
    pub fn from_euler_pole(pole: &LatLong, angle: Degrees) -> Self {
        Self::create(&PointOnSphere::from(pole), Radians::from(angle))
    }

    /// The rotation which carries `from` onto `to` along the Great Circle
    /// arc between them.
    ///
    /// returns None if the points are antipodal, since the axis is undefined.
    #[must_use]
    pub fn between(from: &PointOnSphere, to: &PointOnSphere) -> Option<Self> {
        let a = from.position_vector();
        let b = to.position_vector();
        let axis = a.cross(b);
        let sin_angle = axis.norm();

        if sin_angle < MIN_LENGTH {
            (0.0 < a.dot(b)).then(Self::identity)
        } else {
            Some(Self::create(
                &PointOnSphere::from_normalised(&axis),
                Radians(libm::atan2(sin_angle, a.dot(b))),
            ))
        }
    }

    /// Construct a `Rotation` from a nalgebra unit quaternion.
    fn from_quaternion(quaternion: na::UnitQuaternion<f64>) -> Self {
        if quaternion.imag().norm() < MIN_LENGTH {
            return Self::identity();
        }

        quaternion.axis_angle().map_or_else(Self::identity, |(axis, angle)| Self {
            axis: PointOnSphere::from_normalised(&axis.into_inner()),
            angle: Radians(angle),
            quaternion,
        })
    }

    /// The rotation axis.
    #[must_use]
    pub const fn axis(&self) -> &PointOnSphere {
        &self.axis
    }

    /// The rotation angle.
    #[must_use]
    pub const fn angle(&self) -> Radians {
        self.angle
    }

    /// Whether this is an identity rotation.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.quaternion.imag().norm() < MIN_LENGTH
    }

    /// The rotation equivalent to applying this rotation then `next`.
    #[must_use]
    pub fn compose(&self, next: &Self) -> Self {
        Self::from_quaternion(next.quaternion * self.quaternion)
    }

    /// The inverse rotation: the same axis with the angle negated.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self::create(&self.axis, -self.angle)
    }

    /// Rotate a vector.
    #[must_use]
    pub fn rotate_vector(&self, v: &Point) -> Point {
        self.quaternion.transform_vector(v)
    }

    /// Rotate a point.
    #[debug_ensures(crate::Validate::is_valid(&ret))]
    #[must_use]
    pub fn rotate_point(&self, point: &PointOnSphere) -> PointOnSphere {
        PointOnSphere::from_normalised(&self.rotate_vector(point.position_vector()))
    }

    fn rotate_points(&self, points: &[PointOnSphere]) -> Vec<PointOnSphere> {
        points.iter().map(|p| self.rotate_point(p)).collect()
    }

    /// Rotate a geometry.
    /// A rotation preserves the separation of points, so the rotated
    /// geometry is as valid as the original.
    #[must_use]
    pub fn rotate_geometry(&self, geometry: &GeometryOnSphere) -> GeometryOnSphere {
        match geometry {
            GeometryOnSphere::Point(point) => GeometryOnSphere::Point(self.rotate_point(point)),
            GeometryOnSphere::MultiPoint(multi_point) => GeometryOnSphere::MultiPoint(
                MultiPointOnSphere::from_points_unchecked(self.rotate_points(multi_point.points())),
            ),
            GeometryOnSphere::Polyline(polyline) => GeometryOnSphere::Polyline(
                PolylineOnSphere::from_points_unchecked(self.rotate_points(polyline.vertices())),
            ),
            GeometryOnSphere::Polygon(polygon) => {
                GeometryOnSphere::Polygon(PolygonOnSphere::from_rings_unchecked(
                    self.rotate_points(polygon.exterior_ring()),
                    polygon
                        .interior_rings()
                        .iter()
                        .map(|ring| self.rotate_points(ring))
                        .collect(),
                ))
            }
        }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}
