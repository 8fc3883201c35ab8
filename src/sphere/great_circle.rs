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

//! The `great_circle` module contains functions for calculating aspects of
//! great circles on a unit sphere.
//!
//! A great circle is represented by its right hand pole: the unit normal of
//! the plane through the centre of the sphere containing the circle.

use super::{are_orthogonal, is_unit, Point, MIN_LENGTH};
use crate::trig::{Angle, Radians, UnitNegRange};
use crate::Validate;
use contracts::{debug_ensures, debug_requires};

/// Calculate a unit vector perpendicular to the given unit vector.
/// It is the cross product with whichever axis is least aligned to `a`.
#[debug_requires(is_unit(a))]
#[debug_ensures(is_unit(&ret) && are_orthogonal(a, &ret))]
#[must_use]
pub fn perpendicular(a: &Point) -> Point {
    let (x, y, z) = (libm::fabs(a.x), libm::fabs(a.y), libm::fabs(a.z));
    let axis = if x <= y && x <= z {
        Point::x()
    } else if y <= z {
        Point::y()
    } else {
        Point::z()
    };
    a.cross(&axis).normalize()
}

/// Calculate the direction vector of a Great Circle arc.
/// * `a` - the start point.
/// * `pole` - the pole of a Great Circle.
///
/// returns the direction vector at the point on the great circle.
#[debug_requires(is_unit(a) && is_unit(pole) && are_orthogonal(a, pole))]
#[must_use]
pub fn direction(a: &Point, pole: &Point) -> Point {
    pole.cross(a)
}

/// Calculate the position of a point along a Great Circle arc.
/// * `a` - the start point.
/// * `dir` - the direction vector of a Great Circle at a.
/// * `distance` - the Great Circle distance as an Angle.
///
/// returns the position vector at the point on the great circle.
#[debug_requires(is_unit(a) && is_unit(dir) && are_orthogonal(a, dir))]
#[must_use]
pub fn position(a: &Point, dir: &Point, distance: Angle) -> Point {
    distance.cos() * a + distance.sin() * dir
}

/// The sine of the across track distance of a point relative to a Great Circle pole.
/// It is simply the dot product of the pole and the point: pole . point
#[debug_ensures(UnitNegRange::is_valid(&ret))]
fn sin_xtd(pole: &Point, point: &Point) -> UnitNegRange {
    UnitNegRange::clamp(pole.dot(point))
}

/// The across track distance of a point relative to a Great Circle pole,
/// (+ve) to the left of the circle, (-ve) to the right.
/// * `pole` - the Great Circle pole.
/// * `point` - the point.
#[debug_requires(is_unit(pole) && is_unit(point))]
#[debug_ensures(libm::fabs(ret.0) <= std::f64::consts::FRAC_PI_2)]
#[must_use]
pub fn cross_track_distance(pole: &Point, point: &Point) -> Radians {
    Radians(libm::asin(sin_xtd(pole, point).0))
}

/// Calculate the closest point on a plane to the given point.
/// * `pole` - the Great Circle pole (aka normal) of the plane.
/// * `point` - the point.
///
/// returns the closest point on the plane to the given point, it is NOT
/// a unit vector.
#[debug_requires(is_unit(pole))]
#[must_use]
pub fn calculate_point_on_plane(pole: &Point, point: &Point) -> Point {
    let t = sin_xtd(pole, point);
    point - pole * t.0
}

/// Project a point onto a Great Circle.
/// * `pole` - the Great Circle pole.
/// * `point` - the point.
///
/// returns the closest point on the Great Circle or None if the point is
/// at one of the poles of the Great Circle.
#[debug_requires(is_unit(pole) && is_unit(point))]
#[must_use]
pub fn project_onto(pole: &Point, point: &Point) -> Option<Point> {
    let plane_point = calculate_point_on_plane(pole, point);
    if plane_point.norm() < MIN_LENGTH {
        None
    } else {
        Some(plane_point.normalize())
    }
}

/// The Great Circle distance of a point along the arc relative to a,
/// (+ve) ahead of a, (-ve) behind a.
/// * `a` - the start point of the Great Circle arc.
/// * `pole` - the pole of the Great Circle arc.
/// * `point` - the point.
#[debug_requires(is_unit(a) && is_unit(pole) && are_orthogonal(a, pole))]
#[debug_ensures(libm::fabs(ret.0) <= std::f64::consts::PI)]
#[must_use]
pub fn along_track_distance(a: &Point, pole: &Point, point: &Point) -> Radians {
    let plane_point = calculate_point_on_plane(pole, point);
    Radians(libm::atan2(
        direction(a, pole).dot(&plane_point),
        a.dot(&plane_point),
    ))
}

/// Calculate Great Circle along and across track distances.
/// * `a` - the start point of the Great Circle arc.
/// * `pole` - the pole of the Great Circle arc.
/// * `p` - the point.
///
/// returns the along and across track distances of point relative to the
/// start of a great circle arc.
#[debug_requires(is_unit(a) && is_unit(pole) && are_orthogonal(a, pole) && is_unit(p))]
#[must_use]
pub fn calculate_atd_and_xtd(a: &Point, pole: &Point, p: &Point) -> (Radians, Radians) {
    (along_track_distance(a, pole, p), cross_track_distance(pole, p))
}
