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

//! The arc module contains the `GreatCircleArc` type and its associated
//! functions.
//!
//! An arc is the minor segment of the Great Circle between two points.
//! Coincident end points make a zero length arc, antipodal end points are
//! rejected since the Great Circle between them is undefined.

use super::great_circle::{calculate_atd_and_xtd, direction, position, project_onto};
use super::{gc_distance, is_unit, Point, PointOnSphere, MIN_LENGTH};
use crate::error::GeometryError;
use crate::trig::{Angle, Degrees, Radians};
use crate::Validate;
use contracts::{debug_ensures, debug_requires};

/// An arc of a Great Circle on a unit sphere in ECEF coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GreatCircleArc {
    /// The start point of the arc.
    start: PointOnSphere,
    /// The end point of the arc.
    end: PointOnSphere,
    /// The right hand pole of the Great Circle of the arc, zero when the
    /// arc is zero length.
    pole: Point,
    /// The length of the arc.
    length: Radians,
}

impl Validate for GreatCircleArc {
    /// Test whether an arc is valid.
    /// I.e. both ends are on the unit sphere and the pole is either a unit
    /// vector or zero for a zero length arc.
    fn is_valid(&self) -> bool {
        self.start.is_valid()
            && self.end.is_valid()
            && (0.0 <= self.length.0)
            && (is_unit(&self.pole) || (self.length.0 == 0.0))
    }
}

impl GreatCircleArc {
    /// Construct a `GreatCircleArc` between two points.
    /// * `start`, `end` - the start and end points of the arc.
    ///
    /// # Errors
    /// `GeometryError::AntipodalPoints` if the points are antipodal.
    ///
    /// # Examples
    /// ```
    /// use tectonic_sphere::sphere::PointOnSphere;
    /// use tectonic_sphere::sphere::arc::GreatCircleArc;
    ///
    /// let a = PointOnSphere::from_degrees(0.0, 0.0);
    /// let b = PointOnSphere::from_degrees(0.0, 90.0);
    /// let arc = GreatCircleArc::create(&a, &b).unwrap();
    /// assert!((arc.arc_angle().0 - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
    ///
    /// assert!(GreatCircleArc::create(&a, &a.antipode()).is_err());
    /// ```
    #[debug_ensures(ret.as_ref().map_or(true, Validate::is_valid))]
    pub fn create(start: &PointOnSphere, end: &PointOnSphere) -> Result<Self, GeometryError> {
        let a = start.position_vector();
        let b = end.position_vector();
        let axis = a.cross(b);
        let sin_length = axis.norm();

        if sin_length < MIN_LENGTH {
            if 0.0 < a.dot(b) {
                Ok(Self {
                    start: *start,
                    end: *end,
                    pole: Point::zeros(),
                    length: Radians(0.0),
                })
            } else {
                Err(GeometryError::AntipodalPoints)
            }
        } else {
            Ok(Self {
                start: *start,
                end: *end,
                pole: axis / sin_length,
                length: Radians(libm::atan2(sin_length, a.dot(b))),
            })
        }
    }

    /// Construct a `GreatCircleArc` between two points that are known not
    /// to be antipodal, e.g. consecutive vertices of a valid polyline.
    #[debug_requires(!start.is_antipodal(end))]
    pub(crate) fn between(start: &PointOnSphere, end: &PointOnSphere) -> Self {
        Self::create(start, end).unwrap_or(Self {
            start: *start,
            end: *end,
            pole: Point::zeros(),
            length: Radians(0.0),
        })
    }

    /// The start point of the arc.
    #[must_use]
    pub const fn start_point(&self) -> &PointOnSphere {
        &self.start
    }

    /// The end point of the arc.
    #[must_use]
    pub const fn end_point(&self) -> &PointOnSphere {
        &self.end
    }

    /// Whether the arc is zero length, i.e. its end points are coincident.
    #[must_use]
    pub fn is_zero_length(&self) -> bool {
        self.length.0 == 0.0
    }

    /// The right hand pole of the Great Circle of the arc: the rotation
    /// axis which carries the start point to the end point.
    ///
    /// returns None if the arc is zero length.
    #[must_use]
    pub fn rotation_axis(&self) -> Option<PointOnSphere> {
        if self.is_zero_length() {
            None
        } else {
            Some(PointOnSphere(self.pole))
        }
    }

    /// The angle subtended by the arc at the centre of the sphere.
    #[debug_ensures((0.0..=std::f64::consts::PI).contains(&ret.0))]
    #[must_use]
    pub fn arc_angle(&self) -> Radians {
        self.length
    }

    /// The direction vector of the arc at the start point.
    /// It is zero for a zero length arc.
    #[must_use]
    pub fn direction(&self) -> Point {
        if self.is_zero_length() {
            Point::zeros()
        } else {
            direction(self.start.position_vector(), &self.pole)
        }
    }

    /// The position of a point at a Great Circle distance along the arc.
    /// Note: the distance may be greater than the length of the arc.
    #[must_use]
    pub fn position(&self, distance: Radians) -> PointOnSphere {
        if self.is_zero_length() {
            self.start
        } else {
            PointOnSphere::from_normalised(&position(
                self.start.position_vector(),
                &self.direction(),
                Angle::from(distance),
            ))
        }
    }

    /// Calculate Great Circle along and across track distances of a point
    /// from the start of the arc.
    #[must_use]
    pub fn calculate_atd_and_xtd(&self, point: &PointOnSphere) -> (Radians, Radians) {
        if self.is_zero_length() {
            (Radians(0.0), self.start.gc_distance(point))
        } else {
            calculate_atd_and_xtd(
                self.start.position_vector(),
                &self.pole,
                point.position_vector(),
            )
        }
    }

    /// Whether a point on the Great Circle of the arc lies between its ends.
    /// Includes the ends of the arc.
    fn is_within(&self, p: &Point) -> bool {
        let a = self.start.position_vector();
        let b = self.end.position_vector();
        (0.0 <= a.cross(p).dot(&self.pole)) && (0.0 <= p.cross(b).dot(&self.pole))
    }

    /// The point on the arc closest to a query point.
    /// If the query point projects outside the arc, the nearer end point is
    /// returned, the start point when both are equally near.
    #[must_use]
    pub fn get_closest_point(&self, point: &PointOnSphere) -> PointOnSphere {
        if self.is_zero_length() {
            return self.start;
        }

        // a query point at a pole of the great circle is equidistant
        if let Some(p) = project_onto(&self.pole, point.position_vector()) {
            if self.is_within(&p) {
                return PointOnSphere(p);
            }
        }

        if point.dot(&self.end) > point.dot(&self.start) {
            self.end
        } else {
            self.start
        }
    }

    /// The closeness of a query point to the arc: the cosine of the angle
    /// between the query point and the closest point on the arc.
    #[debug_ensures((-1.0..=1.0).contains(&ret))]
    #[must_use]
    pub fn closeness(&self, point: &PointOnSphere) -> f64 {
        point.closeness(&self.get_closest_point(point))
    }

    /// The shortest Great Circle distance of a point from the arc.
    #[debug_ensures((0.0..=std::f64::consts::PI).contains(&ret.0))]
    #[must_use]
    pub fn shortest_distance(&self, point: &PointOnSphere) -> Radians {
        gc_distance(
            point.position_vector(),
            self.get_closest_point(point).position_vector(),
        )
    }

    /// Tessellate the arc into points separated by at most `max_step`.
    #[must_use]
    pub fn tessellate(&self, max_step: Radians) -> ArcTessellation {
        ArcTessellation::new(self, max_step)
    }
}

/// An iterator over the points of a tessellated `GreatCircleArc`.
///
/// The first point is the start of the arc and the last point is exactly
/// the end of the arc. A zero length arc yields only its start point.
#[derive(Clone, Debug)]
pub struct ArcTessellation {
    start: PointOnSphere,
    end: PointOnSphere,
    direction: Point,
    step: Radians,
    segments: usize,
    index: usize,
}

impl ArcTessellation {
    #[debug_requires(0.0 < max_step.0)]
    fn new(arc: &GreatCircleArc, max_step: Radians) -> Self {
        let segments = if arc.is_zero_length() {
            0
        } else if 0.0 < max_step.0 {
            // the cast saturates, a huge count only means a fine tessellation
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let count = libm::ceil(arc.length.0 / max_step.0) as usize;
            count.clamp(1, usize::MAX - 1)
        } else {
            1
        };
        let step = if segments == 0 {
            Radians(0.0)
        } else {
            #[allow(clippy::cast_precision_loss)]
            let step = arc.length.0 / segments as f64;
            Radians(step)
        };

        Self {
            start: arc.start,
            end: arc.end,
            direction: arc.direction(),
            step,
            segments,
            index: 0,
        }
    }
}

impl Iterator for ArcTessellation {
    type Item = PointOnSphere;

    fn next(&mut self) -> Option<Self::Item> {
        if self.segments < self.index {
            return None;
        }

        let i = self.index;
        self.index += 1;
        if i == 0 {
            Some(self.start)
        } else if i == self.segments {
            Some(self.end)
        } else {
            #[allow(clippy::cast_precision_loss)]
            let distance = Radians(self.step.0 * i as f64);
            Some(PointOnSphere::from_normalised(&position(
                self.start.position_vector(),
                &self.direction,
                Angle::from(distance),
            )))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.segments.saturating_add(1).saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ArcTessellation {}

/// Tessellate an arc, appending the points to `out`.
/// * `out` - the output sequence.
/// * `arc` - the arc to tessellate.
/// * `max_step` - the maximum angular separation of consecutive points.
pub fn tessellate(out: &mut Vec<PointOnSphere>, arc: &GreatCircleArc, max_step: Radians) {
    out.extend(arc.tessellate(max_step));
}

/// Calculate the signed angle in degrees at the shared vertex between two
/// adjoining arcs: `prev` ends where `next` starts.
///
/// The angle between the arcs' rotation axes is measured in [0, 180] and
/// reflected to 360 minus the angle when the axes turn clockwise about the
/// shared vertex. The result is wrapped into (-180, 180], so an angle
/// swept through the antipodal direction changes sign.
///
/// returns None if either arc is zero length.
#[debug_requires(prev.end_point().is_coincident(next.start_point()))]
#[debug_ensures(ret.map_or(true, |angle| (-180.0 < angle.0) && (angle.0 <= 180.0)))]
#[must_use]
pub fn calculate_angle_between_arcs(prev: &GreatCircleArc, next: &GreatCircleArc) -> Option<Degrees> {
    if prev.is_zero_length() || next.is_zero_length() {
        return None;
    }

    let axes_cross = prev.pole.cross(&next.pole);
    let angle = Degrees::from(Radians(libm::atan2(
        axes_cross.norm(),
        prev.pole.dot(&next.pole),
    )));
    let angle = if axes_cross.dot(prev.end.position_vector()) < 0.0 {
        Degrees(360.0 - angle.0)
    } else {
        angle
    };

    Some(angle.normalise())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_within_tolerance;

    fn point(x: f64, y: f64, z: f64) -> PointOnSphere {
        PointOnSphere::from_unit_vector(Point::new(x, y, z)).unwrap()
    }

    #[test]
    fn test_arc_create() {
        let a = PointOnSphere::from_degrees(0.0, 0.0);
        let b = PointOnSphere::from_degrees(0.0, 90.0);
        let arc = GreatCircleArc::create(&a, &b).unwrap();

        assert!(arc.is_valid());
        assert!(!arc.is_zero_length());
        assert_eq!(&a, arc.start_point());
        assert_eq!(&b, arc.end_point());
        assert_eq!(
            Some(PointOnSphere::north_pole()),
            arc.rotation_axis()
        );
        assert!(is_within_tolerance(
            std::f64::consts::FRAC_PI_2,
            arc.arc_angle().0,
            std::f64::EPSILON
        ));

        let arc_clone = arc.clone();
        assert_eq!(arc, arc_clone);
        print!("GreatCircleArc: {:?}", arc);
    }

    #[test]
    fn test_arc_zero_length() {
        let a = PointOnSphere::from_degrees(45.0, 45.0);
        let arc = GreatCircleArc::create(&a, &a).unwrap();

        assert!(arc.is_valid());
        assert!(arc.is_zero_length());
        assert_eq!(None, arc.rotation_axis());
        assert_eq!(0.0, arc.arc_angle().0);
        assert_eq!(a, arc.position(Radians(1.0)));
        assert_eq!(a, arc.get_closest_point(&PointOnSphere::north_pole()));
    }

    #[test]
    fn test_arc_antipodal() {
        let latitudes = [-90.0, -60.0, -15.0, 0.0, 30.0, 75.0, 90.0];
        let longitudes = [-180.0, -90.0, 0.0, 45.0, 135.0];
        for lat in latitudes {
            for lon in longitudes {
                let a = PointOnSphere::from_degrees(lat, lon);
                assert_eq!(
                    Err(GeometryError::AntipodalPoints),
                    GreatCircleArc::create(&a, &-a)
                );
            }
        }
    }

    #[test]
    fn test_arc_symmetry() {
        let a = PointOnSphere::from_degrees(12.0, -34.0);
        let b = PointOnSphere::from_degrees(-56.0, 78.0);
        let ab = GreatCircleArc::create(&a, &b).unwrap();
        let ba = GreatCircleArc::create(&b, &a).unwrap();

        assert_eq!(ab.arc_angle(), ba.arc_angle());
        let axis_ab = ab.rotation_axis().unwrap();
        let axis_ba = ba.rotation_axis().unwrap();
        assert_eq!(axis_ab, -axis_ba);
    }

    #[test]
    fn test_arc_position() {
        let a = PointOnSphere::from_degrees(0.0, 0.0);
        let b = PointOnSphere::from_degrees(0.0, 60.0);
        let arc = GreatCircleArc::create(&a, &b).unwrap();

        let result = arc.position(Radians::from(Degrees(30.0)));
        let expected = PointOnSphere::from_degrees(0.0, 30.0);
        assert!(result.gc_distance(&expected).0 < 1e-14);
    }

    #[test]
    fn test_arc_closest_point() {
        let a = PointOnSphere::from_degrees(0.0, 0.0);
        let b = PointOnSphere::from_degrees(0.0, 60.0);
        let arc = GreatCircleArc::create(&a, &b).unwrap();

        // alongside the arc
        let p = PointOnSphere::from_degrees(10.0, 20.0);
        let closest = arc.get_closest_point(&p);
        assert!(closest.gc_distance(&PointOnSphere::from_degrees(0.0, 20.0)).0 < 1e-14);
        assert!(is_within_tolerance(
            10.0,
            Degrees::from(arc.shortest_distance(&p)).0,
            1e-12
        ));

        // beyond the ends of the arc
        let p = PointOnSphere::from_degrees(5.0, 70.0);
        assert_eq!(b, arc.get_closest_point(&p));
        assert_eq!(p.closeness(&b), arc.closeness(&p));
        let p = PointOnSphere::from_degrees(-5.0, -10.0);
        assert_eq!(a, arc.get_closest_point(&p));

        // on the other side of the sphere
        let p = PointOnSphere::from_degrees(0.0, -140.0);
        assert_eq!(a, arc.get_closest_point(&p));

        // a pole of the great circle is equidistant from every point
        let p = PointOnSphere::north_pole();
        assert_eq!(a, arc.get_closest_point(&p));
        assert!(is_within_tolerance(0.0, arc.closeness(&p), std::f64::EPSILON));
    }

    #[test]
    fn test_arc_tessellate() {
        let a = PointOnSphere::from_degrees(0.0, 0.0);
        let b = PointOnSphere::from_degrees(0.0, 10.0);
        let arc = GreatCircleArc::create(&a, &b).unwrap();

        let points: Vec<_> = arc.tessellate(Radians::from(Degrees(3.0))).collect();
        assert_eq!(5, points.len());
        assert_eq!(a, points[0]);
        assert_eq!(b, points[4]);

        let max_step = Radians::from(Degrees(3.0)).0 + 1e-12;
        for pair in points.windows(2) {
            assert!(pair[0].gc_distance(&pair[1]).0 <= max_step);
        }

        // a step longer than the arc
        let points: Vec<_> = arc.tessellate(Radians::from(Degrees(20.0))).collect();
        assert_eq!(vec![a, b], points);

        let mut out = Vec::new();
        tessellate(&mut out, &arc, Radians::from(Degrees(0.9)));
        assert_eq!(13, out.len());
        assert_eq!(13, arc.tessellate(Radians::from(Degrees(0.9))).len());
    }

    #[test]
    fn test_arc_tessellate_zero_length() {
        let a = PointOnSphere::from_degrees(-20.0, 100.0);
        let arc = GreatCircleArc::create(&a, &a).unwrap();

        let points: Vec<_> = arc.tessellate(Radians(0.01)).collect();
        assert_eq!(vec![a], points);
    }

    #[test]
    fn test_arc_tessellate_tiny_step() {
        let a = PointOnSphere::from_degrees(0.0, 0.0);
        let b = PointOnSphere::from_degrees(0.0, 10.0);
        let arc = GreatCircleArc::create(&a, &b).unwrap();

        // the segment count saturates instead of overflowing
        let tessellation = arc.tessellate(Radians(1e-300));
        assert_eq!(usize::MAX, tessellation.len());

        let mut tessellation = tessellation.skip(1);
        assert_eq!(usize::MAX - 1, tessellation.len());
        let next = tessellation.next().unwrap();
        assert!(a.gc_distance(&next).0 < 1e-12);
    }

    #[test]
    fn test_calculate_angle_between_arcs() {
        let p = point(0.0, -1.0, 0.0);
        let v = point(1.0, 0.0, 0.0);
        let prev = GreatCircleArc::create(&p, &v).unwrap();

        let q = point(0.0, 0.0, 1.0);
        let next = GreatCircleArc::create(&v, &q).unwrap();
        let angle = calculate_angle_between_arcs(&prev, &next).unwrap();
        assert!(is_within_tolerance(90.0, angle.0, 1e-12));

        // continuing along the same great circle
        let q = point(0.0, 1.0, 0.0);
        let next = GreatCircleArc::create(&v, &q).unwrap();
        let angle = calculate_angle_between_arcs(&prev, &next).unwrap();
        assert!(is_within_tolerance(0.0, angle.0, 1e-12));

        // 270 degrees wraps to -90
        let q = point(0.0, 0.0, -1.0);
        let next = GreatCircleArc::create(&v, &q).unwrap();
        let angle = calculate_angle_between_arcs(&prev, &next).unwrap();
        assert!(is_within_tolerance(-90.0, angle.0, 1e-12));

        let zero = GreatCircleArc::create(&v, &v).unwrap();
        assert_eq!(None, calculate_angle_between_arcs(&prev, &zero));
    }
}
