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

//! The polyline module contains the `PolylineOnSphere` type: an ordered
//! sequence of points joined by Great Circle arcs.
//!
//! The arcs are not stored, they are calculated from consecutive vertices
//! whenever they are iterated.

use super::arc::GreatCircleArc;
use super::{validate_sequence, PointOnSphere};
use crate::error::GeometryError;
use crate::trig::Radians;
use contracts::debug_requires;

/// An immutable polyline of two or more points, where no two consecutive
/// points are coincident or antipodal.
#[derive(Clone, Debug, PartialEq)]
pub struct PolylineOnSphere {
    points: Vec<PointOnSphere>,
}

impl PolylineOnSphere {
    /// The minimum number of points in a `PolylineOnSphere`.
    pub const MIN_POINTS: usize = 2;

    /// Construct a `PolylineOnSphere`.
    /// # Errors
    /// * `InsufficientPoints` if there are fewer than two points.
    /// * `DegenerateSegment` if two consecutive points are coincident.
    /// * `AntipodalPoints` if two consecutive points are antipodal.
    ///
    /// # Examples
    /// ```
    /// use tectonic_sphere::sphere::PointOnSphere;
    /// use tectonic_sphere::sphere::polyline::PolylineOnSphere;
    /// use tectonic_sphere::GeometryError;
    ///
    /// let a = PointOnSphere::from_degrees(0.0, 0.0);
    /// let b = PointOnSphere::from_degrees(0.0, 10.0);
    ///
    /// let polyline = PolylineOnSphere::create(vec![a, b]).unwrap();
    /// assert_eq!(1, polyline.number_of_segments());
    ///
    /// let result = PolylineOnSphere::create(vec![a, b, b]);
    /// assert_eq!(Err(GeometryError::DegenerateSegment { index: 1 }), result);
    /// ```
    pub fn create<I>(points: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = PointOnSphere>,
    {
        let points: Vec<_> = points.into_iter().collect();
        validate_sequence(&points, Self::MIN_POINTS, false)?;
        Ok(Self { points })
    }

    pub(crate) fn from_points_unchecked(points: Vec<PointOnSphere>) -> Self {
        Self { points }
    }

    /// The vertices of the polyline.
    #[must_use]
    pub fn vertices(&self) -> &[PointOnSphere] {
        &self.points
    }

    /// The vertex at `index`, if any.
    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<&PointOnSphere> {
        self.points.get(index)
    }

    /// The number of vertices.
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.points.len()
    }

    /// The number of segments: one fewer than the number of vertices.
    #[must_use]
    pub fn number_of_segments(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// An iterator over the arcs between consecutive vertices.
    pub fn arcs(&self) -> impl ExactSizeIterator<Item = GreatCircleArc> + '_ {
        self.points
            .windows(2)
            .map(|pair| GreatCircleArc::between(&pair[0], &pair[1]))
    }

    /// The arc from vertex `index` to vertex `index + 1`.
    #[must_use]
    pub fn arc(&self, index: usize) -> Option<GreatCircleArc> {
        let start = self.points.get(index)?;
        let end = self.points.get(index + 1)?;
        Some(GreatCircleArc::between(start, end))
    }

    /// The total length of the polyline.
    #[must_use]
    pub fn arc_length(&self) -> Radians {
        Radians(self.arcs().map(|arc| arc.arc_angle().0).sum())
    }

    /// The polyline with its vertices in reverse order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// Tessellate the polyline into points separated by at most `max_step`.
    /// The vertices are included and shared vertices are not repeated.
    #[debug_requires(0.0 < max_step.0)]
    #[must_use]
    pub fn tessellate(&self, max_step: Radians) -> Vec<PointOnSphere> {
        let mut out = Vec::with_capacity(self.points.len());
        for arc in self.arcs() {
            // the start of each arc is the end of the previous one
            let skip = usize::from(!out.is_empty());
            out.extend(arc.tessellate(max_step).skip(skip));
        }
        out
    }

    /// Split the polyline at a point on one of its segments.
    /// * `segment_index` - the index of the segment containing the point.
    /// * `point` - the split point, e.g. the closest point on the segment to
    ///   a click.
    ///
    /// returns the polylines before and after the point, both contain it,
    /// or None if the index is out of range or either part would be
    /// degenerate, e.g. when splitting at the first or last vertex.
    #[must_use]
    pub fn split_at(&self, segment_index: usize, point: &PointOnSphere) -> Option<(Self, Self)> {
        if self.number_of_segments() <= segment_index {
            return None;
        }

        let mut first = self.points[..=segment_index].to_vec();
        if first.last().map_or(true, |last| !last.is_coincident(point)) {
            first.push(*point);
        }

        let rest = &self.points[segment_index + 1..];
        let mut second = vec![*point];
        let skip = usize::from(rest.first().map_or(false, |next| next.is_coincident(point)));
        second.extend_from_slice(&rest[skip..]);

        let first = Self::create(first).ok()?;
        let second = Self::create(second).ok()?;
        Some((first, second))
    }
}

impl TryFrom<Vec<PointOnSphere>> for PolylineOnSphere {
    type Error = GeometryError;

    fn try_from(points: Vec<PointOnSphere>) -> Result<Self, Self::Error> {
        Self::create(points)
    }
}

impl TryFrom<&[PointOnSphere]> for PolylineOnSphere {
    type Error = GeometryError;

    fn try_from(points: &[PointOnSphere]) -> Result<Self, Self::Error> {
        Self::create(points.iter().copied())
    }
}
