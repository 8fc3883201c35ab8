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

//! The polygon module contains the `PolygonOnSphere` type: an exterior ring
//! of points, implicitly closed from the last point to the first, with
//! optional interior rings (holes).
//!
//! Vertices and segments are indexed through the rings in order: the
//! exterior ring first, then each interior ring.

use super::arc::GreatCircleArc;
use super::{validate_sequence, Point, PointOnSphere};
use crate::error::GeometryError;
use crate::trig::Radians;
use contracts::debug_requires;

/// An immutable polygon. Each ring has three or more points, where no two
/// consecutive points, including the last and first, are coincident or
/// antipodal.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonOnSphere {
    exterior: Vec<PointOnSphere>,
    interiors: Vec<Vec<PointOnSphere>>,
}

/// The arcs around a closed ring of points.
fn ring_arcs(ring: &[PointOnSphere]) -> impl ExactSizeIterator<Item = GreatCircleArc> + '_ {
    let n = ring.len();
    (0..n).map(move |i| GreatCircleArc::between(&ring[i], &ring[(i + 1) % n]))
}

/// The sum of the signed angles subtended at point `p` by the edges of a
/// closed ring. It is +/- 2 PI if the ring winds around `p` or around the
/// antipode of `p`, zero otherwise.
fn winding_angle(ring: &[PointOnSphere], p: &Point) -> f64 {
    ring_arcs(ring)
        .map(|arc| {
            let a = arc.start_point().position_vector();
            let b = arc.end_point().position_vector();
            libm::atan2(p.dot(&a.cross(b)), a.dot(b) - p.dot(a) * p.dot(b))
        })
        .sum()
}

/// Whether a closed ring winds around a point on the same side of the
/// sphere as the ring's vertices.
fn ring_contains(ring: &[PointOnSphere], p: &Point) -> bool {
    let centre = ring
        .iter()
        .fold(Point::zeros(), |sum, v| sum + v.position_vector());
    (0.0 < p.dot(&centre)) && (std::f64::consts::PI < libm::fabs(winding_angle(ring, p)))
}

impl PolygonOnSphere {
    /// The minimum number of points in a ring of a `PolygonOnSphere`.
    pub const MIN_POINTS: usize = 3;

    /// Construct a `PolygonOnSphere` from its exterior ring.
    /// # Errors
    /// * `InsufficientPoints` if there are fewer than three points.
    /// * `DegenerateSegment` if two consecutive points are coincident.
    /// * `AntipodalPoints` if two consecutive points are antipodal.
    ///
    /// # Examples
    /// ```
    /// use tectonic_sphere::sphere::PointOnSphere;
    /// use tectonic_sphere::sphere::polygon::PolygonOnSphere;
    ///
    /// let points = vec![
    ///     PointOnSphere::from_degrees(0.0, 0.0),
    ///     PointOnSphere::from_degrees(0.0, 10.0),
    ///     PointOnSphere::from_degrees(10.0, 5.0),
    /// ];
    /// let polygon = PolygonOnSphere::create(points).unwrap();
    /// assert_eq!(3, polygon.number_of_segments());
    /// assert!(polygon.contains(&PointOnSphere::from_degrees(3.0, 5.0)));
    /// ```
    pub fn create<I>(points: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = PointOnSphere>,
    {
        Self::with_interior_rings(points.into_iter().collect(), Vec::new())
    }

    /// Construct a `PolygonOnSphere` from an exterior ring and interior rings.
    /// # Errors
    /// As `create`, for any of the rings.
    pub fn with_interior_rings(
        exterior: Vec<PointOnSphere>,
        interiors: Vec<Vec<PointOnSphere>>,
    ) -> Result<Self, GeometryError> {
        validate_sequence(&exterior, Self::MIN_POINTS, true)?;
        for ring in &interiors {
            validate_sequence(ring, Self::MIN_POINTS, true)?;
        }
        Ok(Self {
            exterior,
            interiors,
        })
    }

    pub(crate) fn from_rings_unchecked(
        exterior: Vec<PointOnSphere>,
        interiors: Vec<Vec<PointOnSphere>>,
    ) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    /// The exterior ring, without the closing point.
    #[must_use]
    pub fn exterior_ring(&self) -> &[PointOnSphere] {
        &self.exterior
    }

    /// The interior rings, without their closing points.
    #[must_use]
    pub fn interior_rings(&self) -> &[Vec<PointOnSphere>] {
        &self.interiors
    }

    /// The number of interior rings.
    #[must_use]
    pub fn number_of_interior_rings(&self) -> usize {
        self.interiors.len()
    }

    /// An iterator over all of the rings, exterior first.
    pub fn rings(&self) -> impl Iterator<Item = &[PointOnSphere]> + '_ {
        std::iter::once(self.exterior.as_slice()).chain(self.interiors.iter().map(Vec::as_slice))
    }

    /// The number of vertices in the exterior ring.
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.exterior.len()
    }

    /// The number of segments in the exterior ring, the same as the number
    /// of vertices since the ring is closed.
    #[must_use]
    pub fn number_of_segments(&self) -> usize {
        self.exterior.len()
    }

    /// The number of vertices in all of the rings.
    #[must_use]
    pub fn total_number_of_vertices(&self) -> usize {
        self.rings().map(<[PointOnSphere]>::len).sum()
    }

    /// An iterator over the vertices of all of the rings, exterior first.
    pub fn vertices(&self) -> impl Iterator<Item = &PointOnSphere> + '_ {
        self.rings().flatten()
    }

    /// Convert a ring-flattened vertex (or segment) index into a ring index
    /// and an index within that ring. Ring 0 is the exterior ring.
    #[must_use]
    pub fn locate_vertex(&self, index: usize) -> Option<(usize, usize)> {
        let mut offset = 0;
        for (ring_index, ring) in self.rings().enumerate() {
            if index < offset + ring.len() {
                return Some((ring_index, index - offset));
            }
            offset += ring.len();
        }
        None
    }

    /// An iterator over the arcs of the exterior ring, including the
    /// closing arc from the last point to the first.
    pub fn arcs(&self) -> impl ExactSizeIterator<Item = GreatCircleArc> + '_ {
        ring_arcs(&self.exterior)
    }

    /// An iterator over the arcs of all of the rings, exterior first.
    pub fn all_arcs(&self) -> impl Iterator<Item = GreatCircleArc> + '_ {
        self.rings().flat_map(ring_arcs)
    }

    /// The perimeter of the exterior ring.
    #[must_use]
    pub fn arc_length(&self) -> Radians {
        Radians(self.arcs().map(|arc| arc.arc_angle().0).sum())
    }

    /// Whether a point is inside the polygon: inside the exterior ring and
    /// not inside any of the interior rings.
    /// The inside of a ring is the region it encloses on the same side of
    /// the sphere as its vertices, whichever way it is wound, so rings must
    /// lie within a hemisphere.
    #[must_use]
    pub fn contains(&self, point: &PointOnSphere) -> bool {
        let p = point.position_vector();
        ring_contains(&self.exterior, p) && !self.interiors.iter().any(|ring| ring_contains(ring, p))
    }

    /// Tessellate each ring into a closed sequence of points separated by at
    /// most `max_step`: the last point of each ring repeats its first.
    #[debug_requires(0.0 < max_step.0)]
    #[must_use]
    pub fn tessellate(&self, max_step: Radians) -> Vec<Vec<PointOnSphere>> {
        self.rings()
            .map(|ring| {
                let mut out = Vec::with_capacity(ring.len() + 1);
                for arc in ring_arcs(ring) {
                    let skip = usize::from(!out.is_empty());
                    out.extend(arc.tessellate(max_step).skip(skip));
                }
                out
            })
            .collect()
    }
}

impl TryFrom<Vec<PointOnSphere>> for PolygonOnSphere {
    type Error = GeometryError;

    fn try_from(points: Vec<PointOnSphere>) -> Result<Self, Self::Error> {
        Self::create(points)
    }
}
