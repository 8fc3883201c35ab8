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

//! The proximity module hit-tests geometries against a click point.
//!
//! Proximity is measured by closeness: the cosine of the angle between the
//! click point and the nearest part of a geometry, so 1.0 is a direct hit.
//! A geometry is hit if its closeness exceeds the `ProximityCriteria`
//! inclusion threshold.

pub mod layer;

use crate::geometry::GeometryOnSphere;
use crate::sphere::arc::GreatCircleArc;
use crate::sphere::PointOnSphere;
use crate::trig::Radians;
use contracts::debug_requires;
use std::cmp::Ordering;

/// A click point and the closeness a geometry must reach to be hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProximityCriteria {
    test_point: PointOnSphere,
    closeness_inclusion_threshold: f64,
}

impl ProximityCriteria {
    /// Construct a `ProximityCriteria`.
    /// * `test_point` - the click point.
    /// * `closeness_inclusion_threshold` - the cosine of the angle from the
    ///   click point that a hit must be within.
    #[debug_requires((-1.0..=1.0).contains(&closeness_inclusion_threshold))]
    #[must_use]
    pub fn new(test_point: PointOnSphere, closeness_inclusion_threshold: f64) -> Self {
        Self {
            test_point,
            closeness_inclusion_threshold,
        }
    }

    /// Construct a `ProximityCriteria` from an angular radius about the
    /// click point.
    #[must_use]
    pub fn from_angular_radius(test_point: PointOnSphere, radius: Radians) -> Self {
        Self::new(test_point, libm::cos(radius.0))
    }

    /// The click point.
    #[must_use]
    pub const fn test_point(&self) -> &PointOnSphere {
        &self.test_point
    }

    /// The closeness that a hit must exceed.
    #[must_use]
    pub const fn closeness_inclusion_threshold(&self) -> f64 {
        self.closeness_inclusion_threshold
    }

    /// Whether a closeness is close enough to be a hit, i.e. whether it
    /// exceeds the threshold.
    #[must_use]
    pub fn is_within(&self, closeness: f64) -> bool {
        self.closeness_inclusion_threshold < closeness
    }
}

/// The part of a geometry that was hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HitTarget {
    /// A point geometry.
    Point,
    /// The vertex at a (ring-flattened) index.
    Vertex(usize),
    /// The segment starting at the vertex at a (ring-flattened) index.
    Segment(usize),
}

impl HitTarget {
    /// The hit priority: when two hits are equally close, the hit with the
    /// higher priority wins. Points and vertices outrank segments.
    #[must_use]
    pub const fn priority(self) -> u8 {
        match self {
            Self::Point | Self::Vertex(_) => 1,
            Self::Segment(_) => 0,
        }
    }

    /// The index of the vertex or segment hit, None for a point geometry.
    #[must_use]
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Point => None,
            Self::Vertex(index) | Self::Segment(index) => Some(index),
        }
    }
}

/// The result of a successful proximity test against a geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProximityHitDetail {
    closeness: f64,
    target: HitTarget,
}

impl ProximityHitDetail {
    /// Construct a `ProximityHitDetail`.
    #[must_use]
    pub const fn new(closeness: f64, target: HitTarget) -> Self {
        Self { closeness, target }
    }

    /// The closeness of the hit: 1.0 is a direct hit.
    #[must_use]
    pub const fn closeness(&self) -> f64 {
        self.closeness
    }

    /// The part of the geometry that was hit.
    #[must_use]
    pub const fn target(&self) -> HitTarget {
        self.target
    }

    /// The index of the vertex or segment hit, None for a point geometry.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.target.index()
    }

    /// Order hits best first: closest, then highest priority.
    #[must_use]
    pub fn cmp_rank(&self, other: &Self) -> Ordering {
        other
            .closeness
            .total_cmp(&self.closeness)
            .then_with(|| other.target.priority().cmp(&self.target.priority()))
    }
}

/// The better of two optional hits, the first on a tie.
fn best(current: Option<ProximityHitDetail>, hit: ProximityHitDetail) -> Option<ProximityHitDetail> {
    match current {
        Some(current) if current.cmp_rank(&hit) != Ordering::Greater => Some(current),
        _ => Some(hit),
    }
}

/// Test a sequence of vertices, returning the closest vertex hit.
fn test_vertices<'a, I>(criteria: &ProximityCriteria, vertices: I) -> Option<ProximityHitDetail>
where
    I: IntoIterator<Item = &'a PointOnSphere>,
{
    vertices
        .into_iter()
        .enumerate()
        .map(|(index, vertex)| {
            ProximityHitDetail::new(
                criteria.test_point.closeness(vertex),
                HitTarget::Vertex(index),
            )
        })
        .filter(|hit| criteria.is_within(hit.closeness))
        .fold(None, best)
}

/// Test a sequence of arcs, returning the closest segment hit.
fn test_arcs<I>(criteria: &ProximityCriteria, arcs: I) -> Option<ProximityHitDetail>
where
    I: IntoIterator<Item = GreatCircleArc>,
{
    arcs.into_iter()
        .enumerate()
        .map(|(index, arc)| {
            ProximityHitDetail::new(arc.closeness(&criteria.test_point), HitTarget::Segment(index))
        })
        .filter(|hit| criteria.is_within(hit.closeness))
        .fold(None, best)
}

impl GeometryOnSphere {
    /// Test whether the geometry is hit by the criteria.
    ///
    /// returns the closest hit on the geometry, where an exactly equal vertex
    /// hit is preferred to a segment hit, or None if it is not hit.
    ///
    /// # Examples
    /// ```
    /// use tectonic_sphere::geometry::GeometryOnSphere;
    /// use tectonic_sphere::proximity::{HitTarget, ProximityCriteria};
    /// use tectonic_sphere::sphere::PointOnSphere;
    /// use tectonic_sphere::sphere::polyline::PolylineOnSphere;
    ///
    /// let polyline = PolylineOnSphere::create(vec![
    ///     PointOnSphere::from_degrees(0.0, 0.0),
    ///     PointOnSphere::from_degrees(0.0, 10.0),
    /// ])
    /// .unwrap();
    /// let geometry = GeometryOnSphere::from(polyline);
    ///
    /// let click = PointOnSphere::from_degrees(0.5, 5.0);
    /// let criteria = ProximityCriteria::new(click, 0.999);
    /// let hit = geometry.test_proximity(&criteria).unwrap();
    /// assert_eq!(HitTarget::Segment(0), hit.target());
    /// ```
    #[must_use]
    pub fn test_proximity(&self, criteria: &ProximityCriteria) -> Option<ProximityHitDetail> {
        match self {
            Self::Point(point) => {
                let closeness = criteria.test_point.closeness(point);
                criteria
                    .is_within(closeness)
                    .then_some(ProximityHitDetail::new(closeness, HitTarget::Point))
            }
            Self::MultiPoint(multi_point) => test_vertices(criteria, multi_point.points()),
            Self::Polyline(polyline) => {
                let vertex_hit = test_vertices(criteria, polyline.vertices());
                let segment_hit = test_arcs(criteria, polyline.arcs());
                segment_hit.and_then(|hit| best(vertex_hit, hit)).or(vertex_hit)
            }
            Self::Polygon(polygon) => {
                let vertex_hit = test_vertices(criteria, polygon.vertices());
                let segment_hit = test_arcs(criteria, polygon.all_arcs());
                segment_hit.and_then(|hit| best(vertex_hit, hit)).or(vertex_hit)
            }
        }
    }

    /// Test whether any of the vertices of the geometry are hit by the
    /// criteria, ignoring the segments between them.
    ///
    /// returns the closest vertex hit or None if no vertex is hit.
    #[must_use]
    pub fn test_vertex_proximity(
        &self,
        criteria: &ProximityCriteria,
    ) -> Option<ProximityHitDetail> {
        match self {
            Self::Point(point) => test_vertices(criteria, std::iter::once(point)),
            Self::MultiPoint(multi_point) => test_vertices(criteria, multi_point.points()),
            Self::Polyline(polyline) => test_vertices(criteria, polyline.vertices()),
            Self::Polygon(polygon) => test_vertices(criteria, polygon.vertices()),
        }
    }
}
