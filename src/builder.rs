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


//! The builder module contains the `GeometryBuilder`: the mutable, ordered
//! point sequence behind the interactive drawing and editing tools.
//!
//! Every edit is checked before the point sequence is changed, so a refused
//! edit leaves the builder exactly as it was.
//! Committed edits are returned as `Edit` records, which an `EditLog` can
//! replay forwards and backwards.

pub mod drag;
pub mod edit;

use crate::error::{EditError, GeometryError};
use crate::geometry::{GeometryOnSphere, GeometryType};
use crate::proximity::layer::{ProximityHit, RenderedGeometryLayer};
use crate::proximity::{HitTarget, ProximityCriteria};
use crate::sphere::arc::GreatCircleArc;
use crate::sphere::multi_point::MultiPointOnSphere;
use crate::sphere::polygon::PolygonOnSphere;
use crate::sphere::polyline::PolylineOnSphere;
use crate::sphere::PointOnSphere;
use edit::Edit;
use log::debug;

/// The state of a `GeometryBuilder`, derived from its number of points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuilderState {
    /// No points.
    Empty,
    /// Fewer points than the geometry type requires.
    Building,
    /// Enough points for the geometry type.
    Valid,
}

/// A vertex of another geometry that a dragged point has snapped to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapTarget {
    pub layer_index: usize,
    pub geometry_index: usize,
    /// The ring-flattened index of the vertex in its geometry.
    pub vertex_index: usize,
    pub position: PointOnSphere,
}

impl SnapTarget {
    /// Resolve a vertex or point hit to the position it refers to.
    /// returns None for a segment hit, or if the hit is not in the layers.
    #[must_use]
    pub fn resolve(hit: &ProximityHit, layers: &[RenderedGeometryLayer]) -> Option<Self> {
        let vertex_index = match hit.detail.target() {
            HitTarget::Point => 0,
            HitTarget::Vertex(index) => index,
            HitTarget::Segment(_) => return None,
        };
        let position = layers
            .get(hit.layer_index)?
            .get(hit.geometry_index)?
            .vertex(vertex_index)?;

        Some(Self {
            layer_index: hit.layer_index,
            geometry_index: hit.geometry_index,
            vertex_index,
            position,
        })
    }
}

/// The indices of the points either side of `index` in a sequence of
/// `len` points. A closed sequence wraps around.
fn neighbours(geometry_type: GeometryType, len: usize, index: usize) -> [Option<usize>; 2] {
    let closed = geometry_type.is_closed() && 1 < len;
    let previous = if 0 < index {
        Some(index - 1)
    } else if closed {
        Some(len - 1)
    } else {
        None
    };
    let next = if index + 1 < len {
        Some(index + 1)
    } else if closed {
        Some(0)
    } else {
        None
    };
    [previous, next]
}

/// Check that the points at `index` and `neighbour` can be joined by an arc.
fn check_adjacent(
    points: &[PointOnSphere],
    index: usize,
    neighbour: usize,
) -> Result<(), EditError> {
    let (a, b) = (&points[index], &points[neighbour]);
    if a.is_coincident(b) {
        Err(EditError::CoincidentNeighbour { index })
    } else if a.is_antipodal(b) {
        Err(EditError::Geometry(GeometryError::AntipodalPoints))
    } else {
        Ok(())
    }
}

/// The mutable point sequence of a geometry being drawn or edited.
///
/// The points of a polygon builder are its exterior ring. The interior rings
/// of an edited polygon are held unchanged and restored by `geometry`.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryBuilder {
    geometry_type: GeometryType,
    points: Vec<PointOnSphere>,
    interiors: Vec<Vec<PointOnSphere>>,
    secondary: Option<SnapTarget>,
}

impl GeometryBuilder {
    /// Construct an empty builder for a type of geometry.
    #[must_use]
    pub const fn new(geometry_type: GeometryType) -> Self {
        Self {
            geometry_type,
            points: Vec::new(),
            interiors: Vec::new(),
            secondary: None,
        }
    }

    /// Construct a builder to edit an existing geometry.
    /// The exterior ring of a polygon is edited, its interior rings are
    /// kept as they are.
    #[must_use]
    pub fn from_geometry(geometry: &GeometryOnSphere) -> Self {
        let (points, interiors) = match geometry {
            GeometryOnSphere::Polygon(polygon) => {
                debug!(
                    "from_geometry: polygon with {} interior rings",
                    polygon.number_of_interior_rings()
                );
                (
                    polygon.exterior_ring().to_vec(),
                    polygon.interior_rings().to_vec(),
                )
            }
            _ => (geometry.vertices(), Vec::new()),
        };
        Self {
            geometry_type: geometry.geometry_type(),
            points,
            interiors,
            secondary: None,
        }
    }

    /// The type of geometry being built.
    #[must_use]
    pub const fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    /// The points, in order.
    #[must_use]
    pub fn points(&self) -> &[PointOnSphere] {
        &self.points
    }

    /// The number of points.
    #[must_use]
    pub fn number_of_points(&self) -> usize {
        self.points.len()
    }

    /// The point at `index`, if any.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<&PointOnSphere> {
        self.points.get(index)
    }

    /// The interior rings of an edited polygon.
    #[must_use]
    pub fn interior_rings(&self) -> &[Vec<PointOnSphere>] {
        &self.interiors
    }

    /// The index of the builder point that a hit on the built geometry
    /// refers to.
    /// returns None for a segment hit, or a vertex of an interior ring.
    #[must_use]
    pub fn editable_vertex(&self, target: HitTarget) -> Option<usize> {
        match target {
            HitTarget::Point => (!self.points.is_empty()).then_some(0),
            HitTarget::Vertex(index) => (index < self.points.len()).then_some(index),
            HitTarget::Segment(_) => None,
        }
    }

    /// The state of the builder, from its number of points.
    #[must_use]
    pub fn state(&self) -> BuilderState {
        if self.points.is_empty() {
            BuilderState::Empty
        } else if self.points.len() < self.geometry_type.minimum_points() {
            BuilderState::Building
        } else {
            BuilderState::Valid
        }
    }

    /// Construct the geometry from the points.
    /// # Errors
    /// `GeometryError` if the points do not form a valid geometry of the
    /// builder's type, e.g. `InsufficientPoints`.
    pub fn geometry(&self) -> Result<GeometryOnSphere, GeometryError> {
        let points = self.points.iter().copied();
        match self.geometry_type {
            GeometryType::Point => self.points.first().map(|p| GeometryOnSphere::Point(*p)).ok_or(
                GeometryError::InsufficientPoints {
                    required: 1,
                    actual: 0,
                },
            ),
            GeometryType::MultiPoint => MultiPointOnSphere::create(points).map(Into::into),
            GeometryType::Polyline => PolylineOnSphere::create(points).map(Into::into),
            GeometryType::Polygon => {
                PolygonOnSphere::with_interior_rings(points.collect(), self.interiors.clone())
                    .map(Into::into)
            }
        }
    }

    fn check_index(&self, index: usize) -> Result<(), EditError> {
        if self.points.is_empty() {
            Err(EditError::NoActiveGeometry)
        } else if index < self.points.len() {
            Ok(())
        } else {
            Err(EditError::IndexOutOfRange {
                index,
                len: self.points.len(),
            })
        }
    }

    fn check_capacity(&self) -> Result<(), EditError> {
        match self.geometry_type.maximum_points() {
            Some(maximum) if maximum <= self.points.len() => Err(EditError::PointCapacity),
            _ => Ok(()),
        }
    }

    /// Check the arcs from the point at `index` to its neighbours.
    fn check_neighbours(&self, points: &[PointOnSphere], index: usize) -> Result<(), EditError> {
        if self.geometry_type.has_segments() {
            for neighbour in neighbours(self.geometry_type, points.len(), index)
                .into_iter()
                .flatten()
            {
                check_adjacent(points, index, neighbour)?;
            }
        }
        Ok(())
    }

    /// Insert a point before the point at `index`, or at the end if `index`
    /// is the number of points.
    /// # Errors
    /// * `IndexOutOfRange` if `index` is greater than the number of points.
    /// * `PointCapacity` if the builder is for a point which it already has.
    /// * `CoincidentNeighbour` if the point is coincident with a neighbour.
    /// * `Geometry(AntipodalPoints)` if the point is antipodal to a neighbour.
    pub fn insert_point(&mut self, index: usize, point: PointOnSphere) -> Result<Edit, EditError> {
        if self.points.len() < index {
            return Err(EditError::IndexOutOfRange {
                index,
                len: self.points.len(),
            });
        }
        self.check_capacity()?;

        let mut points = self.points.clone();
        points.insert(index, point);
        self.check_neighbours(&points, index)?;
        self.points = points;

        debug!("insert_point: {index} of {}", self.points.len());
        Ok(Edit::Insert { index, point })
    }

    /// Move the point at `index`.
    /// * `is_intermediate` - true for the updates of a drag, false for the
    ///   final position.
    ///
    /// # Errors
    /// * `NoActiveGeometry` if the builder is empty.
    /// * `IndexOutOfRange` if there is no point at `index`.
    /// * `CoincidentNeighbour` if the point is coincident with a neighbour.
    /// * `Geometry(AntipodalPoints)` if the point is antipodal to a neighbour.
    pub fn move_point(
        &mut self,
        index: usize,
        point: PointOnSphere,
        is_intermediate: bool,
    ) -> Result<Edit, EditError> {
        self.check_index(index)?;

        let mut points = self.points.clone();
        let from = std::mem::replace(&mut points[index], point);
        self.check_neighbours(&points, index)?;
        self.points = points;

        if !is_intermediate {
            debug!("move_point: {index}");
        }
        Ok(Edit::Move {
            index,
            from,
            to: point,
            is_intermediate,
        })
    }

    /// Whether a point can be deleted without leaving fewer points than
    /// the geometry type requires.
    #[must_use]
    pub fn allow_delete_vertex(&self) -> bool {
        self.geometry_type.minimum_points() < self.points.len()
    }

    /// Delete the point at `index`.
    /// # Errors
    /// * `NoActiveGeometry` if the builder is empty.
    /// * `IndexOutOfRange` if there is no point at `index`.
    /// * `BelowMinimum` if `allow_delete_vertex` is false.
    /// * `CoincidentNeighbour` if the points either side of the deleted point
    ///   are coincident, so cannot be joined.
    /// * `Geometry(AntipodalPoints)` if they are antipodal.
    pub fn delete_point(&mut self, index: usize) -> Result<Edit, EditError> {
        self.check_index(index)?;
        if !self.allow_delete_vertex() {
            return Err(EditError::BelowMinimum {
                geometry_type: self.geometry_type,
                minimum: self.geometry_type.minimum_points(),
            });
        }

        let mut points = self.points.clone();
        let point = points.remove(index);
        if self.geometry_type.has_segments() {
            let len = points.len();
            if self.geometry_type.is_closed() {
                check_adjacent(&points, index % len, (index + len - 1) % len)?;
            } else if 0 < index && index < len {
                check_adjacent(&points, index, index - 1)?;
            }
        }
        self.points = points;

        debug!("delete_point: {index}, {} remain", self.points.len());
        Ok(Edit::Delete { index, point })
    }

    /// Insert the point on the closest segment to the criteria's test point
    /// that is within its threshold. The point is projected onto the
    /// segment and inserted after the segment's start vertex.
    ///
    /// returns the insertion, or None if no segment is close enough.
    /// # Errors
    /// As `insert_point`, e.g. `CoincidentNeighbour` when the test point
    /// projects onto a vertex.
    pub fn insert_point_on_closest_segment(
        &mut self,
        criteria: &ProximityCriteria,
    ) -> Result<Option<Edit>, EditError> {
        let test_point = criteria.test_point();
        let mut closest: Option<(usize, GreatCircleArc, f64)> = None;
        for (index, arc) in self.segments().enumerate() {
            let closeness = arc.closeness(test_point);
            let is_closer = closest.map_or(true, |(_, _, best)| best < closeness);
            if criteria.is_within(closeness) && is_closer {
                closest = Some((index, arc, closeness));
            }
        }

        match closest {
            Some((index, arc, _)) => {
                let point = arc.get_closest_point(test_point);
                self.insert_point(index + 1, point).map(Some)
            }
            None => Ok(None),
        }
    }

    /// The arcs between consecutive points, including the closing arc of
    /// a polygon.
    fn segments(&self) -> impl Iterator<Item = GreatCircleArc> + '_ {
        let count = match self.geometry_type {
            GeometryType::Polyline => self.points.len().saturating_sub(1),
            GeometryType::Polygon if 2 < self.points.len() => self.points.len(),
            GeometryType::Polygon => self.points.len().saturating_sub(1),
            _ => 0,
        };
        let len = self.points.len();
        (0..count)
            .map(move |i| GreatCircleArc::between(&self.points[i], &self.points[(i + 1) % len]))
    }

    /// Apply an edit record to the points.
    /// Unlike the editing functions, only the edit's consistency with the
    /// points is checked, so that a log of valid edits can be replayed in
    /// either direction.
    /// # Errors
    /// * `IndexOutOfRange` if the edit's index is not in the points.
    /// * `StaleEdit` if the edit's recorded point does not match.
    /// * `PointCapacity` if inserting a second point into a point builder.
    pub fn apply(&mut self, edit: &Edit) -> Result<(), EditError> {
        if matches!(edit, Edit::Insert { .. }) {
            self.check_capacity()?;
        }
        edit.apply_to(&mut self.points)
    }

    /// Apply the inverse of an edit record, i.e. undo it.
    /// # Errors
    /// As `apply`.
    pub fn apply_inverse(&mut self, edit: &Edit) -> Result<(), EditError> {
        self.apply(&edit.inverse())
    }

    /// A copy of the builder with an edit applied.
    /// # Errors
    /// As `apply`.
    pub fn with_edit(&self, edit: &Edit) -> Result<Self, EditError> {
        let mut builder = self.clone();
        builder.apply(edit)?;
        Ok(builder)
    }

    /// Set the vertex that a dragged point has snapped to.
    pub fn set_secondary_geometry(&mut self, target: SnapTarget) {
        self.secondary = Some(target);
    }

    /// Clear the vertex that a dragged point has snapped to.
    pub fn clear_secondary_geometry(&mut self) {
        self.secondary = None;
    }

    /// The vertex that a dragged point has snapped to, if any.
    #[must_use]
    pub const fn secondary_geometry(&self) -> Option<&SnapTarget> {
        self.secondary.as_ref()
    }
}
