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

//! The geometry module contains the `GeometryOnSphere` type: the closed set
//! of geometries that can be rendered, hit-tested and edited.
//!
//! Geometries are exported to [geo-types](https://crates.io/crates/geo-types)
//! with x as longitude and y as latitude, in degrees.

use crate::config::Settings;
use crate::sphere::multi_point::MultiPointOnSphere;
use crate::sphere::polygon::PolygonOnSphere;
use crate::sphere::polyline::PolylineOnSphere;
use crate::sphere::rotation::Rotation;
use crate::sphere::PointOnSphere;
use crate::trig::{Degrees, Radians};
use serde::{Deserialize, Serialize};

/// The type of a geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    MultiPoint,
    Polyline,
    Polygon,
}

impl GeometryType {
    /// The minimum number of points in a valid geometry of this type.
    #[must_use]
    pub const fn minimum_points(self) -> usize {
        match self {
            Self::Point => 1,
            Self::MultiPoint => MultiPointOnSphere::MIN_POINTS,
            Self::Polyline => PolylineOnSphere::MIN_POINTS,
            Self::Polygon => PolygonOnSphere::MIN_POINTS,
        }
    }

    /// The maximum number of points in a geometry of this type, if any.
    #[must_use]
    pub const fn maximum_points(self) -> Option<usize> {
        match self {
            Self::Point => Some(1),
            _ => None,
        }
    }

    /// Whether consecutive points are joined by arcs, so they must not be
    /// coincident.
    #[must_use]
    pub const fn has_segments(self) -> bool {
        matches!(self, Self::Polyline | Self::Polygon)
    }

    /// Whether the last point is joined to the first.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Polygon)
    }
}

/// A geometry on the surface of the sphere.
#[derive(Clone, Debug, PartialEq)]
pub enum GeometryOnSphere {
    Point(PointOnSphere),
    MultiPoint(MultiPointOnSphere),
    Polyline(PolylineOnSphere),
    Polygon(PolygonOnSphere),
}

impl GeometryOnSphere {
    /// The type of the geometry.
    #[must_use]
    pub const fn geometry_type(&self) -> GeometryType {
        match self {
            Self::Point(_) => GeometryType::Point,
            Self::MultiPoint(_) => GeometryType::MultiPoint,
            Self::Polyline(_) => GeometryType::Polyline,
            Self::Polygon(_) => GeometryType::Polygon,
        }
    }

    /// The vertices of the geometry, a polygon's rings are flattened
    /// exterior first.
    #[must_use]
    pub fn vertices(&self) -> Vec<PointOnSphere> {
        match self {
            Self::Point(point) => vec![*point],
            Self::MultiPoint(multi_point) => multi_point.points().to_vec(),
            Self::Polyline(polyline) => polyline.vertices().to_vec(),
            Self::Polygon(polygon) => polygon.vertices().copied().collect(),
        }
    }

    /// The vertex at a ring-flattened index.
    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<PointOnSphere> {
        match self {
            Self::Point(point) => (index == 0).then_some(*point),
            Self::MultiPoint(multi_point) => multi_point.points().get(index).copied(),
            Self::Polyline(polyline) => polyline.vertex(index).copied(),
            Self::Polygon(polygon) => polygon.vertices().nth(index).copied(),
        }
    }

    /// The number of vertices, over all rings of a polygon.
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        match self {
            Self::Point(_) => 1,
            Self::MultiPoint(multi_point) => multi_point.number_of_points(),
            Self::Polyline(polyline) => polyline.number_of_vertices(),
            Self::Polygon(polygon) => polygon.total_number_of_vertices(),
        }
    }

    /// Tessellate the geometry into sequences of points for rendering, each
    /// separated by at most `max_step`.
    /// Points and multi-points produce one sequence per point, polylines a
    /// single sequence and polygons a closed sequence per ring.
    #[must_use]
    pub fn tessellate(&self, max_step: Radians) -> Vec<Vec<PointOnSphere>> {
        match self {
            Self::Point(point) => vec![vec![*point]],
            Self::MultiPoint(multi_point) => multi_point.iter().map(|p| vec![*p]).collect(),
            Self::Polyline(polyline) => vec![polyline.tessellate(max_step)],
            Self::Polygon(polygon) => polygon.tessellate(max_step),
        }
    }

    /// Tessellate the geometry with the configured tessellation step.
    #[must_use]
    pub fn tessellate_with(&self, settings: &Settings) -> Vec<Vec<PointOnSphere>> {
        self.tessellate(settings.tessellation_step_radians())
    }

    /// The geometry rotated by `rotation`.
    #[must_use]
    pub fn rotate(&self, rotation: &Rotation) -> Self {
        rotation.rotate_geometry(self)
    }
}

impl From<PointOnSphere> for GeometryOnSphere {
    fn from(point: PointOnSphere) -> Self {
        Self::Point(point)
    }
}

impl From<MultiPointOnSphere> for GeometryOnSphere {
    fn from(multi_point: MultiPointOnSphere) -> Self {
        Self::MultiPoint(multi_point)
    }
}

impl From<PolylineOnSphere> for GeometryOnSphere {
    fn from(polyline: PolylineOnSphere) -> Self {
        Self::Polyline(polyline)
    }
}

impl From<PolygonOnSphere> for GeometryOnSphere {
    fn from(polygon: PolygonOnSphere) -> Self {
        Self::Polygon(polygon)
    }
}

impl From<&PointOnSphere> for geo_types::Coord<f64> {
    fn from(point: &PointOnSphere) -> Self {
        Self {
            x: Degrees::from(point.longitude()).0,
            y: Degrees::from(point.latitude()).0,
        }
    }
}

fn to_line_string(points: &[PointOnSphere], closed: bool) -> geo_types::LineString<f64> {
    let mut coords: Vec<geo_types::Coord<f64>> = points.iter().map(geo_types::Coord::from).collect();
    if closed {
        if let Some(first) = coords.first().copied() {
            coords.push(first);
        }
    }
    geo_types::LineString::new(coords)
}

impl From<&GeometryOnSphere> for geo_types::Geometry<f64> {
    /// Convert a geometry to `geo_types`, longitude and latitude in degrees.
    fn from(geometry: &GeometryOnSphere) -> Self {
        match geometry {
            GeometryOnSphere::Point(point) => {
                Self::Point(geo_types::Point::from(geo_types::Coord::from(point)))
            }
            GeometryOnSphere::MultiPoint(multi_point) => Self::MultiPoint(
                multi_point
                    .iter()
                    .map(|p| geo_types::Point::from(geo_types::Coord::from(p)))
                    .collect(),
            ),
            GeometryOnSphere::Polyline(polyline) => {
                Self::LineString(to_line_string(polyline.vertices(), false))
            }
            GeometryOnSphere::Polygon(polygon) => Self::Polygon(geo_types::Polygon::new(
                to_line_string(polygon.exterior_ring(), true),
                polygon
                    .interior_rings()
                    .iter()
                    .map(|ring| to_line_string(ring, true))
                    .collect(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_within_tolerance;

    fn polygon() -> GeometryOnSphere {
        GeometryOnSphere::from(
            PolygonOnSphere::create(vec![
                PointOnSphere::from_degrees(0.0, 0.0),
                PointOnSphere::from_degrees(0.0, 10.0),
                PointOnSphere::from_degrees(10.0, 10.0),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_geometry_type() {
        assert_eq!(1, GeometryType::Point.minimum_points());
        assert_eq!(1, GeometryType::MultiPoint.minimum_points());
        assert_eq!(2, GeometryType::Polyline.minimum_points());
        assert_eq!(3, GeometryType::Polygon.minimum_points());

        assert_eq!(Some(1), GeometryType::Point.maximum_points());
        assert_eq!(None, GeometryType::Polygon.maximum_points());
        assert!(GeometryType::Polyline.has_segments());
        assert!(!GeometryType::MultiPoint.has_segments());
        assert!(GeometryType::Polygon.is_closed());

        let serialized = serde_json::to_string(&GeometryType::Polyline).unwrap();
        assert_eq!("\"Polyline\"", serialized);
    }

    #[test]
    fn test_geometry_vertices() {
        let geometry = polygon();
        assert_eq!(GeometryType::Polygon, geometry.geometry_type());
        assert_eq!(3, geometry.number_of_vertices());
        assert_eq!(3, geometry.vertices().len());
        assert_eq!(Some(PointOnSphere::from_degrees(0.0, 10.0)), geometry.vertex(1));
        assert_eq!(None, geometry.vertex(3));

        let point = GeometryOnSphere::from(PointOnSphere::north_pole());
        assert_eq!(Some(PointOnSphere::north_pole()), point.vertex(0));
        assert_eq!(None, point.vertex(1));
    }

    #[test]
    fn test_geometry_tessellate() {
        let geometry = polygon();
        let rings = geometry.tessellate_with(&Settings::default());
        assert_eq!(1, rings.len());
        assert_eq!(rings[0][0], rings[0][rings[0].len() - 1]);

        let multi_point = GeometryOnSphere::from(
            MultiPointOnSphere::create(geometry.vertices()).unwrap(),
        );
        assert_eq!(3, multi_point.tessellate(Radians(0.1)).len());
    }

    #[test]
    fn test_geometry_to_geo_types() {
        let geometry = polygon();
        let result = geo_types::Geometry::from(&geometry);
        if let geo_types::Geometry::Polygon(polygon) = result {
            let exterior = polygon.exterior();
            assert_eq!(4, exterior.0.len());
            assert!(exterior.is_closed());
            assert!(is_within_tolerance(10.0, exterior.0[2].x, 1e-12));
            assert!(is_within_tolerance(10.0, exterior.0[2].y, 1e-12));
        } else {
            panic!("expected a polygon");
        }

        let point = GeometryOnSphere::from(PointOnSphere::from_degrees(-30.0, 45.0));
        if let geo_types::Geometry::Point(point) = geo_types::Geometry::from(&point) {
            assert!(is_within_tolerance(45.0, point.x(), 1e-12));
            assert!(is_within_tolerance(-30.0, point.y(), 1e-12));
        } else {
            panic!("expected a point");
        }
    }
}
