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

//! The layer module hit-tests collections of rendered geometries.
//!
//! A `RenderedGeometryLayer` owns its geometries and they are referenced by
//! their index in the layer. Hit results are sorted closest first, where
//! equally close hits keep their layer and geometry index order.

use super::{ProximityCriteria, ProximityHitDetail};
use crate::geometry::GeometryOnSphere;
use log::trace;

/// An ordered collection of rendered geometries.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedGeometryLayer {
    geometries: Vec<GeometryOnSphere>,
    is_active: bool,
}

impl Default for RenderedGeometryLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderedGeometryLayer {
    /// Construct an empty, active layer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            geometries: Vec::new(),
            is_active: true,
        }
    }

    /// Add a geometry to the layer.
    ///
    /// returns the index of the geometry in the layer.
    pub fn add(&mut self, geometry: GeometryOnSphere) -> usize {
        self.geometries.push(geometry);
        self.geometries.len() - 1
    }

    /// The geometry at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&GeometryOnSphere> {
        self.geometries.get(index)
    }

    /// The geometries of the layer.
    #[must_use]
    pub fn geometries(&self) -> &[GeometryOnSphere] {
        &self.geometries
    }

    /// The number of geometries in the layer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    /// Whether the layer has no geometries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    /// Remove all of the geometries from the layer.
    pub fn clear(&mut self) {
        self.geometries.clear();
    }

    /// Whether the layer is hit-tested.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Activate or deactivate the layer, inactive layers are not hit-tested.
    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
    }
}

impl FromIterator<GeometryOnSphere> for RenderedGeometryLayer {
    fn from_iter<I: IntoIterator<Item = GeometryOnSphere>>(iter: I) -> Self {
        Self {
            geometries: iter.into_iter().collect(),
            is_active: true,
        }
    }
}

/// A hit on a geometry in a layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProximityHit {
    /// The index of the layer, zero when testing a single collection.
    pub layer_index: usize,
    /// The index of the geometry in its layer.
    pub geometry_index: usize,
    /// Where and how closely the geometry was hit.
    pub detail: ProximityHitDetail,
}

/// Sort hits closest first, then by hit priority.
/// The sort is stable, so equally ranked hits keep their order.
pub fn sort_by_closeness(hits: &mut [ProximityHit]) {
    hits.sort_by(|a, b| a.detail.cmp_rank(&b.detail));
}

/// Sort hits by layer and geometry index, e.g. to find the first rendered
/// of a set of hits.
pub fn sort_by_index(hits: &mut [ProximityHit]) {
    hits.sort_by_key(|hit| (hit.layer_index, hit.geometry_index));
}

/// Test a collection of geometries against the criteria.
/// * `criteria` - the click point and threshold.
/// * `candidates` - the geometries, hits refer to them by index.
///
/// returns the hits, closest first, empty if nothing is hit.
///
/// # Examples
/// ```
/// use tectonic_sphere::geometry::GeometryOnSphere;
/// use tectonic_sphere::proximity::layer::test_proximity;
/// use tectonic_sphere::proximity::ProximityCriteria;
/// use tectonic_sphere::sphere::PointOnSphere;
///
/// let candidates = vec![
///     GeometryOnSphere::from(PointOnSphere::from_degrees(0.0, 2.0)),
///     GeometryOnSphere::from(PointOnSphere::from_degrees(0.0, 1.0)),
///     GeometryOnSphere::from(PointOnSphere::from_degrees(0.0, 90.0)),
/// ];
/// let criteria = ProximityCriteria::new(PointOnSphere::from_degrees(0.0, 0.0), 0.99);
///
/// let hits = test_proximity(&criteria, &candidates);
/// let indices: Vec<_> = hits.iter().map(|hit| hit.geometry_index).collect();
/// assert_eq!(vec![1, 0], indices);
/// ```
#[must_use]
pub fn test_proximity(
    criteria: &ProximityCriteria,
    candidates: &[GeometryOnSphere],
) -> Vec<ProximityHit> {
    let mut hits: Vec<_> = candidates
        .iter()
        .enumerate()
        .filter_map(|(geometry_index, geometry)| {
            geometry
                .test_proximity(criteria)
                .map(|detail| ProximityHit {
                    layer_index: 0,
                    geometry_index,
                    detail,
                })
        })
        .collect();
    sort_by_closeness(&mut hits);

    trace!(
        "test_proximity: {} hits from {} candidates",
        hits.len(),
        candidates.len()
    );
    hits
}

/// Test every geometry in the active layers against the criteria.
///
/// returns the hits, closest first, empty if nothing is hit.
#[must_use]
pub fn test_layers_proximity(
    criteria: &ProximityCriteria,
    layers: &[RenderedGeometryLayer],
) -> Vec<ProximityHit> {
    test_active_layers(criteria, layers, GeometryOnSphere::test_proximity)
}

/// Test the vertices of every geometry in the active layers against the
/// criteria, ignoring the segments between vertices, e.g. to find vertices
/// to snap to.
///
/// The geometry being edited should be excluded from the layers, or its
/// hits filtered out by the caller, otherwise it will snap to itself.
///
/// returns the hits, closest first, empty if nothing is hit.
#[must_use]
pub fn test_vertex_proximity(
    criteria: &ProximityCriteria,
    layers: &[RenderedGeometryLayer],
) -> Vec<ProximityHit> {
    test_active_layers(criteria, layers, GeometryOnSphere::test_vertex_proximity)
}

fn test_active_layers<F>(
    criteria: &ProximityCriteria,
    layers: &[RenderedGeometryLayer],
    test: F,
) -> Vec<ProximityHit>
where
    F: Fn(&GeometryOnSphere, &ProximityCriteria) -> Option<ProximityHitDetail>,
{
    let mut hits = Vec::new();
    for (layer_index, layer) in layers.iter().enumerate().filter(|(_, l)| l.is_active()) {
        for (geometry_index, geometry) in layer.geometries().iter().enumerate() {
            if let Some(detail) = test(geometry, criteria) {
                hits.push(ProximityHit {
                    layer_index,
                    geometry_index,
                    detail,
                });
            }
        }
    }
    sort_by_closeness(&mut hits);

    trace!(
        "test_active_layers: {} hits from {} layers",
        hits.len(),
        layers.len()
    );
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proximity::HitTarget;
    use crate::sphere::polyline::PolylineOnSphere;
    use crate::sphere::PointOnSphere;

    /// A point at an angle from the north pole with the given closeness.
    fn point_at_closeness(closeness: f64, lon: f64) -> PointOnSphere {
        let colatitude = libm::acos(closeness);
        let lat = 90.0 - colatitude.to_degrees();
        PointOnSphere::from_degrees(lat, lon)
    }

    #[test]
    fn test_layer() {
        let mut layer = RenderedGeometryLayer::default();
        assert!(layer.is_empty());
        assert!(layer.is_active());

        let index = layer.add(GeometryOnSphere::from(PointOnSphere::north_pole()));
        assert_eq!(0, index);
        assert_eq!(1, layer.len());
        assert!(layer.get(0).is_some());
        assert!(layer.get(1).is_none());

        layer.set_active(false);
        assert!(!layer.is_active());
        layer.clear();
        assert!(layer.is_empty());
    }

    #[test]
    fn test_proximity_ranking() {
        let candidates: Vec<_> = [0.9, 0.99, 0.5]
            .iter()
            .enumerate()
            .map(|(i, c)| GeometryOnSphere::from(point_at_closeness(*c, 30.0 * i as f64)))
            .collect();
        let criteria = ProximityCriteria::new(PointOnSphere::north_pole(), 0.4);

        let hits = test_proximity(&criteria, &candidates);
        let indices: Vec<_> = hits.iter().map(|hit| hit.geometry_index).collect();
        assert_eq!(vec![1, 0, 2], indices);
        for pair in hits.windows(2) {
            assert!(pair[0].detail.closeness() >= pair[1].detail.closeness());
        }

        // repeated calls produce identical results
        assert_eq!(hits, test_proximity(&criteria, &candidates));
    }

    #[test]
    fn test_proximity_threshold_exclusion() {
        let candidates: Vec<_> = [0.9, 0.99, 0.5]
            .iter()
            .map(|c| GeometryOnSphere::from(point_at_closeness(*c, 0.0)))
            .collect();
        let criteria = ProximityCriteria::new(PointOnSphere::north_pole(), 0.8);

        let hits = test_proximity(&criteria, &candidates);
        assert_eq!(2, hits.len());
        assert!(hits.iter().all(|hit| hit.detail.closeness() > 0.8));

        assert!(test_proximity(&criteria, &[]).is_empty());
    }

    #[test]
    fn test_proximity_ties_keep_index_order() {
        // the same point in different geometries is exactly as close
        let point = PointOnSphere::from_degrees(10.0, 10.0);
        let candidates = vec![
            GeometryOnSphere::from(PointOnSphere::from_degrees(-10.0, 0.0)),
            GeometryOnSphere::from(point),
            GeometryOnSphere::from(point),
        ];
        let criteria = ProximityCriteria::new(PointOnSphere::from_degrees(10.0, 11.0), 0.9);

        let hits = test_proximity(&criteria, &candidates);
        let indices: Vec<_> = hits.iter().map(|hit| hit.geometry_index).collect();
        assert_eq!(vec![1, 2, 0], indices);
    }

    #[test]
    fn test_vertex_proximity_across_layers() {
        let polyline = |lon: f64| {
            GeometryOnSphere::from(
                PolylineOnSphere::create(vec![
                    PointOnSphere::from_degrees(0.0, lon),
                    PointOnSphere::from_degrees(20.0, lon),
                ])
                .unwrap(),
            )
        };
        let first: RenderedGeometryLayer = vec![polyline(0.0), polyline(1.0)].into_iter().collect();
        let mut second: RenderedGeometryLayer = vec![polyline(0.5)].into_iter().collect();

        let click = PointOnSphere::from_degrees(20.0, 0.6);
        let criteria = ProximityCriteria::new(click, 0.9995);
        let layers = vec![first, second.clone()];
        let hits = test_vertex_proximity(&criteria, &layers);
        let found: Vec<_> = hits
            .iter()
            .map(|hit| (hit.layer_index, hit.geometry_index, hit.detail.target()))
            .collect();
        assert_eq!(
            vec![
                (1, 0, HitTarget::Vertex(1)),
                (0, 1, HitTarget::Vertex(1)),
                (0, 0, HitTarget::Vertex(1)),
            ],
            found
        );

        // a click in the middle of the polylines only hits segments
        let click = PointOnSphere::from_degrees(10.0, 0.6);
        let criteria = ProximityCriteria::new(click, 0.9995);
        assert!(test_vertex_proximity(&criteria, &layers).is_empty());
        assert_eq!(3, test_layers_proximity(&criteria, &layers).len());

        // inactive layers are ignored
        second.set_active(false);
        let layers = vec![second];
        let click = PointOnSphere::from_degrees(20.0, 0.6);
        let criteria = ProximityCriteria::new(click, 0.9995);
        assert!(test_vertex_proximity(&criteria, &layers).is_empty());
        assert!(test_layers_proximity(&criteria, &[RenderedGeometryLayer::new()]).is_empty());
    }

    #[test]
    fn test_sort_by_index() {
        let candidates: Vec<_> = [0.9, 0.99, 0.5]
            .iter()
            .map(|c| GeometryOnSphere::from(point_at_closeness(*c, 0.0)))
            .collect();
        let criteria = ProximityCriteria::new(PointOnSphere::north_pole(), 0.4);

        let mut hits = test_proximity(&criteria, &candidates);
        sort_by_index(&mut hits);
        let indices: Vec<_> = hits.iter().map(|hit| hit.geometry_index).collect();
        assert_eq!(vec![0, 1, 2], indices);

        sort_by_closeness(&mut hits);
        let indices: Vec<_> = hits.iter().map(|hit| hit.geometry_index).collect();
        assert_eq!(vec![1, 0, 2], indices);
    }
}
