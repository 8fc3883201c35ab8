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


//! The drag module contains the `VertexDrag` gesture: moving a point of a
//! `GeometryBuilder` from mouse press to release.
//!
//! A drag addresses its point by index for the whole gesture. If another
//! edit changes the builder during the drag, the drag is invalidated
//! rather than moving a different point.

use super::edit::Edit;
use super::{GeometryBuilder, SnapTarget};
use crate::config::Settings;
use crate::error::EditError;
use crate::proximity::layer::{test_vertex_proximity, RenderedGeometryLayer};
use crate::sphere::PointOnSphere;
use log::{debug, warn};

/// A drag of a point of a `GeometryBuilder`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexDrag {
    index: usize,
    original: PointOnSphere,
    current: PointOnSphere,
    number_of_points: usize,
    inserted: bool,
}

impl VertexDrag {
    /// Begin dragging the point at `index`.
    /// # Errors
    /// * `NoActiveGeometry` if the builder is empty.
    /// * `IndexOutOfRange` if there is no point at `index`.
    pub fn begin(builder: &mut GeometryBuilder, index: usize) -> Result<Self, EditError> {
        builder.check_index(index)?;
        let original = builder.points[index];
        builder.clear_secondary_geometry();

        debug!("begin drag of point {index}");
        Ok(Self {
            index,
            original,
            current: original,
            number_of_points: builder.number_of_points(),
            inserted: false,
        })
    }

    /// Insert a point and begin dragging it, e.g. when a segment is
    /// dragged. Cancelling the drag removes the point.
    /// # Errors
    /// As `GeometryBuilder::insert_point`.
    pub fn begin_insert(
        builder: &mut GeometryBuilder,
        index: usize,
        point: PointOnSphere,
    ) -> Result<Self, EditError> {
        builder.insert_point(index, point)?;
        builder.clear_secondary_geometry();

        debug!("begin drag of inserted point {index}");
        Ok(Self {
            index,
            original: point,
            current: point,
            number_of_points: builder.number_of_points(),
            inserted: true,
        })
    }

    /// The index of the dragged point.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The position of the point when the drag began.
    #[must_use]
    pub const fn original_position(&self) -> &PointOnSphere {
        &self.original
    }

    /// The position the point has been dragged to.
    #[must_use]
    pub const fn current_position(&self) -> &PointOnSphere {
        &self.current
    }

    /// Check that the builder still holds the dragged point where the
    /// drag left it.
    fn check(&self, builder: &GeometryBuilder) -> Result<(), EditError> {
        if builder.number_of_points() == self.number_of_points
            && builder.point(self.index) == Some(&self.current)
        {
            Ok(())
        } else {
            warn!(
                "drag of point {} invalidated: {} points, expected {}",
                self.index,
                builder.number_of_points(),
                self.number_of_points
            );
            Err(EditError::DragInvalidated { index: self.index })
        }
    }

    /// Move the dragged point.
    /// returns the intermediate move.
    /// # Errors
    /// * `DragInvalidated` if the builder was changed by another edit.
    /// * As `GeometryBuilder::move_point`, the point is not moved.
    pub fn update(
        &mut self,
        builder: &mut GeometryBuilder,
        point: PointOnSphere,
    ) -> Result<Edit, EditError> {
        self.check(builder)?;
        let edit = builder.move_point(self.index, point, true)?;
        self.current = point;
        Ok(edit)
    }

    /// Move the dragged point, snapping it to the closest vertex of the
    /// geometries in `layers` within the snap radius.
    /// The snapped vertex is set as the builder's secondary geometry.
    ///
    /// The geometry being edited must not be in `layers`, otherwise its
    /// own vertices are snapped to.
    /// returns the intermediate move.
    /// # Errors
    /// As `update`.
    pub fn update_with_snapping(
        &mut self,
        builder: &mut GeometryBuilder,
        point: PointOnSphere,
        layers: &[RenderedGeometryLayer],
        settings: &Settings,
    ) -> Result<Edit, EditError> {
        self.check(builder)?;

        let criteria = settings.snap_criteria(point);
        let target = test_vertex_proximity(&criteria, layers)
            .first()
            .and_then(|hit| SnapTarget::resolve(hit, layers));
        let position = target.map_or(point, |target| target.position);

        let edit = builder.move_point(self.index, position, true)?;
        self.current = position;
        match target {
            Some(target) => builder.set_secondary_geometry(target),
            None => builder.clear_secondary_geometry(),
        }
        Ok(edit)
    }

    /// Finish the drag, leaving the point where it was last moved.
    /// returns the edit of the whole drag: the insertion of the point at its
    /// final position, or its move from its original position.
    /// # Errors
    /// `DragInvalidated` if the builder was changed by another edit.
    pub fn finish(self, builder: &mut GeometryBuilder) -> Result<Edit, EditError> {
        builder.clear_secondary_geometry();
        self.check(builder)?;

        debug!("finish drag of point {}", self.index);
        Ok(if self.inserted {
            Edit::Insert {
                index: self.index,
                point: self.current,
            }
        } else {
            Edit::Move {
                index: self.index,
                from: self.original,
                to: self.current,
                is_intermediate: false,
            }
        })
    }

    /// Cancel the drag, restoring the builder's points to those before the
    /// drag began.
    /// # Errors
    /// `DragInvalidated` if the builder was changed by another edit, the
    /// builder is not changed.
    pub fn cancel(self, builder: &mut GeometryBuilder) -> Result<(), EditError> {
        builder.clear_secondary_geometry();
        self.check(builder)?;

        debug!("cancel drag of point {}", self.index);
        if self.inserted {
            builder.apply(&Edit::Delete {
                index: self.index,
                point: self.current,
            })
        } else {
            builder.apply(&Edit::Move {
                index: self.index,
                from: self.current,
                to: self.original,
                is_intermediate: false,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::edit::EditLog;
    use crate::geometry::{GeometryOnSphere, GeometryType};

    fn point(lon: f64) -> PointOnSphere {
        PointOnSphere::from_degrees(0.0, lon)
    }

    fn builder() -> GeometryBuilder {
        let mut builder = GeometryBuilder::new(GeometryType::Polyline);
        for (i, lon) in [0.0, 10.0, 20.0].iter().enumerate() {
            builder.insert_point(i, point(*lon)).unwrap();
        }
        builder
    }

    #[test]
    fn test_drag_finish() {
        let mut builder = builder();
        let mut drag = VertexDrag::begin(&mut builder, 1).unwrap();
        assert_eq!(1, drag.index());

        let mut log = EditLog::default();
        for lat in [1.0, 2.0, 3.0] {
            let edit = drag
                .update(&mut builder, PointOnSphere::from_degrees(lat, 10.0))
                .unwrap();
            assert!(edit.is_intermediate());
            log.record(edit);
        }
        assert_eq!(&PointOnSphere::from_degrees(3.0, 10.0), drag.current_position());

        let edit = drag.finish(&mut builder).unwrap();
        assert_eq!(
            Edit::Move {
                index: 1,
                from: point(10.0),
                to: PointOnSphere::from_degrees(3.0, 10.0),
                is_intermediate: false
            },
            edit
        );
        // the finished drag is merged with its intermediate moves
        log.record(edit);
        assert_eq!(1, log.done_edits().len());

        log.undo(&mut builder).unwrap();
        assert_eq!(Some(&point(10.0)), builder.point(1));
    }

    #[test]
    fn test_drag_cancel() {
        let mut builder = builder();
        let before = builder.clone();

        let mut drag = VertexDrag::begin(&mut builder, 2).unwrap();
        drag.update(&mut builder, point(25.0)).unwrap();
        drag.update(&mut builder, point(30.0)).unwrap();
        drag.cancel(&mut builder).unwrap();
        assert_eq!(before, builder);

        let mut drag = VertexDrag::begin_insert(&mut builder, 1, point(5.0)).unwrap();
        assert_eq!(4, builder.number_of_points());
        drag.update(&mut builder, PointOnSphere::from_degrees(2.0, 5.0)).unwrap();
        drag.cancel(&mut builder).unwrap();
        assert_eq!(before, builder);
    }

    #[test]
    fn test_drag_begin_insert_finish() {
        let mut builder = builder();
        let mut drag = VertexDrag::begin_insert(&mut builder, 1, point(5.0)).unwrap();
        drag.update(&mut builder, PointOnSphere::from_degrees(2.0, 5.0)).unwrap();
        assert_eq!(&point(5.0), drag.original_position());

        let edit = drag.finish(&mut builder).unwrap();
        assert_eq!(
            Edit::Insert {
                index: 1,
                point: PointOnSphere::from_degrees(2.0, 5.0)
            },
            edit
        );
        builder.apply_inverse(&edit).unwrap();
        assert_eq!(3, builder.number_of_points());
    }

    #[test]
    fn test_drag_inserted_point_undo() {
        let mut builder = GeometryBuilder::new(GeometryType::Polyline);
        let mut log = EditLog::default();
        log.record(builder.insert_point(0, point(0.0)).unwrap());
        log.record(builder.insert_point(1, point(10.0)).unwrap());

        let mut drag = VertexDrag::begin_insert(&mut builder, 1, point(5.0)).unwrap();
        for lat in [1.0, 2.0] {
            log.record(
                drag.update(&mut builder, PointOnSphere::from_degrees(lat, 5.0))
                    .unwrap(),
            );
        }
        log.record(drag.finish(&mut builder).unwrap());
        assert_eq!(3, log.done_edits().len());

        // the whole insertion is undone in one step
        assert!(log.undo(&mut builder).unwrap().is_some());
        assert_eq!(vec![point(0.0), point(10.0)], builder.points());
        assert!(log.undo(&mut builder).unwrap().is_some());
        assert!(log.undo(&mut builder).unwrap().is_some());
        assert_eq!(0, builder.number_of_points());

        assert!(log.redo(&mut builder).unwrap().is_some());
        assert!(log.redo(&mut builder).unwrap().is_some());
        assert!(log.redo(&mut builder).unwrap().is_some());
        assert_eq!(Some(&PointOnSphere::from_degrees(2.0, 5.0)), builder.point(1));
    }

    #[test]
    fn test_drag_invalidated() {
        let mut builder = builder();
        let mut drag = VertexDrag::begin(&mut builder, 2).unwrap();
        drag.update(&mut builder, point(25.0)).unwrap();

        // another edit removes a point during the drag
        builder.delete_point(0).unwrap();
        let after_delete = builder.clone();

        assert_eq!(
            Err(EditError::DragInvalidated { index: 2 }),
            drag.update(&mut builder, point(30.0))
        );
        assert_eq!(
            Err(EditError::DragInvalidated { index: 2 }),
            drag.cancel(&mut builder)
        );
        assert_eq!(after_delete, builder);
    }

    #[test]
    fn test_drag_refused_move_keeps_position() {
        let mut builder = builder();
        let mut drag = VertexDrag::begin(&mut builder, 1).unwrap();
        assert_eq!(
            Err(EditError::CoincidentNeighbour { index: 1 }),
            drag.update(&mut builder, point(0.0))
        );
        assert_eq!(&point(10.0), drag.current_position());

        // the drag continues from its last valid position
        assert!(drag.update(&mut builder, point(12.0)).is_ok());
    }

    #[test]
    fn test_drag_update_with_snapping() {
        let mut builder = builder();
        let target = PointOnSphere::from_degrees(10.0, 10.0);
        let layers = vec![RenderedGeometryLayer::from_iter([GeometryOnSphere::from(target)])];
        let settings = Settings::default();

        let mut drag = VertexDrag::begin(&mut builder, 1).unwrap();
        drag.update_with_snapping(
            &mut builder,
            PointOnSphere::from_degrees(9.8, 10.1),
            &layers,
            &settings,
        )
        .unwrap();
        assert_eq!(Some(&target), builder.point(1));
        assert_eq!(0, builder.secondary_geometry().unwrap().geometry_index);

        // away from the target, the point follows the mouse
        let free = PointOnSphere::from_degrees(5.0, 10.0);
        drag.update_with_snapping(&mut builder, free, &layers, &settings)
            .unwrap();
        assert_eq!(Some(&free), builder.point(1));
        assert!(builder.secondary_geometry().is_none());

        drag.update_with_snapping(
            &mut builder,
            PointOnSphere::from_degrees(10.1, 10.0),
            &layers,
            &settings,
        )
        .unwrap();
        assert!(builder.secondary_geometry().is_some());
        drag.finish(&mut builder).unwrap();
        assert!(builder.secondary_geometry().is_none());
        assert_eq!(Some(&target), builder.point(1));
    }
}
