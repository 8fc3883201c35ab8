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

//! The `small_circle` module contains the `SmallCircle` type: the points at
//! a constant angular distance (colatitude) from a centre point.

use super::great_circle::{perpendicular, position};
use super::rotation::Rotation;
use super::{gc_distance, is_unit, Point, PointOnSphere};
use crate::error::GeometryError;
use crate::trig::{Angle, Radians};
use contracts::debug_ensures;

/// A circle of constant colatitude about a centre point, where
/// 0 < colatitude < PI.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmallCircle {
    centre: PointOnSphere,
    colatitude: Radians,
}

impl SmallCircle {
    /// Construct a `SmallCircle` from its centre and a point on the circle.
    /// * `centre` - the centre, it must be a unit vector.
    /// * `point_on_circle` - a point on the circle.
    ///
    /// # Errors
    /// * `InvalidCentre` if `centre` is not a unit vector.
    /// * `InvalidColatitude` if the point is at the centre or its antipode.
    ///
    /// # Examples
    /// ```
    /// use tectonic_sphere::sphere::{Point, PointOnSphere};
    /// use tectonic_sphere::sphere::small_circle::SmallCircle;
    ///
    /// let centre = Point::new(0.0, 0.0, 1.0);
    /// let point = PointOnSphere::from_degrees(60.0, 45.0);
    /// let circle = SmallCircle::create(&centre, &point).unwrap();
    /// assert!((circle.colatitude().0 - std::f64::consts::FRAC_PI_6).abs() < 1e-12);
    /// ```
    pub fn create(centre: &Point, point_on_circle: &PointOnSphere) -> Result<Self, GeometryError> {
        if !is_unit(centre) {
            return Err(GeometryError::InvalidCentre {
                norm: centre.norm(),
            });
        }

        Self::from_colatitude(
            &PointOnSphere(*centre),
            gc_distance(centre, point_on_circle.position_vector()),
        )
    }

    /// Construct a `SmallCircle` from its centre and colatitude.
    /// # Errors
    /// `InvalidColatitude` if colatitude is not between zero and PI,
    /// exclusive, within the resolution of a `PointOnSphere`.
    pub fn from_colatitude(
        centre: &PointOnSphere,
        colatitude: Radians,
    ) -> Result<Self, GeometryError> {
        const MIN_COLATITUDE: f64 = super::MIN_LENGTH;
        const MAX_COLATITUDE: f64 = std::f64::consts::PI - super::MIN_LENGTH;

        if (MIN_COLATITUDE..=MAX_COLATITUDE).contains(&colatitude.0) {
            Ok(Self {
                centre: *centre,
                colatitude,
            })
        } else {
            Err(GeometryError::InvalidColatitude)
        }
    }

    /// The centre of the circle.
    #[must_use]
    pub const fn centre(&self) -> &PointOnSphere {
        &self.centre
    }

    /// The angular radius of the circle.
    #[must_use]
    pub const fn colatitude(&self) -> Radians {
        self.colatitude
    }

    /// Whether a point is within the circle, including on it.
    #[must_use]
    pub fn contains(&self, point: &PointOnSphere) -> bool {
        self.centre.gc_distance(point) <= self.colatitude
    }

    /// The closeness of a point to the circle itself: the cosine of the
    /// angle from the point to the nearest point on the circle.
    #[debug_ensures((-1.0..=1.0).contains(&ret))]
    #[must_use]
    pub fn closeness_to_circle(&self, point: &PointOnSphere) -> f64 {
        let distance = self.centre.gc_distance(point).0 - self.colatitude.0;
        libm::cos(distance)
    }

    /// Tessellate the circle into a closed ring of points separated by at
    /// most `max_step`: the last point repeats the first.
    #[must_use]
    pub fn tessellate(&self, max_step: Radians) -> Vec<PointOnSphere> {
        const MIN_SEGMENTS: usize = 3;

        let circumference = std::f64::consts::TAU * libm::sin(self.colatitude.0);
        let segments = if 0.0 < max_step.0 {
            // the cast saturates, a huge count only means a fine tessellation
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let count = libm::ceil(circumference / max_step.0) as usize;
            count.max(MIN_SEGMENTS)
        } else {
            MIN_SEGMENTS
        };

        let centre = self.centre.position_vector();
        let start = PointOnSphere::from_normalised(&position(
            centre,
            &perpendicular(centre),
            Angle::from(self.colatitude),
        ));

        #[allow(clippy::cast_precision_loss)]
        let step = std::f64::consts::TAU / segments as f64;
        let mut points: Vec<_> = (0..segments)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let angle = Radians(step * i as f64);
                Rotation::create(&self.centre, angle).rotate_point(&start)
            })
            .collect();
        if let Some(first) = points.first().copied() {
            points.push(first);
        }
        points
    }
}
