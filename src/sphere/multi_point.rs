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

//! The `multi_point` module contains the `MultiPointOnSphere` type:
//! an unordered collection of points.

use super::PointOnSphere;
use crate::error::GeometryError;

/// A non-empty collection of points with no adjacency constraints.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiPointOnSphere {
    points: Vec<PointOnSphere>,
}

impl MultiPointOnSphere {
    /// The minimum number of points in a `MultiPointOnSphere`.
    pub const MIN_POINTS: usize = 1;

    /// Construct a `MultiPointOnSphere`.
    /// # Errors
    /// `GeometryError::InsufficientPoints` if there are no points.
    pub fn create<I>(points: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = PointOnSphere>,
    {
        let points: Vec<_> = points.into_iter().collect();
        if points.len() < Self::MIN_POINTS {
            Err(GeometryError::InsufficientPoints {
                required: Self::MIN_POINTS,
                actual: points.len(),
            })
        } else {
            Ok(Self { points })
        }
    }

    pub(crate) fn from_points_unchecked(points: Vec<PointOnSphere>) -> Self {
        Self { points }
    }

    /// The points.
    #[must_use]
    pub fn points(&self) -> &[PointOnSphere] {
        &self.points
    }

    /// The number of points.
    #[must_use]
    pub fn number_of_points(&self) -> usize {
        self.points.len()
    }

    /// An iterator over the points.
    pub fn iter(&self) -> std::slice::Iter<'_, PointOnSphere> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a MultiPointOnSphere {
    type Item = &'a PointOnSphere;
    type IntoIter = std::slice::Iter<'a, PointOnSphere>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_point_create() {
        let a = PointOnSphere::from_degrees(10.0, 10.0);
        let b = PointOnSphere::from_degrees(-10.0, 10.0);

        // coincident points are permitted
        let multi_point = MultiPointOnSphere::create(vec![a, b, a]).unwrap();
        assert_eq!(3, multi_point.number_of_points());
        assert_eq!(&[a, b, a], multi_point.points());
        assert_eq!(3, (&multi_point).into_iter().count());

        assert_eq!(
            Err(GeometryError::InsufficientPoints {
                required: 1,
                actual: 0
            }),
            MultiPointOnSphere::create(Vec::new())
        );
    }
}
