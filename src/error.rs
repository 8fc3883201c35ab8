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

//! The error module contains the error types returned by the library.
//!
//! Each failure has its own variant, so that a user interface can report
//! exactly why a geometry could not be constructed or an edit was refused.

use crate::geometry::GeometryType;
use thiserror::Error;

/// Errors constructing a geometry from malformed input.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum GeometryError {
    /// The vector is not of unit length.
    #[error("invalid unit vector: length is {norm}")]
    InvalidUnitVector { norm: f64 },

    /// The end points of an arc are antipodal, so its great circle is undefined.
    #[error("antipodal points: the arc's great circle is undefined")]
    AntipodalPoints,

    /// Too few points for the type of geometry.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },

    /// Two consecutive points are coincident.
    #[error("degenerate segment: point {index} and its successor are coincident")]
    DegenerateSegment { index: usize },

    /// The centre of a small circle is not of unit length.
    #[error("invalid small circle centre: length is {norm}")]
    InvalidCentre { norm: f64 },

    /// A small circle point is coincident with, or antipodal to, its centre.
    #[error("invalid colatitude: the circle point is at the centre or its antipode")]
    InvalidColatitude,
}

/// Reasons for refusing a `GeometryBuilder` edit.
/// The builder is unchanged whenever one of these is returned.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum EditError {
    /// The builder has no points to move or delete.
    #[error("no active geometry")]
    NoActiveGeometry,

    /// The point index is not in the builder's point sequence.
    #[error("point index {index} out of range for {len} points")]
    IndexOutOfRange { index: usize, len: usize },

    /// The deletion would leave too few points for the geometry type.
    #[error("a {geometry_type:?} requires at least {minimum} points")]
    BelowMinimum {
        geometry_type: GeometryType,
        minimum: usize,
    },

    /// A point geometry already has its point.
    #[error("a point geometry holds a single point")]
    PointCapacity,

    /// The edit would make the point at index coincident with a neighbour.
    #[error("point {index} would be coincident with a neighbouring point")]
    CoincidentNeighbour { index: usize },

    /// The point sequence changed underneath a drag gesture.
    #[error("drag of point {index} invalidated by another edit")]
    DragInvalidated { index: usize },

    /// A replayed edit does not match the point it records.
    #[error("edit of point {index} does not match the current points")]
    StaleEdit { index: usize },

    /// The point sequence does not form a valid geometry.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors reading `Settings`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings are not valid JSON.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// The tessellation step is not a positive angle.
    #[error("tessellation step must be greater than zero degrees, got {0}")]
    InvalidStep(f64),

    /// The snap radius is not in the range [0, 180) degrees.
    #[error("snap radius must be in the range [0, 180) degrees, got {0}")]
    InvalidSnapRadius(f64),
}
