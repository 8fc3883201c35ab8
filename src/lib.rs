// Copyright (c) 2018-2024 Via Technology Ltd.

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

//! This library represents plate geometries on the surface of a unit sphere
//! and supports editing them interactively.
//!
//! The `sphere` module contains the geometry primitives: points, rotations,
//! great circle arcs, small circles, multi-points, polylines and polygons.
//! The `geometry` module combines them into the closed `GeometryOnSphere`
//! sum type, which the `proximity` module hit-tests against a click point.
//! The `builder` module holds the mutable point sequence behind the
//! drawing and editing tools.
//!
//! The library uses the [contracts](https://crates.io/crates/contracts) crate
//! to implement Design By Contract [(DbC)](https://wiki.c2.com/?DesignByContract).
//! It also defines a `Validate` trait to define an `is_valid` invariant
//! function to support Design By Contract invariants.
//!
//! # Example
//! ```
//! use tectonic_sphere::builder::GeometryBuilder;
//! use tectonic_sphere::geometry::GeometryType;
//! use tectonic_sphere::sphere::PointOnSphere;
//!
//! let mut builder = GeometryBuilder::new(GeometryType::Polyline);
//! builder.insert_point(0, PointOnSphere::from_degrees(0.0, 0.0)).unwrap();
//! builder.insert_point(1, PointOnSphere::from_degrees(0.0, 10.0)).unwrap();
//!
//! let geometry = builder.geometry().unwrap();
//! assert_eq!(2, geometry.vertices().len());
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod geometry;
pub mod latlong;
pub mod proximity;
pub mod sphere;
pub mod trig;

pub use error::{ConfigError, EditError, GeometryError};

use contracts::{debug_ensures, debug_requires};

/// Clamp value into the range: min to max inclusive.
/// * `value` - value to clamp
/// * `min` - minimum value.
/// * `max` - maximum value.
#[debug_ensures((min ..= max).contains(&ret))]
#[inline]
#[must_use]
pub fn clamp<T>(value: T, min: T, max: T) -> T
where
    T: PartialOrd + Copy,
{
    if value < min {
        min
    } else if max < value {
        max
    } else {
        value
    }
}

/// The Validate trait.
pub trait Validate {
    /// return true if the type is valid, false otherwise.
    fn is_valid(&self) -> bool;
}

/// Check whether a value is within tolerance of zero.
/// * `value` the value to test
/// * `tolerance` the permitted tolerance
/// return true if value is <= tolerance
#[debug_requires(value >= 0.0)]
#[inline]
#[must_use]
pub fn is_small(value: f64, tolerance: f64) -> bool {
    value <= tolerance
}

/// Check whether a value is within tolerance of a reference value.
/// * `reference` the required value
/// * `value` the value to test
/// * `tolerance` the permitted tolerance
/// return true if abs(reference - value) is <= tolerance
#[inline]
#[must_use]
pub fn is_within_tolerance(reference: f64, value: f64, tolerance: f64) -> bool {
    is_small(libm::fabs(reference - value), tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        // value < min
        assert_eq!(clamp(-1.0 - std::f64::EPSILON, -1.0, 1.0), -1.0);
        // value > max
        assert_eq!(clamp(1.0 + std::f64::EPSILON, -1.0, 1.0), 1.0);
        // value within range
        assert_eq!(clamp(0.25, -1.0, 1.0), 0.25);
    }

    #[test]
    fn test_is_within_tolerance() {
        assert!(!is_within_tolerance(
            1.0 - 2.0 * std::f64::EPSILON,
            1.0,
            std::f64::EPSILON
        ));
        assert!(is_within_tolerance(
            1.0 - std::f64::EPSILON,
            1.0,
            std::f64::EPSILON
        ));
        assert!(is_within_tolerance(
            1.0 + std::f64::EPSILON,
            1.0,
            std::f64::EPSILON
        ));
    }
}
