// Copyright (c) 2018-2024 Via Technology Ltd. All Rights Reserved.

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

//! The latlong module contains the `LatLong` type: a position on the surface
//! of the sphere as a latitude and longitude.
//!
//! Positions arrive from, and are handed back to, the surrounding application
//! as latitudes and longitudes in degrees; the geometry itself is held as
//! unit vectors, see `sphere::PointOnSphere`.

use crate::trig::{Angle, Degrees};
use crate::Validate;
use contracts::debug_requires;

/// A position as a latitude and longitude pair of `Angles`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLong {
    lat: Angle,
    lon: Angle,
}

impl Validate for LatLong {
    /// Test whether a `LatLong` is valid.
    /// I.e. whether the latitude lies in the range: -90.0 <= value <= 90.0
    fn is_valid(&self) -> bool {
        self.lat.is_valid_latitude() && self.lon.is_valid()
    }
}

impl LatLong {
    /// Construct a `LatLong` from a latitude and longitude.
    #[debug_requires(lat.is_valid_latitude())]
    #[must_use]
    pub fn new(lat: Angle, lon: Angle) -> Self {
        Self { lat, lon }
    }

    /// Construct a `LatLong` from a latitude and longitude in degrees.
    /// # Examples
    /// ```
    /// use tectonic_sphere::latlong::LatLong;
    /// use tectonic_sphere::trig::Degrees;
    ///
    /// let position = LatLong::from_degrees(30.0, -45.0);
    /// assert!((30.0 - Degrees::from(position.lat()).0).abs() < 1e-12);
    /// assert!((-45.0 - Degrees::from(position.lon()).0).abs() < 1e-12);
    /// ```
    #[debug_requires(Degrees::is_latitude(lat))]
    #[must_use]
    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        Self::new(Angle::from(Degrees(lat)), Angle::from(Degrees(lon)))
    }

    /// The latitude.
    #[must_use]
    pub const fn lat(&self) -> Angle {
        self.lat
    }

    /// The longitude.
    #[must_use]
    pub const fn lon(&self) -> Angle {
        self.lon
    }
}
