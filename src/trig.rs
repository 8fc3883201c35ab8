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

//! The trig module contains the angle types used throughout the library and
//! the conversions between them.
//!
//! Angles cross the library boundary in `Degrees`; all internal calculations
//! use `Radians` or an `Angle`, i.e. a sine and cosine pair.

#![allow(clippy::float_cmp)]

use super::{clamp, Validate};
use contracts::{debug_ensures, debug_requires};
use serde::{Deserialize, Serialize};
use std::ops::Neg;

/// The Degrees newtype an f64.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Degrees(pub f64);

/// The Radians newtype an f64.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Radians(pub f64);

impl Degrees {
    /// Test whether a value is a valid latitude.
    /// I.e. whether it lies in the range: -90.0 <= value <= 90.0
    #[must_use]
    pub fn is_latitude(value: f64) -> bool {
        (-90.0..=90.0).contains(&value)
    }

    /// Test whether a value is a valid longitude.
    /// I.e. whether it lies in the range: -180.0 <= value <= 180.0
    #[must_use]
    pub fn is_longitude(value: f64) -> bool {
        (-180.0..=180.0).contains(&value)
    }

    /// Wrap a Degrees value into the range: -180.0 < value <= 180.0
    ///
    /// A value above 180 has 360 subtracted from it, a value at or below -180
    /// has 360 added to it. An angle swept through the antipodal direction
    /// therefore changes sign instead of jumping by 360 degrees.
    /// # Examples
    /// ```
    /// use tectonic_sphere::trig::Degrees;
    ///
    /// assert_eq!(-90.0, Degrees(270.0).normalise().0);
    /// assert_eq!(180.0, Degrees(-180.0).normalise().0);
    /// assert_eq!(180.0, Degrees(180.0).normalise().0);
    /// assert_eq!(0.0, Degrees(360.0).normalise().0);
    /// ```
    #[debug_requires((-540.0..=540.0).contains(&self.0))]
    #[debug_ensures(ret.is_valid() && (-180.0 < ret.0))]
    #[must_use]
    pub fn normalise(&self) -> Self {
        if self.0 <= -180.0 {
            Self(self.0 + 360.0)
        } else if self.0 <= 180.0 {
            *self
        } else {
            Self(self.0 - 360.0)
        }
    }
}

impl Validate for Degrees {
    /// Test whether a Degrees is valid.
    /// I.e. whether it lies in the range: -180.0 <= value <= 180.0
    fn is_valid(&self) -> bool {
        Self::is_longitude(self.0)
    }
}

impl From<Radians> for Degrees {
    /// Construct an angle in Degrees from an angle in Radians.
    /// # Examples
    /// ```
    /// use tectonic_sphere::trig::{Degrees, Radians};
    ///
    /// let answer = Degrees::from(Radians(std::f64::consts::FRAC_PI_2));
    /// assert_eq!(90.0, answer.0);
    /// ```
    fn from(a: Radians) -> Self {
        Self(a.0.to_degrees())
    }
}

impl Neg for Degrees {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Radians {
    /// Normalise a Radians into the range:
    /// -std::f64::consts::PI < value <= std::f64::consts::PI
    #[must_use]
    pub fn normalise(&self) -> Self {
        if self.0 <= -std::f64::consts::PI {
            Self(self.0 + std::f64::consts::TAU)
        } else if self.0 <= std::f64::consts::PI {
            *self
        } else {
            Self(self.0 - std::f64::consts::TAU)
        }
    }
}

impl Validate for Radians {
    /// Test whether a Radians is valid.
    /// I.e. whether it lies in the range: -PI <= value <= PI
    fn is_valid(&self) -> bool {
        (-std::f64::consts::PI..=std::f64::consts::PI).contains(&self.0)
    }
}

impl From<Degrees> for Radians {
    /// Construct an angle in Radians from an angle in Degrees.
    fn from(a: Degrees) -> Self {
        Self(a.0.to_radians())
    }
}

impl Neg for Radians {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// The `UnitNegRange` newtype an f64.
/// A valid `UnitNegRange` value lies between -1.0 and +1.0 inclusive.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct UnitNegRange(pub f64);

impl Validate for UnitNegRange {
    /// Test whether a `UnitNegRange` is valid.
    /// I.e. whether it lies in the range: -1.0 <= value <= 1.0
    fn is_valid(&self) -> bool {
        (-1.0..=1.0).contains(&self.0)
    }
}

impl Neg for UnitNegRange {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl UnitNegRange {
    /// Clamp value into the valid range: -1.0 to +1.0 inclusive.
    /// # Examples
    /// ```
    /// use tectonic_sphere::trig::UnitNegRange;
    ///
    /// assert_eq!(-1.0, UnitNegRange::clamp(-1.0 - std::f64::EPSILON).0);
    /// assert_eq!(-0.5, UnitNegRange::clamp(-0.5).0);
    /// assert_eq!(1.0, UnitNegRange::clamp(1.0 + std::f64::EPSILON).0);
    /// ```
    #[debug_ensures(ret.is_valid())]
    #[must_use]
    pub fn clamp(value: f64) -> Self {
        Self(clamp(value, -1.0, 1.0))
    }
}

/// Swap the sine into the cosine of an Angle and vice versa.
/// Uses the identity sin<sup>2</sup> + cos<sup>2</sup> = 1
#[must_use]
pub fn swap_sin_cos(a: UnitNegRange) -> UnitNegRange {
    UnitNegRange::clamp(libm::sqrt((1.0 - a.0) * (1.0 + a.0)))
}

/// Calculate the cosine of an Angle from it's sine and the sign of the cosine.
/// * `a` the sine of the angle.
/// * `sign` the sign of the cosine of the angle.
#[must_use]
pub fn cosine_from_sine(a: UnitNegRange, sign: f64) -> UnitNegRange {
    UnitNegRange(libm::copysign(swap_sin_cos(a).0, sign))
}

/// An angle represented by it's sine and cosine as `UnitNegRanges`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Angle {
    /// The sine of the angle.
    s: UnitNegRange,
    /// The cosine of the angle.
    c: UnitNegRange,
}

impl Default for Angle {
    /// Zero degrees or radians.
    fn default() -> Self {
        Self {
            s: UnitNegRange(0.0),
            c: UnitNegRange(1.0),
        }
    }
}

impl Neg for Angle {
    type Output = Self;

    /// Negates the sine of the Angle, does not affect the cosine.
    fn neg(self) -> Self {
        Self {
            s: -self.s,
            c: self.c,
        }
    }
}

impl Validate for Angle {
    /// Test whether an Angle is valid, i.e. whether s^2 + c^2 is approx = 1.0.
    fn is_valid(&self) -> bool {
        const MIN_SQ_LENGTH: f64 = 1.0 - 32.0 * std::f64::EPSILON;
        const MAX_SQ_LENGTH: f64 = 1.0 + 32.0 * std::f64::EPSILON;
        let sq_length = self.s.0.mul_add(self.s.0, self.c.0 * self.c.0);
        (MIN_SQ_LENGTH..=MAX_SQ_LENGTH).contains(&sq_length)
    }
}

impl Angle {
    /// Construct an Angle from sin and cos values.
    #[debug_ensures(ret.is_valid())]
    #[must_use]
    pub fn new(s: UnitNegRange, c: UnitNegRange) -> Self {
        Self { s, c }
    }

    /// Construct an Angle from y and x values.
    /// Normalises the values, a zero length vector is a zero angle.
    #[debug_ensures(ret.is_valid())]
    #[must_use]
    pub fn from_y_x(sine: f64, cosine: f64) -> Self {
        let length = libm::hypot(sine, cosine);

        if length > std::f64::EPSILON {
            Self {
                s: UnitNegRange::clamp(sine / length),
                c: UnitNegRange::clamp(cosine / length),
            }
        } else {
            Self::default()
        }
    }

    /// The sine of the Angle.
    #[must_use]
    pub const fn sin(self) -> f64 {
        self.s.0
    }

    /// The cosine of the Angle.
    #[must_use]
    pub const fn cos(self) -> f64 {
        self.c.0
    }

    /// The Angle in Radians.
    #[debug_ensures(ret.is_valid())]
    #[must_use]
    pub fn to_radians(self) -> Radians {
        Radians(libm::atan2(self.s.0, self.c.0))
    }

    /// Test whether an Angle value is a valid latitude,
    /// i.e. whether: 0.0 <= Angle.cos
    #[must_use]
    pub fn is_valid_latitude(&self) -> bool {
        0.0 <= self.c.0
    }
}

impl From<Degrees> for Angle {
    /// Construct an Angle from an angle in Degrees.
    /// In order to minimize round-off errors, the sine is only calculated
    /// directly for angles with sine values <= 1 / sqrt(2), so that
    /// well known angles such as 30, 45, 60 and 90 degrees are exact.
    /// It is based on the `GeographicLib::Math::sincosd` function.
    /// # Examples
    /// ```
    /// use tectonic_sphere::trig::{Angle, Degrees};
    ///
    /// let angle_30 = Angle::from(Degrees(30.0));
    /// assert_eq!(0.5, angle_30.sin());
    /// let angle_m90 = Angle::from(Degrees(-90.0));
    /// assert_eq!(-1.0, angle_m90.sin());
    /// assert_eq!(0.0, angle_m90.cos());
    /// ```
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from(a: Degrees) -> Self {
        let (remainder, quadrant) = libm::remquo(a.0, 90.0);

        let abs_angle = libm::fabs(remainder);
        let (mut sine, cosine) = if abs_angle == 0.0 {
            (UnitNegRange(0.0), UnitNegRange(1.0))
        } else if abs_angle < 45.0 {
            let s = UnitNegRange(if abs_angle == 30.0 {
                0.5
            } else {
                libm::sin(abs_angle.to_radians())
            });
            (s, swap_sin_cos(s))
        } else if abs_angle > 45.0 {
            let c = UnitNegRange(if abs_angle == 60.0 {
                0.5
            } else {
                libm::cos(abs_angle.to_radians())
            });
            (swap_sin_cos(c), c)
        } else {
            let s = UnitNegRange(std::f64::consts::FRAC_1_SQRT_2);
            (s, s)
        };

        if remainder < 0.0 {
            sine = -sine;
        }

        match (quadrant as u32) & 3 {
            0 => Self { s: sine, c: cosine },
            1 => Self {
                s: cosine,
                c: -sine,
            },
            2 => Self {
                s: -sine,
                c: -cosine,
            },
            _ => Self {
                s: -cosine,
                c: sine,
            },
        }
    }
}

impl From<Radians> for Angle {
    /// Construct an Angle from an angle in Radians.
    fn from(a: Radians) -> Self {
        const PI_4: f64 = std::f64::consts::FRAC_PI_4;

        let valid_angle = a.normalise();
        let abs_angle = libm::fabs(valid_angle.0);

        if (PI_4 < abs_angle) && (abs_angle < (std::f64::consts::PI - PI_4)) {
            let c = UnitNegRange(libm::sin(std::f64::consts::FRAC_PI_2 - abs_angle));
            let s = cosine_from_sine(c, valid_angle.0);
            Self { s, c }
        } else {
            let s = UnitNegRange(libm::sin(valid_angle.0));
            let c = cosine_from_sine(s, std::f64::consts::FRAC_PI_2 - abs_angle);
            Self { s, c }
        }
    }
}

impl From<Angle> for Degrees {
    /// Convert an Angle to Degrees.
    #[debug_ensures(ret.is_valid())]
    fn from(a: Angle) -> Self {
        Self::from(a.to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_within_tolerance;

    #[test]
    fn test_degrees_normalise() {
        assert_eq!(Degrees(-90.0), Degrees(270.0).normalise());
        assert_eq!(Degrees(180.0), Degrees(180.0).normalise());
        assert_eq!(Degrees(180.0), Degrees(-180.0).normalise());
        assert_eq!(Degrees(-179.0), Degrees(181.0).normalise());
        assert_eq!(Degrees(45.0), Degrees(45.0).normalise());
    }

    #[test]
    fn test_radians_normalise() {
        let pi = std::f64::consts::PI;
        assert_eq!(pi, Radians(-pi).normalise().0);
        assert_eq!(pi, Radians(pi).normalise().0);
        assert_eq!(0.0, Radians(std::f64::consts::TAU).normalise().0);
    }

    #[test]
    fn test_angle_from_degrees() {
        for i in -179..180 {
            let degrees = f64::from(i);
            let angle = Angle::from(Degrees(degrees));
            assert!(angle.is_valid());
            assert!(is_within_tolerance(
                degrees.to_radians(),
                angle.to_radians().0,
                4.0 * std::f64::EPSILON * (1.0 + libm::fabs(degrees.to_radians()))
            ));
        }

        let angle_45 = Angle::from(Degrees(45.0));
        assert_eq!(angle_45.sin(), angle_45.cos());

        let angle_180 = Angle::from(Degrees(180.0));
        assert_eq!(0.0, angle_180.sin());
        assert_eq!(-1.0, angle_180.cos());
    }

    #[test]
    fn test_angle_from_radians() {
        let angle = Angle::from(Radians(std::f64::consts::FRAC_PI_2));
        assert_eq!(1.0, angle.sin());
        assert!(is_within_tolerance(0.0, angle.cos(), std::f64::EPSILON));

        let angle = Angle::from(Radians(-0.3));
        assert!(is_within_tolerance(
            -0.3,
            angle.to_radians().0,
            std::f64::EPSILON
        ));
    }

    #[test]
    fn test_angle_from_y_x() {
        let angle = Angle::from_y_x(1.0, 1.0);
        assert!(is_within_tolerance(
            std::f64::consts::FRAC_PI_4,
            angle.to_radians().0,
            std::f64::EPSILON
        ));

        // A zero length vector is a zero angle
        assert_eq!(Angle::default(), Angle::from_y_x(0.0, 0.0));

        let minus = -Angle::from_y_x(1.0, 0.0);
        assert_eq!(-1.0, minus.sin());
        assert_eq!(0.0, minus.cos());
    }

    #[test]
    fn test_serde_degrees() {
        let degrees_20 = Degrees(20.0);

        let serialized = serde_json::to_string(&degrees_20).unwrap();
        assert_eq!("20.0", serialized);
        let deserialized: Degrees = serde_json::from_str(&serialized).unwrap();
        assert_eq!(degrees_20, deserialized);
    }
}
