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

//! The config module contains the `Settings` of the rendering and editing
//! operations, read from JSON.

use crate::error::ConfigError;
use crate::proximity::ProximityCriteria;
use crate::sphere::PointOnSphere;
use crate::trig::{Degrees, Radians};
use serde::{Deserialize, Serialize};

/// The settings of the rendering and editing operations.
/// Missing fields take their default values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The maximum angle between consecutive tessellated points.
    pub tessellation_step: Degrees,
    /// The angular radius within which a dragged vertex snaps to a vertex
    /// of another geometry.
    pub snap_radius: Degrees,
    /// Whether intermediate moves of a drag are merged into the final move
    /// in an `EditLog`.
    pub coalesce_intermediate_moves: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tessellation_step: Degrees(1.0),
            snap_radius: Degrees(0.5),
            coalesce_intermediate_moves: true,
        }
    }
}

impl Settings {
    /// Read `Settings` from a JSON string.
    /// # Errors
    /// `ConfigError` if the JSON is invalid or a value is out of range.
    ///
    /// # Examples
    /// ```
    /// use tectonic_sphere::config::Settings;
    ///
    /// let settings = Settings::from_json(r#"{ "tessellation_step": 2.5 }"#).unwrap();
    /// assert_eq!(2.5, settings.tessellation_step.0);
    /// assert_eq!(0.5, settings.snap_radius.0);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the values are in range.
    /// # Errors
    /// * `InvalidStep` if the tessellation step is not greater than zero.
    /// * `InvalidSnapRadius` if the snap radius is not in [0, 180) degrees.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0 < self.tessellation_step.0 && self.tessellation_step.0.is_finite()) {
            return Err(ConfigError::InvalidStep(self.tessellation_step.0));
        }
        if !(0.0..180.0).contains(&self.snap_radius.0) {
            return Err(ConfigError::InvalidSnapRadius(self.snap_radius.0));
        }
        Ok(())
    }

    /// The tessellation step in `Radians`.
    #[must_use]
    pub fn tessellation_step_radians(&self) -> Radians {
        Radians::from(self.tessellation_step)
    }

    /// The criteria to find vertices to snap to near a point.
    #[must_use]
    pub fn snap_criteria(&self, point: PointOnSphere) -> ProximityCriteria {
        ProximityCriteria::from_angular_radius(point, Radians::from(self.snap_radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_within_tolerance;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(Degrees(1.0), settings.tessellation_step);
        assert!(settings.coalesce_intermediate_moves);

        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(Settings::default(), settings);
    }

    #[test]
    fn test_settings_from_json() {
        let json = r#"{
            "tessellation_step": 5.0,
            "snap_radius": 1.0,
            "coalesce_intermediate_moves": false
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(Degrees(5.0), settings.tessellation_step);
        assert!(!settings.coalesce_intermediate_moves);

        let criteria = settings.snap_criteria(PointOnSphere::north_pole());
        assert!(is_within_tolerance(
            libm::cos(Radians::from(Degrees(1.0)).0),
            criteria.closeness_inclusion_threshold(),
            std::f64::EPSILON
        ));

        let serialized = serde_json::to_string(&settings).unwrap();
        assert_eq!(settings, Settings::from_json(&serialized).unwrap());
    }

    #[test]
    fn test_settings_errors() {
        assert!(matches!(
            Settings::from_json("{ \"tessellation_step\": "),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "tessellation_step": 0.0 }"#),
            Err(ConfigError::InvalidStep(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "snap_radius": 180.0 }"#),
            Err(ConfigError::InvalidSnapRadius(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "snap_radius": -1.0 }"#),
            Err(ConfigError::InvalidSnapRadius(_))
        ));
    }
}
