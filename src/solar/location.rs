// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observer location.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Geographic location used to compute sunrise, sunset and solar noon.
///
/// Immutable once constructed. The IANA time zone decides which local
/// calendar day an instant belongs to, and where the civil fallback hours
/// fall. Sun times themselves are absolute instants.
///
/// # Examples
///
/// ```
/// use sunlit::solar::Location;
///
/// let home = Location::new(51.5074, -0.1278, "Europe/London").unwrap();
/// assert_eq!(home.time_zone(), "Europe/London");
///
/// assert!(Location::new(91.0, 0.0, "UTC").is_err());
/// assert!(Location::new(51.5, 0.0, "Mars/Olympus_Mons").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocation")]
pub struct Location {
    latitude: f64,
    longitude: f64,
    time_zone: String,
    #[serde(skip)]
    tz: Tz,
}

impl Location {
    /// Creates a validated location.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidLatitude` or `ValueError::InvalidLongitude`
    /// for coordinates that are out of range or not finite, and
    /// `ValueError::UnknownTimeZone` for a name missing from the IANA
    /// database.
    pub fn new(
        latitude: f64,
        longitude: f64,
        time_zone: impl Into<String>,
    ) -> Result<Self, ValueError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ValueError::InvalidLatitude(latitude.to_string()));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValueError::InvalidLongitude(longitude.to_string()));
        }
        let time_zone = time_zone.into();
        let tz = time_zone
            .parse::<Tz>()
            .map_err(|_| ValueError::UnknownTimeZone(time_zone.clone()))?;
        Ok(Self {
            latitude,
            longitude,
            time_zone,
            tz,
        })
    }

    /// Latitude in degrees, north positive.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, east positive.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Time zone identifier, e.g. `Europe/London`.
    #[must_use]
    pub fn time_zone(&self) -> &str {
        &self.time_zone
    }

    /// Parsed time zone.
    #[must_use]
    pub fn tz(&self) -> Tz {
        self.tz
    }
}

#[derive(Deserialize)]
struct RawLocation {
    latitude: f64,
    longitude: f64,
    #[serde(default = "default_time_zone")]
    time_zone: String,
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

impl TryFrom<RawLocation> for Location {
    type Error = ValueError;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude, raw.time_zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_rejects_bad_coordinates() {
        assert!(matches!(
            Location::new(-90.5, 0.0, "UTC"),
            Err(ValueError::InvalidLatitude(_))
        ));
        assert!(matches!(
            Location::new(0.0, 181.0, "UTC"),
            Err(ValueError::InvalidLongitude(_))
        ));
        assert!(Location::new(f64::NAN, 0.0, "UTC").is_err());
    }

    #[test]
    fn location_rejects_unknown_time_zone() {
        assert_eq!(
            Location::new(51.5, 0.0, "Europe/Atlantis"),
            Err(ValueError::UnknownTimeZone("Europe/Atlantis".to_string()))
        );
        let sydney = Location::new(-33.87, 151.21, "Australia/Sydney").unwrap();
        assert_eq!(sydney.tz(), chrono_tz::Australia::Sydney);
    }

    #[test]
    fn location_deserialize_validates() {
        let ok: Location =
            serde_json::from_str(r#"{"latitude": 40.71, "longitude": -74.0}"#).unwrap();
        assert_eq!(ok.time_zone(), "UTC");
        assert!(serde_json::from_str::<Location>(r#"{"latitude": 100, "longitude": 0}"#).is_err());
        assert!(
            serde_json::from_str::<Location>(
                r#"{"latitude": 10, "longitude": 0, "time_zone": "Nowhere/Town"}"#
            )
            .is_err()
        );
    }
}
